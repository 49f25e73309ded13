//! Operation Evaluator Lifecycle
//!
//! Binds a concrete handler's domain logic to the shared two-phase lifecycle.
//!
//! # Execution Order (NON-NEGOTIABLE)
//!
//! ```text
//! start_evaluate
//!   evaluate
//!     prepare_fee
//!     fee-schedule sufficiency check (unless skipped by the context)
//!     do_evaluate
//!   apply (only when the apply flag is set)
//!     convert_fee
//!     pay_fee
//!     do_apply
//!     debit payer balance (fee_from_account)
//!     process_fee_options
//! ```
//!
//! The ordering is load-bearing: the payer's balance is debited *after*
//! `do_apply`, so a handler's own balance checks see pre-fee-debit state,
//! while fee sufficiency is checked during evaluate, before any mutation, so
//! an insufficient fee aborts before ledger state is touched.

use lib_types::OperationTag;

use crate::operation::{Operation, OperationVariant};

use super::context::TransactionContext;
use super::errors::{EvalResult, EvaluationError};
use super::fees::FeeAccounting;
use super::OperationOutcome;

/// Domain logic contract every operation handler satisfies.
///
/// Handlers assume the operation's context-free `validate()` has already
/// passed upstream and do not repeat those checks. `do_evaluate` performs
/// stateful validation only; `do_apply` performs the state mutation.
///
/// Handlers are constructed fresh per evaluation (hence `Default`) and may
/// cache state between `do_evaluate` and `do_apply` in their own fields.
pub trait OperationHandler: Default {
    /// The operation variant this handler evaluates
    type Op: OperationVariant;

    /// Stateful validation; must not mutate ledger state
    fn do_evaluate(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Self::Op,
    ) -> EvalResult<OperationOutcome>;

    /// State mutation; runs only when the apply flag is set
    fn do_apply(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Self::Op,
    ) -> EvalResult<OperationOutcome>;

    /// Route the prepared fee during apply.
    ///
    /// The default routes to the payer's statistics record. Handlers whose
    /// fee must be pooled or burned override this and call
    /// [`FeeAccounting::pay_fba_fee`] instead.
    fn pay_fee(&self, ctx: &TransactionContext<'_>, fees: &FeeAccounting) -> EvalResult<()> {
        fees.pay_fee(&ctx.mutator(), ctx.params())
    }
}

/// Typed binding of one handler to the shared evaluation lifecycle
#[derive(Default)]
pub struct Evaluator<H: OperationHandler> {
    handler: H,
    fees: FeeAccounting,
}

impl<H: OperationHandler> Evaluator<H> {
    pub fn new() -> Self {
        Self {
            handler: H::default(),
            fees: FeeAccounting::new(),
        }
    }

    /// The operation tag this evaluator handles, bound at compile time
    /// through the handler's associated operation type.
    pub fn operation_tag() -> OperationTag {
        <H::Op as OperationVariant>::TAG
    }

    /// The fee accounting state of the current evaluation
    pub fn fees(&self) -> &FeeAccounting {
        &self.fees
    }

    /// Extract the concrete payload from a generic operation.
    ///
    /// A mismatch is a broken internal invariant - unreachable when the
    /// registry was built through `register`, which keys entries by the same
    /// associated tag this binding extracts with.
    fn extract<'op>(op: &'op Operation) -> EvalResult<&'op H::Op> {
        H::Op::from_operation(op).ok_or(EvaluationError::InternalTypeMismatch {
            expected: Self::operation_tag(),
            actual: op.tag(),
        })
    }

    /// Lifecycle phase one: fee preparation, fee-schedule checking and
    /// stateful validation. Mutates nothing.
    pub fn evaluate(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Operation,
    ) -> EvalResult<OperationOutcome> {
        let typed = Self::extract(op)?;

        self.fees
            .prepare_fee(&ctx.view(), typed.fee_payer(), typed.fee())?;

        if !ctx.skip_fee_schedule_check {
            lib_fees::verify_fee_pair(
                &ctx.params().fee_schedule,
                op.tag(),
                op.payload_size(),
                self.fees.total_fee_paid,
                self.fees.from_balance,
                self.fees.from_prepaid,
            )?;
        }

        self.handler.do_evaluate(ctx, typed)
    }

    /// Lifecycle phase two: fee settlement and state mutation.
    pub fn apply(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Operation,
    ) -> EvalResult<OperationOutcome> {
        let typed = Self::extract(op)?;

        self.fees.convert_fee(&ctx.mutator())?;
        self.handler.pay_fee(ctx, &self.fees)?;

        let outcome = self.handler.do_apply(ctx, typed)?;

        self.fees.debit_payer_balance(&ctx.mutator())?;
        self.fees.process_fee_options(&ctx.mutator(), ctx.params())?;

        Ok(outcome)
    }

    /// Entry point invoked by the dispatch registry: evaluate, and - when the
    /// apply flag is set - apply, returning the result of whichever phase ran
    /// last.
    pub fn start_evaluate(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Operation,
        apply: bool,
    ) -> EvalResult<OperationOutcome> {
        let outcome = self.evaluate(ctx, op)?;
        if apply {
            self.apply(ctx, op)
        } else {
            Ok(outcome)
        }
    }
}
