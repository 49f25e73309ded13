//! Operation Sequence Driver
//!
//! Processes a transaction's operations strictly in order through the
//! dispatch registry, inside one atomic store transaction.
//!
//! # Execution Order (NON-NEGOTIABLE)
//!
//! ```text
//! for op in operations:
//!   op.validate()            (context-free, before any dispatch)
//! begin_transaction
//!   for op in operations:
//!     registry.dispatch(op)  (evaluate, then apply when requested)
//!     record result
//! commit_transaction
//! ```
//!
//! **Any error → rollback_transaction()**
//!
//! A failing operation aborts the whole sequence and leaves no partial
//! mutation visible; there is no partial success and no retry here.

use tracing::{debug, warn};

use crate::operation::Operation;
use crate::storage::LedgerStore;

use super::context::TransactionContext;
use super::errors::{EvalResult, EvaluationError};
use super::registry::EvaluatorRegistry;
use super::OperationOutcome;

/// Scope guard that ensures rollback_transaction is called if not disarmed.
///
/// This provides panic-safety: even if a panic occurs after
/// begin_transaction, the guard's Drop implementation rolls back to prevent
/// partial state corruption.
struct RollbackGuard<'a> {
    store: &'a dyn LedgerStore,
    armed: bool,
}

impl<'a> RollbackGuard<'a> {
    fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store, armed: true }
    }

    /// Disarm the guard after a successful commit.
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<'a> Drop for RollbackGuard<'a> {
    fn drop(&mut self) {
        if self.armed {
            // Best-effort rollback on panic or early return
            let _ = self.store.rollback_transaction();
        }
    }
}

/// Process a sequence of operations in transaction order.
///
/// When `apply` is false every operation is evaluated (fees prepared and
/// checked, stateful validation run) without mutating ledger state; when true
/// each operation is evaluated and applied before the next one runs.
///
/// Returns the per-operation outcomes in order. Any failure is wrapped with
/// the index of the offending operation and the whole sequence is rolled
/// back.
pub fn process_operations(
    registry: &EvaluatorRegistry,
    ctx: &mut TransactionContext<'_>,
    operations: &[Operation],
    apply: bool,
) -> EvalResult<Vec<OperationOutcome>> {
    // Context-free validation runs before any dispatch; evaluators assume it
    // has passed.
    for (index, op) in operations.iter().enumerate() {
        op.validate().map_err(|e| EvaluationError::OperationFailed {
            index,
            source: Box::new(e.into()),
        })?;
    }

    ctx.store().begin_transaction()?;
    let guard = RollbackGuard::new(ctx.store());

    for (index, op) in operations.iter().enumerate() {
        let outcome = registry.dispatch(ctx, op, apply).map_err(|e| {
            warn!(
                index,
                operation = %op.tag(),
                fee = %ctx.view().pretty_amount(op.fee().total),
                error = %e,
                "operation failed"
            );
            EvaluationError::OperationFailed {
                index,
                source: Box::new(e),
            }
        })?;
        ctx.record_result(outcome);
    }

    ctx.store().commit_transaction()?;
    guard.disarm();

    debug!(
        operations = operations.len(),
        apply, "operation sequence processed"
    );
    Ok(ctx.results().to_vec())
}
