//! Operation Evaluation Framework
//!
//! The shared scaffolding every operation handler plugs into: the two-phase
//! evaluate/apply lifecycle, the fee pipeline, and the tag-indexed dispatch
//! registry.
//!
//! # Consensus Invariant
//!
//! Given the same operation and the same prior state, every node must compute
//! the exact same fee, the exact same validity verdict and the exact same
//! resulting state. Everything in this module is single-threaded, synchronous
//! and deterministic; evaluation borrows the store for the duration of one
//! call and retains nothing.
//!
//! # Lifecycle
//!
//! ```text
//! registry.dispatch(ctx, op, apply)
//!   -> fresh Evaluator<H>
//!      evaluate: prepare_fee -> fee-schedule check -> do_evaluate
//!      apply:    convert_fee -> pay_fee -> do_apply -> balance debit
//!                -> process_fee_options
//! ```
//!
//! Fee sufficiency is checked before any mutation; the payer's balance is
//! debited only after the handler's own mutation has run.

pub mod context;
pub mod driver;
pub mod errors;
pub mod evaluator;
pub mod fees;
pub mod mutator;
pub mod registry;
pub mod view;

use serde::{Deserialize, Serialize};

use lib_types::{AssetAmount, ObjectId};

// Re-export the framework surface
pub use context::TransactionContext;
pub use driver::process_operations;
pub use errors::{EvalResult, EvaluationError, FeeSource};
pub use evaluator::{Evaluator, OperationHandler};
pub use fees::FeeAccounting;
pub use mutator::LedgerMutator;
pub use registry::{EvaluatorRegistry, OpEvaluator, OpEvaluatorEntry, RegistryBuilder};
pub use view::LedgerView;

/// Result of one evaluated or applied operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OperationOutcome {
    /// The operation produced no value
    #[default]
    None,
    /// The operation created a ledger object
    Object(ObjectId),
    /// The operation produced an amount
    Amount(AssetAmount),
}
