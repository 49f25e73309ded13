//! Meridian Ledger Core
//!
//! Operation evaluation framework for the Meridian state-transition engine:
//! every transaction operation is validated against current chain state,
//! charged a fee, and applied to mutate that state through the scaffolding in
//! this crate. Persistence backends, wire formats and consensus networking
//! are deliberately out of scope; the `LedgerStore` trait is the boundary to
//! the first and the operation model is plain in-memory values.

pub mod evaluation;
pub mod objects;
pub mod operation;
pub mod protocol;
pub mod storage;

// Re-export object model
pub use objects::{
    AccountObject, AccountStatisticsObject, AssetDynamicData, AssetObject, FbaAccumulatorObject,
};

// Re-export operation model
pub use operation::{
    AccountUpdateOperation, Fee, FeePoolDepositOperation, Operation, OperationValidationError,
    OperationVariant, TransferOperation,
};

// Re-export storage layer
pub use storage::{LedgerStore, MemoryStore, StorageError, StorageResult};

// Re-export evaluation framework
pub use evaluation::{
    process_operations, EvalResult, EvaluationError, Evaluator, EvaluatorRegistry, FeeAccounting,
    FeeSource, LedgerMutator, LedgerView, OpEvaluator, OpEvaluatorEntry, OperationHandler,
    OperationOutcome, RegistryBuilder, TransactionContext,
};

// Re-export protocol parameters
pub use protocol::ChainParams;

// Re-export the canonical primitive types for convenience
pub use lib_types::{
    AccountUid, Amount, AssetAmount, AssetId, ExchangeRate, ObjectId, ObjectRef, OperationTag,
    CORE_ASSET,
};
