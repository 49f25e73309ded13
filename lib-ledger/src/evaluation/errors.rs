//! Evaluation Errors
//!
//! Error types for operation evaluation. These are distinct from storage
//! errors - evaluation errors represent semantic failures (insufficient fee,
//! unknown account, broken invariant) and every one of them aborts the
//! enclosing transaction.
//!
//! All failures are deterministic functions of (operation, pre-state) so that
//! every validating node reaches the identical accept/reject verdict.

use std::fmt;
use thiserror::Error;

use lib_fees::FeeDeficit;
use lib_types::{AccountUid, Amount, AssetId, OperationTag};

use crate::operation::OperationValidationError;
use crate::storage::StorageError;

/// Which fee source failed to cover its declared portion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeSource {
    Balance,
    Prepaid,
    Csaf,
}

impl fmt::Display for FeeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeeSource::Balance => "balance",
            FeeSource::Prepaid => "prepaid credit",
            FeeSource::Csaf => "accumulated-stake credit",
        };
        write!(f, "{}", name)
    }
}

impl std::error::Error for FeeSource {}

/// Error during operation evaluation
#[derive(Error, Debug, Clone)]
pub enum EvaluationError {
    // =========================================================================
    // Fee Errors
    // =========================================================================

    #[error("insufficient total fee: required {required}, provided {provided}")]
    InsufficientFee { required: Amount, provided: Amount },

    #[error(
        "insufficient fee from real sources: required {required}, \
         provided {from_balance} from balance and {from_prepaid} from prepaid"
    )]
    InsufficientRealFee {
        required: Amount,
        from_balance: Amount,
        from_prepaid: Amount,
    },

    #[error(
        "{payer} cannot cover {required} {asset} for fees from {source}: \
         {available} available"
    )]
    InsufficientFeeSources {
        payer: AccountUid,
        asset: AssetId,
        source: FeeSource,
        required: Amount,
        available: Amount,
    },

    #[error("fee pool of {asset} cannot cover conversion: required {required}, available {available}")]
    FeePoolInsufficient {
        asset: AssetId,
        required: Amount,
        available: Amount,
    },

    #[error("fee accounting used before prepare_fee")]
    FeeNotPrepared,

    // =========================================================================
    // Dispatch Errors
    // =========================================================================

    #[error("no evaluator registered for operation {0}")]
    UnregisteredOperation(OperationTag),

    #[error("evaluator for operation {0} registered twice")]
    DuplicateEvaluator(OperationTag),

    /// Broken internal invariant: unreachable with a correctly built registry
    #[error("evaluator bound to {expected} received a {actual} operation")]
    InternalTypeMismatch {
        expected: OperationTag,
        actual: OperationTag,
    },

    // =========================================================================
    // Reference Errors
    // =========================================================================

    #[error("relative object reference {index} out of range: {available} results so far")]
    InvalidRelativeReference { index: u32, available: usize },

    // =========================================================================
    // Object Errors
    // =========================================================================

    #[error("{0} not found")]
    AccountNotFound(AccountUid),

    #[error("statistics record for {0} not found")]
    StatisticsNotFound(AccountUid),

    #[error("{0} not found")]
    AssetNotFound(AssetId),

    #[error("dynamic data for {0} not found")]
    AssetDynamicDataNotFound(AssetId),

    // =========================================================================
    // Balance Errors
    // =========================================================================

    #[error("{account} has {available} {asset}, needs {required}")]
    InsufficientBalance {
        account: AccountUid,
        asset: AssetId,
        available: Amount,
        required: Amount,
    },

    #[error("amount overflow")]
    AmountOverflow,

    // =========================================================================
    // General Errors
    // =========================================================================

    #[error("operation {index} failed: {source}")]
    OperationFailed {
        index: usize,
        #[source]
        source: Box<EvaluationError>,
    },

    #[error("invalid operation: {0}")]
    InvalidOperation(#[from] OperationValidationError),

    /// Domain-specific handler failure, propagated unchanged
    #[error("{0}")]
    Handler(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<FeeDeficit> for EvaluationError {
    fn from(deficit: FeeDeficit) -> Self {
        match deficit {
            FeeDeficit::Total { required, provided } => {
                EvaluationError::InsufficientFee { required, provided }
            }
            FeeDeficit::RealSources {
                required,
                from_balance,
                from_prepaid,
            } => EvaluationError::InsufficientRealFee {
                required,
                from_balance,
                from_prepaid,
            },
        }
    }
}

/// Result type for operation evaluation
pub type EvalResult<T> = Result<T, EvaluationError>;
