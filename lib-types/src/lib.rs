//! Meridian ledger primitives.
//! Stable, protocol-neutral, behavior-free.
//!
//! Rule: consensus identifiers are numeric newtypes, never strings.

pub mod fees;
pub mod primitives;

// Canonical consensus types
pub use primitives::{
    AccountUid, Amount, AssetAmount, AssetId, ExchangeRate, ObjectId, ObjectRef, OperationTag,
    RateError, CORE_ASSET,
};

pub use fees::{FeeScheduleParams, OpFeeParams, RequiredFeePair, BPS_DENOMINATOR};
