//! Meridian Fee Schedule
//!
//! Pure, deterministic fee computation for Meridian operations.
//!
//! # Design Principles
//!
//! 1. **Pure functions** - No side effects, no global state
//! 2. **Deterministic** - Same inputs produce identical outputs across all platforms
//! 3. **No floats** - All arithmetic uses u64/u128 integers
//! 4. **Overflow-safe** - Uses checked/saturating arithmetic
//!
//! # Type Architecture
//!
//! Pure data types (`OpFeeParams`, `FeeScheduleParams`, `RequiredFeePair`)
//! are defined in `lib-types::fees` and re-exported here for convenience.
//!
//! # Usage
//!
//! ```
//! use lib_fees::{required_fee_pair, FeeScheduleParams};
//! use lib_types::OperationTag;
//!
//! let params = FeeScheduleParams::default();
//! let pair = required_fee_pair(&params, OperationTag::Transfer, 58);
//! assert!(pair.min_from_real_sources <= pair.total);
//! ```

pub mod schedule;

#[cfg(test)]
mod golden_vectors;

// Re-export pure data types from lib-types (canonical location)
pub use lib_types::fees::{FeeScheduleParams, OpFeeParams, RequiredFeePair, BPS_DENOMINATOR};

// Re-export computation functions and the deficit error
pub use schedule::{required_fee, required_fee_pair, verify_fee_pair, FeeDeficit};
