//! Fee Schedule (Pure Functions)
//!
//! Deterministic required-fee computation for Meridian operations.
//!
//! # Rules (enforced in code)
//!
//! - No floats - all arithmetic is integer
//! - u128 arithmetic internally to prevent overflow
//! - The accumulated-stake credit allowance floors, so the non-credit floor
//!   rounds up - a fractional basis point can never buy an extra unit of
//!   credit spending
//!
//! # Evaluator Integration
//!
//! The operation evaluator MUST reject any operation where the declared fee
//! fails `verify_fee_pair`.

use thiserror::Error;

use lib_types::fees::{FeeScheduleParams, RequiredFeePair, BPS_DENOMINATOR};
use lib_types::primitives::{Amount, OperationTag};

/// Error returned when a declared fee does not satisfy the schedule
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeeDeficit {
    /// Total declared fee is below the schedule requirement
    #[error("insufficient total fee: required {required}, provided {provided}")]
    Total { required: Amount, provided: Amount },

    /// The portion paid from balance and prepaid credit is below the policy
    /// floor, regardless of the total
    #[error(
        "insufficient fee from real sources: required {required}, \
         provided {from_balance} from balance and {from_prepaid} from prepaid"
    )]
    RealSources {
        required: Amount,
        from_balance: Amount,
        from_prepaid: Amount,
    },
}

/// Compute the total fee required for one operation.
///
/// # Determinism
///
/// This function is **pure** and **deterministic**:
/// - No side effects
/// - No floating point arithmetic
/// - Uses u128 internally to prevent overflow
/// - Same inputs always produce same output on all platforms
///
/// # Algorithm
///
/// ```text
/// raw_fee   = base_fee[tag] + payload_bytes * price_per_byte[tag]
/// final_fee = max(raw_fee, minimum_fee)
/// ```
pub fn required_fee(params: &FeeScheduleParams, tag: OperationTag, payload_bytes: u32) -> Amount {
    let op = params.op_params(tag);

    let byte_fee: u128 = (payload_bytes as u128).saturating_mul(op.price_per_byte as u128);
    let raw: u128 = (op.base_fee as u128).saturating_add(byte_fee);

    // Clamp to u64 before applying the chain minimum
    let fee = raw.min(u64::MAX as u128) as u64;
    fee.max(params.minimum_fee)
}

/// Compute the required fee pair for one operation.
///
/// The first element is the total fee required; the second is the minimum
/// portion that must come from balance or prepaid credit rather than from
/// the accumulated-stake credit.
///
/// The credit allowance is `total * csaf_limit_bps / 10000`, **floored**, so
/// the non-credit floor rounds up.
pub fn required_fee_pair(
    params: &FeeScheduleParams,
    tag: OperationTag,
    payload_bytes: u32,
) -> RequiredFeePair {
    let total = required_fee(params, tag, payload_bytes);

    let limit_bps = params.csaf_limit_bps.min(BPS_DENOMINATOR);
    let csaf_allowance = ((total as u128) * (limit_bps as u128) / (BPS_DENOMINATOR as u128)) as u64;

    RequiredFeePair {
        total,
        min_from_real_sources: total - csaf_allowance,
    }
}

/// Verify a declared fee split against the schedule.
///
/// `total_paid` is the declared fee across all sources in core-asset terms;
/// `from_balance` and `from_prepaid` are the portions covered by the payer's
/// balance and prepaid credit respectively.
pub fn verify_fee_pair(
    params: &FeeScheduleParams,
    tag: OperationTag,
    payload_bytes: u32,
    total_paid: Amount,
    from_balance: Amount,
    from_prepaid: Amount,
) -> Result<(), FeeDeficit> {
    let pair = required_fee_pair(params, tag, payload_bytes);

    if total_paid < pair.total {
        return Err(FeeDeficit::Total {
            required: pair.total,
            provided: total_paid,
        });
    }

    let real = from_balance.saturating_add(from_prepaid);
    if real < pair.min_from_real_sources {
        return Err(FeeDeficit::RealSources {
            required: pair.min_from_real_sources,
            from_balance,
            from_prepaid,
        });
    }

    Ok(())
}
