//! Fee-schedule primitives for the Meridian ledger.
//!
//! Pure data types for fee calculation. Behavior (computation logic) lives in
//! lib-fees.
//!
//! Rule: these types must remain behavior-free and serialization-stable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::primitives::{Amount, OperationTag};

/// Basis-point denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Fee parameters for a single operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpFeeParams {
    /// Flat fee charged for every occurrence of the operation
    pub base_fee: Amount,
    /// Additional fee per payload byte
    pub price_per_byte: Amount,
}

impl OpFeeParams {
    pub const fn new(base_fee: Amount, price_per_byte: Amount) -> Self {
        Self {
            base_fee,
            price_per_byte,
        }
    }
}

/// Fee schedule parameters (set by governance)
///
/// Maps each operation kind to its pricing, bounds the share of a fee that
/// the accumulated-stake credit may cover, and floors every fee at a chain
/// minimum. All values are in smallest core-asset units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeScheduleParams {
    /// Per-operation pricing
    pub per_op: HashMap<OperationTag, OpFeeParams>,
    /// Share of the required fee payable from the accumulated-stake credit,
    /// in basis points. The remainder must come from balance or prepaid
    /// credit.
    pub csaf_limit_bps: u32,
    /// Minimum fee for any operation
    pub minimum_fee: Amount,
}

/// Pricing used for an operation kind missing from the schedule map
const FALLBACK_OP_FEE: OpFeeParams = OpFeeParams::new(1_000, 10);

impl FeeScheduleParams {
    /// Get the pricing for an operation kind
    pub fn op_params(&self, tag: OperationTag) -> OpFeeParams {
        self.per_op.get(&tag).copied().unwrap_or(FALLBACK_OP_FEE)
    }

    /// Replace the pricing for one operation kind
    pub fn with_op_params(mut self, tag: OperationTag, params: OpFeeParams) -> Self {
        self.per_op.insert(tag, params);
        self
    }

    /// Replace the accumulated-stake credit limit
    pub fn with_csaf_limit_bps(mut self, bps: u32) -> Self {
        self.csaf_limit_bps = bps.min(BPS_DENOMINATOR);
        self
    }

    /// Replace the chain minimum fee
    pub fn with_minimum_fee(mut self, minimum_fee: Amount) -> Self {
        self.minimum_fee = minimum_fee;
        self
    }

    /// Create params for testing (flat per-operation fees, no byte pricing)
    pub fn for_testing() -> Self {
        let mut per_op = HashMap::new();
        per_op.insert(OperationTag::Transfer, OpFeeParams::new(10, 0));
        per_op.insert(OperationTag::AccountUpdate, OpFeeParams::new(5, 0));
        per_op.insert(OperationTag::FeePoolDeposit, OpFeeParams::new(5, 0));
        Self {
            per_op,
            csaf_limit_bps: 8_000,
            minimum_fee: 0,
        }
    }
}

impl Default for FeeScheduleParams {
    fn default() -> Self {
        let mut per_op = HashMap::new();
        per_op.insert(OperationTag::Transfer, OpFeeParams::new(2_000, 10));
        per_op.insert(OperationTag::AccountUpdate, OpFeeParams::new(1_000, 10));
        per_op.insert(OperationTag::FeePoolDeposit, OpFeeParams::new(500, 10));
        Self {
            per_op,
            // Up to 80% of a fee may be covered by the accumulated-stake
            // credit; at least 20% must come from balance or prepaid credit.
            csaf_limit_bps: 8_000,
            minimum_fee: 20,
        }
    }
}

/// Required fee for one operation, split into the schedule total and the
/// policy floor on payment from real (non-csaf) sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredFeePair {
    /// Total fee required, in core-asset terms
    pub total: Amount,
    /// Minimum portion that must come from balance or prepaid credit
    pub min_from_real_sources: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_has_all_ops() {
        let params = FeeScheduleParams::default();
        assert_eq!(params.op_params(OperationTag::Transfer).base_fee, 2_000);
        assert_eq!(params.op_params(OperationTag::AccountUpdate).base_fee, 1_000);
        assert_eq!(params.op_params(OperationTag::FeePoolDeposit).base_fee, 500);
        assert_eq!(params.csaf_limit_bps, 8_000);
        assert_eq!(params.minimum_fee, 20);
    }

    #[test]
    fn test_builders() {
        let params = FeeScheduleParams::default()
            .with_op_params(OperationTag::Transfer, OpFeeParams::new(50, 1))
            .with_csaf_limit_bps(5_000)
            .with_minimum_fee(1);
        assert_eq!(params.op_params(OperationTag::Transfer).base_fee, 50);
        assert_eq!(params.csaf_limit_bps, 5_000);
        assert_eq!(params.minimum_fee, 1);
    }

    #[test]
    fn test_csaf_limit_is_clamped() {
        let params = FeeScheduleParams::default().with_csaf_limit_bps(20_000);
        assert_eq!(params.csaf_limit_bps, BPS_DENOMINATOR);
    }

    #[test]
    fn test_for_testing_is_flat() {
        let params = FeeScheduleParams::for_testing();
        assert_eq!(params.minimum_fee, 0);
        assert_eq!(params.op_params(OperationTag::Transfer).price_per_byte, 0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let params = FeeScheduleParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let deserialized: FeeScheduleParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, deserialized);
    }
}
