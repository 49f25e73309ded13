//! Protocol Parameters
//!
//! Consensus-critical parameters that govern fee evaluation. These are set at
//! genesis and can be updated through governance; they are deterministic, so
//! all nodes compute the same evaluation outcome for any operation.
//!
//! # Design Principles
//!
//! 1. **Deterministic**: no node-local values, no environment lookups
//! 2. **Configurable ratios**: the credit allowance and routing splits are
//!    governance parameters, never hardcoded constants
//! 3. **Genesis-defined**: initial parameters are part of genesis state

use serde::{Deserialize, Serialize};

use lib_types::fees::{FeeScheduleParams, BPS_DENOMINATOR};

/// Chain parameters consulted during operation evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Required-fee schedule, including the accumulated-stake credit limit
    pub fee_schedule: FeeScheduleParams,

    /// Share of each paid fee routed to the vested pending bucket, in basis
    /// points. The remainder lands in the immediately spendable bucket.
    pub vested_fee_bps: u32,

    /// Share of each paid fee credited back to the payer's prepaid credit
    /// after payment, in basis points. Zero disables the rebate.
    pub fee_rebate_bps: u32,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            fee_schedule: FeeScheduleParams::default(),
            // 20% of every paid fee vests; 80% is spendable at the next
            // maintenance distribution.
            vested_fee_bps: 2_000,
            fee_rebate_bps: 0,
        }
    }
}

impl ChainParams {
    /// Replace the fee schedule
    pub fn with_fee_schedule(mut self, fee_schedule: FeeScheduleParams) -> Self {
        self.fee_schedule = fee_schedule;
        self
    }

    /// Replace the vested routing share
    pub fn with_vested_fee_bps(mut self, bps: u32) -> Self {
        self.vested_fee_bps = bps.min(BPS_DENOMINATOR);
        self
    }

    /// Replace the rebate share
    pub fn with_fee_rebate_bps(mut self, bps: u32) -> Self {
        self.fee_rebate_bps = bps.min(BPS_DENOMINATOR);
        self
    }

    /// Create params for testing (flat fees, no vesting, no rebate)
    pub fn for_testing() -> Self {
        Self {
            fee_schedule: FeeScheduleParams::for_testing(),
            vested_fee_bps: 0,
            fee_rebate_bps: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ChainParams::default();
        assert_eq!(params.vested_fee_bps, 2_000);
        assert_eq!(params.fee_rebate_bps, 0);
        assert_eq!(params.fee_schedule.minimum_fee, 20);
    }

    #[test]
    fn test_bps_values_are_clamped() {
        let params = ChainParams::default()
            .with_vested_fee_bps(50_000)
            .with_fee_rebate_bps(50_000);
        assert_eq!(params.vested_fee_bps, BPS_DENOMINATOR);
        assert_eq!(params.fee_rebate_bps, BPS_DENOMINATOR);
    }

    #[test]
    fn test_testing_params_disable_routing_splits() {
        let params = ChainParams::for_testing();
        assert_eq!(params.vested_fee_bps, 0);
        assert_eq!(params.fee_rebate_bps, 0);
        assert_eq!(params.fee_schedule.minimum_fee, 0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let params = ChainParams::default().with_fee_rebate_bps(500);
        let json = serde_json::to_string(&params).unwrap();
        let deserialized: ChainParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, deserialized);
    }
}
