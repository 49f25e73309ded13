//! Golden Vector Tests for the Fee Schedule
//!
//! Each test pins the EXACT required fee for a fixed input. A failing golden
//! vector means the fee computation changed - on a live network that is a
//! consensus-breaking event, not a refactor.
//!
//! Updating a vector is only legitimate alongside an intentional fee-logic
//! change, and such a change needs a protocol upgrade plan before it ships.

#[cfg(test)]
mod tests {
    use crate::{required_fee, required_fee_pair, FeeScheduleParams};
    use lib_types::OperationTag;

    // =========================================================================
    // GOLDEN VECTOR: Transfer
    // =========================================================================

    /// Golden vector: transfer with a 58-byte payload
    ///
    /// Fee calculation (default params):
    /// - base_fee: 2000
    /// - byte_fee: 58 * 10 = 580
    /// - total: 2580
    /// - csaf allowance: 2580 * 8000 / 10000 = 2064
    /// - min from real sources: 2580 - 2064 = 516
    #[test]
    fn golden_transfer() {
        let params = FeeScheduleParams::default();

        let pair = required_fee_pair(&params, OperationTag::Transfer, 58);

        // GOLDEN VECTOR: These exact values MUST NOT change
        assert_eq!(pair.total, 2_580, "Golden vector mismatch: transfer total");
        assert_eq!(
            pair.min_from_real_sources, 516,
            "Golden vector mismatch: transfer real-source floor"
        );
    }

    /// Golden vector: transfer with no payload
    ///
    /// Fee calculation (default params):
    /// - base_fee: 2000, byte_fee: 0
    /// - csaf allowance: 1600, min from real sources: 400
    #[test]
    fn golden_transfer_empty_payload() {
        let params = FeeScheduleParams::default();

        let pair = required_fee_pair(&params, OperationTag::Transfer, 0);

        assert_eq!(pair.total, 2_000, "Golden vector mismatch: empty transfer");
        assert_eq!(
            pair.min_from_real_sources, 400,
            "Golden vector mismatch: empty transfer floor"
        );
    }

    // =========================================================================
    // GOLDEN VECTOR: Account Update
    // =========================================================================

    /// Golden vector: account update with a 49-byte payload
    ///
    /// Fee calculation (default params):
    /// - base_fee: 1000
    /// - byte_fee: 49 * 10 = 490
    /// - total: 1490
    /// - csaf allowance: 1490 * 8000 / 10000 = 1192
    /// - min from real sources: 298
    #[test]
    fn golden_account_update() {
        let params = FeeScheduleParams::default();

        let pair = required_fee_pair(&params, OperationTag::AccountUpdate, 49);

        assert_eq!(pair.total, 1_490, "Golden vector mismatch: account_update");
        assert_eq!(
            pair.min_from_real_sources, 298,
            "Golden vector mismatch: account_update floor"
        );
    }

    // =========================================================================
    // GOLDEN VECTOR: Fee Pool Deposit
    // =========================================================================

    /// Golden vector: fee pool deposit with a 20-byte payload
    ///
    /// Fee calculation (default params):
    /// - base_fee: 500
    /// - byte_fee: 20 * 10 = 200
    /// - total: 700
    /// - csaf allowance: 560, min from real sources: 140
    #[test]
    fn golden_fee_pool_deposit() {
        let params = FeeScheduleParams::default();

        assert_eq!(
            required_fee(&params, OperationTag::FeePoolDeposit, 20),
            700,
            "Golden vector mismatch: fee_pool_deposit"
        );

        let pair = required_fee_pair(&params, OperationTag::FeePoolDeposit, 20);
        assert_eq!(
            pair.min_from_real_sources, 140,
            "Golden vector mismatch: fee_pool_deposit floor"
        );
    }
}
