//! Ledger View - Read-Only State Access
//!
//! Provides read-only access to ledger state during evaluation. These
//! functions NEVER mutate state - they are for validation checks and for
//! pretty-printing amounts in diagnostics.
//!
//! For state mutations, use the mutator primitives.

use lib_types::{AccountUid, Amount, AssetAmount, AssetId};

use crate::objects::{AccountObject, AccountStatisticsObject, AssetDynamicData, AssetObject};
use crate::storage::LedgerStore;

use super::errors::{EvalResult, EvaluationError};

/// Read-only view of ledger state
pub struct LedgerView<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> LedgerView<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    // =========================================================================
    // Object Queries
    // =========================================================================

    pub fn account(&self, uid: AccountUid) -> EvalResult<Option<AccountObject>> {
        Ok(self.store.account(uid)?)
    }

    /// Load an account, failing if it does not exist
    pub fn account_or_err(&self, uid: AccountUid) -> EvalResult<AccountObject> {
        self.account(uid)?
            .ok_or(EvaluationError::AccountNotFound(uid))
    }

    /// Load an account's statistics record, failing if it does not exist
    pub fn statistics_or_err(&self, uid: AccountUid) -> EvalResult<AccountStatisticsObject> {
        self.store
            .account_statistics(uid)?
            .ok_or(EvaluationError::StatisticsNotFound(uid))
    }

    /// Load an asset, failing if it does not exist
    pub fn asset_or_err(&self, id: AssetId) -> EvalResult<AssetObject> {
        self.store.asset(id)?.ok_or(EvaluationError::AssetNotFound(id))
    }

    /// Load an asset's dynamic data, failing if it does not exist
    pub fn dynamic_data_or_err(&self, id: AssetId) -> EvalResult<AssetDynamicData> {
        self.store
            .asset_dynamic_data(id)?
            .ok_or(EvaluationError::AssetDynamicDataNotFound(id))
    }

    // =========================================================================
    // Balance Queries
    // =========================================================================

    /// Balance of `owner` in `asset` (zero if no record exists)
    pub fn balance(&self, owner: AccountUid, asset: AssetId) -> EvalResult<Amount> {
        Ok(self.store.balance(owner, asset)?)
    }

    /// Check if an account can cover `required` in `asset`
    pub fn has_sufficient_balance(
        &self,
        owner: AccountUid,
        asset: AssetId,
        required: Amount,
    ) -> EvalResult<bool> {
        Ok(self.balance(owner, asset)? >= required)
    }

    // =========================================================================
    // Pretty Printing
    // =========================================================================

    /// Render an asset amount with the asset's precision and symbol.
    ///
    /// Unknown assets fall back to the raw representation so diagnostics
    /// never fail.
    pub fn pretty_amount(&self, amount: AssetAmount) -> String {
        match self.store.asset(amount.asset) {
            Ok(Some(asset)) => format_units(amount.amount, asset.precision, &asset.symbol),
            _ => amount.to_string(),
        }
    }

    /// Render a core-asset amount
    pub fn pretty_core_amount(&self, amount: Amount) -> String {
        self.pretty_amount(AssetAmount::core(amount))
    }
}

/// Format `amount` with `precision` decimal places and a symbol suffix
fn format_units(amount: Amount, precision: u8, symbol: &str) -> String {
    if precision == 0 {
        return format!("{} {}", amount, symbol);
    }
    let divisor = 10u128.pow(precision as u32);
    let whole = amount as u128 / divisor;
    let frac = amount as u128 % divisor;
    format!(
        "{}.{:0width$} {}",
        whole,
        frac,
        symbol,
        width = precision as usize
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use lib_types::{ExchangeRate, CORE_ASSET};

    #[test]
    fn test_missing_objects_are_errors() {
        let store = MemoryStore::new();
        let view = LedgerView::new(&store);
        assert!(matches!(
            view.account_or_err(AccountUid(1)),
            Err(EvaluationError::AccountNotFound(AccountUid(1)))
        ));
        assert!(matches!(
            view.asset_or_err(AssetId(2)),
            Err(EvaluationError::AssetNotFound(AssetId(2)))
        ));
    }

    #[test]
    fn test_pretty_amount_uses_precision() {
        let store = MemoryStore::new();
        store
            .put_asset(&AssetObject::core_asset("MRD", 5))
            .unwrap();
        let view = LedgerView::new(&store);
        assert_eq!(
            view.pretty_amount(AssetAmount::core(1_234_567)),
            "12.34567 MRD"
        );
        assert_eq!(view.pretty_core_amount(100), "0.00100 MRD");
    }

    #[test]
    fn test_pretty_amount_zero_precision() {
        let store = MemoryStore::new();
        store
            .put_asset(&AssetObject::new(
                AssetId(1),
                "PTS",
                0,
                ExchangeRate::identity(),
            ))
            .unwrap();
        let view = LedgerView::new(&store);
        assert_eq!(view.pretty_amount(AssetAmount::new(42, AssetId(1))), "42 PTS");
    }

    #[test]
    fn test_pretty_amount_unknown_asset_falls_back() {
        let store = MemoryStore::new();
        let view = LedgerView::new(&store);
        assert_eq!(view.pretty_amount(AssetAmount::core(7)), "7 CORE");
    }

    #[test]
    fn test_sufficient_balance_check() {
        let store = MemoryStore::new();
        store.set_balance(AccountUid(1), CORE_ASSET, 50).unwrap();
        let view = LedgerView::new(&store);
        assert!(view
            .has_sufficient_balance(AccountUid(1), CORE_ASSET, 50)
            .unwrap());
        assert!(!view
            .has_sufficient_balance(AccountUid(1), CORE_ASSET, 51)
            .unwrap());
    }
}
