//! Ledger Mutation Primitives
//!
//! This module contains the ONLY functions allowed to mutate ledger state
//! during evaluation. Handlers and the fee pipeline never call `LedgerStore`
//! write methods directly.
//!
//! # Invariants
//!
//! - All mutations occur within a store transaction opened by the driver
//! - No negative balances (enforced by debit_balance)
//! - All changes are deterministic and reproducible

use lib_types::{AccountUid, Amount, AssetId};

use crate::objects::FbaAccumulatorObject;
use crate::storage::LedgerStore;

use super::errors::{EvalResult, EvaluationError, FeeSource};

/// State mutator - wraps the store and provides controlled mutation primitives
pub struct LedgerMutator<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> LedgerMutator<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    // =========================================================================
    // Balance Primitives
    // =========================================================================

    /// Credit an account balance
    pub fn credit_balance(
        &self,
        owner: AccountUid,
        asset: AssetId,
        amount: Amount,
    ) -> EvalResult<()> {
        if amount == 0 {
            return Ok(());
        }
        let current = self.store.balance(owner, asset)?;
        let updated = current
            .checked_add(amount)
            .ok_or(EvaluationError::AmountOverflow)?;
        self.store.set_balance(owner, asset, updated)?;
        Ok(())
    }

    /// Debit an account balance
    ///
    /// # Errors
    /// - `InsufficientBalance` if balance < amount
    pub fn debit_balance(
        &self,
        owner: AccountUid,
        asset: AssetId,
        amount: Amount,
    ) -> EvalResult<()> {
        if amount == 0 {
            return Ok(());
        }
        let current = self.store.balance(owner, asset)?;
        if current < amount {
            return Err(EvaluationError::InsufficientBalance {
                account: owner,
                asset,
                available: current,
                required: amount,
            });
        }
        self.store.set_balance(owner, asset, current - amount)?;
        Ok(())
    }

    /// Debit one account and credit another
    pub fn transfer_balance(
        &self,
        from: AccountUid,
        to: AccountUid,
        asset: AssetId,
        amount: Amount,
    ) -> EvalResult<()> {
        self.debit_balance(from, asset, amount)?;
        self.credit_balance(to, asset, amount)?;
        Ok(())
    }

    // =========================================================================
    // Account Primitives
    // =========================================================================

    /// Store an updated account object
    pub fn put_account(&self, account: &crate::objects::AccountObject) -> EvalResult<()> {
        self.store.put_account(account)?;
        Ok(())
    }

    // =========================================================================
    // Fee Pool Primitives
    // =========================================================================

    /// Execute one fee conversion through an asset's exchange pool: move
    /// `core_out` out of the pool and `asset_in` units of the asset into its
    /// accumulated fees.
    pub fn convert_through_pool(
        &self,
        asset: AssetId,
        core_out: Amount,
        asset_in: Amount,
    ) -> EvalResult<()> {
        let mut data = self
            .store
            .asset_dynamic_data(asset)?
            .ok_or(EvaluationError::AssetDynamicDataNotFound(asset))?;

        if data.fee_pool < core_out {
            return Err(EvaluationError::FeePoolInsufficient {
                asset,
                required: core_out,
                available: data.fee_pool,
            });
        }
        data.fee_pool -= core_out;
        data.accumulated_fees = data
            .accumulated_fees
            .checked_add(asset_in)
            .ok_or(EvaluationError::AmountOverflow)?;

        self.store.put_asset_dynamic_data(&data)?;
        Ok(())
    }

    /// Add core-asset reserve to an asset's fee pool
    pub fn fund_fee_pool(&self, asset: AssetId, amount: Amount) -> EvalResult<()> {
        let mut data = self
            .store
            .asset_dynamic_data(asset)?
            .ok_or(EvaluationError::AssetDynamicDataNotFound(asset))?;
        data.fee_pool = data
            .fee_pool
            .checked_add(amount)
            .ok_or(EvaluationError::AmountOverflow)?;
        self.store.put_asset_dynamic_data(&data)?;
        Ok(())
    }

    // =========================================================================
    // Statistics Primitives
    // =========================================================================

    /// Credit a paid fee into an account's pending buckets
    pub fn credit_pending_fees(
        &self,
        owner: AccountUid,
        spendable: Amount,
        vested: Amount,
    ) -> EvalResult<()> {
        let mut stats = self
            .store
            .account_statistics(owner)?
            .ok_or(EvaluationError::StatisticsNotFound(owner))?;
        stats.pending_fees = stats
            .pending_fees
            .checked_add(spendable)
            .ok_or(EvaluationError::AmountOverflow)?;
        stats.pending_vested_fees = stats
            .pending_vested_fees
            .checked_add(vested)
            .ok_or(EvaluationError::AmountOverflow)?;
        self.store.put_account_statistics(&stats)?;
        Ok(())
    }

    /// Consume the declared prepaid and accumulated-stake credit portions
    pub fn consume_fee_credits(
        &self,
        owner: AccountUid,
        from_prepaid: Amount,
        from_csaf: Amount,
    ) -> EvalResult<()> {
        if from_prepaid == 0 && from_csaf == 0 {
            return Ok(());
        }
        let mut stats = self
            .store
            .account_statistics(owner)?
            .ok_or(EvaluationError::StatisticsNotFound(owner))?;

        stats.prepaid_fees = stats.prepaid_fees.checked_sub(from_prepaid).ok_or(
            EvaluationError::InsufficientFeeSources {
                payer: owner,
                asset: lib_types::CORE_ASSET,
                source: FeeSource::Prepaid,
                required: from_prepaid,
                available: stats.prepaid_fees,
            },
        )?;
        stats.csaf = stats.csaf.checked_sub(from_csaf).ok_or(
            EvaluationError::InsufficientFeeSources {
                payer: owner,
                asset: lib_types::CORE_ASSET,
                source: FeeSource::Csaf,
                required: from_csaf,
                available: stats.csaf,
            },
        )?;

        self.store.put_account_statistics(&stats)?;
        Ok(())
    }

    /// Bump an account's lifetime fee counter
    pub fn record_core_fees_paid(&self, owner: AccountUid, amount: Amount) -> EvalResult<()> {
        let mut stats = self
            .store
            .account_statistics(owner)?
            .ok_or(EvaluationError::StatisticsNotFound(owner))?;
        stats.total_core_fees_paid = stats.total_core_fees_paid.saturating_add(amount);
        self.store.put_account_statistics(&stats)?;
        Ok(())
    }

    /// Credit an account's prepaid fee credit
    pub fn credit_prepaid(&self, owner: AccountUid, amount: Amount) -> EvalResult<()> {
        if amount == 0 {
            return Ok(());
        }
        let mut stats = self
            .store
            .account_statistics(owner)?
            .ok_or(EvaluationError::StatisticsNotFound(owner))?;
        stats.prepaid_fees = stats
            .prepaid_fees
            .checked_add(amount)
            .ok_or(EvaluationError::AmountOverflow)?;
        self.store.put_account_statistics(&stats)?;
        Ok(())
    }

    // =========================================================================
    // FBA Primitives
    // =========================================================================

    /// Credit a flexible fee-pool accumulator, creating it on first use
    pub fn credit_fba(&self, fba_id: u64, amount: Amount) -> EvalResult<()> {
        let mut accumulator = self
            .store
            .fba_accumulator(fba_id)?
            .unwrap_or_else(|| FbaAccumulatorObject::new(fba_id));
        accumulator.accumulated_fba_fees = accumulator
            .accumulated_fba_fees
            .checked_add(amount)
            .ok_or(EvaluationError::AmountOverflow)?;
        self.store.put_fba_accumulator(&accumulator)?;
        Ok(())
    }
}
