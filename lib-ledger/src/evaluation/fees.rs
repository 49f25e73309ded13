//! Fee Accounting
//!
//! Per-evaluation state tracking how an operation's fee is sourced, converted
//! and paid. One instance is owned by each evaluator and reset at the start of
//! every evaluation.
//!
//! The pipeline is split across the two lifecycle phases:
//!
//! - `prepare_fee` runs during **evaluate**. It resolves the payer and fee
//!   asset, validates the declared source split against ledger state, and
//!   fills in every accounting field. It mutates nothing.
//! - `convert_fee`, `pay_fee` (or `pay_fba_fee`), the balance debit and
//!   `process_fee_options` run during **apply**, in that order. Only these
//!   steps touch ledger state.
//!
//! Invariant: `from_balance + from_prepaid + from_csaf == total_fee_paid`
//! whenever `prepare_fee` has succeeded.

use tracing::trace;

use lib_types::fees::BPS_DENOMINATOR;
use lib_types::{AccountUid, Amount, AssetAmount, AssetId};

use crate::operation::{Fee, OperationValidationError};
use crate::protocol::ChainParams;

use super::errors::{EvalResult, EvaluationError, FeeSource};
use super::mutator::LedgerMutator;
use super::view::LedgerView;

/// Fee accounting state for one evaluation
#[derive(Debug, Clone, Default)]
pub struct FeeAccounting {
    /// Portion of the fee taken directly from the payer's balance, in the
    /// fee's original asset. Computed in evaluate, consumed in apply.
    pub fee_from_account: AssetAmount,
    /// The fee after conversion into core-asset terms
    pub core_fee_paid: Amount,
    /// Total fee supplied by the transaction across all sources, in
    /// core-asset terms
    pub total_fee_paid: Amount,
    /// Core value covered by the payer's live balance
    pub from_balance: Amount,
    /// Core value covered by the payer's prepaid fee credit
    pub from_prepaid: Amount,
    /// Core value covered by the payer's accumulated-stake credit
    pub from_csaf: Amount,

    fee_payer: Option<AccountUid>,
    fee_asset: Option<AssetId>,
}

impl FeeAccounting {
    pub fn new() -> Self {
        Self::default()
    }

    /// The payer resolved by `prepare_fee`
    fn payer(&self) -> EvalResult<AccountUid> {
        self.fee_payer.ok_or(EvaluationError::FeeNotPrepared)
    }

    /// Resolve the fee payer and validate the declared fee against ledger
    /// state, filling in every accounting field.
    ///
    /// This must run before any other pipeline step and before
    /// `total_fee_paid` or the `from_*` fields are read. It performs reads
    /// only; nothing is charged until apply.
    pub fn prepare_fee(
        &mut self,
        view: &LedgerView<'_>,
        payer: AccountUid,
        fee: &Fee,
    ) -> EvalResult<()> {
        // Reset: one accounting per evaluation
        *self = Self::default();

        view.account_or_err(payer)?;
        let stats = view.statistics_or_err(payer)?;

        self.fee_payer = Some(payer);
        self.fee_asset = Some(fee.total.asset);

        // Declared credit portions must be covered by the payer's records
        if fee.from_prepaid > stats.prepaid_fees {
            return Err(EvaluationError::InsufficientFeeSources {
                payer,
                asset: lib_types::CORE_ASSET,
                source: FeeSource::Prepaid,
                required: fee.from_prepaid,
                available: stats.prepaid_fees,
            });
        }
        if fee.from_csaf > stats.csaf {
            return Err(EvaluationError::InsufficientFeeSources {
                payer,
                asset: lib_types::CORE_ASSET,
                source: FeeSource::Csaf,
                required: fee.from_csaf,
                available: stats.csaf,
            });
        }

        if fee.total.is_core() {
            let credits = fee
                .from_prepaid
                .checked_add(fee.from_csaf)
                .ok_or(EvaluationError::AmountOverflow)?;
            let from_balance = fee
                .total
                .amount
                .checked_sub(credits)
                .ok_or(OperationValidationError::CreditExceedsTotal)?;

            let available = view.balance(payer, lib_types::CORE_ASSET)?;
            if from_balance > available {
                return Err(EvaluationError::InsufficientFeeSources {
                    payer,
                    asset: lib_types::CORE_ASSET,
                    source: FeeSource::Balance,
                    required: from_balance,
                    available,
                });
            }

            self.core_fee_paid = fee.total.amount;
            self.total_fee_paid = fee.total.amount;
            self.from_balance = from_balance;
            self.from_prepaid = fee.from_prepaid;
            self.from_csaf = fee.from_csaf;
            self.fee_from_account = AssetAmount::core(from_balance);
        } else {
            // Credits are core-denominated; a non-core fee is paid entirely
            // from balance in that asset and converted through the pool.
            if fee.from_prepaid > 0 || fee.from_csaf > 0 {
                return Err(OperationValidationError::CreditOnNonCoreFee.into());
            }

            let asset = view.asset_or_err(fee.total.asset)?;
            let dynamic_data = view.dynamic_data_or_err(fee.total.asset)?;

            let core_value = asset
                .core_exchange_rate
                .to_core(fee.total.amount)
                .ok_or(EvaluationError::AmountOverflow)?;

            if core_value > dynamic_data.fee_pool {
                return Err(EvaluationError::FeePoolInsufficient {
                    asset: fee.total.asset,
                    required: core_value,
                    available: dynamic_data.fee_pool,
                });
            }

            let available = view.balance(payer, fee.total.asset)?;
            if fee.total.amount > available {
                return Err(EvaluationError::InsufficientFeeSources {
                    payer,
                    asset: fee.total.asset,
                    source: FeeSource::Balance,
                    required: fee.total.amount,
                    available,
                });
            }

            self.core_fee_paid = core_value;
            self.total_fee_paid = core_value;
            self.from_balance = core_value;
            self.fee_from_account = fee.total;
        }

        trace!(
            payer = %payer,
            core_fee_paid = self.core_fee_paid,
            from_balance = self.from_balance,
            from_prepaid = self.from_prepaid,
            from_csaf = self.from_csaf,
            "fee prepared"
        );
        Ok(())
    }

    /// Execute the exchange-pool conversion validated by `prepare_fee`:
    /// debit the core value from the asset's pool and credit the paid-in
    /// amount into its accumulated fees. No-op for core-denominated fees.
    ///
    /// Call exactly once per apply, after a successful `prepare_fee`.
    pub fn convert_fee(&self, mutator: &LedgerMutator<'_>) -> EvalResult<()> {
        let asset = match self.fee_asset {
            Some(asset) if !asset.is_core() => asset,
            Some(_) => return Ok(()),
            None => return Err(EvaluationError::FeeNotPrepared),
        };
        mutator.convert_through_pool(asset, self.core_fee_paid, self.fee_from_account.amount)
    }

    /// Default fee routing: consume the declared credits and credit the
    /// core-asset fee to the payer's statistics record, split between the
    /// spendable and vested pending buckets per chain policy.
    pub fn pay_fee(&self, mutator: &LedgerMutator<'_>, params: &ChainParams) -> EvalResult<()> {
        let payer = self.payer()?;

        let vested_bps = params.vested_fee_bps.min(BPS_DENOMINATOR);
        let vested =
            ((self.core_fee_paid as u128) * (vested_bps as u128) / (BPS_DENOMINATOR as u128)) as u64;
        let spendable = self.core_fee_paid - vested;

        mutator.consume_fee_credits(payer, self.from_prepaid, self.from_csaf)?;
        mutator.credit_pending_fees(payer, spendable, vested)?;
        mutator.record_core_fees_paid(payer, self.core_fee_paid)?;

        trace!(payer = %payer, spendable, vested, "fee routed to statistics");
        Ok(())
    }

    /// Alternate fee routing into a flexible fee-pool accumulator, bypassing
    /// the statistics pending buckets. Credit consumption still happens.
    pub fn pay_fba_fee(&self, mutator: &LedgerMutator<'_>, fba_id: u64) -> EvalResult<()> {
        let payer = self.payer()?;

        mutator.consume_fee_credits(payer, self.from_prepaid, self.from_csaf)?;
        mutator.credit_fba(fba_id, self.core_fee_paid)?;
        mutator.record_core_fees_paid(payer, self.core_fee_paid)?;

        trace!(payer = %payer, fba_id, core_fee_paid = self.core_fee_paid, "fee routed to fba");
        Ok(())
    }

    /// Fee-schedule side effects applied after the base fee has been paid.
    /// The rebate schedule credits a share of the paid fee back into the
    /// payer's prepaid credit.
    pub fn process_fee_options(
        &self,
        mutator: &LedgerMutator<'_>,
        params: &ChainParams,
    ) -> EvalResult<()> {
        if params.fee_rebate_bps == 0 || self.core_fee_paid == 0 {
            return Ok(());
        }
        let payer = self.payer()?;
        let rebate = ((self.core_fee_paid as u128) * (params.fee_rebate_bps as u128)
            / (BPS_DENOMINATOR as u128)) as u64;
        mutator.credit_prepaid(payer, rebate)
    }

    /// Debit the balance-sourced portion from the payer, in the fee's
    /// original asset. This is the only point the payer's balance is actually
    /// charged; everything earlier only validated sufficiency.
    pub fn debit_payer_balance(&self, mutator: &LedgerMutator<'_>) -> EvalResult<()> {
        if self.fee_from_account.amount == 0 {
            return Ok(());
        }
        let payer = self.payer()?;
        mutator.debit_balance(payer, self.fee_from_account.asset, self.fee_from_account.amount)
    }
}
