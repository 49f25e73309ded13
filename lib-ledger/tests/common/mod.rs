//! Shared test fixtures: a populated in-memory ledger and concrete operation
//! handlers exercising the evaluation framework.
#![allow(dead_code)]

use lib_ledger::{
    AccountObject, AccountStatisticsObject, AccountUid, AccountUpdateOperation, AssetDynamicData,
    AssetId, AssetObject, ChainParams, EvalResult, EvaluationError, EvaluatorRegistry,
    ExchangeRate, FeeAccounting, FeePoolDepositOperation, LedgerStore, MemoryStore,
    OperationHandler, OperationOutcome, TransactionContext, TransferOperation, CORE_ASSET,
};

pub const ALICE: AccountUid = AccountUid(1);
pub const BOB: AccountUid = AccountUid(2);
pub const USDX: AssetId = AssetId(2);

/// Accumulator id used by the fee-burning handler
pub const BURN_FBA_ID: u64 = 7;

/// Ledger with two funded accounts and a non-core asset at a 2:1 core rate.
///
/// - alice: 100 core, 50 USDX, prepaid credit 30, csaf credit 40
/// - bob: registered, empty balances
/// - USDX: exchange rate 2 USDX = 1 core, fee pool 100 core
pub fn create_test_store() -> MemoryStore {
    let store = MemoryStore::new();

    store
        .put_account(&AccountObject::new(ALICE, "alice", [1u8; 32]))
        .unwrap();
    store
        .put_account(&AccountObject::new(BOB, "bob", [2u8; 32]))
        .unwrap();
    store
        .put_account_statistics(
            &AccountStatisticsObject::new(ALICE)
                .with_prepaid_fees(30)
                .with_csaf(40),
        )
        .unwrap();
    store
        .put_account_statistics(&AccountStatisticsObject::new(BOB))
        .unwrap();

    store.put_asset(&AssetObject::core_asset("MRD", 5)).unwrap();
    store
        .put_asset(&AssetObject::new(
            USDX,
            "USDX",
            4,
            ExchangeRate::new(2, 1).unwrap(),
        ))
        .unwrap();
    store
        .put_asset_dynamic_data(&AssetDynamicData::new(USDX).with_fee_pool(100))
        .unwrap();

    store.set_balance(ALICE, CORE_ASSET, 100).unwrap();
    store.set_balance(ALICE, USDX, 50).unwrap();

    store
}

/// Flat-fee chain params: transfer 10, account update 5, pool deposit 5;
/// up to 80% of a fee payable from csaf; no vesting, no rebate.
pub fn create_test_params() -> ChainParams {
    ChainParams::for_testing()
}

// =============================================================================
// Test Handlers
// =============================================================================

/// Moves the declared amount between two accounts
#[derive(Default)]
pub struct TransferHandler;

impl OperationHandler for TransferHandler {
    type Op = TransferOperation;

    fn do_evaluate(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Self::Op,
    ) -> EvalResult<OperationOutcome> {
        let view = ctx.view();
        view.account_or_err(op.to)?;

        let available = view.balance(op.from, op.amount.asset)?;
        if available < op.amount.amount {
            return Err(EvaluationError::InsufficientBalance {
                account: op.from,
                asset: op.amount.asset,
                available,
                required: op.amount.amount,
            });
        }
        Ok(OperationOutcome::None)
    }

    fn do_apply(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Self::Op,
    ) -> EvalResult<OperationOutcome> {
        ctx.mutator()
            .transfer_balance(op.from, op.to, op.amount.asset, op.amount.amount)?;
        Ok(OperationOutcome::None)
    }
}

/// Transfer variant whose fee is pooled into an FBA accumulator instead of
/// the payer's statistics record
#[derive(Default)]
pub struct BurningTransferHandler;

impl OperationHandler for BurningTransferHandler {
    type Op = TransferOperation;

    fn do_evaluate(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Self::Op,
    ) -> EvalResult<OperationOutcome> {
        TransferHandler.do_evaluate(ctx, op)
    }

    fn do_apply(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Self::Op,
    ) -> EvalResult<OperationOutcome> {
        TransferHandler.do_apply(ctx, op)
    }

    fn pay_fee(&self, ctx: &TransactionContext<'_>, fees: &FeeAccounting) -> EvalResult<()> {
        fees.pay_fba_fee(&ctx.mutator(), BURN_FBA_ID)
    }
}

/// Applies name / memo-key changes to an existing account
#[derive(Default)]
pub struct AccountUpdateHandler;

impl OperationHandler for AccountUpdateHandler {
    type Op = AccountUpdateOperation;

    fn do_evaluate(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Self::Op,
    ) -> EvalResult<OperationOutcome> {
        ctx.view().account_or_err(op.account)?;
        Ok(OperationOutcome::None)
    }

    fn do_apply(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Self::Op,
    ) -> EvalResult<OperationOutcome> {
        let mut account = ctx.view().account_or_err(op.account)?;
        if let Some(name) = &op.new_name {
            account.name = name.clone();
        }
        if let Some(memo_key) = op.new_memo_key {
            account.memo_key = memo_key;
        }
        ctx.mutator().put_account(&account)?;
        Ok(OperationOutcome::None)
    }
}

/// Moves core from the payer's balance into an asset's fee pool
#[derive(Default)]
pub struct FeePoolDepositHandler;

impl OperationHandler for FeePoolDepositHandler {
    type Op = FeePoolDepositOperation;

    fn do_evaluate(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Self::Op,
    ) -> EvalResult<OperationOutcome> {
        let view = ctx.view();
        view.asset_or_err(op.asset)?;
        view.dynamic_data_or_err(op.asset)?;

        let available = view.balance(op.from, CORE_ASSET)?;
        if available < op.amount {
            return Err(EvaluationError::InsufficientBalance {
                account: op.from,
                asset: CORE_ASSET,
                available,
                required: op.amount,
            });
        }
        Ok(OperationOutcome::None)
    }

    fn do_apply(
        &mut self,
        ctx: &TransactionContext<'_>,
        op: &Self::Op,
    ) -> EvalResult<OperationOutcome> {
        let mutator = ctx.mutator();
        mutator.debit_balance(op.from, CORE_ASSET, op.amount)?;
        mutator.fund_fee_pool(op.asset, op.amount)?;
        Ok(OperationOutcome::None)
    }
}

/// Registry with the standard test handlers
pub fn create_test_registry() -> EvaluatorRegistry {
    EvaluatorRegistry::builder()
        .register::<TransferHandler>()
        .unwrap()
        .register::<AccountUpdateHandler>()
        .unwrap()
        .build()
}
