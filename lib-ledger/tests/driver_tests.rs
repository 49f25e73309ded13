//! Driver Tests
//!
//! Verifies that operation sequences are processed strictly in order inside
//! one atomic store transaction: any failure rolls everything back, and
//! results accumulate for relative-reference resolution.

mod common;

use common::{
    create_test_params, create_test_registry, create_test_store, ALICE, BOB, USDX,
};

use lib_ledger::{
    process_operations, AccountUpdateOperation, AssetAmount, EvaluationError, Fee,
    FeePoolDepositOperation, LedgerStore, Operation, OperationOutcome, TransactionContext,
    TransferOperation, CORE_ASSET,
};

fn transfer(amount: u64, fee: u64) -> Operation {
    Operation::Transfer(TransferOperation {
        fee: Fee::core(fee),
        from: ALICE,
        to: BOB,
        amount: AssetAmount::core(amount),
        memo: None,
    })
}

#[test]
fn test_sequence_applies_in_order() {
    let store = create_test_store();
    let params = create_test_params();
    let registry = create_test_registry();
    let mut ctx = TransactionContext::new(&store, &params);

    let ops = vec![
        transfer(20, 10),
        Operation::AccountUpdate(AccountUpdateOperation {
            fee: Fee::core(5),
            account: ALICE,
            new_name: Some("alice-2".into()),
            new_memo_key: None,
        }),
    ];

    let outcomes = process_operations(&registry, &mut ctx, &ops, true).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| *o == OperationOutcome::None));

    // Both operations and both fees landed: 100 - 20 - 10 - 5
    assert_eq!(store.balance(ALICE, CORE_ASSET).unwrap(), 65);
    assert_eq!(store.balance(BOB, CORE_ASSET).unwrap(), 20);
    assert_eq!(store.account(ALICE).unwrap().unwrap().name, "alice-2");
}

#[test]
fn test_failing_operation_rolls_back_the_whole_sequence() {
    let store = create_test_store();
    let params = create_test_params();
    let registry = create_test_registry();
    let mut ctx = TransactionContext::new(&store, &params);

    // First transfer is fine; the second asks for more than remains
    let ops = vec![transfer(20, 10), transfer(1_000, 10)];

    let err = process_operations(&registry, &mut ctx, &ops, true).unwrap_err();
    match err {
        EvaluationError::OperationFailed { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(
                *source,
                EvaluationError::InsufficientBalance { .. }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }

    // The first operation's transfer AND its fee payment were rolled back
    assert_eq!(store.balance(ALICE, CORE_ASSET).unwrap(), 100);
    assert_eq!(store.balance(BOB, CORE_ASSET).unwrap(), 0);
    let stats = store.account_statistics(ALICE).unwrap().unwrap();
    assert_eq!(stats.pending_fees, 0);
    assert_eq!(stats.total_core_fees_paid, 0);
}

#[test]
fn test_context_free_validation_runs_before_dispatch() {
    let store = create_test_store();
    let params = create_test_params();
    let registry = create_test_registry();
    let mut ctx = TransactionContext::new(&store, &params);

    // Self-transfer fails validate() before any evaluator is constructed
    let ops = vec![Operation::Transfer(TransferOperation {
        fee: Fee::core(10),
        from: ALICE,
        to: ALICE,
        amount: AssetAmount::core(5),
        memo: None,
    })];

    let err = process_operations(&registry, &mut ctx, &ops, true).unwrap_err();
    match err {
        EvaluationError::OperationFailed { index, source } => {
            assert_eq!(index, 0);
            assert!(matches!(*source, EvaluationError::InvalidOperation(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_validate_only_mode_mutates_nothing() {
    let store = create_test_store();
    let params = create_test_params();
    let registry = create_test_registry();
    let mut ctx = TransactionContext::new(&store, &params);

    let ops = vec![transfer(20, 10)];
    let outcomes = process_operations(&registry, &mut ctx, &ops, false).unwrap();
    assert_eq!(outcomes.len(), 1);

    assert_eq!(store.balance(ALICE, CORE_ASSET).unwrap(), 100);
    assert_eq!(store.balance(BOB, CORE_ASSET).unwrap(), 0);
    let stats = store.account_statistics(ALICE).unwrap().unwrap();
    assert_eq!(stats.pending_fees, 0);
}

#[test]
fn test_unregistered_operation_aborts_sequence() {
    let store = create_test_store();
    let params = create_test_params();
    let registry = create_test_registry(); // no FeePoolDeposit handler
    let mut ctx = TransactionContext::new(&store, &params);

    let ops = vec![
        transfer(20, 10),
        Operation::FeePoolDeposit(FeePoolDepositOperation {
            fee: Fee::core(5),
            from: ALICE,
            asset: USDX,
            amount: 10,
        }),
    ];

    let err = process_operations(&registry, &mut ctx, &ops, true).unwrap_err();
    match err {
        EvaluationError::OperationFailed { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(
                *source,
                EvaluationError::UnregisteredOperation(_)
            ));
        }
        other => panic!("unexpected error: {other}"),
    }

    // The successful first operation was rolled back with the sequence
    assert_eq!(store.balance(ALICE, CORE_ASSET).unwrap(), 100);
}

#[test]
fn test_results_accumulate_in_context() {
    let store = create_test_store();
    let params = create_test_params();
    let registry = create_test_registry();
    let mut ctx = TransactionContext::new(&store, &params);

    let ops = vec![transfer(1, 10), transfer(2, 10)];
    process_operations(&registry, &mut ctx, &ops, true).unwrap();

    assert_eq!(ctx.results().len(), 2);
}

#[test]
fn test_deterministic_sequence_processing() {
    let run = || {
        let store = create_test_store();
        let params = create_test_params();
        let registry = create_test_registry();
        let mut ctx = TransactionContext::new(&store, &params);

        let ops = vec![transfer(20, 10), transfer(5, 10)];
        let outcomes = process_operations(&registry, &mut ctx, &ops, true).unwrap();
        (
            outcomes,
            store.balance(ALICE, CORE_ASSET).unwrap(),
            store.balance(BOB, CORE_ASSET).unwrap(),
        )
    };

    assert_eq!(run(), run());
}
