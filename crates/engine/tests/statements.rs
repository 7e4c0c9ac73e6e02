mod common;

use engine::{EngineError, Money, OperationType, StatementCmd, TransferCmd};
use uuid::Uuid;

use common::{engine_with_db, register};

#[tokio::test]
async fn balance_is_sum_of_statements_in_creation_order() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;

    let deposit = engine
        .deposit(StatementCmd::new(alice.id, Money::new(10_000)).description("Deposit test"))
        .await
        .unwrap();
    let withdraw = engine
        .withdraw(StatementCmd::new(alice.id, Money::new(5_000)).description("Withdraw test"))
        .await
        .unwrap();

    let balance = engine.balance(alice.id).await.unwrap();
    assert_eq!(balance.balance, Money::new(5_000));
    assert_eq!(balance.statements.len(), 2);
    assert_eq!(balance.statements[0].id, deposit.id);
    assert_eq!(balance.statements[0].kind, OperationType::Deposit);
    assert_eq!(balance.statements[1].id, withdraw.id);
    assert_eq!(balance.statements[1].kind, OperationType::Withdraw);
    assert_eq!(balance.statements[1].amount, Money::new(5_000));
}

#[tokio::test]
async fn new_user_has_empty_balance() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;

    let balance = engine.balance(alice.id).await.unwrap();
    assert!(balance.statements.is_empty());
    assert_eq!(balance.balance, Money::ZERO);
}

#[tokio::test]
async fn withdraw_beyond_balance_is_rejected_and_not_stored() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;

    engine
        .deposit(StatementCmd::new(alice.id, Money::new(1_000)))
        .await
        .unwrap();
    let err = engine
        .withdraw(StatementCmd::new(alice.id, Money::new(1_001)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));

    let balance = engine.balance(alice.id).await.unwrap();
    assert_eq!(balance.statements.len(), 1);
    assert_eq!(balance.balance, Money::new(1_000));

    // The full balance can still be withdrawn.
    engine
        .withdraw(StatementCmd::new(alice.id, Money::new(1_000)))
        .await
        .unwrap();
    assert_eq!(engine.balance(alice.id).await.unwrap().balance, Money::ZERO);
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;

    for cents in [0, -100] {
        let deposit = engine
            .deposit(StatementCmd::new(alice.id, Money::new(cents)))
            .await
            .unwrap_err();
        assert!(matches!(deposit, EngineError::InvalidAmount(_)));
        let withdraw = engine
            .withdraw(StatementCmd::new(alice.id, Money::new(cents)))
            .await
            .unwrap_err();
        assert!(matches!(withdraw, EngineError::InvalidAmount(_)));
    }
}

#[tokio::test]
async fn deposit_for_unknown_user_is_rejected() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .deposit(StatementCmd::new(Uuid::new_v4(), Money::new(100)))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user not exists".to_string()));
}

#[tokio::test]
async fn transfer_moves_money_and_preserves_total() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;
    let bob = register(&engine, "bob").await;

    engine
        .deposit(StatementCmd::new(alice.id, Money::new(10_000)))
        .await
        .unwrap();
    engine
        .deposit(StatementCmd::new(bob.id, Money::new(500)))
        .await
        .unwrap();
    let total_before = engine
        .balance(alice.id)
        .await
        .unwrap()
        .balance
        .checked_add(engine.balance(bob.id).await.unwrap().balance)
        .unwrap();

    let transfer = engine
        .transfer(TransferCmd::new(alice.id, bob.id, Money::new(2_500)).description("rent"))
        .await
        .unwrap();

    assert_eq!(transfer.debit.user_id, alice.id);
    assert_eq!(transfer.debit.counterparty_id, Some(bob.id));
    assert_eq!(transfer.debit.amount, Money::new(-2_500));
    assert_eq!(transfer.debit.kind, OperationType::Transfer);
    assert_eq!(transfer.credit.user_id, bob.id);
    assert_eq!(transfer.credit.counterparty_id, Some(alice.id));
    assert_eq!(transfer.credit.amount, Money::new(2_500));
    assert_eq!(transfer.credit.description, "rent");

    let alice_balance = engine.balance(alice.id).await.unwrap().balance;
    let bob_balance = engine.balance(bob.id).await.unwrap().balance;
    assert_eq!(alice_balance, Money::new(7_500));
    assert_eq!(bob_balance, Money::new(3_000));
    assert_eq!(alice_balance.checked_add(bob_balance), Some(total_before));
}

#[tokio::test]
async fn deposit_that_would_overflow_balance_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;

    engine
        .deposit(StatementCmd::new(alice.id, Money::new(i64::MAX - 10)))
        .await
        .unwrap();
    let err = engine
        .deposit(StatementCmd::new(alice.id, Money::new(100)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let balance = engine.balance(alice.id).await.unwrap();
    assert_eq!(balance.statements.len(), 1);
    assert_eq!(balance.balance, Money::new(i64::MAX - 10));

    engine
        .withdraw(StatementCmd::new(alice.id, Money::new(1)))
        .await
        .unwrap();
    assert_eq!(
        engine.balance(alice.id).await.unwrap().balance,
        Money::new(i64::MAX - 11)
    );
}

#[tokio::test]
async fn transfer_that_would_overflow_receiver_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;
    let bob = register(&engine, "bob").await;
    let carol = register(&engine, "carol").await;
    let large = Money::new(4_700_000_000_000_000_000);

    for sender in [&alice, &bob] {
        engine
            .deposit(StatementCmd::new(sender.id, large))
            .await
            .unwrap();
    }

    engine
        .transfer(TransferCmd::new(alice.id, carol.id, large))
        .await
        .unwrap();
    let err = engine
        .transfer(TransferCmd::new(bob.id, carol.id, large))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let bob_balance = engine.balance(bob.id).await.unwrap();
    assert_eq!(bob_balance.statements.len(), 1);
    assert_eq!(bob_balance.balance, large);

    let carol_balance = engine.balance(carol.id).await.unwrap();
    assert_eq!(carol_balance.statements.len(), 1);
    assert_eq!(carol_balance.balance, large);

    engine
        .transfer(TransferCmd::new(carol.id, alice.id, Money::new(100)))
        .await
        .unwrap();
}

#[tokio::test]
async fn transfer_with_non_positive_amount_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;
    let bob = register(&engine, "bob").await;
    engine
        .deposit(StatementCmd::new(alice.id, Money::new(1_000)))
        .await
        .unwrap();

    for cents in [0, -500] {
        let err = engine
            .transfer(TransferCmd::new(alice.id, bob.id, Money::new(cents)))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }
    assert!(engine.statements(bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn transfer_without_funds_leaves_no_entries() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;
    let bob = register(&engine, "bob").await;
    engine
        .deposit(StatementCmd::new(alice.id, Money::new(1_000)))
        .await
        .unwrap();

    let err = engine
        .transfer(TransferCmd::new(alice.id, bob.id, Money::new(1_500)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));

    assert_eq!(engine.statements(alice.id).await.unwrap().len(), 1);
    assert!(engine.statements(bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn transfer_requires_both_users() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;
    engine
        .deposit(StatementCmd::new(alice.id, Money::new(1_000)))
        .await
        .unwrap();

    let missing_receiver = engine
        .transfer(TransferCmd::new(alice.id, Uuid::new_v4(), Money::new(100)))
        .await
        .unwrap_err();
    assert_eq!(
        missing_receiver,
        EngineError::KeyNotFound("receive user not exists".to_string())
    );

    let missing_sender = engine
        .transfer(TransferCmd::new(Uuid::new_v4(), alice.id, Money::new(100)))
        .await
        .unwrap_err();
    assert_eq!(
        missing_sender,
        EngineError::KeyNotFound("sender user not exists".to_string())
    );

    assert_eq!(engine.balance(alice.id).await.unwrap().balance, Money::new(1_000));
}

#[tokio::test]
async fn transfer_to_self_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;
    engine
        .deposit(StatementCmd::new(alice.id, Money::new(1_000)))
        .await
        .unwrap();

    let err = engine
        .transfer(TransferCmd::new(alice.id, alice.id, Money::new(100)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn statement_is_visible_only_to_its_owner() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice").await;
    let bob = register(&engine, "bob").await;

    let deposit = engine
        .deposit(StatementCmd::new(alice.id, Money::new(100)).description("  salary  "))
        .await
        .unwrap();
    assert_eq!(deposit.description, "salary");

    let found = engine.statement(alice.id, deposit.id).await.unwrap();
    assert_eq!(found.id, deposit.id);
    assert_eq!(found.amount, deposit.amount);
    assert_eq!(found.kind, OperationType::Deposit);

    let err = engine.statement(bob.id, deposit.id).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("statement not exists".to_string())
    );
}
