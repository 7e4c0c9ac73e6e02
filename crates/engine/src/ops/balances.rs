use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, Statement, statements};

use super::Engine;

/// Statements of a user together with the balance they add up to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub statements: Vec<Statement>,
    pub balance: Money,
}

/// Sums the signed contribution of every statement.
///
/// Overflow is reported instead of wrapping.
pub fn balance_of(statements: &[Statement]) -> ResultEngine<Money> {
    statements.iter().try_fold(Money::ZERO, |acc, statement| {
        acc.checked_add(statement.signed_amount())
            .ok_or_else(|| EngineError::InvalidAmount("balance overflow".to_string()))
    })
}

impl Engine {
    /// Returns every statement of `user_id` in creation order and the derived
    /// balance.
    pub async fn balance(&self, user_id: Uuid) -> ResultEngine<Balance> {
        self.require_user(&self.database, user_id, "user").await?;
        let statements = self.load_statements(&self.database, user_id).await?;
        let balance = balance_of(&statements)?;
        Ok(Balance {
            statements,
            balance,
        })
    }

    /// Statements of a user ordered by creation time. Ids are UUIDv7, so they
    /// break ties between entries created in the same instant.
    pub(super) async fn load_statements<C>(
        &self,
        db: &C,
        user_id: Uuid,
    ) -> ResultEngine<Vec<Statement>>
    where
        C: ConnectionTrait,
    {
        statements::Entity::find()
            .filter(statements::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(statements::Column::CreatedAt)
            .order_by_asc(statements::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(Statement::try_from)
            .collect()
    }

    /// Balance of a user computed on `db`, used to validate writes inside the
    /// write transaction.
    pub(super) async fn current_balance<C>(
        &self,
        db: &C,
        user_id: Uuid,
    ) -> ResultEngine<Money>
    where
        C: ConnectionTrait,
    {
        let statements = self.load_statements(db, user_id).await?;
        balance_of(&statements)
    }

    /// Fails with `InsufficientFunds` when `user_id` cannot cover `amount`.
    pub(super) async fn ensure_funds<C>(
        &self,
        db: &C,
        user_id: Uuid,
        amount: Money,
    ) -> ResultEngine<()>
    where
        C: ConnectionTrait,
    {
        let balance = self.current_balance(db, user_id).await?;
        if balance < amount {
            return Err(EngineError::InsufficientFunds(format!(
                "balance is {balance}, requested {amount}"
            )));
        }
        Ok(())
    }

    /// Fails with `InvalidAmount` when crediting `amount` to `user_id` would
    /// push the balance past what `Money` can hold.
    pub(super) async fn ensure_credit_fits<C>(
        &self,
        db: &C,
        user_id: Uuid,
        amount: Money,
    ) -> ResultEngine<()>
    where
        C: ConnectionTrait,
    {
        let balance = self.current_balance(db, user_id).await?;
        if balance.checked_add(amount).is_none() {
            return Err(EngineError::InvalidAmount(format!(
                "balance is {balance}, crediting {amount} would overflow"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::OperationType;

    fn entry(kind: OperationType, cents: i64) -> Statement {
        Statement {
            id: Uuid::now_v7(),
            user_id: Uuid::nil(),
            counterparty_id: None,
            amount: Money::new(cents),
            description: String::new(),
            kind,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_ledger_has_zero_balance() {
        assert_eq!(balance_of(&[]).unwrap(), Money::ZERO);
    }

    #[test]
    fn balance_sums_signed_contributions() {
        let ledger = [
            entry(OperationType::Deposit, 10_000),
            entry(OperationType::Withdraw, 5_000),
            entry(OperationType::Transfer, -2_500),
            entry(OperationType::Transfer, 700),
        ];
        assert_eq!(balance_of(&ledger).unwrap(), Money::new(3_200));
    }

    #[test]
    fn balance_overflow_is_an_error() {
        let ledger = [
            entry(OperationType::Deposit, i64::MAX),
            entry(OperationType::Deposit, 1),
        ];
        assert!(matches!(
            balance_of(&ledger),
            Err(EngineError::InvalidAmount(_))
        ));
    }
}
