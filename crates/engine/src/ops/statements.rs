use chrono::Utc;
use sea_orm::{DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, OperationType, ResultEngine, Statement, StatementCmd, statements,
    util::normalize_text,
};

use super::{Engine, with_tx};

impl Engine {
    /// Adds money to the balance of `cmd.user_id`. The resulting balance must
    /// still fit in `Money`.
    pub async fn deposit(&self, cmd: StatementCmd) -> ResultEngine<Statement> {
        with_tx!(self, |db_tx| {
            self.insert_single(&db_tx, OperationType::Deposit, cmd)
                .await
        })
    }

    /// Takes money from the balance of `cmd.user_id`. The balance must cover
    /// the amount.
    pub async fn withdraw(&self, cmd: StatementCmd) -> ResultEngine<Statement> {
        with_tx!(self, |db_tx| {
            self.insert_single(&db_tx, OperationType::Withdraw, cmd)
                .await
        })
    }

    /// Returns a statement owned by `user_id`.
    ///
    /// Statements of other users are reported as missing.
    pub async fn statement(&self, user_id: Uuid, statement_id: Uuid) -> ResultEngine<Statement> {
        self.require_user(&self.database, user_id, "user").await?;
        let model = statements::Entity::find_by_id(statement_id.to_string())
            .filter(statements::Column::UserId.eq(user_id.to_string()))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("statement not exists".to_string()))?;
        Statement::try_from(model)
    }

    /// All statements of `user_id`, oldest first.
    pub async fn statements(&self, user_id: Uuid) -> ResultEngine<Vec<Statement>> {
        self.require_user(&self.database, user_id, "user").await?;
        self.load_statements(&self.database, user_id).await
    }

    async fn insert_single(
        &self,
        db_tx: &DatabaseTransaction,
        kind: OperationType,
        cmd: StatementCmd,
    ) -> ResultEngine<Statement> {
        let StatementCmd {
            user_id,
            amount,
            description,
        } = cmd;
        let statement = Statement::new(
            user_id,
            kind,
            amount,
            normalize_text(&description),
            Utc::now(),
        )?;

        self.require_user(db_tx, user_id, "user").await?;
        match kind {
            OperationType::Withdraw => self.ensure_funds(db_tx, user_id, amount).await?,
            _ => self.ensure_credit_fits(db_tx, user_id, amount).await?,
        }

        statements::ActiveModel::from(&statement).insert(db_tx).await?;
        tracing::debug!(
            user_id = %user_id,
            statement_id = %statement.id,
            kind = kind.as_str(),
            "statement created"
        );
        Ok(statement)
    }
}
