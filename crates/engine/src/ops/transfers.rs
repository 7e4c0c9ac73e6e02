use chrono::Utc;
use sea_orm::{DatabaseTransaction, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{ResultEngine, Statement, TransferCmd, statements, util::normalize_text};

use super::{Engine, with_tx};

/// The two entries written by a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Negative entry owned by the sender.
    pub debit: Statement,
    /// Positive entry owned by the receiver.
    pub credit: Statement,
}

impl Engine {
    /// Moves `cmd.amount` from the sender to the receiver.
    ///
    /// Validation (positive amount, distinct users, both users exist, sender
    /// balance covers the amount, receiver balance does not overflow) and both
    /// inserts share one DB transaction.
    pub async fn transfer(&self, cmd: TransferCmd) -> ResultEngine<Transfer> {
        let TransferCmd {
            sender_id,
            receiver_id,
            amount,
            description,
        } = cmd;
        let (debit, credit) = Statement::transfer_pair(
            sender_id,
            receiver_id,
            amount,
            normalize_text(&description),
            Utc::now(),
        )?;

        with_tx!(self, |db_tx| {
            self.insert_transfer(&db_tx, debit, credit).await
        })
    }

    async fn insert_transfer(
        &self,
        db_tx: &DatabaseTransaction,
        debit: Statement,
        credit: Statement,
    ) -> ResultEngine<Transfer> {
        self.require_user(db_tx, credit.user_id, "receive user")
            .await?;
        self.require_user(db_tx, debit.user_id, "sender user")
            .await?;
        self.ensure_funds(db_tx, debit.user_id, credit.amount)
            .await?;
        self.ensure_credit_fits(db_tx, credit.user_id, credit.amount)
            .await?;

        statements::ActiveModel::from(&debit).insert(db_tx).await?;
        statements::ActiveModel::from(&credit).insert(db_tx).await?;

        tracing::debug!(
            sender_id = %debit.user_id,
            receiver_id = %credit.user_id,
            amount = %credit.amount,
            "transfer created"
        );
        Ok(Transfer { debit, credit })
    }
}
