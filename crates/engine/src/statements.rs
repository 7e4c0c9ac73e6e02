//! Statement primitives.
//!
//! A `Statement` is a single ledger entry owned by one user. Deposits and
//! withdrawals store a positive amount and rely on their kind for the sign;
//! transfers store the amount already signed (negative for the sender,
//! positive for the receiver).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Deposit,
    Withdraw,
    Transfer,
}

impl OperationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Transfer => "transfer",
        }
    }
}

impl TryFrom<&str> for OperationType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            "transfer" => Ok(Self::Transfer),
            other => Err(EngineError::InvalidInput(format!(
                "invalid operation type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: Uuid,
    pub user_id: Uuid,
    /// The other user of a transfer.
    pub counterparty_id: Option<Uuid>,
    pub amount: Money,
    pub description: String,
    pub kind: OperationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Statement {
    /// Builds a deposit or withdraw entry. The amount must be positive.
    pub fn new(
        user_id: Uuid,
        kind: OperationType,
        amount: Money,
        description: String,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if kind == OperationType::Transfer {
            return Err(EngineError::InvalidInput(
                "transfer entries are created in pairs".to_string(),
            ));
        }
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
        }
        Ok(Self {
            id: Uuid::now_v7(),
            user_id,
            counterparty_id: None,
            amount,
            description,
            kind,
            created_at,
            updated_at: created_at,
        })
    }

    /// Builds the two entries of a transfer: the debit of the sender and the
    /// credit of the receiver.
    pub fn transfer_pair(
        sender_id: Uuid,
        receiver_id: Uuid,
        amount: Money,
        description: String,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<(Self, Self)> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
        }
        if sender_id == receiver_id {
            return Err(EngineError::InvalidInput(
                "sender and receiver must differ".to_string(),
            ));
        }
        let debit = Self {
            id: Uuid::now_v7(),
            user_id: sender_id,
            counterparty_id: Some(receiver_id),
            amount: -amount,
            description: description.clone(),
            kind: OperationType::Transfer,
            created_at,
            updated_at: created_at,
        };
        let credit = Self {
            id: Uuid::now_v7(),
            user_id: receiver_id,
            counterparty_id: Some(sender_id),
            amount,
            description,
            kind: OperationType::Transfer,
            created_at,
            updated_at: created_at,
        };
        Ok((debit, credit))
    }

    /// Contribution of this entry to the balance of its owner.
    #[must_use]
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            OperationType::Deposit => self.amount,
            OperationType::Withdraw => -self.amount,
            OperationType::Transfer => self.amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "statements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub counterparty_id: Option<String>,
    pub amount_minor: i64,
    pub description: String,
    pub kind: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Statement> for ActiveModel {
    fn from(statement: &Statement) -> Self {
        Self {
            id: ActiveValue::Set(statement.id.to_string()),
            user_id: ActiveValue::Set(statement.user_id.to_string()),
            counterparty_id: ActiveValue::Set(statement.counterparty_id.map(|id| id.to_string())),
            amount_minor: ActiveValue::Set(statement.amount.cents()),
            description: ActiveValue::Set(statement.description.clone()),
            kind: ActiveValue::Set(statement.kind.as_str().to_string()),
            created_at: ActiveValue::Set(statement.created_at),
            updated_at: ActiveValue::Set(statement.updated_at),
        }
    }
}

impl TryFrom<Model> for Statement {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "statement")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            counterparty_id: model
                .counterparty_id
                .as_deref()
                .map(|id| parse_uuid(id, "counterparty"))
                .transpose()?,
            amount: Money::new(model.amount_minor),
            description: model.description,
            kind: OperationType::try_from(model.kind.as_str())?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
