use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    /// Public view of a user. The password hash is never exposed.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod session {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionNew {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionUser {
        pub id: Uuid,
        pub name: String,
        pub email: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionCreated {
        pub user: SessionUser,
        pub token: String,
    }
}

pub mod statement {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum OperationType {
        Deposit,
        Withdraw,
        Transfer,
    }

    /// Body of deposit, withdraw and transfer requests.
    ///
    /// `amount` is expressed in major units (`10.5`), at most two decimals.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementNew {
        pub amount: f64,
        #[serde(default)]
        pub description: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub counterparty_id: Option<Uuid>,
        /// Stored amount in major units; negative for outgoing transfers.
        pub amount: f64,
        pub description: String,
        #[serde(rename = "type")]
        pub kind: OperationType,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferCreated {
        pub debit: StatementView,
        pub credit: StatementView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceResponse {
        pub statement: Vec<StatementView>,
        pub balance: f64,
    }
}
