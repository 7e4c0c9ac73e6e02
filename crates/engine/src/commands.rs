//! Command structs for engine operations.
//!
//! These types group parameters for write operations (registration,
//! deposit/withdraw, transfer), keeping call sites readable and avoiding
//! long argument lists.

use uuid::Uuid;

use crate::Money;

/// Register a new user.
#[derive(Clone, Debug)]
pub struct UserNew {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserNew {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Create a deposit or withdraw entry for `user_id`.
#[derive(Clone, Debug)]
pub struct StatementCmd {
    pub user_id: Uuid,
    pub amount: Money,
    pub description: String,
}

impl StatementCmd {
    #[must_use]
    pub fn new(user_id: Uuid, amount: Money) -> Self {
        Self {
            user_id,
            amount,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Move `amount` from `sender_id` to `receiver_id`.
#[derive(Clone, Debug)]
pub struct TransferCmd {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub amount: Money,
    pub description: String,
}

impl TransferCmd {
    #[must_use]
    pub fn new(sender_id: Uuid, receiver_id: Uuid, amount: Money) -> Self {
        Self {
            sender_id,
            receiver_id,
            amount,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
