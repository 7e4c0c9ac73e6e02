use chrono::Utc;
use sea_orm::{QueryFilter, SqlErr, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, User, UserNew, users,
    util::{normalize_email, normalize_required_name, validate_password},
};

use super::Engine;

impl Engine {
    /// Registers a new user and stores a bcrypt hash of the password.
    ///
    /// Fails with `ExistingKey` when the (normalized) email is already taken.
    pub async fn create_user(&self, cmd: UserNew) -> ResultEngine<User> {
        let name = normalize_required_name(&cmd.name)?;
        let email = normalize_email(&cmd.email)?;
        validate_password(&cmd.password)?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(email));
        }

        let password_hash = bcrypt::hash(&cmd.password, self.password_cost)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: now,
            updated_at: now,
        };

        user.active_model(password_hash)
            .insert(&self.database)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    EngineError::ExistingKey(user.email.clone())
                }
                _ => EngineError::Database(err),
            })?;

        tracing::debug!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Checks an email/password pair.
    ///
    /// Unknown emails and wrong passwords both fail with `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let Ok(email) = normalize_email(email) else {
            return Err(EngineError::InvalidCredentials);
        };

        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .ok_or(EngineError::InvalidCredentials)?;

        if !bcrypt::verify(password, &model.password)? {
            return Err(EngineError::InvalidCredentials);
        }

        User::try_from(model)
    }

    /// Returns the user with the given id.
    pub async fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        let model = self.require_user(&self.database, user_id, "user").await?;
        User::try_from(model)
    }
}
