//! Ledger engine: users, statements and the balance derived from them.
//!
//! The [`Engine`] owns the database connection and exposes one async method
//! per business operation. Every write runs inside a single database
//! transaction, so a transfer either stores both of its entries or none.

pub use commands::{StatementCmd, TransferCmd, UserNew};
pub use error::EngineError;
pub use money::Money;
pub use ops::{Balance, Engine, EngineBuilder, Transfer, balance_of};
pub use statements::{OperationType, Statement};
pub use users::User;

mod commands;
mod error;
mod money;
mod ops;
mod statements;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
