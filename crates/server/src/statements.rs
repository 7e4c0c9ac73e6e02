//! Statement API endpoints

use api_types::statement::{
    BalanceResponse, OperationType as ApiOperationType, StatementNew, StatementView,
    TransferCreated,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Money, Statement, StatementCmd, TransferCmd, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::OperationType) -> ApiOperationType {
    match kind {
        engine::OperationType::Deposit => ApiOperationType::Deposit,
        engine::OperationType::Withdraw => ApiOperationType::Withdraw,
        engine::OperationType::Transfer => ApiOperationType::Transfer,
    }
}

fn view(statement: Statement) -> StatementView {
    StatementView {
        id: statement.id,
        user_id: statement.user_id,
        counterparty_id: statement.counterparty_id,
        amount: statement.amount.to_major(),
        description: statement.description,
        kind: map_kind(statement.kind),
        created_at: statement.created_at,
        updated_at: statement.updated_at,
    }
}

fn parse_amount(amount: f64) -> Result<Money, ServerError> {
    Money::from_major(amount).map_err(|err| ServerError::Generic(err.to_string()))
}

/// Path ids are parsed here so a malformed one gets the JSON error body.
fn parse_id(raw: &str, label: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw).map_err(|_| ServerError::Generic(format!("invalid {label} id")))
}

pub async fn deposit(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<StatementNew>,
) -> Result<(StatusCode, Json<StatementView>), ServerError> {
    let amount = parse_amount(payload.amount)?;
    let statement = state
        .engine
        .deposit(StatementCmd::new(user.id, amount).description(payload.description))
        .await?;

    Ok((StatusCode::CREATED, Json(view(statement))))
}

pub async fn withdraw(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<StatementNew>,
) -> Result<(StatusCode, Json<StatementView>), ServerError> {
    let amount = parse_amount(payload.amount)?;
    let statement = state
        .engine
        .withdraw(StatementCmd::new(user.id, amount).description(payload.description))
        .await?;

    Ok((StatusCode::CREATED, Json(view(statement))))
}

/// Transfer from the authenticated user to `user_id`.
pub async fn transfer(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(receiver_id): Path<String>,
    Json(payload): Json<StatementNew>,
) -> Result<(StatusCode, Json<TransferCreated>), ServerError> {
    let receiver_id = parse_id(&receiver_id, "user")?;
    let amount = parse_amount(payload.amount)?;
    let transfer = state
        .engine
        .transfer(TransferCmd::new(user.id, receiver_id, amount).description(payload.description))
        .await?;

    tracing::info!(
        sender_id = %user.id,
        receiver_id = %receiver_id,
        amount = %amount,
        "transfer completed"
    );
    Ok((
        StatusCode::CREATED,
        Json(TransferCreated {
            debit: view(transfer.debit),
            credit: view(transfer.credit),
        }),
    ))
}

pub async fn balance(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<BalanceResponse>, ServerError> {
    let balance = state.engine.balance(user.id).await?;

    Ok(Json(BalanceResponse {
        statement: balance.statements.into_iter().map(view).collect(),
        balance: balance.balance.to_major(),
    }))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(statement_id): Path<String>,
) -> Result<Json<StatementView>, ServerError> {
    let statement_id = parse_id(&statement_id, "statement")?;
    let statement = state.engine.statement(user.id, statement_id).await?;
    Ok(Json(view(statement)))
}
