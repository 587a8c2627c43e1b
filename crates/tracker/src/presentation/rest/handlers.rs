use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracker_core::TransactionId;
use tracker_ports::Clock;

use super::AppState;
use crate::presentation::rest::{ApiError, dto::*};

/// POST /api/transactions/log
///
/// The timer starts before the body is decoded, so decoding counts towards
/// the recorded response time.
pub async fn log_transaction<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), ApiError> {
    let started = state.service.timer().start();

    let request: LogTransactionRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::bad_request(e.to_string()))?;

    state
        .service
        .log_transaction(request.into_command(), started, StatusCode::CREATED.as_u16())
        .await
        .map_err(|_| ApiError::logging_failed())?;

    Ok((StatusCode::CREATED, LOGGED_BODY))
}

/// GET /api/transactions/transaction/{transaction_id}
pub async fn get_transaction<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    Path(transaction_id): Path<u64>,
) -> Result<String, ApiError> {
    let view = state
        .service
        .get_transaction_summary(TransactionId::new(transaction_id))
        .await
        .map_err(|e| {
            tracing::error!(transaction_id, error = %e, "Transaction lookup failed");
            ApiError::internal("An error occurred while fetching the transaction")
        })?
        .ok_or_else(ApiError::transaction_not_found)?;

    Ok(view.to_string())
}
