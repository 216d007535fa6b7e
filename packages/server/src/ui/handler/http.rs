//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::{
        http::{ConnectionsDto, HealthDto},
        websocket::ChatRecord,
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Get the chat history in creation order
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatRecord>>, StatusCode> {
    match state.get_history_usecase.execute().await {
        // Domain Model から DTO への変換
        Ok(messages) => Ok(Json(messages.into_iter().map(Into::into).collect())),
        Err(_) => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

/// Get the number of open connections and the names of joined participants
pub async fn get_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionsDto> {
    let summary = state.get_connections_usecase.execute().await;

    Json(ConnectionsDto {
        count: summary.count,
        names: summary
            .names
            .into_iter()
            .map(|name| name.into_string())
            .collect(),
    })
}
