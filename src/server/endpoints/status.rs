//! Health and room-status endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::scheduling::{status, Weekday};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// GET /health
pub async fn get_health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

#[derive(Deserialize)]
pub struct StatusQuery {
    pub day: Option<String>,
}

/// GET /rooms/:id/status?day=Monday
///
/// `day` overrides which weekday's schedule is consulted; the time-of-day is
/// always the current wall clock.
pub async fn get_room_status(
    Path(room_id): Path<i64>,
    Query(query): Query<StatusQuery>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /rooms/{room_id}/status");

    let selected_day = match query.day {
        Some(raw) => match Weekday::parse(&raw) {
            Some(day) => Some(day),
            None => {
                return ApiErrorType::from((
                    StatusCode::BAD_REQUEST,
                    "Unrecognized day of week",
                    Some(raw),
                ))
                .into_response()
            }
        },
        None => None,
    };

    match status::room_status(&s.db, room_id, selected_day) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}
