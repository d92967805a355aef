//! Weekly schedule endpoints.

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

use crate::db::DbScheduleEntry;
use crate::scheduling::Weekday;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

fn entry_json(e: &DbScheduleEntry) -> serde_json::Value {
    json!({
        "id": e.id,
        "room_id": e.room_id,
        "subject": e.subject,
        "professor": e.professor,
        "day": e.day_of_week,
        "start_time": e.start_time,
        "end_time": e.end_time,
    })
}

#[derive(Deserialize)]
pub struct DayFilter {
    pub day: Option<String>,
}

/// GET /rooms/:id/schedules?day=Monday
pub async fn get_room_schedules(
    Path(room_id): Path<i64>,
    Query(filter): Query<DayFilter>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /rooms/{room_id}/schedules");

    let result = match filter.day {
        Some(raw) => match Weekday::parse(&raw) {
            Some(day) => s.db.schedules_for_room_on(room_id, day),
            None => {
                return ApiErrorType::from((
                    StatusCode::BAD_REQUEST,
                    "Unrecognized day of week",
                    Some(raw),
                ))
                .into_response()
            }
        },
        None => s.db.schedules_for_room(room_id),
    };

    match result {
        Ok(entries) => {
            let body: Vec<_> = entries.iter().map(entry_json).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct BookingBody {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub professor: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

/// POST /rooms/:id/schedules
pub async fn post_room_schedule(
    Path(room_id): Path<i64>,
    State(s): State<Arc<AppState>>,
    Json(body): Json<BookingBody>,
) -> Response {
    info!(
        "POST /rooms/{room_id}/schedules ({} {} {}-{})",
        body.subject, body.day, body.start_time, body.end_time
    );

    match s.db.add_schedule(
        room_id,
        &body.subject,
        &body.professor,
        &body.day,
        &body.start_time,
        &body.end_time,
    ) {
        Ok(id) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "id": id,
                "message": "Class scheduled successfully",
            })),
        )
            .into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

/// DELETE /schedules/:id
pub async fn delete_schedule(Path(id): Path<i64>, State(s): State<Arc<AppState>>) -> Response {
    info!("DELETE /schedules/{id}");

    match s.db.delete_schedule(id) {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}
