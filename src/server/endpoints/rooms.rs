//! Classroom directory endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::db::DbRoom;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

fn room_json(room: &DbRoom) -> serde_json::Value {
    json!({
        "id": room.id,
        "name": room.name,
        "capacity": room.capacity,
        "type": room.room_type,
        "status": room.status,
        "equipment": room.equipment_list(),
    })
}

/// GET /rooms
pub async fn get_rooms(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /rooms");

    match s.db.rooms() {
        Ok(rooms) => {
            let body: Vec<_> = rooms.iter().map(room_json).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct CreateRoomBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: i64,
    #[serde(rename = "type", default)]
    pub room_type: String,
    #[serde(default)]
    pub equipment: String,
}

/// POST /rooms
pub async fn post_room(
    State(s): State<Arc<AppState>>,
    Json(body): Json<CreateRoomBody>,
) -> Response {
    info!("POST /rooms ({})", body.name);

    match s
        .db
        .add_room(&body.name, body.capacity, &body.room_type, &body.equipment)
    {
        Ok(id) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "id": id })),
        )
            .into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

/// GET /rooms/:id
pub async fn get_room(Path(id): Path<i64>, State(s): State<Arc<AppState>>) -> Response {
    info!("GET /rooms/{id}");

    let room = match s.db.room(id) {
        Ok(Some(room)) => room,
        Ok(None) => {
            return ApiErrorType::from((StatusCode::NOT_FOUND, "Room not found")).into_response()
        }
        Err(e) => return ApiErrorType::from(e).into_response(),
    };

    match s.db.schedules_for_room(id) {
        Ok(schedules) => {
            let mut body = room_json(&room);
            body["schedules"] = schedules
                .iter()
                .map(|e| {
                    json!({
                        "id": e.id,
                        "subject": e.subject,
                        "professor": e.professor,
                        "day": e.day_of_week,
                        "start_time": e.start_time,
                        "end_time": e.end_time,
                    })
                })
                .collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct UpdateRoomBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: i64,
    #[serde(rename = "type", default)]
    pub room_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub equipment: String,
}

/// PUT /rooms/:id
pub async fn put_room(
    Path(id): Path<i64>,
    State(s): State<Arc<AppState>>,
    Json(body): Json<UpdateRoomBody>,
) -> Response {
    info!("PUT /rooms/{id}");

    match s.db.update_room(
        id,
        &body.name,
        body.capacity,
        &body.room_type,
        &body.status,
        &body.equipment,
    ) {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

/// DELETE /rooms/:id
pub async fn delete_room(Path(id): Path<i64>, State(s): State<Arc<AppState>>) -> Response {
    info!("DELETE /rooms/{id}");

    match s.db.delete_room(id) {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}
