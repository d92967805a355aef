//! Maintenance inbox endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::assistant::TicketAnalysis;
use crate::db::TicketStatus;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// GET /maintenance
pub async fn get_tickets(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /maintenance");

    match s.db.tickets() {
        Ok(tickets) => {
            let body: Vec<_> = tickets
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "description": t.description,
                        "category": t.category,
                        "urgency": t.urgency,
                        "summary": t.summary,
                        "suggested_action": t.suggested_action,
                        "created_at": t.created_at,
                        "status": t.status,
                    })
                })
                .collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct ReportBody {
    #[serde(default)]
    pub description: String,
}

/// POST /maintenance
///
/// Files a ticket from a free-text report. The assistant triages the text;
/// if it is unreachable the ticket is filed with fallback triage rather
/// than dropped.
pub async fn post_ticket(
    State(s): State<Arc<AppState>>,
    Json(body): Json<ReportBody>,
) -> Response {
    info!("POST /maintenance");

    let analysis = match s.assistant.analyze_maintenance(&body.description).await {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("Assistant triage failed, filing with fallback: {e}");
            TicketAnalysis::fallback(&body.description)
        }
    };

    match s.db.add_ticket(
        &body.description,
        &analysis.category,
        &analysis.urgency,
        &analysis.summary,
        &analysis.suggested_action,
    ) {
        Ok(id) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "id": id,
                "category": analysis.category,
                "urgency": analysis.urgency,
                "summary": analysis.summary,
                "suggested_action": analysis.suggested_action,
            })),
        )
            .into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct TicketStatusBody {
    #[serde(default)]
    pub status: String,
}

/// POST /maintenance/:id/status
pub async fn post_ticket_status(
    Path(id): Path<i64>,
    State(s): State<Arc<AppState>>,
    Json(body): Json<TicketStatusBody>,
) -> Response {
    info!("POST /maintenance/{id}/status ({})", body.status);

    let Some(status) = TicketStatus::parse(&body.status) else {
        return ApiErrorType::from((
            StatusCode::BAD_REQUEST,
            "Unrecognized ticket status",
            Some(body.status),
        ))
        .into_response();
    };

    if let Err(e) = s.db.set_ticket_status(id, status) {
        return ApiErrorType::from(e).into_response();
    }

    match s.db.ticket(id) {
        Ok(Some(t)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "id": t.id, "status": t.status })),
        )
            .into_response(),
        Ok(None) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

/// DELETE /maintenance/:id
pub async fn delete_ticket(Path(id): Path<i64>, State(s): State<Arc<AppState>>) -> Response {
    info!("DELETE /maintenance/{id}");

    match s.db.delete_ticket(id) {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}
