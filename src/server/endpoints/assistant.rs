//! Natural-language assistant endpoints.
//!
//! These hand back best-effort drafts; nothing here writes to the store.
//! The UI feeds a confirmed draft into the normal booking endpoint, which
//! validates it like any other input.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::server::types::ApiErrorType;
use crate::types::AppState;

#[derive(Deserialize)]
pub struct QueryBody {
    #[serde(default)]
    pub query: String,
}

/// POST /assistant/booking
pub async fn post_booking(
    State(s): State<Arc<AppState>>,
    Json(body): Json<QueryBody>,
) -> Response {
    info!("POST /assistant/booking");

    match s.assistant.parse_booking_intent(&body.query).await {
        Ok(draft) => {
            // Resolve the mentioned room name to an id when we can, so the
            // UI can pre-select it.
            let room_id = match &draft.room_name {
                Some(name) => s.db.room_by_name(name).ok().flatten().map(|r| r.id),
                None => None,
            };
            let mut value = json!(draft);
            value["roomId"] = json!(room_id);
            (StatusCode::OK, Json(value)).into_response()
        }
        Err(e) => {
            warn!("Booking intent parse failed: {e}");
            ApiErrorType::from((
                StatusCode::BAD_GATEWAY,
                "Assistant request failed",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

/// POST /assistant/search
pub async fn post_search(
    State(s): State<Arc<AppState>>,
    Json(body): Json<QueryBody>,
) -> Response {
    info!("POST /assistant/search");

    match s.assistant.parse_search_intent(&body.query).await {
        Ok(intent) => (StatusCode::OK, Json(intent)).into_response(),
        Err(e) => {
            warn!("Search intent parse failed: {e}");
            ApiErrorType::from((
                StatusCode::BAD_GATEWAY,
                "Assistant request failed",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

/// POST /assistant/maintenance
///
/// Triage draft for a maintenance report. Unlike `POST /maintenance`, this
/// files nothing; the UI shows the draft and submits the confirmed report
/// through the normal ticket endpoint.
pub async fn post_maintenance(
    State(s): State<Arc<AppState>>,
    Json(body): Json<QueryBody>,
) -> Response {
    info!("POST /assistant/maintenance");

    match s.assistant.analyze_maintenance(&body.query).await {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(e) => {
            warn!("Maintenance triage failed: {e}");
            ApiErrorType::from((
                StatusCode::BAD_GATEWAY,
                "Assistant request failed",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

/// POST /assistant/refresh_model
///
/// Drops the cached model name so the next request re-runs discovery.
pub async fn post_refresh_model(State(s): State<Arc<AppState>>) -> Response {
    info!("POST /assistant/refresh_model");

    s.assistant.refresh_model().await;
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::AssistantClient;
    use crate::config::AssistantConfig;
    use crate::db::RoomDb;

    // Assistant pointed at a port nothing listens on, so requests fail fast.
    fn unreachable_state() -> Arc<AppState> {
        let config = AssistantConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..AssistantConfig::default()
        };
        Arc::new(AppState {
            db: RoomDb::open_in_memory().unwrap(),
            assistant: AssistantClient::new(config),
        })
    }

    #[tokio::test]
    async fn test_maintenance_draft_reports_gateway_failure() {
        let response = post_maintenance(
            State(unreachable_state()),
            Json(QueryBody {
                query: "projector keeps flickering".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_booking_draft_reports_gateway_failure() {
        let response = post_booking(
            State(unreachable_state()),
            Json(QueryBody {
                query: "book CL5 tuesday 1pm".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
