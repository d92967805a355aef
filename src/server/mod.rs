use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::server::endpoints::{assistant, auth, maintenance, rooms, schedule, status};
use crate::types::AppState;

mod endpoints;
mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let rooms_router = Router::new()
        .route("/rooms", get(rooms::get_rooms).post(rooms::post_room))
        .route(
            "/rooms/:id",
            get(rooms::get_room)
                .put(rooms::put_room)
                .delete(rooms::delete_room),
        )
        .route("/rooms/:id/status", get(status::get_room_status))
        .route(
            "/rooms/:id/schedules",
            get(schedule::get_room_schedules).post(schedule::post_room_schedule),
        )
        .route("/schedules/:id", delete(schedule::delete_schedule));

    let maintenance_router = Router::new()
        .route(
            "/maintenance",
            get(maintenance::get_tickets).post(maintenance::post_ticket),
        )
        .route(
            "/maintenance/:id/status",
            post(maintenance::post_ticket_status),
        )
        .route("/maintenance/:id", delete(maintenance::delete_ticket));

    let assistant_router = Router::new()
        .route("/assistant/booking", post(assistant::post_booking))
        .route("/assistant/search", post(assistant::post_search))
        .route("/assistant/maintenance", post(assistant::post_maintenance))
        .route(
            "/assistant/refresh_model",
            post(assistant::post_refresh_model),
        );

    let auth_router = Router::new()
        .route("/auth/register", post(auth::post_register))
        .route("/auth/login", post(auth::post_login))
        .route("/auth/profile", post(auth::post_profile));

    Router::new()
        .route("/health", get(status::get_health))
        .merge(rooms_router)
        .merge(maintenance_router)
        .merge(assistant_router)
        .merge(auth_router)
        .with_state(app_state)
}
