//! Credential endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::auth;
use crate::db::DbUser;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

// The password hash never goes out on the wire.
fn user_json(user: &DbUser) -> serde_json::Value {
    json!({
        "id": user.id,
        "full_name": user.full_name,
        "email": user.email,
        "role": user.role,
    })
}

#[derive(Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /auth/register
pub async fn post_register(
    State(s): State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> Response {
    info!("POST /auth/register");

    match auth::register(&s.db, &body.full_name, &body.email, &body.password) {
        Ok(user) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "user": user_json(&user) })),
        )
            .into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /auth/login
pub async fn post_login(State(s): State<Arc<AppState>>, Json(body): Json<LoginBody>) -> Response {
    info!("POST /auth/login");

    match auth::login(&s.db, &body.email, &body.password) {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({ "success": true, "user": user_json(&user) })),
        )
            .into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct ProfileBody {
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub new_password: Option<String>,
}

/// POST /auth/profile
pub async fn post_profile(
    State(s): State<Arc<AppState>>,
    Json(body): Json<ProfileBody>,
) -> Response {
    info!("POST /auth/profile ({})", body.id);

    match auth::update_profile(
        &s.db,
        body.id,
        &body.full_name,
        &body.email,
        body.new_password.as_deref(),
    ) {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({ "success": true, "user": user_json(&user) })),
        )
            .into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}
