//! Shared application state.

use crate::assistant::AssistantClient;
use crate::db::RoomDb;

/// State handed to every request handler.
pub struct AppState {
    pub db: RoomDb,
    pub assistant: AssistantClient,
}
