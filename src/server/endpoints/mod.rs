pub mod assistant;
pub mod auth;
pub mod maintenance;
pub mod rooms;
pub mod schedule;
pub mod status;
