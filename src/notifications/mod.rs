use crate::state::AppState;
use axum::Router;

mod dto;
pub mod fcm;
pub mod handlers;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::notification_routes())
}
