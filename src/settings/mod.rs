pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use dto::{Goals, Settings, SettingsChanged, Theme};
pub use services::SettingsHub;

pub fn router() -> Router<AppState> {
    handlers::settings_routes()
}
