pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod scan_guard;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo_types::Food;
pub use scan_guard::ScanGuard;

pub fn router() -> Router<AppState> {
    handlers::food_routes()
}
