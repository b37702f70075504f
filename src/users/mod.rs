mod dto;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo::{PgUserStore, UserStore};

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
