use std::sync::Arc;

use sqlx::PgPool;

use crate::users::{PgUserStore, UserStore};

/// Handler context, built once in `main` and cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        Self::from_parts(Arc::new(PgUserStore::new(db)))
    }

    pub fn from_parts(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(Arc::new(crate::users::memory::MemoryUserStore::default()))
    }
}
