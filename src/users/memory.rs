use std::sync::Mutex;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};

use crate::error::StoreError;
use crate::users::repo::UserStore;
use crate::users::repo_types::{NewUser, User, UserChanges};

/// In-process stand-in for Postgres used by the router tests. Mirrors the
/// table's unique email constraint and its serial ids.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i32,
    rows: Vec<User>,
}

impl MemoryUserStore {
    fn email_taken(rows: &[User], email: &str, except: Option<i32>) -> bool {
        rows.iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.lock().unwrap().rows.clone())
    }

    async fn get(&self, id: i32) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if Self::email_taken(&inner.rows, &user.email, None) {
            return Err(StoreError::Conflict);
        }
        inner.next_id += 1;
        let now = OffsetDateTime::now_utc();
        let row = User {
            id: inner.next_id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.rows.iter().any(|u| u.id == id) {
            return Ok(None);
        }
        if let Some(email) = &changes.email {
            if Self::email_taken(&inner.rows, email, Some(id)) {
                return Err(StoreError::Conflict);
            }
        }
        let Some(row) = inner.rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            row.name = name.clone();
        }
        if let Some(email) = &changes.email {
            row.email = email.clone();
        }
        let now = OffsetDateTime::now_utc();
        row.updated_at = now.max(row.updated_at + Duration::microseconds(1));
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|u| u.id != id);
        Ok(inner.rows.len() != before)
    }
}
