use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::types::{NewUser, User, UserRef};
use super::UserRepository;

#[derive(Default)]
struct Users {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

/// Process-local user store, used when no DATABASE_URL is configured and in tests.
#[derive(Default)]
pub struct MemoryUserRepository {
    inner: RwLock<Users>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, sqlx::Error> {
        let users = self.inner.read().await;
        Ok(users.rows.values().find(|u| u.login == login).cloned())
    }

    async fn find_ref(&self, id: i64) -> Result<Option<UserRef>, sqlx::Error> {
        let users = self.inner.read().await;
        Ok(users.rows.get(&id).map(UserRef::from))
    }

    async fn find_all_refs(&self) -> Result<Vec<UserRef>, sqlx::Error> {
        let users = self.inner.read().await;
        let mut refs: Vec<UserRef> = users.rows.values().map(UserRef::from).collect();
        refs.sort_by(|a, b| a.login.cmp(&b.login));
        Ok(refs)
    }

    async fn create(&self, new_user: &NewUser) -> Result<i64, sqlx::Error> {
        let mut users = self.inner.write().await;
        // login is unique, mirroring the table constraint
        if users.rows.values().any(|u| u.login == new_user.login) {
            return Err(sqlx::Error::Protocol(format!(
                "duplicate key value violates unique constraint: login '{}'",
                new_user.login
            )));
        }
        users.next_id += 1;
        let id = users.next_id;
        users.rows.insert(
            id,
            User {
                id,
                login: new_user.login.clone(),
                password_hash: new_user.password_hash.clone(),
                authorities: new_user.authorities.clone(),
            },
        );
        Ok(id)
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.inner.read().await.rows.len() as i64)
    }
}
