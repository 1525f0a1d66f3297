use async_trait::async_trait;
use sqlx::PgPool;

use super::types::{NewUser, User, UserRef, authorities_from_csv, authorities_to_csv};
use super::UserRepository;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    login: String,
    password_hash: String,
    authorities: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            login: row.login,
            password_hash: row.password_hash,
            authorities: authorities_from_csv(&row.authorities),
        }
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, login, password_hash, authorities FROM app_user WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn find_ref(&self, id: i64) -> Result<Option<UserRef>, sqlx::Error> {
        let row: Option<(i64, String)> = sqlx::query_as("SELECT id, login FROM app_user WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id, login)| UserRef { id, login }))
    }

    async fn find_all_refs(&self) -> Result<Vec<UserRef>, sqlx::Error> {
        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, login FROM app_user ORDER BY login")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id, login)| UserRef { id, login }).collect())
    }

    async fn create(&self, new_user: &NewUser) -> Result<i64, sqlx::Error> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO app_user (login, password_hash, authorities) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&new_user.login)
        .bind(&new_user.password_hash)
        .bind(authorities_to_csv(&new_user.authorities))
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM app_user")
            .fetch_one(&self.pool)
            .await
    }
}
