use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::password;
use crate::errors::AppError;
use crate::models::user::{NewUser, ROLE_ADMIN, ROLE_USER, UserRepository};

pub const MIGRATIONS: &str = include_str!("schema.sql");

/// Default accounts created on an empty user table: (login, password, authorities).
const DEFAULT_USERS: &[(&str, &str, &[&str])] = &[
    ("admin", "admin", &[ROLE_ADMIN, ROLE_USER]),
    ("user", "user", &[ROLE_USER]),
];

pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(MIGRATIONS).execute(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Create the default accounts when no user exists yet. Returns how many were created.
pub async fn seed_users(users: &dyn UserRepository) -> Result<usize, AppError> {
    let count = users.count().await?;
    if count > 0 {
        log::info!("Database already seeded ({count} users), skipping user seed");
        return Ok(0);
    }

    for (login, pass, authorities) in DEFAULT_USERS {
        let password_hash = password::hash_password(pass).map_err(AppError::Hash)?;
        users
            .create(&NewUser {
                login: login.to_string(),
                password_hash,
                authorities: authorities.iter().map(|a| a.to_string()).collect(),
            })
            .await?;
    }
    log::info!("Seeded {} default users", DEFAULT_USERS.len());
    Ok(DEFAULT_USERS.len())
}
