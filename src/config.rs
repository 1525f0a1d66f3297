use actix_web::cookie::Key;

/// Runtime configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string. `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub app_name: String,
    pub seed_users: bool,
    session_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let app_name = std::env::var("APP_NAME").unwrap_or_else(|_| "apisterApp".to_string());
        let seed_users = std::env::var("SEED_USERS")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);
        let session_key = std::env::var("SESSION_KEY").ok();

        Self { database_url, bind_addr, app_name, seed_users, session_key }
    }

    /// Session encryption key. Load from SESSION_KEY for sessions that survive restarts.
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}
