use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::errors::AppError;
use crate::models::user::{User, authorities_from_csv, authorities_to_csv};

/// Granted authorities of the signed-in user, with a `has()` check for templates.
#[derive(Debug, Clone, Default)]
pub struct Authorities(pub Vec<String>);

impl Authorities {
    pub fn has(&self, code: &str) -> bool {
        self.0.iter().any(|a| a == code)
    }
}

/// Cookie-backed session middleware. Secure cookies are off so plain-HTTP
/// deployments and in-process tests keep their session.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}

/// Store the authenticated user in the session.
pub fn sign_in(session: &Session, user: &User) -> Result<(), AppError> {
    session.renew();
    session
        .insert("user_id", user.id)
        .and_then(|_| session.insert("login", &user.login))
        .and_then(|_| session.insert("authorities", authorities_to_csv(&user.authorities)))
        .map_err(|e| AppError::Session(format!("Failed to store session: {e}")))
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn get_login(session: &Session) -> Result<String, AppError> {
    match session.get::<String>("login") {
        Ok(Some(login)) => Ok(login),
        Ok(None) => Err(AppError::Session("No login in session".to_string())),
        Err(e) => Err(AppError::Session(format!("Session error: {e}"))),
    }
}

pub fn get_authorities(session: &Session) -> Authorities {
    let csv = session.get::<String>("authorities").unwrap_or(None).unwrap_or_default();
    Authorities(authorities_from_csv(&csv))
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert("flash", message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}
