use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use askama::Template;
use std::fmt;

use crate::templates_structs::ApiErrorResponse;

/// Application name used as the prefix of alert headers (`X-apisterApp-alert`).
pub const ALERT_APP_NAME: &str = "apisterApp";

pub const NOT_FOUND_PAGE: &str = include_str!("../templates/errors/404.html");

/// A rejected REST request, reported through `X-…-error` / `X-…-params` headers.
#[derive(Debug, Clone, PartialEq)]
pub struct BadRequestAlert {
    pub message: String,
    pub entity_name: &'static str,
    pub error_key: &'static str,
}

impl BadRequestAlert {
    pub fn new(message: impl Into<String>, entity_name: &'static str, error_key: &'static str) -> Self {
        Self { message: message.into(), entity_name, error_key }
    }
}

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Template(askama::Error),
    Hash(String),
    Session(String),
    Csrf,
    BadRequest(BadRequestAlert),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::BadRequest(alert) => write!(f, "Bad request ({}): {}", alert.error_key, alert.message),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Session(_) => StatusCode::UNAUTHORIZED,
            AppError::Csrf => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(NOT_FOUND_PAGE),
            AppError::BadRequest(alert) => {
                log::warn!("Bad request alert: {}", alert.message);
                HttpResponse::BadRequest()
                    .insert_header((format!("X-{ALERT_APP_NAME}-error"), format!("error.{}", alert.error_key)))
                    .insert_header((format!("X-{ALERT_APP_NAME}-params"), alert.entity_name))
                    .json(ApiErrorResponse::from(alert))
            }
            AppError::Session(_) => HttpResponse::Unauthorized().body("Unauthorized"),
            AppError::Csrf => HttpResponse::Forbidden().body("Invalid or missing CSRF token"),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<BadRequestAlert> for AppError {
    fn from(alert: BadRequestAlert) -> Self {
        AppError::BadRequest(alert)
    }
}

/// Render an Askama template into an HTML response.
pub fn render<T: Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
