use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{csrf, password, session};
use crate::errors::{AppError, render};
use crate::models::user::User;
use crate::state::AppState;
use crate::templates_structs::{AccountResponse, AuthenticateRequest, LoginTemplate};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// Look up `login` and check its password. `None` on any mismatch.
async fn authenticate(state: &AppState, login: &str, pass: &str) -> Result<Option<User>, AppError> {
    let Some(user) = state.users.find_by_login(login.trim()).await? else {
        return Ok(None);
    };
    match password::verify_password(pass, &user.password_hash) {
        Ok(true) => Ok(Some(user)),
        Ok(false) => Ok(None),
        Err(e) => {
            log::error!("Stored password hash for {} is unreadable: {e}", user.login);
            Ok(None)
        }
    }
}

fn login_failed(state: &AppState, session: &Session) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error: Some("Failed to sign in! Please check your credentials and try again.".to_string()),
        app_name: state.app_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
    };
    render(tmpl)
}

pub async fn login_page(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    // Already signed in: straight to home
    if session::get_user_id(&session).is_some() {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/"))
            .finish());
    }

    let csrf_token = csrf::get_or_create_token(&session);
    let tmpl = LoginTemplate { error: None, app_name: state.app_name.clone(), csrf_token };
    render(tmpl)
}

pub async fn login_submit(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    match authenticate(&state, &form.username, &form.password).await? {
        Some(user) => {
            session::sign_in(&session, &user)?;
            log::info!("User {} signed in", user.login);
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/"))
                .finish())
        }
        None => {
            log::warn!("Failed sign-in attempt for {}", form.username);
            login_failed(&state, &session)
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish())
}

/// POST /api/authenticate - JSON sign-in for API clients; the session cookie
/// carries the authentication from then on.
pub async fn api_authenticate(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<AuthenticateRequest>,
) -> Result<HttpResponse, AppError> {
    log::debug!("REST request to authenticate {}", body.username);
    match authenticate(&state, &body.username, &body.password).await? {
        Some(user) => {
            session::sign_in(&session, &user)?;
            Ok(HttpResponse::Ok().json(AccountResponse {
                id: user.id,
                login: user.login,
                authorities: user.authorities,
            }))
        }
        None => Ok(HttpResponse::Unauthorized().json(serde_json::json!({
            "title": "Unauthorized",
            "status": 401,
            "detail": "Bad credentials"
        }))),
    }
}

/// GET /api/account - the signed-in account
pub async fn api_account(session: Session) -> Result<HttpResponse, AppError> {
    let id = session::get_user_id(&session)
        .ok_or_else(|| AppError::Session("Not authenticated".to_string()))?;
    let login = session::get_login(&session)?;
    let authorities = session::get_authorities(&session).0;
    Ok(HttpResponse::Ok().json(AccountResponse { id, login, authorities }))
}
