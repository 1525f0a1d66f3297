//! Shared test infrastructure for HTTP-level tests.
//!
//! - `setup_state()` - in-memory repositories with the default accounts seeded
//! - `init_app(state)` - the full route table behind session middleware
//! - `Browser` - carries session cookies between requests, like a real client
#![allow(dead_code)]

use std::collections::BTreeMap;

use actix_http::Request;
use actix_web::{
    App, Error,
    body::MessageBody,
    cookie::{Cookie, Key},
    dev::{Service, ServiceResponse},
    http::{StatusCode, header::{HeaderMap, LOCATION, SET_COOKIE}},
    test, web,
};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use apister::auth::session::session_middleware;
use apister::db;
use apister::models::user::{NewUser, ROLE_USER};
use apister::routes;
use apister::state::AppState;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "admin";

/// URL of the slider list, with or without a query string.
pub const LIST_URL_PATTERN: &str = r"/slider(\?.*)?$";

/// Credentials for the e2e flows, overridable like any fixture login.
pub fn e2e_credentials() -> (String, String) {
    let username = std::env::var("E2E_USERNAME").unwrap_or_else(|_| "user".to_string());
    let password = std::env::var("E2E_PASSWORD").unwrap_or_else(|_| "user".to_string());
    (username, password)
}

// ============================================================================
// APP SETUP
// ============================================================================

/// Fresh in-memory state with `admin/admin` and `user/user` seeded.
pub async fn setup_state() -> AppState {
    let state = AppState::in_memory("apisterApp");
    db::seed_users(state.users.as_ref()).await.expect("Failed to seed users");
    state
}

/// Add an account that cannot sign in (placeholder hash). Returns its id.
pub async fn create_user(state: &AppState, login: &str) -> i64 {
    state
        .users
        .create(&NewUser {
            login: login.to_string(),
            password_hash: "!".to_string(),
            authorities: vec![ROLE_USER.to_string()],
        })
        .await
        .expect("Failed to create user")
}

pub async fn user_id(state: &AppState, login: &str) -> i64 {
    state
        .users
        .find_by_login(login)
        .await
        .expect("user lookup")
        .expect("user exists")
        .id
}

pub async fn init_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(session_middleware(Key::generate()))
            .app_data(web::Data::new(state))
            .configure(routes::configure)
            .default_service(web::to(routes::not_found)),
    )
    .await
}

// ============================================================================
// RESPONSES
// ============================================================================

/// A fully read response.
pub struct Page {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Page {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }

    /// True when an element carries `data-cy="<hook>"`.
    pub fn has_cy(&self, hook: &str) -> bool {
        self.body.contains(&format!("data-cy=\"{hook}\""))
    }

    /// `href` of the first link carrying `data-cy="<hook>"`.
    pub fn link(&self, hook: &str) -> Option<String> {
        let re = Regex::new(&format!(r#"href="([^"]+)"[^>]*data-cy="{hook}""#)).expect("valid regex");
        re.captures(&self.body).map(|c| c[1].to_string())
    }

    pub fn csrf_token(&self) -> String {
        let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]+)""#).expect("valid regex");
        re.captures(&self.body)
            .map(|c| c[1].to_string())
            .expect("page carries a CSRF token")
    }
}

pub fn matches_list_url(url: &str) -> bool {
    Regex::new(LIST_URL_PATTERN).expect("valid regex").is_match(url)
}

// ============================================================================
// BROWSER
// ============================================================================

/// Cookie jar plus request helpers. Every response's `Set-Cookie` headers are
/// absorbed, and an emptied cookie is dropped, as a browser would.
#[derive(Default)]
pub struct Browser {
    cookies: BTreeMap<String, String>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    fn absorb(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            // store the decoded value; `TestRequest::cookie` encodes it again
            let Ok(cookie) = Cookie::parse_encoded(raw.to_string()) else { continue };
            if cookie.value().is_empty() {
                self.cookies.remove(cookie.name());
            } else {
                self.cookies.insert(cookie.name().to_string(), cookie.value().to_string());
            }
        }
    }

    pub async fn send<S, B>(&mut self, app: &S, mut req: test::TestRequest) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
    {
        for (name, value) in &self.cookies {
            req = req.cookie(Cookie::new(name.clone(), value.clone()));
        }
        let resp = test::call_service(app, req.to_request()).await;
        self.absorb(resp.headers());
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = test::read_body(resp).await;
        Page { status, headers, body: String::from_utf8_lossy(&body).into_owned() }
    }

    pub async fn get<S, B>(&mut self, app: &S, uri: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
    {
        self.send(app, test::TestRequest::get().uri(uri)).await
    }

    pub async fn post_form<S, B, T>(&mut self, app: &S, uri: &str, form: &T) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
        T: Serialize,
    {
        self.send(app, test::TestRequest::post().uri(uri).set_form(form)).await
    }

    pub async fn post_json<S, B>(&mut self, app: &S, uri: &str, body: &Value) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
    {
        self.send(app, test::TestRequest::post().uri(uri).set_json(body)).await
    }

    pub async fn put_json<S, B>(&mut self, app: &S, uri: &str, body: &Value) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
    {
        self.send(app, test::TestRequest::put().uri(uri).set_json(body)).await
    }

    /// PATCH with `application/merge-patch+json`.
    pub async fn patch_json<S, B>(&mut self, app: &S, uri: &str, body: &Value) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
    {
        let req = test::TestRequest::patch()
            .uri(uri)
            .insert_header(("content-type", "application/merge-patch+json"))
            .set_payload(body.to_string());
        self.send(app, req).await
    }

    pub async fn delete<S, B>(&mut self, app: &S, uri: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
    {
        self.send(app, test::TestRequest::delete().uri(uri)).await
    }

    /// Sign in through the login form. Panics unless redirected home.
    pub async fn login<S, B>(&mut self, app: &S, username: &str, password: &str)
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
    {
        let page = self.get(app, "/login").await;
        assert_eq!(page.status, StatusCode::OK);
        let token = page.csrf_token();
        let resp = self
            .post_form(
                app,
                "/login",
                &[("username", username), ("password", password), ("csrf_token", token.as_str())],
            )
            .await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER, "login as {username} failed");
        assert_eq!(resp.location(), Some("/"));
    }

    /// Sign in through `POST /api/authenticate`.
    pub async fn api_login<S, B>(&mut self, app: &S, username: &str, password: &str)
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
    {
        let body = serde_json::json!({ "username": username, "password": password });
        let resp = self.post_json(app, "/api/authenticate", &body).await;
        assert_eq!(resp.status, StatusCode::OK, "api login as {username} failed: {}", resp.body);
    }

    /// Create a slider through the API and return its id.
    pub async fn create_slider<S, B>(&mut self, app: &S, presentation: &str, user_id: i64) -> i64
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
    {
        let body = serde_json::json!({ "presentation": presentation, "user": { "id": user_id } });
        let resp = self.post_json(app, "/api/sliders", &body).await;
        assert_eq!(resp.status, StatusCode::CREATED, "create failed: {}", resp.body);
        resp.json()["id"].as_i64().expect("created slider has an id")
    }
}

// ============================================================================
// CLEANUP
// ============================================================================

/// Ids of sliders a test created, deleted through the API at teardown.
///
/// Dropping a guard that still holds ids without calling `run` fails the
/// test, unless the test is already failing.
#[derive(Default)]
pub struct Cleanup {
    ids: Vec<i64>,
}

impl Drop for Cleanup {
    fn drop(&mut self) {
        if !self.ids.is_empty() && !std::thread::panicking() {
            panic!("sliders {:?} were created but never cleaned up", self.ids);
        }
    }
}

impl Cleanup {
    pub fn track(&mut self, id: i64) -> i64 {
        self.ids.push(id);
        id
    }

    pub async fn run<S, B>(mut self, app: &S, browser: &mut Browser)
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
        B: MessageBody,
    {
        for id in std::mem::take(&mut self.ids) {
            let resp = browser.delete(app, &format!("/api/sliders/{id}")).await;
            assert_eq!(resp.status, StatusCode::NO_CONTENT);
        }
    }
}
