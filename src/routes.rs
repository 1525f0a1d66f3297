use actix_web::{HttpResponse, middleware::from_fn, web};

use crate::auth::middleware::require_auth;
use crate::errors::NOT_FOUND_PAGE;
use crate::handlers::{api, auth_handlers, home, slider_handlers};

/// Register every application route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Public routes
    cfg.route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        // JSON API, registered before the catch-all protected scope
        .service(web::scope("/api").configure(api::configure))
        // Protected routes
        .service(
            web::scope("")
                .wrap(from_fn(require_auth))
                .route("/", web::get().to(home::index))
                .route("/logout", web::post().to(auth_handlers::logout))
                // /slider/new BEFORE /slider/{id} to avoid routing conflict
                .route("/slider", web::get().to(slider_handlers::list))
                .route("/slider", web::post().to(slider_handlers::create))
                .route("/slider/new", web::get().to(slider_handlers::new_form))
                .route("/slider/{id}", web::get().to(slider_handlers::detail))
                .route("/slider/{id}", web::post().to(slider_handlers::update))
                .route("/slider/{id}/view", web::get().to(slider_handlers::detail))
                .route("/slider/{id}/edit", web::get().to(slider_handlers::edit_form))
                .route("/slider/{id}/delete", web::get().to(slider_handlers::confirm_delete))
                .route("/slider/{id}/delete", web::post().to(slider_handlers::delete)),
        );
}

/// Fallback for unmatched paths (must be registered last).
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(NOT_FOUND_PAGE)
}
