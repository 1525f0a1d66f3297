//! JSON REST resources under `/api`.

pub mod sliders;

use actix_web::{middleware::from_fn, web};

use crate::auth::middleware::{require_api_auth, require_json_content_type};
use crate::handlers::auth_handlers;

/// Configure `/api` routes. `/authenticate` is public; everything else needs a session.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/authenticate", web::post().to(auth_handlers::api_authenticate));
    cfg.service(
        web::scope("")
            .wrap(from_fn(require_json_content_type))
            .wrap(from_fn(require_api_auth))
            .route("/account", web::get().to(auth_handlers::api_account))
            // /sliders/count BEFORE /sliders/{id}
            .route("/sliders", web::get().to(sliders::list))
            .route("/sliders", web::post().to(sliders::create))
            .route("/sliders/count", web::get().to(sliders::count))
            .route("/sliders/{id}", web::get().to(sliders::read))
            .route("/sliders/{id}", web::put().to(sliders::update))
            .route("/sliders/{id}", web::patch().to(sliders::partial_update))
            .route("/sliders/{id}", web::delete().to(sliders::delete)),
    );
}
