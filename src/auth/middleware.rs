use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    middleware::Next,
};

fn is_signed_in(req: &ServiceRequest) -> bool {
    req.get_session().get::<i64>("user_id").unwrap_or(None).is_some()
}

/// Middleware function that checks for an authenticated session.
/// Redirects to /login if no session found.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if !is_signed_in(&req) {
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// API flavour of `require_auth`: answers 401 with a JSON body instead of redirecting.
pub async fn require_api_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if !is_signed_in(&req) {
        log::debug!("Rejected unauthenticated API request to {}", req.path());
        let body = serde_json::json!({
            "title": "Unauthorized",
            "status": 401,
            "detail": "Full authentication is required to access this resource"
        });
        let response = HttpResponse::Unauthorized().json(body);
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Reject mutation requests whose body is not JSON. PATCH also accepts
/// `application/merge-patch+json`.
pub async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == Method::POST || method == Method::PUT || method == Method::PATCH {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !accepts_content_type(&method, content_type) {
            let body = serde_json::json!({
                "title": "Unsupported Media Type",
                "status": 415,
                "detail": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::UnsupportedMediaType().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

fn accepts_content_type(method: &Method, content_type: &str) -> bool {
    content_type.starts_with("application/json")
        || (*method == Method::PATCH && content_type.starts_with("application/merge-patch+json"))
}
