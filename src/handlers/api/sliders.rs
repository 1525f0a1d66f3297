use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::{ALERT_APP_NAME, AppError, BadRequestAlert};
use crate::models::pagination::{PageRequest, link_header};
use crate::models::slider::{CriteriaError, ENTITY_NAME, SliderCriteria, SliderDto};
use crate::state::AppState;

/// `X-…-alert` / `X-…-params` pair announcing a successful mutation.
fn alert_headers(action: &str, id: i64) -> [(String, String); 2] {
    [
        (format!("X-{ALERT_APP_NAME}-alert"), format!("{ALERT_APP_NAME}.{ENTITY_NAME}.{action}")),
        (format!("X-{ALERT_APP_NAME}-params"), id.to_string()),
    ]
}

fn bad_request(message: &str, error_key: &'static str) -> AppError {
    BadRequestAlert::new(message, ENTITY_NAME, error_key).into()
}

fn invalid_criteria(e: CriteriaError) -> AppError {
    bad_request(&e.to_string(), "invalidcriteria")
}

fn validate(dto: &SliderDto) -> Result<(), AppError> {
    let errors = dto.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(bad_request(&errors.join("; "), "validation"))
    }
}

/// PUT and PATCH share these checks on the body id.
async fn check_target(state: &AppState, path_id: i64, dto: &SliderDto) -> Result<i64, AppError> {
    let Some(id) = dto.id else {
        return Err(bad_request("Invalid id", "idnull"));
    };
    if id != path_id {
        return Err(bad_request("Invalid ID", "idinvalid"));
    }
    if !state.sliders.exists(id).await? {
        return Err(bad_request("Entity not found", "idnotfound"));
    }
    Ok(id)
}

/// Absolute URL of the request path, used as the base of `Link` entries.
fn collection_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), req.path())
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "title": "Not Found",
        "status": 404,
        "entityName": ENTITY_NAME
    }))
}

/// GET /api/sliders - filtered, sorted page with `X-Total-Count` and `Link` headers
pub async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let pairs = query.into_inner();
    let criteria = SliderCriteria::from_pairs(&pairs).map_err(invalid_criteria)?;
    log::debug!("REST request to get Sliders by criteria: {criteria:?}");
    let page = PageRequest::from_pairs(&pairs);

    let total = state.sliders.count_by_criteria(&criteria).await?;
    let body = state.sliders.find_by_criteria(&criteria, &page).await?;
    let link = link_header(&collection_url(&req), &pairs, &page, total);

    Ok(HttpResponse::Ok()
        .insert_header(("X-Total-Count", total.to_string()))
        .insert_header(("Link", link))
        .json(body))
}

/// GET /api/sliders/count
pub async fn count(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let criteria = SliderCriteria::from_pairs(&query).map_err(invalid_criteria)?;
    log::debug!("REST request to count Sliders by criteria: {criteria:?}");
    let total = state.sliders.count_by_criteria(&criteria).await?;
    Ok(HttpResponse::Ok().json(total))
}

/// GET /api/sliders/{id}
pub async fn read(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::debug!("REST request to get Slider : {id}");
    match state.sliders.find_one(id).await? {
        Some(dto) => Ok(HttpResponse::Ok().json(dto)),
        None => Ok(not_found()),
    }
}

/// POST /api/sliders - 201 with `Location`; a body carrying an id is rejected
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<SliderDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();
    log::debug!("REST request to save Slider : {dto:?}");
    validate(&dto)?;
    if dto.id.is_some() {
        return Err(bad_request("A new slider cannot already have an ID", "idexists"));
    }

    let saved = state.sliders.save(dto).await?;
    let id = saved.id.unwrap_or_default();
    let mut resp = HttpResponse::Created();
    resp.insert_header(("Location", format!("/api/sliders/{id}")));
    for header in alert_headers("created", id) {
        resp.insert_header(header);
    }
    Ok(resp.json(saved))
}

/// PUT /api/sliders/{id} - full replacement
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<SliderDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();
    log::debug!("REST request to update Slider : {}, {dto:?}", *path);
    validate(&dto)?;
    let id = check_target(&state, path.into_inner(), &dto).await?;

    let updated = state
        .sliders
        .update(dto)
        .await?
        .ok_or_else(|| bad_request("Entity not found", "idnotfound"))?;
    let mut resp = HttpResponse::Ok();
    for header in alert_headers("updated", id) {
        resp.insert_header(header);
    }
    Ok(resp.json(updated))
}

/// PATCH /api/sliders/{id} - merge only the fields present in the body
pub async fn partial_update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<SliderDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();
    log::debug!("REST request to partial update Slider partially : {}, {dto:?}", *path);
    let id = check_target(&state, path.into_inner(), &dto).await?;

    match state.sliders.partial_update(dto).await? {
        Some(updated) => {
            let mut resp = HttpResponse::Ok();
            for header in alert_headers("updated", id) {
                resp.insert_header(header);
            }
            Ok(resp.json(updated))
        }
        None => Ok(not_found()),
    }
}

/// DELETE /api/sliders/{id} - 204, also when nothing was stored under `id`
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::debug!("REST request to delete Slider : {id}");
    state.sliders.delete(id).await?;
    let mut resp = HttpResponse::NoContent();
    for header in alert_headers("deleted", id) {
        resp.insert_header(header);
    }
    Ok(resp.finish())
}
