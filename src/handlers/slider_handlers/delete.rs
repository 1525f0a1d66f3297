use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::{csrf, session::set_flash};
use crate::errors::{AppError, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::state::AppState;
use crate::templates_structs::{PageContext, SliderDeleteTemplate};

/// GET /slider/{id}/delete - confirmation dialog
pub async fn confirm_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let slider = state.sliders.find_one(id).await?.ok_or(AppError::NotFound)?;
    let ctx = PageContext::build(&session, &state)?;
    render(SliderDeleteTemplate { ctx, slider: slider.into() })
}

/// POST /slider/{id}/delete
pub async fn delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    state.sliders.delete(id).await?;
    log::info!("Deleted slider {id}");
    set_flash(&session, &format!("A Slider is deleted with identifier {id}"));

    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/slider"))
        .finish())
}
