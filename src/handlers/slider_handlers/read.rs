use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::{AppError, render};
use crate::state::AppState;
use crate::templates_structs::{PageContext, SliderDetailTemplate};
use super::helpers::form_template;

/// GET /slider/{id} - detail view, fetched fresh on every request
pub async fn detail(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let slider = state.sliders.find_one(id).await?.ok_or(AppError::NotFound)?;
    let ctx = PageContext::build(&session, &state)?;
    render(SliderDetailTemplate { ctx, slider: slider.into() })
}

/// GET /slider/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let slider = state.sliders.find_one(id).await?.ok_or(AppError::NotFound)?;
    let selected = slider.user_id();
    let presentation = slider.presentation.unwrap_or_default();
    let tmpl = form_template(&state, &session, Some(id), presentation, selected, vec![]).await?;
    render(tmpl)
}
