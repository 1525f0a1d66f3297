use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::{csrf, session::set_flash};
use crate::errors::{AppError, render};
use crate::models::slider::{SliderDto, SliderForm};
use crate::state::AppState;
use super::helpers::{form_template, validate_slider_form};

/// POST /slider/{id}
pub async fn update(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<SliderForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    if !state.sliders.exists(id).await? {
        return Err(AppError::NotFound);
    }

    let dto = match validate_slider_form(&form) {
        Ok(dto) => SliderDto { id: Some(id), ..dto },
        Err(errors) => {
            let selected = form.user_id.trim().parse().ok();
            let tmpl = form_template(&state, &session, Some(id), form.presentation.clone(), selected, errors).await?;
            return render(tmpl);
        }
    };

    let selected = dto.user_id();
    match state.sliders.update(dto).await {
        Ok(Some(_)) => {
            log::info!("Updated slider {id}");
            set_flash(&session, &format!("A Slider is updated with identifier {id}"));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/slider"))
                .finish())
        }
        Ok(None) => Err(AppError::NotFound),
        Err(AppError::BadRequest(alert)) => {
            let tmpl = form_template(&state, &session, Some(id), form.presentation.clone(), selected, vec![alert.message]).await?;
            render(tmpl)
        }
        Err(e) => Err(e),
    }
}
