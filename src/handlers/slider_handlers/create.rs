use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::{csrf, session::set_flash};
use crate::errors::{AppError, render};
use crate::models::slider::SliderForm;
use crate::state::AppState;
use super::helpers::{form_template, validate_slider_form};

/// GET /slider/new
pub async fn new_form(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let tmpl = form_template(&state, &session, None, String::new(), None, vec![]).await?;
    render(tmpl)
}

/// POST /slider
pub async fn create(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<SliderForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let dto = match validate_slider_form(&form) {
        Ok(dto) => dto,
        Err(errors) => {
            let selected = form.user_id.trim().parse().ok();
            let tmpl = form_template(&state, &session, None, form.presentation.clone(), selected, errors).await?;
            return render(tmpl);
        }
    };

    let selected = dto.user_id();
    match state.sliders.save(dto).await {
        Ok(saved) => {
            let id = saved.id.unwrap_or_default();
            log::info!("Created slider {id}");
            set_flash(&session, &format!("A new Slider is created with identifier {id}"));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/slider"))
                .finish())
        }
        Err(AppError::BadRequest(alert)) => {
            let tmpl = form_template(&state, &session, None, form.presentation.clone(), selected, vec![alert.message]).await?;
            render(tmpl)
        }
        Err(e) => Err(e),
    }
}
