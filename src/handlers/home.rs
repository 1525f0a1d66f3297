use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::{AppError, render};
use crate::state::AppState;
use crate::templates_structs::{HomeTemplate, PageContext};

pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &state)?;
    let slider_count = state.sliders.count_all().await?;
    render(HomeTemplate { ctx, slider_count })
}
