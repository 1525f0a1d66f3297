use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::{AppError, render};
use crate::models::pagination::{PageRequest, SortDir, SortOrder, total_pages};
use crate::models::slider::SliderCriteria;
use crate::state::AppState;
use crate::templates_structs::{PageContext, SliderListTemplate, SliderView, page_links};

/// GET /slider - paginated slider table
pub async fn list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &state)?;

    let mut page = PageRequest::from_pairs(&query);
    if page.sort.is_empty() {
        page.sort.push(SortOrder { property: "id".to_string(), dir: SortDir::Asc });
    }
    let (sort_field, sort_dir) = page
        .sort
        .first()
        .map(|o| (o.property.clone(), o.dir.as_sql().to_ascii_lowercase()))
        .unwrap_or_else(|| ("id".to_string(), "asc".to_string()));

    let criteria = SliderCriteria::default();
    let total = state.sliders.count_by_criteria(&criteria).await?;
    let sliders: Vec<SliderView> = state
        .sliders
        .find_by_criteria(&criteria, &page)
        .await?
        .into_iter()
        .map(SliderView::from)
        .collect();

    let sort_param = format!("{sort_field},{sort_dir}");
    let pages = page_links(page.page, page.size, total_pages(total, page.size), &sort_param);

    let tmpl = SliderListTemplate {
        ctx,
        sliders,
        total,
        size: page.size,
        sort_field,
        sort_dir,
        pages,
    };
    render(tmpl)
}
