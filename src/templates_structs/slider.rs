use askama::Template;

use crate::models::slider::SliderDto;
use crate::models::user::UserRef;
use super::PageContext;

/// A slider flattened for display. Missing text renders as an empty string.
#[derive(Debug, Clone)]
pub struct SliderView {
    pub id: i64,
    pub presentation: String,
    pub user_id: Option<i64>,
    pub user_login: String,
}

impl From<SliderDto> for SliderView {
    fn from(dto: SliderDto) -> Self {
        SliderView {
            id: dto.id.unwrap_or_default(),
            presentation: dto.presentation.unwrap_or_default(),
            user_id: dto.user.as_ref().map(|u| u.id),
            user_login: dto.user.map(|u| u.login).unwrap_or_default(),
        }
    }
}

/// One entry of the pager below the list table.
pub struct PageLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "slider/list.html")]
pub struct SliderListTemplate {
    pub ctx: PageContext,
    pub sliders: Vec<SliderView>,
    pub total: i64,
    pub size: i64,
    pub sort_field: String,
    pub sort_dir: String,
    pub pages: Vec<PageLink>,
}

impl SliderListTemplate {
    /// Link for a column header: flips the direction when already sorted by `field`.
    pub fn sort_href(&self, field: &str) -> String {
        let dir = if self.sort_field == field && self.sort_dir == "asc" { "desc" } else { "asc" };
        format!("/slider?page=0&size={}&sort={field},{dir}", self.size)
    }

    pub fn sort_marker(&self, field: &str) -> &'static str {
        match (self.sort_field == field, self.sort_dir.as_str()) {
            (true, "desc") => "▼",
            (true, _) => "▲",
            _ => "",
        }
    }
}

/// Pages shown on either side of the current one.
const PAGER_RADIUS: i64 = 5;

/// Pager entries around `current`, out of `total_pages` pages shown `size` rows at a time.
pub fn page_links(current: i64, size: i64, total_pages: i64, sort: &str) -> Vec<PageLink> {
    let last = total_pages - 1;
    let centre = current.min(last).max(0);
    let start = centre.saturating_sub(PAGER_RADIUS).max(0);
    let end = centre.saturating_add(PAGER_RADIUS).min(last);
    (start..=end)
        .map(|p| PageLink {
            label: (p + 1).to_string(),
            href: format!("/slider?page={p}&size={size}&sort={sort}"),
            active: p == current,
        })
        .collect()
}

/// Entry of the user dropdown on the slider form.
pub struct UserOption {
    pub id: i64,
    pub login: String,
    pub selected: bool,
}

impl UserOption {
    pub fn from_refs(users: Vec<UserRef>, selected: Option<i64>) -> Vec<UserOption> {
        users
            .into_iter()
            .map(|u| UserOption { selected: Some(u.id) == selected, id: u.id, login: u.login })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "slider/form.html")]
pub struct SliderFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub slider_id: Option<i64>,
    pub presentation: String,
    pub users: Vec<UserOption>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "slider/detail.html")]
pub struct SliderDetailTemplate {
    pub ctx: PageContext,
    pub slider: SliderView,
}

#[derive(Template)]
#[template(path = "slider/delete.html")]
pub struct SliderDeleteTemplate {
    pub ctx: PageContext,
    pub slider: SliderView,
}
