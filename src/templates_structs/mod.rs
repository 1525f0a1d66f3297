// Template context structures for Askama templates, organized by page family.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{Authorities, get_authorities, get_login, take_flash};
use crate::errors::AppError;
use crate::state::AppState;

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.login`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub login: String,
    pub avatar_initial: String,
    pub authorities: Authorities,
    pub flash: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, state: &AppState) -> Result<Self, AppError> {
        let login = get_login(session)?;
        let authorities = get_authorities(session);
        let flash = take_flash(session);
        let csrf_token = csrf::get_or_create_token(session);
        let avatar_initial = login.chars().next().unwrap_or('?').to_uppercase().to_string();
        Ok(Self {
            login,
            avatar_initial,
            authorities,
            flash,
            app_name: state.app_name.clone(),
            csrf_token,
        })
    }
}

mod api;
mod common;
mod slider;

pub use self::api::{AccountResponse, ApiErrorResponse, AuthenticateRequest};
pub use self::common::{HomeTemplate, LoginTemplate};
pub use self::slider::{
    PageLink, page_links, SliderDeleteTemplate, SliderDetailTemplate, SliderFormTemplate, SliderListTemplate,
    SliderView, UserOption,
};
