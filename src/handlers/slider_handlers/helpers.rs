use actix_session::Session;

use crate::auth::validate;
use crate::errors::AppError;
use crate::models::slider::{SliderDto, SliderForm};
use crate::models::user::UserRef;
use crate::state::AppState;
use crate::templates_structs::{PageContext, SliderFormTemplate, UserOption};

pub const PRESENTATION_MAX_LEN: usize = 4000;

/// Validate the slider form. On success returns the DTO to save (without id).
pub fn validate_slider_form(form: &SliderForm) -> Result<SliderDto, Vec<String>> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.presentation, "Presentation", PRESENTATION_MAX_LEN));
    let user_id = match validate::validate_required_id(&form.user_id, "User") {
        Ok(id) => Some(id),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    match user_id {
        Some(id) if errors.is_empty() => Ok(SliderDto {
            id: None,
            presentation: Some(form.presentation.clone()),
            user: Some(UserRef { id, login: String::new() }),
        }),
        _ => Err(errors),
    }
}

/// Build the create/edit form, with the user dropdown preselected.
pub async fn form_template(
    state: &AppState,
    session: &Session,
    slider_id: Option<i64>,
    presentation: String,
    selected_user: Option<i64>,
    errors: Vec<String>,
) -> Result<SliderFormTemplate, AppError> {
    let ctx = PageContext::build(session, state)?;
    let users = UserOption::from_refs(state.sliders.user_options().await?, selected_user);
    let form_action = match slider_id {
        Some(id) => format!("/slider/{id}"),
        None => "/slider".to_string(),
    };
    Ok(SliderFormTemplate { ctx, form_action, slider_id, presentation, users, errors })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(presentation: &str, user_id: &str) -> SliderForm {
        SliderForm {
            presentation: presentation.to_string(),
            user_id: user_id.to_string(),
            csrf_token: "t".to_string(),
        }
    }

    #[test]
    fn valid_form_keeps_presentation_verbatim() {
        let dto = validate_slider_form(&form(" trop membre de l'équipe ", "3")).unwrap();
        assert_eq!(dto.presentation.as_deref(), Some(" trop membre de l'équipe "));
        assert_eq!(dto.user_id(), Some(3));
        assert_eq!(dto.id, None);
    }

    #[test]
    fn collects_every_error() {
        let errors = validate_slider_form(&form("", "")).unwrap_err();
        assert_eq!(errors, vec!["Presentation is required".to_string(), "User is required".to_string()]);
    }
}
