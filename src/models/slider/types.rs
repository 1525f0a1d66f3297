use serde::{Deserialize, Serialize};

use crate::models::user::UserRef;

/// A slider as stored: the owning user's id plus, when loaded, the joined user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slider {
    pub id: Option<i64>,
    pub presentation: Option<String>,
    pub user_id: Option<i64>,
    pub user: Option<UserRef>,
}

/// Wire shape of a slider for the REST API and the views.
///
/// Every field is optional: an unsaved slider has no `id`, and a PATCH body
/// only carries the fields it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub presentation: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

impl SliderDto {
    /// Login of the related user, or an empty string when there is none.
    pub fn user_login(&self) -> &str {
        self.user.as_ref().map(|u| u.login.as_str()).unwrap_or("")
    }

    pub fn presentation_text(&self) -> &str {
        self.presentation.as_deref().unwrap_or("")
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Field-level validation applied on create and full update.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.presentation.is_none() {
            errors.push("Presentation must not be null".to_string());
        }
        if self.user.is_none() {
            errors.push("User must not be null".to_string());
        }
        errors
    }
}

/// Form data from the create/edit slider pages.
#[derive(Debug, Deserialize)]
pub struct SliderForm {
    pub presentation: String,
    #[serde(default)]
    pub user_id: String,
    pub csrf_token: String,
}
