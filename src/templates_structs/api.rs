use serde::{Deserialize, Serialize};

use crate::errors::BadRequestAlert;

/// Problem body returned with every 400 from the REST resource.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub title: String,
    pub entity_name: String,
    pub error_key: String,
    pub status: u16,
}

impl From<&BadRequestAlert> for ApiErrorResponse {
    fn from(alert: &BadRequestAlert) -> Self {
        ApiErrorResponse {
            title: alert.message.clone(),
            entity_name: alert.entity_name.to_string(),
            error_key: alert.error_key.to_string(),
            status: 400,
        }
    }
}

/// Credentials posted to `/api/authenticate`.
#[derive(Deserialize, Debug)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct AccountResponse {
    pub id: i64,
    pub login: String,
    pub authorities: Vec<String>,
}
