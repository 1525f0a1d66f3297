use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Internal user record for authentication, including the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub authorities: Vec<String>,
}

/// The slice of a user that other entities embed: id plus display login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    #[serde(default)]
    pub login: String,
}

impl From<&User> for UserRef {
    fn from(u: &User) -> Self {
        UserRef { id: u.id, login: u.login.clone() }
    }
}

/// New user data for creation.
pub struct NewUser {
    pub login: String,
    pub password_hash: String,
    pub authorities: Vec<String>,
}

pub fn authorities_to_csv(authorities: &[String]) -> String {
    authorities.join(",")
}

pub fn authorities_from_csv(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
