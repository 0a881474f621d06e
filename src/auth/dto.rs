use serde::{Deserialize, Serialize};

use crate::{error::ApiError, users::dto::PublicUser, validation::Checks};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Validated login input. Never persisted.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Registration, ApiError> {
        let mut checks = Checks::new();
        let email = checks.email("email", &self.email);
        let full_name = checks.required("fullName", &self.full_name);
        let password = checks.present("password", &self.password);
        checks.finish(Registration {
            email,
            password,
            full_name,
        })
    }
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, ApiError> {
        let mut checks = Checks::new();
        let email = checks.email("email", &self.email);
        let password = checks.present("password", &self.password);
        checks.finish(Credentials { email, password })
    }
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: PublicUser,
    pub token: String,
}
