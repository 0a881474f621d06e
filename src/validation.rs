use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::error::{ApiError, FieldError};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Collects every field problem before rejecting a payload.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trimmed, non-empty string.
    pub fn required(&mut self, field: &str, value: &str) -> String {
        let v = value.trim();
        if v.is_empty() {
            self.errors
                .push(FieldError::new(field, &format!("{field} is required")));
        }
        v.to_string()
    }

    /// Non-empty, taken verbatim. Used for passwords.
    pub fn present(&mut self, field: &str, value: &str) -> String {
        if value.is_empty() {
            self.errors
                .push(FieldError::new(field, &format!("{field} is required")));
        }
        value.to_string()
    }

    /// Trimmed and lowercased.
    pub fn email(&mut self, field: &str, value: &str) -> String {
        let v = value.trim().to_lowercase();
        if v.is_empty() {
            self.errors
                .push(FieldError::new(field, &format!("{field} is required")));
        } else if !is_valid_email(&v) {
            self.errors
                .push(FieldError::new(field, &format!("{field} must be a valid email")));
        }
        v
    }

    pub fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn finish<T>(self, value: T) -> Result<T, ApiError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

/// JSON body extractor whose rejections (malformed JSON, unknown fields,
/// wrong content type) use the same 400 envelope as field validation.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                warn!(error = %rejection, "request body rejected");
                ApiError::Validation(vec![FieldError::new("body", &rejection.body_text())])
            })?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@nodot"));
    }

    #[test]
    fn collects_all_errors() {
        let mut c = Checks::new();
        c.email("email", "  ");
        c.required("fullName", "");
        c.present("password", "");
        match c.finish(()) {
            Err(ApiError::Validation(errs)) => {
                let fields: Vec<_> = errs.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["email", "fullName", "password"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn email_is_normalized() {
        let mut c = Checks::new();
        let v = c.email("email", "  Jane@Example.COM ");
        assert_eq!(v, "jane@example.com");
        assert!(c.finish(()).is_ok());
    }

    #[test]
    fn password_is_not_trimmed() {
        let mut c = Checks::new();
        assert_eq!(c.present("password", " pw "), " pw ");
    }
}
