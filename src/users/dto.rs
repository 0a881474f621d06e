use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    error::ApiError,
    users::repo_types::{Paging, Role, User, UserChanges, UserFilter},
    validation::Checks,
};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            role: u.role,
            is_active: u.is_active,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserPage {
    pub data: Vec<PublicUser>,
    pub paging: Paging,
}

/// Query string of `GET /users`. Kept as raw strings so every problem is
/// reported in one response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub q: Option<String>,
    pub is_active: Option<String>,
}

/// Validated list parameters.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub filter: UserFilter,
    pub page: i64,
    pub limit: i64,
}

impl ListQuery {
    pub fn validate(self) -> Result<ListParams, ApiError> {
        let mut checks = Checks::new();

        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => match raw.parse::<i64>() {
                Ok(p) if p >= 1 => p,
                _ => {
                    checks.fail("page", "page must be an integer of at least 1");
                    1
                }
            },
        };

        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_LIMIT,
            Some(raw) => match raw.parse::<i64>() {
                Ok(l) if (1..=MAX_LIMIT).contains(&l) => l,
                _ => {
                    checks.fail("limit", "limit must be an integer between 1 and 100");
                    DEFAULT_LIMIT
                }
            },
        };

        // The store skips (page - 1) * limit rows; that product must fit in an i64.
        if (page - 1).checked_mul(limit).is_none() {
            checks.fail("page", "page is too large");
        }

        let is_active = match self.is_active.as_deref() {
            None | Some("") => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(_) => {
                checks.fail("isActive", "isActive must be one of [true, false]");
                None
            }
        };

        let q = self
            .q
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        checks.finish(ListParams {
            filter: UserFilter { q, is_active },
            page,
            limit,
        })
    }
}

/// Body of the admin-only `POST /users`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Option<Role>,
}

/// Validated admin-create input.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Option<Role>,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewAccount, ApiError> {
        let mut checks = Checks::new();
        let email = checks.email("email", &self.email);
        let password = checks.present("password", &self.password);
        let full_name = checks.required("fullName", &self.full_name);
        checks.finish(NewAccount {
            email,
            password,
            full_name,
            role: self.role,
        })
    }
}

/// Body of `PATCH /users/:id`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<UserChanges, ApiError> {
        let mut checks = Checks::new();
        let email = self.email.map(|e| checks.email("email", &e));
        let full_name = self.full_name.map(|n| checks.required("fullName", &n));
        checks.finish(UserChanges {
            email,
            full_name,
            role: self.role,
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let mut q = ListQuery::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "page" => q.page = v,
                "limit" => q.limit = v,
                "q" => q.q = v,
                "isActive" => q.is_active = v,
                _ => unreachable!(),
            }
        }
        q
    }

    #[test]
    fn list_defaults() {
        let p = ListQuery::default().validate().unwrap();
        assert_eq!((p.page, p.limit), (1, DEFAULT_LIMIT));
        assert!(p.filter.q.is_none());
        assert!(p.filter.is_active.is_none());
    }

    #[test]
    fn list_parses_filters() {
        let p = query(&[("page", "3"), ("limit", "25"), ("q", "  ann "), ("isActive", "false")])
            .validate()
            .unwrap();
        assert_eq!((p.page, p.limit), (3, 25));
        assert_eq!(p.filter.q.as_deref(), Some("ann"));
        assert_eq!(p.filter.is_active, Some(false));
    }

    #[test]
    fn blank_search_and_flag_are_ignored() {
        let p = query(&[("q", "   "), ("isActive", "")]).validate().unwrap();
        assert!(p.filter.q.is_none());
        assert!(p.filter.is_active.is_none());
    }

    #[test]
    fn list_rejects_out_of_range_values() {
        let res = query(&[("page", "0"), ("limit", "101"), ("isActive", "yes")]).validate();
        match res {
            Err(ApiError::Validation(errs)) => {
                let fields: Vec<_> = errs.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["page", "limit", "isActive"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn page_whose_offset_overflows_is_rejected() {
        let res = query(&[("page", &i64::MAX.to_string()), ("limit", "100")]).validate();
        match res {
            Err(ApiError::Validation(errs)) => {
                assert_eq!(errs.len(), 1);
                assert_eq!(errs[0].field, "page");
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // The largest page at limit 1 still has a representable offset.
        let p = query(&[("page", &i64::MAX.to_string()), ("limit", "1")])
            .validate()
            .unwrap();
        assert_eq!(p.page, i64::MAX);
    }

    #[test]
    fn create_request_accepts_optional_role() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"email":"a@b.co","password":"pw","fullName":"A","role":"ADMIN"}"#,
        )
        .unwrap();
        assert_eq!(req.validate().unwrap().role, Some(Role::Admin));
    }

    #[test]
    fn update_request_validates_only_present_fields() {
        let changes: UpdateUserRequest = serde_json::from_str(r#"{"isActive":false}"#).unwrap();
        let changes = changes.validate().unwrap();
        assert_eq!(changes.is_active, Some(false));
        assert!(changes.email.is_none());

        let bad: UpdateUserRequest = serde_json::from_str(r#"{"fullName":"  "}"#).unwrap();
        assert!(matches!(bad.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn public_user_hides_hash_and_uses_camel_case() {
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".into(),
            password_hash: "$argon2id$hash".into(),
            full_name: "Test User".into(),
            role: Role::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"isActive\":true"));
        assert!(!json.contains("argon2id"));
    }
}
