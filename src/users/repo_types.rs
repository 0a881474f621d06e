use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Role granted to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 PHC string, never plaintext
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Row to insert; `password_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring matched against email and full name.
    pub q: Option<String>,
    pub is_active: Option<bool>,
}

/// Paging summary for a list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paging {
    pub current_page: i64,
    /// Items on this page.
    pub total_item: i64,
    pub total_page: i64,
    pub total: i64,
}

impl Paging {
    pub fn new(page: i64, limit: i64, on_page: usize, total: i64) -> Self {
        Self {
            current_page: page,
            total_item: on_page as i64,
            total_page: if limit > 0 { (total + limit - 1) / limit } else { 0 },
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_page_rounds_up() {
        assert_eq!(Paging::new(1, 10, 10, 25).total_page, 3);
        assert_eq!(Paging::new(1, 10, 10, 30).total_page, 3);
        assert_eq!(Paging::new(1, 10, 0, 0).total_page, 0);
    }

    #[test]
    fn role_uses_uppercase_on_the_wire() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::from_str::<Role>("\"USER\"").unwrap(), Role::User);
        assert!(serde_json::from_str::<Role>("\"ROOT\"").is_err());
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.co".into(),
            password_hash: "$argon2id$secret".into(),
            full_name: "A".into(),
            role: Role::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
    }
}
