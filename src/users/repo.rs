use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, User, UserChanges, UserFilter};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already in use")]
    UniqueViolation,
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::UniqueViolation,
            other => StoreError::Database(anyhow::Error::new(other)),
        }
    }
}

/// Persistence seam for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::UniqueViolation`] when the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no row has `id`.
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, StoreError>;

    /// Newest first. `page` is 1-based.
    async fn list(
        &self,
        filter: &UserFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), StoreError>;
}

const USER_COLUMNS: &str =
    "id, email, password_hash, full_name, role, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn like_pattern(q: &str) -> String {
    let escaped = q
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, full_name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET email      = COALESCE($2, email),
                   full_name  = COALESCE($3, full_name),
                   role       = COALESCE($4, role),
                   is_active  = COALESCE($5, is_active),
                   updated_at = now()
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.email)
        .bind(changes.full_name)
        .bind(changes.role)
        .bind(changes.is_active)
        .fetch_optional(&self.db)
        .await?;
        user.ok_or(StoreError::NotFound)
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), StoreError> {
        let pattern = filter.q.as_deref().map(like_pattern);
        let offset = (page.max(1) - 1).saturating_mul(limit);

        let items = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
              FROM users
             WHERE ($1::bool IS NULL OR is_active = $1)
               AND ($2::text IS NULL OR email ILIKE $2 OR full_name ILIKE $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4
            "#
        ))
        .bind(filter.is_active)
        .bind(pattern.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
              FROM users
             WHERE ($1::bool IS NULL OR is_active = $1)
               AND ($2::text IS NULL OR email ILIKE $2 OR full_name ILIKE $2)
            "#,
        )
        .bind(filter.is_active)
        .bind(pattern.as_deref())
        .fetch_one(&self.db)
        .await?;

        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ann"), "%ann%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn other_sqlx_errors_are_kept_as_database_faults() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
