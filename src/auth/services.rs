use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{error, info, warn};

use crate::{
    auth::{
        dto::{Credentials, Registration},
        jwt::JwtKeys,
        password::PasswordHasher,
    },
    error::ServiceError,
    state::AppState,
    users::{
        repo::{StoreError, UserStore},
        repo_types::{NewUser, Role, User},
    },
};

/// A successful login.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

/// Registration and login. The returned [`User`] still carries the password
/// hash; transport code must serialize a public view of it.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    keys: JwtKeys,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone(), state.hasher.clone(), state.keys.clone())
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, keys: JwtKeys) -> Self {
        Self {
            users,
            hasher,
            keys,
        }
    }

    pub async fn register(&self, input: Registration) -> Result<User, ServiceError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            warn!(email = %input.email, "email already registered");
            return Err(ServiceError::EmailExisted);
        }

        let password_hash = self.hasher.hash_blocking(input.password).await?;

        let new_user = NewUser {
            email: input.email,
            password_hash,
            full_name: input.full_name,
            role: Role::User,
        };

        // The pre-check above can race another registration; the store's
        // unique index decides.
        let user = match self.users.insert(new_user).await {
            Ok(u) => u,
            Err(StoreError::UniqueViolation) => {
                warn!("email taken by concurrent registration");
                return Err(ServiceError::EmailExisted);
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(user)
    }

    /// Checks run in a fixed order: existence, activity, password, signing.
    /// The first failing check decides the error.
    pub async fn login(&self, creds: Credentials) -> Result<LoginOutcome, ServiceError> {
        let user = match self.users.find_by_email(&creds.email).await? {
            Some(u) => u,
            None => {
                warn!(email = %creds.email, "login unknown email");
                return Err(ServiceError::NotFound);
            }
        };

        if !user.is_active {
            warn!(user_id = %user.id, "login on deactivated account");
            return Err(ServiceError::NoPermission);
        }

        let ok = self
            .hasher
            .verify_blocking(creds.password, user.password_hash.clone())
            .await?;
        if !ok {
            warn!(user_id = %user.id, "login invalid password");
            return Err(ServiceError::EmailPasswordNotMatch);
        }

        let token = self.keys.issue(&user).map_err(|e| {
            error!(error = %e, user_id = %user.id, "jwt sign failed");
            ServiceError::AuthorizationFailed
        })?;

        info!(user_id = %user.id, "user logged in");
        Ok(LoginOutcome { user, token })
    }
}
