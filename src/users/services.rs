use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{access::can_mutate, jwt::Principal, password::PasswordHasher},
    error::ServiceError,
    state::AppState,
    users::{
        dto::{ListParams, NewAccount, MAX_LIMIT},
        repo::UserStore,
        repo_types::{NewUser, Paging, Role, User, UserChanges},
    },
};

#[derive(Debug)]
pub struct Page {
    pub items: Vec<User>,
    pub paging: Paging,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone(), state.hasher.clone())
    }
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    pub async fn get_list(&self, params: ListParams) -> Result<Page, ServiceError> {
        let page = params.page.max(1);
        let limit = params.limit.clamp(1, MAX_LIMIT);
        let (items, total) = self.users.list(&params.filter, page, limit).await?;
        let paging = Paging::new(page, limit, items.len(), total);
        Ok(Page { items, paging })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User, ServiceError> {
        self.users.find_by_id(id).await?.ok_or(ServiceError::NotFound)
    }

    /// Admin-create. Role defaults to USER.
    pub async fn create(&self, input: NewAccount) -> Result<User, ServiceError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            warn!(email = %input.email, "email already registered");
            return Err(ServiceError::EmailExisted);
        }

        let password_hash = self.hasher.hash_blocking(input.password).await?;
        let user = self
            .users
            .insert(NewUser {
                email: input.email,
                password_hash,
                full_name: input.full_name,
                role: input.role.unwrap_or(Role::User),
            })
            .await?;

        info!(user_id = %user.id, role = ?user.role, "user created");
        Ok(user)
    }

    /// Self-or-admin. Only admins may change a role. Permission is decided
    /// before the store is touched.
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<User, ServiceError> {
        if !can_mutate(principal, id) {
            warn!(actor = %principal.user_id, target = %id, "update refused");
            return Err(ServiceError::NoAccessPermission);
        }
        if changes.role.is_some() && principal.role != Role::Admin {
            warn!(actor = %principal.user_id, "role change refused");
            return Err(ServiceError::NoAccessPermission);
        }

        if self.users.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }

        let user = self.users.update(id, changes).await?;
        info!(actor = %principal.user_id, user_id = %user.id, "user updated");
        Ok(user)
    }
}
