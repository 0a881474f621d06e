use uuid::Uuid;

use crate::{auth::jwt::Principal, users::repo_types::Role};

/// Self-or-admin rule for modifying a user record.
pub fn can_mutate(principal: &Principal, target_user_id: Uuid) -> bool {
    principal.role == Role::Admin || principal.user_id == target_user_id
}
