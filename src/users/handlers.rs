use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::extractors::{AdminUser, AuthUser},
    error::ApiError,
    response::{created, ok, Envelope},
    state::AppState,
    validation::ValidJson,
    users::{
        dto::{CreateUserRequest, ListQuery, PublicUser, UpdateUserRequest, UserPage},
        services::UserService,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).patch(update_user))
}

#[instrument(skip(service, _auth))]
pub async fn list_users(
    State(service): State<UserService>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<(StatusCode, Json<Envelope<UserPage>>), ApiError> {
    let params = query.validate()?;
    let page = service.get_list(params).await?;
    Ok(ok(
        UserPage {
            data: page.items.into_iter().map(PublicUser::from).collect(),
            paging: page.paging,
        },
        "Get user list successfully",
    ))
}

#[instrument(skip(service, _auth))]
pub async fn get_user(
    State(service): State<UserService>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Envelope<PublicUser>>), ApiError> {
    let user = service.get_by_id(id).await?;
    Ok(ok(PublicUser::from(user), "Get user detail successfully"))
}

#[instrument(skip(service, _admin, payload))]
pub async fn create_user(
    State(service): State<UserService>,
    _admin: AdminUser,
    ValidJson(payload): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<Envelope<PublicUser>>), ApiError> {
    let input = payload.validate()?;
    let user = service.create(input).await?;
    Ok(created(PublicUser::from(user), "Create user successfully"))
}

#[instrument(skip(service, principal, payload))]
pub async fn update_user(
    State(service): State<UserService>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(payload): ValidJson<UpdateUserRequest>,
) -> Result<(StatusCode, Json<Envelope<PublicUser>>), ApiError> {
    let changes = payload.validate()?;
    let user = service.update(&principal, id, changes).await?;
    Ok(ok(PublicUser::from(user), "Update user successfully"))
}
