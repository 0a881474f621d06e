use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, RegisterRequest},
        services::AuthService,
    },
    error::ApiError,
    response::{created, ok, Envelope},
    state::AppState,
    validation::ValidJson,
    users::dto::PublicUser,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(service, payload))]
pub async fn register(
    State(service): State<AuthService>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<PublicUser>>), ApiError> {
    let input = payload.validate()?;
    let user = service.register(input).await?;
    Ok(created(PublicUser::from(user), "Register successfully"))
}

#[instrument(skip(service, payload))]
pub async fn login(
    State(service): State<AuthService>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<(StatusCode, Json<Envelope<LoginResponse>>), ApiError> {
    let creds = payload.validate()?;
    let outcome = service.login(creds).await?;
    Ok(ok(
        LoginResponse {
            user: PublicUser::from(outcome.user),
            token: outcome.token,
        },
        "Login successfully",
    ))
}
