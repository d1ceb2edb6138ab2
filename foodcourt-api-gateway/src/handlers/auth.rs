use axum::{Form, Router, extract::State, http::HeaderMap, response::Json, routing::{get, post}};
use tracing::instrument;

use foodcourt_client::auth as auth_api;

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, authenticate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/auth/token", post(issue_token))
        .route("/auth/me", get(get_profile))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created successfully", body = CreateUserResponse),
        (status = 400, description = "Bad request", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    tag = "users"
)]
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ApiError> {
    let role = parse_role(&payload.role)
        .ok_or_else(|| ApiError::Validation(format!("Unknown role {}", payload.role)))?;

    let created = state
        .auth_client
        .create_user(&auth_api::CreateUserRequest {
            username: payload.username,
            password: payload.password,
            role,
            restaurant_id: payload.restaurant_id,
        })
        .await
        .map_err(|e| ApiError::ServiceUnavailable(format!("Auth service error: {e}")))?;

    Ok(Json(CreateUserResponse { id: created.id }))
}

#[utoipa::path(
    post,
    path = "/auth/token",
    request_body = IssueTokenRequest,
    responses(
        (status = 200, description = "Token issued successfully", body = IssueTokenResponse),
        (status = 401, description = "Invalid credentials", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip(state, payload))]
pub async fn issue_token(
    State(state): State<AppState>,
    Form(payload): Form<IssueTokenRequest>,
) -> Result<Json<IssueTokenResponse>, ApiError> {
    // Validate grant_type
    if payload.grant_type != "password" {
        return Err(ApiError::AuthenticationFailed);
    }

    let issued = state
        .auth_client
        .issue_token(&payload.username, &payload.password)
        .await
        .map_err(|e| match e {
            foodcourt_client::ClientError::Unauthorized => ApiError::AuthenticationFailed,
            other => ApiError::ServiceUnavailable(format!("Auth service error: {other}")),
        })?;

    Ok(Json(IssueTokenResponse {
        token_type: issued.token_type,
        access_token: issued.access_token,
        expires_in: issued.expires_in,
    }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Profile of the signed-in user", body = ProfileResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "auth"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;

    Ok(Json(ProfileResponse {
        user_id: user.id,
        role: role_str(user.role).to_string(),
        restaurant_id: user.restaurant_id,
    }))
}
