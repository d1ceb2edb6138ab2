use axum::{
    Form, Router,
    extract::State,
    http::HeaderMap,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodcourt_core::models::Role;

use crate::error::ServiceError;
use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/auth/token", post(issue_token))
        .route("/auth/token-info", get(token_info))
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub id: Uuid,
}

async fn create_user(
    State(state): State<MockState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ServiceError> {
    let duplicate = state
        .users
        .iter()
        .any(|entry| entry.username == payload.username);
    if duplicate {
        return Err(ServiceError::Conflict(format!(
            "Username {} is taken",
            payload.username
        )));
    }

    let id = state.seed_user(
        &payload.username,
        &payload.password,
        payload.role,
        payload.restaurant_id,
    );
    Ok(Json(CreateUserResponse { id }))
}

#[derive(Debug, Deserialize)]
pub struct IssueTokenRequest {
    pub grant_type: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct IssueTokenResponse {
    pub token_type: String,
    pub access_token: String,
    pub expires_in: i64,
}

async fn issue_token(
    State(state): State<MockState>,
    Form(payload): Form<IssueTokenRequest>,
) -> Result<Json<IssueTokenResponse>, ServiceError> {
    if payload.grant_type != "password" {
        return Err(ServiceError::Unauthorized);
    }

    let user = state
        .users
        .iter()
        .find(|entry| entry.username == payload.username && entry.password == payload.password)
        .map(|entry| entry.id)
        .ok_or(ServiceError::Unauthorized)?;

    Ok(Json(IssueTokenResponse {
        token_type: "Bearer".to_string(),
        access_token: state.issue_token_for(user),
        expires_in: 3600,
    }))
}

#[derive(Debug, Serialize)]
pub struct TokenInfoResponse {
    pub user_id: Uuid,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<Uuid>,
}

async fn token_info(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<TokenInfoResponse>, ServiceError> {
    let user = state.authenticate(&headers)?;
    Ok(Json(TokenInfoResponse {
        user_id: user.id,
        role: user.role,
        restaurant_id: user.restaurant_id,
    }))
}
