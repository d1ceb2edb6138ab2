use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodcourt_core::models::Role;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

#[derive(Debug, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
struct IssueTokenForm<'a> {
    grant_type: &'static str,
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct IssueTokenResponse {
    pub token_type: String,
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub role: Role,
    #[serde(default)]
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    http: HttpClient,
}

impl AuthClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(&config.auth_endpoint, config.timeout),
        }
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> ClientResult<CreateUserResponse> {
        self.http.post("/users", request).await
    }

    pub async fn issue_token(
        &self,
        username: &str,
        password: &str,
    ) -> ClientResult<IssueTokenResponse> {
        self.http
            .post_form(
                "/auth/token",
                &IssueTokenForm {
                    grant_type: "password",
                    username,
                    password,
                },
            )
            .await
    }

    pub async fn token_info(&self, token: &str) -> ClientResult<TokenInfo> {
        self.http.clone().with_token(token).get("/auth/token-info").await
    }
}

/// Holds the bearer token for one signed-in user. An `Unauthorized` outcome
/// drops the cached token so the next action forces a re-login; any
/// in-memory cart is left alone.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn login(
        &mut self,
        auth: &AuthClient,
        username: &str,
        password: &str,
    ) -> ClientResult<()> {
        let issued = auth.issue_token(username, password).await?;
        self.token = Some(issued.access_token);
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    pub fn absorb<T>(&mut self, result: ClientResult<T>) -> ClientResult<T> {
        if matches!(result, Err(ClientError::Unauthorized)) {
            self.token = None;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_outcome_clears_the_token() {
        let mut session = Session::default();
        session.token = Some("abc".to_string());

        let _ = session.absorb::<()>(Err(ClientError::Unauthorized));
        assert!(session.token().is_none());
    }

    #[test]
    fn other_outcomes_keep_the_token() {
        let mut session = Session::default();
        session.token = Some("abc".to_string());

        let _ = session.absorb::<()>(Err(ClientError::Service("boom".to_string())));
        let _ = session.absorb(Ok(()));
        assert_eq!(session.token(), Some("abc"));
    }
}
