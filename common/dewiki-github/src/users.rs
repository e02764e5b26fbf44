//! Authenticated user lookup

use crate::client::GitHubClient;
use anyhow::{Context, Result};
use reqwest::Method;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub login: String,
    pub id: u64,
}

/// The `/user` response plus the scopes GitHub granted the token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    /// Raw `X-OAuth-Scopes` header value, absent for fine-grained tokens
    pub oauth_scopes: Option<String>,
}

impl GitHubClient {
    /// Resolve the token to a user ("who am I")
    ///
    /// # Errors
    /// Returns an error if:
    /// - The request cannot be sent
    /// - GitHub rejects the token (401) or the request
    /// - The response cannot be parsed
    pub async fn get_authenticated_user(&self) -> Result<AuthenticatedUser> {
        let response = self.send(self.request(Method::GET, "/user")).await?;

        let oauth_scopes = response
            .headers()
            .get("x-oauth-scopes")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let user: User = response
            .json()
            .await
            .context("Failed to parse authenticated user response")?;

        Ok(AuthenticatedUser { user, oauth_scopes })
    }
}
