//! GitHub API integration module
//!
//! The run only needs four things from GitHub: who the token belongs to,
//! which organizations it can see, which repositories an organization has,
//! and a way to switch a repository's wiki off. [`GitHubApi`] names exactly
//! those operations so the validator, the lister and the task pool can be
//! driven by the real [`GitHubClient`] or by an in-memory double.
//!
//! - [`client`]: `GitHubApi` for the REST client and the [`GitHubConnector`]

pub mod client;

use crate::credentials::Credential;
use anyhow::Result;
use async_trait::async_trait;

pub use client::GitHubConnector;
pub use dewiki_github::{
    AuthenticatedUser, GitHubClient, GitHubRepo as Repository, Organization, Owner, Page, User,
};

/// Operations a run issues against GitHub
///
/// Implementations are shared read-only by every pool worker, so they must
/// not rely on per-call mutable state.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Resolve the credential to an identity, with its raw scope header
    async fn authenticated_user(&self) -> Result<AuthenticatedUser>;

    /// One page of the organizations visible to the identity
    async fn organizations_page(&self, page: u32, per_page: u32) -> Result<Page<Organization>>;

    /// One page of an organization's repositories
    async fn repositories_page(
        &self,
        org: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Repository>>;

    /// Switch a repository's wiki feature on or off
    async fn set_wiki_enabled(&self, owner: &str, repo: &str, enabled: bool) -> Result<()>;
}

/// Builds an API handle bound to a credential
pub trait Connect: Send + Sync {
    type Api: GitHubApi;

    fn connect(&self, credential: &Credential) -> Self::Api;
}
