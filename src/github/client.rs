//! `GitHubApi` backed by the REST client

use super::{AuthenticatedUser, Connect, GitHubApi, GitHubClient, Organization, Page, Repository};
use crate::constants::github::API_BASE;
use crate::credentials::Credential;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn authenticated_user(&self) -> Result<AuthenticatedUser> {
        self.get_authenticated_user().await
    }

    async fn organizations_page(&self, page: u32, per_page: u32) -> Result<Page<Organization>> {
        self.list_organizations(page, per_page).await
    }

    async fn repositories_page(
        &self,
        org: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Repository>> {
        self.list_org_repositories(org, page, per_page).await
    }

    async fn set_wiki_enabled(&self, owner: &str, repo: &str, enabled: bool) -> Result<()> {
        self.update_repository_wiki(owner, repo, enabled).await?;
        Ok(())
    }
}

/// Creates REST clients against a fixed API root
#[derive(Debug, Clone)]
pub struct GitHubConnector {
    api_base: String,
}

impl GitHubConnector {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

impl Default for GitHubConnector {
    fn default() -> Self {
        Self::new(API_BASE)
    }
}

impl Connect for GitHubConnector {
    type Api = GitHubClient;

    fn connect(&self, credential: &Credential) -> GitHubClient {
        GitHubClient::new(Some(credential.expose().to_string())).with_api_base(self.api_base.as_str())
    }
}
