//! Repository-related operations

use crate::client::{GitHubClient, MAX_PER_PAGE};
use crate::pagination::{Page, parse_has_next_link};
use anyhow::{Context, Result};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Owner {
    pub login: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub has_wiki: bool,
    #[serde(default)]
    pub archived: bool,
}

impl GitHubClient {
    /// List one page of an organization's repositories, of every type
    pub async fn list_org_repositories(
        &self,
        org: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<GitHubRepo>> {
        let request = self
            .request(Method::GET, &format!("/orgs/{}/repos", org))
            .query(&[("type", "all")])
            .query(&[
                ("per_page", per_page.clamp(1, MAX_PER_PAGE)),
                ("page", page.max(1)),
            ]);
        let response = self.send(request).await?;

        let has_next = parse_has_next_link(
            response
                .headers()
                .get("link")
                .and_then(|value| value.to_str().ok()),
        );
        let repos: Vec<GitHubRepo> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse repositories page {} of {}", page, org))?;

        Ok(Page::new(repos, has_next))
    }

    /// Turn the wiki feature of a repository on or off
    ///
    /// # Returns
    /// The repository as GitHub reports it after the update
    pub async fn update_repository_wiki(
        &self,
        owner: &str,
        repo: &str,
        has_wiki: bool,
    ) -> Result<GitHubRepo> {
        if self.token.is_none() {
            anyhow::bail!("GitHub token is required for updating repository settings");
        }

        let request = self
            .request(Method::PATCH, &format!("/repos/{}/{}", owner, repo))
            .json(&json!({ "has_wiki": has_wiki }));
        let response = self.send(request).await?;

        let updated: GitHubRepo = response
            .json()
            .await
            .context("Failed to parse repository update response")?;
        Ok(updated)
    }
}
