//! Organization listing

use crate::client::{GitHubClient, MAX_PER_PAGE};
use crate::pagination::{Page, parse_has_next_link};
use anyhow::{Context, Result};
use reqwest::Method;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl GitHubClient {
    /// List one page of the organizations the authenticated user belongs to
    pub async fn list_organizations(&self, page: u32, per_page: u32) -> Result<Page<Organization>> {
        let request = self.request(Method::GET, "/user/orgs").query(&[
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
        let organizations: Vec<Organization> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse organizations page {}", page))?;

        Ok(Page::new(organizations, has_next))
    }
}
