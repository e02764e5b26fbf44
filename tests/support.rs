//! Common test support utilities and fixtures
//!
//! `FakeGitHub` is an in-memory GitHub that records every request it sees,
//! so tests can assert on request counts and peak concurrency.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use dewiki::credentials::Credential;
use dewiki::github::{
    AuthenticatedUser, Connect, GitHubApi, Organization, Owner, Page, Repository, User,
};
use dewiki::prompt::Prompter;
use dewiki::{RetryPolicy, RunOptions};
use dewiki_github::ApiError;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A well-formed token made of one repeated character
pub fn token(c: char) -> String {
    c.to_string().repeat(40)
}

pub fn status_error(status: u16, message: &str) -> anyhow::Error {
    ApiError::Status {
        status,
        reason: "test".to_string(),
        message: message.to_string(),
    }
    .into()
}

pub fn repository(org: &str, name: &str, has_wiki: bool) -> Repository {
    Repository {
        id: 0,
        name: name.to_string(),
        full_name: format!("{}/{}", org, name),
        owner: Owner {
            login: org.to_string(),
        },
        has_wiki,
        archived: false,
    }
}

/// Retries without real waiting
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3).with_delays(Duration::from_millis(1), Duration::from_millis(2))
}

pub fn fast_options() -> RunOptions {
    RunOptions::default().with_retry(fast_retry())
}

#[derive(Default)]
struct State {
    tokens: HashMap<String, (String, Option<String>)>,
    organizations: Vec<Organization>,
    repositories: HashMap<String, Vec<Repository>>,
    failing: HashSet<String>,
    flaky: HashMap<String, u32>,
    listing_failures: u32,
    broken_listing_page: Option<u32>,
    endless_listing: bool,
    whoami_calls: usize,
    org_page_requests: usize,
    repo_page_requests: usize,
    update_requests: Vec<String>,
    in_flight: usize,
    max_in_flight: usize,
}

#[derive(Clone, Default)]
pub struct FakeGitHub {
    state: Arc<Mutex<State>>,
    update_delay: Duration,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("fake state poisoned")
    }

    pub fn with_token(self, token: &str, login: &str, scopes: Option<&str>) -> Self {
        self.state().tokens.insert(
            token.to_string(),
            (login.to_string(), scopes.map(str::to_string)),
        );
        self
    }

    /// A token for `octocat` carrying every scope a run needs
    pub fn with_valid_token(self, token: &str) -> Self {
        self.with_token(token, "octocat", Some("repo, read:org"))
    }

    pub fn with_organization(self, login: &str) -> Self {
        {
            let mut state = self.state();
            let id = state.organizations.len() as u64 + 1;
            state.organizations.push(Organization {
                id,
                login: login.to_string(),
                description: None,
            });
            state.repositories.entry(login.to_string()).or_default();
        }
        self
    }

    /// Add repositories as `(name, has_wiki)` pairs
    pub fn with_repositories(self, org: &str, repos: &[(&str, bool)]) -> Self {
        {
            let mut state = self.state();
            let entry = state.repositories.entry(org.to_string()).or_default();
            for (name, has_wiki) in repos {
                entry.push(repository(org, name, *has_wiki));
            }
        }
        self
    }

    /// Add `count` repositories named `repo-000`, `repo-001`, ...
    pub fn with_generated_repositories(self, org: &str, count: usize, has_wiki: bool) -> Self {
        {
            let mut state = self.state();
            let entry = state.repositories.entry(org.to_string()).or_default();
            for i in 0..count {
                entry.push(repository(org, &format!("repo-{:03}", i), has_wiki));
            }
        }
        self
    }

    /// Updates of this repository always fail with 422
    pub fn with_failing_repository(self, full_name: &str) -> Self {
        self.state().failing.insert(full_name.to_string());
        self
    }

    /// Updates of this repository fail with 502 `failures` times first
    pub fn with_flaky_repository(self, full_name: &str, failures: u32) -> Self {
        self.state().flaky.insert(full_name.to_string(), failures);
        self
    }

    /// The next `failures` repository page requests fail with 502
    pub fn with_flaky_listing(self, failures: u32) -> Self {
        self.state().listing_failures = failures;
        self
    }

    /// This repository page always fails with 500
    pub fn with_broken_listing_page(self, page: u32) -> Self {
        self.state().broken_listing_page = Some(page);
        self
    }

    /// Repository pages are always full and always advertise a next page
    pub fn with_endless_listing(self) -> Self {
        self.state().endless_listing = true;
        self
    }

    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = delay;
        self
    }

    pub fn whoami_calls(&self) -> usize {
        self.state().whoami_calls
    }

    pub fn org_page_requests(&self) -> usize {
        self.state().org_page_requests
    }

    pub fn repo_page_requests(&self) -> usize {
        self.state().repo_page_requests
    }

    pub fn update_requests(&self) -> Vec<String> {
        self.state().update_requests.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state().max_in_flight
    }

    pub fn repositories(&self, org: &str) -> Vec<Repository> {
        self.state()
            .repositories
            .get(org)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_wiki(&self, full_name: &str) -> Option<bool> {
        self.state()
            .repositories
            .values()
            .flatten()
            .find(|r| r.full_name == full_name)
            .map(|r| r.has_wiki)
    }
}

fn paginate<T: Clone>(items: &[T], page: u32, per_page: u32) -> Page<T> {
    let start = (page.saturating_sub(1) * per_page) as usize;
    let end = (start + per_page as usize).min(items.len());
    if start >= items.len() {
        return Page::last(Vec::new());
    }
    Page::new(items[start..end].to_vec(), end < items.len())
}

/// API handle the fake hands out per credential
pub struct FakeApi {
    github: FakeGitHub,
    token: String,
}

impl Connect for FakeGitHub {
    type Api = FakeApi;

    fn connect(&self, credential: &Credential) -> FakeApi {
        FakeApi {
            github: self.clone(),
            token: credential.expose().to_string(),
        }
    }
}

#[async_trait]
impl GitHubApi for FakeApi {
    async fn authenticated_user(&self) -> Result<AuthenticatedUser> {
        let mut state = self.github.state();
        state.whoami_calls += 1;
        match state.tokens.get(&self.token) {
            Some((login, scopes)) => Ok(AuthenticatedUser {
                user: User {
                    login: login.clone(),
                    id: 1,
                },
                oauth_scopes: scopes.clone(),
            }),
            None => Err(status_error(401, "Bad credentials")),
        }
    }

    async fn organizations_page(&self, page: u32, per_page: u32) -> Result<Page<Organization>> {
        let mut state = self.github.state();
        state.org_page_requests += 1;
        Ok(paginate(&state.organizations, page, per_page))
    }

    async fn repositories_page(
        &self,
        org: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Repository>> {
        let mut state = self.github.state();
        state.repo_page_requests += 1;

        if state.broken_listing_page == Some(page) {
            return Err(status_error(500, "Server Error"));
        }
        if state.listing_failures > 0 {
            state.listing_failures -= 1;
            return Err(status_error(502, "Bad Gateway"));
        }
        if state.endless_listing {
            let items = (0..per_page)
                .map(|i| repository(org, &format!("page{}-{}", page, i), true))
                .collect();
            return Ok(Page::new(items, true));
        }

        match state.repositories.get(org) {
            Some(repos) => Ok(paginate(repos, page, per_page)),
            None => Err(status_error(404, "Not Found")),
        }
    }

    async fn set_wiki_enabled(&self, owner: &str, repo: &str, enabled: bool) -> Result<()> {
        let full_name = format!("{}/{}", owner, repo);
        {
            let mut state = self.github.state();
            state.update_requests.push(full_name.clone());
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
        }

        if !self.github.update_delay.is_zero() {
            tokio::time::sleep(self.github.update_delay).await;
        }

        let mut state = self.github.state();
        state.in_flight -= 1;

        if state.failing.contains(&full_name) {
            return Err(status_error(422, "Repository was archived so is read-only."));
        }
        if let Some(remaining) = state.flaky.get_mut(&full_name)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(status_error(502, "Bad Gateway"));
        }

        match state
            .repositories
            .get_mut(owner)
            .and_then(|repos| repos.iter_mut().find(|r| r.name == repo))
        {
            Some(found) => {
                found.has_wiki = enabled;
                Ok(())
            }
            None => Err(status_error(404, "Not Found")),
        }
    }
}

/// Prompter that replays scripted answers
///
/// A `None` token answer, or running out of answers, means the operator
/// cancelled.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    tokens: VecDeque<Option<String>>,
    selection: Option<String>,
    pub token_prompts: usize,
    pub selection_prompts: usize,
    pub offered: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_token(mut self, token: &str) -> Self {
        self.tokens.push_back(Some(token.to_string()));
        self
    }

    pub fn cancel_token(mut self) -> Self {
        self.tokens.push_back(None);
        self
    }

    pub fn select(mut self, login: &str) -> Self {
        self.selection = Some(login.to_string());
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn credential(&mut self, _message: &str) -> Result<Option<Credential>> {
        self.token_prompts += 1;
        Ok(self.tokens.pop_front().flatten().map(Credential::new))
    }

    fn select_organization(
        &mut self,
        organizations: &[Organization],
    ) -> Result<Option<Organization>> {
        self.selection_prompts += 1;
        self.offered = organizations.iter().map(|o| o.login.clone()).collect();
        Ok(self
            .selection
            .as_ref()
            .and_then(|login| organizations.iter().find(|o| &o.login == login))
            .cloned())
    }
}
