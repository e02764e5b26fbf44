//! Run orchestration
//!
//! A run moves through these steps, in order:
//!
//! 1. obtain a token (pre-supplied, then prompted) and validate it, asking
//!    again after every rejection
//! 2. choose an organization from those the token can see
//! 3. list all of its repositories
//! 4. disable wikis through the [`TaskPool`]
//! 5. hand back a [`RunReport`]
//!
//! Listing finishes completely before the first update starts. The session
//! is owned here and lent to the pool; nothing is kept in global state.

use crate::constants::credentials::TOKEN_PROMPT;
use crate::constants::github::PAGE_SIZE;
use crate::constants::pool::DEFAULT_CONCURRENCY;
use crate::credentials::{self, Credential, Session};
use crate::error::RunError;
use crate::github::{Connect, Organization, Repository};
use crate::listing::{self, ListOptions};
use crate::logger::Logger;
use crate::pool::{RunSummary, TaskPool};
use crate::prompt::Prompter;
use crate::retry::RetryPolicy;
use crate::wiki;
use colored::*;
use serde::Serialize;

/// Everything a run can be configured with
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Token tried before prompting
    pub token: Option<String>,
    /// Organization login chosen without prompting
    pub organization: Option<String>,
    pub concurrency: usize,
    pub listing: ListOptions,
    /// Policy for each wiki update
    pub retry: RetryPolicy,
    /// Give up after this many rejected tokens; unbounded when `None`
    pub max_credential_attempts: Option<u32>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            token: None,
            organization: None,
            concurrency: DEFAULT_CONCURRENCY,
            listing: ListOptions::default(),
            retry: RetryPolicy::default(),
            max_credential_attempts: None,
        }
    }
}

impl RunOptions {
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Use `retry` for listing pages and wiki updates alike
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self.listing.retry = retry;
        self
    }

    /// Clamped to what GitHub serves per page
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.listing.page_size = page_size.clamp(1, PAGE_SIZE);
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.listing.max_pages = max_pages;
        self
    }

    pub fn with_max_credential_attempts(mut self, attempts: u32) -> Self {
        self.max_credential_attempts = Some(attempts);
        self
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub organization: String,
    pub identity: String,
    pub started_at: String,
    pub finished_at: String,
    pub summary: RunSummary,
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Drives one run from token prompt to summary
pub struct Orchestrator<C, P> {
    connector: C,
    prompter: P,
    options: RunOptions,
    logger: Logger,
}

impl<C: Connect, P: Prompter> Orchestrator<C, P> {
    pub fn new(connector: C, prompter: P, options: RunOptions) -> Self {
        Self {
            connector,
            prompter,
            options,
            logger: Logger,
        }
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub async fn run(&mut self) -> Result<RunReport, RunError> {
        let started_at = timestamp();

        let session = self.authenticate().await?;
        println!(
            "{}",
            format!("Authenticated as {}", session.identity.login).green()
        );

        let organization = self.select_organization(&session).await?;

        println!(
            "{}",
            format!("Listing repositories of {}...", organization.login).green()
        );
        let repositories =
            listing::list_repositories(&session.api, &organization.login, &self.options.listing)
                .await?;
        let enabled = repositories.iter().filter(|r| r.has_wiki).count();
        println!(
            "{}",
            format!(
                "Found {} repositories, {} with a wiki enabled",
                repositories.len(),
                enabled
            )
            .green()
        );

        for repo in wiki::archived_with_wiki(&repositories) {
            self.logger
                .warn(&repo.full_name, "Archived; GitHub will likely reject the update");
        }

        let summary = self.disable_wikis(&session.api, repositories).await;

        Ok(RunReport {
            organization: organization.login,
            identity: session.identity.login,
            started_at,
            finished_at: timestamp(),
            summary,
        })
    }

    async fn authenticate(&mut self) -> Result<Session<C::Api>, RunError> {
        let mut attempts = 0;

        if let Some(token) = self.options.token.clone() {
            attempts += 1;
            match credentials::validate(&self.connector, &Credential::new(token)).await {
                Ok(session) => return Ok(session),
                Err(err) => eprintln!(
                    "{}",
                    format!("Supplied GitHub token cannot be used: {err}").yellow()
                ),
            }
        }

        loop {
            if let Some(max) = self.options.max_credential_attempts
                && attempts >= max
            {
                return Err(RunError::CredentialAttemptsExhausted(attempts));
            }

            let Some(credential) = self.prompter.credential(TOKEN_PROMPT)? else {
                return Err(RunError::Aborted);
            };
            attempts += 1;

            match credentials::validate(&self.connector, &credential).await {
                Ok(session) => return Ok(session),
                Err(err) => eprintln!("{}", format!("Invalid GitHub token: {err}").red()),
            }
        }
    }

    async fn select_organization(
        &mut self,
        session: &Session<C::Api>,
    ) -> Result<Organization, RunError> {
        let organizations =
            listing::list_organizations(&session.api, &self.options.listing).await?;

        if organizations.is_empty() {
            return Err(RunError::NoOrganizations {
                login: session.identity.login.clone(),
            });
        }

        if let Some(login) = &self.options.organization {
            return organizations
                .into_iter()
                .find(|org| org.login.eq_ignore_ascii_case(login))
                .ok_or_else(|| RunError::UnknownOrganization(login.clone()));
        }

        self.prompter
            .select_organization(&organizations)?
            .ok_or(RunError::Aborted)
    }

    async fn disable_wikis(&self, api: &C::Api, repositories: Vec<Repository>) -> RunSummary {
        let pool = TaskPool::new(self.options.concurrency);
        let retry = self.options.retry;
        let logger = &self.logger;

        pool.run(
            repositories,
            |repo| wiki::disable_wiki(api, repo, &retry),
            |id, outcome| logger.outcome(id, outcome),
        )
        .await
    }
}

