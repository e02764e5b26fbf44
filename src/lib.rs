//! Dewiki - disable the wiki feature across every repository of a GitHub organization

pub mod constants;
pub mod credentials;
pub mod error;
pub mod github;
pub mod listing;
pub mod logger;
pub mod orchestrator;
pub mod pool;
pub mod prompt;
pub mod report;
pub mod retry;
pub mod wiki;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use credentials::{Credential, Identity, Session};
pub use error::{CredentialError, ItemMutationError, ListingError, RunError};
pub use github::{Connect, GitHubApi, GitHubConnector, Organization, Repository};
pub use orchestrator::{Orchestrator, RunOptions, RunReport};
pub use pool::{RunSummary, TaskOutcome, TaskPool};
pub use retry::RetryPolicy;
