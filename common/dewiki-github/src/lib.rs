//! GitHub API client library
//!
//! This library provides the thin REST layer used by `dewiki`: identity and
//! scope inspection, paginated organization and repository listing, and the
//! repository settings update that toggles the wiki feature.
//!
//! ## Modules
//!
//! - [`client`]: Core GitHub client implementation
//! - [`error`]: Typed API errors and transient-failure classification
//! - [`pagination`]: `Link` header handling and the [`Page`] container
//! - [`users`]: Authenticated user lookup
//! - [`organizations`]: Organization listing
//! - [`repositories`]: Repository listing and settings updates

mod client;
mod error;
mod organizations;
mod pagination;
mod repositories;
mod users;

// Re-export public API
pub use client::{DEFAULT_API_BASE, GitHubClient, MAX_PER_PAGE};
pub use error::{ApiError, is_transient};
pub use organizations::Organization;
pub use pagination::{Page, parse_has_next_link};
pub use repositories::{GitHubRepo, Owner};
pub use users::{AuthenticatedUser, User};
