//! Per-repository wiki operation

use crate::error::ItemMutationError;
use crate::github::{GitHubApi, Repository};
use crate::pool::TaskOutcome;
use crate::retry::RetryPolicy;

/// Disable the wiki of one repository, skipping it when already off
pub async fn disable_wiki<A: GitHubApi + ?Sized>(
    api: &A,
    repo: Repository,
    retry: &RetryPolicy,
) -> TaskOutcome {
    if !repo.has_wiki {
        return TaskOutcome::Skipped;
    }

    let result = retry
        .run(&repo.full_name, || {
            api.set_wiki_enabled(&repo.owner.login, &repo.name, false)
        })
        .await;

    match result {
        Ok(()) => TaskOutcome::Succeeded,
        Err(err) => TaskOutcome::Failed(ItemMutationError {
            repository: repo.full_name.clone(),
            message: format!("{err:#}"),
        }),
    }
}

/// Archived repositories that still report a wiki; GitHub refuses to
/// update them while they stay archived
pub fn archived_with_wiki(repositories: &[Repository]) -> impl Iterator<Item = &Repository> {
    repositories.iter().filter(|repo| repo.archived && repo.has_wiki)
}
