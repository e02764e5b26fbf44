//! Interactive prompts
//!
//! The orchestrator only sees the [`Prompter`] trait; [`InquirePrompter`]
//! is the terminal implementation. Both prompts return `Ok(None)` when the
//! operator cancels (Esc or Ctrl-C).

use crate::credentials::Credential;
use crate::github::Organization;
use anyhow::Result;
use inquire::{InquireError, Password, PasswordDisplayMode, Select};
use std::fmt;

pub trait Prompter {
    /// Ask for a token with masked input
    fn credential(&mut self, message: &str) -> Result<Option<Credential>>;

    /// Let the operator pick one organization
    fn select_organization(&mut self, organizations: &[Organization])
    -> Result<Option<Organization>>;
}

/// Prompts on the controlling terminal
#[derive(Debug, Default)]
pub struct InquirePrompter;

struct OrganizationChoice(Organization);

impl fmt::Display for OrganizationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.description.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(description) => write!(f, "{} ({})", self.0.login, description.trim()),
            None => f.write_str(&self.0.login),
        }
    }
}

fn cancelled<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl Prompter for InquirePrompter {
    fn credential(&mut self, message: &str) -> Result<Option<Credential>> {
        let secret = Password::new(message)
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt();
        Ok(cancelled(secret)?.map(Credential::new))
    }

    fn select_organization(
        &mut self,
        organizations: &[Organization],
    ) -> Result<Option<Organization>> {
        let choices = organizations
            .iter()
            .cloned()
            .map(OrganizationChoice)
            .collect();

        let selection = Select::new("Select an organization", choices)
            .with_page_size(10)
            .with_help_message("↑↓ to move, type to filter, ENTER to select, ESC to cancel")
            .prompt();
        Ok(cancelled(selection)?.map(|choice| choice.0))
    }
}
