//! Credential validation
//!
//! A [`Credential`] is an unvalidated token. [`validate`] turns it into a
//! [`Session`] or explains why it cannot be used with a [`CredentialError`].
//! Validation keeps no state between calls, so a caller can simply try again
//! with another token.

use crate::constants::credentials::{REQUIRED_SCOPES, TOKEN_LENGTH};
use crate::error::CredentialError;
use crate::github::{Connect, GitHubApi};
use std::collections::BTreeSet;
use std::fmt;

/// A GitHub access token as typed by the operator
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into().trim().to_string())
    }

    /// The raw secret, for building the `Authorization` header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

/// The principal a validated token resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub login: String,
    pub scopes: BTreeSet<String>,
}

/// An authenticated identity plus the API handle bound to its token
pub struct Session<A> {
    pub identity: Identity,
    pub api: A,
}

/// Local shape check; never touches the network
pub fn check_format(credential: &Credential) -> Result<(), CredentialError> {
    let secret = credential.expose();
    let well_formed = secret.len() == TOKEN_LENGTH
        && secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if well_formed {
        Ok(())
    } else {
        Err(CredentialError::Format)
    }
}

/// Parse the comma-separated `X-OAuth-Scopes` header
///
/// An absent header, or one containing an entry that is not a single
/// scope name, yields the empty set.
pub fn parse_scopes(raw: Option<&str>) -> BTreeSet<String> {
    let Some(raw) = raw else {
        return BTreeSet::new();
    };

    let mut scopes = BTreeSet::new();
    for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if entry.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return BTreeSet::new();
        }
        scopes.insert(entry.to_string());
    }
    scopes
}

fn grants(scopes: &BTreeSet<String>, required: &str) -> bool {
    match required {
        // write:org and admin:org both include read:org
        "read:org" => ["read:org", "write:org", "admin:org"]
            .iter()
            .any(|s| scopes.contains(*s)),
        other => scopes.contains(other),
    }
}

/// First required scope the granted set does not cover
pub fn missing_scope(scopes: &BTreeSet<String>) -> Option<&'static str> {
    REQUIRED_SCOPES
        .into_iter()
        .find(|required| !grants(scopes, required))
}

/// Validate a token and open a session with it
///
/// Makes no request when the token is malformed, and exactly one
/// "who am I" request otherwise.
pub async fn validate<C: Connect>(
    connector: &C,
    credential: &Credential,
) -> Result<Session<C::Api>, CredentialError> {
    check_format(credential)?;

    let api = connector.connect(credential);
    let user = api.authenticated_user().await.map_err(|err| {
        tracing::debug!(error = %format!("{err:#}"), "token rejected");
        CredentialError::Rejected
    })?;

    let scopes = parse_scopes(user.oauth_scopes.as_deref());
    if let Some(scope) = missing_scope(&scopes) {
        return Err(CredentialError::MissingScope(scope.to_string()));
    }

    tracing::debug!(login = %user.user.login, ?scopes, "token validated");
    Ok(Session {
        identity: Identity {
            login: user.user.login,
            scopes,
        },
        api,
    })
}
