//! Console output and diagnostic logging
//!
//! Operator-facing lines go through [`Logger`], which prefixes each message
//! with the repository name in cyan/bold. Diagnostics (requests, pages,
//! retries) use `tracing` and are written to stderr; see [`init_tracing`].

use crate::pool::TaskOutcome;
use colored::*;
use tracing_subscriber::EnvFilter;

/// Logger for per-repository progress with consistent formatting
///
/// ## Example
///
/// ```rust,no_run
/// use dewiki::logger::Logger;
///
/// let logger = Logger::default();
/// logger.info("acme/api", "Disabling wiki");
/// logger.success("acme/api", "Wiki disabled");
/// ```
#[derive(Debug, Default)]
pub struct Logger;

impl Logger {
    pub fn info(&self, repo: &str, msg: &str) {
        println!("{} | {}", repo.cyan().bold(), msg);
    }

    pub fn success(&self, repo: &str, msg: &str) {
        println!("{} | {}", repo.cyan().bold(), msg.green());
    }

    pub fn warn(&self, repo: &str, msg: &str) {
        println!("{} | {}", repo.cyan().bold(), msg.yellow());
    }

    pub fn error(&self, repo: &str, msg: &str) {
        eprintln!("{} | {}", repo.cyan().bold(), msg.red());
    }

    /// Progress line for a finished pool item
    pub fn outcome(&self, repo: &str, outcome: &TaskOutcome) {
        match outcome {
            TaskOutcome::Skipped => self.info(repo, &"Wiki already disabled".dimmed().to_string()),
            TaskOutcome::Succeeded => self.success(repo, "Wiki disabled"),
            TaskOutcome::Failed(err) => self.error(repo, &format!("Error: {}", err.message)),
        }
    }
}

/// Install the stderr `tracing` subscriber
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output for this crate and its client when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "dewiki=debug,dewiki_github=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
