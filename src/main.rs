use clap::Parser;
use clap::builder::TypedValueParser;
use colored::*;
use dewiki::constants::{self, exit};
use dewiki::logger::init_tracing;
use dewiki::prompt::InquirePrompter;
use dewiki::{GitHubConnector, Orchestrator, RetryPolicy, RunOptions, report};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "dewiki")]
#[command(about = "Disable the wiki on every repository of a GitHub organization")]
#[command(version)]
struct Cli {
    /// GitHub token to try before prompting
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Organization login to process instead of choosing interactively
    #[arg(long)]
    org: Option<String>,

    /// Number of repositories updated at the same time
    #[arg(
        short,
        long,
        default_value_t = constants::pool::DEFAULT_CONCURRENCY,
        value_parser = clap::value_parser!(u16).range(1..=constants::pool::MAX_CONCURRENCY as i64).map(usize::from)
    )]
    concurrency: usize,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, default_value = constants::github::API_BASE)]
    api_url: String,

    /// Attempts per API request when GitHub fails transiently
    #[arg(long, default_value_t = constants::retry::MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..=10))]
    max_attempts: u32,

    /// Stop after this many rejected tokens (unbounded by default)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_token_attempts: Option<u32>,

    /// Pages read per listing before giving up
    #[arg(long, default_value_t = constants::github::MAX_PAGES, value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: u32,

    /// Exit with a failure status when any repository could not be updated
    #[arg(long)]
    fail_on_error: bool,

    /// Write a JSON report of the run to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        let mut options = RunOptions::default()
            .with_concurrency(self.concurrency)
            .with_retry(RetryPolicy::new(self.max_attempts))
            .with_max_pages(self.max_pages);

        if let Some(token) = &self.token {
            options = options.with_token(token);
        }
        if let Some(org) = &self.org {
            options = options.with_organization(org);
        }
        if let Some(attempts) = self.max_token_attempts {
            options = options.with_max_credential_attempts(attempts);
        }
        options
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut orchestrator = Orchestrator::new(
        GitHubConnector::new(cli.api_url.as_str()),
        InquirePrompter,
        cli.run_options(),
    );

    let report = match orchestrator.run().await {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{}", format!("Error: {err}").red());
            return ExitCode::from(err.exit_code());
        }
    };

    report::print_summary(&report.organization, &report.summary);

    if let Some(path) = &cli.report {
        if let Err(err) = report::write_report(path, &report) {
            eprintln!("{}", format!("Error: {err:#}").red());
            return ExitCode::from(exit::FAILURE);
        }
        println!("Report written to {}", path.display());
    }

    if cli.fail_on_error && report.summary.has_failures() {
        return ExitCode::from(exit::FAILURE);
    }
    ExitCode::from(exit::SUCCESS)
}
