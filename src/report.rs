//! End-of-run summary and JSON report

use crate::orchestrator::RunReport;
use crate::pool::RunSummary;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

/// How a finished run reads to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// Every repository already had its wiki disabled (or there were none)
    NothingToDo,
    AllSucceeded,
    SomeFailed(usize),
}

pub fn classify(summary: &RunSummary) -> SummaryKind {
    if summary.has_failures() {
        SummaryKind::SomeFailed(summary.failed_count())
    } else if summary.is_nothing_to_do() {
        SummaryKind::NothingToDo
    } else {
        SummaryKind::AllSucceeded
    }
}

pub fn print_summary(organization: &str, summary: &RunSummary) {
    let org = format!("\"{}\"", organization).cyan();
    let counts = format!(
        "{} disabled, {} already disabled, {} failed",
        summary.succeeded_count(),
        summary.skipped_count(),
        summary.failed_count()
    );

    match classify(summary) {
        SummaryKind::NothingToDo => {
            println!(
                "{}",
                format!(
                    "Nothing to do: no repository in the {} org has a wiki enabled ({} checked)",
                    org,
                    summary.total()
                )
                .green()
            );
        }
        SummaryKind::AllSucceeded => {
            println!(
                "{}",
                format!(
                    "All Done: Wikis have been completely disabled for the {} org",
                    org
                )
                .green()
            );
            println!("{}", counts);
        }
        SummaryKind::SomeFailed(failed) => {
            println!(
                "{}",
                format!(
                    "{} repositories in the {} org could not be updated",
                    failed, org
                )
                .yellow()
            );
            println!("{}", counts);
            for failure in &summary.failed {
                eprintln!(
                    "  {} | {}",
                    failure.repository.cyan().bold(),
                    failure.message.red()
                );
            }
        }
    }
}

/// Write the report as pretty-printed JSON, creating parent directories
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}
