//! Bounded task pool
//!
//! Runs one operation per item with at most `concurrency` operations in
//! flight. A finished operation immediately frees its slot for the next
//! item that has not started yet. Operations report failure through their
//! [`TaskOutcome`], so one failing item never cancels or delays another.
//!
//! Outcomes are folded into the [`RunSummary`] by the caller's task as they
//! arrive; the summary is only handed out once every item is terminal.

use crate::error::ItemMutationError;
use crate::github::Repository;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::future::Future;

/// Terminal result of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Already in the desired state; nothing was sent
    Skipped,
    Succeeded,
    Failed(ItemMutationError),
}

/// Something the pool can process and report on
pub trait TaskItem {
    /// Identifier used in progress output and the summary
    fn id(&self) -> String;
}

impl TaskItem for Repository {
    fn id(&self) -> String {
        self.full_name.clone()
    }
}

/// Aggregated outcome of a pool run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub skipped: Vec<String>,
    pub succeeded: Vec<String>,
    pub failed: Vec<ItemMutationError>,
}

impl RunSummary {
    pub fn record(&mut self, id: String, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Skipped => self.skipped.push(id),
            TaskOutcome::Succeeded => self.succeeded.push(id),
            TaskOutcome::Failed(error) => self.failed.push(ItemMutationError {
                repository: id,
                ..error
            }),
        }
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn total(&self) -> usize {
        self.skipped_count() + self.succeeded_count() + self.failed_count()
    }

    /// No item needed a change
    pub fn is_nothing_to_do(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Fixed-width pool of concurrent operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPool {
    concurrency: usize,
}

impl TaskPool {
    /// A concurrency of zero is treated as one
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run `op` once for every item and wait until all of them are terminal
    ///
    /// `on_complete` is called from the caller's task for each outcome as
    /// it arrives, in completion order.
    pub async fn run<T, F, Fut, P>(&self, items: Vec<T>, op: F, mut on_complete: P) -> RunSummary
    where
        T: TaskItem,
        F: Fn(T) -> Fut,
        Fut: Future<Output = TaskOutcome>,
        P: FnMut(&str, &TaskOutcome),
    {
        tracing::debug!(
            items = items.len(),
            concurrency = self.concurrency,
            "starting task pool"
        );

        let mut completions = stream::iter(items)
            .map(|item| {
                let id = item.id();
                let operation = op(item);
                async move { (id, operation.await) }
            })
            .buffer_unordered(self.concurrency);

        let mut summary = RunSummary::default();
        while let Some((id, outcome)) = completions.next().await {
            on_complete(&id, &outcome);
            summary.record(id, outcome);
        }
        summary
    }
}
