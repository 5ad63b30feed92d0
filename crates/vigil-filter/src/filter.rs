use std::sync::Arc;

use tracing::{debug, instrument};
use vigil_match::MatcherSet;
use vigil_model::{AnnotatedTask, Task};

use crate::{
    error::FilterError,
    executor::execute,
    log::{MatchLog, TracingLog},
    merger::merge,
    sorter::sort,
};

/// Result of [`TaskFilter::filter`].
///
/// `tasks` is usable even when `error` is set: failed matchers only lose their own matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Matched tasks, ascending by task index.
    pub tasks: Vec<AnnotatedTask>,
    pub error: Option<FilterError>,
}

impl FilterOutcome {
    /// Treat any matcher failure as fatal.
    pub fn into_result(self) -> Result<Vec<AnnotatedTask>, FilterError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.tasks),
        }
    }

    #[inline]
    pub fn is_partial(&self) -> bool {
        self.error.is_some()
    }
}

/// Runs a [`MatcherSet`] over discovered tasks.
///
/// Holds no state between calls; the same filter may be used for any number of runs.
#[derive(Clone)]
pub struct TaskFilter {
    matchers: MatcherSet,
    log: Arc<dyn MatchLog>,
}

impl TaskFilter {
    #[inline]
    pub fn new(matchers: MatcherSet) -> Self {
        Self {
            matchers,
            log: Arc::new(TracingLog),
        }
    }

    #[inline]
    pub fn with_log(mut self, log: Arc<dyn MatchLog>) -> Self {
        self.log = log;
        self
    }

    #[inline]
    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    /// Return every task with at least one matched container.
    #[instrument(level = "debug", skip_all, fields(tasks = tasks.len(), matchers = self.matchers.len()))]
    pub fn filter(&self, tasks: Vec<Task>) -> FilterOutcome {
        let executed = execute(&tasks, &self.matchers, self.log.as_ref());

        let mut annotated = AnnotatedTask::wrap_all(tasks);
        let touched = merge(&mut annotated, executed.matched);
        let tasks = sort(annotated, touched);

        let error = FilterError::from_failures(executed.failures);
        debug!(
            matched_tasks = tasks.len(),
            failures = error.as_ref().map_or(0, |e| e.failures().len()),
            "filter completed"
        );
        FilterOutcome { tasks, error }
    }
}
