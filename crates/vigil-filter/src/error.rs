use thiserror::Error;
use vigil_match::MatcherFailure;

/// Aggregated failures of one filter run, in the order they were recorded.
///
/// Never returned empty: a run without failures yields no error at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} matcher(s) failed: {}", .failures.len(), join(.failures))]
pub struct FilterError {
    failures: Vec<MatcherFailure>,
}

impl FilterError {
    /// `None` when there is nothing to report.
    pub fn from_failures(failures: Vec<MatcherFailure>) -> Option<Self> {
        (!failures.is_empty()).then_some(Self { failures })
    }

    #[inline]
    pub fn failures(&self) -> &[MatcherFailure] {
        &self.failures
    }
}

fn join(failures: &[MatcherFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
