use tracing::{debug, warn};
use vigil_match::MatcherFailure;
use vigil_model::{MatcherIndex, MatcherType};

/// Diagnostic summary of one matcher invocation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchRecord {
    pub matcher_type: MatcherType,
    pub matcher_index: MatcherIndex,
    /// Tasks the matcher was run against.
    pub tasks: usize,
    pub matched_tasks: usize,
    pub matched_containers: usize,
}

/// Sink for filter diagnostics.
///
/// Observability only: implementations cannot influence the filter result.
pub trait MatchLog: Send + Sync {
    fn matched(&self, record: &MatchRecord);

    fn failed(&self, _failure: &MatcherFailure) {}
}

/// [`MatchLog`] writing to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl MatchLog for TracingLog {
    #[inline]
    fn matched(&self, r: &MatchRecord) {
        debug!(
            matcher_type = %r.matcher_type,
            matcher_index = r.matcher_index,
            tasks = r.tasks,
            matched_tasks = r.matched_tasks,
            matched_containers = r.matched_containers,
            "matched"
        );
    }

    #[inline]
    fn failed(&self, f: &MatcherFailure) {
        warn!(
            matcher_type = %f.matcher_type,
            matcher_index = f.index,
            errors = f.errors.len(),
            reason = %f,
            "matcher failed"
        );
    }
}
