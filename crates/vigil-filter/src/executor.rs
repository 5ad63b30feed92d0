use std::collections::HashMap;

use vigil_match::{Evaluation, MatcherFailure, MatcherSet};
use vigil_model::{MatchResult, MatcherIndex, MatcherType, Task};

use crate::log::{MatchLog, MatchRecord};

/// Results of all matcher invocations of one run.
#[derive(Debug, Default)]
pub(crate) struct Executed {
    /// Results per type, in configuration-index order.
    pub matched: HashMap<MatcherType, Vec<MatchResult>>,
    pub failures: Vec<MatcherFailure>,
}

impl Executed {
    fn record(
        &mut self,
        tasks: usize,
        matcher_type: MatcherType,
        matcher_index: MatcherIndex,
        eval: Evaluation,
        log: &dyn MatchLog,
    ) {
        let Evaluation { result, failure } = eval;
        let result = stamp_result(result, matcher_type, matcher_index);

        // A failed invocation still contributes whatever it matched.
        if let Some(mut failure) = failure {
            failure.matcher_type = matcher_type;
            failure.index = matcher_index;
            log.failed(&failure);
            self.failures.push(failure);
        }
        log.matched(&MatchRecord {
            matcher_type,
            matcher_index,
            tasks,
            matched_tasks: result.tasks.len(),
            matched_containers: result.containers.len(),
        });
        self.matched.entry(matcher_type).or_default().push(result);
    }
}

/// Attribute every target to the `(type, index)` the matcher ran under.
///
/// Matchers may override [`vigil_match::Matcher::evaluate`]; what they report about themselves is not trusted.
fn stamp_result(
    result: MatchResult,
    matcher_type: MatcherType,
    matcher_index: MatcherIndex,
) -> MatchResult {
    let mut containers = result.containers;
    for target in containers.iter_mut().flat_map(|c| c.targets.iter_mut()) {
        target.matcher_type = matcher_type;
        target.matcher_index = matcher_index;
    }
    MatchResult::from_containers(containers)
}

/// Run every matcher against the full task list.
#[cfg(not(feature = "parallel"))]
pub(crate) fn execute(tasks: &[Task], matchers: &MatcherSet, log: &dyn MatchLog) -> Executed {
    let mut out = Executed::default();
    for (matcher_type, index, matcher) in matchers.iter() {
        let eval = matcher.evaluate(tasks, index);
        out.record(tasks.len(), matcher_type, index, eval, log);
    }
    out
}

/// Run every matcher against the full task list on the rayon pool.
///
/// Evaluations are collected in the same order as the sequential path, so results and failures are recorded identically.
#[cfg(feature = "parallel")]
pub(crate) fn execute(tasks: &[Task], matchers: &MatcherSet, log: &dyn MatchLog) -> Executed {
    use rayon::prelude::*;

    let jobs: Vec<_> = matchers.iter().collect();
    let evals: Vec<Evaluation> = jobs
        .par_iter()
        .map(|(_, index, matcher)| matcher.evaluate(tasks, *index))
        .collect();

    let mut out = Executed::default();
    for ((matcher_type, index, _), eval) in jobs.into_iter().zip(evals) {
        out.record(tasks.len(), matcher_type, index, eval, log);
    }
    out
}
