use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;
use vigil_model::{
    Container, MatchResult, MatchedContainer, MatchedTarget, MatcherIndex, MatcherType, Task,
};

use crate::error::{ContainerError, MatchError, MatcherFailure};

/// Scrape target reported by a matcher for one container.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Target {
    pub port: u16,
    pub metrics_path: String,
    pub job: String,
}

impl Target {
    fn into_matched(self, matcher_type: MatcherType, matcher_index: MatcherIndex) -> MatchedTarget {
        MatchedTarget {
            matcher_type,
            matcher_index,
            port: self.port,
            metrics_path: self.metrics_path,
            job: self.job,
        }
    }
}

/// Outcome of running one matcher over all tasks.
///
/// `result` is always well-formed, even when `failure` is set: containers that could be matched are reported, the others are listed in the failure.
#[derive(Clone, Debug, Default)]
pub struct Evaluation {
    pub result: MatchResult,
    pub failure: Option<MatcherFailure>,
}

/// A configured pattern evaluated against every container of every task.
pub trait Matcher: Send + Sync {
    /// Category this matcher is registered under.
    fn matcher_type(&self) -> MatcherType;

    /// Match a single container.
    ///
    /// - `Ok(None)`: not matched
    /// - `Ok(Some(targets))`: matched, exporting `targets`
    /// - `Err(_)`: the container could not be evaluated
    fn match_targets(
        &self,
        task: &Task,
        container: &Container,
    ) -> Result<Option<Vec<Target>>, MatchError>;

    /// Run the matcher over the complete task list.
    ///
    /// Errors on one container never stop the scan; they are folded into a single [`MatcherFailure`].
    fn evaluate(&self, tasks: &[Task], index: MatcherIndex) -> Evaluation {
        let matcher_type = self.matcher_type();
        let mut containers = Vec::new();
        let mut errors = Vec::new();

        for (task_index, task) in tasks.iter().enumerate() {
            for (container_index, container) in task.containers.iter().enumerate() {
                match self.match_targets(task, container) {
                    Ok(None) => {}
                    Ok(Some(targets)) => containers.push(MatchedContainer {
                        task_index,
                        container_index,
                        targets: targets
                            .into_iter()
                            .map(|t| t.into_matched(matcher_type, index))
                            .collect(),
                    }),
                    Err(source) => errors.push(ContainerError {
                        task_index,
                        container_index,
                        source,
                    }),
                }
            }
        }

        let failure = (!errors.is_empty()).then(|| MatcherFailure {
            matcher_type,
            index,
            errors,
        });
        Evaluation {
            result: MatchResult::from_containers(containers),
            failure,
        }
    }
}

/// Matchers grouped by type, each group in configuration order.
#[derive(Clone, Default)]
pub struct MatcherSet {
    by_type: HashMap<MatcherType, Vec<Arc<dyn Matcher>>>,
}

impl MatcherSet {
    #[inline]
    pub fn new() -> Self {
        Self {
            by_type: HashMap::new(),
        }
    }

    /// Append a matcher to the group of its type and return its configuration index.
    pub fn register(&mut self, matcher: Arc<dyn Matcher>) -> MatcherIndex {
        let matcher_type = matcher.matcher_type();
        let group = self.by_type.entry(matcher_type).or_default();
        group.push(matcher);

        let index = group.len() - 1;
        trace!(%matcher_type, index, "matcher registered");
        index
    }

    #[inline]
    pub fn with(mut self, matcher: Arc<dyn Matcher>) -> Self {
        self.register(matcher);
        self
    }

    /// Matchers of one type, in configuration order.
    pub fn get(&self, matcher_type: MatcherType) -> &[Arc<dyn Matcher>] {
        self.by_type
            .get(&matcher_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate all matchers, types in priority order and each type in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (MatcherType, MatcherIndex, &Arc<dyn Matcher>)> {
        MatcherType::PRIORITY.into_iter().flat_map(move |tpe| {
            self.get(tpe)
                .iter()
                .enumerate()
                .map(move |(index, m)| (tpe, index, m))
        })
    }

    pub fn len(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
