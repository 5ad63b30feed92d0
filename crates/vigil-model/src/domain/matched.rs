use serde::{Deserialize, Serialize};

use crate::{ContainerIndex, MatcherIndex, MatcherType, TaskIndex};

/// A scrape target exported by a matched container.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedTarget {
    /// Type of the matcher that produced this target.
    pub matcher_type: MatcherType,
    /// Configuration index of that matcher within its type.
    pub matcher_index: MatcherIndex,
    pub port: u16,
    pub metrics_path: String,
    /// Job name, empty when neither config nor labels set one.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job: String,
}

/// A container matched by one matcher, with the targets it exports.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedContainer {
    pub task_index: TaskIndex,
    pub container_index: ContainerIndex,
    pub targets: Vec<MatchedTarget>,
}

/// Output of a single matcher run over the whole task list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MatchResult {
    /// Indexes of tasks with at least one matched container, ascending and unique.
    pub tasks: Vec<TaskIndex>,
    /// Matched containers in scan order.
    pub containers: Vec<MatchedContainer>,
}

impl MatchResult {
    /// Build a result from matched containers, deriving the matched task set.
    pub fn from_containers(containers: Vec<MatchedContainer>) -> Self {
        let mut tasks: Vec<TaskIndex> = containers.iter().map(|c| c.task_index).collect();
        tasks.sort_unstable();
        tasks.dedup();
        Self { tasks, containers }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}
