use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a matcher.
///
/// Matcher types carry a fixed, total priority order used to resolve conflicts when several types match the same container.
/// The order is defined by [`MatcherType::PRIORITY`] and never derived from configuration or registration order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherType {
    /// Matches on the name of the service that launched a task.
    Service,
    /// Matches on the task definition ARN.
    TaskDefinition,
    /// Matches on docker labels of a container.
    DockerLabel,
}

impl MatcherType {
    /// All matcher types, highest priority first.
    pub const PRIORITY: [MatcherType; 3] = [
        MatcherType::Service,
        MatcherType::TaskDefinition,
        MatcherType::DockerLabel,
    ];

    /// Rank of this type in [`MatcherType::PRIORITY`]; lower wins.
    pub const fn priority(self) -> usize {
        match self {
            MatcherType::Service => 0,
            MatcherType::TaskDefinition => 1,
            MatcherType::DockerLabel => 2,
        }
    }

    /// Short symbolic name used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            MatcherType::Service => "service",
            MatcherType::TaskDefinition => "task_definition",
            MatcherType::DockerLabel => "docker_label",
        }
    }
}

impl fmt::Display for MatcherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
