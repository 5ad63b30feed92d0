use thiserror::Error;
use vigil_model::{ContainerIndex, MatcherIndex, MatcherType, TaskIndex};

/// Failure while matching a single container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid port in label {label}: {value:?}")]
    InvalidPortLabel { label: String, value: String },
    #[error("{0}")]
    Custom(String),
}

/// A [`MatchError`] located at a specific container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("task {task_index} container {container_index}: {source}")]
pub struct ContainerError {
    pub task_index: TaskIndex,
    pub container_index: ContainerIndex,
    #[source]
    pub source: MatchError,
}

/// All errors raised by one matcher invocation.
///
/// A matcher that fails on several containers still produces a single failure entry, named by its type and configuration index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{matcher_type} matcher #{index} failed: {}", join(.errors))]
pub struct MatcherFailure {
    pub matcher_type: MatcherType,
    pub index: MatcherIndex,
    pub errors: Vec<ContainerError>,
}

fn join(errors: &[ContainerError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Invalid matcher configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{matcher_type} matcher #{index}: invalid {field} {pattern:?}: {source}")]
    InvalidPattern {
        matcher_type: MatcherType,
        index: MatcherIndex,
        field: &'static str,
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
    #[error("{matcher_type} matcher #{index}: {field} must not be empty")]
    EmptyPattern {
        matcher_type: MatcherType,
        index: MatcherIndex,
        field: &'static str,
    },
    #[error("{matcher_type} matcher #{index}: metrics_ports must not be empty")]
    MissingPorts {
        matcher_type: MatcherType,
        index: MatcherIndex,
    },
    #[error("docker_label matcher #{index}: port_label must not be empty")]
    MissingPortLabel { index: MatcherIndex },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_names_type_index_and_containers() {
        let failure = MatcherFailure {
            matcher_type: MatcherType::DockerLabel,
            index: 2,
            errors: vec![
                ContainerError {
                    task_index: 0,
                    container_index: 1,
                    source: MatchError::InvalidPortLabel {
                        label: "PORT".into(),
                        value: "abc".into(),
                    },
                },
                ContainerError {
                    task_index: 3,
                    container_index: 0,
                    source: MatchError::Custom("boom".into()),
                },
            ],
        };

        assert_eq!(
            failure.to_string(),
            "docker_label matcher #2 failed: task 0 container 1: invalid port in label PORT: \"abc\", task 3 container 0: boom"
        );
    }

    #[test]
    fn config_error_messages() {
        let err = ConfigError::MissingPorts {
            matcher_type: MatcherType::Service,
            index: 1,
        };
        assert_eq!(err.to_string(), "service matcher #1: metrics_ports must not be empty");
        assert_eq!(
            ConfigError::MissingPortLabel { index: 0 }.to_string(),
            "docker_label matcher #0: port_label must not be empty"
        );
    }
}
