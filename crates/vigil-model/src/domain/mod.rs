mod task;
pub use task::{Container, PortMapping, Task};

mod matcher_type;
pub use matcher_type::MatcherType;

mod matched;
pub use matched::{MatchResult, MatchedContainer, MatchedTarget};

mod annotated;
pub use annotated::AnnotatedTask;

/// Position of a task in the input sequence of one filter run.
pub type TaskIndex = usize;

/// Position of a container inside its owning task.
pub type ContainerIndex = usize;

/// Zero-based position of a matcher among the configured matchers of its type.
pub type MatcherIndex = usize;

/// Metrics path used when neither config nor labels provide one.
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
