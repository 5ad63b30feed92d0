//! Matchers: the pluggable capability the filter runs against discovered tasks.
//!
//! A [`Matcher`] looks at every container of every task and reports which ones it matches together with the scrape targets they export.
//! The built-in kinds live in [`kind`]; [`MatcherConfig`] turns declarative settings into a ready-to-run [`MatcherSet`].

mod error;
pub use error::{ConfigError, ContainerError, MatchError, MatcherFailure};

mod matcher;
pub use matcher::{Evaluation, Matcher, MatcherSet, Target};

pub mod kind;
pub use kind::{DockerLabelMatcher, ServiceMatcher, TaskDefinitionMatcher};

mod config;
pub use config::{
    CommonExporterConfig, DockerLabelConfig, MatcherConfig, ServiceConfig, TaskDefinitionConfig,
};

pub mod prelude {
    pub use crate::error::{ConfigError, MatchError, MatcherFailure};
    pub use crate::matcher::{Evaluation, Matcher, MatcherSet, Target};
    pub use crate::config::MatcherConfig;
}
