use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vigil_model::{DEFAULT_METRICS_PATH, MatcherIndex, MatcherType};

use crate::error::ConfigError;
use crate::kind::{DockerLabelMatcher, ExportSetting, ServiceMatcher, TaskDefinitionMatcher};
use crate::matcher::MatcherSet;

/// Export settings shared by every matcher kind.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommonExporterConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job_name: String,
    /// Defaults to `/metrics` when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metrics_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics_ports: Vec<u16>,
}

impl CommonExporterConfig {
    fn metrics_path(&self) -> String {
        if self.metrics_path.is_empty() {
            DEFAULT_METRICS_PATH.to_string()
        } else {
            self.metrics_path.clone()
        }
    }

    fn export_setting(
        &self,
        matcher_type: MatcherType,
        index: MatcherIndex,
    ) -> Result<ExportSetting, ConfigError> {
        if self.metrics_ports.is_empty() {
            return Err(ConfigError::MissingPorts {
                matcher_type,
                index,
            });
        }
        Ok(ExportSetting {
            job_name: self.job_name.clone(),
            metrics_path: self.metrics_path(),
            metrics_ports: self.metrics_ports.clone(),
        })
    }
}

/// Select tasks by service name.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(flatten)]
    pub common: CommonExporterConfig,
    pub name_pattern: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub container_name_pattern: String,
}

/// Select tasks by task definition ARN.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinitionConfig {
    #[serde(flatten)]
    pub common: CommonExporterConfig,
    pub arn_pattern: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub container_name_pattern: String,
}

/// Select containers by docker labels.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DockerLabelConfig {
    #[serde(flatten)]
    pub common: CommonExporterConfig,
    /// Label holding the metrics port.
    pub port_label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job_name_label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metrics_path_label: String,
}

/// Declarative matcher configuration.
///
/// Each list is indexed in order: the position of an entry is its matcher index within the type.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
    #[serde(default)]
    pub task_definitions: Vec<TaskDefinitionConfig>,
    #[serde(default)]
    pub docker_labels: Vec<DockerLabelConfig>,
}

impl MatcherConfig {
    /// Validate the configuration and compile it into a [`MatcherSet`].
    pub fn build(&self) -> Result<MatcherSet, ConfigError> {
        let mut set = MatcherSet::new();

        for (index, cfg) in self.services.iter().enumerate() {
            let tpe = MatcherType::Service;
            let name = required_pattern(tpe, index, "name_pattern", &cfg.name_pattern)?;
            let container_name = optional_pattern(
                tpe,
                index,
                "container_name_pattern",
                &cfg.container_name_pattern,
            )?;
            let export = cfg.common.export_setting(tpe, index)?;
            set.register(Arc::new(ServiceMatcher::new(name, container_name, export)));
        }

        for (index, cfg) in self.task_definitions.iter().enumerate() {
            let tpe = MatcherType::TaskDefinition;
            let arn = required_pattern(tpe, index, "arn_pattern", &cfg.arn_pattern)?;
            let container_name = optional_pattern(
                tpe,
                index,
                "container_name_pattern",
                &cfg.container_name_pattern,
            )?;
            let export = cfg.common.export_setting(tpe, index)?;
            set.register(Arc::new(TaskDefinitionMatcher::new(
                arn,
                container_name,
                export,
            )));
        }

        for (index, cfg) in self.docker_labels.iter().enumerate() {
            if cfg.port_label.trim().is_empty() {
                return Err(ConfigError::MissingPortLabel { index });
            }
            set.register(Arc::new(DockerLabelMatcher::new(
                cfg.port_label.trim().to_string(),
                non_empty(&cfg.job_name_label),
                non_empty(&cfg.metrics_path_label),
                cfg.common.job_name.clone(),
                cfg.common.metrics_path(),
            )));
        }

        debug!(matchers = set.len(), "matcher config compiled");
        Ok(set)
    }
}

fn required_pattern(
    matcher_type: MatcherType,
    index: MatcherIndex,
    field: &'static str,
    pattern: &str,
) -> Result<Regex, ConfigError> {
    optional_pattern(matcher_type, index, field, pattern)?.ok_or(ConfigError::EmptyPattern {
        matcher_type,
        index,
        field,
    })
}

fn optional_pattern(
    matcher_type: MatcherType,
    index: MatcherIndex,
    field: &'static str,
    pattern: &str,
) -> Result<Option<Regex>, ConfigError> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(pattern)
        .map(Some)
        .map_err(|e| ConfigError::InvalidPattern {
            matcher_type,
            index,
            field,
            pattern: pattern.to_string(),
            source: Box::new(e),
        })
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
