use vigil_model::{Container, MatcherType, Task};

use crate::error::MatchError;
use crate::matcher::{Matcher, Target};

/// Matches containers carrying a docker label with the metrics port.
///
/// Job name and metrics path may be overridden per container through further labels.
#[derive(Clone, Debug)]
pub struct DockerLabelMatcher {
    port_label: String,
    job_name_label: Option<String>,
    metrics_path_label: Option<String>,
    job_name: String,
    metrics_path: String,
}

impl DockerLabelMatcher {
    pub(crate) fn new(
        port_label: String,
        job_name_label: Option<String>,
        metrics_path_label: Option<String>,
        job_name: String,
        metrics_path: String,
    ) -> Self {
        Self {
            port_label,
            job_name_label,
            metrics_path_label,
            job_name,
            metrics_path,
        }
    }

    fn label_or<'a>(container: &'a Container, label: Option<&str>, fallback: &'a str) -> &'a str {
        label
            .and_then(|l| container.label(l))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(fallback)
    }
}

impl Matcher for DockerLabelMatcher {
    fn matcher_type(&self) -> MatcherType {
        MatcherType::DockerLabel
    }

    fn match_targets(
        &self,
        _task: &Task,
        container: &Container,
    ) -> Result<Option<Vec<Target>>, MatchError> {
        let Some(value) = container.label(&self.port_label) else {
            return Ok(None);
        };
        let port = match value.trim().parse::<u16>() {
            Ok(port) if port != 0 => port,
            _ => {
                return Err(MatchError::InvalidPortLabel {
                    label: self.port_label.clone(),
                    value: value.to_string(),
                });
            }
        };

        let metrics_path =
            Self::label_or(container, self.metrics_path_label.as_deref(), &self.metrics_path);
        let job = Self::label_or(container, self.job_name_label.as_deref(), &self.job_name);

        Ok(Some(vec![Target {
            port,
            metrics_path: metrics_path.to_string(),
            job: job.to_string(),
        }]))
    }
}
