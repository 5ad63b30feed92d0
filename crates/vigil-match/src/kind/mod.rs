//! Built-in matcher kinds, one per [`vigil_model::MatcherType`].

mod service;
pub use service::ServiceMatcher;

mod task_definition;
pub use task_definition::TaskDefinitionMatcher;

mod docker_label;
pub use docker_label::DockerLabelMatcher;

use regex::Regex;
use vigil_model::Container;

use crate::matcher::Target;

/// Export settings shared by the pattern-based kinds.
#[derive(Clone, Debug)]
pub(crate) struct ExportSetting {
    pub job_name: String,
    pub metrics_path: String,
    pub metrics_ports: Vec<u16>,
}

/// Targets for every configured port the container exposes.
///
/// `None` if the container name is rejected or no configured port is exposed.
pub(crate) fn match_container_targets(
    container_name: Option<&Regex>,
    setting: &ExportSetting,
    container: &Container,
) -> Option<Vec<Target>> {
    if let Some(re) = container_name
        && !re.is_match(&container.name)
    {
        return None;
    }

    let targets: Vec<Target> = container
        .port_mappings
        .iter()
        .filter(|m| setting.metrics_ports.contains(&m.container_port))
        .map(|m| Target {
            port: m.container_port,
            metrics_path: setting.metrics_path.clone(),
            job: setting.job_name.clone(),
        })
        .collect();

    (!targets.is_empty()).then_some(targets)
}
