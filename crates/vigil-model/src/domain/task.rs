use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A discovered workload.
///
/// The filter never looks at a task's identity fields; it identifies a task by its position in the input sequence.
/// The fields below are what the built-in matchers read.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task ARN (e.g. `"arn:aws:ecs:us-west-2:123:task/cluster/abc"`).
    #[serde(default)]
    pub arn: String,
    /// ARN of the task definition the task was started from.
    #[serde(default)]
    pub definition_arn: String,
    /// Name of the service that launched the task.
    ///
    /// `None` for standalone tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Containers in definition order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<Container>,
}

impl Task {
    pub fn new(arn: impl Into<String>, definition_arn: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            definition_arn: definition_arn.into(),
            service: None,
            containers: Vec::new(),
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_container(mut self, container: Container) -> Self {
        self.containers.push(container);
        self
    }

    /// Container at `index`, if the task has one there.
    #[inline]
    pub fn container(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }
}

/// A single container of a [`Task`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub name: String,
    /// Docker labels, kept sorted so lookups and serialization are stable.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub docker_labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub port_mappings: Vec<PortMapping>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docker_labels: BTreeMap::new(),
            port_mappings: Vec::new(),
        }
    }

    pub fn with_label<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.docker_labels.insert(key.into(), value.into());
        self
    }

    pub fn with_port(mut self, container_port: u16) -> Self {
        self.port_mappings.push(PortMapping {
            container_port,
            host_port: None,
        });
        self
    }

    /// Value of a docker label.
    #[inline]
    pub fn label(&self, key: &str) -> Option<&str> {
        self.docker_labels.get(key).map(String::as_str)
    }

    /// Returns `true` if any port mapping exposes `port` on the container side.
    pub fn exposes(&self, port: u16) -> bool {
        self.port_mappings.iter().any(|m| m.container_port == port)
    }
}

/// Port mapping declared for a container.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    pub container_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<u16>,
}
