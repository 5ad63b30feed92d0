use regex::Regex;
use vigil_model::{Container, MatcherType, Task};

use crate::error::MatchError;
use crate::kind::{ExportSetting, match_container_targets};
use crate::matcher::{Matcher, Target};

/// Matches tasks by the name of the service that launched them.
///
/// Standalone tasks (no service) never match.
#[derive(Clone, Debug)]
pub struct ServiceMatcher {
    name: Regex,
    container_name: Option<Regex>,
    export: ExportSetting,
}

impl ServiceMatcher {
    pub(crate) fn new(name: Regex, container_name: Option<Regex>, export: ExportSetting) -> Self {
        Self {
            name,
            container_name,
            export,
        }
    }
}

impl Matcher for ServiceMatcher {
    fn matcher_type(&self) -> MatcherType {
        MatcherType::Service
    }

    fn match_targets(
        &self,
        task: &Task,
        container: &Container,
    ) -> Result<Option<Vec<Target>>, MatchError> {
        let Some(service) = task.service.as_deref() else {
            return Ok(None);
        };
        if !self.name.is_match(service) {
            return Ok(None);
        }
        Ok(match_container_targets(
            self.container_name.as_ref(),
            &self.export,
            container,
        ))
    }
}
