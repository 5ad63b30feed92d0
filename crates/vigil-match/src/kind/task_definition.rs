use regex::Regex;
use vigil_model::{Container, MatcherType, Task};

use crate::error::MatchError;
use crate::kind::{ExportSetting, match_container_targets};
use crate::matcher::{Matcher, Target};

/// Matches tasks by task definition ARN.
#[derive(Clone, Debug)]
pub struct TaskDefinitionMatcher {
    arn: Regex,
    container_name: Option<Regex>,
    export: ExportSetting,
}

impl TaskDefinitionMatcher {
    pub(crate) fn new(arn: Regex, container_name: Option<Regex>, export: ExportSetting) -> Self {
        Self {
            arn,
            container_name,
            export,
        }
    }
}

impl Matcher for TaskDefinitionMatcher {
    fn matcher_type(&self) -> MatcherType {
        MatcherType::TaskDefinition
    }

    fn match_targets(
        &self,
        task: &Task,
        container: &Container,
    ) -> Result<Option<Vec<Target>>, MatchError> {
        if !self.arn.is_match(&task.definition_arn) {
            return Ok(None);
        }
        Ok(match_container_targets(
            self.container_name.as_ref(),
            &self.export,
            container,
        ))
    }
}
