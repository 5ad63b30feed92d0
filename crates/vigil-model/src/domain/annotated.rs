use std::collections::HashSet;

use serde::Serialize;

use crate::{ContainerIndex, MatchedContainer, MatchedTarget, Task, TaskIndex};

/// A task together with the containers matched during one filter run.
///
/// The matched list is append-only and holds at most one record per container:
/// once a container is attached, later attach attempts for the same container are ignored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedTask {
    index: TaskIndex,
    task: Task,
    matched: Vec<MatchedContainer>,
    #[serde(skip)]
    attached: HashSet<ContainerIndex>,
}

impl AnnotatedTask {
    pub fn new(index: TaskIndex, task: Task) -> Self {
        Self {
            index,
            task,
            matched: Vec::new(),
            attached: HashSet::new(),
        }
    }

    /// Wrap every task of a run, using its position as identity.
    pub fn wrap_all(tasks: Vec<Task>) -> Vec<Self> {
        tasks
            .into_iter()
            .enumerate()
            .map(|(index, task)| Self::new(index, task))
            .collect()
    }

    #[inline]
    pub fn index(&self) -> TaskIndex {
        self.index
    }

    #[inline]
    pub fn task(&self) -> &Task {
        &self.task
    }

    #[inline]
    pub fn matched(&self) -> &[MatchedContainer] {
        &self.matched
    }

    /// Record for a container, if it has been attached.
    pub fn matched_container(&self, container: ContainerIndex) -> Option<&MatchedContainer> {
        self.matched.iter().find(|m| m.container_index == container)
    }

    #[inline]
    pub fn is_matched(&self) -> bool {
        !self.matched.is_empty()
    }

    /// Attach a matched container.
    ///
    /// Returns `false` and leaves the task untouched if the container was already attached.
    pub fn add_matched_container(&mut self, container: MatchedContainer) -> bool {
        if !self.attached.insert(container.container_index) {
            return false;
        }
        self.matched.push(container);
        true
    }

    /// Sort matched containers by container index.
    pub fn sort_matched(&mut self) {
        self.matched.sort_by_key(|m| m.container_index);
    }

    /// Flatten all exported targets as `(container index, target)` pairs.
    pub fn targets(&self) -> impl Iterator<Item = (ContainerIndex, &MatchedTarget)> {
        self.matched
            .iter()
            .flat_map(|m| m.targets.iter().map(move |t| (m.container_index, t)))
    }
}
