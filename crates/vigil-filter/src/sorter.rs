use std::collections::HashSet;

use vigil_model::{AnnotatedTask, TaskIndex};

/// Keep touched tasks only, ordered by task index, each with containers ordered by container index.
pub(crate) fn sort(tasks: Vec<AnnotatedTask>, touched: HashSet<TaskIndex>) -> Vec<AnnotatedTask> {
    let mut indexes: Vec<TaskIndex> = touched.into_iter().collect();
    indexes.sort_unstable();

    let mut slots: Vec<Option<AnnotatedTask>> = tasks.into_iter().map(Some).collect();
    indexes
        .into_iter()
        .filter_map(|i| slots.get_mut(i).and_then(Option::take))
        .map(|mut task| {
            task.sort_matched();
            task
        })
        .collect()
}
