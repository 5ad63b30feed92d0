use std::collections::{HashMap, HashSet};

use tracing::{trace, warn};
use vigil_model::{AnnotatedTask, MatchResult, MatcherType, TaskIndex};

/// Attach matched containers to their tasks, types in priority order.
///
/// Within a type, results are consumed in configuration-index order.
/// A container already attached by an earlier (higher priority) result is left as is.
/// Returns the indexes of every task with at least one match.
pub(crate) fn merge(
    tasks: &mut [AnnotatedTask],
    mut matched: HashMap<MatcherType, Vec<MatchResult>>,
) -> HashSet<TaskIndex> {
    let mut touched = HashSet::new();

    for tpe in MatcherType::PRIORITY {
        let Some(results) = matched.remove(&tpe) else {
            continue;
        };
        for result in results {
            for container in result.containers {
                let task_index = container.task_index;
                let Some(task) = tasks.get_mut(task_index) else {
                    warn!(
                        matcher_type = %tpe,
                        task_index,
                        "matched container refers to an unknown task; skipped"
                    );
                    continue;
                };

                let container_index = container.container_index;
                if task.task().container(container_index).is_none() {
                    warn!(
                        matcher_type = %tpe,
                        task_index,
                        container_index,
                        "matched container does not exist in its task; skipped"
                    );
                    continue;
                }

                touched.insert(task_index);
                if !task.add_matched_container(container) {
                    trace!(
                        matcher_type = %tpe,
                        task_index,
                        container_index,
                        "container already matched by a higher priority matcher"
                    );
                }
            }
        }
    }
    touched
}
