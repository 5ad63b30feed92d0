//! End-to-end behaviour of the task filter.

use std::sync::{Arc, Mutex};

use vigil_filter::{MatchLog, MatchRecord, TaskFilter};
use vigil_match::{
    Evaluation, MatchError, Matcher, MatcherConfig, MatcherFailure, MatcherSet, Target,
};
use vigil_model::{
    AnnotatedTask, Container, MatchResult, MatchedContainer, MatchedTarget, MatcherIndex,
    MatcherType, Task,
};

/// Matches containers whose name is listed; optionally fails on a named container.
struct Names {
    tpe: MatcherType,
    names: Vec<&'static str>,
    fail_on: Option<&'static str>,
}

impl Names {
    fn new(tpe: MatcherType, names: &[&'static str]) -> Arc<dyn Matcher> {
        Arc::new(Self {
            tpe,
            names: names.to_vec(),
            fail_on: None,
        })
    }

    fn failing(tpe: MatcherType, names: &[&'static str], fail_on: &'static str) -> Arc<dyn Matcher> {
        Arc::new(Self {
            tpe,
            names: names.to_vec(),
            fail_on: Some(fail_on),
        })
    }
}

impl Matcher for Names {
    fn matcher_type(&self) -> MatcherType {
        self.tpe
    }

    fn match_targets(
        &self,
        _task: &Task,
        container: &Container,
    ) -> Result<Option<Vec<Target>>, MatchError> {
        if self.fail_on == Some(container.name.as_str()) {
            return Err(MatchError::Custom(format!("malformed pattern on {}", container.name)));
        }
        if !self.names.contains(&container.name.as_str()) {
            return Ok(None);
        }
        Ok(Some(vec![Target {
            port: 8080,
            metrics_path: "/metrics".into(),
            job: self.tpe.to_string(),
        }]))
    }
}

/// Docker label matcher whose own evaluation claims a foreign identity and a container that does not exist.
struct Misreporting;

impl Matcher for Misreporting {
    fn matcher_type(&self) -> MatcherType {
        MatcherType::DockerLabel
    }

    fn match_targets(
        &self,
        _task: &Task,
        _container: &Container,
    ) -> Result<Option<Vec<Target>>, MatchError> {
        Ok(None)
    }

    fn evaluate(&self, _tasks: &[Task], _index: MatcherIndex) -> Evaluation {
        let claim = |task_index, container_index| MatchedContainer {
            task_index,
            container_index,
            targets: vec![MatchedTarget {
                matcher_type: MatcherType::Service,
                matcher_index: 7,
                port: 9100,
                metrics_path: "/metrics".into(),
                job: String::new(),
            }],
        };
        Evaluation {
            result: MatchResult::from_containers(vec![claim(1, 42), claim(0, 0)]),
            failure: Some(MatcherFailure {
                matcher_type: MatcherType::Service,
                index: 9,
                errors: vec![],
            }),
        }
    }
}

#[derive(Default)]
struct Recorder(Mutex<Vec<MatchRecord>>);

impl MatchLog for Recorder {
    fn matched(&self, record: &MatchRecord) {
        self.0.lock().unwrap().push(*record);
    }
}

/// T0 {C0, C1}, T1 {C2}.
fn example_tasks() -> Vec<Task> {
    vec![
        Task::new("t0", "def")
            .with_container(Container::new("C0"))
            .with_container(Container::new("C1")),
        Task::new("t1", "def").with_container(Container::new("C2")),
    ]
}

fn summary(tasks: &[AnnotatedTask]) -> Vec<(usize, Vec<(usize, MatcherType)>)> {
    tasks
        .iter()
        .map(|t| {
            let matched = t
                .matched()
                .iter()
                .map(|m| (m.container_index, m.targets[0].matcher_type))
                .collect();
            (t.index(), matched)
        })
        .collect()
}

#[test]
fn name_and_port_example() {
    let set = MatcherSet::new()
        .with(Names::new(MatcherType::Service, &["C1"]))
        .with(Names::new(MatcherType::DockerLabel, &["C0", "C2"]));

    let out = TaskFilter::new(set).filter(example_tasks());

    assert!(out.error.is_none());
    assert_eq!(
        summary(&out.tasks),
        vec![
            (0, vec![(0, MatcherType::DockerLabel), (1, MatcherType::Service)]),
            (1, vec![(0, MatcherType::DockerLabel)]),
        ]
    );
}

#[test]
fn failing_name_matcher_example() {
    let set = MatcherSet::new()
        .with(Names::failing(MatcherType::Service, &[], "C1"))
        .with(Names::new(MatcherType::DockerLabel, &["C0", "C2"]));

    let out = TaskFilter::new(set).filter(example_tasks());

    assert_eq!(
        summary(&out.tasks),
        vec![
            (0, vec![(0, MatcherType::DockerLabel)]),
            (1, vec![(0, MatcherType::DockerLabel)]),
        ]
    );
    let err = out.error.expect("service matcher failure must be reported");
    assert_eq!(err.failures().len(), 1);
    let MatcherFailure {
        matcher_type,
        index,
        errors,
    } = &err.failures()[0];
    assert_eq!((*matcher_type, *index), (MatcherType::Service, 0));
    assert_eq!(errors.len(), 1);
    assert_eq!((errors[0].task_index, errors[0].container_index), (0, 1));
}

#[test]
fn priority_law_holds_for_every_overlap() {
    // lowest priority registered first to make sure registration order is irrelevant
    let set = MatcherSet::new()
        .with(Names::new(MatcherType::DockerLabel, &["C0", "C1", "C2"]))
        .with(Names::new(MatcherType::TaskDefinition, &["C0", "C1"]))
        .with(Names::new(MatcherType::Service, &["C0"]));

    let out = TaskFilter::new(set).filter(example_tasks());

    assert_eq!(
        summary(&out.tasks),
        vec![
            (
                0,
                vec![(0, MatcherType::Service), (1, MatcherType::TaskDefinition)]
            ),
            (1, vec![(0, MatcherType::DockerLabel)]),
        ]
    );
}

#[test]
fn partial_failure_counts_once_per_matcher() {
    let tasks = vec![
        Task::new("t0", "d")
            .with_container(Container::new("bad"))
            .with_container(Container::new("ok")),
        Task::new("t1", "d").with_container(Container::new("bad")),
    ];
    let set = MatcherSet::new()
        .with(Names::failing(MatcherType::TaskDefinition, &["ok"], "bad"))
        .with(Names::new(MatcherType::TaskDefinition, &["bad"]));

    let out = TaskFilter::new(set).filter(tasks);

    let err = out.error.as_ref().unwrap();
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].errors.len(), 2);

    // the healthy matcher claims both "bad" containers, the failing one keeps "ok"
    assert_eq!(out.tasks.len(), 2);
    let ok = out.tasks[0].matched_container(1).unwrap();
    assert_eq!(ok.targets[0].matcher_index, 0);
    let bad = out.tasks[1].matched_container(0).unwrap();
    assert_eq!(bad.targets[0].matcher_index, 1);
    assert!(out.is_partial());
    assert!(out.into_result().is_err());
}

#[test]
fn matcher_cannot_forge_identity_or_containers() {
    let set = MatcherSet::new()
        .with(Arc::new(Misreporting))
        .with(Names::new(MatcherType::TaskDefinition, &["C1"]));

    let out = TaskFilter::new(set).filter(example_tasks());

    // container 42 of the single-container T1 is dropped, so T1 is not in the output
    assert_eq!(
        summary(&out.tasks),
        vec![(
            0,
            vec![(0, MatcherType::DockerLabel), (1, MatcherType::TaskDefinition)]
        )]
    );
    assert_eq!(out.tasks[0].matched_container(0).unwrap().targets[0].matcher_index, 0);

    let err = out.error.unwrap();
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].matcher_type, MatcherType::DockerLabel);
    assert_eq!(err.failures()[0].index, 0);
}

#[test]
fn unmatched_tasks_are_excluded() {
    let tasks = vec![
        Task::new("t0", "d").with_container(Container::new("x")),
        Task::new("t1", "d").with_container(Container::new("hit")),
        Task::new("t2", "d"),
        Task::new("t3", "d").with_container(Container::new("y")),
    ];
    let set = MatcherSet::new().with(Names::new(MatcherType::Service, &["hit"]));

    let out = TaskFilter::new(set).filter(tasks);
    let ids: Vec<_> = out.tasks.iter().map(AnnotatedTask::index).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn output_is_ordered_unique_and_repeatable() {
    let tasks: Vec<Task> = (0..12)
        .map(|i| {
            (0..5).fold(Task::new(format!("t{i}"), "d"), |t, c| {
                t.with_container(Container::new(format!("c{}", (i * 7 + c * 3) % 6)))
            })
        })
        .collect();
    let set = MatcherSet::new()
        .with(Names::new(MatcherType::DockerLabel, &["c1", "c2", "c5"]))
        .with(Names::new(MatcherType::Service, &["c2", "c4"]))
        .with(Names::new(MatcherType::TaskDefinition, &["c0", "c5"]))
        .with(Names::new(MatcherType::DockerLabel, &["c0", "c3"]));
    let filter = TaskFilter::new(set);

    let first = filter.filter(tasks.clone());
    let second = filter.filter(tasks);
    assert_eq!(first, second);

    let ids: Vec<_> = first.tasks.iter().map(AnnotatedTask::index).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    for task in &first.tasks {
        let containers: Vec<_> = task.matched().iter().map(|m| m.container_index).collect();
        assert!(containers.windows(2).all(|w| w[0] < w[1]), "task {}", task.index());
    }
}

#[test]
fn log_receives_one_record_per_matcher() {
    let set = MatcherSet::new()
        .with(Names::new(MatcherType::DockerLabel, &["C0", "C2"]))
        .with(Names::new(MatcherType::Service, &["C1"]));
    let log = Arc::new(Recorder::default());

    TaskFilter::new(set)
        .with_log(log.clone())
        .filter(example_tasks());

    let records = log.0.lock().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].matcher_type, MatcherType::Service);
    assert_eq!(records[0].matched_containers, 1);
    assert_eq!(records[1].matcher_type, MatcherType::DockerLabel);
    assert_eq!(records[1].matched_tasks, 2);
    assert!(records.iter().all(|r| r.tasks == 2));
}

#[test]
fn empty_inputs() {
    let out = TaskFilter::new(MatcherSet::new()).filter(example_tasks());
    assert!(out.tasks.is_empty());
    assert!(out.error.is_none());

    let set = MatcherSet::new().with(Names::new(MatcherType::Service, &["C0"]));
    let out = TaskFilter::new(set).filter(vec![]);
    assert!(out.tasks.is_empty());
    assert!(out.error.is_none());
}

#[test]
fn configured_matchers_end_to_end() {
    let cfg: MatcherConfig = serde_json::from_value(serde_json::json!({
        "services": [
            { "name_pattern": "^web$", "metrics_ports": [9100], "job_name": "web" }
        ],
        "task_definitions": [
            { "arn_pattern": "task-definition/web:", "metrics_ports": [9100, 9200] }
        ],
        "docker_labels": [
            { "port_label": "PROM_PORT", "metrics_path_label": "PROM_PATH" }
        ]
    }))
    .unwrap();

    let tasks = vec![
        Task::new("t0", "arn:task-definition/web:1")
            .with_service("web")
            .with_container(Container::new("app").with_port(9100).with_port(9200))
            .with_container(Container::new("envoy").with_port(9200)),
        Task::new("t1", "arn:task-definition/batch:4")
            .with_container(Container::new("job").with_label("PROM_PORT", "nope")),
        Task::new("t2", "arn:task-definition/batch:4").with_container(
            Container::new("job")
                .with_label("PROM_PORT", "9404")
                .with_label("PROM_PATH", "/prom"),
        ),
    ];

    let out = TaskFilter::new(cfg.build().unwrap()).filter(tasks);

    let ids: Vec<_> = out.tasks.iter().map(AnnotatedTask::index).collect();
    assert_eq!(ids, vec![0, 2]);

    // service claims the app container (port 9100 only), task definition gets envoy
    let app = out.tasks[0].matched_container(0).unwrap();
    assert_eq!(app.targets.len(), 1);
    assert_eq!(app.targets[0].matcher_type, MatcherType::Service);
    assert_eq!(app.targets[0].job, "web");
    let envoy = out.tasks[0].matched_container(1).unwrap();
    assert_eq!(envoy.targets[0].matcher_type, MatcherType::TaskDefinition);
    assert_eq!(envoy.targets[0].port, 9200);

    let labelled: Vec<_> = out.tasks[1].targets().map(|(c, t)| (c, t.port, t.metrics_path.as_str())).collect();
    assert_eq!(labelled, vec![(0, 9404, "/prom")]);

    let err = out.error.unwrap();
    assert_eq!(err.failures()[0].matcher_type, MatcherType::DockerLabel);
    assert_eq!(err.failures()[0].errors[0].task_index, 1);
}
