use anyhow::Context;
use tracing::{info, warn};

use vigil_filter::TaskFilter;
use vigil_match::MatcherConfig;
use vigil_model::Task;
use vigil_observe::{LoggerConfig, logger_init};

const MATCHERS: &str = r#"{
    "services": [
        { "name_pattern": "^checkout$", "metrics_ports": [9100], "job_name": "checkout" }
    ],
    "task_definitions": [
        { "arn_pattern": ":task-definition/nginx:", "container_name_pattern": "^nginx$", "metrics_ports": [9113] }
    ],
    "docker_labels": [
        { "port_label": "PROMETHEUS_PORT", "job_name_label": "PROMETHEUS_JOB" }
    ]
}"#;

const TASKS: &str = r#"[
    {
        "arn": "arn:aws:ecs:us-west-2:123456789012:task/prod/0a1b",
        "definitionArn": "arn:aws:ecs:us-west-2:123456789012:task-definition/checkout:12",
        "service": "checkout",
        "containers": [
            { "name": "app", "portMappings": [ { "containerPort": 9100 } ],
              "dockerLabels": { "PROMETHEUS_PORT": "9100", "PROMETHEUS_JOB": "ignored" } },
            { "name": "jmx", "dockerLabels": { "PROMETHEUS_PORT": "9404", "PROMETHEUS_JOB": "jvm" } }
        ]
    },
    {
        "arn": "arn:aws:ecs:us-west-2:123456789012:task/prod/2c3d",
        "definitionArn": "arn:aws:ecs:us-west-2:123456789012:task-definition/nginx:3",
        "containers": [
            { "name": "nginx", "portMappings": [ { "containerPort": 9113, "hostPort": 32768 } ] },
            { "name": "log-router", "dockerLabels": { "PROMETHEUS_PORT": "not-a-port" } }
        ]
    },
    {
        "arn": "arn:aws:ecs:us-west-2:123456789012:task/prod/4e5f",
        "definitionArn": "arn:aws:ecs:us-west-2:123456789012:task-definition/batch:1",
        "containers": [ { "name": "worker" } ]
    }
]"#;

fn main() -> anyhow::Result<()> {
    let cfg = LoggerConfig::from_env()?;
    logger_init(&cfg)?;

    let matchers: MatcherConfig =
        serde_json::from_str(MATCHERS).context("failed to parse matcher config")?;
    let tasks: Vec<Task> = serde_json::from_str(TASKS).context("failed to parse tasks")?;
    info!(tasks = tasks.len(), "discovered tasks loaded");

    let filter = TaskFilter::new(matchers.build()?);
    let outcome = filter.filter(tasks);

    if let Some(err) = &outcome.error {
        for failure in err.failures() {
            warn!(
                matcher_type = %failure.matcher_type,
                matcher_index = failure.index,
                "{failure}"
            );
        }
    }

    for task in &outcome.tasks {
        for (container, target) in task.targets() {
            info!(
                task = task.task().arn.as_str(),
                container,
                port = target.port,
                path = target.metrics_path.as_str(),
                job = target.job.as_str(),
                matcher = %target.matcher_type,
                "scrape target"
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&outcome.tasks)?);
    Ok(())
}
