use std::path::Path;

use clap::Parser;
use httpmock::prelude::*;
use serde_json::{json, Value};
use sumo_chores::run_chores;
use sumo_chores_cli::{build_run_config, AmbientEnvironment, Cli, RunConfig};
use tempfile::tempdir;

fn actions_env(output_path: &Path, repository: Option<&str>) -> AmbientEnvironment {
    AmbientEnvironment {
        github_actions: Some("true".to_string()),
        github_output: Some(output_path.display().to_string()),
        github_repository: repository.map(str::to_string),
    }
}

fn run_config(args: &[&str], ambient: &AmbientEnvironment) -> RunConfig {
    let mut argv = vec![
        "sumo-chores",
        "--sumo-access-id",
        "suXXXX",
        "--sumo-access-key",
        "secret",
        "--github-retry-base-delay-ms",
        "1",
    ];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("cli");
    build_run_config(&cli, ambient).expect("run config")
}

/// Parse `key=value` lines written to the step output file.
fn read_outputs(path: &Path) -> Vec<(String, String)> {
    std::fs::read_to_string(path)
        .expect("output file")
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn output_json(outputs: &[(String, String)], key: &str) -> Value {
    let raw = outputs
        .iter()
        .find(|(candidate, _)| candidate == key)
        .map(|(_, value)| value.as_str())
        .unwrap_or_else(|| panic!("missing output {key}"));
    serde_json::from_str(raw).expect("json output")
}

fn mock_monitor_inventory(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/monitors/queries");
        then.status(200)
            .json_body(json!({"data": [{"id": "m1"}, {"id": "m2"}, {"id": "m3"}]}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/monitors")
            .query_param("ids", "m1,m2,m3");
        then.status(200).json_body(json!({"data": [
            {"id": "m1", "name": "API Latency Monitor", "tags": ["prod", "api", "latency"]},
            {"id": "m2", "name": "Database CPU Monitor", "tags": ["dev", "database", "performance"]},
            {"id": "m3", "name": "Network Traffic Monitor",
             "tags": ["prod", "network", "traffic", "critical"]}
        ]}));
    });
}

#[tokio::test]
async fn integration_monitor_tags_files_new_issues_and_reuses_existing_ones() {
    let sumo = MockServer::start();
    mock_monitor_inventory(&sumo);
    let github = MockServer::start();
    github.mock(|when, then| {
        when.method(GET).path("/repos/acme/observability");
        then.status(200)
            .json_body(json!({"full_name": "acme/observability"}));
    });
    github.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/observability/issues")
            .query_param("labels", "sumo-logic,monitor-tags,automated");
        then.status(200).json_body(json!([{
            "number": 7,
            "title": "Non-compliant tags found in Sumo Logic monitor: Database CPU Monitor",
            "html_url": "https://github.com/acme/observability/issues/7"
        }]));
    });
    let create_latency = github.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/observability/issues")
            .body_includes("API Latency Monitor");
        then.status(201).json_body(json!({
            "number": 8,
            "title": "Non-compliant tags found in Sumo Logic monitor: API Latency Monitor",
            "html_url": "https://github.com/acme/observability/issues/8"
        }));
    });
    let create_network = github.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/observability/issues")
            .body_includes("Network Traffic Monitor");
        then.status(201).json_body(json!({
            "number": 9,
            "title": "Non-compliant tags found in Sumo Logic monitor: Network Traffic Monitor",
            "html_url": "https://github.com/acme/observability/issues/9"
        }));
    });

    let temp = tempdir().expect("tempdir");
    let output_path = temp.path().join("github_output");
    let ambient = actions_env(&output_path, Some("acme/observability"));
    let sumo_endpoint = format!("{}/api", sumo.base_url());
    let github_base = github.base_url();
    let config = run_config(
        &[
            "--tasks",
            "monitor-tags",
            "--tag-allowlist",
            "prod,dev,critical",
            "--sumo-api-endpoint",
            &sumo_endpoint,
            "--github-token",
            "ghp_test",
            "--github-api-base",
            &github_base,
        ],
        &ambient,
    );

    let mut stdout = Vec::new();
    run_chores(&config, &mut stdout).await.expect("run");
    create_latency.assert_calls(1);
    create_network.assert_calls(1);
    assert!(stdout.is_empty());

    let outputs = read_outputs(&output_path);
    let keys = outputs.iter().map(|(key, _)| key.as_str()).collect::<Vec<_>>();
    assert_eq!(
        keys,
        vec!["non_compliant_monitors", "non_compliant_count", "github_issues"]
    );
    let monitors = output_json(&outputs, "non_compliant_monitors");
    assert_eq!(monitors.as_array().map(Vec::len), Some(3));
    assert_eq!(monitors[0]["id"], "m1");
    assert_eq!(monitors[0]["non_compliant_tags"], json!(["api", "latency"]));
    assert_eq!(monitors[0]["compliant_tags"], json!(["prod"]));
    assert_eq!(
        monitors[0]["url"],
        "https://service.sumologic.com/ui/#/monitor/edit/m1"
    );
    assert_eq!(output_json(&outputs, "non_compliant_count"), json!(3));

    let issues = output_json(&outputs, "github_issues");
    let statuses = issues
        .as_array()
        .expect("issues")
        .iter()
        .map(|issue| {
            (
                issue["monitor_id"].as_str().unwrap_or_default().to_string(),
                issue["status"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        statuses,
        vec![
            ("m1".to_string(), "created".to_string()),
            ("m2".to_string(), "existing".to_string()),
            ("m3".to_string(), "created".to_string()),
        ]
    );
}

#[tokio::test]
async fn integration_monitor_tags_without_repository_still_reports_violations() {
    let sumo = MockServer::start();
    mock_monitor_inventory(&sumo);
    let github = MockServer::start();
    let any_github_call = github.mock(|when, then| {
        when.path_includes("/repos");
        then.status(200).json_body(json!([]));
    });

    let temp = tempdir().expect("tempdir");
    let output_path = temp.path().join("github_output");
    let ambient = actions_env(&output_path, None);
    let sumo_endpoint = format!("{}/api", sumo.base_url());
    let github_base = github.base_url();
    let config = run_config(
        &[
            "--tasks",
            "monitor-tags",
            "--tag-allowlist",
            "prod",
            "--sumo-api-endpoint",
            &sumo_endpoint,
            "--github-token",
            "ghp_test",
            "--github-api-base",
            &github_base,
        ],
        &ambient,
    );

    run_chores(&config, &mut Vec::new()).await.expect("run");
    any_github_call.assert_calls(0);
    let outputs = read_outputs(&output_path);
    assert_eq!(output_json(&outputs, "non_compliant_count"), json!(3));
    assert!(outputs.iter().all(|(key, _)| key != "github_issues"));
}

#[tokio::test]
async fn integration_full_allowlist_reports_zero_violations() {
    let sumo = MockServer::start();
    mock_monitor_inventory(&sumo);

    let temp = tempdir().expect("tempdir");
    let output_path = temp.path().join("github_output");
    let ambient = actions_env(&output_path, None);
    let sumo_endpoint = format!("{}/api", sumo.base_url());
    let config = run_config(
        &[
            "--tasks",
            "monitor-tags",
            "--tag-allowlist",
            "prod,dev,api,latency,database,performance,network,traffic,critical",
            "--sumo-api-endpoint",
            &sumo_endpoint,
        ],
        &ambient,
    );

    run_chores(&config, &mut Vec::new()).await.expect("run");
    let outputs = read_outputs(&output_path);
    assert_eq!(output_json(&outputs, "non_compliant_monitors"), json!([]));
    assert_eq!(output_json(&outputs, "non_compliant_count"), json!(0));
}

#[tokio::test]
async fn integration_role_check_reports_users_holding_role() {
    let sumo = MockServer::start();
    sumo.mock(|when, then| {
        when.method(GET).path("/api/v1/users");
        then.status(200).json_body(json!({"data": [
            {"id": "0000000000000001", "firstName": "John", "lastName": "Doe",
             "email": "john.doe@example.com"},
            {"id": "0000000000000002", "firstName": "Jane", "lastName": "Smith",
             "email": "jane.smith@example.com"},
            {"id": "0000000000000003", "firstName": "Bob", "lastName": "Johnson",
             "email": "bob.johnson@example.com"}
        ]}));
    });
    let roles = [
        ("0000000000000001", json!([{"id": "0000000000AAAAA1", "name": "Administrator"}])),
        ("0000000000000002", json!([{"id": "0000000000BBBBB2", "name": "Analyst"}])),
        (
            "0000000000000003",
            json!([
                {"id": "0000000000AAAAA1", "name": "Administrator"},
                {"id": "0000000000CCCCC3", "name": "ReadOnly"}
            ]),
        ),
    ];
    for (user_id, data) in roles {
        sumo.mock(|when, then| {
            when.method(GET)
                .path(format!("/api/v1/users/{user_id}/roles"));
            then.status(200).json_body(json!({"data": data}));
        });
    }

    let temp = tempdir().expect("tempdir");
    let output_path = temp.path().join("github_output");
    let ambient = actions_env(&output_path, None);
    let sumo_endpoint = format!("{}/api", sumo.base_url());
    let config = run_config(
        &[
            "--tasks",
            "role-check",
            "--role-id",
            "0000000000AAAAA1",
            "--sumo-api-endpoint",
            &sumo_endpoint,
        ],
        &ambient,
    );

    run_chores(&config, &mut Vec::new()).await.expect("run");
    let outputs = read_outputs(&output_path);
    assert_eq!(output_json(&outputs, "users_count"), json!(2));
    let users = output_json(&outputs, "users_with_role");
    assert_eq!(users[0]["email"], "john.doe@example.com");
    assert_eq!(users[0]["firstName"], "John");
    assert_eq!(users[0]["role"]["name"], "Administrator");
    assert_eq!(users[1]["email"], "bob.johnson@example.com");
}

#[tokio::test]
async fn regression_failed_task_still_emits_outputs_of_successful_task() {
    let sumo = MockServer::start();
    mock_monitor_inventory(&sumo);
    sumo.mock(|when, then| {
        when.method(GET).path("/api/v1/users");
        then.status(500).body("internal error");
    });

    let temp = tempdir().expect("tempdir");
    let output_path = temp.path().join("github_output");
    let ambient = actions_env(&output_path, None);
    let sumo_endpoint = format!("{}/api", sumo.base_url());
    let config = run_config(
        &[
            "--role-id",
            "0000000000AAAAA1",
            "--tag-allowlist",
            "prod,dev",
            "--sumo-api-endpoint",
            &sumo_endpoint,
        ],
        &ambient,
    );

    let error = run_chores(&config, &mut Vec::new())
        .await
        .expect_err("role check failure");
    assert_eq!(error.to_string(), "role-check task failed");
    assert!(format!("{error:#}").contains("status 500"));

    let outputs = read_outputs(&output_path);
    assert!(outputs.iter().all(|(key, _)| !key.starts_with("users_")));
    assert_eq!(output_json(&outputs, "non_compliant_count"), json!(3));
}
