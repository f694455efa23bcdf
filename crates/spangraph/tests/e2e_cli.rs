use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_spangraph")
}

/// Runs the binary inside `dir` with config isolated from the host.
fn spangraph(dir: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .current_dir(dir)
        .env("SPANGRAPH_CONFIG", dir.join("no-such-config.toml"))
        .env_remove("SPANGRAPH_TRACE_INPUT")
        .env_remove("SPANGRAPH_REDUCED_PATH")
        .env_remove("SPANGRAPH_GRAPH_PATH")
        .env_remove("SPANGRAPH_PRETTY")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_sample(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(
        &path,
        serde_json::to_vec_pretty(&testkit::sample_trace()).unwrap(),
    )
    .unwrap();
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn run_uses_default_artifact_names() {
    let temp = tempfile::tempdir().unwrap();
    write_sample(temp.path(), "trace1.json");

    let output = spangraph(temp.path(), &["run"]);
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("File size reduction:"));
    assert!(stdout.contains("Total Services: 5"));
    assert!(stdout.contains("Total Cross-Service Calls: 4"));
    assert!(stdout.contains("frontend -> cart (GET,POST) [2 calls]"));
    assert!(stdout.contains("payments -> fraud-check (UNKNOWN) [1 calls]"));
    assert!(stdout.contains("Output saved to: service-dependency-graph.json"));

    let reduced = read_json(&temp.path().join("trace1-processed.json"));
    assert_eq!(reduced.as_array().unwrap().len(), 9);
    assert!(reduced[0].get("kind").is_none());
    assert!(reduced[1]["attributes"].get("network.peer.address").is_none());
    assert_eq!(reduced[1]["attributes"]["server.port"], 8080);
    assert!(reduced[8].get("attributes").is_none());

    let graph = read_json(&temp.path().join("service-dependency-graph.json"));
    assert_eq!(
        graph["summary"],
        serde_json::json!({"totalServices": 5, "totalEdges": 3, "totalCalls": 4})
    );
}

#[test]
fn reduce_then_graph_with_explicit_paths() {
    let temp = tempfile::tempdir().unwrap();
    write_sample(temp.path(), "raw.json");

    let reduce = spangraph(
        temp.path(),
        &["reduce", "--input", "raw.json", "--output", "out/reduced.json"],
    );
    assert!(reduce.status.success(), "{reduce:?}");
    let stdout = String::from_utf8_lossy(&reduce.stdout);
    assert!(stdout.contains("spans: 9 -> 9"));
    assert!(stdout.contains("output=out/reduced.json"));

    let graph = spangraph(
        temp.path(),
        &[
            "--json",
            "graph",
            "--input",
            "out/reduced.json",
            "--output",
            "out/graph.json",
        ],
    );
    assert!(graph.status.success(), "{graph:?}");
    let printed: serde_json::Value = serde_json::from_slice(&graph.stdout).unwrap();
    assert_eq!(printed, read_json(&temp.path().join("out/graph.json")));
    assert_eq!(printed["edges"][0]["source"], "frontend");
    assert_eq!(printed["edges"][0]["target"], "cart");
    assert_eq!(printed["edges"][0]["allPorts"], serde_json::json!(["8080"]));
}

#[test]
fn glob_input_merges_files() {
    let temp = tempfile::tempdir().unwrap();
    fs::create_dir(temp.path().join("traces")).unwrap();
    fs::write(
        temp.path().join("traces/part-1.json"),
        r#"[{"service": "a", "attributes": {"url.full": "http://b/x", "http.request.method": "GET"}}]"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("traces/part-2.json"),
        r#"[{"service": "a", "attributes": {"url.full": "http://b/y", "http.request.method": "DELETE"}}]"#,
    )
    .unwrap();

    let output = spangraph(
        temp.path(),
        &["--json", "--compact", "run", "--input", "traces/*.json"],
    );
    assert!(output.status.success(), "{output:?}");

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["reduction"]["input_spans"], 2);
    assert_eq!(report["graph"]["edges"][0]["method"], "GET,DELETE");
    assert_eq!(report["graph"]["edges"][0]["callCount"], 2);

    let on_disk = fs::read_to_string(temp.path().join("service-dependency-graph.json")).unwrap();
    assert!(!on_disk.contains('\n'));
}

#[test]
fn show_prints_saved_graph() {
    let temp = tempfile::tempdir().unwrap();
    write_sample(temp.path(), "trace1.json");
    assert!(spangraph(temp.path(), &["run"]).status.success());

    let output = spangraph(temp.path(), &["show"]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Services ==="));
    assert!(stdout.contains("- fraud-check"));
    assert!(stdout.contains("frontend -> payments (POST) [1 calls]"));
}

#[test]
fn env_overrides_select_paths() {
    let temp = tempfile::tempdir().unwrap();
    write_sample(temp.path(), "export.json");

    let output = Command::new(bin())
        .arg("run")
        .current_dir(temp.path())
        .env("SPANGRAPH_CONFIG", temp.path().join("no-such-config.toml"))
        .env("SPANGRAPH_TRACE_INPUT", "export.json")
        .env("SPANGRAPH_REDUCED_PATH", "small.json")
        .env("SPANGRAPH_GRAPH_PATH", "deps.json")
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert!(temp.path().join("small.json").exists());
    assert!(temp.path().join("deps.json").exists());
}

#[test]
fn config_file_is_honored() {
    let temp = tempfile::tempdir().unwrap();
    write_sample(temp.path(), "spans.json");
    let config = temp.path().join("config.toml");
    fs::write(
        &config,
        "trace_input = \"spans.json\"\ngraph_path = \"graph/out.json\"\npretty = false\n",
    )
    .unwrap();

    let output = Command::new(bin())
        .arg("run")
        .current_dir(temp.path())
        .env("SPANGRAPH_CONFIG", &config)
        .env_remove("SPANGRAPH_TRACE_INPUT")
        .env_remove("SPANGRAPH_GRAPH_PATH")
        .env_remove("SPANGRAPH_PRETTY")
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    let graph = fs::read_to_string(temp.path().join("graph/out.json")).unwrap();
    assert!(!graph.contains('\n'));
}

#[test]
fn malformed_input_fails_without_output() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("trace1.json"), "{\"service\": \"api\"}").unwrap();

    let output = spangraph(temp.path(), &["run"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed input"));
    assert!(!temp.path().join("trace1-processed.json").exists());
    assert!(!temp.path().join("service-dependency-graph.json").exists());
}

#[test]
fn missing_input_reports_unavailable() {
    let temp = tempfile::tempdir().unwrap();
    let output = spangraph(temp.path(), &["graph", "--input", "absent.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input unavailable"));
}

#[test]
fn bad_env_flag_is_a_config_error() {
    let temp = tempfile::tempdir().unwrap();
    let output = Command::new(bin())
        .arg("show")
        .current_dir(temp.path())
        .env("SPANGRAPH_CONFIG", temp.path().join("no-such-config.toml"))
        .env("SPANGRAPH_PRETTY", "sometimes")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad pretty in environment"));
}
