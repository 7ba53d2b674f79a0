mod common;

use common::{run_callbrief, TestEnv, CRM_CSV};

#[test]
fn callbrief_help_shows_usage() {
    let output = run_callbrief(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("lookup"));
}

#[test]
fn callbrief_version_shows_version() {
    let output = run_callbrief(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("callbrief "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_callbrief(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("callbrief"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_show_works() {
    let output = run_callbrief(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[general]"));
    assert!(stdout.contains("[llm]"));
    assert!(stdout.contains("phone_column"));
}

#[test]
fn config_show_redacts_api_key() {
    let env = TestEnv::new();
    let output = env.run_with_env(
        &["config", "show"],
        &[("CALLBRIEF_GEMINI_API_KEY", "super-secret-key")],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(!stdout.contains("super-secret-key"));
    assert!(stdout.contains("<redacted>"));
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_callbrief(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(first.status.success());
    assert!(env.config_path().exists());

    let second = env.run(&["config", "init"]);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn history_works_with_empty_database() {
    let output = run_callbrief(&["history"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "history should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("No analyses found"));
}

#[test]
fn lookup_prints_matching_contact() {
    let env = TestEnv::new();
    let crm = env.write_file("crm.csv", CRM_CSV);

    let output = env.run(&[
        "lookup",
        " 0044 20 7946 0958",
        "--contacts",
        crm.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "lookup should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("phone_number: 0044 20 7946 0958"));
    assert!(stdout.contains("name: Grace Hopper"));
}

#[test]
fn lookup_json_outputs_record() {
    let env = TestEnv::new();
    let crm = env.write_file("crm.csv", CRM_CSV);

    let output = env.run(&[
        "lookup",
        "001-431-560-3386",
        "--contacts",
        crm.to_str().unwrap(),
        "--json",
    ]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("lookup --json prints JSON");
    assert_eq!(value["phone_number"], "001-431-560-3386");
    assert_eq!(value["fields"]["company"], "Analytical Engines");
}

#[test]
fn lookup_reports_unknown_number() {
    let env = TestEnv::new();
    let crm = env.write_file("crm.csv", CRM_CSV);

    let output = env.run(&["lookup", "000-000-0000", "--contacts", crm.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("No matching contact"),
        "expected missing contact error, got:\n{}",
        stderr
    );
}
