use std::process::{Command, Output};
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "PRINTQ_PROGRAM",
    "PRINTQ_TIMEOUT_SECONDS",
    "PRINTQ_SERIALIZE_SUBMISSIONS",
    "PRINTQ_LOG_LEVEL",
    "PRINTQ_LOG_FORMAT",
];

fn printq(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_printq"));
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command
        .args(args)
        .envs(env.iter().copied())
        .output()
        .expect("failed to run printq")
}

#[test]
fn dry_run_prints_encoded_batch() {
    let output = printq(
        &["submit", "--job", "7,3,2,3", "--job", "8,1,1,1", "--dry-run"],
        &[],
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "2\n7\n3\n2\n3\n8\n1\n1\n1\n"
    );
}

#[test]
fn invalid_job_is_rejected_before_spawning() {
    let output = printq(&["submit", "--job", "7,3,5,3"], &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid job"));
}

#[cfg(unix)]
#[test]
fn submit_streams_processor_output() {
    let output = printq(
        &["submit", "--job", "1,10,1,1"],
        &[("PRINTQ_PROGRAM", "cat")],
    );
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n1\n10\n1\n1\n");
}

#[test]
fn missing_processor_fails_submission() {
    let output = printq(
        &["submit", "--job", "1,10,1,1"],
        &[("PRINTQ_PROGRAM", "/nonexistent/printer_queue")],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Submission failed"));
}

#[test]
fn generated_config_validates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("printq.yaml");
    let path_arg = path.to_str().unwrap();

    let generated = printq(&["config", "generate", "--output", path_arg], &[]);
    assert!(generated.status.success());

    let validated = printq(&["config", "validate", "--config-file", path_arg], &[]);
    assert!(validated.status.success());
    assert!(String::from_utf8_lossy(&validated.stdout).contains("valid"));
}

#[test]
fn config_show_reflects_environment() {
    let output = printq(
        &["config", "show", "--format", "json"],
        &[("PRINTQ_PROGRAM", "/opt/printer_queue"), ("PRINTQ_TIMEOUT_SECONDS", "0")],
    );
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["execution"]["program"], "/opt/printer_queue");
    assert!(json["execution"]["timeout"].is_null());
}

#[test]
fn mistyped_config_path_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pritnq.yaml");
    let output = printq(
        &["--config", path.to_str().unwrap(), "submit", "--job", "1,1,1,1", "--dry-run"],
        &[],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration file not found"));
    assert!(output.stdout.is_empty());
}
