use std::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("myattire-cli-{}-{}", std::process::id(), name));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_config(dir: &std::path::Path, base_url: &str) -> std::path::PathBuf {
    let config_path = dir.join("myattire.yaml");
    let yaml = format!("api:\n  base_url: \"{base_url}\"\n  timeout_secs: 5\n");
    std::fs::write(&config_path, yaml).expect("write config");
    config_path
}

#[test]
fn help_prints_usage() {
    let binary_path = env!("CARGO_BIN_EXE_myattire-console");

    let output = Command::new(binary_path)
        .arg("--help")
        .output()
        .expect("Failed to start myattire-console binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--interactive"));
    assert!(stdout.contains("--check"));
}

// The mock server must run while the child process blocks this thread, so
// the test needs its own worker threads.
#[tokio::test(flavor = "multi_thread")]
async fn check_mode_reports_reachable_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/setores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = temp_dir("check-ok");
    let config_path = write_config(&dir, &server.uri());

    let binary_path = env!("CARGO_BIN_EXE_myattire-console");
    let output = Command::new(binary_path)
        .arg("--config")
        .arg(&config_path)
        .arg("--check")
        .env("MYATTIRE_DATA_DIR", &dir)
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to start myattire-console binary");

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OK"), "unexpected output: {stdout}");
}

#[test]
fn check_mode_fails_when_service_is_unreachable() {
    let dir = temp_dir("check-down");
    // Port 1 is never listening
    let config_path = write_config(&dir, "http://127.0.0.1:1");

    let binary_path = env!("CARGO_BIN_EXE_myattire-console");
    let output = Command::new(binary_path)
        .arg("--config")
        .arg(&config_path)
        .arg("--check")
        .env("MYATTIRE_DATA_DIR", &dir)
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to start myattire-console binary");

    assert!(
        !output.status.success(),
        "check against a dead service should fail\nStdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}
