use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bridge() -> Command {
    let mut cmd = Command::cargo_bin("colab-bridge").unwrap();
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("COLAB_BRIDGE_API_URL")
        .env_remove("COLAB_BRIDGE_GIT_URL")
        .env_remove("COLAB_BRIDGE_WORKSPACE_ROOT");
    cmd
}

#[test]
fn test_help_lists_commands() {
    bridge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("COMMANDS:"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("cleanup"));
}

#[test]
fn test_update_help_shows_example() {
    bridge()
        .args(["update", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("colab-bridge update --owner alice"));
}

#[test]
fn test_version_command() {
    bridge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_publish_requires_a_content_source() {
    bridge()
        .args([
            "publish", "--owner", "alice", "--repo", "notebooks", "--path", "a.txt", "--message",
            "Add",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_publish_rejects_both_content_sources() {
    bridge()
        .args([
            "publish",
            "--owner",
            "alice",
            "--repo",
            "notebooks",
            "--path",
            "a.txt",
            "--message",
            "Add",
            "--content",
            "x",
            "--content-file",
            "x.txt",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_update_without_token_fails_non_interactively() {
    bridge()
        .args(["update", "--owner", "alice", "--repo", "notebooks"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No GitHub token provided."));
}

#[test]
fn test_missing_config_file_is_reported() {
    bridge()
        .args([
            "--config",
            "/definitely/not/here.toml",
            "update",
            "--owner",
            "alice",
            "--repo",
            "notebooks",
        ])
        .env("GITHUB_TOKEN", "ghp_secret")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[tokio::test]
async fn test_publish_prints_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/alice/notebooks/contents/notes/run.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/alice/notebooks/contents/notes/run.txt"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"content": {"sha": "new-sha"}})),
        )
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let content_file = temp_dir.path().join("run.txt");
    std::fs::write(&content_file, "run notes").unwrap();

    let uri = mock_server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        bridge()
            .args(["publish", "--owner", "alice", "--repo", "notebooks"])
            .args(["--path", "notes/run.txt", "--message", "Add run notes"])
            .arg("--content-file")
            .arg(&content_file)
            .env("GITHUB_TOKEN", "ghp_secret")
            .env("COLAB_BRIDGE_API_URL", uri)
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::starts_with("Success. Response:\n"))
        .stdout(predicate::str::contains("\"sha\": \"new-sha\""));
}

#[tokio::test]
async fn test_publish_in_notebook_keeps_logs_off_stdout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/alice/notebooks/contents/notes/run.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/alice/notebooks/contents/notes/run.txt"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"content": {"sha": "new-sha"}})),
        )
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        bridge()
            .args(["publish", "--owner", "alice", "--repo", "notebooks"])
            .args(["--path", "notes/run.txt", "--message", "Add", "--content", "x"])
            .env("GITHUB_TOKEN", "ghp_secret")
            .env("COLAB_BRIDGE_API_URL", uri)
            .env("COLAB_RELEASE_TAG", "release-colab_20261001")
            .env("RUST_LOG", "info")
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::starts_with("Success. Response:\n"))
        .stdout(predicate::str::contains("INFO").not())
        .stderr(predicate::str::contains("writing file"));
}

#[tokio::test]
async fn test_publish_existing_file_exits_with_one() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/alice/notebooks/contents/notes/run.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sha": "abc123"})))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        bridge()
            .args(["publish", "--owner", "alice", "--repo", "notebooks"])
            .args(["--path", "notes/run.txt", "--message", "Add", "--content", "x"])
            .env("GITHUB_TOKEN", "ghp_secret")
            .env("COLAB_BRIDGE_API_URL", uri)
            .assert()
    })
    .await
    .unwrap();

    assert
        .code(1)
        .stderr(predicate::str::contains(
            "File already exists at notes/run.txt on branch default. Use --force to update.",
        ))
        .stderr(predicate::str::contains("ghp_secret").not());
}

#[test]
fn test_cleanup_removes_directory() {
    let temp_dir = TempDir::new().unwrap();
    let repo_dir = temp_dir.path().join("notebooks");
    std::fs::create_dir_all(repo_dir.join(".git")).unwrap();

    bridge()
        .arg("cleanup")
        .arg(&repo_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
    assert!(!repo_dir.exists());

    bridge()
        .arg("cleanup")
        .arg(&repo_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to remove"));
}
