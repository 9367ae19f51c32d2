use colab_bridge::core::{
    AppError, Credential, ErrorCategory, GithubClient, ProcessMutation, RepositoryClient,
    TimestampMutation, UpdateOrchestrator, UpdateRequest, WorkingCopyMutation,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Bare repository at `<root>/remotes/alice/notebooks.git` with one commit on
/// `main`. Returns the `file://` base URL and the bare repository path.
fn seed_remote(root: &Path) -> (String, PathBuf) {
    let seed = root.join("seed");
    std::fs::create_dir_all(&seed).unwrap();
    git(&["init"], &seed);
    git(&["symbolic-ref", "HEAD", "refs/heads/main"], &seed);
    git(&["config", "user.email", "seed@example.com"], &seed);
    git(&["config", "user.name", "Seed"], &seed);
    std::fs::create_dir_all(seed.join("data")).unwrap();
    std::fs::write(seed.join("README.md"), "notebooks\n").unwrap();
    std::fs::write(seed.join("data/input.txt"), "hello world\n\nsecond line\n").unwrap();
    git(&["add", "."], &seed);
    git(&["commit", "-m", "Initial commit"], &seed);

    let remotes = root.join("remotes");
    let bare = remotes.join("alice").join("notebooks.git");
    std::fs::create_dir_all(bare.parent().unwrap()).unwrap();
    git(
        &[
            "clone",
            "--bare",
            &seed.to_string_lossy(),
            &bare.to_string_lossy(),
        ],
        root,
    );

    (format!("file://{}", remotes.display()), bare)
}

async fn mock_pull_request(server: &MockServer, status: u16) {
    let body = if status < 300 {
        json!({"number": 3, "html_url": "https://github.com/alice/notebooks/pull/3"})
    } else {
        json!({"message": "Validation Failed"})
    };
    Mock::given(method("POST"))
        .and(path("/repos/alice/notebooks/pulls"))
        .and(body_partial_json(json!({
            "head": "colab/auto-update",
            "base": "main",
            "body": "Automated PR created from Colab."
        })))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn orchestrator(git_url: &str, workspace: &Path, server: &MockServer) -> UpdateOrchestrator {
    UpdateOrchestrator::new(
        RepositoryClient::new(git_url, workspace),
        GithubClient::new(&server.uri()).unwrap(),
    )
}

fn credential() -> Credential {
    Credential::new("alice", "ghp_secret").unwrap()
}

struct NoopMutation;

impl WorkingCopyMutation for NoopMutation {
    fn name(&self) -> &str {
        "noop"
    }

    fn apply(&self, _repo_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        Ok(vec![PathBuf::from("README.md")])
    }
}

#[tokio::test]
async fn test_safe_update_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let (git_url, bare) = seed_remote(temp_dir.path());
    let workspace = temp_dir.path().join("content");
    let mock_server = MockServer::start().await;
    mock_pull_request(&mock_server, 201).await;

    let mut request = UpdateRequest::new("notebooks");
    request.message = Some("Colab: nightly results".to_string());

    let result = orchestrator(&git_url, &workspace, &mock_server)
        .safe_update(&credential(), &request, &TimestampMutation)
        .await
        .unwrap();

    assert_eq!(result.repo_dir, workspace.join("notebooks"));
    assert_eq!(result.branch, "colab/auto-update");
    assert!(result.commit_made);
    assert_eq!(
        result.pr_url.as_deref(),
        Some("https://github.com/alice/notebooks/pull/3")
    );

    let subject = git(&["log", "-1", "--format=%s", "colab/auto-update"], &bare);
    assert_eq!(subject, "Colab: nightly results");
    let author = git(&["log", "-1", "--format=%an <%ae>", "colab/auto-update"], &bare);
    assert_eq!(author, "alice <alice@users.noreply.github.com>");
    let files = git(&["show", "--name-only", "--format=", "colab/auto-update"], &bare);
    assert_eq!(files, "colab_update.txt");

    // The working copy is left in place.
    assert!(result.repo_dir.join("colab_update.txt").exists());

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["title"], "Colab: nightly results");
}

#[tokio::test]
async fn test_safe_update_without_changes_still_pushes_and_opens_pr() {
    let temp_dir = TempDir::new().unwrap();
    let (git_url, bare) = seed_remote(temp_dir.path());
    let workspace = temp_dir.path().join("content");
    let mock_server = MockServer::start().await;
    mock_pull_request(&mock_server, 201).await;

    let result = orchestrator(&git_url, &workspace, &mock_server)
        .safe_update(&credential(), &UpdateRequest::new("notebooks"), &NoopMutation)
        .await
        .unwrap();

    assert!(!result.commit_made);
    assert_eq!(
        git(&["rev-parse", "colab/auto-update"], &bare),
        git(&["rev-parse", "main"], &bare)
    );
}

#[tokio::test]
async fn test_safe_update_process_mutation_commits_output() {
    let temp_dir = TempDir::new().unwrap();
    let (git_url, bare) = seed_remote(temp_dir.path());
    let workspace = temp_dir.path().join("content");
    let mock_server = MockServer::start().await;
    mock_pull_request(&mock_server, 200).await;

    orchestrator(&git_url, &workspace, &mock_server)
        .with_identity(Some("Notebook Bot".to_string()), Some("bot@example.com".to_string()))
        .safe_update(&credential(), &UpdateRequest::new("notebooks"), &ProcessMutation)
        .await
        .unwrap();

    let output = git(&["show", "colab/auto-update:data/output.txt"], &bare);
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[0].starts_with("# Generated at "));
    assert_eq!(&lines[1..], &["HELLO WORLD", "SECOND LINE"]);
    assert_eq!(
        git(&["log", "-1", "--format=%an", "colab/auto-update"], &bare),
        "Notebook Bot"
    );
}

#[tokio::test]
async fn test_safe_update_clobbers_existing_destination() {
    let temp_dir = TempDir::new().unwrap();
    let (git_url, _bare) = seed_remote(temp_dir.path());
    let workspace = temp_dir.path().join("content");
    let stale = workspace.join("notebooks");
    std::fs::create_dir_all(&stale).unwrap();
    std::fs::write(stale.join("leftover.txt"), "from a previous session").unwrap();

    let mock_server = MockServer::start().await;
    mock_pull_request(&mock_server, 201).await;

    let result = orchestrator(&git_url, &workspace, &mock_server)
        .safe_update(&credential(), &UpdateRequest::new("notebooks"), &TimestampMutation)
        .await
        .unwrap();

    assert!(!result.repo_dir.join("leftover.txt").exists());
    assert!(result.repo_dir.join("README.md").exists());
}

#[tokio::test]
async fn test_safe_update_pull_request_failure_after_push() {
    let temp_dir = TempDir::new().unwrap();
    let (git_url, bare) = seed_remote(temp_dir.path());
    let workspace = temp_dir.path().join("content");
    let mock_server = MockServer::start().await;
    mock_pull_request(&mock_server, 422).await;

    let error = orchestrator(&git_url, &workspace, &mock_server)
        .safe_update(&credential(), &UpdateRequest::new("notebooks"), &TimestampMutation)
        .await
        .unwrap_err();

    assert_eq!(error.category, ErrorCategory::PullRequestFailed);
    assert_eq!(error.http_status(), Some(422));
    // Nothing is rolled back.
    assert!(!git(&["rev-parse", "--verify", "colab/auto-update"], &bare).is_empty());
}

#[tokio::test]
async fn test_safe_update_clone_failure_stops_before_api() {
    let temp_dir = TempDir::new().unwrap();
    let (git_url, _bare) = seed_remote(temp_dir.path());
    let workspace = temp_dir.path().join("content");
    let mock_server = MockServer::start().await;

    let error = orchestrator(&git_url, &workspace, &mock_server)
        .safe_update(&credential(), &UpdateRequest::new("missing"), &TimestampMutation)
        .await
        .unwrap_err();

    assert_eq!(error.category, ErrorCategory::CloneFailed);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_safe_update_existing_branch_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (git_url, _bare) = seed_remote(temp_dir.path());
    let workspace = temp_dir.path().join("content");
    let mock_server = MockServer::start().await;

    let mut request = UpdateRequest::new("notebooks");
    request.branch = "main".to_string();

    let error = orchestrator(&git_url, &workspace, &mock_server)
        .safe_update(&credential(), &request, &TimestampMutation)
        .await
        .unwrap_err();

    assert_eq!(error.category, ErrorCategory::BranchFailed);
}
