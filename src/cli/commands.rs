use crate::{
    cli::args::{CleanupArgs, MutationKind, ProcessArgs, PublishArgs, UpdateArgs},
    core::{
        orchestrator::{remove_cloned_repo, UpdateOrchestrator, UpdateRequest},
        transform, AppError, BridgeConfig, ConfigLoader, ContentPublisher, Credential,
        ErrorCategory, GithubClient, ProcessMutation, TimestampMutation, WorkingCopyMutation,
    },
    Result,
};
use colab_bridge_types::ContentPayload;
use std::fs;
use std::path::Path;

fn load_config(config_path: Option<&Path>) -> Result<BridgeConfig> {
    let config = ConfigLoader::load(config_path)?;
    tracing::debug!(
        api_url = %config.github.api_url,
        workspace_root = %config.git.workspace_root.display(),
        "configuration loaded"
    );
    Ok(config)
}

/// Clone, change, commit, push and open a pull request; prints the result as JSON.
pub async fn update(args: UpdateArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let credential = Credential::resolve(&args.owner)?;
    let orchestrator = UpdateOrchestrator::from_config(&config)?;

    let request = UpdateRequest {
        repo: args.repo,
        branch: args.branch.unwrap_or_else(|| config.git.branch.clone()),
        base: args.base.unwrap_or_else(|| config.git.base.clone()),
        message: args.message,
        dest: args.dest,
    };
    let mutation: Box<dyn WorkingCopyMutation> = match args.mutation {
        MutationKind::Timestamp => Box::new(TimestampMutation),
        MutationKind::Process => Box::new(ProcessMutation),
    };

    let result = orchestrator
        .safe_update(&credential, &request, mutation.as_ref())
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if args.cleanup {
        remove_cloned_repo(&result.repo_dir)?;
    }
    Ok(())
}

/// Create or update one file through the contents API.
pub async fn publish(args: PublishArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let content = read_content(&args)?;
    let credential = Credential::resolve(&args.owner)?;

    let publisher = ContentPublisher::new(GithubClient::new(&config.github.api_url)?);
    let payload = ContentPayload::new(args.path, content, args.message).with_branch(args.branch);
    let response = publisher
        .publish(&credential, &args.owner, &args.repo, payload, args.force)
        .await?;

    println!("Success. Response:");
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn read_content(args: &PublishArgs) -> Result<Vec<u8>> {
    match (&args.content_file, &args.content) {
        (Some(path), _) => fs::read(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read {}: {}", path.display(), e),
            )
            .into()
        }),
        (None, Some(text)) => Ok(text.as_bytes().to_vec()),
        // clap's ArgGroup requires one of the two.
        (None, None) => Err(AppError::new(
            ErrorCategory::ValidationError,
            "Either --content-file or --content is required",
        )
        .into()),
    }
}

/// Run the demo transform under `--root`.
pub fn process(args: ProcessArgs) -> Result<()> {
    let (output, lines) = transform::run(&args.root)?;
    println!("Wrote {} (lines: {})", output.display(), lines);
    Ok(())
}

pub fn cleanup(args: CleanupArgs) -> Result<()> {
    if remove_cloned_repo(&args.path)? {
        println!("Removed {}", args.path.display());
    } else {
        println!("Nothing to remove at {}", args.path.display());
    }
    Ok(())
}
