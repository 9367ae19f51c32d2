use clap::{ArgGroup, Args};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Account that owns the repository and the token
    #[arg(long, value_name = "ACCOUNT")]
    pub owner: String,

    /// Repository name under the account
    #[arg(long, value_name = "REPO")]
    pub repo: String,

    /// Branch to create and push (default: config git.branch, colab/auto-update)
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Branch the pull request targets (default: config git.base, main)
    #[arg(long, value_name = "BRANCH")]
    pub base: Option<String>,

    /// Commit message and pull request title (default: timestamped message)
    #[arg(long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Clone destination (default: <workspace_root>/<repo>); replaced if it exists
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Change applied to the working copy before committing
    #[arg(long, value_enum, default_value = "timestamp")]
    pub mutation: MutationKind,

    /// Delete the working copy after the pull request is opened
    #[arg(long)]
    pub cleanup: bool,
}

#[derive(Clone, Copy, clap::ValueEnum, Debug, PartialEq, Eq)]
pub enum MutationKind {
    /// Write colab_update.txt with the current time
    Timestamp,
    /// Run the demo transform and commit data/output.txt
    Process,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["content_file", "content"])
))]
pub struct PublishArgs {
    /// Account that owns the repository and the token
    #[arg(long, value_name = "ACCOUNT")]
    pub owner: String,

    /// Repository name under the account
    #[arg(long, value_name = "REPO")]
    pub repo: String,

    /// Path of the file inside the repository
    #[arg(long, value_name = "PATH")]
    pub path: String,

    /// Commit message for the write
    #[arg(long, value_name = "TEXT")]
    pub message: String,

    /// Local file whose bytes are uploaded
    #[arg(long, value_name = "FILE", help_heading = "Content Source")]
    pub content_file: Option<PathBuf>,

    /// Literal text to upload
    #[arg(long, value_name = "TEXT", help_heading = "Content Source")]
    pub content: Option<String>,

    /// Target branch (default: the repository's default branch)
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Overwrite the file when it already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Directory containing data/input.txt (default: current directory)
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,
}

#[derive(Args, Debug)]
pub struct CleanupArgs {
    /// Working copy to delete
    #[arg(value_name = "DIR")]
    pub path: PathBuf,
}
