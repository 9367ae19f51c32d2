pub mod args;
pub mod commands;

pub use args::{CleanupArgs, MutationKind, ProcessArgs, PublishArgs, UpdateArgs};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "colab-bridge")]
#[command(version = crate::VERSION)]
#[command(about = "Push notebook work back to GitHub: clone, commit, push and open pull requests")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "The token is read from GITHUB_TOKEN, or prompted for when running in a terminal."
)]
pub struct Args {
    /// Config file (default: ./.colab-bridge/config.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Clone, change, commit, push and open a pull request",
        long_about = "Update clones the repository into a fresh working copy, creates a branch, applies the selected change, commits it, pushes the branch and opens a pull request against the base branch.",
        after_help = "Example:\n    colab-bridge update --owner alice --repo notebooks --branch colab/results"
    )]
    Update(UpdateArgs),
    #[command(
        about = "Create or update a single file through the contents API",
        long_about = "Publish writes one file without a local clone. An existing file is only replaced with --force.",
        after_help = "Example:\n    colab-bridge publish --owner alice --repo notebooks --path notes/run.txt \\\n        --message \"Add run notes\" --content-file run.txt"
    )]
    Publish(PublishArgs),
    #[command(
        about = "Uppercase data/input.txt into data/output.txt",
        long_about = "Process reads data/input.txt under the root directory, drops blank lines, uppercases the rest and writes data/output.txt with a timestamp header.",
        after_help = "Example:\n    colab-bridge process --root ./notebooks"
    )]
    Process(ProcessArgs),
    #[command(
        about = "Delete a cloned working copy",
        after_help = "Example:\n    colab-bridge cleanup /content/notebooks"
    )]
    Cleanup(CleanupArgs),
}

impl Command {
    /// Exit status used when the command fails.
    pub fn failure_exit_code(&self) -> u8 {
        match self {
            Command::Process(_) => 2,
            _ => 1,
        }
    }
}

pub async fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Update(update_args) => {
            commands::update(update_args, args.config.as_deref()).await
        }
        Command::Publish(publish_args) => {
            commands::publish(publish_args, args.config.as_deref()).await
        }
        Command::Process(process_args) => commands::process(process_args),
        Command::Cleanup(cleanup_args) => commands::cleanup(cleanup_args),
    }
}
