use clap::Parser;
use colab_bridge::cli::{self, Args};
use colab_bridge::core::{AppError, DefaultErrorReporter, ErrorReporter};
use colab_bridge::logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let failure_code = args.command.failure_exit_code();

    let _logging = match logging::init(args.config.as_deref()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("[WARNING] logging disabled: {:#}", err);
            None
        }
    };

    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let reporter = DefaultErrorReporter::new();
            match err.downcast_ref::<AppError>() {
                Some(app_error) => reporter.report_error(app_error),
                None => eprintln!("[ERROR] {:#}", err),
            }
            ExitCode::from(failure_code)
        }
    }
}
