//scopetree/src/main.rs
use std::env;
use std::process::ExitCode;

mod cli;
mod logging;

use cli::CliError;

fn main() -> ExitCode {
    let _logging = logging::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = match cli::parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, cli::USAGE);
            return ExitCode::from(2);
        }
    };

    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("error: cannot read current directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .or_else(|e| {
            tracing::error!(
                error = %e,
                "Failed to create multi-thread tokio runtime, falling back to current-thread"
            );
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
        }) {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: cannot start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli::run(invocation, &cwd)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Bookmark(e)) => {
            tracing::debug!(error = %e, "command failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::warn!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
