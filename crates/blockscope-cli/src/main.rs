//! blockscope CLI entry point

use std::io;
use std::process::ExitCode;

use blockscope_cli::error::exit_code_from_error;
use colored::Colorize;

#[tokio::main]
async fn main() -> ExitCode {
    match blockscope_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        // Pipeline truncation, e.g. `| head`
        Err(err) if is_broken_pipe(&err) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "Error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
            || cause
                .downcast_ref::<serde_json::Error>()
                .and_then(serde_json::Error::io_error_kind)
                == Some(io::ErrorKind::BrokenPipe)
    })
}
