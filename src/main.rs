//! Grocer - file-backed grocery list management

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = grocer_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
