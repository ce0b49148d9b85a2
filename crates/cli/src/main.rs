//! Matbench CLI entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match matbench_cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
