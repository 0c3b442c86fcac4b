//! Binary entrypoint for the `shellgate` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match shellgate::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
