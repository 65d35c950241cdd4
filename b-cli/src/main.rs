use std::process::ExitCode;

use b_core::display;

#[tokio::main]
async fn main() -> ExitCode {
    match b::run_cli().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", display::failure("Error:"));
            ExitCode::FAILURE
        }
    }
}
