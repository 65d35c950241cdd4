mod actions;
mod cli;
mod errors;

pub use errors::CliError;

pub async fn run_cli() -> Result<(), CliError> {
    cli::dispatch::run().await
}
