use std::io;

use b_core::{agent::AgentError, instructions::InstructionError};
use thiserror::Error;

/// Failures that end the process with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Instructions(#[from] InstructionError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("no PROMPT provided; pass a prompt, use '-', pipe stdin, or run `b init` / `b --update`")]
    MissingPrompt,

    #[error("stdin is empty; provide PROMPT or pipe content")]
    EmptyStdin,

    #[error("failed to read prompt from stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("could not resolve installation root: {0}")]
    Root(#[source] io::Error),

    #[error("failed to write assistant output: {0}")]
    Output(#[source] io::Error),
}
