use std::io::{self, Write};

use b_core::{
    INSTRUCTION_FILE,
    agent::{AgentRequest, AgentRunner, ScriptRunner},
    config::Config,
    display,
    prompting::{self, Modifier},
};
use tokio_util::sync::CancellationToken;

use crate::errors::CliError;

/// The default path: `b.md` + prompt + modifier notes, piped into the assistant.
pub(crate) async fn run_prompt(
    config: &Config,
    instructions: &str,
    prompt: &str,
    modifiers: &[Modifier],
) -> Result<(), CliError> {
    let payload = prompting::compose(instructions, prompt, modifiers);

    println!("B CLI - Processing prompt with {INSTRUCTION_FILE} content...");
    println!("Modified prompt length: {} characters", payload.char_count());
    println!("{}", display::rule());

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let runner = ScriptRunner;
    tracing::info!(
        backend = runner.backend_name(),
        program = %config.agent_program,
        "invoking assistant"
    );
    let request = AgentRequest::from_config(payload.into_string(), config).with_cancel(cancel);
    let result = runner.execute(request).await;
    interrupt.abort();
    let response = result?;
    tracing::info!(
        exit_code = response.exit_code,
        duration_ms = response.duration_ms as u64,
        stdout_bytes = response.stdout.len(),
        "assistant finished"
    );

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&response.stdout)
        .and_then(|()| stdout.flush())
        .map_err(CliError::Output)
}
