use std::io::{self, IsTerminal, Read};
use std::time::Duration;

use b_core::{InstallRoot, config::Config, display, instructions};
use clap::Parser;

use crate::actions::{run_init, run_prompt, run_update};
use crate::cli::args::{Cli, Commands, INIT_COMMAND};
use crate::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Update,
    Init,
    Prompt,
}

/// `--update` beats `init`, which beats the assistant path. `init` counts when
/// it is the PROMPT itself or the subcommand.
fn resolve_action(cli: &Cli) -> Action {
    if cli.update {
        if cli.prompt.is_some() || cli.command.is_some() {
            tracing::debug!("--update given; ignoring prompt and subcommand");
        }
        return Action::Update;
    }

    let positional_init = cli.prompt.as_deref() == Some(INIT_COMMAND);
    let subcommand_init = matches!(cli.command, Some(Commands::Init));
    if positional_init || subcommand_init {
        if let Some(prompt) = cli.prompt.as_deref().filter(|_| !positional_init) {
            tracing::warn!("ignoring PROMPT {prompt:?}; `init` does not take a prompt");
        }
        return Action::Init;
    }

    Action::Prompt
}

fn read_all_stdin() -> io::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn resolve_prompt(
    positional: Option<&str>,
    stdin_is_tty: bool,
    read_stdin: impl FnOnce() -> io::Result<String>,
) -> Result<String, CliError> {
    match positional {
        Some("-") => {
            let prompt = read_stdin().map_err(CliError::Stdin)?;
            if prompt.trim().is_empty() {
                return Err(CliError::EmptyStdin);
            }
            Ok(prompt)
        }
        Some(positional) => Ok(positional.to_owned()),
        None if !stdin_is_tty => {
            let prompt = read_stdin().map_err(CliError::Stdin)?;
            if prompt.trim().is_empty() {
                return Err(CliError::MissingPrompt);
            }
            Ok(prompt)
        }
        None => Err(CliError::MissingPrompt),
    }
}

pub(crate) async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let verbosity =
        display::Verbosity::from_flags(cli.global.quiet, cli.global.verbose, cli.global.debug);
    display::init_tracing(verbosity, !cli.global.no_ansi && io::stderr().is_terminal());
    display::set_color(!cli.global.no_ansi && io::stdout().is_terminal());

    let root = InstallRoot::resolve(cli.global.root.clone()).map_err(CliError::Root)?;
    let config = Config::new(root)
        .with_agent_program(cli.global.agent.clone())
        .with_agent_timeout(cli.global.timeout.map(Duration::from_secs));
    tracing::debug!(?config, "resolved configuration");

    match resolve_action(&cli) {
        Action::Update => {
            run_update(&config).await;
            Ok(())
        }
        Action::Init => {
            run_init(&config);
            Ok(())
        }
        Action::Prompt => {
            // b.md is checked before stdin is read so a missing file fails fast.
            let instructions = instructions::load_instructions(&config.root)?;
            let prompt = resolve_prompt(
                cli.prompt.as_deref(),
                io::stdin().is_terminal(),
                read_all_stdin,
            )?;
            run_prompt(&config, &instructions, &prompt, &cli.modifiers()).await
        }
    }
}
