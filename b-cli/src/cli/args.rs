use std::path::PathBuf;

use b_core::prompting::Modifier;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};

/// Literal PROMPT value that runs workflow link setup instead of the assistant.
pub(crate) const INIT_COMMAND: &str = "init";

const EXAMPLES: &str = "\
Examples:
  b \"Create a REST API for user management\"
  b --3 \"Design a database schema for e-commerce\"
  b -b \"Analyze the performance of this algorithm\"
  b init
  b --update";

/// B CLI - Universal Workflow Agent
///
/// Prepends b.md to your prompt and hands the result to Claude.
#[derive(Parser, Debug)]
#[command(
    name = "b",
    version,
    about,
    after_help = EXAMPLES,
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) global: GlobalOpts,

    /// The prompt to process (enclosed in quotes if it contains spaces); `-` reads stdin
    #[arg(value_name = "PROMPT")]
    pub(crate) prompt: Option<String>,

    /// Generate three alternative solutions
    #[arg(long = "3", global = true)]
    pub(crate) three: bool,

    /// Spawn sub-agents in background
    #[arg(short = 'b', global = true)]
    pub(crate) background: bool,

    /// Pull the latest version of b (git pull origin main) and exit
    #[arg(long, global = true)]
    pub(crate) update: bool,

    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

impl Cli {
    pub(crate) fn modifiers(&self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        if self.three {
            modifiers.push(Modifier::ThreeAlternatives);
        }
        if self.background {
            modifiers.push(Modifier::BackgroundAgents);
        }
        modifiers
    }
}

#[derive(ClapArgs, Debug, Default)]
pub(crate) struct GlobalOpts {
    /// Increase stderr log verbosity (`-v` = info, `-vv` = debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub(crate) verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, global = true)]
    pub(crate) quiet: bool,

    /// Enable debug logging (alias for -vv)
    #[arg(short = 'd', long, global = true)]
    pub(crate) debug: bool,

    /// Disable ANSI colors even on a TTY
    #[arg(long = "no-ansi", global = true)]
    pub(crate) no_ansi: bool,

    /// Installation directory containing b.md; defaults to the nearest one above the executable
    #[arg(long = "root", value_name = "DIR", global = true)]
    pub(crate) root: Option<PathBuf>,

    /// Assistant program to pipe the prompt into
    #[arg(long = "agent", value_name = "PROGRAM", global = true)]
    pub(crate) agent: Option<String>,

    /// Stop the assistant if it runs longer than this many seconds (default: wait indefinitely)
    #[arg(
        long = "timeout",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub(crate) timeout: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Link b.md into the Claude Code and Windsurf workflow directories
    Init,
}
