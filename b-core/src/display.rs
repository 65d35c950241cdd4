use colored::Colorize;
use tracing_subscriber::EnvFilter;

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Info,
    Debug,
}

impl Verbosity {
    /// `quiet` wins over everything; `debug` is an alias for `-vv`.
    pub fn from_flags(quiet: bool, verbose: u8, debug: bool) -> Self {
        if quiet {
            return Verbosity::Quiet;
        }
        if debug {
            return Verbosity::Debug;
        }
        match verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Info,
            _ => Verbosity::Debug,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Installs the stderr log subscriber. Safe to call more than once.
pub fn init_tracing(verbosity: Verbosity, ansi: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(verbosity.directive()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .without_time()
        .try_init();
}

pub fn set_color(enabled: bool) {
    colored::control::set_override(enabled);
}

pub fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn success(text: &str) -> String {
    text.green().bold().to_string()
}

pub fn failure(text: &str) -> String {
    text.red().bold().to_string()
}

pub fn warning(text: &str) -> String {
    text.yellow().to_string()
}
