use std::time::Duration;

use crate::instructions::InstallRoot;

pub const DEFAULT_AGENT_PROGRAM: &str = "claude";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "main";

/// Per-invocation settings. Built from command-line flags only; nothing is
/// read from disk or the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: InstallRoot,
    pub agent_program: String,
    /// `None` waits on the assistant for as long as it runs.
    pub agent_timeout: Option<Duration>,
    pub remote: String,
    pub branch: String,
}

impl Config {
    pub fn new(root: InstallRoot) -> Self {
        Self {
            root,
            agent_program: DEFAULT_AGENT_PROGRAM.to_string(),
            agent_timeout: None,
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    pub fn with_agent_program(mut self, program: Option<String>) -> Self {
        if let Some(program) = program.filter(|value| !value.trim().is_empty()) {
            self.agent_program = program;
        }
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.agent_timeout = timeout;
        self
    }
}
