pub mod agent;
pub mod config;
pub mod display;
pub mod instructions;
pub mod links;
pub mod prompting;
pub mod vcs;

pub use instructions::{INSTRUCTION_FILE, InstallRoot};
