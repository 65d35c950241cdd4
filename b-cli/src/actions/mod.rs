mod init;
mod prompt;
mod update;

pub(crate) use init::run_init;
pub(crate) use prompt::run_prompt;
pub(crate) use update::run_update;
