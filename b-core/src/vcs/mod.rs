mod pull;
mod revision;

pub use pull::{PullOutput, UpdateError, UpdateOutcome, pull, run_update};
pub use revision::{head_commit, short_id};
