use b_core::{
    config::Config,
    display,
    vcs::{self, UpdateError, UpdateOutcome},
};

fn print_block(text: &str) {
    let trimmed = text.trim_end();
    if !trimmed.is_empty() {
        println!("{trimmed}");
    }
}

/// `b --update`. Reports the outcome and never fails the process.
pub(crate) async fn run_update(config: &Config) {
    let root = config.root.path();
    println!(
        "Updating {} from {}/{}...",
        root.display(),
        config.remote,
        config.branch
    );

    let outcome = vcs::run_update(root, &config.remote, &config.branch).await;
    match &outcome {
        UpdateOutcome::Updated { stdout, .. } => {
            println!("{}", display::success("Update successful!"));
            if let Some((before, after)) = outcome.head_change() {
                println!("Updated {}..{}", vcs::short_id(before), vcs::short_id(after));
            }
            print_block(stdout);
        }
        UpdateOutcome::Failed { stderr } => {
            println!("{}", display::failure("Update failed:"));
            print_block(stderr);
        }
        UpdateOutcome::Error(err @ UpdateError::GitNotFound) => {
            println!("{} {err}", display::failure("Error:"));
        }
        UpdateOutcome::Error(err) => {
            println!("{} {err}", display::failure("Error during update:"));
        }
    }
}
