use std::path::Path;

use b_core::{
    INSTRUCTION_FILE,
    config::Config,
    display,
    links::{self, LinkBases, LinkReport},
};

/// `b init`: point every known workflow directory at this installation's b.md.
pub(crate) fn run_init(config: &Config) {
    let instruction_path = config.root.instruction_path();
    if !instruction_path.is_file() {
        println!(
            "{}",
            display::warning(&format!(
                "Warning: {INSTRUCTION_FILE} not found at {}; links will dangle until it exists",
                instruction_path.display()
            ))
        );
    }

    let targets = match LinkBases::from_user_dirs() {
        Some(bases) => links::candidate_dirs(&bases),
        None => {
            tracing::warn!("could not determine the home directory; no workflow directories to link");
            Vec::new()
        }
    };

    let report = links::sync_links(&instruction_path, &targets);

    for entry in &report.entries {
        match &entry.result {
            Ok(link) => {
                let note = if entry.created_dir {
                    " (created directory)"
                } else {
                    ""
                };
                println!(
                    "Linked {} -> {}{note}",
                    link.display(),
                    instruction_path.display()
                );
            }
            Err(err) => println!(
                "{}",
                display::warning(&format!(
                    "Warning: could not link {}: {err}",
                    entry.target.dir.display()
                ))
            ),
        }
    }

    for line in summary_lines(&report, &instruction_path) {
        println!("{line}");
    }
}

fn summary_lines(report: &LinkReport, instruction_path: &Path) -> Vec<String> {
    let count = report.linked_count();
    if count == 0 {
        return vec![
            display::warning("Warning: no workflow directories were found or created."),
            format!(
                "You can link {INSTRUCTION_FILE} manually: ln -s {} <workflow-dir>/{INSTRUCTION_FILE}",
                instruction_path.display()
            ),
        ];
    }

    let tools: Vec<&str> = report
        .tools_linked()
        .into_iter()
        .map(|tool| tool.label())
        .collect();
    let noun = if count == 1 {
        "directory"
    } else {
        "directories"
    };

    vec![display::success(&format!(
        "Workflow integration complete: linked {INSTRUCTION_FILE} into {count} {noun} for {}.",
        tools.join(" and ")
    ))]
}
