//! Keeps `b.md` symlinked into the workflow directories of the assistant tools
//! that pick up global commands from disk.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

use crate::instructions::INSTRUCTION_FILE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowTool {
    ClaudeCode,
    Windsurf,
}

impl WorkflowTool {
    pub fn label(self) -> &'static str {
        match self {
            WorkflowTool::ClaudeCode => "Claude Code",
            WorkflowTool::Windsurf => "Windsurf",
        }
    }
}

impl fmt::Display for WorkflowTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Base directories the candidate list is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBases {
    pub home: PathBuf,
    /// Platform config dir: `~/.config`, `~/Library/Application Support`, or `%APPDATA%`.
    pub config: PathBuf,
}

impl LinkBases {
    pub fn from_user_dirs() -> Option<Self> {
        let dirs = BaseDirs::new()?;
        Some(Self {
            home: dirs.home_dir().to_path_buf(),
            config: dirs.config_dir().to_path_buf(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub tool: WorkflowTool,
    pub dir: PathBuf,
}

impl LinkTarget {
    pub fn link_path(&self) -> PathBuf {
        self.dir.join(INSTRUCTION_FILE)
    }
}

/// Fixed candidate list, in visiting order.
pub fn candidate_dirs(bases: &LinkBases) -> Vec<LinkTarget> {
    [
        (WorkflowTool::ClaudeCode, bases.home.join(".claude").join("commands")),
        (WorkflowTool::ClaudeCode, bases.config.join("Claude").join("commands")),
        (
            WorkflowTool::Windsurf,
            bases
                .home
                .join(".codeium")
                .join("windsurf")
                .join("global_workflows"),
        ),
        (
            WorkflowTool::Windsurf,
            bases.config.join("Windsurf").join("global_workflows"),
        ),
    ]
    .into_iter()
    .map(|(tool, dir)| LinkTarget { tool, dir })
    .collect()
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("failed to create directory {}: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove existing {}: {source}", .path.display())]
    RemoveExisting {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create symlink {}: {source}", .link.display())]
    Symlink {
        link: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub struct LinkEntry {
    pub target: LinkTarget,
    /// Whether the directory had to be created on this run.
    pub created_dir: bool,
    pub result: Result<PathBuf, LinkError>,
}

#[derive(Debug, Default)]
pub struct LinkReport {
    pub entries: Vec<LinkEntry>,
}

impl LinkReport {
    pub fn linked_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.result.is_ok())
            .count()
    }

    pub fn tools_linked(&self) -> Vec<WorkflowTool> {
        let mut tools = Vec::new();
        for entry in self.entries.iter().filter(|entry| entry.result.is_ok()) {
            if !tools.contains(&entry.target.tool) {
                tools.push(entry.target.tool);
            }
        }
        tools
    }
}

/// Points `<dir>/b.md` at `instruction_path` for every target. A failing target
/// is recorded and the rest are still attempted.
pub fn sync_links(instruction_path: &Path, targets: &[LinkTarget]) -> LinkReport {
    let mut report = LinkReport::default();

    for target in targets {
        let existed = target.dir.is_dir();
        let result = if existed {
            relink(instruction_path, &target.dir)
        } else {
            fs::create_dir_all(&target.dir)
                .map_err(|source| LinkError::CreateDir {
                    dir: target.dir.clone(),
                    source,
                })
                .and_then(|()| relink(instruction_path, &target.dir))
        };

        match &result {
            Ok(link) => tracing::debug!(link = %link.display(), "linked instructions"),
            Err(err) => tracing::debug!(dir = %target.dir.display(), "link failed: {err}"),
        }

        report.entries.push(LinkEntry {
            target: target.clone(),
            created_dir: !existed && result.is_ok(),
            result,
        });
    }

    report
}

fn relink(instruction_path: &Path, dir: &Path) -> Result<PathBuf, LinkError> {
    let link = dir.join(INSTRUCTION_FILE);
    remove_existing(&link).map_err(|source| LinkError::RemoveExisting {
        path: link.clone(),
        source,
    })?;
    create_symlink(instruction_path, &link).map_err(|source| LinkError::Symlink {
        link: link.clone(),
        source,
    })?;
    Ok(link)
}

/// Removes whatever sits at `path` (file, symlink, or directory). Missing is fine.
fn remove_existing(path: &Path) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
