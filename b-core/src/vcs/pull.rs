use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use git2::Oid;
use thiserror::Error;
use tokio::process::Command;

use super::revision::head_commit;

const GIT_PROGRAM: &str = "git";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("git command not found. Please make sure git is installed.")]
    GitNotFound,

    #[error("installation directory {} does not exist", .0.display())]
    MissingRoot(PathBuf),

    #[error("failed to run git pull: {0}")]
    Io(#[from] io::Error),
}

/// What `b --update` observed. None of these variants are fatal.
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated {
        stdout: String,
        /// `HEAD` before and after the pull, when the checkout could be read.
        before: Option<Oid>,
        after: Option<Oid>,
    },
    Failed {
        stderr: String,
    },
    Error(UpdateError),
}

impl UpdateOutcome {
    /// `(old, new)` when the pull moved `HEAD`.
    pub fn head_change(&self) -> Option<(Oid, Oid)> {
        match self {
            UpdateOutcome::Updated {
                before: Some(before),
                after: Some(after),
                ..
            } if before != after => Some((*before, *after)),
            _ => None,
        }
    }
}

/// Runs `git pull <remote> <branch>` inside `repo_root`, capturing its output.
pub async fn pull(repo_root: &Path, remote: &str, branch: &str) -> Result<PullOutput, UpdateError> {
    if !repo_root.is_dir() {
        return Err(UpdateError::MissingRoot(repo_root.to_path_buf()));
    }

    tracing::debug!(root = %repo_root.display(), remote, branch, "running git pull");

    let output = Command::new(GIT_PROGRAM)
        .arg("pull")
        .arg(remote)
        .arg(branch)
        .current_dir(repo_root)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => UpdateError::GitNotFound,
            _ => UpdateError::Io(err),
        })?;

    Ok(PullOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Pulls the installation checkout and records how `HEAD` moved.
pub async fn run_update(repo_root: &Path, remote: &str, branch: &str) -> UpdateOutcome {
    let before = read_head(repo_root);

    match pull(repo_root, remote, branch).await {
        Ok(output) if output.success => UpdateOutcome::Updated {
            stdout: output.stdout,
            before,
            after: read_head(repo_root),
        },
        Ok(output) => UpdateOutcome::Failed {
            stderr: output.stderr,
        },
        Err(err) => {
            tracing::debug!("update aborted: {err}");
            UpdateOutcome::Error(err)
        }
    }
}

fn read_head(repo_root: &Path) -> Option<Oid> {
    match head_commit(repo_root) {
        Ok(oid) => oid,
        Err(err) => {
            tracing::debug!(root = %repo_root.display(), "could not read HEAD: {}", err.message());
            None
        }
    }
}
