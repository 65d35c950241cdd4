use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name of the instruction document that ships next to the `b` installation.
pub const INSTRUCTION_FILE: &str = "b.md";

/// Directory holding `b.md` and the git checkout that `--update` pulls into.
///
/// Resolved once at startup and handed to every component that needs it, so
/// tests can point the whole program at a scratch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRoot(PathBuf);

impl InstallRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Uses `explicit` when given, otherwise searches upward from the running
    /// executable. The returned path is always absolute, and canonical when it
    /// exists.
    pub fn resolve(explicit: Option<PathBuf>) -> io::Result<Self> {
        if let Some(path) = explicit {
            let path = match path.canonicalize() {
                Ok(canonical) => canonical,
                Err(_) => std::path::absolute(path)?,
            };
            return Ok(Self(path));
        }

        let exe = std::env::current_exe()?;
        let exe = exe.canonicalize().unwrap_or(exe);
        let start = exe.parent().map(Path::to_path_buf).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("executable {} has no parent directory", exe.display()),
            )
        })?;

        Ok(Self::discover_from(&start))
    }

    /// Nearest ancestor of `start` (inclusive) containing `b.md`, or `start`
    /// itself when none does.
    pub fn discover_from(start: &Path) -> Self {
        let found = start
            .ancestors()
            .find(|dir| dir.join(INSTRUCTION_FILE).is_file())
            .unwrap_or(start);

        tracing::debug!(root = %found.display(), "resolved installation root");
        Self(found.to_path_buf())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn instruction_path(&self) -> PathBuf {
        self.0.join(INSTRUCTION_FILE)
    }
}

#[derive(Debug, Error)]
pub enum InstructionError {
    #[error("{} file not found in {}", INSTRUCTION_FILE, .dir.display())]
    Missing { dir: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn load_instructions(root: &InstallRoot) -> Result<String, InstructionError> {
    let path = root.instruction_path();

    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            tracing::debug!(path = %path.display(), bytes = contents.len(), "loaded instructions");
            Ok(contents)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(InstructionError::Missing {
            dir: root.path().to_path_buf(),
        }),
        Err(source) => Err(InstructionError::Read { path, source }),
    }
}
