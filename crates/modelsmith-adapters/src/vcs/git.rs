//! Repository initialisation through the `git` executable.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, instrument};

use modelsmith_core::{
    application::{ApplicationError, ports::RepositoryInitializer},
    domain::Signature,
    error::SmithResult,
};

/// Drives `git` as an external command.
#[derive(Debug, Clone)]
pub struct GitCommandInitializer {
    program: PathBuf,
}

impl GitCommandInitializer {
    /// Uses `git` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, operation: &'static str, path: &Path, args: &[&str]) -> SmithResult<Output> {
        debug!(program = %self.program.display(), ?args, "Running");
        let output = Command::new(&self.program)
            .arg("-C")
            .arg(path)
            .args(args)
            .output()
            .map_err(|e| ApplicationError::RepositoryFailed {
                operation,
                path: path.to_path_buf(),
                reason: format!("could not run {}: {}", self.program.display(), e),
            })?;

        if !output.status.success() {
            return Err(ApplicationError::RepositoryFailed {
                operation,
                path: path.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(output)
    }
}

impl Default for GitCommandInitializer {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryInitializer for GitCommandInitializer {
    #[instrument(skip(self))]
    fn init(&self, path: &Path) -> SmithResult<()> {
        self.run("init", path, &["init", "--quiet"]).map(|_| ())
    }

    #[instrument(skip(self))]
    fn stage_all(&self, path: &Path) -> SmithResult<()> {
        self.run("stage", path, &["add", "--all"]).map(|_| ())
    }

    #[instrument(skip(self, author))]
    fn commit(&self, path: &Path, message: &str, author: &Signature) -> SmithResult<Option<String>> {
        let name = format!("user.name={}", author.name);
        let email = format!("user.email={}", author.email);
        self.run(
            "commit",
            path,
            &["-c", &name, "-c", &email, "commit", "--quiet", "-m", message],
        )?;

        let head = self.run("rev-parse", path, &["rev-parse", "HEAD"])?;
        let id = String::from_utf8_lossy(&head.stdout).trim().to_string();
        Ok((!id.is_empty()).then_some(id))
    }
}
