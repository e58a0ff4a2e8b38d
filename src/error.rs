use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds surfaced by the packit workflows.
///
/// Workflows return `anyhow::Result` and wrap these so that commands can
/// bubble everything to `main`, which decides the process exit status.
/// Nothing below `main` terminates the process.
#[derive(Debug, Error)]
pub enum PackitError {
    #[error("You're not currently logged in. Use 'packit login <token>' to authenticate.")]
    NotAuthenticated,
    #[error("You're already logged in. Use 'packit logout' to logout first.")]
    AlreadyAuthenticated,
    #[error("The access token was rejected by the server")]
    InvalidToken,
    #[error("package.json must contain a non-empty '{0}' field")]
    MissingManifestField(&'static str),
    #[error("Template '{0}' not found")]
    TemplateNotFound(String),
    #[error("Directory '{}' already exists. Use --force to overwrite.", .0.display())]
    TargetExists(PathBuf),
    #[error("Package not found")]
    RecordNotFound,
    #[error("You don't have permission to perform this action")]
    PermissionDenied,
    #[error("Aborted")]
    Aborted,
}

impl PackitError {
    /// Exit status `main` should report for this failure.
    /// Prompt cancellation mirrors the conventional 128+SIGINT code.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackitError::Aborted => 130,
            _ => 1,
        }
    }
}
