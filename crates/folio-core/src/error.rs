//! Error types for folio-core.

use folio_config::error::ConfigError;
use folio_github::FetchError;
use miette::Diagnostic;
use thiserror::Error;

/// Core error type for building a portfolio page.
#[derive(Error, Diagnostic, Debug)]
pub enum FolioError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Fetch(#[from] FetchError),

    #[error("Error while {action}")]
    #[diagnostic(code(folio::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Repository load task failed: {0}")]
    #[diagnostic(
        code(folio::load_task),
        help("This is an internal error, please report it")
    )]
    LoadTask(#[from] tokio::task::JoinError),

    #[error("Page build was interrupted before the repositories loaded")]
    #[diagnostic(code(folio::interrupted))]
    Interrupted,

    #[error(transparent)]
    #[diagnostic(code(folio::json))]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    #[diagnostic(code(folio::error))]
    Custom(String),
}

/// Trait for adding context to IO errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, FolioError>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, FolioError>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            FolioError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_with_context_wraps_io_error() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = result
            .with_context(|| "writing page to /root/index.html".to_string())
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Error while writing page to /root/index.html"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_fetch_error_is_transparent() {
        let err: FolioError = FetchError::HttpError {
            status: 500,
            url: "https://api.github.com/users/x/repos".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "GitHub API error: 500");
    }
}
