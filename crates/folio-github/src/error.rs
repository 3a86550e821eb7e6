use miette::Diagnostic;
use thiserror::Error;

/// Failure to acquire the repository list.
///
/// The `Display` output of each variant is what ends up on the rendered page
/// in place of the repository grids, so it is kept short.
#[derive(Error, Diagnostic, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {url}")]
    #[diagnostic(code(folio_github::invalid_url))]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to fetch repos: {0}")]
    #[diagnostic(
        code(folio_github::network),
        help("Check your internet connection or try again later")
    )]
    Network(#[from] Box<ureq::Error>),

    #[error("GitHub API error: {status}")]
    #[diagnostic(
        code(folio_github::http_error),
        help("Make sure the GitHub account name is correct and the API rate limit is not exhausted")
    )]
    HttpError { status: u16, url: String },

    #[error("Invalid response from GitHub API")]
    #[diagnostic(code(folio_github::invalid_response))]
    InvalidResponse,
}

pub type Result<T> = std::result::Result<T, FetchError>;

impl From<ureq::Error> for FetchError {
    /// Converts a `ureq::Error` into a `FetchError::Network` variant.
    fn from(e: ureq::Error) -> Self {
        Self::Network(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_http_error() {
        let err = FetchError::HttpError {
            status: 404,
            url: "https://api.github.com/users/nobody/repos".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API error: 404");
    }

    #[test]
    fn test_fetch_error_invalid_url() {
        let err = FetchError::InvalidUrl {
            url: "not a url".to_string(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid URL"));
        assert!(msg.contains("not a url"));
    }

    #[test]
    fn test_fetch_error_invalid_response() {
        let err = FetchError::InvalidResponse;
        assert_eq!(err.to_string(), "Invalid response from GitHub API");
    }

    #[test]
    fn test_from_ureq_error() {
        let err: FetchError = ureq::Error::ConnectionFailed.into();

        assert!(err.to_string().starts_with("Failed to fetch repos: "));
        match err {
            FetchError::Network(_) => (),
            _ => panic!("Expected Network error variant"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let err = FetchError::InvalidUrl {
            url: "::".to_string(),
            source: url::ParseError::EmptyHost,
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
