use serde_json::Value;
use tracing::{debug, warn};
use ureq::http::header::{ACCEPT, CACHE_CONTROL};
use url::Url;

use crate::{
    error::FetchError, http_client::SHARED_AGENT, traits::RepositorySource, types::RepoSummary,
};

/// Repository listing backed by the public GitHub REST API.
///
/// Requests are unauthenticated and always ask for the first page of up to
/// 100 repositories, most recently updated first.
#[derive(Debug, Clone)]
pub struct Github {
    api_base: String,
}

impl Default for Github {
    fn default() -> Self {
        Self::new()
    }
}

impl Github {
    pub const API_UPSTREAM: &'static str = "https://api.github.com";
    pub const PER_PAGE: u32 = 100;
    pub const MEDIA_TYPE: &'static str = "application/vnd.github+json";

    pub fn new() -> Self {
        Self::with_api_base(Self::API_UPSTREAM)
    }

    /// Points the client at a different API root, e.g. a GitHub Enterprise
    /// host or a local mirror.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    /// Builds the listing URL for `account`, which is percent-encoded as a
    /// single path segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_github::github::Github;
    ///
    /// let url = Github::new().repos_url("octocat").unwrap();
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://api.github.com/users/octocat/repos?per_page=100&sort=updated"
    /// );
    /// ```
    pub fn repos_url(&self, account: &str) -> Result<Url, FetchError> {
        let base = self.api_base.trim_end_matches('/');
        let invalid = |source| {
            FetchError::InvalidUrl {
                url: base.to_string(),
                source,
            }
        };

        let mut url = Url::parse(base).map_err(invalid)?;
        url.path_segments_mut()
            .map_err(|_| invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["users", account, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &Self::PER_PAGE.to_string())
            .append_pair("sort", "updated");

        Ok(url)
    }
}

impl RepositorySource for Github {
    fn fetch_repositories(&self, account: &str) -> Result<Vec<RepoSummary>, FetchError> {
        let url = self.repos_url(account)?;
        debug!("fetching repositories from {}", url);

        let mut resp = SHARED_AGENT
            .get(url.as_str())
            .header(ACCEPT, Self::MEDIA_TYPE)
            .header(CACHE_CONTROL, "no-cache")
            .call()?;
        let status = resp.status();

        if !status.is_success() {
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let json: Value = resp
            .body_mut()
            .read_json()
            .map_err(|_| FetchError::InvalidResponse)?;

        parse_repositories(json)
    }
}

/// Interprets a decoded listing payload.
///
/// An array is read element by element into [`RepoSummary`] values. Any other
/// JSON value yields an empty list rather than an error.
pub fn parse_repositories(json: Value) -> Result<Vec<RepoSummary>, FetchError> {
    match json {
        Value::Array(_) => serde_json::from_value(json).map_err(|_| FetchError::InvalidResponse),
        other => {
            warn!(
                "expected a repository array, got {}; treating as empty",
                json_kind(&other)
            );
            Ok(Vec::new())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
