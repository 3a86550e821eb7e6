use crate::{error::FetchError, types::RepoSummary};

/// Somewhere a list of repository summaries can be acquired from.
///
/// Implementations perform blocking I/O; async callers are expected to run
/// them on a blocking thread.
pub trait RepositorySource: Send + Sync {
    fn fetch_repositories(&self, account: &str) -> Result<Vec<RepoSummary>, FetchError>;
}

impl<S: RepositorySource + ?Sized> RepositorySource for std::sync::Arc<S> {
    fn fetch_repositories(&self, account: &str) -> Result<Vec<RepoSummary>, FetchError> {
        (**self).fetch_repositories(account)
    }
}
