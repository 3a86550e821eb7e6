pub mod error;
pub mod github;
pub mod http_client;
pub mod traits;
pub mod types;

pub use error::FetchError;
pub use github::Github;
pub use traits::RepositorySource;
pub use types::RepoSummary;

#[cfg(test)]
mod test_utils;
