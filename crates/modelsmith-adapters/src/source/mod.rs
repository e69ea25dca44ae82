//! Remote artifact sources.

mod github;

pub use github::{DEFAULT_API_URL, DEFAULT_RAW_URL, GitHubError, GitHubSource, GitHubSourceConfig};
