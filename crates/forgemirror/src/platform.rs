//! Platform-agnostic pieces shared by the GitHub and GitLab clients.

mod errors;
mod rest;
mod types;

pub use errors::{PlatformError, Result, short_error_message};
pub use rest::{DEFAULT_MAX_PAGES, PAGE_SIZE, RestClient, USER_AGENT, encode_path_segment};
pub use types::{Forge, RepoPath};
