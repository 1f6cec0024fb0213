//! GitHub adapter errors

use thiserror::Error;

/// Errors raised by the GitHub client and import pipeline
///
/// API-level conditions (missing org, rate limit, bad status) are not
/// errors here; they are reported through `FetchHalt` so partial results
/// survive. Only transport problems reach this type.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Connection, DNS, timeout, or response decoding failure
    #[error("github transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
