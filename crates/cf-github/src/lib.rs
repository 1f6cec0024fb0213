//! # cf-github
//!
//! GitHub organization import for crewflow. Fetches an organization's
//! repositories from the REST API and registers each one as a project:
//!
//! - Paged fetching with partial-result preservation: a rate limit or a
//!   missing organization stops fetching but keeps what was already read.
//! - Deterministic project codes derived from repository names, so rerunning
//!   an import skips everything imported before.
//! - Language and topic heuristics map repositories to tech stack codes.
//!
//! ## Example
//!
//! ```ignore
//! use cf_github::{GithubClient, ImportService, ServiceSink};
//!
//! let client = GithubClient::new("https://api.github.com", token)?;
//! let import = ImportService::new(client, ServiceSink::new(db.runner()));
//! let summary = import.import_organization("one-project-one-month").await?;
//! println!("imported {} of {}", summary.imported, summary.total_repositories);
//! ```

pub mod client;
pub mod error;
pub mod heuristics;
pub mod import;
pub mod models;

// Re-exports
pub use client::{FetchHalt, FetchOutcome, GithubClient, RepoSource};
pub use error::GithubError;
pub use import::{CatalogSink, ImportService, ImportSummary, ServiceSink};
pub use models::Repository;
