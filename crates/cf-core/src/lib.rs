//! # cf-core
//!
//! Core types shared by every crewflow crate:
//! - The service result envelope (`ServiceResult`)
//! - Pagination types
//! - Application configuration
//! - Identifier generation

pub mod config;
pub mod ids;
pub mod pagination;
pub mod result;

pub use config::*;
pub use pagination::*;
pub use result::*;
