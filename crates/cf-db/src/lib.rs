//! # cf-db
//!
//! Database layer for crewflow.
//!
//! This crate provides PostgreSQL database access using SQLx, including:
//!
//! - Connection pool management
//! - A parameterized statement runner with statement logging
//! - Repositories for projects, teams, users, tech stacks, and the link
//!   tables that tie them together
//!
//! ## Example
//!
//! ```ignore
//! use cf_db::{Database, DatabaseConfig};
//! use cf_db::projects::ProjectRepository;
//!
//! let config = DatabaseConfig::with_url("postgres://localhost/crewflow");
//! let db = Database::connect(&config).await?;
//!
//! let repo = ProjectRepository::new(db.runner());
//! let project = repo.find_by_id("...").await?;
//! ```

pub mod activities;
pub mod error;
pub mod gateway;
pub mod pool;
pub mod project_teams;
pub mod project_tech_stacks;
pub mod projects;
pub mod query;
pub mod team_tech_stacks;
pub mod team_users;
pub mod teams;
pub mod tech_stacks;
pub mod user_tech_stacks;
pub mod users;

// Re-exports
pub use error::{DbError, DbResult};
pub use gateway::{SqlRunner, SqlValue};
pub use pool::{Database, DatabaseConfig};
pub use query::{escape_like, normalize_column_key, ListQuery, ListQueryBuilder};

pub use activities::{ActivityDetailRow, ActivityRepository, ActivityRow};
pub use project_teams::{ProjectTeamRepository, ProjectTeamRow};
pub use project_tech_stacks::{ProjectTechStackRepository, ProjectTechStackRow};
pub use projects::{EndingProjectRow, ProjectRepository, ProjectRow, ProjectUpdate};
pub use team_tech_stacks::{TeamTechStackRepository, TeamTechStackRow};
pub use team_users::{TeamMemberRow, TeamUserListRow, TeamUserRepository, TeamUserRow};
pub use teams::{TeamRepository, TeamRow};
pub use tech_stacks::{TechStackRepository, TechStackRow};
pub use user_tech_stacks::{UserStackRow, UserTechStackRepository, UserTechStackRow};
pub use users::{UserRepository, UserRow};
