//! # cf-services
//!
//! Business logic for crewflow. Each entity gets a feature service that
//! validates input, talks to the `cf-db` repositories, and wraps every
//! outcome in a [`cf_core::ServiceResult`]:
//!
//! - Validation runs before any write, so a rejected request leaves the
//!   database untouched.
//! - Database errors never escape as panics or raw errors; they come back
//!   as `ServiceResult::Failure` with the failing operation named.
//! - Deletes cascade through the link tables that reference the entity's
//!   business code.
//!
//! ## Example
//!
//! ```ignore
//! use cf_db::Database;
//! use cf_services::{CreateTeam, TeamService};
//!
//! let db = Database::connect(&config).await?;
//! let teams = TeamService::new(db.runner());
//! let result = teams
//!     .create(CreateTeam {
//!         team_code: "TEAM001".into(),
//!         team_name: "Platform".into(),
//!         tech_stack_codes: vec!["TS003".into()],
//!     })
//!     .await;
//! assert!(result.is_success());
//! ```

mod base;

pub mod activities;
pub mod dashboard;
pub mod project_tech_stacks;
pub mod projects;
pub mod team_users;
pub mod teams;
pub mod tech_stacks;
pub mod users;

// Re-exports
pub use activities::{ActivityService, NewActivity};
pub use dashboard::{DashboardService, DashboardSummary};
pub use project_tech_stacks::{AssignedStacks, ProjectTechStackService};
pub use projects::{
    CreateProject, ProjectService, ProjectTeamRequest, ProjectWithTeams, UpdateProject,
};
pub use team_users::{AddTeamUser, TeamUserService, TeamWithUsers};
pub use teams::{CreateTeam, TeamService, TeamWithStacks, UpdateTeam};
pub use tech_stacks::{CreateTechStack, TechStackService, UpdateTechStack};
pub use users::{CreateUser, UpdateUser, UserService, UserWithStacks};
