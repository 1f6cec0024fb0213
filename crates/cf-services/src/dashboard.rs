//! Dashboard service
//!
//! Read-only aggregates for the console landing view.

use cf_core::ServiceResult;
use cf_db::{
    ActivityRepository, ActivityRow, EndingProjectRow, ProjectRepository, SqlRunner,
    TeamRepository, UserRepository,
};
use chrono::{Duration, Utc};

use crate::base::run_db;

/// Headline counts shown at the top of the dashboard
#[derive(Debug, Clone, Default)]
pub struct DashboardSummary {
    pub total_projects: i64,
    pub active_projects: i64,
    pub total_teams: i64,
    pub total_users: i64,
}

/// Dashboard feature service
pub struct DashboardService {
    projects: ProjectRepository,
    teams: TeamRepository,
    users: UserRepository,
    activities: ActivityRepository,
}

impl DashboardService {
    pub fn new(sql: SqlRunner) -> Self {
        Self {
            projects: ProjectRepository::new(sql.clone()),
            teams: TeamRepository::new(sql.clone()),
            users: UserRepository::new(sql.clone()),
            activities: ActivityRepository::new(sql),
        }
    }

    pub async fn summary(&self) -> ServiceResult<DashboardSummary> {
        run_db("Error retrieving dashboard summary", async {
            let summary = DashboardSummary {
                total_projects: self.projects.count().await?,
                active_projects: self.projects.count_by_status("Active").await?,
                total_teams: self.teams.count().await?,
                total_users: self.users.count().await?,
            };
            Ok(ServiceResult::success(summary))
        })
        .await
    }

    /// Projects whose end date falls within the next `days` days.
    pub async fn ending_soon(&self, days: i64) -> ServiceResult<Vec<EndingProjectRow>> {
        run_db("Error retrieving ending projects", async {
            let cutoff = Utc::now().date_naive() + Duration::days(days);
            let projects = self.projects.ending_by(cutoff).await?;
            Ok(ServiceResult::success(projects))
        })
        .await
    }

    pub async fn latest_activities(&self, count: i64) -> ServiceResult<Vec<ActivityRow>> {
        run_db("Error retrieving latest activities", async {
            let items = self.activities.latest(count).await?;
            Ok(ServiceResult::success(items))
        })
        .await
    }
}
