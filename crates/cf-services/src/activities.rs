//! Activity service
//!
//! Daily task log entries recorded against a project/team pair.

use cf_core::ids::new_sortable_id;
use cf_core::ServiceResult;
use cf_db::{ActivityDetailRow, ActivityRepository, ActivityRow, SqlRunner};
use chrono::NaiveDate;

use crate::base::{is_blank, run_db};

/// Fields for a new activity entry
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub project_code: String,
    pub team_code: String,
    pub activity_date: NaiveDate,
    pub tasks: String,
}

fn validate_fields(project_code: &str, team_code: &str, tasks: &str) -> Option<String> {
    if is_blank(project_code) || is_blank(team_code) || is_blank(tasks) {
        return Some("ProjectCode, TeamCode, ActivityDate, and Tasks are required.".to_string());
    }
    None
}

/// Activity feature service
pub struct ActivityService {
    activities: ActivityRepository,
}

impl ActivityService {
    pub fn new(sql: SqlRunner) -> Self {
        Self {
            activities: ActivityRepository::new(sql),
        }
    }

    pub async fn log(&self, request: NewActivity) -> ServiceResult<ActivityRow> {
        if let Some(message) =
            validate_fields(&request.project_code, &request.team_code, &request.tasks)
        {
            return ServiceResult::validation_error(message);
        }
        run_db("Error logging activity", async {
            let row = ActivityRow {
                project_team_activity_id: new_sortable_id(),
                project_code: request.project_code.clone(),
                team_code: request.team_code.clone(),
                activity_date: request.activity_date,
                tasks: request.tasks.clone(),
            };
            if self.activities.insert(&row).await? > 0 {
                tracing::info!(
                    project_code = %row.project_code,
                    team_code = %row.team_code,
                    "activity logged"
                );
                Ok(ServiceResult::success_with_message(
                    row,
                    "Activity logged successfully.",
                ))
            } else {
                Ok(ServiceResult::failure(
                    "Failed to log activity. No rows affected.",
                ))
            }
        })
        .await
    }

    pub async fn update(&self, row: ActivityRow) -> ServiceResult<ActivityRow> {
        if is_blank(&row.project_team_activity_id) {
            return ServiceResult::validation_error(
                "ProjectTeamActivityId is required for update.",
            );
        }
        if let Some(message) = validate_fields(&row.project_code, &row.team_code, &row.tasks) {
            return ServiceResult::validation_error(message);
        }
        run_db("Error updating activity", async {
            if self.activities.update(&row).await? == 0 {
                return Ok(ServiceResult::not_found(
                    "Activity not found or no changes made.",
                ));
            }
            Ok(ServiceResult::success_with_message(
                row,
                "Activity updated successfully.",
            ))
        })
        .await
    }

    /// One activity with its project and team names resolved.
    pub async fn get(&self, activity_id: &str) -> ServiceResult<ActivityDetailRow> {
        if is_blank(activity_id) {
            return ServiceResult::validation_error("Activity ID is required.");
        }
        run_db("Error retrieving activity", async {
            match self.activities.find_detail(activity_id).await? {
                Some(detail) => Ok(ServiceResult::success(detail)),
                None => Ok(ServiceResult::not_found(format!(
                    "Activity with ID {activity_id} not found."
                ))),
            }
        })
        .await
    }

    /// Activities newest-first, optionally filtered by project and/or team.
    pub async fn list(
        &self,
        project_code: Option<&str>,
        team_code: Option<&str>,
    ) -> ServiceResult<Vec<ActivityDetailRow>> {
        run_db("Error retrieving activities", async {
            let items = self.activities.list(project_code, team_code).await?;
            Ok(ServiceResult::success(items))
        })
        .await
    }

    pub async fn delete(&self, activity_id: &str) -> ServiceResult<()> {
        if is_blank(activity_id) {
            return ServiceResult::validation_error("ProjectTeamActivityId is required.");
        }
        run_db("Error deleting activity", async {
            if self.activities.delete(activity_id).await? > 0 {
                Ok(ServiceResult::success_with_message(
                    (),
                    "Activity deleted successfully.",
                ))
            } else {
                Ok(ServiceResult::not_found(format!(
                    "Activity with ID {activity_id} not found or already deleted."
                )))
            }
        })
        .await
    }

    /// The most recent entries, newest first.
    pub async fn latest(&self, count: i64) -> ServiceResult<Vec<ActivityRow>> {
        run_db("Error retrieving latest activities", async {
            let items = self.activities.latest(count).await?;
            Ok(ServiceResult::success(items))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fields() {
        assert_eq!(
            validate_fields("", "TEAM001", "standup"),
            Some("ProjectCode, TeamCode, ActivityDate, and Tasks are required.".to_string())
        );
        assert_eq!(
            validate_fields("PROJ_A", "TEAM001", "  "),
            Some("ProjectCode, TeamCode, ActivityDate, and Tasks are required.".to_string())
        );
        assert_eq!(validate_fields("PROJ_A", "TEAM001", "standup"), None);
    }
}
