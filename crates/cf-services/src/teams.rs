//! Team service
//!
//! Team CRUD plus the tech stack links a team carries. The team code is
//! checked for uniqueness by query at create time and never changes after.

use cf_core::ids::new_id;
use cf_core::{PageRequest, PagedResult, ServiceResult};
use cf_db::{
    ProjectTeamRepository, SqlRunner, TeamRepository, TeamRow, TeamTechStackRepository,
    TeamTechStackRow, TeamUserRepository,
};

use crate::base::{is_blank, run_db};

/// Fields for a new team
#[derive(Debug, Clone, Default)]
pub struct CreateTeam {
    pub team_code: String,
    pub team_name: String,
    pub tech_stack_codes: Vec<String>,
}

/// Fields applied to an existing team; the code is immutable
#[derive(Debug, Clone, Default)]
pub struct UpdateTeam {
    pub team_name: String,
    pub tech_stack_codes: Vec<String>,
}

/// A team with its tech stack codes
#[derive(Debug, Clone)]
pub struct TeamWithStacks {
    pub team: TeamRow,
    pub tech_stack_codes: Vec<String>,
}

fn validate_create(request: &CreateTeam) -> Option<String> {
    if is_blank(&request.team_code) || is_blank(&request.team_name) {
        return Some("TeamCode and TeamName are required.".to_string());
    }
    None
}

fn validate_update(team_id: &str, request: &UpdateTeam) -> Option<String> {
    if is_blank(team_id) {
        return Some("TeamId is required.".to_string());
    }
    if is_blank(&request.team_name) {
        return Some("TeamName is required.".to_string());
    }
    None
}

/// Team feature service
pub struct TeamService {
    teams: TeamRepository,
    team_tech_stacks: TeamTechStackRepository,
    team_users: TeamUserRepository,
    project_teams: ProjectTeamRepository,
}

impl TeamService {
    pub fn new(sql: SqlRunner) -> Self {
        Self {
            teams: TeamRepository::new(sql.clone()),
            team_tech_stacks: TeamTechStackRepository::new(sql.clone()),
            team_users: TeamUserRepository::new(sql.clone()),
            project_teams: ProjectTeamRepository::new(sql),
        }
    }

    pub async fn create(&self, request: CreateTeam) -> ServiceResult<TeamWithStacks> {
        if let Some(message) = validate_create(&request) {
            return ServiceResult::validation_error(message);
        }
        run_db("Error creating team", async {
            if self.teams.find_by_code(&request.team_code).await?.is_some() {
                return Ok(ServiceResult::validation_error(format!(
                    "Team with Code '{}' already exists.",
                    request.team_code
                )));
            }
            let team = TeamRow {
                team_id: new_id(),
                team_code: request.team_code.clone(),
                team_name: request.team_name.clone(),
            };
            if self.teams.insert(&team).await? == 0 {
                return Ok(ServiceResult::failure("Failed to create team."));
            }
            self.replace_stacks(&team.team_code, &request.tech_stack_codes, false)
                .await?;
            tracing::info!(team_code = %team.team_code, "team created");
            Ok(ServiceResult::success_with_message(
                TeamWithStacks {
                    team,
                    tech_stack_codes: request.tech_stack_codes.clone(),
                },
                "Team and associated tech stacks created successfully.",
            ))
        })
        .await
    }

    pub async fn get(&self, team_id: &str) -> ServiceResult<TeamWithStacks> {
        if is_blank(team_id) {
            return ServiceResult::validation_error("TeamId is required.");
        }
        run_db("Error retrieving team", async {
            let Some(team) = self.teams.find_by_id(team_id).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "Team with ID {team_id} not found."
                )));
            };
            let tech_stack_codes = self.team_tech_stacks.codes_of(&team.team_code).await?;
            Ok(ServiceResult::success(TeamWithStacks {
                team,
                tech_stack_codes,
            }))
        })
        .await
    }

    pub async fn list(
        &self,
        page: &PageRequest,
        filter_value: Option<&str>,
    ) -> ServiceResult<PagedResult<TeamRow>> {
        run_db("Error retrieving teams", async {
            let (items, total) = self.teams.list(page, filter_value).await?;
            Ok(ServiceResult::success_with_message(
                PagedResult::new(items, total, page),
                "Teams retrieved successfully.",
            ))
        })
        .await
    }

    /// Updates the team name and replaces its tech stack links.
    pub async fn update(&self, team_id: &str, request: UpdateTeam) -> ServiceResult<TeamWithStacks> {
        if let Some(message) = validate_update(team_id, &request) {
            return ServiceResult::validation_error(message);
        }
        run_db("Error updating team", async {
            let Some(existing) = self.teams.find_by_id(team_id).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "Team with ID {team_id} not found for update."
                )));
            };
            self.teams.update_name(team_id, &request.team_name).await?;
            self.replace_stacks(&existing.team_code, &request.tech_stack_codes, true)
                .await?;
            let team = TeamRow {
                team_id: team_id.to_string(),
                team_code: existing.team_code,
                team_name: request.team_name.clone(),
            };
            Ok(ServiceResult::success_with_message(
                TeamWithStacks {
                    team,
                    tech_stack_codes: request.tech_stack_codes.clone(),
                },
                "Team and associated tech stacks updated successfully.",
            ))
        })
        .await
    }

    /// Deletes the team and every association row keyed by its code.
    pub async fn delete(&self, team_id: &str) -> ServiceResult<()> {
        if is_blank(team_id) {
            return ServiceResult::validation_error("TeamId is required.");
        }
        run_db("Error deleting team", async {
            let Some(team) = self.teams.find_by_id(team_id).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "Team with ID {team_id} not found."
                )));
            };
            self.team_tech_stacks.delete_by_team(&team.team_code).await?;
            self.team_users.delete_by_team(&team.team_code).await?;
            self.project_teams.delete_by_team(&team.team_code).await?;
            if self.teams.delete(team_id).await? > 0 {
                tracing::info!(team_code = %team.team_code, "team deleted");
                Ok(ServiceResult::success_with_message(
                    (),
                    "Team and associated tech stacks deleted successfully.",
                ))
            } else {
                Ok(ServiceResult::failure(format!(
                    "Failed to delete team with ID {team_id}. It might have been deleted by another process."
                )))
            }
        })
        .await
    }

    /// Case-insensitive substring search over team code and name.
    pub async fn search(&self, keyword: &str) -> ServiceResult<Vec<TeamRow>> {
        run_db("Error searching teams", async {
            let teams = self.teams.search(keyword).await?;
            Ok(ServiceResult::success(teams))
        })
        .await
    }

    /// Every team, ordered by code.
    pub async fn all(&self) -> ServiceResult<Vec<TeamRow>> {
        run_db("Error retrieving teams", async {
            let teams = self.teams.all().await?;
            Ok(ServiceResult::success_with_message(
                teams,
                "Teams retrieved successfully.",
            ))
        })
        .await
    }

    pub async fn tech_stack_codes_of(&self, team_code: &str) -> ServiceResult<Vec<String>> {
        if is_blank(team_code) {
            return ServiceResult::validation_error("TeamCode is required.");
        }
        let context = format!("Error retrieving tech stacks for team {team_code}");
        run_db(&context, async {
            let codes = self.team_tech_stacks.codes_of(team_code).await?;
            Ok(ServiceResult::success_with_message(
                codes,
                "Tech stacks retrieved successfully for team.",
            ))
        })
        .await
    }

    /// Inserts one link per stack code; when `clear_first` is set the
    /// existing links are removed beforehand (full replace).
    async fn replace_stacks(
        &self,
        team_code: &str,
        tech_stack_codes: &[String],
        clear_first: bool,
    ) -> cf_db::DbResult<()> {
        if clear_first {
            self.team_tech_stacks.delete_by_team(team_code).await?;
        }
        for code in tech_stack_codes {
            self.team_tech_stacks
                .insert(&TeamTechStackRow {
                    team_tech_stack_id: new_id(),
                    team_code: team_code.to_string(),
                    tech_stack_code: code.clone(),
                })
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_create_requires_code_and_name() {
        let request = CreateTeam {
            team_code: "TEAM001".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_create(&request),
            Some("TeamCode and TeamName are required.".to_string())
        );

        let request = CreateTeam {
            team_code: "TEAM001".to_string(),
            team_name: "Backend".to_string(),
            ..Default::default()
        };
        assert_eq!(validate_create(&request), None);
    }

    #[test]
    fn test_validate_update() {
        let request = UpdateTeam {
            team_name: "Backend".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_update(" ", &request),
            Some("TeamId is required.".to_string())
        );

        let request = UpdateTeam::default();
        assert_eq!(
            validate_update("some-id", &request),
            Some("TeamName is required.".to_string())
        );
    }
}
