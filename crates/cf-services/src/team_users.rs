//! Team membership service
//!
//! Adds and removes users from teams by business code. Membership is
//! idempotent: adding an existing pair reports success without writing.

use cf_core::ids::new_sortable_id;
use cf_core::{PageRequest, PagedResult, ServiceResult};
use cf_db::{
    SqlRunner, TeamMemberRow, TeamRepository, TeamRow, TeamUserListRow, TeamUserRepository,
    TeamUserRow, UserRepository, UserRow,
};

use crate::base::{is_blank, run_db};

/// Request to place a user in a team
#[derive(Debug, Clone, Default)]
pub struct AddTeamUser {
    pub team_code: String,
    pub user_code: String,
    pub user_rating: Option<f64>,
}

/// A team together with its current members
#[derive(Debug, Clone)]
pub struct TeamWithUsers {
    pub team: TeamRow,
    pub users: Vec<UserRow>,
}

fn validate_pair(team_code: &str, user_code: &str) -> Option<String> {
    if is_blank(team_code) || is_blank(user_code) {
        return Some("TeamCode and UserCode are required.".to_string());
    }
    None
}

/// Team membership feature service
pub struct TeamUserService {
    team_users: TeamUserRepository,
    teams: TeamRepository,
    users: UserRepository,
}

impl TeamUserService {
    pub fn new(sql: SqlRunner) -> Self {
        Self {
            team_users: TeamUserRepository::new(sql.clone()),
            teams: TeamRepository::new(sql.clone()),
            users: UserRepository::new(sql),
        }
    }

    /// Adds a user to a team. Both codes must resolve to existing rows;
    /// an already-present pair is reported as success.
    pub async fn add(&self, request: AddTeamUser) -> ServiceResult<()> {
        if let Some(message) = validate_pair(&request.team_code, &request.user_code) {
            return ServiceResult::validation_error(message);
        }
        run_db("Error adding user to team", async {
            if !self.teams.code_exists(&request.team_code).await? {
                return Ok(ServiceResult::not_found(format!(
                    "Team with code {} not found.",
                    request.team_code
                )));
            }
            if !self.users.code_exists(&request.user_code).await? {
                return Ok(ServiceResult::not_found(format!(
                    "User with code {} not found.",
                    request.user_code
                )));
            }
            if self
                .team_users
                .find_pair(&request.team_code, &request.user_code)
                .await?
                .is_some()
            {
                return Ok(ServiceResult::success_with_message(
                    (),
                    format!(
                        "User {} is already a member of team {}.",
                        request.user_code, request.team_code
                    ),
                ));
            }
            let row = TeamUserRow {
                team_user_id: new_sortable_id(),
                team_code: request.team_code.clone(),
                user_code: request.user_code.clone(),
                user_rating: request.user_rating,
            };
            if self.team_users.insert(&row).await? > 0 {
                tracing::info!(
                    team_code = %request.team_code,
                    user_code = %request.user_code,
                    "team member added"
                );
                Ok(ServiceResult::success_with_message(
                    (),
                    format!(
                        "User {} added to team {}.",
                        request.user_code, request.team_code
                    ),
                ))
            } else {
                Ok(ServiceResult::failure(
                    "Failed to add user to team. No rows affected.",
                ))
            }
        })
        .await
    }

    /// Members of a team with their user details, ordered by name.
    pub async fn members_of(&self, team_code: &str) -> ServiceResult<Vec<TeamMemberRow>> {
        if is_blank(team_code) {
            return ServiceResult::validation_error("TeamCode is required.");
        }
        run_db("Error retrieving team members", async {
            let members = self.team_users.members_of(team_code).await?;
            Ok(ServiceResult::success(members))
        })
        .await
    }

    /// The team row plus the full user rows of its members.
    pub async fn team_with_users(&self, team_code: &str) -> ServiceResult<TeamWithUsers> {
        if is_blank(team_code) {
            return ServiceResult::validation_error("TeamCode is required.");
        }
        run_db("Error retrieving team with users", async {
            let Some(team) = self.teams.find_by_code(team_code).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "Team with code {team_code} not found."
                )));
            };
            let users = self.team_users.users_of(team_code).await?;
            Ok(ServiceResult::success(TeamWithUsers { team, users }))
        })
        .await
    }

    /// Pages all memberships joined with team and user names.
    pub async fn list(
        &self,
        page: &PageRequest,
        filter_value: Option<&str>,
    ) -> ServiceResult<PagedResult<TeamUserListRow>> {
        run_db("Error retrieving team users", async {
            let (items, total) = self.team_users.list(page, filter_value).await?;
            Ok(ServiceResult::success(PagedResult::new(items, total, page)))
        })
        .await
    }

    pub async fn remove(&self, team_user_id: &str) -> ServiceResult<()> {
        if is_blank(team_user_id) {
            return ServiceResult::validation_error("TeamUserId is required.");
        }
        run_db("Error removing team user", async {
            if self.team_users.delete(team_user_id).await? > 0 {
                Ok(ServiceResult::success_with_message(
                    (),
                    "Team user removed successfully.",
                ))
            } else {
                Ok(ServiceResult::not_found(format!(
                    "TeamUser with ID {team_user_id} not found or already removed."
                )))
            }
        })
        .await
    }

    /// Removes a membership addressed by its business-code pair.
    pub async fn remove_member(&self, team_code: &str, user_code: &str) -> ServiceResult<()> {
        if let Some(message) = validate_pair(team_code, user_code) {
            return ServiceResult::validation_error(message);
        }
        run_db("Error removing user from team", async {
            if self.team_users.delete_pair(team_code, user_code).await? > 0 {
                tracing::info!(team_code = %team_code, user_code = %user_code, "team member removed");
                Ok(ServiceResult::success_with_message(
                    (),
                    format!("User {user_code} removed from team {team_code}."),
                ))
            } else {
                Ok(ServiceResult::not_found(format!(
                    "User {user_code} not found in team {team_code}, or already removed."
                )))
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pair() {
        assert_eq!(
            validate_pair("", "USR001"),
            Some("TeamCode and UserCode are required.".to_string())
        );
        assert_eq!(
            validate_pair("TEAM001", " "),
            Some("TeamCode and UserCode are required.".to_string())
        );
        assert_eq!(validate_pair("TEAM001", "USR001"), None);
    }
}
