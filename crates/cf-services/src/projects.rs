//! Project service
//!
//! Create, fetch, list, update, and delete projects together with their
//! team assignments. Team links are keyed by business code and replaced
//! wholesale on update.

use chrono::NaiveDate;

use cf_core::ids::new_id;
use cf_core::{PageRequest, PagedResult, ServiceResult, SortDirection};
use cf_db::{
    ActivityRepository, DbResult, ProjectRepository, ProjectRow, ProjectTeamRepository,
    ProjectTeamRow, ProjectTechStackRepository, ProjectUpdate, SqlRunner, TeamRow,
    TeamTechStackRepository, TeamTechStackRow,
};

use crate::base::{duplicate_codes, is_blank, run_db};

/// One team assignment inside a project request
#[derive(Debug, Clone, Default)]
pub struct ProjectTeamRequest {
    pub team_code: String,
    pub project_team_rating: Option<f64>,
    pub duration: Option<i64>,
    /// Optional stack the team brings along; linked in `Tbl_TeamTechStack`
    /// unless already present there.
    pub tech_stack_code: Option<String>,
}

/// Fields for a new project
#[derive(Debug, Clone, Default)]
pub struct CreateProject {
    pub project_code: String,
    pub project_name: String,
    pub repo_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_description: Option<String>,
    /// Defaults to `"Active"` when omitted.
    pub status: Option<String>,
    pub teams: Vec<ProjectTeamRequest>,
}

/// Fields applied to an existing project; an omitted status keeps the
/// stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub project_code: String,
    pub project_name: String,
    pub repo_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_description: Option<String>,
    pub status: Option<String>,
    pub teams: Vec<ProjectTeamRequest>,
}

/// A project with its team links
#[derive(Debug, Clone)]
pub struct ProjectWithTeams {
    pub project: ProjectRow,
    pub teams: Vec<ProjectTeamRow>,
}

fn validate_create(request: &CreateProject) -> Option<String> {
    if is_blank(&request.project_code) || is_blank(&request.project_name) {
        return Some("ProjectCode and ProjectName are required.".to_string());
    }
    let codes: Vec<String> = request.teams.iter().map(|t| t.team_code.clone()).collect();
    let duplicates = duplicate_codes(&codes);
    if !duplicates.is_empty() {
        return Some(format!(
            "Duplicate team(s) found in request: {}",
            duplicates.join(", ")
        ));
    }
    if request.teams.iter().any(|t| is_blank(&t.team_code)) {
        return Some("TeamCode is required for all project teams.".to_string());
    }
    None
}

fn validate_update(project_id: &str, request: &UpdateProject) -> Option<String> {
    if is_blank(project_id) {
        return Some("ProjectId is required.".to_string());
    }
    if is_blank(&request.project_code) || is_blank(&request.project_name) {
        return Some("ProjectCode and ProjectName are required.".to_string());
    }
    if request.teams.iter().any(|t| is_blank(&t.team_code)) {
        return Some("TeamCode is required for all project teams.".to_string());
    }
    None
}

fn validate_add_teams(project_code: &str, teams: &[ProjectTeamRequest]) -> Option<String> {
    if is_blank(project_code) {
        return Some("ProjectCode is required.".to_string());
    }
    if teams.is_empty() {
        return Some("At least one team is required.".to_string());
    }
    let codes: Vec<String> = teams.iter().map(|t| t.team_code.clone()).collect();
    let duplicates = duplicate_codes(&codes);
    if !duplicates.is_empty() {
        return Some(format!(
            "Duplicate team(s) found in request: {}",
            duplicates.join(", ")
        ));
    }
    if teams.iter().any(|t| is_blank(&t.team_code)) {
        return Some("TeamCode is required for all teams.".to_string());
    }
    None
}

/// Project feature service
pub struct ProjectService {
    projects: ProjectRepository,
    project_teams: ProjectTeamRepository,
    project_tech_stacks: ProjectTechStackRepository,
    team_tech_stacks: TeamTechStackRepository,
    activities: ActivityRepository,
}

impl ProjectService {
    pub fn new(sql: SqlRunner) -> Self {
        Self {
            projects: ProjectRepository::new(sql.clone()),
            project_teams: ProjectTeamRepository::new(sql.clone()),
            project_tech_stacks: ProjectTechStackRepository::new(sql.clone()),
            team_tech_stacks: TeamTechStackRepository::new(sql.clone()),
            activities: ActivityRepository::new(sql),
        }
    }

    pub async fn create(&self, request: CreateProject) -> ServiceResult<ProjectWithTeams> {
        if let Some(message) = validate_create(&request) {
            return ServiceResult::validation_error(message);
        }
        run_db("Error creating project", async {
            let project = ProjectRow {
                project_id: new_id(),
                project_code: request.project_code.clone(),
                project_name: request.project_name.clone(),
                repo_url: request.repo_url.clone(),
                start_date: request.start_date,
                end_date: request.end_date,
                project_description: request.project_description.clone(),
                status: request
                    .status
                    .clone()
                    .unwrap_or_else(|| "Active".to_string()),
            };
            if self.projects.insert(&project).await? == 0 {
                return Ok(ServiceResult::failure("Failed to create project."));
            }
            let teams = self.link_teams(&project.project_code, &request.teams).await?;
            tracing::info!(
                project_code = %project.project_code,
                teams = teams.len(),
                "project created"
            );
            Ok(ServiceResult::success_with_message(
                ProjectWithTeams { project, teams },
                "Project and teams created successfully.",
            ))
        })
        .await
    }

    pub async fn get(&self, project_id: &str) -> ServiceResult<ProjectWithTeams> {
        if is_blank(project_id) {
            return ServiceResult::validation_error("ProjectId is required.");
        }
        run_db("Error retrieving project", async {
            let Some(project) = self.projects.find_by_id(project_id).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "Project with ID {project_id} not found."
                )));
            };
            let teams = self.project_teams.links_of(&project.project_code).await?;
            Ok(ServiceResult::success(ProjectWithTeams { project, teams }))
        })
        .await
    }

    /// Paginated listing. Filter and sort keys outside the allow-lists are
    /// ignored rather than rejected.
    pub async fn list(
        &self,
        page: &PageRequest,
        filter_column: Option<&str>,
        filter_value: Option<&str>,
        sort_column: Option<&str>,
        descending: bool,
    ) -> ServiceResult<PagedResult<ProjectRow>> {
        run_db("Error retrieving projects", async {
            let direction = if descending {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            let (items, total) = self
                .projects
                .list(page, filter_column, filter_value, sort_column, direction)
                .await?;
            Ok(ServiceResult::success_with_message(
                PagedResult::new(items, total, page),
                "Projects retrieved successfully.",
            ))
        })
        .await
    }

    pub async fn update(
        &self,
        project_id: &str,
        request: UpdateProject,
    ) -> ServiceResult<ProjectWithTeams> {
        if let Some(message) = validate_update(project_id, &request) {
            return ServiceResult::validation_error(message);
        }
        run_db("Error updating project", async {
            let update = ProjectUpdate {
                project_id: project_id.to_string(),
                project_code: request.project_code.clone(),
                project_name: request.project_name.clone(),
                repo_url: request.repo_url.clone(),
                start_date: request.start_date,
                end_date: request.end_date,
                project_description: request.project_description.clone(),
                status: request.status.clone(),
            };
            if self.projects.update(&update).await? == 0 {
                return Ok(ServiceResult::not_found(format!(
                    "Project with ID {project_id} not found."
                )));
            }
            // Full replace of the team links under the (possibly new) code.
            self.project_teams
                .delete_by_project(&request.project_code)
                .await?;
            let teams = self.link_teams(&request.project_code, &request.teams).await?;

            let Some(project) = self.projects.find_by_id(project_id).await? else {
                return Ok(ServiceResult::failure(
                    "Project updated, but failed to retrieve details.",
                ));
            };
            Ok(ServiceResult::success_with_message(
                ProjectWithTeams { project, teams },
                "Project and teams updated successfully.",
            ))
        })
        .await
    }

    /// Deletes the project and every association row keyed by its code.
    pub async fn delete(&self, project_id: &str) -> ServiceResult<()> {
        if is_blank(project_id) {
            return ServiceResult::validation_error("ProjectId is required.");
        }
        run_db("Error deleting project", async {
            let Some(project) = self.projects.find_by_id(project_id).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "Project with ID {project_id} not found."
                )));
            };
            self.project_teams
                .delete_by_project(&project.project_code)
                .await?;
            self.project_tech_stacks
                .delete_by_project(&project.project_code)
                .await?;
            self.activities
                .delete_by_project(&project.project_code)
                .await?;
            if self.projects.delete(project_id).await? > 0 {
                tracing::info!(project_code = %project.project_code, "project deleted");
                Ok(ServiceResult::success_with_message(
                    (),
                    "Project and associated teams deleted successfully.",
                ))
            } else {
                Ok(ServiceResult::not_found(format!(
                    "Project with ID {project_id} could not be deleted as it was not found post dependency check."
                )))
            }
        })
        .await
    }

    /// Case-insensitive substring search over project code and name.
    pub async fn search(&self, keyword: &str) -> ServiceResult<Vec<ProjectRow>> {
        run_db("Error searching projects", async {
            let projects = self.projects.search(keyword).await?;
            Ok(ServiceResult::success_with_message(
                projects,
                "Search results returned.",
            ))
        })
        .await
    }

    pub async fn add_teams(
        &self,
        project_code: &str,
        teams: Vec<ProjectTeamRequest>,
    ) -> ServiceResult<()> {
        if let Some(message) = validate_add_teams(project_code, &teams) {
            return ServiceResult::validation_error(message);
        }
        run_db("Error adding teams to project", async {
            for team in &teams {
                if self
                    .project_teams
                    .exists_pair(project_code, &team.team_code)
                    .await?
                {
                    return Ok(ServiceResult::validation_error(format!(
                        "Team {} is already assigned to this project.",
                        team.team_code
                    )));
                }
            }
            self.link_teams(project_code, &teams).await?;
            Ok(ServiceResult::success_with_message(
                (),
                "Teams added to project successfully.",
            ))
        })
        .await
    }

    pub async fn remove_team(&self, project_code: &str, team_code: &str) -> ServiceResult<()> {
        if is_blank(project_code) || is_blank(team_code) {
            return ServiceResult::validation_error("ProjectCode and TeamCode are required.");
        }
        run_db("Error removing team from project", async {
            if self.project_teams.delete_pair(project_code, team_code).await? > 0 {
                Ok(ServiceResult::success_with_message(
                    (),
                    "Team removed successfully from project.",
                ))
            } else {
                Ok(ServiceResult::not_found(
                    "Failed to remove team: Team not found in project or project does not exist.",
                ))
            }
        })
        .await
    }

    /// Team records assigned to a project.
    pub async fn teams_of(&self, project_code: &str) -> ServiceResult<Vec<TeamRow>> {
        if is_blank(project_code) {
            return ServiceResult::validation_error("ProjectCode cannot be null or whitespace.");
        }
        let context = format!("Error retrieving teams for project {project_code}");
        run_db(&context, async {
            let teams = self.project_teams.teams_of(project_code).await?;
            Ok(ServiceResult::success_with_message(
                teams,
                "Teams retrieved successfully.",
            ))
        })
        .await
    }

    /// Whether a project with this business code already exists.
    pub async fn code_exists(&self, project_code: &str) -> ServiceResult<bool> {
        if is_blank(project_code) {
            return ServiceResult::validation_error("ProjectCode is required.");
        }
        run_db("Error checking project code", async {
            let exists = self.projects.code_exists(project_code).await?;
            Ok(ServiceResult::success(exists))
        })
        .await
    }

    /// Inserts one link row per requested team, plus the team's tech stack
    /// link when named and not already present.
    async fn link_teams(
        &self,
        project_code: &str,
        teams: &[ProjectTeamRequest],
    ) -> DbResult<Vec<ProjectTeamRow>> {
        let mut links = Vec::with_capacity(teams.len());
        for team in teams {
            let link = ProjectTeamRow {
                project_team_id: new_id(),
                project_code: project_code.to_string(),
                team_code: team.team_code.clone(),
                project_team_rating: team.project_team_rating,
                duration: team.duration,
            };
            if self.project_teams.insert(&link).await? > 0 {
                links.push(link);
            }
            if let Some(stack_code) = team.tech_stack_code.as_deref() {
                if !is_blank(stack_code)
                    && !self
                        .team_tech_stacks
                        .exists_pair(&team.team_code, stack_code)
                        .await?
                {
                    self.team_tech_stacks
                        .insert(&TeamTechStackRow {
                            team_tech_stack_id: new_id(),
                            team_code: team.team_code.clone(),
                            tech_stack_code: stack_code.to_string(),
                        })
                        .await?;
                }
            }
        }
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(code: &str) -> ProjectTeamRequest {
        ProjectTeamRequest {
            team_code: code.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_create_requires_code_and_name() {
        let request = CreateProject {
            project_code: "PROJ_X".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_create(&request),
            Some("ProjectCode and ProjectName are required.".to_string())
        );

        let request = CreateProject {
            project_code: "   ".to_string(),
            project_name: "X".to_string(),
            ..Default::default()
        };
        assert!(validate_create(&request).is_some());
    }

    #[test]
    fn test_validate_create_rejects_duplicate_teams() {
        let request = CreateProject {
            project_code: "PROJ_X".to_string(),
            project_name: "X".to_string(),
            teams: vec![team("TEAM001"), team("TEAM002"), team("TEAM001")],
            ..Default::default()
        };
        assert_eq!(
            validate_create(&request),
            Some("Duplicate team(s) found in request: TEAM001".to_string())
        );
    }

    #[test]
    fn test_validate_create_rejects_blank_team_code() {
        let request = CreateProject {
            project_code: "PROJ_X".to_string(),
            project_name: "X".to_string(),
            teams: vec![team("TEAM001"), team("  ")],
            ..Default::default()
        };
        assert_eq!(
            validate_create(&request),
            Some("TeamCode is required for all project teams.".to_string())
        );
    }

    #[test]
    fn test_validate_create_accepts_complete_request() {
        let request = CreateProject {
            project_code: "PROJ_X".to_string(),
            project_name: "X".to_string(),
            teams: vec![team("TEAM001"), team("TEAM002")],
            ..Default::default()
        };
        assert_eq!(validate_create(&request), None);
    }

    #[test]
    fn test_validate_update_requires_id() {
        let request = UpdateProject {
            project_code: "PROJ_X".to_string(),
            project_name: "X".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_update("", &request),
            Some("ProjectId is required.".to_string())
        );
        assert_eq!(validate_update("some-id", &request), None);
    }

    #[test]
    fn test_validate_add_teams() {
        assert_eq!(
            validate_add_teams("", &[team("TEAM001")]),
            Some("ProjectCode is required.".to_string())
        );
        assert_eq!(
            validate_add_teams("PROJ_X", &[]),
            Some("At least one team is required.".to_string())
        );
        assert_eq!(
            validate_add_teams("PROJ_X", &[team("A"), team("A")]),
            Some("Duplicate team(s) found in request: A".to_string())
        );
        assert_eq!(
            validate_add_teams("PROJ_X", &[team("A"), team(" ")]),
            Some("TeamCode is required for all teams.".to_string())
        );
        assert_eq!(validate_add_teams("PROJ_X", &[team("A"), team("B")]), None);
    }
}
