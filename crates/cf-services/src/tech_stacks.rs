//! Tech stack service
//!
//! Catalog of technologies that users, teams, and projects link against.
//! Deleting a stack clears every link table that references its code.

use cf_core::ids::new_id;
use cf_core::{PageRequest, PagedResult, ServiceResult};
use cf_db::{
    ProjectTechStackRepository, SqlRunner, TeamTechStackRepository, TechStackRepository,
    TechStackRow, UserTechStackRepository,
};

use crate::base::{is_blank, run_db};

/// Fields for a new tech stack
#[derive(Debug, Clone, Default)]
pub struct CreateTechStack {
    pub tech_stack_code: String,
    pub tech_stack_name: String,
    pub tech_stack_short_code: Option<String>,
}

/// Fields applied to an existing tech stack
#[derive(Debug, Clone, Default)]
pub struct UpdateTechStack {
    pub tech_stack_code: String,
    pub tech_stack_name: String,
    pub tech_stack_short_code: Option<String>,
}

fn validate_fields(code: &str, name: &str) -> Option<String> {
    if is_blank(code) || is_blank(name) {
        return Some("TechStackCode and TechStackName are required.".to_string());
    }
    None
}

/// Tech stack feature service
pub struct TechStackService {
    tech_stacks: TechStackRepository,
    user_tech_stacks: UserTechStackRepository,
    project_tech_stacks: ProjectTechStackRepository,
    team_tech_stacks: TeamTechStackRepository,
}

impl TechStackService {
    pub fn new(sql: SqlRunner) -> Self {
        Self {
            tech_stacks: TechStackRepository::new(sql.clone()),
            user_tech_stacks: UserTechStackRepository::new(sql.clone()),
            project_tech_stacks: ProjectTechStackRepository::new(sql.clone()),
            team_tech_stacks: TeamTechStackRepository::new(sql),
        }
    }

    pub async fn create(&self, request: CreateTechStack) -> ServiceResult<TechStackRow> {
        if let Some(message) = validate_fields(&request.tech_stack_code, &request.tech_stack_name)
        {
            return ServiceResult::validation_error(message);
        }
        run_db("Error creating tech stack", async {
            let row = TechStackRow {
                tech_stack_id: new_id(),
                tech_stack_code: request.tech_stack_code.clone(),
                tech_stack_short_code: request.tech_stack_short_code.clone(),
                tech_stack_name: request.tech_stack_name.clone(),
            };
            if self.tech_stacks.insert(&row).await? == 0 {
                return Ok(ServiceResult::failure("Failed to create tech stack."));
            }
            Ok(ServiceResult::success(row))
        })
        .await
    }

    pub async fn get(&self, tech_stack_id: &str) -> ServiceResult<TechStackRow> {
        if is_blank(tech_stack_id) {
            return ServiceResult::validation_error("TechStackId is required.");
        }
        run_db("Error retrieving tech stack", async {
            match self.tech_stacks.find_by_id(tech_stack_id).await? {
                Some(row) => Ok(ServiceResult::success(row)),
                None => Ok(ServiceResult::not_found(format!(
                    "TechStack with ID {tech_stack_id} not found."
                ))),
            }
        })
        .await
    }

    pub async fn get_by_code(&self, tech_stack_code: &str) -> ServiceResult<TechStackRow> {
        if is_blank(tech_stack_code) {
            return ServiceResult::validation_error("TechStackCode is required.");
        }
        run_db("Error retrieving tech stack by code", async {
            match self.tech_stacks.find_by_code(tech_stack_code).await? {
                Some(row) => Ok(ServiceResult::success(row)),
                None => Ok(ServiceResult::not_found(format!(
                    "Tech stack with code {tech_stack_code} not found."
                ))),
            }
        })
        .await
    }

    pub async fn list(
        &self,
        page: &PageRequest,
        filter_value: Option<&str>,
    ) -> ServiceResult<PagedResult<TechStackRow>> {
        run_db("Error retrieving tech stacks", async {
            let (items, total) = self.tech_stacks.list(page, filter_value).await?;
            Ok(ServiceResult::success(PagedResult::new(items, total, page)))
        })
        .await
    }

    pub async fn update(
        &self,
        tech_stack_id: &str,
        request: UpdateTechStack,
    ) -> ServiceResult<TechStackRow> {
        if is_blank(tech_stack_id) {
            return ServiceResult::validation_error("TechStackId is required.");
        }
        if let Some(message) = validate_fields(&request.tech_stack_code, &request.tech_stack_name)
        {
            return ServiceResult::validation_error(message);
        }
        run_db("Error updating tech stack", async {
            let row = TechStackRow {
                tech_stack_id: tech_stack_id.to_string(),
                tech_stack_code: request.tech_stack_code.clone(),
                tech_stack_short_code: request.tech_stack_short_code.clone(),
                tech_stack_name: request.tech_stack_name.clone(),
            };
            if self.tech_stacks.update(&row).await? == 0 {
                return Ok(ServiceResult::not_found(format!(
                    "TechStack with ID {tech_stack_id} not found."
                )));
            }
            Ok(ServiceResult::success(row))
        })
        .await
    }

    /// Deletes the stack and every link row that references its code.
    pub async fn delete(&self, tech_stack_id: &str) -> ServiceResult<()> {
        if is_blank(tech_stack_id) {
            return ServiceResult::validation_error("TechStackId is required.");
        }
        run_db("Error deleting tech stack", async {
            let Some(row) = self.tech_stacks.find_by_id(tech_stack_id).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "TechStack with ID {tech_stack_id} not found."
                )));
            };
            self.user_tech_stacks
                .delete_by_stack(&row.tech_stack_code)
                .await?;
            self.project_tech_stacks
                .delete_by_stack(&row.tech_stack_code)
                .await?;
            self.team_tech_stacks
                .delete_by_stack(&row.tech_stack_code)
                .await?;
            if self.tech_stacks.delete(tech_stack_id).await? > 0 {
                tracing::info!(tech_stack_code = %row.tech_stack_code, "tech stack deleted");
                Ok(ServiceResult::success_with_message(
                    (),
                    "TechStack deleted successfully.",
                ))
            } else {
                Ok(ServiceResult::not_found(format!(
                    "TechStack with ID {tech_stack_id} not found."
                )))
            }
        })
        .await
    }

    /// Every stack, ordered by name.
    pub async fn all(&self) -> ServiceResult<Vec<TechStackRow>> {
        run_db("Error retrieving all tech stacks", async {
            let stacks = self.tech_stacks.all().await?;
            Ok(ServiceResult::success_with_message(
                stacks,
                "All tech stacks retrieved successfully.",
            ))
        })
        .await
    }

    /// Name substring (case-insensitive) or exact code match.
    pub async fn search(&self, term: &str) -> ServiceResult<Vec<TechStackRow>> {
        run_db("Error searching tech stacks", async {
            let stacks = self.tech_stacks.search(term).await?;
            Ok(ServiceResult::success(stacks))
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
            validate_fields("", "PostgreSQL"),
            Some("TechStackCode and TechStackName are required.".to_string())
        );
        assert_eq!(
            validate_fields("TS007", "  "),
            Some("TechStackCode and TechStackName are required.".to_string())
        );
        assert_eq!(validate_fields("TS007", "SQL"), None);
    }
}
