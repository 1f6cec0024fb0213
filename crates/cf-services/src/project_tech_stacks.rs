//! Project tech stack service
//!
//! Assigns tech stack codes to projects. Assignment cleans the incoming
//! list (trims, drops blanks, dedups) and skips codes already linked, so
//! repeated assigns converge instead of erroring.

use cf_core::ids::new_id;
use cf_core::{PageRequest, PagedResult, ServiceResult};
use cf_db::{ProjectTechStackRepository, ProjectTechStackRow, SqlRunner};

use crate::base::{is_blank, run_db};

/// A project's assigned stack codes after a mutation
#[derive(Debug, Clone, Default)]
pub struct AssignedStacks {
    pub project_code: String,
    pub tech_stack_codes: Vec<String>,
}

/// Trims entries, drops blanks, and dedups while preserving order.
fn clean_codes(codes: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for code in codes {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !seen.iter().any(|c: &String| c == trimmed) {
            seen.push(trimmed.to_string());
        }
    }
    seen
}

/// Project tech stack feature service
pub struct ProjectTechStackService {
    project_tech_stacks: ProjectTechStackRepository,
}

impl ProjectTechStackService {
    pub fn new(sql: SqlRunner) -> Self {
        Self {
            project_tech_stacks: ProjectTechStackRepository::new(sql),
        }
    }

    /// Links the given stack codes to a project, skipping any already
    /// assigned. Fails only when every requested code was present.
    pub async fn assign(
        &self,
        project_code: &str,
        tech_stack_codes: Vec<String>,
    ) -> ServiceResult<AssignedStacks> {
        if is_blank(project_code) {
            return ServiceResult::validation_error("ProjectCode is required.");
        }
        if tech_stack_codes.is_empty() {
            return ServiceResult::validation_error("At least one TechStackCode is required.");
        }
        let clean = clean_codes(&tech_stack_codes);
        if clean.is_empty() {
            return ServiceResult::validation_error("No valid TechStackCodes provided.");
        }
        run_db("Error assigning tech stacks", async {
            let existing = self.project_tech_stacks.codes_of(project_code).await?;
            let mut inserted = 0usize;
            for code in &clean {
                if existing.iter().any(|c| c == code) {
                    continue;
                }
                let row = ProjectTechStackRow {
                    project_tech_stack_id: new_id(),
                    project_code: project_code.to_string(),
                    tech_stack_code: code.clone(),
                };
                if self.project_tech_stacks.insert(&row).await? > 0 {
                    inserted += 1;
                }
            }
            if inserted == 0 {
                return Ok(ServiceResult::failure(
                    "All provided tech stacks already exist.",
                ));
            }
            tracing::info!(project_code = %project_code, count = inserted, "tech stacks assigned");
            let codes = self.project_tech_stacks.codes_of(project_code).await?;
            Ok(ServiceResult::success_with_message(
                AssignedStacks {
                    project_code: project_code.to_string(),
                    tech_stack_codes: codes,
                },
                format!("{inserted} tech stack(s) assigned."),
            ))
        })
        .await
    }

    /// All stack codes linked to a project, ordered by code.
    pub async fn codes_of(&self, project_code: &str) -> ServiceResult<Vec<String>> {
        if is_blank(project_code) {
            return ServiceResult::validation_error("ProjectCode is required.");
        }
        run_db("Error retrieving tech stacks for project", async {
            let codes = self.project_tech_stacks.codes_of(project_code).await?;
            Ok(ServiceResult::success(codes))
        })
        .await
    }

    /// Pages a project's stack codes.
    pub async fn codes_paged(
        &self,
        project_code: &str,
        page: &PageRequest,
    ) -> ServiceResult<PagedResult<String>> {
        if is_blank(project_code) {
            return ServiceResult::validation_error("ProjectCode is required.");
        }
        run_db("Error retrieving paged tech stacks", async {
            let (items, total) = self
                .project_tech_stacks
                .codes_paged(project_code, page)
                .await?;
            let message = if total == 0 {
                "No tech stacks found."
            } else {
                "Retrieved paged tech stacks successfully."
            };
            Ok(ServiceResult::success_with_message(
                PagedResult::new(items, total, page),
                message,
            ))
        })
        .await
    }

    /// Swaps one assigned code for another on the same project.
    pub async fn reassign(
        &self,
        project_code: &str,
        old_tech_stack_code: &str,
        new_tech_stack_code: &str,
    ) -> ServiceResult<AssignedStacks> {
        if is_blank(project_code) || is_blank(old_tech_stack_code) || is_blank(new_tech_stack_code)
        {
            return ServiceResult::validation_error("All fields are required.");
        }
        run_db("Error updating tech stack", async {
            let changed = self
                .project_tech_stacks
                .reassign(project_code, old_tech_stack_code, new_tech_stack_code)
                .await?;
            if changed == 0 {
                return Ok(ServiceResult::failure("Failed to update tech stack."));
            }
            let codes = self.project_tech_stacks.codes_of(project_code).await?;
            Ok(ServiceResult::success_with_message(
                AssignedStacks {
                    project_code: project_code.to_string(),
                    tech_stack_codes: codes,
                },
                "Tech stack updated successfully.",
            ))
        })
        .await
    }

    /// Unlinks one stack code and returns those that remain.
    pub async fn remove(
        &self,
        project_code: &str,
        tech_stack_code: &str,
    ) -> ServiceResult<AssignedStacks> {
        if is_blank(project_code) || is_blank(tech_stack_code) {
            return ServiceResult::validation_error(
                "Both ProjectCode and TechStackCode are required.",
            );
        }
        run_db("Error deleting tech stack", async {
            let deleted = self
                .project_tech_stacks
                .delete_pair(project_code, tech_stack_code)
                .await?;
            if deleted == 0 {
                return Ok(ServiceResult::failure(
                    "Tech stack not found or could not be deleted.",
                ));
            }
            let codes = self.project_tech_stacks.codes_of(project_code).await?;
            Ok(ServiceResult::success_with_message(
                AssignedStacks {
                    project_code: project_code.to_string(),
                    tech_stack_codes: codes,
                },
                "Tech stack deleted successfully.",
            ))
        })
        .await
    }

    /// Clears every stack linked to the project.
    pub async fn remove_all(&self, project_code: &str) -> ServiceResult<()> {
        if is_blank(project_code) {
            return ServiceResult::validation_error("ProjectCode is required.");
        }
        run_db("Error deleting tech stacks", async {
            let deleted = self.project_tech_stacks.delete_by_project(project_code).await?;
            if deleted == 0 {
                return Ok(ServiceResult::failure("No tech stacks found for deletion."));
            }
            Ok(ServiceResult::success_with_message(
                (),
                "All tech stacks deleted successfully.",
            ))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_codes_trims_and_dedups() {
        let input = vec![
            " TS001 ".to_string(),
            "".to_string(),
            "TS002".to_string(),
            "TS001".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(clean_codes(&input), vec!["TS001", "TS002"]);
    }

    #[test]
    fn test_clean_codes_empty_when_all_blank() {
        let input = vec!["".to_string(), "   ".to_string()];
        assert!(clean_codes(&input).is_empty());
    }
}
