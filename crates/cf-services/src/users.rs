//! User service
//!
//! User CRUD with per-user tech stack links. User codes are generated
//! sortable ids so listings follow creation order without a timestamp
//! column.

use cf_core::ids::{new_id, new_sortable_id};
use cf_core::{PageRequest, PagedResult, ServiceResult};
use cf_db::{
    SqlRunner, TeamUserRepository, UserRepository, UserRow, UserStackRow,
    UserTechStackRepository, UserTechStackRow,
};

use crate::base::{is_blank, run_db};

/// Fields for a new user
#[derive(Debug, Clone, Default)]
pub struct CreateUser {
    pub user_name: String,
    pub github_account_name: Option<String>,
    pub nrc: Option<String>,
    pub mobile_no: Option<String>,
    pub tech_stack_codes: Vec<String>,
}

/// Fields applied to an existing user; the code is immutable
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub user_name: String,
    pub github_account_name: Option<String>,
    pub nrc: Option<String>,
    pub mobile_no: Option<String>,
    pub tech_stack_codes: Vec<String>,
}

/// A user with their tech stacks (joined catalog rows)
#[derive(Debug, Clone)]
pub struct UserWithStacks {
    pub user: UserRow,
    pub tech_stacks: Vec<UserStackRow>,
}

fn validate_create(request: &CreateUser) -> Option<String> {
    if is_blank(&request.user_name) {
        return Some("UserName is required.".to_string());
    }
    None
}

fn validate_update(user_id: &str, request: &UpdateUser) -> Option<String> {
    if is_blank(user_id) {
        return Some("UserId is required.".to_string());
    }
    if is_blank(&request.user_name) {
        return Some("UserName is required.".to_string());
    }
    None
}

/// User feature service
pub struct UserService {
    users: UserRepository,
    user_tech_stacks: UserTechStackRepository,
    team_users: TeamUserRepository,
}

impl UserService {
    pub fn new(sql: SqlRunner) -> Self {
        Self {
            users: UserRepository::new(sql.clone()),
            user_tech_stacks: UserTechStackRepository::new(sql.clone()),
            team_users: TeamUserRepository::new(sql),
        }
    }

    pub async fn create(&self, request: CreateUser) -> ServiceResult<UserWithStacks> {
        if let Some(message) = validate_create(&request) {
            return ServiceResult::validation_error(message);
        }
        run_db("Error creating user", async {
            let user = UserRow {
                user_id: new_id(),
                user_code: new_sortable_id(),
                user_name: request.user_name.clone(),
                github_account_name: request.github_account_name.clone(),
                nrc: request.nrc.clone(),
                mobile_no: request.mobile_no.clone(),
            };
            if self.users.insert(&user).await? == 0 {
                return Ok(ServiceResult::failure("Failed to create user."));
            }
            self.insert_stacks(&user.user_code, &request.tech_stack_codes)
                .await?;
            tracing::info!(user_code = %user.user_code, "user created");
            // Re-fetch so the response reflects exactly what was stored.
            let stored = self.users.get_by_id(&user.user_id).await?;
            let tech_stacks = self.user_tech_stacks.stacks_of(&stored.user_code).await?;
            Ok(ServiceResult::success(UserWithStacks {
                user: stored,
                tech_stacks,
            }))
        })
        .await
    }

    pub async fn get(&self, user_id: &str) -> ServiceResult<UserWithStacks> {
        if is_blank(user_id) {
            return ServiceResult::validation_error("UserId is required.");
        }
        run_db("Error retrieving user", async {
            let Some(user) = self.users.find_by_id(user_id).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "User with ID {user_id} not found."
                )));
            };
            let tech_stacks = self.user_tech_stacks.stacks_of(&user.user_code).await?;
            Ok(ServiceResult::success(UserWithStacks { user, tech_stacks }))
        })
        .await
    }

    pub async fn get_by_code(&self, user_code: &str) -> ServiceResult<UserWithStacks> {
        if is_blank(user_code) {
            return ServiceResult::validation_error("UserCode is required.");
        }
        run_db("Error retrieving user", async {
            let Some(user) = self.users.find_by_code(user_code).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "User with code {user_code} not found."
                )));
            };
            let tech_stacks = self.user_tech_stacks.stacks_of(&user.user_code).await?;
            Ok(ServiceResult::success(UserWithStacks { user, tech_stacks }))
        })
        .await
    }

    /// Paginated listing, each user hydrated with their tech stacks.
    pub async fn list(
        &self,
        page: &PageRequest,
        filter_value: Option<&str>,
    ) -> ServiceResult<PagedResult<UserWithStacks>> {
        run_db("Error retrieving users", async {
            let (rows, total) = self.users.list(page, filter_value).await?;
            let mut users = Vec::with_capacity(rows.len());
            for user in rows {
                let tech_stacks = self.user_tech_stacks.stacks_of(&user.user_code).await?;
                users.push(UserWithStacks { user, tech_stacks });
            }
            Ok(ServiceResult::success(PagedResult::new(users, total, page)))
        })
        .await
    }

    pub async fn update(&self, user_id: &str, request: UpdateUser) -> ServiceResult<UserWithStacks> {
        if let Some(message) = validate_update(user_id, &request) {
            return ServiceResult::validation_error(message);
        }
        run_db("Error updating user", async {
            let Some(existing) = self.users.find_by_id(user_id).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "User with ID {user_id} not found."
                )));
            };
            let row = UserRow {
                user_id: user_id.to_string(),
                user_code: existing.user_code.clone(),
                user_name: request.user_name.clone(),
                github_account_name: request.github_account_name.clone(),
                nrc: request.nrc.clone(),
                mobile_no: request.mobile_no.clone(),
            };
            self.users.update(&row).await?;
            // Full replace of the stack links.
            self.user_tech_stacks
                .delete_by_user(&existing.user_code)
                .await?;
            self.insert_stacks(&existing.user_code, &request.tech_stack_codes)
                .await?;

            let stored = self.users.get_by_id(user_id).await?;
            let tech_stacks = self.user_tech_stacks.stacks_of(&stored.user_code).await?;
            Ok(ServiceResult::success(UserWithStacks {
                user: stored,
                tech_stacks,
            }))
        })
        .await
    }

    /// Deletes the user and every association row keyed by their code.
    pub async fn delete(&self, user_id: &str) -> ServiceResult<()> {
        if is_blank(user_id) {
            return ServiceResult::validation_error("UserId is required.");
        }
        run_db("Error deleting user", async {
            let Some(user) = self.users.find_by_id(user_id).await? else {
                return Ok(ServiceResult::not_found(format!(
                    "User with ID {user_id} not found."
                )));
            };
            self.user_tech_stacks.delete_by_user(&user.user_code).await?;
            self.team_users.delete_by_user(&user.user_code).await?;
            if self.users.delete(user_id).await? > 0 {
                tracing::info!(user_code = %user.user_code, "user deleted");
                Ok(ServiceResult::success_with_message(
                    (),
                    "User deleted successfully.",
                ))
            } else {
                Ok(ServiceResult::not_found(format!(
                    "User with ID {user_id} not found or already deleted."
                )))
            }
        })
        .await
    }

    /// Creates users one by one; the first failure aborts the batch and is
    /// reported with the failing user's name.
    pub async fn create_many(&self, requests: Vec<CreateUser>) -> ServiceResult<()> {
        if requests.is_empty() {
            return ServiceResult::validation_error("No users provided to add.");
        }
        let count = requests.len();
        for request in requests {
            let user_name = request.user_name.clone();
            let result = self.create(request).await;
            if result.is_failure() {
                return ServiceResult::failure(format!(
                    "Failed to add user {}: {}",
                    user_name,
                    result.message().unwrap_or_default()
                ));
            }
        }
        ServiceResult::success_with_message((), format!("{count} users added successfully."))
    }

    /// Name substring (case-insensitive) or exact code match.
    pub async fn search(&self, term: &str) -> ServiceResult<Vec<UserRow>> {
        run_db("Error searching users", async {
            let users = self.users.search(term).await?;
            Ok(ServiceResult::success(users))
        })
        .await
    }

    async fn insert_stacks(
        &self,
        user_code: &str,
        tech_stack_codes: &[String],
    ) -> cf_db::DbResult<()> {
        for code in tech_stack_codes {
            self.user_tech_stacks
                .insert(&UserTechStackRow {
                    user_tech_stack_id: new_id(),
                    user_code: user_code.to_string(),
                    tech_stack_code: code.clone(),
                    proficiency_level: None,
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
    fn test_validate_create_requires_name() {
        assert_eq!(
            validate_create(&CreateUser::default()),
            Some("UserName is required.".to_string())
        );
        let request = CreateUser {
            user_name: "Aye Chan".to_string(),
            ..Default::default()
        };
        assert_eq!(validate_create(&request), None);
    }

    #[test]
    fn test_validate_update_requires_id_then_name() {
        let request = UpdateUser {
            user_name: "Aye Chan".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_update("", &request),
            Some("UserId is required.".to_string())
        );
        assert_eq!(
            validate_update("id", &UpdateUser::default()),
            Some("UserName is required.".to_string())
        );
        assert_eq!(validate_update("id", &request), None);
    }
}
