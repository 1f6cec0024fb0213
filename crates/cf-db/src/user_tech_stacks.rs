//! User tech stack repository
//!
//! Database operations for `Tbl_UserTechStack`, linking users to the
//! technologies they work with.

use sqlx::FromRow;

use crate::error::DbResult;
use crate::gateway::{SqlRunner, SqlValue};

/// User-to-tech-stack link
#[derive(Debug, Clone, FromRow)]
pub struct UserTechStackRow {
    pub user_tech_stack_id: String,
    pub user_code: String,
    pub tech_stack_code: String,
    pub proficiency_level: Option<String>,
}

/// A user's tech stack joined with the catalog entry
#[derive(Debug, Clone, FromRow)]
pub struct UserStackRow {
    pub tech_stack_id: String,
    pub tech_stack_code: String,
    pub tech_stack_name: String,
    pub tech_stack_short_code: Option<String>,
    pub proficiency_level: Option<String>,
}

/// User tech stack repository implementation
pub struct UserTechStackRepository {
    sql: SqlRunner,
}

impl UserTechStackRepository {
    pub fn new(sql: SqlRunner) -> Self {
        Self { sql }
    }

    pub async fn insert(&self, row: &UserTechStackRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                INSERT INTO Tbl_UserTechStack (user_tech_stack_id, user_code, tech_stack_code, proficiency_level)
                VALUES ($1, $2, $3, $4)
                "#,
                &[
                    SqlValue::text(&row.user_tech_stack_id),
                    SqlValue::text(&row.user_code),
                    SqlValue::text(&row.tech_stack_code),
                    SqlValue::opt_text(row.proficiency_level.as_deref()),
                ],
            )
            .await
    }

    /// Tech stacks assigned to a user, joined with catalog details
    pub async fn stacks_of(&self, user_code: &str) -> DbResult<Vec<UserStackRow>> {
        self.sql
            .query_many(
                r#"
                SELECT ts.tech_stack_id, uts.tech_stack_code, ts.tech_stack_name,
                       ts.tech_stack_short_code, uts.proficiency_level
                FROM Tbl_UserTechStack uts
                INNER JOIN Tbl_TechStack ts ON uts.tech_stack_code = ts.tech_stack_code
                WHERE uts.user_code = $1
                ORDER BY ts.tech_stack_name
                "#,
                &[SqlValue::text(user_code)],
            )
            .await
    }

    pub async fn delete_by_user(&self, user_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_UserTechStack WHERE user_code = $1",
                &[SqlValue::text(user_code)],
            )
            .await
    }

    pub async fn delete_by_stack(&self, tech_stack_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_UserTechStack WHERE tech_stack_code = $1",
                &[SqlValue::text(tech_stack_code)],
            )
            .await
    }
}
