//! Project tech stack repository
//!
//! Database operations for `Tbl_ProjectTechStack`, linking projects to the
//! technologies they are built with.

use sqlx::FromRow;

use cf_core::PageRequest;

use crate::error::DbResult;
use crate::gateway::{SqlRunner, SqlValue};

/// Project-to-tech-stack link
#[derive(Debug, Clone, FromRow)]
pub struct ProjectTechStackRow {
    pub project_tech_stack_id: String,
    pub project_code: String,
    pub tech_stack_code: String,
}

/// Project tech stack repository implementation
pub struct ProjectTechStackRepository {
    sql: SqlRunner,
}

impl ProjectTechStackRepository {
    pub fn new(sql: SqlRunner) -> Self {
        Self { sql }
    }

    pub async fn insert(&self, row: &ProjectTechStackRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                INSERT INTO Tbl_ProjectTechStack (project_tech_stack_id, project_code, tech_stack_code)
                VALUES ($1, $2, $3)
                "#,
                &[
                    SqlValue::text(&row.project_tech_stack_id),
                    SqlValue::text(&row.project_code),
                    SqlValue::text(&row.tech_stack_code),
                ],
            )
            .await
    }

    /// All tech stack codes assigned to a project
    pub async fn codes_of(&self, project_code: &str) -> DbResult<Vec<String>> {
        let rows: Vec<(String,)> = self
            .sql
            .query_many(
                r#"
                SELECT tech_stack_code
                FROM Tbl_ProjectTechStack
                WHERE project_code = $1
                ORDER BY tech_stack_code
                "#,
                &[SqlValue::text(project_code)],
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    /// One page of a project's tech stack codes with the total count
    pub async fn codes_paged(
        &self,
        project_code: &str,
        page: &PageRequest,
    ) -> DbResult<(Vec<String>, i64)> {
        let rows: Vec<(String,)> = self
            .sql
            .query_many(
                r#"
                SELECT tech_stack_code
                FROM Tbl_ProjectTechStack
                WHERE project_code = $1
                ORDER BY tech_stack_code
                LIMIT $2 OFFSET $3
                "#,
                &[
                    SqlValue::text(project_code),
                    SqlValue::int(page.limit()),
                    SqlValue::int(page.offset()),
                ],
            )
            .await?;
        let total = self
            .sql
            .query_scalar(
                "SELECT COUNT(*) FROM Tbl_ProjectTechStack WHERE project_code = $1",
                &[SqlValue::text(project_code)],
            )
            .await?;
        Ok((rows.into_iter().map(|row| row.0).collect(), total))
    }

    /// Replace one tech stack code with another on a project
    pub async fn reassign(
        &self,
        project_code: &str,
        old_code: &str,
        new_code: &str,
    ) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                UPDATE Tbl_ProjectTechStack
                SET tech_stack_code = $1
                WHERE project_code = $2 AND tech_stack_code = $3
                "#,
                &[
                    SqlValue::text(new_code),
                    SqlValue::text(project_code),
                    SqlValue::text(old_code),
                ],
            )
            .await
    }

    pub async fn delete_by_project(&self, project_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_ProjectTechStack WHERE project_code = $1",
                &[SqlValue::text(project_code)],
            )
            .await
    }

    pub async fn delete_pair(&self, project_code: &str, tech_stack_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_ProjectTechStack WHERE project_code = $1 AND tech_stack_code = $2",
                &[SqlValue::text(project_code), SqlValue::text(tech_stack_code)],
            )
            .await
    }

    pub async fn delete_by_stack(&self, tech_stack_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_ProjectTechStack WHERE tech_stack_code = $1",
                &[SqlValue::text(tech_stack_code)],
            )
            .await
    }
}
