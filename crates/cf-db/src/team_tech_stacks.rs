//! Team tech stack repository
//!
//! Database operations for `Tbl_TeamTechStack`, linking teams to the
//! technologies they cover.

use sqlx::FromRow;

use crate::error::DbResult;
use crate::gateway::{SqlRunner, SqlValue};

/// Team-to-tech-stack link
#[derive(Debug, Clone, FromRow)]
pub struct TeamTechStackRow {
    pub team_tech_stack_id: String,
    pub team_code: String,
    pub tech_stack_code: String,
}

/// Team tech stack repository implementation
pub struct TeamTechStackRepository {
    sql: SqlRunner,
}

impl TeamTechStackRepository {
    pub fn new(sql: SqlRunner) -> Self {
        Self { sql }
    }

    pub async fn insert(&self, row: &TeamTechStackRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                INSERT INTO Tbl_TeamTechStack (team_tech_stack_id, team_code, tech_stack_code)
                VALUES ($1, $2, $3)
                "#,
                &[
                    SqlValue::text(&row.team_tech_stack_id),
                    SqlValue::text(&row.team_code),
                    SqlValue::text(&row.tech_stack_code),
                ],
            )
            .await
    }

    pub async fn exists_pair(&self, team_code: &str, tech_stack_code: &str) -> DbResult<bool> {
        self.sql
            .query_scalar(
                "SELECT EXISTS(SELECT 1 FROM Tbl_TeamTechStack WHERE team_code = $1 AND tech_stack_code = $2)",
                &[SqlValue::text(team_code), SqlValue::text(tech_stack_code)],
            )
            .await
    }

    /// All tech stack codes assigned to a team
    pub async fn codes_of(&self, team_code: &str) -> DbResult<Vec<String>> {
        let rows: Vec<(String,)> = self
            .sql
            .query_many(
                r#"
                SELECT tech_stack_code
                FROM Tbl_TeamTechStack
                WHERE team_code = $1
                ORDER BY tech_stack_code
                "#,
                &[SqlValue::text(team_code)],
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    pub async fn delete_by_team(&self, team_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_TeamTechStack WHERE team_code = $1",
                &[SqlValue::text(team_code)],
            )
            .await
    }

    pub async fn delete_by_stack(&self, tech_stack_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_TeamTechStack WHERE tech_stack_code = $1",
                &[SqlValue::text(tech_stack_code)],
            )
            .await
    }
}
