//! Project-team link repository
//!
//! Database operations for `Tbl_ProjectTeam`. The link is keyed by the two
//! business codes, not surrogate foreign keys.

use sqlx::FromRow;

use crate::error::DbResult;
use crate::gateway::{SqlRunner, SqlValue};
use crate::teams::TeamRow;

/// Project-team assignment
#[derive(Debug, Clone, FromRow)]
pub struct ProjectTeamRow {
    pub project_team_id: String,
    pub project_code: String,
    pub team_code: String,
    pub project_team_rating: Option<f64>,
    pub duration: Option<i64>,
}

/// Project-team link repository implementation
pub struct ProjectTeamRepository {
    sql: SqlRunner,
}

impl ProjectTeamRepository {
    pub fn new(sql: SqlRunner) -> Self {
        Self { sql }
    }

    pub async fn insert(&self, row: &ProjectTeamRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                INSERT INTO Tbl_ProjectTeam (project_team_id, project_code, team_code, project_team_rating, duration)
                VALUES ($1, $2, $3, $4, $5)
                "#,
                &[
                    SqlValue::text(&row.project_team_id),
                    SqlValue::text(&row.project_code),
                    SqlValue::text(&row.team_code),
                    SqlValue::opt_float(row.project_team_rating),
                    SqlValue::opt_int(row.duration),
                ],
            )
            .await
    }

    /// Link rows for a project
    pub async fn links_of(&self, project_code: &str) -> DbResult<Vec<ProjectTeamRow>> {
        self.sql
            .query_many(
                r#"
                SELECT project_team_id, project_code, team_code, project_team_rating, duration
                FROM Tbl_ProjectTeam
                WHERE project_code = $1
                "#,
                &[SqlValue::text(project_code)],
            )
            .await
    }

    /// Teams assigned to a project, joined through the link table
    pub async fn teams_of(&self, project_code: &str) -> DbResult<Vec<TeamRow>> {
        self.sql
            .query_many(
                r#"
                SELECT t.team_id, t.team_code, t.team_name
                FROM Tbl_Team t
                INNER JOIN Tbl_ProjectTeam pt ON t.team_code = pt.team_code
                WHERE pt.project_code = $1
                ORDER BY t.team_name
                "#,
                &[SqlValue::text(project_code)],
            )
            .await
    }

    pub async fn exists_pair(&self, project_code: &str, team_code: &str) -> DbResult<bool> {
        self.sql
            .query_scalar(
                r#"
                SELECT EXISTS(
                    SELECT 1 FROM Tbl_ProjectTeam
                    WHERE project_code = $1 AND team_code = $2
                )
                "#,
                &[SqlValue::text(project_code), SqlValue::text(team_code)],
            )
            .await
    }

    pub async fn delete_by_project(&self, project_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_ProjectTeam WHERE project_code = $1",
                &[SqlValue::text(project_code)],
            )
            .await
    }

    pub async fn delete_by_team(&self, team_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_ProjectTeam WHERE team_code = $1",
                &[SqlValue::text(team_code)],
            )
            .await
    }

    pub async fn delete_pair(&self, project_code: &str, team_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_ProjectTeam WHERE project_code = $1 AND team_code = $2",
                &[SqlValue::text(project_code), SqlValue::text(team_code)],
            )
            .await
    }
}
