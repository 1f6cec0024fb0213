//! Activity repository
//!
//! Database operations for `Tbl_ProjectTeamActivity`, the work log that
//! records what a team did on a project on a given date.

use chrono::NaiveDate;
use sqlx::FromRow;

use crate::error::DbResult;
use crate::gateway::{SqlRunner, SqlValue};

/// Activity log entry
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub project_team_activity_id: String,
    pub project_code: String,
    pub team_code: String,
    pub activity_date: NaiveDate,
    pub tasks: String,
}

/// Activity joined with project and team names
#[derive(Debug, Clone, FromRow)]
pub struct ActivityDetailRow {
    pub project_team_activity_id: String,
    pub project_code: String,
    pub team_code: String,
    pub activity_date: NaiveDate,
    pub tasks: String,
    pub project_name: String,
    pub team_name: String,
}

/// Activity repository implementation
pub struct ActivityRepository {
    sql: SqlRunner,
}

impl ActivityRepository {
    pub fn new(sql: SqlRunner) -> Self {
        Self { sql }
    }

    pub async fn insert(&self, row: &ActivityRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                INSERT INTO Tbl_ProjectTeamActivity (project_team_activity_id, project_code, team_code, activity_date, tasks)
                VALUES ($1, $2, $3, $4, $5)
                "#,
                &[
                    SqlValue::text(&row.project_team_activity_id),
                    SqlValue::text(&row.project_code),
                    SqlValue::text(&row.team_code),
                    SqlValue::date(row.activity_date),
                    SqlValue::text(&row.tasks),
                ],
            )
            .await
    }

    pub async fn update(&self, row: &ActivityRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                UPDATE Tbl_ProjectTeamActivity
                SET project_code = $1, team_code = $2, activity_date = $3, tasks = $4
                WHERE project_team_activity_id = $5
                "#,
                &[
                    SqlValue::text(&row.project_code),
                    SqlValue::text(&row.team_code),
                    SqlValue::date(row.activity_date),
                    SqlValue::text(&row.tasks),
                    SqlValue::text(&row.project_team_activity_id),
                ],
            )
            .await
    }

    pub async fn delete(&self, activity_id: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_ProjectTeamActivity WHERE project_team_activity_id = $1",
                &[SqlValue::text(activity_id)],
            )
            .await
    }

    /// Single activity joined with project and team names
    pub async fn find_detail(&self, activity_id: &str) -> DbResult<Option<ActivityDetailRow>> {
        self.sql
            .query_optional(
                r#"
                SELECT pta.project_team_activity_id, pta.project_code, pta.team_code,
                       pta.activity_date, pta.tasks, p.project_name, t.team_name
                FROM Tbl_ProjectTeamActivity pta
                INNER JOIN Tbl_Project p ON pta.project_code = p.project_code
                INNER JOIN Tbl_Team t ON pta.team_code = t.team_code
                WHERE pta.project_team_activity_id = $1
                "#,
                &[SqlValue::text(activity_id)],
            )
            .await
    }

    /// Activities joined with names, newest first, optionally narrowed to a
    /// project and/or team
    pub async fn list(
        &self,
        project_code: Option<&str>,
        team_code: Option<&str>,
    ) -> DbResult<Vec<ActivityDetailRow>> {
        let mut sql = String::from(
            r#"
            SELECT pta.project_team_activity_id, pta.project_code, pta.team_code,
                   pta.activity_date, pta.tasks, p.project_name, t.team_name
            FROM Tbl_ProjectTeamActivity pta
            INNER JOIN Tbl_Project p ON pta.project_code = p.project_code
            INNER JOIN Tbl_Team t ON pta.team_code = t.team_code"#,
        );
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(code) = project_code {
            params.push(SqlValue::text(code));
            conditions.push(format!("pta.project_code = ${}", params.len()));
        }
        if let Some(code) = team_code {
            params.push(SqlValue::text(code));
            conditions.push(format!("pta.team_code = ${}", params.len()));
        }
        if !conditions.is_empty() {
            sql.push_str("\n            WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str("\n            ORDER BY pta.activity_date DESC");

        self.sql.query_many(&sql, &params).await
    }

    /// Most recent activities, without the name join
    pub async fn latest(&self, count: i64) -> DbResult<Vec<ActivityRow>> {
        self.sql
            .query_many(
                r#"
                SELECT project_team_activity_id, project_code, team_code, activity_date, tasks
                FROM Tbl_ProjectTeamActivity
                ORDER BY activity_date DESC
                LIMIT $1
                "#,
                &[SqlValue::int(count)],
            )
            .await
    }

    pub async fn delete_by_project(&self, project_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_ProjectTeamActivity WHERE project_code = $1",
                &[SqlValue::text(project_code)],
            )
            .await
    }

    pub async fn delete_by_team(&self, team_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_ProjectTeamActivity WHERE team_code = $1",
                &[SqlValue::text(team_code)],
            )
            .await
    }
}
