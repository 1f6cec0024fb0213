//! Team repository
//!
//! Database operations for `Tbl_Team`.

use sqlx::FromRow;

use cf_core::PageRequest;

use crate::error::DbResult;
use crate::gateway::{SqlRunner, SqlValue};
use crate::query::{escape_like, ListQueryBuilder};

/// Team database entity
#[derive(Debug, Clone, FromRow)]
pub struct TeamRow {
    pub team_id: String,
    pub team_code: String,
    pub team_name: String,
}

/// Team repository implementation
pub struct TeamRepository {
    sql: SqlRunner,
}

impl TeamRepository {
    pub fn new(sql: SqlRunner) -> Self {
        Self { sql }
    }

    pub async fn insert(&self, row: &TeamRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                INSERT INTO Tbl_Team (team_id, team_code, team_name)
                VALUES ($1, $2, $3)
                "#,
                &[
                    SqlValue::text(&row.team_id),
                    SqlValue::text(&row.team_code),
                    SqlValue::text(&row.team_name),
                ],
            )
            .await
    }

    /// Only the name changes; the team code is immutable
    pub async fn update_name(&self, team_id: &str, team_name: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "UPDATE Tbl_Team SET team_name = $1 WHERE team_id = $2",
                &[SqlValue::text(team_name), SqlValue::text(team_id)],
            )
            .await
    }

    pub async fn delete(&self, team_id: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_Team WHERE team_id = $1",
                &[SqlValue::text(team_id)],
            )
            .await
    }

    pub async fn find_by_id(&self, team_id: &str) -> DbResult<Option<TeamRow>> {
        self.sql
            .query_optional(
                "SELECT team_id, team_code, team_name FROM Tbl_Team WHERE team_id = $1",
                &[SqlValue::text(team_id)],
            )
            .await
    }

    pub async fn find_by_code(&self, team_code: &str) -> DbResult<Option<TeamRow>> {
        self.sql
            .query_optional(
                "SELECT team_id, team_code, team_name FROM Tbl_Team WHERE team_code = $1",
                &[SqlValue::text(team_code)],
            )
            .await
    }

    pub async fn code_exists(&self, team_code: &str) -> DbResult<bool> {
        self.sql
            .query_scalar(
                "SELECT EXISTS(SELECT 1 FROM Tbl_Team WHERE team_code = $1)",
                &[SqlValue::text(team_code)],
            )
            .await
    }

    /// Paginated listing, optionally filtered over code and name
    pub async fn list(
        &self,
        page: &PageRequest,
        filter_value: Option<&str>,
    ) -> DbResult<(Vec<TeamRow>, i64)> {
        let mut builder = ListQueryBuilder::new(
            "SELECT team_id, team_code, team_name FROM Tbl_Team",
            "SELECT COUNT(*) FROM Tbl_Team",
            "team_name ASC",
        );

        if let Some(value) = filter_value {
            if !value.trim().is_empty() {
                builder = builder.filter_contains(&["team_code", "team_name"], value);
            }
        }

        let query = builder.build(page);
        let items = self
            .sql
            .query_many(&query.items_sql, &query.items_params)
            .await?;
        let total = self
            .sql
            .query_scalar(&query.count_sql, &query.count_params)
            .await?;

        Ok((items, total))
    }

    pub async fn all(&self) -> DbResult<Vec<TeamRow>> {
        self.sql
            .query_many(
                "SELECT team_id, team_code, team_name FROM Tbl_Team ORDER BY team_code",
                &[],
            )
            .await
    }

    /// Case-insensitive substring search over code and name
    pub async fn search(&self, keyword: &str) -> DbResult<Vec<TeamRow>> {
        let pattern = format!("%{}%", escape_like(keyword));
        self.sql
            .query_many(
                r#"
                SELECT team_id, team_code, team_name
                FROM Tbl_Team
                WHERE team_code ILIKE $1 OR team_name ILIKE $1
                ORDER BY team_code
                "#,
                &[SqlValue::text(pattern)],
            )
            .await
    }

    pub async fn count(&self) -> DbResult<i64> {
        self.sql
            .query_scalar("SELECT COUNT(*) FROM Tbl_Team", &[])
            .await
    }
}
