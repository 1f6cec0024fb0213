//! Tech stack repository
//!
//! Database operations for `Tbl_TechStack`.

use sqlx::FromRow;

use cf_core::PageRequest;

use crate::error::DbResult;
use crate::gateway::{SqlRunner, SqlValue};
use crate::query::{escape_like, ListQueryBuilder};

/// Tech stack database entity
#[derive(Debug, Clone, FromRow)]
pub struct TechStackRow {
    pub tech_stack_id: String,
    pub tech_stack_code: String,
    pub tech_stack_short_code: Option<String>,
    pub tech_stack_name: String,
}

/// Tech stack repository implementation
pub struct TechStackRepository {
    sql: SqlRunner,
}

impl TechStackRepository {
    pub fn new(sql: SqlRunner) -> Self {
        Self { sql }
    }

    pub async fn insert(&self, row: &TechStackRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                INSERT INTO Tbl_TechStack (tech_stack_id, tech_stack_code, tech_stack_short_code, tech_stack_name)
                VALUES ($1, $2, $3, $4)
                "#,
                &[
                    SqlValue::text(&row.tech_stack_id),
                    SqlValue::text(&row.tech_stack_code),
                    SqlValue::opt_text(row.tech_stack_short_code.clone()),
                    SqlValue::text(&row.tech_stack_name),
                ],
            )
            .await
    }

    pub async fn update(&self, row: &TechStackRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                UPDATE Tbl_TechStack
                SET tech_stack_name = $1,
                    tech_stack_code = $2,
                    tech_stack_short_code = $3
                WHERE tech_stack_id = $4
                "#,
                &[
                    SqlValue::text(&row.tech_stack_name),
                    SqlValue::text(&row.tech_stack_code),
                    SqlValue::opt_text(row.tech_stack_short_code.clone()),
                    SqlValue::text(&row.tech_stack_id),
                ],
            )
            .await
    }

    pub async fn delete(&self, tech_stack_id: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_TechStack WHERE tech_stack_id = $1",
                &[SqlValue::text(tech_stack_id)],
            )
            .await
    }

    pub async fn find_by_id(&self, tech_stack_id: &str) -> DbResult<Option<TechStackRow>> {
        self.sql
            .query_optional(
                r#"
                SELECT tech_stack_id, tech_stack_code, tech_stack_short_code, tech_stack_name
                FROM Tbl_TechStack
                WHERE tech_stack_id = $1
                "#,
                &[SqlValue::text(tech_stack_id)],
            )
            .await
    }

    pub async fn find_by_code(&self, tech_stack_code: &str) -> DbResult<Option<TechStackRow>> {
        self.sql
            .query_optional(
                r#"
                SELECT tech_stack_id, tech_stack_code, tech_stack_short_code, tech_stack_name
                FROM Tbl_TechStack
                WHERE tech_stack_code = $1
                "#,
                &[SqlValue::text(tech_stack_code)],
            )
            .await
    }

    pub async fn code_exists(&self, tech_stack_code: &str) -> DbResult<bool> {
        self.sql
            .query_scalar(
                "SELECT EXISTS(SELECT 1 FROM Tbl_TechStack WHERE tech_stack_code = $1)",
                &[SqlValue::text(tech_stack_code)],
            )
            .await
    }

    /// Paginated listing, optionally filtered over code and name
    pub async fn list(
        &self,
        page: &PageRequest,
        filter_value: Option<&str>,
    ) -> DbResult<(Vec<TechStackRow>, i64)> {
        let mut builder = ListQueryBuilder::new(
            "SELECT tech_stack_id, tech_stack_code, tech_stack_short_code, tech_stack_name \
             FROM Tbl_TechStack",
            "SELECT COUNT(*) FROM Tbl_TechStack",
            "tech_stack_name ASC",
        );

        if let Some(value) = filter_value {
            if !value.trim().is_empty() {
                builder = builder.filter_contains(&["tech_stack_code", "tech_stack_name"], value);
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

    pub async fn all(&self) -> DbResult<Vec<TechStackRow>> {
        self.sql
            .query_many(
                r#"
                SELECT tech_stack_id, tech_stack_code, tech_stack_short_code, tech_stack_name
                FROM Tbl_TechStack
                ORDER BY tech_stack_name
                "#,
                &[],
            )
            .await
    }

    /// Name substring (case-insensitive) or exact stack code
    pub async fn search(&self, term: &str) -> DbResult<Vec<TechStackRow>> {
        let pattern = format!("%{}%", escape_like(term));
        self.sql
            .query_many(
                r#"
                SELECT tech_stack_id, tech_stack_code, tech_stack_short_code, tech_stack_name
                FROM Tbl_TechStack
                WHERE tech_stack_name ILIKE $1 OR tech_stack_code = $2
                ORDER BY tech_stack_name
                "#,
                &[SqlValue::text(pattern), SqlValue::text(term)],
            )
            .await
    }
}
