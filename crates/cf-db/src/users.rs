//! User repository
//!
//! Database operations for `Tbl_User`.

use sqlx::FromRow;

use cf_core::PageRequest;

use crate::error::DbResult;
use crate::gateway::{SqlRunner, SqlValue};
use crate::query::{escape_like, ListQueryBuilder};

/// User database entity
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: String,
    pub user_code: String,
    pub user_name: String,
    pub github_account_name: Option<String>,
    pub nrc: Option<String>,
    pub mobile_no: Option<String>,
}

/// User repository implementation
pub struct UserRepository {
    sql: SqlRunner,
}

impl UserRepository {
    pub fn new(sql: SqlRunner) -> Self {
        Self { sql }
    }

    pub async fn insert(&self, row: &UserRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                INSERT INTO Tbl_User (user_id, user_code, user_name, github_account_name, nrc, mobile_no)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
                &[
                    SqlValue::text(&row.user_id),
                    SqlValue::text(&row.user_code),
                    SqlValue::text(&row.user_name),
                    SqlValue::opt_text(row.github_account_name.clone()),
                    SqlValue::opt_text(row.nrc.clone()),
                    SqlValue::opt_text(row.mobile_no.clone()),
                ],
            )
            .await
    }

    /// Updates the descriptive fields; the user code is immutable
    pub async fn update(&self, row: &UserRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                UPDATE Tbl_User
                SET user_name = $1,
                    github_account_name = $2,
                    nrc = $3,
                    mobile_no = $4
                WHERE user_id = $5
                "#,
                &[
                    SqlValue::text(&row.user_name),
                    SqlValue::opt_text(row.github_account_name.clone()),
                    SqlValue::opt_text(row.nrc.clone()),
                    SqlValue::opt_text(row.mobile_no.clone()),
                    SqlValue::text(&row.user_id),
                ],
            )
            .await
    }

    pub async fn delete(&self, user_id: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_User WHERE user_id = $1",
                &[SqlValue::text(user_id)],
            )
            .await
    }

    pub async fn find_by_id(&self, user_id: &str) -> DbResult<Option<UserRow>> {
        self.sql
            .query_optional(
                r#"
                SELECT user_id, user_code, user_name, github_account_name, nrc, mobile_no
                FROM Tbl_User
                WHERE user_id = $1
                "#,
                &[SqlValue::text(user_id)],
            )
            .await
    }

    /// Like `find_by_id`, but the row is required to exist (post-insert
    /// re-fetch)
    pub async fn get_by_id(&self, user_id: &str) -> DbResult<UserRow> {
        self.sql
            .query_one(
                r#"
                SELECT user_id, user_code, user_name, github_account_name, nrc, mobile_no
                FROM Tbl_User
                WHERE user_id = $1
                "#,
                &[SqlValue::text(user_id)],
            )
            .await
    }

    pub async fn find_by_code(&self, user_code: &str) -> DbResult<Option<UserRow>> {
        self.sql
            .query_optional(
                r#"
                SELECT user_id, user_code, user_name, github_account_name, nrc, mobile_no
                FROM Tbl_User
                WHERE user_code = $1
                "#,
                &[SqlValue::text(user_code)],
            )
            .await
    }

    pub async fn code_exists(&self, user_code: &str) -> DbResult<bool> {
        self.sql
            .query_scalar(
                "SELECT EXISTS(SELECT 1 FROM Tbl_User WHERE user_code = $1)",
                &[SqlValue::text(user_code)],
            )
            .await
    }

    /// Paginated listing, optionally filtered over name, code, and GitHub
    /// account
    pub async fn list(
        &self,
        page: &PageRequest,
        filter_value: Option<&str>,
    ) -> DbResult<(Vec<UserRow>, i64)> {
        let mut builder = ListQueryBuilder::new(
            "SELECT user_id, user_code, user_name, github_account_name, nrc, mobile_no \
             FROM Tbl_User",
            "SELECT COUNT(*) FROM Tbl_User",
            "user_name ASC",
        );

        if let Some(value) = filter_value {
            if !value.trim().is_empty() {
                builder = builder
                    .filter_contains(&["user_name", "user_code", "github_account_name"], value);
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

    /// Name substring (case-insensitive) or exact user code
    pub async fn search(&self, term: &str) -> DbResult<Vec<UserRow>> {
        let pattern = format!("%{}%", escape_like(term));
        self.sql
            .query_many(
                r#"
                SELECT user_id, user_code, user_name, github_account_name, nrc, mobile_no
                FROM Tbl_User
                WHERE user_name ILIKE $1 OR user_code = $2
                ORDER BY user_name
                "#,
                &[SqlValue::text(pattern), SqlValue::text(term)],
            )
            .await
    }

    pub async fn count(&self) -> DbResult<i64> {
        self.sql
            .query_scalar("SELECT COUNT(*) FROM Tbl_User", &[])
            .await
    }
}
