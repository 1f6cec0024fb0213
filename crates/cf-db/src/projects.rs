//! Project repository
//!
//! Database operations for `Tbl_Project`.

use chrono::NaiveDate;
use sqlx::FromRow;

use cf_core::{PageRequest, SortDirection};

use crate::error::DbResult;
use crate::gateway::{SqlRunner, SqlValue};
use crate::query::{escape_like, normalize_column_key, ListQueryBuilder};

/// Project database entity
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub project_id: String,
    pub project_code: String,
    pub project_name: String,
    pub repo_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_description: Option<String>,
    pub status: String,
}

/// Digest of a project nearing its end date (dashboard)
#[derive(Debug, Clone, FromRow)]
pub struct EndingProjectRow {
    pub project_id: String,
    pub project_code: String,
    pub project_name: String,
    pub end_date: Option<NaiveDate>,
    pub status: String,
}

/// Fields applied by `update`; a `None` status keeps the stored value
#[derive(Debug, Clone)]
pub struct ProjectUpdate {
    pub project_id: String,
    pub project_code: String,
    pub project_name: String,
    pub repo_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_description: Option<String>,
    pub status: Option<String>,
}

/// Map a caller-facing filter key to a column (allow-list)
pub fn filter_column(key: &str) -> Option<&'static str> {
    match normalize_column_key(key).as_str() {
        "projectname" => Some("project_name"),
        "projectcode" => Some("project_code"),
        "status" => Some("status"),
        _ => None,
    }
}

/// Map a caller-facing sort key to a column (allow-list)
pub fn sort_column(key: &str) -> Option<&'static str> {
    match normalize_column_key(key).as_str() {
        "projectcode" => Some("project_code"),
        "projectname" => Some("project_name"),
        "status" => Some("status"),
        "startdate" => Some("start_date"),
        "enddate" => Some("end_date"),
        _ => None,
    }
}

/// Project repository implementation
pub struct ProjectRepository {
    sql: SqlRunner,
}

impl ProjectRepository {
    pub fn new(sql: SqlRunner) -> Self {
        Self { sql }
    }

    pub async fn insert(&self, row: &ProjectRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                INSERT INTO Tbl_Project (project_id, project_code, project_name, repo_url,
                                         start_date, end_date, project_description, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
                &[
                    SqlValue::text(&row.project_id),
                    SqlValue::text(&row.project_code),
                    SqlValue::text(&row.project_name),
                    SqlValue::opt_text(row.repo_url.clone()),
                    SqlValue::opt_date(row.start_date),
                    SqlValue::opt_date(row.end_date),
                    SqlValue::opt_text(row.project_description.clone()),
                    SqlValue::text(&row.status),
                ],
            )
            .await
    }

    pub async fn update(&self, update: &ProjectUpdate) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                UPDATE Tbl_Project SET
                    project_code = $1,
                    project_name = $2,
                    repo_url = $3,
                    start_date = $4,
                    end_date = $5,
                    project_description = $6,
                    status = COALESCE($7, status)
                WHERE project_id = $8
                "#,
                &[
                    SqlValue::text(&update.project_code),
                    SqlValue::text(&update.project_name),
                    SqlValue::opt_text(update.repo_url.clone()),
                    SqlValue::opt_date(update.start_date),
                    SqlValue::opt_date(update.end_date),
                    SqlValue::opt_text(update.project_description.clone()),
                    SqlValue::opt_text(update.status.clone()),
                    SqlValue::text(&update.project_id),
                ],
            )
            .await
    }

    pub async fn delete(&self, project_id: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_Project WHERE project_id = $1",
                &[SqlValue::text(project_id)],
            )
            .await
    }

    pub async fn find_by_id(&self, project_id: &str) -> DbResult<Option<ProjectRow>> {
        self.sql
            .query_optional(
                r#"
                SELECT project_id, project_code, project_name, repo_url,
                       start_date, end_date, project_description, status
                FROM Tbl_Project
                WHERE project_id = $1
                "#,
                &[SqlValue::text(project_id)],
            )
            .await
    }

    pub async fn code_exists(&self, project_code: &str) -> DbResult<bool> {
        self.sql
            .query_scalar(
                "SELECT EXISTS(SELECT 1 FROM Tbl_Project WHERE project_code = $1)",
                &[SqlValue::text(project_code)],
            )
            .await
    }

    /// Paginated listing; filter and sort keys go through the allow-lists,
    /// unknown keys fall back to an unfiltered query / the default order
    pub async fn list(
        &self,
        page: &PageRequest,
        filter_key: Option<&str>,
        filter_value: Option<&str>,
        sort_key: Option<&str>,
        direction: SortDirection,
    ) -> DbResult<(Vec<ProjectRow>, i64)> {
        let mut builder = ListQueryBuilder::new(
            "SELECT project_id, project_code, project_name, repo_url, \
             start_date, end_date, project_description, status FROM Tbl_Project",
            "SELECT COUNT(*) FROM Tbl_Project",
            "project_name ASC",
        );

        if let (Some(key), Some(value)) = (filter_key, filter_value) {
            if !value.trim().is_empty() {
                if let Some(column) = filter_column(key) {
                    builder = builder.filter_contains(&[column], value);
                }
            }
        }
        if let Some(column) = sort_key.and_then(sort_column) {
            builder = builder.order_by(column, direction);
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

    /// Case-insensitive substring search over code and name
    pub async fn search(&self, keyword: &str) -> DbResult<Vec<ProjectRow>> {
        let pattern = format!("%{}%", escape_like(keyword));
        self.sql
            .query_many(
                r#"
                SELECT project_id, project_code, project_name, repo_url,
                       start_date, end_date, project_description, status
                FROM Tbl_Project
                WHERE project_code ILIKE $1 OR project_name ILIKE $1
                ORDER BY project_name
                "#,
                &[SqlValue::text(pattern)],
            )
            .await
    }

    pub async fn count(&self) -> DbResult<i64> {
        self.sql
            .query_scalar("SELECT COUNT(*) FROM Tbl_Project", &[])
            .await
    }

    pub async fn count_by_status(&self, status: &str) -> DbResult<i64> {
        self.sql
            .query_scalar(
                "SELECT COUNT(*) FROM Tbl_Project WHERE status = $1",
                &[SqlValue::text(status)],
            )
            .await
    }

    /// Projects whose end date falls on or before the cutoff
    pub async fn ending_by(&self, cutoff: NaiveDate) -> DbResult<Vec<EndingProjectRow>> {
        self.sql
            .query_many(
                r#"
                SELECT project_id, project_code, project_name, end_date, status
                FROM Tbl_Project
                WHERE end_date <= $1
                ORDER BY end_date
                "#,
                &[SqlValue::date(cutoff)],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_column_allow_list() {
        assert_eq!(filter_column("project_name"), Some("project_name"));
        assert_eq!(filter_column("ProjectName"), Some("project_name"));
        assert_eq!(filter_column("status"), Some("status"));
        assert_eq!(filter_column("project_id"), None);
        assert_eq!(filter_column("1; DROP TABLE Tbl_Project"), None);
    }

    #[test]
    fn test_sort_column_allow_list() {
        assert_eq!(sort_column("end_date"), Some("end_date"));
        assert_eq!(sort_column("EndDate"), Some("end_date"));
        assert_eq!(sort_column("repo_url"), None);
    }
}
