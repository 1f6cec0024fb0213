//! Team membership repository
//!
//! Database operations for `Tbl_TeamUser` and its joined member views.

use sqlx::FromRow;

use cf_core::PageRequest;

use crate::error::DbResult;
use crate::gateway::{SqlRunner, SqlValue};
use crate::users::UserRow;

/// Team membership link
#[derive(Debug, Clone, FromRow)]
pub struct TeamUserRow {
    pub team_user_id: String,
    pub team_code: String,
    pub user_code: String,
    pub user_rating: Option<f64>,
}

/// Membership joined with the member's user record
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberRow {
    pub team_user_id: String,
    pub team_code: String,
    pub user_code: String,
    pub user_rating: Option<f64>,
    pub user_name: String,
    pub github_account_name: Option<String>,
    pub nrc: Option<String>,
}

/// Membership joined with team and user names (paginated listing)
#[derive(Debug, Clone, FromRow)]
pub struct TeamUserListRow {
    pub team_user_id: String,
    pub team_code: String,
    pub user_code: String,
    pub user_rating: Option<f64>,
    pub team_name: String,
    pub user_name: String,
}

/// Team membership repository implementation
pub struct TeamUserRepository {
    sql: SqlRunner,
}

impl TeamUserRepository {
    pub fn new(sql: SqlRunner) -> Self {
        Self { sql }
    }

    pub async fn insert(&self, row: &TeamUserRow) -> DbResult<u64> {
        self.sql
            .execute(
                r#"
                INSERT INTO Tbl_TeamUser (team_user_id, team_code, user_code, user_rating)
                VALUES ($1, $2, $3, $4)
                "#,
                &[
                    SqlValue::text(&row.team_user_id),
                    SqlValue::text(&row.team_code),
                    SqlValue::text(&row.user_code),
                    SqlValue::opt_float(row.user_rating),
                ],
            )
            .await
    }

    pub async fn find_pair(
        &self,
        team_code: &str,
        user_code: &str,
    ) -> DbResult<Option<TeamUserRow>> {
        self.sql
            .query_optional(
                r#"
                SELECT team_user_id, team_code, user_code, user_rating
                FROM Tbl_TeamUser
                WHERE team_code = $1 AND user_code = $2
                "#,
                &[SqlValue::text(team_code), SqlValue::text(user_code)],
            )
            .await
    }

    /// Members of a team with their user details
    pub async fn members_of(&self, team_code: &str) -> DbResult<Vec<TeamMemberRow>> {
        self.sql
            .query_many(
                r#"
                SELECT tu.team_user_id, tu.team_code, tu.user_code, tu.user_rating,
                       u.user_name, u.github_account_name, u.nrc
                FROM Tbl_TeamUser tu
                INNER JOIN Tbl_User u ON tu.user_code = u.user_code
                WHERE tu.team_code = $1
                ORDER BY u.user_name
                "#,
                &[SqlValue::text(team_code)],
            )
            .await
    }

    /// User records of a team's members
    pub async fn users_of(&self, team_code: &str) -> DbResult<Vec<UserRow>> {
        self.sql
            .query_many(
                r#"
                SELECT u.user_id, u.user_code, u.user_name, u.github_account_name, u.nrc, u.mobile_no
                FROM Tbl_User u
                INNER JOIN Tbl_TeamUser tu ON u.user_code = tu.user_code
                WHERE tu.team_code = $1
                ORDER BY u.user_name
                "#,
                &[SqlValue::text(team_code)],
            )
            .await
    }

    /// Paginated joined listing, optionally filtered over team name, user
    /// name, and the two codes
    pub async fn list(
        &self,
        page: &PageRequest,
        filter_value: Option<&str>,
    ) -> DbResult<(Vec<TeamUserListRow>, i64)> {
        let select_sql = r#"
            SELECT tu.team_user_id, tu.team_code, tu.user_code, tu.user_rating,
                   t.team_name, u.user_name
            FROM Tbl_TeamUser tu
            INNER JOIN Tbl_Team t ON tu.team_code = t.team_code
            INNER JOIN Tbl_User u ON tu.user_code = u.user_code"#;
        let count_sql = r#"
            SELECT COUNT(*)
            FROM Tbl_TeamUser tu
            INNER JOIN Tbl_Team t ON tu.team_code = t.team_code
            INNER JOIN Tbl_User u ON tu.user_code = u.user_code"#;

        let mut builder = crate::query::ListQueryBuilder::new(
            select_sql,
            count_sql,
            "t.team_name ASC, u.user_name ASC",
        );

        if let Some(value) = filter_value {
            if !value.trim().is_empty() {
                builder = builder.filter_contains(
                    &["t.team_name", "u.user_name", "tu.team_code", "tu.user_code"],
                    value,
                );
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

    pub async fn delete(&self, team_user_id: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_TeamUser WHERE team_user_id = $1",
                &[SqlValue::text(team_user_id)],
            )
            .await
    }

    pub async fn delete_pair(&self, team_code: &str, user_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_TeamUser WHERE team_code = $1 AND user_code = $2",
                &[SqlValue::text(team_code), SqlValue::text(user_code)],
            )
            .await
    }

    pub async fn delete_by_team(&self, team_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_TeamUser WHERE team_code = $1",
                &[SqlValue::text(team_code)],
            )
            .await
    }

    pub async fn delete_by_user(&self, user_code: &str) -> DbResult<u64> {
        self.sql
            .execute(
                "DELETE FROM Tbl_TeamUser WHERE user_code = $1",
                &[SqlValue::text(user_code)],
            )
            .await
    }
}
