//! SQL execution gateway
//!
//! Every statement in the crate runs through `SqlRunner`. Parameters are
//! positional `$1..$n` binds and are never interpolated into statement
//! text; each call logs the statement, a parameter snapshot, and the row
//! count before returning.

use chrono::NaiveDate;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{Arguments, FromRow, PgPool};

use crate::error::{DbError, DbResult};

/// A typed positional parameter
///
/// The inner `Option` carries SQL NULL with the right wire type, so a
/// missing date still binds as a date.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i64>),
    Float(Option<f64>),
    Bool(Option<bool>),
    Date(Option<NaiveDate>),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(Some(value.into()))
    }

    pub fn opt_text<S: Into<String>>(value: Option<S>) -> Self {
        SqlValue::Text(value.map(Into::into))
    }

    pub fn int(value: i64) -> Self {
        SqlValue::Int(Some(value))
    }

    pub fn opt_int(value: Option<i64>) -> Self {
        SqlValue::Int(value)
    }

    pub fn opt_float(value: Option<f64>) -> Self {
        SqlValue::Float(value)
    }

    pub fn date(value: NaiveDate) -> Self {
        SqlValue::Date(Some(value))
    }

    pub fn opt_date(value: Option<NaiveDate>) -> Self {
        SqlValue::Date(value)
    }
}

impl std::fmt::Display for SqlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlValue::Text(Some(s)) => write!(f, "'{}'", s),
            SqlValue::Int(Some(n)) => write!(f, "{}", n),
            SqlValue::Float(Some(x)) => write!(f, "{}", x),
            SqlValue::Bool(Some(b)) => write!(f, "{}", b),
            SqlValue::Date(Some(d)) => write!(f, "'{}'", d),
            _ => write!(f, "NULL"),
        }
    }
}

fn to_arguments(params: &[SqlValue]) -> PgArguments {
    let mut args = PgArguments::default();
    for param in params {
        match param {
            SqlValue::Text(v) => args.add(v.clone()),
            SqlValue::Int(v) => args.add(*v),
            SqlValue::Float(v) => args.add(*v),
            SqlValue::Bool(v) => args.add(*v),
            SqlValue::Date(v) => args.add(*v),
        }
    }
    args
}

/// Render a parameter snapshot for the statement log
fn render_params(params: &[SqlValue]) -> String {
    params
        .iter()
        .enumerate()
        .map(|(i, p)| format!("${}={}", i + 1, p))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Executes parameterized statements against the pool
///
/// Connections are acquired per statement and returned to the pool
/// unconditionally.
#[derive(Clone)]
pub struct SqlRunner {
    pool: PgPool,
}

impl SqlRunner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run a statement and return the number of affected rows
    pub async fn execute(&self, sql: &str, params: &[SqlValue]) -> DbResult<u64> {
        tracing::debug!(statement = sql, params = %render_params(params), "executing statement");

        let result = sqlx::query_with(sql, to_arguments(params))
            .execute(&self.pool)
            .await?;

        tracing::debug!(rows_affected = result.rows_affected(), "statement done");
        Ok(result.rows_affected())
    }

    /// Fetch every matching row
    pub async fn query_many<T>(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(statement = sql, params = %render_params(params), "running query");

        let rows = sqlx::query_as_with::<_, T, _>(sql, to_arguments(params))
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(rows = rows.len(), "query done");
        Ok(rows)
    }

    /// Fetch exactly one row; zero rows or more than one row is an error
    pub async fn query_one<T>(&self, sql: &str, params: &[SqlValue]) -> DbResult<T>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut rows = self.query_many::<T>(sql, params).await?;
        if rows.len() > 1 {
            return Err(DbError::MultipleRows);
        }
        rows.pop().ok_or(DbError::RowNotFound)
    }

    /// Fetch at most one row
    pub async fn query_optional<T>(&self, sql: &str, params: &[SqlValue]) -> DbResult<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(statement = sql, params = %render_params(params), "running query");

        let row = sqlx::query_as_with::<_, T, _>(sql, to_arguments(params))
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!(found = row.is_some(), "query done");
        Ok(row)
    }

    /// Fetch a single scalar value (counts, EXISTS checks)
    pub async fn query_scalar<T>(&self, sql: &str, params: &[SqlValue]) -> DbResult<T>
    where
        T: Send + Unpin,
        (T,): for<'r> FromRow<'r, PgRow>,
    {
        tracing::debug!(statement = sql, params = %render_params(params), "running scalar query");

        let value = sqlx::query_scalar_with::<_, T, _>(sql, to_arguments(params))
            .fetch_one(&self.pool)
            .await?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_value_display() {
        assert_eq!(SqlValue::text("abc").to_string(), "'abc'");
        assert_eq!(SqlValue::int(42).to_string(), "42");
        assert_eq!(SqlValue::Text(None).to_string(), "NULL");
        assert_eq!(SqlValue::Date(None).to_string(), "NULL");

        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(SqlValue::date(date).to_string(), "'2024-03-15'");
    }

    #[test]
    fn test_render_params() {
        let params = [SqlValue::text("x"), SqlValue::Int(None)];
        assert_eq!(render_params(&params), "$1='x', $2=NULL");
        assert_eq!(render_params(&[]), "");
    }

    #[test]
    fn test_constructors_wrap_options() {
        assert_eq!(SqlValue::opt_text::<&str>(None), SqlValue::Text(None));
        assert_eq!(
            SqlValue::opt_text(Some("a")),
            SqlValue::Text(Some("a".to_string()))
        );
        assert_eq!(SqlValue::opt_int(Some(7)), SqlValue::Int(Some(7)));
        assert_eq!(SqlValue::opt_float(None), SqlValue::Float(None));
    }
}
