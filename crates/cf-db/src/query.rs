//! Dynamic list query assembly
//!
//! Builds the filtered, sorted, paginated item query and its matching
//! count query for the listing surfaces. Column names must come from the
//! per-table allow-list functions; values are always bound parameters.

use cf_core::{PageRequest, SortDirection};

use crate::gateway::SqlValue;

/// Escape LIKE/ILIKE metacharacters so a filter value matches literally
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Normalize a caller-facing column key for allow-list lookup
///
/// `ProjectName`, `project_name`, and `PROJECT_NAME` all normalize to
/// `projectname`.
pub fn normalize_column_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// A built list query pair
///
/// `count_params` is the shared filter parameter prefix of `items_params`;
/// the item query adds the LIMIT and OFFSET binds on top.
#[derive(Debug)]
pub struct ListQuery {
    pub items_sql: String,
    pub count_sql: String,
    pub items_params: Vec<SqlValue>,
    pub count_params: Vec<SqlValue>,
}

/// Assembles a list query from allow-listed pieces
#[derive(Debug)]
pub struct ListQueryBuilder {
    select_sql: String,
    count_sql: String,
    default_order: String,
    where_clause: Option<String>,
    order_clause: Option<String>,
    params: Vec<SqlValue>,
}

impl ListQueryBuilder {
    /// `select_sql` and `count_sql` are the statement bodies up to (not
    /// including) WHERE; `default_order` is the ORDER BY body used when no
    /// sort is requested.
    pub fn new(
        select_sql: impl Into<String>,
        count_sql: impl Into<String>,
        default_order: impl Into<String>,
    ) -> Self {
        Self {
            select_sql: select_sql.into(),
            count_sql: count_sql.into(),
            default_order: default_order.into(),
            where_clause: None,
            order_clause: None,
            params: Vec::new(),
        }
    }

    /// Case-insensitive substring filter over one or more allow-listed
    /// columns, all matched against the same bound value
    pub fn filter_contains(mut self, columns: &[&str], value: &str) -> Self {
        let position = self.params.len() + 1;
        let conditions: Vec<String> = columns
            .iter()
            .map(|column| format!("{} ILIKE ${}", column, position))
            .collect();

        self.where_clause = Some(if conditions.len() == 1 {
            conditions.into_iter().collect()
        } else {
            format!("({})", conditions.join(" OR "))
        });
        self.params
            .push(SqlValue::text(format!("%{}%", escape_like(value))));
        self
    }

    /// Sort by an allow-listed column
    pub fn order_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.order_clause = Some(format!("{} {} NULLS LAST", column, direction.as_sql()));
        self
    }

    /// Finish the query pair, appending the LIMIT/OFFSET binds
    pub fn build(self, page: &PageRequest) -> ListQuery {
        let mut items_sql = self.select_sql;
        let mut count_sql = self.count_sql;

        if let Some(where_clause) = &self.where_clause {
            items_sql.push_str(&format!(" WHERE {}", where_clause));
            count_sql.push_str(&format!(" WHERE {}", where_clause));
        }

        let order = self.order_clause.unwrap_or(self.default_order);
        items_sql.push_str(&format!(" ORDER BY {}", order));
        items_sql.push_str(&format!(
            " LIMIT ${} OFFSET ${}",
            self.params.len() + 1,
            self.params.len() + 2
        ));

        let count_params = self.params.clone();
        let mut items_params = self.params;
        items_params.push(SqlValue::int(page.limit()));
        items_params.push(SqlValue::int(page.offset()));

        ListQuery {
            items_sql,
            count_sql,
            items_params,
            count_params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        // apostrophes pass through untouched; values are bound, not inlined
        assert_eq!(escape_like("O'Brien"), "O'Brien");
    }

    #[test]
    fn test_normalize_column_key() {
        assert_eq!(normalize_column_key("ProjectName"), "projectname");
        assert_eq!(normalize_column_key("project_name"), "projectname");
        assert_eq!(normalize_column_key("PROJECT_NAME"), "projectname");
        assert_eq!(normalize_column_key(" status "), "status");
    }

    #[test]
    fn test_build_without_filter() {
        let query = ListQueryBuilder::new(
            "SELECT * FROM Tbl_Team",
            "SELECT COUNT(*) FROM Tbl_Team",
            "team_name ASC",
        )
        .build(&PageRequest::new(2, 10));

        assert_eq!(
            query.items_sql,
            "SELECT * FROM Tbl_Team ORDER BY team_name ASC LIMIT $1 OFFSET $2"
        );
        assert_eq!(query.count_sql, "SELECT COUNT(*) FROM Tbl_Team");
        assert_eq!(
            query.items_params,
            vec![SqlValue::int(10), SqlValue::int(10)]
        );
        assert!(query.count_params.is_empty());
    }

    #[test]
    fn test_build_with_single_column_filter() {
        let query = ListQueryBuilder::new(
            "SELECT * FROM Tbl_Project",
            "SELECT COUNT(*) FROM Tbl_Project",
            "project_name ASC",
        )
        .filter_contains(&["project_name"], "flow")
        .build(&PageRequest::new(1, 5));

        assert_eq!(
            query.items_sql,
            "SELECT * FROM Tbl_Project WHERE project_name ILIKE $1 \
             ORDER BY project_name ASC LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            query.count_sql,
            "SELECT COUNT(*) FROM Tbl_Project WHERE project_name ILIKE $1"
        );
        assert_eq!(query.count_params, vec![SqlValue::text("%flow%")]);
        assert_eq!(query.items_params.len(), 3);
    }

    #[test]
    fn test_build_with_multi_column_filter() {
        let query = ListQueryBuilder::new(
            "SELECT * FROM Tbl_Team",
            "SELECT COUNT(*) FROM Tbl_Team",
            "team_name ASC",
        )
        .filter_contains(&["team_code", "team_name"], "alpha")
        .build(&PageRequest::default());

        assert!(query
            .items_sql
            .contains("WHERE (team_code ILIKE $1 OR team_name ILIKE $1)"));
        assert_eq!(query.count_params.len(), 1);
    }

    #[test]
    fn test_build_with_order() {
        let query = ListQueryBuilder::new(
            "SELECT * FROM Tbl_Project",
            "SELECT COUNT(*) FROM Tbl_Project",
            "project_name ASC",
        )
        .order_by("end_date", SortDirection::Desc)
        .build(&PageRequest::default());

        assert!(query
            .items_sql
            .contains("ORDER BY end_date DESC NULLS LAST"));
    }

    #[test]
    fn test_filter_value_is_escaped_and_wrapped() {
        let query = ListQueryBuilder::new("SELECT 1", "SELECT COUNT(*)", "x ASC")
            .filter_contains(&["x"], "50%_done")
            .build(&PageRequest::default());

        assert_eq!(
            query.count_params,
            vec![SqlValue::text("%50\\%\\_done%")]
        );
    }
}
