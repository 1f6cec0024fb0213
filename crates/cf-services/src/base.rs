//! Shared service plumbing
//!
//! Every service method follows the same boundary rule: expected outcomes
//! travel in the `ServiceResult` envelope, and database errors are caught
//! here and downgraded to `Failure` instead of propagating.

use std::future::Future;

use cf_core::ServiceResult;
use cf_db::DbResult;

/// Runs a database-touching block, converting a `DbError` into a `Failure`
/// envelope prefixed with `context`.
pub(crate) async fn run_db<T, F>(context: &str, block: F) -> ServiceResult<T>
where
    F: Future<Output = DbResult<ServiceResult<T>>>,
{
    match block.await {
        Ok(result) => result,
        Err(err) => {
            tracing::error!("{}: {}", context, err);
            ServiceResult::failure(format!("{}: {}", context, err))
        }
    }
}

/// True when a required text field is missing or whitespace-only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Codes that appear more than once in a request, in first-seen order.
pub(crate) fn duplicate_codes(codes: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    let mut duplicates = Vec::new();
    for code in codes {
        if seen.contains(code) {
            if !duplicates.contains(code) {
                duplicates.push(code.clone());
            }
        } else {
            seen.push(code.clone());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank("TEAM001"));
        assert!(!is_blank("  x  "));
    }

    #[test]
    fn test_duplicate_codes() {
        let codes = vec![
            "A".to_string(),
            "B".to_string(),
            "A".to_string(),
            "C".to_string(),
            "A".to_string(),
            "B".to_string(),
        ];
        assert_eq!(duplicate_codes(&codes), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_duplicate_codes_none() {
        let codes = vec!["A".to_string(), "B".to_string()];
        assert!(duplicate_codes(&codes).is_empty());
    }
}
