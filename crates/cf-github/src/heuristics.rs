//! Repository-to-project mapping rules
//!
//! Pure helpers that turn GitHub repository metadata into catalog fields:
//! a project code from the repo name, a display name, a status from push
//! recency, and tech stack codes from language and topics.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use crate::models::Repository;

/// GitHub language names to tech stack codes
static LANGUAGE_STACKS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("C#", "TS001"),
        ("CSharp", "TS001"),
        ("JavaScript", "TS002"),
        ("TypeScript", "TS002"),
        ("Python", "TS003"),
        ("Java", "TS004"),
        ("React", "TS005"),
        ("Angular", "TS006"),
        ("SQL", "TS007"),
        ("Node.js", "TS008"),
        ("PHP", "TS009"),
        ("Dart", "TS010"),
        ("Go", "TS011"),
        ("Vue", "TS012"),
        ("Svelte", "TS013"),
    ])
});

/// Topic substrings that imply a framework stack
const TOPIC_KEYWORDS: [(&str, &str); 5] = [
    ("react", "React"),
    ("angular", "Angular"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("node", "Node.js"),
];

/// Project code from a repository name: `-` and `.` become `_`, uppercase,
/// `PROJ_` prefix, at most 50 chars. "pos-csharp" -> "PROJ_POS_CSHARP".
pub fn derive_project_code(repository_name: &str) -> String {
    let mut code = repository_name.replace(['-', '.'], "_").to_uppercase();
    if !code.starts_with("PROJ_") {
        code = format!("PROJ_{code}");
    }
    code.chars().take(50).collect()
}

/// Title-cased display name: "pos-csharp" -> "Pos Csharp".
pub fn format_project_name(repository_name: &str) -> String {
    repository_name
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Project status from push recency: < 30 days Active, < 90 In Progress,
/// otherwise Completed. Archived repositories are always Archived.
pub fn derive_status(repository: &Repository) -> String {
    status_as_of(repository, Utc::now())
}

fn status_as_of(repository: &Repository, now: DateTime<Utc>) -> String {
    if repository.archived {
        return "Archived".to_string();
    }
    let days_since_push = match repository.pushed_at {
        Some(pushed) => (now - pushed).num_days(),
        None => i64::MAX,
    };
    if days_since_push < 30 {
        "Active".to_string()
    } else if days_since_push < 90 {
        "In Progress".to_string()
    } else {
        "Completed".to_string()
    }
}

/// Stack codes suggested by the primary language plus topic keywords,
/// deduplicated in first-seen order.
pub fn suggest_stack_codes(language: Option<&str>, topics: &[String]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    if let Some(language) = language {
        if let Some(code) = LANGUAGE_STACKS.get(language) {
            codes.push((*code).to_string());
        }
    }
    for topic in topics {
        let topic = topic.to_lowercase();
        let matched = TOPIC_KEYWORDS
            .iter()
            .find(|(keyword, _)| topic.contains(keyword))
            .and_then(|(_, language)| LANGUAGE_STACKS.get(language));
        if let Some(code) = matched {
            if !codes.iter().any(|c| c == *code) {
                codes.push((*code).to_string());
            }
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn repo_pushed_days_ago(days: i64, now: DateTime<Utc>) -> Repository {
        Repository {
            pushed_at: Some(now - chrono::Duration::days(days)),
            ..Repository::default()
        }
    }

    #[test]
    fn test_derive_project_code() {
        assert_eq!(derive_project_code("pos-csharp"), "PROJ_POS_CSHARP");
        assert_eq!(derive_project_code("my.app"), "PROJ_MY_APP");
        assert_eq!(derive_project_code("proj_legacy"), "PROJ_LEGACY");
        assert_eq!(derive_project_code("PROJ-X"), "PROJ_X");
    }

    #[test]
    fn test_derive_project_code_truncates() {
        let long = "a".repeat(80);
        let code = derive_project_code(&long);
        assert_eq!(code.chars().count(), 50);
        assert!(code.starts_with("PROJ_A"));
    }

    #[test]
    fn test_format_project_name() {
        assert_eq!(format_project_name("pos-csharp"), "Pos Csharp");
        assert_eq!(format_project_name("my_cool__app"), "My Cool App");
        assert_eq!(format_project_name("HELLO"), "Hello");
    }

    #[test]
    fn test_status_from_push_recency() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(status_as_of(&repo_pushed_days_ago(5, now), now), "Active");
        assert_eq!(
            status_as_of(&repo_pushed_days_ago(45, now), now),
            "In Progress"
        );
        assert_eq!(
            status_as_of(&repo_pushed_days_ago(200, now), now),
            "Completed"
        );

        let never_pushed = Repository::default();
        assert_eq!(status_as_of(&never_pushed, now), "Completed");
    }

    #[test]
    fn test_status_archived_wins() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut repo = repo_pushed_days_ago(1, now);
        repo.archived = true;
        assert_eq!(status_as_of(&repo, now), "Archived");
    }

    #[test]
    fn test_suggest_stack_codes_from_language() {
        assert_eq!(suggest_stack_codes(Some("C#"), &[]), vec!["TS001"]);
        assert_eq!(suggest_stack_codes(Some("TypeScript"), &[]), vec!["TS002"]);
        assert!(suggest_stack_codes(Some("Rust"), &[]).is_empty());
        assert!(suggest_stack_codes(None, &[]).is_empty());
    }

    #[test]
    fn test_suggest_stack_codes_from_topics() {
        let topics = vec!["react-hooks".to_string(), "nodejs".to_string()];
        assert_eq!(
            suggest_stack_codes(Some("JavaScript"), &topics),
            vec!["TS002", "TS005", "TS008"]
        );
    }

    #[test]
    fn test_suggest_stack_codes_dedups() {
        let topics = vec!["react".to_string(), "react-native".to_string()];
        assert_eq!(
            suggest_stack_codes(Some("React"), &topics),
            vec!["TS005"]
        );
    }
}
