//! GitHub API payload models

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One repository from `GET /orgs/{org}/repos`
///
/// Only the fields the import pipeline reads are modeled; the rest of the
/// payload is ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub clone_url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: i64,
    #[serde(default)]
    pub forks_count: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub private: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_repository() {
        let json = r#"{
            "id": 1296269,
            "name": "pos-csharp",
            "full_name": "acme/pos-csharp",
            "description": "Point of sale demo",
            "html_url": "https://github.com/acme/pos-csharp",
            "clone_url": "https://github.com/acme/pos-csharp.git",
            "language": "C#",
            "stargazers_count": 80,
            "forks_count": 9,
            "created_at": "2024-01-26T19:01:12Z",
            "updated_at": "2024-03-26T19:14:43Z",
            "pushed_at": "2024-03-26T19:06:43Z",
            "topics": ["dotnet", "retail"],
            "archived": false,
            "private": false
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "pos-csharp");
        assert_eq!(repo.language.as_deref(), Some("C#"));
        assert_eq!(repo.topics, vec!["dotnet", "retail"]);
        assert!(!repo.archived);
        assert_eq!(
            repo.created_at.unwrap().date_naive().to_string(),
            "2024-01-26"
        );
    }

    #[test]
    fn test_deserialize_sparse_payload() {
        // Fields the API omits for some repos must not break decoding.
        let json = r#"{
            "id": 7,
            "name": "empty",
            "full_name": "acme/empty",
            "html_url": "https://github.com/acme/empty",
            "clone_url": "https://github.com/acme/empty.git"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert!(repo.description.is_none());
        assert!(repo.language.is_none());
        assert!(repo.pushed_at.is_none());
        assert!(repo.topics.is_empty());
        assert_eq!(repo.stargazers_count, 0);
    }
}
