use serde::{Deserialize, Deserializer, Serialize};

/// One repository as listed by `GET /users/{account}/repos`.
///
/// Only the fields the page consumes are read; everything else in the API
/// payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepoSummary {
    #[serde(default)]
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "html_url", default)]
    pub url: String,

    /// Star count. A missing or null value reads as zero.
    #[serde(
        rename = "stargazers_count",
        default,
        deserialize_with = "null_as_zero"
    )]
    pub popularity: u64,

    #[serde(rename = "forks_count", default, deserialize_with = "null_as_zero")]
    pub forks: u64,

    #[serde(default)]
    pub language: Option<String>,

    /// RFC 3339 timestamp of the last push or metadata change.
    #[serde(rename = "updated_at", default)]
    pub updated: Option<String>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_repo_summary_from_api_payload() {
        let value = json!({
            "id": 42,
            "name": "streamlit-iris-app-aiml",
            "full_name": "harshvar36/streamlit-iris-app-aiml",
            "description": "Iris classifier",
            "html_url": "https://github.com/harshvar36/streamlit-iris-app-aiml",
            "stargazers_count": 7,
            "forks_count": 2,
            "language": "Python",
            "updated_at": "2025-03-04T10:00:00Z",
            "private": false
        });

        let repo: RepoSummary = serde_json::from_value(value).unwrap();
        assert_eq!(repo.id, 42);
        assert_eq!(repo.name, "streamlit-iris-app-aiml");
        assert_eq!(repo.description.as_deref(), Some("Iris classifier"));
        assert_eq!(repo.popularity, 7);
        assert_eq!(repo.forks, 2);
        assert_eq!(repo.language.as_deref(), Some("Python"));
        assert_eq!(repo.updated.as_deref(), Some("2025-03-04T10:00:00Z"));
    }

    #[test]
    fn test_repo_summary_missing_counts_read_as_zero() {
        let value = json!({
            "name": "bare",
            "html_url": "https://github.com/someone/bare",
            "stargazers_count": null,
            "description": null,
            "language": null
        });

        let repo: RepoSummary = serde_json::from_value(value).unwrap();
        assert_eq!(repo.popularity, 0);
        assert_eq!(repo.forks, 0);
        assert!(repo.description.is_none());
        assert!(repo.language.is_none());
        assert!(repo.updated.is_none());
    }

    #[test]
    fn test_repo_summary_requires_name() {
        let value = json!({ "html_url": "https://github.com/someone/anon" });
        assert!(serde_json::from_value::<RepoSummary>(value).is_err());
    }
}
