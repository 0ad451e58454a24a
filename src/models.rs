use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Zero-based page offset into a term's results.
pub type Page = u32;

/// A search string as the user submitted it. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Returns `None` for empty or whitespace-only input. The stored value is kept verbatim.
    pub fn new(term: impl Into<String>) -> Option<Self> {
        let term = term.into();
        if term.trim().is_empty() {
            None
        } else {
            Some(Self(term))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub num_comments: u32,
    pub points: u32,
    pub created_at: Option<DateTime<Utc>>,
}

impl StoryItem {
    // "3 hours ago" style label, relative to `now`
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let Some(created_at) = self.created_at else {
            return String::new();
        };

        let elapsed = now.signed_duration_since(created_at);
        let (amount, unit) = if elapsed.num_days() >= 365 {
            (elapsed.num_days() / 365, "year")
        } else if elapsed.num_days() >= 30 {
            (elapsed.num_days() / 30, "month")
        } else if elapsed.num_days() >= 1 {
            (elapsed.num_days(), "day")
        } else if elapsed.num_hours() >= 1 {
            (elapsed.num_hours(), "hour")
        } else if elapsed.num_minutes() >= 1 {
            (elapsed.num_minutes(), "minute")
        } else {
            return "just now".to_string();
        };

        if amount == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", amount, unit)
        }
    }
}

/// Body of a successful search API response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<SearchHit>,
}

/// One hit as the search API sends it. Most fields can be null.
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub num_comments: Option<u32>,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<SearchHit> for StoryItem {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.object_id,
            title: hit.title.unwrap_or_default(),
            url: hit.url.unwrap_or_default(),
            author: hit.author.unwrap_or_default(),
            num_comments: hit.num_comments.unwrap_or(0),
            points: hit.points.unwrap_or(0),
            created_at: hit.created_at,
        }
    }
}
