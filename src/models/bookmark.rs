use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A saved link. `id` and `created_at` are assigned by storage on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: String,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn created_label(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn created_at_rfc3339(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// The url as a link target. Relative urls and `http`, `https` and
    /// `mailto` pass through unchanged; any other scheme becomes `#`.
    /// Stored values are never rewritten.
    pub fn safe_href(&self) -> &str {
        let Some(end) = self.url.find([':', '/', '?', '#']) else {
            return &self.url;
        };
        if !self.url[end..].starts_with(':') {
            return &self.url;
        }

        // Browsers ignore whitespace and control characters inside a scheme.
        let scheme: String = self.url[..end]
            .chars()
            .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
            .collect::<String>()
            .to_ascii_lowercase();

        match scheme.as_str() {
            "http" | "https" | "mailto" => &self.url,
            _ => "#",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Fields of a bookmark that has not been stored yet.
///
/// Only constructible through [`NewBookmark::new`], so a value of this type
/// always has a non-empty title and url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    title: String,
    url: String,
    description: String,
    tags: String,
}

impl NewBookmark {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        tags: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let url = url.into();

        if title.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if url.is_empty() {
            return Err(ValidationError::Empty { field: "url" });
        }

        Ok(Self {
            title,
            url,
            description: description.into(),
            tags: tags.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }
}
