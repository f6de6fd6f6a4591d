use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editing::EditSession;

/// Categories offered when writing a post. Any other category is accepted.
pub const SUGGESTED_CATEGORIES: [&str; 7] = [
    "Web Development",
    "Programming",
    "Framework",
    "Database",
    "DevOps",
    "Design",
    "Networking",
];

/// A stored post. `content` holds the serialized block markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub date: NaiveDate,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields written on create and update. A missing `date` means "today".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub cover_image: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Post has no content blocks")]
    EmptyContent,
}

/// Derive a URL slug from a title.
///
/// Lowercases, drops everything but ASCII letters, digits, whitespace and
/// `-`, then turns whitespace runs into `-` and collapses repeated `-`.
pub fn generate_slug(title: &str) -> String {
    static DISALLOWED_REGEX: OnceLock<Regex> = OnceLock::new();
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    static DASHES_REGEX: OnceLock<Regex> = OnceLock::new();
    let disallowed = DISALLOWED_REGEX
        .get_or_init(|| Regex::new(r"[^a-z0-9\s-]").expect("Invalid slug regex"));
    let whitespace =
        WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));
    let dashes = DASHES_REGEX.get_or_init(|| Regex::new(r"-+").expect("Invalid dash regex"));

    let lowered = title.trim().to_lowercase();
    let kept = disallowed.replace_all(&lowered, "");
    let dashed = whitespace.replace_all(kept.trim(), "-");
    dashes.replace_all(&dashed, "-").into_owned()
}

/// Form state for writing or editing a post.
///
/// New drafts derive their slug from the title until the slug is edited by
/// hand; drafts opened from an existing post keep the stored slug.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    title: String,
    slug: String,
    pub excerpt: String,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    auto_slug: bool,
    pub session: EditSession,
}

impl Default for PostDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl PostDraft {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            category: String::new(),
            date: None,
            cover_image: None,
            auto_slug: true,
            session: EditSession::new(),
        }
    }

    /// Open a stored post for editing; its markup is parsed once here
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category.clone(),
            date: Some(post.date),
            cover_image: post.cover_image.clone(),
            auto_slug: false,
            session: EditSession::load(&post.content),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn auto_slug(&self) -> bool {
        self.auto_slug
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.refresh_slug();
    }

    /// A hand-written slug switches off slug generation
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.auto_slug = false;
        self.slug = slug.into();
    }

    pub fn set_auto_slug(&mut self, enabled: bool) {
        self.auto_slug = enabled;
        self.refresh_slug();
    }

    fn refresh_slug(&mut self) {
        if self.auto_slug && !self.title.is_empty() {
            self.slug = generate_slug(&self.title);
        }
    }

    /// Validate the form and produce the record to persist
    pub fn submit(&self) -> Result<PostInput, DraftError> {
        let required = [
            ("title", &self.title),
            ("slug", &self.slug),
            ("excerpt", &self.excerpt),
            ("category", &self.category),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(DraftError::MissingField(*name));
        }
        if self.session.document().is_empty() {
            return Err(DraftError::EmptyContent);
        }

        Ok(PostInput {
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            content: self.session.preview(),
            category: self.category.clone(),
            date: self.date,
            cover_image: self.cover_image.clone().filter(|url| !url.trim().is_empty()),
        })
    }
}
