//! Shared helpers for unit tests

use crate::models::PostInput;
use chrono::NaiveDate;
use tempfile::TempDir;

pub fn create_test_posts_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A valid post input; `date` is `YYYY-MM-DD`
pub fn sample_input(slug: &str, date: &str) -> PostInput {
    PostInput {
        title: format!("Notes on {slug}"),
        slug: slug.to_string(),
        excerpt: "Short summary".to_string(),
        content: "<h2>Heading</h2>\n\n<p>Line one<br>Line <strong>two</strong></p>".to_string(),
        category: "Programming".to_string(),
        date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("Invalid test date")),
        cover_image: None,
    }
}
