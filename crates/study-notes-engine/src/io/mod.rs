//! Local post store: one TOML file per post, named after its slug.
//!
//! This stands in for the hosted posts table. Everything above it only sees
//! `Post` and `PostInput`.

use crate::models::{Post, PostInput};
use chrono::Utc;
use relative_path::RelativePathBuf;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const POST_EXTENSION: &str = "toml";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Post not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse post file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize post: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),
    #[error("Slug already in use: {0}")]
    SlugTaken(String),
    #[error("Invalid posts directory: {0}")]
    InvalidPostsDir(String),
}

/// Slugs become file names, so only a conservative character set is allowed
fn post_path(slug: &str) -> Result<RelativePathBuf, IoError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(IoError::InvalidSlug(slug.to_string()));
    }
    Ok(RelativePathBuf::from(format!("{slug}.{POST_EXTENSION}")))
}

fn read_post_file(path: &Path) -> Result<Post, IoError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_post_file(post: &Post, posts_root: &Path) -> Result<(), IoError> {
    let absolute_path = post_path(&post.slug)?.to_path(posts_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&absolute_path, toml::to_string_pretty(post)?)?;
    Ok(())
}

/// Read the post stored under `slug`
pub fn read_post(slug: &str, posts_root: &Path) -> Result<Post, IoError> {
    let absolute_path = post_path(slug)?.to_path(posts_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(slug.to_string()));
    }
    read_post_file(&absolute_path)
}

/// Find a post by its id
pub fn find_post_by_id(id: Uuid, posts_root: &Path) -> Result<Post, IoError> {
    list_posts(posts_root)?
        .into_iter()
        .find(|post| post.id == id)
        .ok_or_else(|| IoError::NotFound(id.to_string()))
}

/// All posts, newest date first
pub fn list_posts(posts_root: &Path) -> Result<Vec<Post>, IoError> {
    validate_posts_dir(posts_root)?;

    let mut posts = Vec::new();
    for entry in fs::read_dir(posts_root)? {
        let path = entry?.path();
        if path.is_file()
            && let Some(ext) = path.extension()
            && ext == POST_EXTENSION
        {
            match read_post_file(&path) {
                Ok(post) => posts.push(post),
                Err(e) => log::warn!("Skipping unreadable post file: {e}"),
            }
        }
    }

    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
    Ok(posts)
}

/// Distinct categories in the order they first appear in [`list_posts`]
pub fn categories(posts_root: &Path) -> Result<Vec<String>, IoError> {
    let mut seen = Vec::new();
    for post in list_posts(posts_root)? {
        if !seen.contains(&post.category) {
            seen.push(post.category);
        }
    }
    Ok(seen)
}

/// Store a new post. Fails if another post already uses the slug.
pub fn create_post(input: PostInput, posts_root: &Path) -> Result<Post, IoError> {
    if post_path(&input.slug)?.to_path(posts_root).exists() {
        return Err(IoError::SlugTaken(input.slug));
    }

    let now = Utc::now();
    let post = Post {
        id: Uuid::new_v4(),
        slug: input.slug,
        title: input.title,
        excerpt: input.excerpt,
        content: input.content,
        date: input.date.unwrap_or_else(|| now.date_naive()),
        category: input.category,
        cover_image: input.cover_image,
        created_at: now,
    };
    write_post_file(&post, posts_root)?;
    log::debug!("created post {} ({})", post.slug, post.id);
    Ok(post)
}

/// Overwrite the post with `id`, renaming its file if the slug changed.
///
/// The file is moved before it is rewritten, so a failure part way through
/// never leaves two files carrying the same id.
pub fn update_post(id: Uuid, input: PostInput, posts_root: &Path) -> Result<Post, IoError> {
    let existing = find_post_by_id(id, posts_root)?;
    if existing.slug != input.slug {
        let old_path = post_path(&existing.slug)?.to_path(posts_root);
        let new_path = post_path(&input.slug)?.to_path(posts_root);
        if new_path.exists() {
            return Err(IoError::SlugTaken(input.slug));
        }
        fs::rename(&old_path, &new_path)?;
        log::debug!("renamed post {} -> {}", existing.slug, input.slug);
    }

    let post = Post {
        id,
        slug: input.slug,
        title: input.title,
        excerpt: input.excerpt,
        content: input.content,
        date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
        category: input.category,
        cover_image: input.cover_image,
        created_at: existing.created_at,
    };
    if let Err(e) = write_post_file(&post, posts_root) {
        log::warn!("Failed to rewrite post {id} at {}: {e}", post.slug);
        return Err(e);
    }
    Ok(post)
}

/// Remove the post with `id`
pub fn delete_post(id: Uuid, posts_root: &Path) -> Result<(), IoError> {
    let existing = find_post_by_id(id, posts_root)?;
    fs::remove_file(post_path(&existing.slug)?.to_path(posts_root))?;
    log::debug!("deleted post {} ({id})", existing.slug);
    Ok(())
}

pub fn validate_posts_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidPostsDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}
