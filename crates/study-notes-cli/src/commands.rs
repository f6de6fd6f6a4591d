//! Subcommand bodies. Each writes its report to `out` so tests can capture it.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use study_notes_engine::{BlockPayload, PostDraft, generate_slug, io};

pub fn slug(title: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", generate_slug(title))?;
    Ok(())
}

pub fn list(posts_dir: &Path, out: &mut impl Write) -> Result<()> {
    for post in io::list_posts(posts_dir)? {
        writeln!(
            out,
            "{}  {:<32}  [{}] {}",
            post.date, post.slug, post.category, post.title
        )?;
    }
    Ok(())
}

pub fn categories(posts_dir: &Path, out: &mut impl Write) -> Result<()> {
    for category in io::categories(posts_dir)? {
        writeln!(out, "{category}")?;
    }
    Ok(())
}

pub fn show(slug: &str, posts_dir: &Path, out: &mut impl Write) -> Result<()> {
    let post = io::read_post(slug, posts_dir)?;
    let draft = PostDraft::from_post(&post);

    writeln!(out, "{} ({})", post.title, post.date)?;
    writeln!(out, "category: {}", post.category)?;
    writeln!(out, "excerpt: {}", post.excerpt)?;
    for block in draft.session.document() {
        writeln!(out, "[{}] {}", block.id(), describe(block.payload()))?;
    }
    Ok(())
}

fn describe(payload: &BlockPayload) -> String {
    match payload {
        BlockPayload::Heading { level, text } => format!("h{} {text:?}", level.digit()),
        BlockPayload::Paragraph { text } => format!("paragraph {text:?}"),
        BlockPayload::Code { code } => format!("code ({} lines)", code.lines().count()),
        BlockPayload::List { items, ordered } => {
            let kind = if *ordered { "ordered" } else { "unordered" };
            format!("{kind} list {items:?}")
        }
        BlockPayload::Image { url, alt } => format!("image {url} {alt:?}"),
    }
}

pub fn render(slug: &str, posts_dir: &Path, out: &mut impl Write) -> Result<()> {
    let post = io::read_post(slug, posts_dir)?;
    writeln!(out, "{}", PostDraft::from_post(&post).session.preview())?;
    Ok(())
}

/// Re-store a post with its content in canonical form. Reports whether the
/// content changed.
pub fn normalize(slug: &str, dry_run: bool, posts_dir: &Path, out: &mut impl Write) -> Result<()> {
    let post = io::read_post(slug, posts_dir)?;
    let input = PostDraft::from_post(&post)
        .submit()
        .with_context(|| format!("Post '{slug}' cannot be normalized"))?;

    if input.content == post.content {
        writeln!(out, "{slug}: already normalized")?;
        return Ok(());
    }
    if dry_run {
        writeln!(out, "{slug}: would change")?;
        return Ok(());
    }

    io::update_post(post.id, input, posts_dir)?;
    writeln!(out, "{slug}: normalized")?;
    Ok(())
}

pub struct NewPost {
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub slug: Option<String>,
    /// Plain text; blank lines separate paragraphs
    pub body: String,
}

pub fn create(new_post: NewPost, posts_dir: &Path, out: &mut impl Write) -> Result<()> {
    let mut draft = PostDraft::new();
    draft.set_title(new_post.title);
    if let Some(slug) = new_post.slug {
        draft.set_slug(slug);
    }
    draft.excerpt = new_post.excerpt;
    draft.category = new_post.category;
    draft.date = new_post.date;

    for text in paragraphs(&new_post.body) {
        draft.session.push(BlockPayload::Paragraph { text });
    }

    let input = draft.submit()?;
    let post = io::create_post(input, posts_dir)?;
    writeln!(out, "created {} ({})", post.slug, post.id)?;
    Ok(())
}

fn paragraphs(body: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

pub fn delete(slug: &str, posts_dir: &Path, out: &mut impl Write) -> Result<()> {
    let post = io::read_post(slug, posts_dir)?;
    io::delete_post(post.id, posts_dir)?;
    writeln!(out, "deleted {slug}")?;
    Ok(())
}
