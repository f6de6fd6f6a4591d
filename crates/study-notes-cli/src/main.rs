mod commands;

use std::io::{Read, stdin, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use study_notes_config::Config;
use study_notes_engine::io;

#[derive(Parser)]
#[command(name = "study-notes", version, about = "Manage study-notes posts")]
struct Cli {
    /// Posts directory, overriding the config file
    #[arg(long, global = true)]
    posts_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the slug generated for a title
    Slug { title: String },

    /// List posts, newest first
    List,

    /// List the categories in use
    Categories,

    /// Show the content blocks of a post
    Show { slug: String },

    /// Print a post's content as regenerated from its blocks
    Render { slug: String },

    /// Rewrite a post's content in canonical form
    Normalize {
        slug: String,

        /// Report whether the post would change without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Create a post; the body is read from stdin, one paragraph per blank-line separated chunk
    New(NewArgs),

    /// Delete a post
    Delete { slug: String },
}

#[derive(clap::Args)]
struct NewArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    excerpt: String,

    /// Defaults to `default_category` from the config file
    #[arg(long)]
    category: Option<String>,

    /// Publication date (YYYY-MM-DD), today if omitted
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Explicit slug instead of one generated from the title
    #[arg(long)]
    slug: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let Cli {
        posts_dir: cli_posts_dir,
        command,
    } = Cli::parse();
    let mut out = stdout().lock();
    // Only commands that touch the store resolve the directory
    let posts_dir = || resolve_posts_dir(cli_posts_dir.clone(), load_config);

    match command {
        Command::Slug { title } => commands::slug(&title, &mut out),
        Command::List => commands::list(&posts_dir()?, &mut out),
        Command::Categories => commands::categories(&posts_dir()?, &mut out),
        Command::Show { slug } => commands::show(&slug, &posts_dir()?, &mut out),
        Command::Render { slug } => commands::render(&slug, &posts_dir()?, &mut out),
        Command::Normalize { slug, dry_run } => {
            commands::normalize(&slug, dry_run, &posts_dir()?, &mut out)
        }
        Command::New(args) => {
            let posts_dir = posts_dir()?;
            let category = match args.category {
                Some(category) => category,
                None => load_config()?
                    .and_then(|config| config.default_category)
                    .context("No --category given and no default_category configured")?,
            };
            let mut body = String::new();
            stdin()
                .read_to_string(&mut body)
                .context("Failed to read post body from stdin")?;
            let new_post = commands::NewPost {
                title: args.title,
                excerpt: args.excerpt,
                category,
                date: args.date,
                slug: args.slug,
                body,
            };
            commands::create(new_post, &posts_dir, &mut out)
        }
        Command::Delete { slug } => commands::delete(&slug, &posts_dir()?, &mut out),
    }
}

fn load_config() -> Result<Option<Config>> {
    Config::load().context("Failed to load config file")
}

/// The command line wins over the config file, which is only read when no
/// directory was given
fn resolve_posts_dir(
    from_cli: Option<PathBuf>,
    load_config: impl FnOnce() -> Result<Option<Config>>,
) -> Result<PathBuf> {
    let (posts_dir, source) = match from_cli {
        Some(path) => (path, "--posts-dir".to_string()),
        None => match load_config()? {
            Some(config) => (
                config.posts_path,
                format!("config file '{}'", Config::config_path().display()),
            ),
            None => bail!(
                "No posts directory given. Pass --posts-dir or create a config file at {}",
                Config::config_path().display()
            ),
        },
    };

    io::validate_posts_dir(&posts_dir)
        .with_context(|| format!("Posts path '{}' from {source} is invalid", posts_dir.display()))?;
    log::debug!("Using posts directory {}", posts_dir.display());
    Ok(posts_dir)
}
