//! CLI entry point for adream-blog

use adream_blog::list::{PostFilter, SortKey};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "adream-blog")]
#[command(version)]
#[command(about = "Content toolkit for the Adream blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, tags or categories
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Case-insensitive search in title and description
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only posts carrying this tag
        #[arg(short, long, default_value = "")]
        tag: String,

        /// Only posts in this category
        #[arg(short = 'C', long, default_value = "")]
        category: String,

        /// Sort order (date-desc, date-asc, title-asc, title-desc)
        #[arg(short, long, default_value = "date-desc")]
        sort: SortKey,
    },

    /// Show a single post by slug
    Show {
        slug: String,

        /// Print the markdown body instead of HTML
        #[arg(long)]
        raw: bool,
    },

    /// List showcased projects
    Projects,

    /// Normalize front-matter of a markdown tree into an output tree
    Migrate {
        /// Source directory (defaults to ./docs_backup)
        source: Option<PathBuf>,

        /// Output directory (defaults to ./migrated-posts)
        output: Option<PathBuf>,
    },

    /// Create sample posts and projects for local development
    Seed,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "adream_blog=debug,info"
    } else {
        "adream_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::List {
            r#type,
            query,
            tag,
            category,
            sort,
        } => {
            let blog = adream_blog::Blog::new(&base_dir)?;
            let filter = PostFilter::new(query, tag, category);
            adream_blog::commands::list::run(&blog, &r#type, &filter, sort)?;
        }

        Commands::Show { slug, raw } => {
            let blog = adream_blog::Blog::new(&base_dir)?;
            adream_blog::commands::show::run(&blog, &slug, raw)?;
        }

        Commands::Projects => {
            let blog = adream_blog::Blog::new(&base_dir)?;
            adream_blog::commands::projects::run(&blog)?;
        }

        Commands::Migrate { source, output } => {
            let blog = adream_blog::Blog::new(&base_dir)?;
            tracing::info!("Starting migration...");
            adream_blog::commands::migrate::run(&blog, source.as_deref(), output.as_deref())?;
        }

        Commands::Seed => {
            let blog = adream_blog::Blog::new(&base_dir)?;
            let created = adream_blog::commands::seed::run(&blog)?;
            println!("Created {} sample files in {:?}", created.len(), base_dir);
        }

        Commands::Version => {
            println!("adream-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
