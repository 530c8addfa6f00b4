//! Data maintenance commands for the club's posts and image bucket.

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use gambit_core::ports::PostRepository;
use gambit_infra::{DatabaseConfig, PostgresPostRepository, SupabaseConfig, SupabaseStorage};

#[derive(Parser)]
#[command(name = "content-tools")]
#[command(about = "Maintenance commands for Gambit posts and images")]
#[command(version)]
struct Cli {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import Markdown posts with front matter, updating posts whose slug exists
    ImportPosts {
        /// Directory holding the `.md` files
        #[arg(long)]
        dir: PathBuf,
    },

    /// Upload every image in a directory to the bucket, overwriting existing objects
    UploadImages {
        #[arg(long)]
        dir: PathBuf,
    },

    /// Promote the first image of each post to its featured image
    ExtractFeaturedImages,

    /// Rewrite dates like "29 de Marzo" as YYYY-MM-DD
    FixDates {
        /// Year assumed for dates that do not name one
        #[arg(long, default_value_t = 2022)]
        year: i32,
    },

    /// Report posts whose date is not YYYY-MM-DD
    CheckDates,

    /// Strip ordering prefixes such as "1." from slugs
    CleanSlugs,

    /// Replace a post with the contents of a Markdown file
    RestorePost {
        /// Post id
        #[arg(long)]
        id: Uuid,

        /// Markdown file with front matter
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,content_tools=debug")),
        )
        .init();

    let cli = Cli::parse();
    let database_url = cli.database_url;

    let summary = match cli.command {
        Commands::ImportPosts { dir } => {
            let posts = connect(database_url).await?;
            commands::posts::import_posts(posts.as_ref(), &dir).await?
        }
        Commands::UploadImages { dir } => {
            let config = SupabaseConfig::from_env().context(
                "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY must be set to upload images",
            )?;
            let storage = SupabaseStorage::new(config);
            commands::images::upload_images(&storage, &dir).await?
        }
        Commands::ExtractFeaturedImages => {
            let posts = connect(database_url).await?;
            commands::images::extract_featured_images(posts.as_ref()).await?
        }
        Commands::FixDates { year } => {
            let posts = connect(database_url).await?;
            commands::dates::fix_dates(posts.as_ref(), year).await?
        }
        Commands::CheckDates => {
            let posts = connect(database_url).await?;
            commands::dates::check_dates(posts.as_ref()).await?
        }
        Commands::CleanSlugs => {
            let posts = connect(database_url).await?;
            commands::slugs::clean_slugs(posts.as_ref()).await?
        }
        Commands::RestorePost { id, file } => {
            let posts = connect(database_url).await?;
            commands::posts::restore_post(posts.as_ref(), id, &file).await?
        }
    };

    tracing::info!(%summary, "Done");
    Ok(())
}

async fn connect(database_url: Option<String>) -> anyhow::Result<Arc<dyn PostRepository>> {
    let Some(url) = database_url else {
        bail!("DATABASE_URL must be set");
    };

    let conn = DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 1,
    }
    .connect()
    .await
    .context("failed to connect to the database")?;

    Ok(Arc::new(PostgresPostRepository::new(conn)))
}
