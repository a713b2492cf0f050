mod browse;
mod collect;
mod import;
mod sitemap;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::browse::BrowseOptions;

#[derive(Debug, Parser)]
#[command(name = "biaslens-cli")]
#[command(about = "BiasLens command line interface")]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, global = true, env = "BIASLENS_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Import analysed articles from a JSON file into the store
    Import {
        /// Path to a JSON array of article objects
        file: PathBuf,

        /// Parse and report what would be imported without writing
        #[arg(long)]
        dry_run: bool,

        /// Source label applied to every record, replacing its own
        #[arg(long, value_name = "LABEL")]
        source: Option<String>,
    },
    /// Fetch an RSS or Atom feed and write its entries as an import file
    CollectRss {
        /// Feed URL
        url: String,

        /// Source label recorded on each entry
        #[arg(long, default_value = "RSS")]
        source: String,

        /// Destination JSON file
        #[arg(long, default_value = "rss_articles.json")]
        output: PathBuf,

        /// Request timeout in seconds
        #[arg(long, env = "BIASLENS_CLIENT_TIMEOUT_SECS", default_value_t = 30)]
        timeout_secs: u64,
    },
    /// Fetch articles from the API and print them as cards
    Browse {
        /// Base URL of the BiasLens API
        #[arg(long, env = "BIASLENS_API_URL", default_value = "http://localhost:3000")]
        api_url: String,

        /// Request timeout in seconds
        #[arg(long, env = "BIASLENS_CLIENT_TIMEOUT_SECS", default_value_t = 30)]
        timeout_secs: u64,

        /// Case-insensitive substring matched against title and description
        #[arg(long, default_value = "")]
        search: String,

        /// Bias label to keep, or "all"
        #[arg(long, default_value = "all")]
        bias: String,

        /// Group articles by source
        #[arg(long)]
        grouped: bool,

        /// Toggle a source group open; repeating a source closes it again
        #[arg(long = "expand", value_name = "SOURCE")]
        expand: Vec<String>,

        /// Start with every source group expanded
        #[arg(long)]
        expand_all: bool,
    },
    /// Write sitemap.xml from the site config and stored articles
    Sitemap {
        /// Destination file
        #[arg(long, default_value = "sitemap.xml")]
        output: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Db { command }) => run_db(command).await,
        Some(Commands::Import {
            file,
            dry_run,
            source,
        }) => {
            if dry_run {
                import::run_import_dry_run(&file, source.as_deref())
            } else {
                let (_, pool) = connect().await?;
                import::run_import(&pool, &file, source.as_deref()).await
            }
        }
        Some(Commands::CollectRss {
            url,
            source,
            output,
            timeout_secs,
        }) => collect::run_collect_rss(&url, &source, &output, timeout_secs).await,
        Some(Commands::Browse {
            api_url,
            timeout_secs,
            search,
            bias,
            grouped,
            expand,
            expand_all,
        }) => {
            let options = BrowseOptions {
                search,
                bias,
                grouped,
                expand,
                expand_all,
            };
            browse::run_browse(&api_url, timeout_secs, &options).await
        }
        Some(Commands::Sitemap { output }) => {
            let (config, pool) = connect().await?;
            let site = biaslens_core::load_site_config(&config.site_path)?;
            sitemap::run_sitemap(&pool, &site, &output).await
        }
        None => {
            println!("biaslens-cli: use --help to list commands");
            Ok(())
        }
    }
}

async fn connect() -> anyhow::Result<(biaslens_core::AppConfig, sqlx::PgPool)> {
    let config = biaslens_core::load_app_config()?;
    let pool_config = biaslens_db::PoolConfig::from_app_config(&config);
    let pool = biaslens_db::connect_pool(&config.database_url, pool_config).await?;
    Ok((config, pool))
}

async fn run_db(command: DbCommands) -> anyhow::Result<()> {
    let (_, pool) = connect().await?;
    match command {
        DbCommands::Ping => {
            biaslens_db::ping(&pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = biaslens_db::run_migrations(&pool).await?;
            tracing::info!(applied, "migrations complete");
            println!("applied {applied} migration(s)");
        }
    }
    Ok(())
}
