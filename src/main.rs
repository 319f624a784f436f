use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use art_catalog::cli_style::get_styles;
use art_catalog::config::{AppConfig, FileConfig};
use art_catalog::console::{run_menu, RustylineReader};
use art_catalog::SqliteCatalogStore;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles = get_styles())]
struct CliArgs {
    /// Path to the SQLite catalog database file. Created on first use.
    #[clap(value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// Path to an optional TOML config file, its values override the
    /// command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(cli_args.db_path, file_config)?;

    info!("Opening art catalog database at {:?}", config.db_path);
    let store = SqliteCatalogStore::new(&config.db_path)?;

    let mut reader = RustylineReader::new()?;
    run_menu(&store, &mut reader)
}
