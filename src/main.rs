use std::path::PathBuf;

use clap::{Parser, Subcommand};

use mhome::app::App;
use mhome::config::{Config, default_log_path};
use mhome::error::{AppError, AppResult};
use mhome::feeds::{feed_client, fetch_bing_archive, write_image_list};
use mhome::logging::{LogTarget, Verbosity, init_logging};

#[derive(Debug, Parser)]
#[command(
    name = "mhome",
    version,
    about = "Terminal landing page with a multi-engine search box"
)]
struct Cli {
    /// Config file (default: $MHOME_CONFIG_PATH or ~/.config/mhome/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Search engine for this session only; the stored preference is kept.
    #[arg(long, value_name = "ID")]
    engine: Option<String>,
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
    #[arg(short, long)]
    quiet: bool,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Refresh the wallpaper list from the Bing image archive.
    FetchWallpapers {
        #[arg(short, long, default_value = "images.json")]
        output: PathBuf,
        #[arg(long, default_value_t = 8)]
        count: usize,
    },
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Some(CliCommand::FetchWallpapers { output, count }) => {
            init_logging(verbosity, LogTarget::Stderr)?;
            fetch_wallpapers(output, count).await
        }
        None => {
            let target = match cli.log_file.or_else(default_log_path) {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Disabled,
            };
            init_logging(verbosity, target)?;

            let config = Config::load(cli.config.as_deref())?;
            let mut app = App::new(config)?;
            if let Some(engine) = cli.engine.as_deref() {
                app.override_engine(engine)?;
            }
            app.run().await
        }
    }
}

async fn fetch_wallpapers(output: PathBuf, count: usize) -> AppResult<()> {
    let client = feed_client()?;
    let images = fetch_bing_archive(&client, count).await?;
    if images.is_empty() {
        return Err(AppError::invalid_argument(
            "image archive returned no wallpapers",
        ));
    }
    write_image_list(&output, &images)?;
    tracing::info!(count = images.len(), path = %output.display(), "wallpaper list written");
    println!("wrote {} wallpapers to {}", images.len(), output.display());
    Ok(())
}
