use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sectionsnap_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "sectionsnap")]
#[command(author, version, about = "A terminal long-page reader that snaps between sections")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Print the section layout of the page
    Sections {
        /// Page width in columns
        #[arg(short = 'w', long, default_value_t = 80)]
        width: u16,
        /// Viewport height in rows
        #[arg(short = 'H', long, default_value_t = 24)]
        height: u16,
    },
    /// Replay scroll positions against an in-memory page
    Simulate {
        /// Section start offsets
        #[arg(long, value_delimiter = ',', default_value = "0,800,1600,4000")]
        starts: Vec<f64>,
        /// Viewport height
        #[arg(long, default_value_t = 800.0)]
        viewport: f64,
        /// Document height (defaults to last start plus one viewport)
        #[arg(long)]
        document: Option<f64>,
        /// Scroll offsets to apply, in order
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "750,1000,2200,3700")]
        scroll: Vec<f64>,
    },
    /// Fetch and list gallery photos
    Gallery {
        /// Remove the local gallery cache instead
        #[arg(long)]
        clear: bool,
    },
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        // The TUI owns the terminal, so logs go to a file in the data dir
        let data_dir = config.data_dir();
        std::fs::create_dir_all(&data_dir)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join("sectionsnap.log"))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let is_tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, is_tui)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Sections { width, height }) => {
            commands::sections::run(&config, width, height)
        }
        Some(Commands::Simulate {
            starts,
            viewport,
            document,
            scroll,
        }) => commands::simulate::run(&config, &starts, viewport, document, &scroll),
        Some(Commands::Gallery { clear }) => commands::gallery::run(&config, clear).await,
    }
}
