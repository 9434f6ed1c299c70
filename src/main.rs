use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stepform::app::App;
use stepform::config::Config;
use stepform::form::{store, summary};
use stepform::logging;
use stepform::ui::terminal::install_panic_hook;

#[derive(Parser)]
#[command(name = "stepform")]
#[command(about = "Multi-step form with validated steps and saved progress")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the summary of the saved answers
    Show {
        /// Print the raw form data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete the saved answers
    Reset,

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Show { json }) => cmd_show(&config, json)?,
        Some(Commands::Reset) => cmd_reset(&config)?,
        Some(Commands::Config) => print!("{}", config.to_toml()?),
        None => run_tui(config, logging_handle.log_file_path).await?,
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    install_panic_hook();

    let mut app = App::new(config);
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_show(config: &Config, json: bool) -> Result<()> {
    let slot = config.snapshot_slot();
    let Some(data) = store::read_snapshot(&slot)
        .with_context(|| format!("Failed to read saved answers at {}", slot.path().display()))?
    else {
        println!("No saved answers");
        return Ok(());
    };

    if json {
        let output =
            serde_json::to_string_pretty(&data).context("Failed to serialize form data")?;
        println!("{}", output);
    } else {
        print!("{}", summary::project(&data));
    }
    Ok(())
}

fn cmd_reset(config: &Config) -> Result<()> {
    let slot = config.snapshot_slot();
    store::clear(&slot)
        .with_context(|| format!("Failed to remove {}", slot.path().display()))?;
    println!("Saved answers removed");
    Ok(())
}
