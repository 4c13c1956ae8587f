use std::{
    io::Write as _,
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, ConsoleCoordinator, FileTokenStore, MemoryTokenStore, TokenStore,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod orchestration;
mod render;

use commands::{parse_command, CommandError, HELP};
use orchestration::{dispatch, Flow};

#[derive(Parser, Debug)]
#[command(about = "Terminal console for the catalog admin API")]
struct Args {
    /// TOML settings file; `catalog_admin.toml` is read when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_base: Option<String>,
    #[arg(long)]
    api_path: Option<String>,
    #[arg(long)]
    token_file: Option<PathBuf>,
    /// Keep the token in memory only.
    #[arg(long)]
    ephemeral: bool,
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load console settings")?;
    if let Some(api_base) = args.api_base {
        settings.api_base = api_base;
    }
    if let Some(api_path) = args.api_path {
        settings.api_path = api_path;
    }
    if let Some(token_file) = args.token_file {
        settings.token_path = token_file;
    }
    let settings = settings
        .normalize()
        .context("invalid console settings")?;

    let store: Arc<dyn TokenStore> = if args.ephemeral {
        Arc::new(MemoryTokenStore::default())
    } else {
        Arc::new(FileTokenStore::new(settings.token_path.clone()))
    };
    tracing::info!(
        api_base = %settings.api_base,
        api_path = %settings.api_path,
        ephemeral = args.ephemeral,
        "starting catalog admin console"
    );

    let mut console =
        ConsoleCoordinator::new(&settings, store).context("failed to build API client")?;
    console.startup().await;

    let mut status = String::from("Type 'help' for commands.");
    show(&console, &status)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        status.clear();
        let flow = match parse_command(&line) {
            Ok(command) => dispatch(&mut console, command, &mut status).await,
            Err(CommandError::Empty) => Flow::Continue,
            Err(err) => {
                status = format!("{err}\n{HELP}");
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            break;
        }
        show(&console, &status)?;
    }

    Ok(())
}

fn show(console: &ConsoleCoordinator, status: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}\n> ", render::render(console, status))?;
    stdout.flush()?;
    Ok(())
}
