use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hackstories::app::AppContext;
use hackstories::cli::{commands, Cli, Commands};
use hackstories::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Tui))?;

    let mut config = Config::load()?;
    if let Some(trigger) = cli.trigger {
        config.search.trigger = trigger;
    }

    let ctx = AppContext::new(cli.db, config)?;

    match cli.command {
        Commands::Tui => {
            hackstories::tui::run(Arc::new(ctx)).await?;
        }
        Commands::Search { query } => {
            commands::search(&ctx, query).await?;
        }
        Commands::Term => {
            commands::show_term(&ctx)?;
        }
    }

    Ok(())
}

/// The TUI owns the terminal, so its logs go to a file in the data directory.
fn init_tracing(to_file: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env();

    if to_file {
        let path = AppContext::data_dir()?.join("hackstories.log");
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    Ok(())
}
