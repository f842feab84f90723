//! The `shelf` binary

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelf_cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::List(args) => commands::list::execute(args, &config).await,
            Commands::Add(args) => commands::add::execute(args, &config).await,
            Commands::Edit(args) => commands::edit::execute(args, &config).await,
            Commands::Delete(args) => commands::delete::execute(args, &config).await,
            Commands::Genres(args) => commands::genres::execute(args, &config).await,
        }
    })
}
