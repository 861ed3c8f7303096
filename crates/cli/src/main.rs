use anyhow::Result;
use clap::Parser;
use ton_cli::args::Cli;
use ton_cli::commands;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose.into());

    let config = cli.load_config()?;
    debug!(?config, "configuration loaded");

    let output = commands::execute(&cli, &config).await?;
    println!("{output}");
    Ok(())
}

fn init_tracing(level: tracing::Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
