use anyhow::Result;
use chat_core::init_tracing;
use chat_server::{run, AppConfig, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    init_tracing(config.base.log_file.as_deref(), config.base.json_logs())?;

    run(config, cli.command).await
}
