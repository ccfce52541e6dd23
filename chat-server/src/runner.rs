//! Command runners: serve, one-shot chat, corpus load.

use anyhow::Result;
use memory_retriever::load_corpus;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::api::{serve, AppState};
use crate::cli::Commands;
use crate::components::build_components;
use crate::config::AppConfig;

pub async fn run(config: AppConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Serve { bind } => run_server(config, bind).await,
        Commands::Chat { user_id, message } => run_chat(config, &user_id, &message).await,
        Commands::Load { file, batch_size } => run_load(config, &file, batch_size).await,
    }
}

async fn run_server(config: AppConfig, bind: Option<SocketAddr>) -> Result<()> {
    let addr = bind.unwrap_or(config.base.bind_addr);
    let components = build_components(&config).await?;
    let state = Arc::new(AppState::from_components(&components));
    serve(state, addr).await
}

async fn run_chat(config: AppConfig, user_id: &str, message: &str) -> Result<()> {
    let components = build_components(&config).await?;
    let result = components.router.respond(user_id, message).await?;
    println!("{}", result.answer);
    println!("[path: {}]", result.path);
    Ok(())
}

async fn run_load(config: AppConfig, file: &Path, batch_size: usize) -> Result<()> {
    let components = build_components(&config).await?;
    let result = load_corpus(&components.retriever, file, batch_size).await?;
    info!(
        loaded = result.loaded,
        skipped = result.skipped,
        elapsed_secs = result.elapsed_secs,
        "Corpus loaded"
    );
    println!(
        "Loaded {} documents ({} skipped) in {}s",
        result.loaded, result.skipped, result.elapsed_secs
    );
    Ok(())
}
