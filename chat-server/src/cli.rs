//! CLI parser.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chat-server")]
#[command(about = "Context-routed chat backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (config from env; --bind overrides BIND_ADDR).
    Serve {
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Answer one message and print the answer and the path that produced it.
    Chat {
        #[arg(short, long)]
        user_id: String,
        message: String,
    },
    /// Index a JSON Lines corpus into the vector store.
    Load {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long, default_value_t = 32)]
        batch_size: usize,
    },
}
