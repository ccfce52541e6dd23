//! Chat server: env config, component wiring, HTTP API and CLI commands.

pub mod api;
pub mod cli;
pub mod components;
pub mod config;
pub mod runner;

pub use api::{create_router, serve, AppState};
pub use cli::{Cli, Commands};
pub use components::{build_components, create_vector_store, AppComponents};
pub use config::AppConfig;
pub use runner::run;
