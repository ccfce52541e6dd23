//! # chat-core
//!
//! Types shared by every layer of the chat backend: the [`ChatError`] taxonomy,
//! the [`ChatResult`] returned by the context router, and [`init_tracing`].

pub mod error;
pub mod logger;
pub mod types;

pub use error::{ChatError, Result};
pub use logger::init_tracing;
pub use types::{ChatResult, ContextItem, ResponsePath};
