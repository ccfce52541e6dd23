//! # Memory Core
//!
//! Types and traits shared by the vector store implementations and the similarity retriever.
//!
//! - [`VectorDocument`]: a stored text with its embedding
//! - [`RetrievedDocument`]: the provider-agnostic `{content, metadata}` shape handed to callers
//! - [`VectorStore`]: add / delete / similarity search over documents

mod similarity;
mod store;
mod types;

pub use similarity::cosine_similarity;
pub use store::VectorStore;
pub use types::{RetrievedDocument, ScoredDocument, VectorDocument};
