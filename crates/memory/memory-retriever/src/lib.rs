//! # Memory Retriever
//!
//! Turns a query string into the top-k most similar stored documents.
//!
//! - [`SimilarityRetriever`]: the capability the context router depends on
//! - [`EmbeddingRetriever`]: embeds the query, searches a [`VectorStore`], filters by minimum score
//! - [`load_corpus`]: bulk-indexes a JSON Lines corpus file

mod corpus;
mod retriever;

pub use corpus::{load_corpus, parse_corpus_line, LoadResult};
pub use retriever::{EmbeddingRetriever, SimilarityRetriever};

pub use memory_core::{RetrievedDocument, VectorStore};
