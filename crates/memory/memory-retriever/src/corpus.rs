//! JSON Lines corpus import.
//!
//! Each non-blank line is a JSON string or an object with `content` / `page_content` / `text`
//! and optional `metadata`. Malformed lines are counted and skipped.

use std::path::Path;

use memory_core::RetrievedDocument;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::retriever::EmbeddingRetriever;

/// Outcome of a corpus load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadResult {
    pub loaded: usize,
    pub skipped: usize,
    pub elapsed_secs: u64,
}

/// Parses one corpus line. `Ok(None)` for blank lines.
pub fn parse_corpus_line(line: &str) -> Result<Option<RetrievedDocument>, anyhow::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(line)?;
    let document = RetrievedDocument::from_json(&value)
        .ok_or_else(|| anyhow::anyhow!("line has no content/page_content/text field"))?;
    if document.content.trim().is_empty() {
        anyhow::bail!("document content is empty");
    }
    Ok(Some(document))
}

/// Reads `path` and indexes its documents in batches of `batch_size`.
pub async fn load_corpus(
    retriever: &EmbeddingRetriever,
    path: &Path,
    batch_size: usize,
) -> Result<LoadResult, anyhow::Error> {
    let start_time = std::time::Instant::now();
    let batch_size = batch_size.max(1);
    info!("Loading corpus from {}", path.display());

    let file = tokio::fs::File::open(path).await?;
    let mut lines = BufReader::new(file).lines();

    let mut result = LoadResult::default();
    let mut batch: Vec<RetrievedDocument> = Vec::with_capacity(batch_size);
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        match parse_corpus_line(&line) {
            Ok(Some(document)) => batch.push(document),
            Ok(None) => {}
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping malformed corpus line");
                result.skipped += 1;
            }
        }

        if batch.len() >= batch_size {
            result.loaded += retriever.index_batch(std::mem::take(&mut batch)).await?;
            info!("Indexed {} documents so far", result.loaded);
        }
    }
    if !batch.is_empty() {
        result.loaded += retriever.index_batch(batch).await?;
    }

    result.elapsed_secs = start_time.elapsed().as_secs();
    info!(
        loaded = result.loaded,
        skipped = result.skipped,
        elapsed_secs = result.elapsed_secs,
        "Corpus load finished"
    );
    Ok(result)
}
