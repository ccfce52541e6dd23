//! Component factory: builds AppComponents from config. Isolates assembly logic from the runner.

use anyhow::Result;
use chat_router::{ContextRouter, LongMemoryService};
use embedding::EmbeddingService;
use llm_client::{LlmClient, OpenAILlmClient};
use memory_inmemory::InMemoryVectorStore;
use memory_retriever::{EmbeddingRetriever, VectorStore};
use memory_sqlite::SQLiteVectorStore;
use openai_embedding::OpenAIEmbedding;
use std::sync::Arc;
use storage::{
    ChatTurnRepository, ChatTurnStore, LongMemoryRepository, LongMemoryStore, SqlitePoolManager,
    UserRepository, UserStore,
};
use tracing::{error, info, instrument};
use web_search::WebSearch;

use crate::config::{AppConfig, VectorStoreConfig, VectorStoreKind};

/// Everything the HTTP layer and the CLI commands need.
pub struct AppComponents {
    pub router: Arc<ContextRouter>,
    pub memories: LongMemoryService,
    pub users: Arc<dyn UserStore>,
    pub turns: Arc<dyn ChatTurnStore>,
    /// Also used by `load` to index a corpus.
    pub retriever: Arc<EmbeddingRetriever>,
}

/// Creates the vector store behind the similarity retriever.
#[instrument(skip(config), fields(kind = ?config.kind))]
pub async fn create_vector_store(config: &VectorStoreConfig) -> Result<Arc<dyn VectorStore>> {
    let store: Arc<dyn VectorStore> = match config.kind {
        VectorStoreKind::Sqlite => {
            info!(db_path = %config.path, "Using SQLite vector store");
            Arc::new(SQLiteVectorStore::new(&config.path).await.map_err(|e| {
                error!(error = %e, "Failed to initialize SQLite vector store");
                anyhow::anyhow!("Failed to initialize SQLite vector store: {}", e)
            })?)
        }
        VectorStoreKind::Memory => {
            info!("Using in-memory vector store");
            Arc::new(InMemoryVectorStore::new())
        }
    };
    Ok(store)
}

/// Opens the database, wires providers and builds the router.
#[instrument(skip(config))]
pub async fn build_components(config: &AppConfig) -> Result<AppComponents> {
    let pool = SqlitePoolManager::new(&config.base.database_url)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.base.database_url,
                "Failed to initialize chat storage"
            );
            anyhow::anyhow!("Failed to initialize chat storage: {}", e)
        })?;

    let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.clone()));
    let turns: Arc<dyn ChatTurnStore> = Arc::new(ChatTurnRepository::new(pool.clone()));
    let long_memory: Arc<dyn LongMemoryStore> = Arc::new(LongMemoryRepository::new(pool));

    let llm: Arc<dyn LlmClient> = Arc::new(OpenAILlmClient::from_config(&config.llm));
    let embedding: Arc<dyn EmbeddingService> =
        Arc::new(OpenAIEmbedding::from_config(&config.embedding));
    let vector_store = create_vector_store(&config.vector_store).await?;
    let retriever = Arc::new(
        EmbeddingRetriever::new(embedding, vector_store)
            .with_min_score(config.vector_store.min_score),
    );

    let mut router = ContextRouter::new(turns.clone(), llm, retriever.clone())
        .with_long_memory(long_memory.clone())
        .with_classifier(config.router.classifier()?)
        .with_persona(config.router.persona.clone())
        .with_settings(config.router.settings.clone());

    match config.search.build() {
        Some(search) => {
            info!(base_url = %search.base_url(), "Realtime web search enabled");
            let search: Arc<dyn WebSearch> = Arc::new(search);
            router = router.with_search(search);
        }
        None => info!("TAVILY_API_KEY not set, realtime questions use retrieval only"),
    }

    Ok(AppComponents {
        router: Arc::new(router),
        memories: LongMemoryService::new(long_memory),
        users,
        turns,
        retriever,
    })
}
