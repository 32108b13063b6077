use std::sync::Arc;

use crate::core::config::{validate_config, AppConfig, AppPaths, ConfigService};
use crate::faq::{load_corpus, FaqIndex};
use crate::graph::{build_support_graph, GraphRuntime};
use crate::knowledge::{PageStore, SqlitePageStore};
use crate::llm::{ChatProvider, EmbeddingProvider, OpenRouterProvider};

pub mod error;

use error::InitializationError;

/// Global application state shared across all routes.
///
/// Everything here is read-only after startup: the configuration, the FAQ
/// index with its precomputed embeddings, and the answer graph. The page
/// store holds no connection of its own; it opens one per search.
#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub config: AppConfig,
    pub page_store: Arc<dyn PageStore>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub chat_provider: Arc<dyn ChatProvider>,
    pub faq_index: Arc<FaqIndex>,
    pub graph_runtime: Arc<GraphRuntime>,
}

impl AppState {
    /// Initializes the application state.
    ///
    /// This process includes:
    /// 1. Resolving paths and loading + validating configuration
    /// 2. Creating the hosted-model provider (chat + embeddings)
    /// 3. Bootstrapping the knowledge-base schema
    /// 4. Loading the FAQ corpus and embedding it once
    /// 5. Building the answer graph
    pub async fn initialize() -> Result<Arc<Self>, InitializationError> {
        let paths = Arc::new(AppPaths::new());
        let config = ConfigService::new(paths.clone())
            .load()
            .map_err(|e| InitializationError::Config(e.into()))?;
        validate_config(&config).map_err(|e| InitializationError::Config(e.into()))?;

        let provider =
            OpenRouterProvider::new(&config.llm).map_err(|e| InitializationError::Llm(e.into()))?;
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(provider.clone());
        let chat_provider: Arc<dyn ChatProvider> = Arc::new(provider);

        let page_store = SqlitePageStore::new(paths.db_path.clone());
        page_store
            .ensure_schema()
            .await
            .map_err(|e| InitializationError::Knowledge(e.into()))?;

        let corpus = match load_corpus(&paths.corpus_path) {
            Ok(corpus) => corpus,
            Err(err) => {
                tracing::warn!("FAQ corpus not loaded ({}); semantic matching disabled", err);
                Vec::new()
            }
        };
        let faq_index = FaqIndex::build(
            corpus,
            embedder.as_ref(),
            config.faq.similarity_threshold,
        )
        .await
        .map_err(|e| InitializationError::Faq(e.into()))?;

        let graph_runtime =
            Arc::new(build_support_graph().map_err(|e| InitializationError::Graph(e.into()))?);

        Ok(Arc::new(AppState {
            paths,
            config,
            page_store: Arc::new(page_store),
            embedder,
            chat_provider,
            faq_index: Arc::new(faq_index),
            graph_runtime,
        }))
    }
}
