//! End-to-end tests for the /chat pipeline over the axum router, with the
//! external collaborators (page store, embedding service, hosted LLM)
//! replaced by mocks that count their invocations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use deskbot_backend::core::config::{AppConfig, AppPaths};
use deskbot_backend::faq::{FaqEntry, FaqIndex};
use deskbot_backend::graph::build_support_graph;
use deskbot_backend::graph::nodes::llm::{LLM_ERROR_REPLY, SERVER_ERROR_REPLY};
use deskbot_backend::intent::{response_for, Intent};
use deskbot_backend::knowledge::{PageRecord, PageStore, StoreError};
use deskbot_backend::llm::{ChatProvider, ChatRequest, EmbeddingProvider, ProviderError};
use deskbot_backend::server::handlers::chat::EMPTY_MESSAGE_PROMPT;
use deskbot_backend::server::router::router;
use deskbot_backend::state::AppState;

#[derive(Default)]
struct MockPageStore {
    page: Option<PageRecord>,
    fail: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl PageStore for MockPageStore {
    async fn search_best_match(&self, _query: &str) -> Result<Option<PageRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StoreError::Unavailable("mock backend down".to_string()));
        }
        Ok(self.page.clone())
    }
}

struct MockEmbedder {
    vector: Vec<f32>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    fn returning(vector: Vec<f32>) -> Self {
        Self {
            vector,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(inputs.iter().map(|_| self.vector.clone()).collect())
    }
}

enum ChatBehavior {
    Reply(&'static str),
    BadStatus(u16),
    Transport,
}

struct MockChatProvider {
    behavior: ChatBehavior,
    calls: AtomicUsize,
}

impl MockChatProvider {
    fn with(behavior: ChatBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn chat(&self, _request: ChatRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            ChatBehavior::Reply(reply) => Ok(reply.to_string()),
            ChatBehavior::BadStatus(status) => Err(ProviderError::BadStatus {
                status: *status,
                body: "upstream error".to_string(),
            }),
            ChatBehavior::Transport => {
                Err(ProviderError::Transport("connection timed out".to_string()))
            }
        }
    }
}

struct TestBackend {
    state: Arc<AppState>,
    store: Arc<MockPageStore>,
    embedder: Arc<MockEmbedder>,
    chat: Arc<MockChatProvider>,
    _dir: tempfile::TempDir,
}

fn faq_entry(question: &str, answer: &str) -> FaqEntry {
    FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

/// Index with a single entry embedded as [1, 0]; a query embedding of
/// [1, 0] scores 1.0 (hit), [0, 1] scores 0.0 (miss).
fn single_entry_index() -> FaqIndex {
    FaqIndex::new(
        vec![faq_entry("how long do refunds take?", "Five business days.")],
        vec![vec![1.0, 0.0]],
        0.6,
    )
    .expect("index builds")
}

fn backend(
    store: MockPageStore,
    embedder: MockEmbedder,
    chat: MockChatProvider,
    faq_index: FaqIndex,
) -> TestBackend {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(store);
    let embedder = Arc::new(embedder);
    let chat = Arc::new(chat);

    let state = Arc::new(AppState {
        paths: Arc::new(AppPaths::from_root(dir.path())),
        config: AppConfig::default(),
        page_store: store.clone(),
        embedder: embedder.clone(),
        chat_provider: chat.clone(),
        faq_index: Arc::new(faq_index),
        graph_runtime: Arc::new(build_support_graph().expect("graph builds")),
    });

    TestBackend {
        state,
        store,
        embedder,
        chat,
        _dir: dir,
    }
}

async fn post_chat(state: Arc<AppState>, body: Value) -> (StatusCode, Value) {
    let app = router(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes).expect("body is json");
    (status, value)
}

#[tokio::test]
async fn intent_match_short_circuits_the_pipeline() {
    let backend = backend(
        MockPageStore::default(),
        MockEmbedder::returning(vec![1.0, 0.0]),
        MockChatProvider::with(ChatBehavior::Reply("unused")),
        single_entry_index(),
    );

    let (status, body) = post_chat(backend.state.clone(), json!({ "message": "Hello there" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["answer"].as_str(),
        response_for(Intent::Greeting),
    );
    assert_eq!(backend.store.calls.load(Ordering::SeqCst), 0);
    assert_eq!(backend.embedder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(backend.chat.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn first_intent_in_table_order_wins() {
    let backend = backend(
        MockPageStore::default(),
        MockEmbedder::returning(vec![0.0, 1.0]),
        MockChatProvider::with(ChatBehavior::Reply("unused")),
        single_entry_index(),
    );

    // Triggers both "thanks" and "bye"; thanks comes first in the table.
    let (status, body) = post_chat(backend.state.clone(), json!({ "message": "thanks, bye" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"].as_str(), response_for(Intent::Thanks));
}

#[tokio::test]
async fn knowledge_match_returns_content_with_link() {
    let backend = backend(
        MockPageStore {
            page: Some(PageRecord {
                title: "Refund policy".to_string(),
                url: Some("https://example.com/refunds".to_string()),
                content: "Refunds are processed within five days.".to_string(),
            }),
            ..Default::default()
        },
        MockEmbedder::returning(vec![0.0, 1.0]),
        MockChatProvider::with(ChatBehavior::Reply("unused")),
        single_entry_index(),
    );

    let (status, body) = post_chat(
        backend.state.clone(),
        json!({ "message": "refund processing question" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["answer"].as_str().expect("answer present"),
        "Refunds are processed within five days.\n\n[Read more](https://example.com/refunds)"
    );
    assert_eq!(backend.store.calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.embedder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(backend.chat.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unmatched_message_reaches_the_llm_stage() {
    let backend = backend(
        MockPageStore::default(),
        MockEmbedder::returning(vec![0.0, 1.0]),
        MockChatProvider::with(ChatBehavior::Reply("Our warranty covers two years.")),
        single_entry_index(),
    );

    let (status, body) = post_chat(
        backend.state.clone(),
        json!({ "message": "explain your warranty coverage" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"].as_str(), Some("Our warranty covers two years."));
    assert_eq!(backend.store.calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.embedder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.chat.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn store_failure_degrades_to_faq_stage() {
    let backend = backend(
        MockPageStore {
            fail: true,
            ..Default::default()
        },
        MockEmbedder::returning(vec![1.0, 0.0]),
        MockChatProvider::with(ChatBehavior::Reply("unused")),
        single_entry_index(),
    );

    let (status, body) = post_chat(
        backend.state.clone(),
        json!({ "message": "refund duration question" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"].as_str(), Some("Five business days."));
    assert_eq!(backend.store.calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.chat.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn similarity_exactly_at_threshold_falls_through_to_llm() {
    // cosine([1,0], [3,4]) = 3/5 = 0.6, exactly at the default threshold.
    let index = FaqIndex::new(
        vec![faq_entry("how long do refunds take?", "Five business days.")],
        vec![vec![3.0, 4.0]],
        0.6,
    )
    .expect("index builds");

    let backend = backend(
        MockPageStore::default(),
        MockEmbedder::returning(vec![1.0, 0.0]),
        MockChatProvider::with(ChatBehavior::Reply("fallback reply")),
        index,
    );

    let (status, body) = post_chat(
        backend.state.clone(),
        json!({ "message": "refund duration question" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"].as_str(), Some("fallback reply"));
    assert_eq!(backend.chat.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_message_is_rejected_with_prompt() {
    let backend = backend(
        MockPageStore::default(),
        MockEmbedder::returning(vec![0.0, 1.0]),
        MockChatProvider::with(ChatBehavior::Reply("unused")),
        single_entry_index(),
    );

    for payload in [json!({ "message": "   " }), json!({})] {
        let (status, body) = post_chat(backend.state.clone(), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"].as_str(), Some(EMPTY_MESSAGE_PROMPT));
    }

    assert_eq!(backend.chat.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn llm_bad_status_maps_to_llm_error_reply() {
    let backend = backend(
        MockPageStore::default(),
        MockEmbedder::returning(vec![0.0, 1.0]),
        MockChatProvider::with(ChatBehavior::BadStatus(500)),
        single_entry_index(),
    );

    let (status, body) = post_chat(
        backend.state.clone(),
        json!({ "message": "explain your warranty coverage" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"].as_str(), Some(LLM_ERROR_REPLY));
}

#[tokio::test]
async fn llm_transport_failure_maps_to_server_error_reply() {
    let backend = backend(
        MockPageStore::default(),
        MockEmbedder::returning(vec![0.0, 1.0]),
        MockChatProvider::with(ChatBehavior::Transport),
        single_entry_index(),
    );

    let (status, body) = post_chat(
        backend.state.clone(),
        json!({ "message": "explain your warranty coverage" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"].as_str(), Some(SERVER_ERROR_REPLY));
    assert_ne!(LLM_ERROR_REPLY, SERVER_ERROR_REPLY);
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let backend = backend(
        MockPageStore::default(),
        MockEmbedder::returning(vec![0.0, 1.0]),
        MockChatProvider::with(ChatBehavior::Reply("unused")),
        single_entry_index(),
    );

    let app = router(backend.state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");

    assert_eq!(response.status(), StatusCode::OK);
}
