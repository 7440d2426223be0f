//! Scripted collaborators shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;

use crate::config::Config;
use crate::llm_client::{LanguageModel, LlmError};
use crate::render::{DocumentRenderer, QuestionDocument, RenderError};
use crate::search::{SearchError, SearchHit, SearchProvider};
use crate::state::AppState;
use crate::storage::{ObjectStore, StorageError};
use crate::workflow::models::{InterviewQuestion, SelectedPaper};
use crate::workflow::prompts::{
    GENERATOR_SYSTEM, LINKEDIN_SYSTEM, PLANNER_SYSTEM, REFINE_SYSTEM, REVIEWER_SYSTEM,
    SELECTOR_SYSTEM, TOPICS_SYSTEM,
};
use crate::workflow::Step;

/// Feedback returned once the scripted reviews run out.
pub const DEFAULT_REJECTION: &str = "Needs more depth";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

#[derive(Default)]
struct Script {
    calls: Vec<(Step, RecordedCall)>,
    generations: VecDeque<String>,
    reviews: VecDeque<String>,
}

/// A `LanguageModel` that answers from a script, keyed on which step's system prompt it sees.
pub struct ScriptedLlm {
    planner: String,
    selector: String,
    topics: String,
    linkedin_post: String,
    default_generation: String,
    failing: Option<Step>,
    script: Mutex<Script>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self {
            planner: "q1, q2, q3".to_string(),
            selector: selection_json("Paper A", "https://example.org/a"),
            topics: "Speculative Decoding, KV Cache Optimization".to_string(),
            linkedin_post: "You're in a Senior ML Engineer interview...".to_string(),
            default_generation: question_json(
                "Your p99 latency doubles when batch size grows. Why?",
                "",
            ),
            failing: None,
            script: Mutex::new(Script {
                reviews: VecDeque::from(vec!["APPROVE".to_string()]),
                ..Script::default()
            }),
        }
    }

    pub fn with_planner(mut self, raw: &str) -> Self {
        self.planner = raw.to_string();
        self
    }

    pub fn with_selector(mut self, raw: &str) -> Self {
        self.selector = raw.to_string();
        self
    }

    pub fn with_topics(mut self, raw: &str) -> Self {
        self.topics = raw.to_string();
        self
    }

    pub fn with_linkedin_post(mut self, post: &str) -> Self {
        self.linkedin_post = post.to_string();
        self
    }

    /// Queued generator answers; the default draft is used once the queue is empty.
    pub fn with_generations(self, generations: Vec<String>) -> Self {
        self.script.lock().unwrap().generations = generations.into();
        self
    }

    /// Queued reviewer answers; `DEFAULT_REJECTION` once the queue is empty.
    pub fn with_reviews(self, reviews: Vec<&str>) -> Self {
        self.script.lock().unwrap().reviews = reviews.into_iter().map(String::from).collect();
        self
    }

    pub fn failing_on(mut self, step: Step) -> Self {
        self.failing = Some(step);
        self
    }

    pub fn calls_for(&self, step: Step) -> Vec<RecordedCall> {
        self.script
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(s, _)| *s == step)
            .map(|(_, call)| call.clone())
            .collect()
    }
}

/// Text of a prompt constant up to its first placeholder.
fn fixed_head(template: &str) -> &str {
    template.split('{').next().unwrap_or(template)
}

fn step_for(system: &str) -> Step {
    let table = [
        (PLANNER_SYSTEM, Step::QueryPlanning),
        (TOPICS_SYSTEM, Step::TopicPlanning),
        (SELECTOR_SYSTEM, Step::PaperSelection),
        (GENERATOR_SYSTEM, Step::QuestionGeneration),
        (REFINE_SYSTEM, Step::QuestionGeneration),
        (REVIEWER_SYSTEM, Step::Review),
        (LINKEDIN_SYSTEM, Step::LinkedInPost),
    ];
    table
        .iter()
        .find(|(base, _)| system.starts_with(fixed_head(base)))
        .map(|(_, step)| *step)
        .unwrap_or_else(|| panic!("unrecognised system prompt: {system}"))
}

#[async_trait]
impl LanguageModel for ScriptedLlm {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let step = step_for(system);
        let mut script = self.script.lock().unwrap();
        script.calls.push((
            step,
            RecordedCall {
                system: system.to_string(),
                prompt: prompt.to_string(),
                temperature,
            },
        ));

        if self.failing == Some(step) {
            return Err(LlmError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }

        Ok(match step {
            Step::QueryPlanning => self.planner.clone(),
            Step::TopicPlanning => self.topics.clone(),
            Step::PaperSelection => self.selector.clone(),
            Step::QuestionGeneration => script
                .generations
                .pop_front()
                .unwrap_or_else(|| self.default_generation.clone()),
            Step::Review => script
                .reviews
                .pop_front()
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            Step::LinkedInPost => self.linkedin_post.clone(),
        })
    }
}

/// A `SearchProvider` that returns the same hits for every query.
pub struct StubSearch {
    hits: Vec<SearchHit>,
    fail: bool,
    failing_queries: Vec<String>,
    queries: Mutex<Vec<String>>,
}

impl StubSearch {
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            fail: false,
            failing_queries: Vec::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Only `query` errors; every other query still gets the hits.
    pub fn failing_for(mut self, query: &str) -> Self {
        self.failing_queries.push(query.to_string());
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_hits(Vec::new())
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail || self.failing_queries.iter().any(|q| q == query) {
            return Err(SearchError::Api {
                status: 401,
                message: "Invalid API key".to_string(),
            });
        }
        Ok(self.hits.clone())
    }
}

/// Renderer that skips the PDF library.
pub struct StubRenderer {
    pub fail: bool,
}

impl DocumentRenderer for StubRenderer {
    fn render(&self, document: &QuestionDocument) -> Result<Bytes, RenderError> {
        if self.fail {
            return Err(RenderError::Pdf("font table missing".to_string()));
        }
        Ok(Bytes::from(format!("%PDF-stub {}", document.sections.len())))
    }
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
}

/// In-memory object store; URLs point at `https://cdn.test/`.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("https://cdn.test/{key}"))
    }
}

/// Store whose uploads are always refused by the remote side.
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn upload(
        &self,
        key: &str,
        _body: Bytes,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        Err(StorageError::Upload {
            key: key.to_string(),
            message: "AccessDenied".to_string(),
        })
    }
}

/// Config with every collaborator configured.
pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("OPENAI_API_KEY", "sk-test"),
        ("SERPAPI_API_KEY", "serp-test"),
        ("S3_ENDPOINT_URL", "https://nyc3.digitaloceanspaces.com"),
        ("S3_ACCESS_KEY_ID", "key"),
        ("S3_SECRET_ACCESS_KEY", "secret"),
        ("S3_BUCKET_NAME", "questions"),
        ("REQUEST_TIMEOUT_SECS", "5"),
    ]);
    Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap()
}

pub fn test_state(llm: ScriptedLlm, search: StubSearch, store: Arc<dyn ObjectStore>) -> AppState {
    AppState {
        llm: Arc::new(llm),
        search: Arc::new(search),
        renderer: Arc::new(StubRenderer { fail: false }),
        store,
        config: test_config(),
    }
}

pub fn hit(title: &str, url: &str) -> SearchHit {
    SearchHit {
        title: Some(title.to_string()),
        link: Some(url.to_string()),
        snippet: Some(format!("Abstract of {title}")),
    }
}

pub fn selection_json(title: &str, url: &str) -> String {
    json!({
        "title": title,
        "authors": "Doe et al.",
        "summary": "Core contribution of the paper",
        "url": url,
        "reason": "Covers the failure modes in depth"
    })
    .to_string()
}

pub fn question_json(question: &str, citation: &str) -> String {
    json!({
        "question": question,
        "wrong_answer": "Just add more GPUs.",
        "explanation": "Memory bandwidth, not compute, is the bottleneck.",
        "citation": citation
    })
    .to_string()
}

pub fn sample_paper() -> SelectedPaper {
    SelectedPaper {
        title: "Efficient Memory Management for LLM Serving with PagedAttention".to_string(),
        authors: Some("Kwon et al.".to_string()),
        summary: "Paged KV cache allocation".to_string(),
        url: "https://arxiv.org/abs/2309.06180".to_string(),
        reason: "Explains KV cache fragmentation".to_string(),
    }
}

pub fn sample_question(topic: &str) -> InterviewQuestion {
    InterviewQuestion {
        topic: topic.to_string(),
        question: "Your GPU memory is full at batch size 8. What do you change?".to_string(),
        wrong_answer: "Buy bigger GPUs.".to_string(),
        explanation: "Paged KV cache allocation removes fragmentation.".to_string(),
        citation: "PagedAttention - Kwon et al. (https://arxiv.org/abs/2309.06180)".to_string(),
    }
}
