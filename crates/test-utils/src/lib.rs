use async_trait::async_trait;
use repurpose::errors::{AiError, ExtractError};
use repurpose::providers::ai::{AiProvider, StructuredRequest};
use repurpose::providers::extract::ContentExtractor;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use url::Url;

// --- Fixtures ---

/// A Markdown article long enough to pass the content minimum, with a title,
/// byline, date and hero image the metadata extractor can find.
pub fn sample_article() -> String {
    [
        "# Shipping Rust Services Without Drama",
        "",
        "By Jane Smith",
        "Published March 5, 2025",
        "",
        "![hero](https://cdn.example.com/hero.png)",
        "",
        "Teams that move a service to Rust usually worry about the learning curve. In practice the \
         compiler does most of the teaching. This post walks through how we migrated a small \
         ingestion service, what broke along the way, and which habits made the rollout boring \
         in the best possible sense.",
        "",
        "Start with the boundaries. Keep the first version small and measure everything.",
    ]
    .join("\n")
}

/// Structured arguments that satisfy the repurposing schema.
pub fn valid_assets_json(extended: bool) -> Value {
    let mut value = json!({
        "linkedinPosts": [
            { "angle": "Educational", "content": "Here is what we learned migrating to Rust." },
            { "angle": "Controversial Take", "content": "Most rewrites fail. Ours did not, and here is why." },
            { "angle": "Personal Story", "content": "Six months ago I had never written Rust." }
        ],
        "twitterHooks": [
            { "type": "Question-based", "content": "What if your pager never rang again?" },
            { "type": "Bold Statement", "content": "The compiler is the best code reviewer we have." },
            { "type": "Story Hook", "content": "It started with one flaky service." }
        ],
        "metaDescription": "How a small team shipped a Rust service without drama.",
        "youtube": {
            "title": "Shipping Rust Without Drama",
            "description": "We migrated a service to Rust. Here is how. Learn what broke. Learn what worked."
        }
    });
    if extended {
        value["emailNewsletter"] = json!({
            "subjectLine": "Rust without drama",
            "previewText": "What we learned shipping our first Rust service",
            "body": "This week we wrote up our migration story."
        });
        value["instagramCarousel"] = json!({
            "slides": [
                { "slideNumber": 1, "text": "Rust rewrite? Read this first." },
                { "slideNumber": 2, "text": "Start with the boundaries." },
                { "slideNumber": 3, "text": "Read the full post." }
            ]
        });
        value["contentScore"] = json!({
            "readability": 82,
            "engagement": 74,
            "seoStrength": 68,
            "keywordDensity": "Balanced around 'Rust migration'",
            "summary": "Clear and practical with room for stronger keywords."
        });
    }
    value
}

// --- Mock AI Provider ---

/// A scripted outcome for one call to [`MockAiProvider`].
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Raw function-call arguments.
    Arguments(String),
    RateLimited,
    CreditsExhausted,
    Timeout,
    Status(u16, String),
    MissingToolCall,
}

impl MockReply {
    pub fn json(value: &Value) -> Self {
        MockReply::Arguments(value.to_string())
    }

    fn into_result(self) -> Result<String, AiError> {
        match self {
            MockReply::Arguments(args) => Ok(args),
            MockReply::RateLimited => Err(AiError::RateLimited),
            MockReply::CreditsExhausted => Err(AiError::CreditsExhausted),
            MockReply::Timeout => Err(AiError::Timeout),
            MockReply::Status(status, body) => Err(AiError::AiApi { status, body }),
            MockReply::MissingToolCall => Err(AiError::MissingToolCall),
        }
    }
}

/// What the provider saw on one call.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub function_name: String,
    pub parameters: Value,
}

/// Replays queued replies in order. Once the queue is empty the fallback reply
/// (if any) is used for every further call.
#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    fallback: Arc<Mutex<Option<MockReply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that answers every call with `reply`.
    pub fn always(reply: MockReply) -> Self {
        let mock = Self::new();
        mock.set_fallback(reply);
        mock
    }

    pub fn push_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn set_fallback(&self, reply: MockReply) {
        *self.fallback.lock().unwrap() = Some(reply);
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate_structured(
        &self,
        request: &StructuredRequest<'_>,
    ) -> Result<String, AiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: request.system_prompt.to_string(),
            user_prompt: request.user_prompt.to_string(),
            function_name: request.function_name.to_string(),
            parameters: request.parameters.clone(),
        });

        let queued = self.replies.lock().unwrap().pop_front();
        let reply = queued.or_else(|| self.fallback.lock().unwrap().clone());
        match reply {
            Some(reply) => reply.into_result(),
            None => Err(AiError::AiApi {
                status: 500,
                body: "MockAiProvider: no reply programmed".to_string(),
            }),
        }
    }
}

// --- Mock Extractor ---

#[derive(Clone, Debug)]
enum ExtractReply {
    Content(String),
    Status(u16),
    Timeout,
    Panic,
}

/// Returns a fixed outcome for every URL and records what it was asked for.
#[derive(Clone, Debug)]
pub struct MockExtractor {
    reply: ExtractReply,
    calls: Arc<Mutex<Vec<Url>>>,
}

impl MockExtractor {
    pub fn returning(content: impl Into<String>) -> Self {
        Self::with_reply(ExtractReply::Content(content.into()))
    }

    pub fn failing_with_status(status: u16) -> Self {
        Self::with_reply(ExtractReply::Status(status))
    }

    pub fn timing_out() -> Self {
        Self::with_reply(ExtractReply::Timeout)
    }

    /// Panics inside `extract_markdown`, standing in for a bug in a stage.
    pub fn panicking() -> Self {
        Self::with_reply(ExtractReply::Panic)
    }

    fn with_reply(reply: ExtractReply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_calls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentExtractor for MockExtractor {
    async fn extract_markdown(&self, url: &Url) -> Result<String, ExtractError> {
        self.calls.lock().unwrap().push(url.clone());
        match &self.reply {
            ExtractReply::Content(content) => Ok(content.clone()),
            ExtractReply::Status(status) => Err(ExtractError::Status {
                status: *status,
                body: "blocked".to_string(),
            }),
            ExtractReply::Timeout => Err(ExtractError::Timeout),
            ExtractReply::Panic => panic!("extractor state corrupted for {url}"),
        }
    }
}
