//! Integration tests for the chat orchestration flow.
//!
//! These tests verify the end-to-end wiring:
//! 1. Startup validation proves the manifest is registered before traffic
//! 2. Tool intents dispatch through the registry with identity gating
//! 3. Conversation intents reach the model and map failures to envelope codes
//!
//! Uses in-memory tool and intent stubs plus the scripted mock model
//! provider, so no network is involved.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use salaat_assistant::adapters::gemini::MockModelProvider;
use salaat_assistant::application::{
    validate_startup, ChatHandler, ChatRequest, StartupError, ToolRegistry, AGENT_TOOLS,
};
use salaat_assistant::config::ChatConfig;
use salaat_assistant::domain::{
    ChatErrorCode, ConversationTurn, ParamMap, ToolError, ToolName, ToolResult, UserId,
};
use salaat_assistant::ports::{
    IntentExtractor, IntentResolution, ModelError, Tool, ToolFailure,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// In-memory tool returning a scripted result and counting calls.
struct StubTool {
    name: &'static str,
    result: ToolResult,
    calls: Arc<AtomicUsize>,
}

impl StubTool {
    fn new(name: &'static str, result: ToolResult) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name,
                result,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl Tool for StubTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "stub tool"
    }

    async fn call(
        &self,
        _identity: Option<UserId>,
        _params: &ParamMap,
    ) -> Result<ToolResult, ToolFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

/// Intent extractor that always resolves to the same intent.
struct StubIntents(IntentResolution);

#[async_trait]
impl IntentExtractor for StubIntents {
    async fn extract(&self, _message: &str) -> IntentResolution {
        self.0.clone()
    }
}

fn handler(
    registry: ToolRegistry,
    model: MockModelProvider,
    resolution: IntentResolution,
) -> ChatHandler {
    ChatHandler::new(
        Arc::new(registry),
        Arc::new(model),
        Arc::new(StubIntents(resolution)),
        ChatConfig::default(),
    )
}

fn object(value: serde_json::Value) -> ParamMap {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

// =============================================================================
// Startup Validation
// =============================================================================

#[test]
fn startup_fails_until_the_whole_manifest_is_registered() {
    let mut registry = ToolRegistry::new();

    // Register all but the last manifest tool: still fatal.
    for name in &AGENT_TOOLS[..AGENT_TOOLS.len() - 1] {
        let (tool, _) = StubTool::new(name.as_str(), ToolResult::ok_empty("ok"));
        registry.register(Arc::new(tool));
    }

    let err = validate_startup(&registry, &AGENT_TOOLS).unwrap_err();
    let StartupError::MissingTools { missing } = err;
    assert_eq!(missing, vec!["get_random_hadith"]);

    // Registering it completes the manifest.
    let (tool, _) = StubTool::new("get_random_hadith", ToolResult::ok_empty("ok"));
    registry.register(Arc::new(tool));
    assert_eq!(validate_startup(&registry, &AGENT_TOOLS).unwrap(), 12);
}

// =============================================================================
// Tool Branch
// =============================================================================

#[tokio::test]
async fn create_task_flow_produces_a_formatted_envelope() {
    let data = object(json!({
        "id": 42,
        "title": "Fajr",
        "priority": "high",
        "linked_prayer": "Fajr",
    }));
    let (tool, calls) = StubTool::new("create_task", ToolResult::ok(data));

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(tool));

    let handler = handler(
        registry,
        MockModelProvider::new(),
        IntentResolution::tool(ToolName::CreateTask, ParamMap::new()),
    );

    let envelope = handler
        .process_message(&ChatRequest::new("create a fajr task").with_identity(UserId::new(7)))
        .await;

    assert!(envelope.success);
    assert_eq!(envelope.tool_used.as_deref(), Some("create_task"));
    assert!(envelope.message.contains("Task created successfully"));
    assert!(envelope.message.contains("Fajr"));
    assert_eq!(envelope.data.unwrap()["id"], json!(42));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unauthenticated_mutating_intent_short_circuits_before_the_registry() {
    let (tool, calls) = StubTool::new("create_task", ToolResult::ok_empty("created"));
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(tool));

    let model = MockModelProvider::new();
    let handler = ChatHandler::new(
        Arc::new(registry),
        Arc::new(model),
        Arc::new(StubIntents(IntentResolution::tool(
            ToolName::CreateTask,
            ParamMap::new(),
        ))),
        ChatConfig::default(),
    );

    let envelope = handler.process_message(&ChatRequest::new("create a task")).await;

    assert!(!envelope.success);
    assert_eq!(envelope.error, Some(ChatErrorCode::AuthenticationRequired));
    assert!(envelope.message.is_empty());
    // Neither the registry nor the model was touched.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn public_lookups_need_no_identity() {
    let data = object(json!({
        "text": "Actions are judged by intentions.",
        "source": "Sahih al-Bukhari 1",
    }));
    let (tool, calls) = StubTool::new("get_daily_hadith", ToolResult::ok(data));

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(tool));

    let handler = handler(
        registry,
        MockModelProvider::new(),
        IntentResolution::tool(ToolName::GetDailyHadith, ParamMap::new()),
    );

    let envelope = handler.process_message(&ChatRequest::new("daily hadith")).await;

    assert!(envelope.success);
    assert!(envelope.message.contains("Actions are judged by intentions."));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn backend_failure_carries_the_tool_name_and_mapped_code() {
    let (tool, _) = StubTool::new(
        "list_tasks",
        ToolResult::fail(ToolError::NetworkError, "connect refused"),
    );
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(tool));

    let handler = handler(
        registry,
        MockModelProvider::new(),
        IntentResolution::tool(ToolName::ListTasks, ParamMap::new()),
    );

    let envelope = handler
        .process_message(&ChatRequest::new("show my tasks").with_identity(UserId::new(7)))
        .await;

    assert!(!envelope.success);
    assert_eq!(envelope.error, Some(ChatErrorCode::NetworkError));
    assert_eq!(envelope.tool_used.as_deref(), Some("list_tasks"));
}

#[tokio::test]
async fn unregistered_tool_surfaces_as_internal_error_without_leaking_names() {
    let handler = handler(
        ToolRegistry::new(),
        MockModelProvider::new(),
        IntentResolution::tool(ToolName::GetRandomHadith, ParamMap::new()),
    );

    let envelope = handler.process_message(&ChatRequest::new("a hadith please")).await;

    assert_eq!(envelope.error, Some(ChatErrorCode::InternalError));
    assert!(!envelope
        .error_message
        .unwrap()
        .contains("get_random_hadith"));
}

// =============================================================================
// Conversation Branch
// =============================================================================

#[tokio::test]
async fn conversation_reply_round_trips_through_the_model() {
    let handler = handler(
        ToolRegistry::new(),
        MockModelProvider::new().with_response("Wa alaikum assalam! How can I help?"),
        IntentResolution::conversation(),
    );

    let envelope = handler
        .process_message(
            &ChatRequest::new("Assalamualaikum").with_history(vec![
                ConversationTurn::user("hello"),
                ConversationTurn::assistant("hi"),
            ]),
        )
        .await;

    assert!(envelope.success);
    assert_eq!(envelope.message, "Wa alaikum assalam! How can I help?");
    assert!(envelope.tool_used.is_none());
    assert!(envelope.error.is_none());
}

#[tokio::test]
async fn quota_exhaustion_maps_to_quota_exceeded_with_empty_message() {
    let model = MockModelProvider::new()
        .with_error(ModelError::Quota("daily limit reached".to_string()));

    let handler = handler(ToolRegistry::new(), model, IntentResolution::conversation());

    let envelope = handler.process_message(&ChatRequest::new("tell me about sabr")).await;

    assert!(!envelope.success);
    assert_eq!(envelope.error, Some(ChatErrorCode::QuotaExceeded));
    assert_eq!(envelope.message, "");
    assert!(envelope.tool_used.is_none());
    // Canned guidance only; the upstream detail stays in logs.
    assert!(!envelope.error_message.unwrap().contains("daily limit reached"));
}

#[tokio::test]
async fn transient_model_failure_maps_to_network_error() {
    let model =
        MockModelProvider::new().with_error(ModelError::Transient("503".to_string()));
    let handler = handler(ToolRegistry::new(), model, IntentResolution::conversation());

    let envelope = handler.process_message(&ChatRequest::new("hi")).await;
    assert_eq!(envelope.error, Some(ChatErrorCode::NetworkError));
}

#[tokio::test]
async fn envelope_serializes_in_the_wire_shape() {
    let handler = handler(
        ToolRegistry::new(),
        MockModelProvider::new().with_response("Hello!"),
        IntentResolution::conversation(),
    );

    let envelope = handler.process_message(&ChatRequest::new("hi")).await;
    let wire = serde_json::to_value(&envelope).unwrap();

    assert_eq!(wire["success"], json!(true));
    assert_eq!(wire["message"], json!("Hello!"));
    assert!(wire.get("error").is_none());
    assert!(wire.get("tool_used").is_none());
    assert!(wire["request_id"].as_str().unwrap().len() > 10);
}
