mod common;

use nyaya::assistant::{
    Assistant, Conversation, GenerationRequest, QueryAnalyzer, RemoteError, Role, TextGenerator,
    Turn, NO_MATCH_MESSAGE,
};
use nyaya::query::FeatureExtractor;
use nyaya::retrieval::Selector;
use std::sync::{Arc, Mutex};

fn selector() -> Selector {
    Selector::with_defaults(Arc::new(common::corpus()))
}

fn offline() -> Assistant<nyaya::assistant::OfflineBackend, nyaya::assistant::OfflineBackend> {
    Assistant::offline(selector(), FeatureExtractor::from_config(&Default::default()).unwrap())
}

/// Analyzer replying with fixed text
struct FixedAnalyzer(&'static str);

impl QueryAnalyzer for FixedAnalyzer {
    async fn analyze(&self, _query: &str, _history: &[Turn]) -> Result<String, RemoteError> {
        Ok(self.0.to_string())
    }
}

/// Generator that records the last request
#[derive(Default)]
struct RecordingGenerator {
    last: Mutex<Option<GenerationRequest>>,
}

impl TextGenerator for RecordingGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, RemoteError> {
        *self.last.lock().unwrap() = Some(request);
        Ok("generated answer".to_string())
    }
}

struct FailingGenerator;

impl TextGenerator for FailingGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, RemoteError> {
        Err(RemoteError::Request("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_offline_answer_cites_sections() {
    let answer = offline().answer("punishment for murder under BNS", &[]).await;

    assert!(answer.contains("BNS - Section 103"));
    assert!(answer.contains("Analysis summary"));
    assert!(answer.contains("Intent: punishment"));
    println!("✓ Offline answer: {} chars", answer.len());
}

#[tokio::test]
async fn test_missing_section_is_reported_honestly() {
    let answer = offline().answer("BNSS section 9999", &[]).await;

    assert!(answer.contains("Section 9999 was not found"));
    assert!(answer.contains("Bharatiya Nagarik Suraksha Sanhita"));
}

#[tokio::test]
async fn test_no_match_falls_back_to_plain_message() {
    let answer = offline().answer("hello", &[]).await;
    assert_eq!(answer, NO_MATCH_MESSAGE);
}

#[tokio::test]
async fn test_law_overview() {
    let answer = offline().answer("What is BNSS?", &[]).await;

    assert!(answer.starts_with("The Bharatiya Nagarik Suraksha Sanhita (BNSS) 2023"));
    assert!(answer.contains("Code of Criminal Procedure (CrPC) 1973"));
}

#[tokio::test]
async fn test_remote_analysis_drives_search() {
    let analyzer = FixedAnalyzer(
        r#"Here is the analysis:
        {"keywords": ["murder"], "category": "legal", "primaryLaw": "IPC", "intent": "punishment", "specificSection": 302}"#,
    );
    let generator = RecordingGenerator::default();
    let assistant = Assistant::new(
        analyzer,
        generator,
        selector(),
        FeatureExtractor::from_config(&Default::default()).unwrap(),
    );

    // the remote analysis names IPC 302 although the text does not
    let answer = assistant.answer("the punishment in the old code", &[]).await;
    assert!(answer.starts_with("generated answer"));
    assert!(answer.contains("Query type: Standard"));
}

#[tokio::test]
async fn test_prompt_carries_sections_and_history() {
    let generator = RecordingGenerator::default();
    let assistant = Assistant::new(
        FixedAnalyzer("not json at all"),
        generator,
        selector(),
        FeatureExtractor::from_config(&Default::default()).unwrap(),
    )
    .with_temperature(0.2);

    let history = vec![
        Turn::new(Role::User, "what is murder"),
        Turn::new(Role::Assistant, "Murder is defined in BNS 101."),
    ];
    let answer = assistant.answer("IPC section 302", &history).await;
    assert!(answer.starts_with("generated answer"));

    // unusable analysis falls back to local extraction
    let request = assistant_request(&assistant);
    assert!(request.prompt.contains("Indian Penal Code (IPC) 1860 - Section 302"));
    assert!(request.prompt.contains("ASSISTANT: Murder is defined in BNS 101."));
    assert_eq!(request.temperature, 0.2);
}

fn assistant_request(assistant: &Assistant<FixedAnalyzer, RecordingGenerator>) -> GenerationRequest {
    assistant
        .generator()
        .last
        .lock()
        .unwrap()
        .clone()
        .expect("generator was not called")
}

#[tokio::test]
async fn test_generator_failure_uses_offline_rendering() {
    let assistant = Assistant::new(
        FixedAnalyzer("{}"),
        FailingGenerator,
        selector(),
        FeatureExtractor::from_config(&Default::default()).unwrap(),
    );

    let answer = assistant.answer("IPC section 302", &[]).await;
    assert!(answer.contains("IPC - Section 302: Punishment for murder"));
    assert!(answer.contains("previous law"));
}

#[tokio::test]
async fn test_ask_records_turns() {
    let assistant = offline();
    let mut conversation = Conversation::new("test");

    assistant.ask(&mut conversation, "bns section 103").await;
    assistant.ask(&mut conversation, "and section 101?").await;

    assert_eq!(conversation.exchanged(), 4);
    let history = conversation.history_window(6);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "bns section 103");
    assert!(history[1].content.contains("BNS - Section 103"));
}

#[tokio::test]
async fn test_configured_model_reaches_generator() {
    let assistant = Assistant::new(
        FixedAnalyzer("{}"),
        RecordingGenerator::default(),
        selector(),
        FeatureExtractor::from_config(&Default::default()).unwrap(),
    )
    .with_model("llama-3.3-70b-versatile");

    assistant.answer("IPC section 302", &[]).await;

    let request = assistant_request(&assistant);
    assert_eq!(request.model, "llama-3.3-70b-versatile");
    assert_eq!(request.max_tokens, 1000);
}
