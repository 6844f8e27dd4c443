//! Answering questions over the corpus
//!
//! The assistant ties query analysis, retrieval and text generation together.
//! Remote analysis and generation sit behind [`QueryAnalyzer`] and
//! [`TextGenerator`]; every remote failure is replaced by a deterministic
//! fallback, so [`Assistant::answer`] always produces text.

mod context;
mod conversation;

pub use context::{
    build_grounding_context, AnalysisSummary, GroundingContext, GroundingSection,
    CONTENT_PREVIEW_CHARS, DEFAULT_PROMPT_HISTORY_TURNS, MAX_KEYWORD_MATCHES,
};
pub use conversation::{Conversation, Role, Turn, DEFAULT_HISTORY_WINDOW, WELCOME_MESSAGE};

use crate::corpus::{LawEra, LawType};
use crate::query::{parse_remote_analysis, FeatureExtractor, QueryCategory, QueryFeatures, QueryIntent};
use crate::retrieval::{SearchOutcome, Selector};
use std::future::Future;
use thiserror::Error;

pub const NO_MATCH_MESSAGE: &str = "I couldn't find any relevant legal sections for your query. Please try rephrasing your question or provide more specific details.";

const LEGAL_SYSTEM_PROMPT: &str = "You are an expert legal assistant specializing in Indian law. Provide clear, accurate, and well-structured responses using markdown formatting.";

const GENERAL_SYSTEM_PROMPT: &str = "You are an expert legal assistant specializing in Indian law. Provide clear, helpful responses about legal concepts, procedures, and general legal information. Current laws (2023): BNS replaced IPC, BNSS replaced CrPC, BSA replaced IEA.";

const MAX_TOKENS: u32 = 1000;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Remote backend is disabled")]
    Disabled,

    #[error("Remote request failed: {0}")]
    Request(String),

    #[error("Remote backend returned an empty response")]
    EmptyResponse,
}

/// Input for a text generator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Model name; empty leaves the choice to the generator
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Produces a raw query analysis, expected to be a JSON object
pub trait QueryAnalyzer: Send + Sync {
    fn analyze(
        &self,
        query: &str,
        history: &[Turn],
    ) -> impl Future<Output = Result<String, RemoteError>> + Send;
}

/// Produces answer text from a prompt
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<String, RemoteError>> + Send;
}

/// Backend that declines every remote call
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

impl QueryAnalyzer for OfflineBackend {
    async fn analyze(&self, _query: &str, _history: &[Turn]) -> Result<String, RemoteError> {
        Err(RemoteError::Disabled)
    }
}

impl TextGenerator for OfflineBackend {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, RemoteError> {
        Err(RemoteError::Disabled)
    }
}

/// Question answering over a corpus
pub struct Assistant<A, G> {
    analyzer: A,
    generator: G,
    selector: Selector,
    extractor: FeatureExtractor,
    history_window: usize,
    prompt_history_turns: usize,
    temperature: f32,
    model: String,
}

impl Assistant<OfflineBackend, OfflineBackend> {
    /// Assistant that never leaves the process
    pub fn offline(selector: Selector, extractor: FeatureExtractor) -> Self {
        Self::new(OfflineBackend, OfflineBackend, selector, extractor)
    }
}

impl<A: QueryAnalyzer, G: TextGenerator> Assistant<A, G> {
    pub fn new(analyzer: A, generator: G, selector: Selector, extractor: FeatureExtractor) -> Self {
        Self {
            analyzer,
            generator,
            selector,
            extractor,
            history_window: DEFAULT_HISTORY_WINDOW,
            prompt_history_turns: DEFAULT_PROMPT_HISTORY_TURNS,
            temperature: 0.7,
            model: String::new(),
        }
    }

    pub fn with_history(mut self, history_window: usize, prompt_history_turns: usize) -> Self {
        self.history_window = history_window;
        self.prompt_history_turns = prompt_history_turns;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Append the question and the answer to a conversation
    pub async fn ask(&self, conversation: &mut Conversation, question: &str) -> String {
        let history = conversation.history_window(self.history_window);
        let answer = self.answer(question, &history).await;
        conversation.push(Role::User, question);
        conversation.push(Role::Assistant, answer.clone());
        answer
    }

    /// Answer a question. Never fails; remote errors degrade to offline text.
    pub async fn answer(&self, query: &str, history: &[Turn]) -> String {
        let features = self.analyze(query, history).await;

        if let Some(law) = law_overview_target(&features) {
            return law_overview(law);
        }

        if features.category == QueryCategory::General {
            return self.general_response(query, history).await;
        }

        match self.selector.search_outcome(&features) {
            SearchOutcome::SectionNotFound { law, section } => section_not_found(law, &section),
            SearchOutcome::NoMatch => self.general_response(query, history).await,
            SearchOutcome::Found(sections) => {
                let context =
                    GroundingContext::new(query, &sections, history, self.prompt_history_turns);
                let footer = AnalysisSummary::new(&sections, &features).render();

                let request = GenerationRequest {
                    model: self.model.clone(),
                    system: LEGAL_SYSTEM_PROMPT.to_string(),
                    prompt: context.render_prompt(),
                    max_tokens: MAX_TOKENS,
                    temperature: self.temperature,
                };
                let body = match self.generate(request).await {
                    Some(text) => text,
                    None => context.render_offline(),
                };
                format!("{body}\n\n{footer}")
            }
        }
    }

    /// Remote analysis when it is usable, the local extractor otherwise
    pub async fn analyze(&self, query: &str, history: &[Turn]) -> QueryFeatures {
        match self.analyzer.analyze(query, history).await {
            Ok(raw) => parse_remote_analysis(&raw, query).unwrap_or_else(|| {
                tracing::warn!("remote analysis unusable, using local extraction");
                self.extractor.extract(query)
            }),
            Err(RemoteError::Disabled) => self.extractor.extract(query),
            Err(e) => {
                tracing::warn!(error = %e, "remote analysis failed, using local extraction");
                self.extractor.extract(query)
            }
        }
    }

    async fn general_response(&self, query: &str, history: &[Turn]) -> String {
        let skip = history.len().saturating_sub(self.prompt_history_turns);
        let mut prompt = format!("Please explain: \"{query}\"");
        if skip < history.len() {
            prompt.push_str("\n\nConversation context:");
            for turn in &history[skip..] {
                prompt.push_str(&format!("\n{}: {}", turn.role.label(), turn.content));
            }
        }

        let request = GenerationRequest {
            model: self.model.clone(),
            system: GENERAL_SYSTEM_PROMPT.to_string(),
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: self.temperature,
        };
        self.generate(request)
            .await
            .unwrap_or_else(|| NO_MATCH_MESSAGE.to_string())
    }

    async fn generate(&self, request: GenerationRequest) -> Option<String> {
        match self.generator.generate(request).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                tracing::warn!(error = %RemoteError::EmptyResponse, "generation fell back to offline text");
                None
            }
            Err(RemoteError::Disabled) => None,
            Err(e) => {
                tracing::warn!(error = %e, "generation fell back to offline text");
                None
            }
        }
    }
}

/// "What is BNS?": a definition question naming one law and nothing else
fn law_overview_target(features: &QueryFeatures) -> Option<LawType> {
    match features {
        QueryFeatures {
            law: Some(law),
            secondary_law: None,
            section: None,
            intent: QueryIntent::Definition,
            keywords,
            ..
        } if keywords.is_empty() => Some(*law),
        _ => None,
    }
}

fn law_overview(law: LawType) -> String {
    let subject = match law {
        LawType::Bns | LawType::Ipc => "substantive criminal law: it defines offences and prescribes their punishments",
        LawType::Bnss | LawType::Crpc => "criminal procedure: arrest, investigation, bail, trial and appeals",
        LawType::Bsa | LawType::Iea => "the law of evidence: what may be proved in court and how",
    };
    let status = match law.era() {
        LawEra::Current => format!(
            "It is in force from 1 July 2024 and replaced the {}.",
            law.counterpart().full_name()
        ),
        LawEra::Previous => format!(
            "It was repealed with effect from 1 July 2024 and replaced by the {}.",
            law.counterpart().full_name()
        ),
    };
    format!("The {} covers {}. {}", law.full_name(), subject, status)
}

fn section_not_found(law: LawType, section: &str) -> String {
    format!(
        "Section {section} was not found in the {}. Please check the section number, or describe the offence or procedure you are asking about.",
        law.full_name()
    )
}
