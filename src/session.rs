//! Conversation Session - per-user assistant state
//!
//! Holds the history and the current step of one conversation. The caller
//! owns the session and passes it in; nothing here is global.

use crate::classifier::IntentClassifier;
use crate::error::{AssistantError, Result};
use crate::normalizer::normalize;
use crate::response::Reply;
use crate::types::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

/// Words that confirm a pending recommendation when they open the message
const AFFIRMATIVE: &[&str] = &[
    "si", "sí", "dale", "ok", "okay", "claro", "confirmo", "acepto", "bueno", "perfecto",
];

/// Words that decline a pending recommendation when they open the message
const NEGATIVE: &[&str] = &["no", "cancelar", "nada"];

/// Where the conversation stands
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ConversationStep {
    #[default]
    Idle,

    /// A single document was recommended
    AwaitingConfirmation { document: DocumentId },

    /// Several documents were offered
    ChoosingOption { options: Vec<DocumentChoice> },
}

/// One user message and the assistant's answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub user_text: String,
    pub reply: Reply,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSession {
    id: SessionId,
    step: ConversationStep,
    history: VecDeque<Exchange>,
    max_history: usize,
}

impl ConversationSession {
    pub fn new(max_history: usize) -> Self {
        Self {
            id: SessionId::new(),
            step: ConversationStep::Idle,
            history: VecDeque::new(),
            max_history,
        }
    }

    /// Answer one user message, advancing the conversation step
    pub fn handle(&mut self, classifier: &IntentClassifier, text: &str) -> Reply {
        let normalized = normalize(text);

        let reply = match self.step.clone() {
            ConversationStep::AwaitingConfirmation { document } => {
                if is_affirmative(&normalized) {
                    self.step = ConversationStep::Idle;
                    Reply::Checkout { document }
                } else if is_negative(&normalized) {
                    self.step = ConversationStep::Idle;
                    Reply::Cancelled
                } else {
                    self.classify(classifier, text)
                }
            }
            ConversationStep::ChoosingOption { options } => {
                match select_option(&normalized, &options) {
                    Some(choice) => {
                        self.step = ConversationStep::AwaitingConfirmation {
                            document: choice.document.clone(),
                        };
                        Reply::OptionSelected { choice }
                    }
                    None if is_negative(&normalized) => {
                        self.step = ConversationStep::Idle;
                        Reply::Cancelled
                    }
                    None => self.classify(classifier, text),
                }
            }
            ConversationStep::Idle => self.classify(classifier, text),
        };

        log::debug!("Session {} now at {:?}", self.id, self.step);
        self.record(text, reply.clone());
        reply
    }

    fn classify(&mut self, classifier: &IntentClassifier, text: &str) -> Reply {
        let result = classifier.classify(text);

        self.step = match &result {
            ClassificationResult::Match { document, .. }
            | ClassificationResult::Suggestion { document, .. } => {
                ConversationStep::AwaitingConfirmation {
                    document: document.clone(),
                }
            }
            ClassificationResult::MultipleOptions { options, .. } => {
                ConversationStep::ChoosingOption {
                    options: options.clone(),
                }
            }
            ClassificationResult::Unrecognized { .. } => ConversationStep::Idle,
        };

        Reply::Classified { result }
    }

    fn record(&mut self, text: &str, reply: Reply) {
        self.history.push_back(Exchange {
            user_text: text.to_string(),
            reply,
            at: Utc::now(),
        });

        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
    }

    /// Forget history and return to idle; the id is kept
    pub fn reset(&mut self) {
        self.step = ConversationStep::Idle;
        self.history.clear();
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn step(&self) -> &ConversationStep {
        &self.step
    }

    pub fn history(&self) -> impl Iterator<Item = &Exchange> {
        self.history.iter()
    }

    pub fn last_exchange(&self) -> Option<&Exchange> {
        self.history.back()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Write the session as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| AssistantError::io(path, e))?;
        log::info!("Saved session {} ({} exchanges) to {}", self.id, self.len(), path.display());
        Ok(())
    }

    /// Read a session written by [`save`](Self::save)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AssistantError::io(path, e))?;
        let session: Self = serde_json::from_str(&content)?;
        log::info!("Loaded session {} ({} exchanges)", session.id, session.len());
        Ok(session)
    }
}

fn first_word(normalized: &str) -> Option<&str> {
    normalized.split_whitespace().next()
}

fn is_affirmative(normalized: &str) -> bool {
    normalized == "comprar" || first_word(normalized).map_or(false, |w| AFFIRMATIVE.contains(&w))
}

fn is_negative(normalized: &str) -> bool {
    first_word(normalized).map_or(false, |w| NEGATIVE.contains(&w))
}

/// Pick an option by its 1-based number or by naming its label
fn select_option(normalized: &str, options: &[DocumentChoice]) -> Option<DocumentChoice> {
    if let Some(n) = first_word(normalized).and_then(|w| w.parse::<usize>().ok()) {
        return n.checked_sub(1).and_then(|i| options.get(i)).cloned();
    }

    options
        .iter()
        .find(|option| normalized.contains(&normalize(&option.label)))
        .cloned()
}
