//! Notaria Intent - Core Data Structures
//!
//! Types for intent rules, document metadata, classification results and
//! assistant configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// Identifier of a document in the catalog (e.g. `"compraventa-inmueble"`)
pub type DocumentId = String;

/// Unique identifier for a conversation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named user goal and the terms that recognise it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRule {
    pub name: String,

    /// At least one must appear for the rule to be eligible
    pub required_terms: Vec<String>,

    /// Binary secondary boost
    #[serde(default)]
    pub context_terms: Vec<String>,

    /// Any match forces the score to 0
    #[serde(default)]
    pub exclusion_terms: Vec<String>,

    pub target: IntentTarget,

    /// Ceiling in (0, 1] multiplied into the final score
    pub confidence_weight: f32,
}

impl IntentRule {
    /// Create a rule with no terms; add them with the builder methods
    pub fn new(name: &str, target: IntentTarget, confidence_weight: f32) -> Self {
        Self {
            name: name.to_string(),
            required_terms: Vec::new(),
            context_terms: Vec::new(),
            exclusion_terms: Vec::new(),
            target,
            confidence_weight,
        }
    }

    pub fn required(mut self, terms: &[&str]) -> Self {
        self.required_terms = terms.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn context(mut self, terms: &[&str]) -> Self {
        self.context_terms = terms.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn exclude(mut self, terms: &[&str]) -> Self {
        self.exclusion_terms = terms.iter().map(|t| t.to_string()).collect();
        self
    }
}

/// What a rule recommends when it wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntentTarget {
    /// One recommended document
    Document { id: DocumentId },

    /// Several alternatives the user has to choose from
    Options { options: Vec<DocumentOption> },
}

impl IntentTarget {
    pub fn document(id: &str) -> Self {
        IntentTarget::Document { id: id.to_string() }
    }

    pub fn options(options: &[(&str, &str)]) -> Self {
        IntentTarget::Options {
            options: options
                .iter()
                .map(|(id, label)| DocumentOption {
                    document: id.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }
}

/// One alternative of a multi-option rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOption {
    pub document: DocumentId,
    pub label: String,
}

/// Catalog metadata for a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl DocumentInfo {
    pub fn new(name: &str, price: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            price: price.to_string(),
            description: description.to_string(),
        }
    }

    /// Metadata returned for identifiers the catalog does not know
    pub fn generic() -> Self {
        Self::new(
            "Documento Notarial",
            "$15",
            "Documento notarial con validez legal",
        )
    }
}

/// Presentation text attached to an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentGuidance {
    pub message: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// A priced alternative inside a multi-option result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChoice {
    pub document: DocumentId,
    pub label: String,
    pub price: String,
}

/// Outcome of classifying one user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassificationResult {
    /// Single best match above threshold
    Match {
        intent: String,
        document: DocumentId,
        score: f32,
        name: String,
        price: String,
        description: String,
        message: String,
        requirements: Vec<String>,
    },

    /// Best match designates several documents
    MultipleOptions {
        intent: String,
        score: f32,
        message: String,
        options: Vec<DocumentChoice>,
    },

    /// Low-confidence basic keyword suggestion
    Suggestion {
        keyword: String,
        document: DocumentId,
        name: String,
        price: String,
        confidence: f32,
    },

    /// Nothing recognised
    Unrecognized {
        message: String,
        examples: Vec<String>,
    },
}

impl ClassificationResult {
    /// Winning intent name, if a rule matched
    pub fn intent(&self) -> Option<&str> {
        match self {
            ClassificationResult::Match { intent, .. }
            | ClassificationResult::MultipleOptions { intent, .. } => Some(intent.as_str()),
            _ => None,
        }
    }

    /// Single recommended document, if any
    pub fn document(&self) -> Option<&str> {
        match self {
            ClassificationResult::Match { document, .. }
            | ClassificationResult::Suggestion { document, .. } => Some(document.as_str()),
            _ => None,
        }
    }

    /// Score of the match or the fallback confidence; 0 when unrecognized
    pub fn confidence(&self) -> f32 {
        match self {
            ClassificationResult::Match { score, .. }
            | ClassificationResult::MultipleOptions { score, .. } => *score,
            ClassificationResult::Suggestion { confidence, .. } => *confidence,
            ClassificationResult::Unrecognized { .. } => 0.0,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            ClassificationResult::Suggestion { .. } | ClassificationResult::Unrecognized { .. }
        )
    }
}

/// Per-term account of how a rule scored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub rule: String,
    /// Exclusion term that disqualified the rule
    pub excluded_by: Option<String>,
    pub matched_required: Vec<String>,
    /// First context term found
    pub matched_context: Option<String>,
    pub score: f32,
}

/// Configuration for the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Best score must be strictly above this to count as a match
    pub confidence_threshold: f32,

    /// Exchanges kept per conversation session
    pub max_history: usize,

    /// Catalog entries replacing the built-in table
    pub catalog: Option<HashMap<DocumentId, DocumentInfo>>,

    /// Rules replacing the built-in rule set
    pub rules: Option<Vec<IntentRule>>,

    /// Lexicon replacing the built-in one
    pub lexicon: Option<HashMap<String, Vec<String>>>,

    /// Per-intent guidance merged over the built-in knowledge base
    pub guidance: Option<HashMap<String, IntentGuidance>>,

    /// Where `repl` persists conversation history
    pub history_path: Option<PathBuf>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.4,
            max_history: 50,
            catalog: None,
            rules: None,
            lexicon: None,
            guidance: None,
            history_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_builder() {
        let rule = IntentRule::new("vender_casa", IntentTarget::document("compraventa-inmueble"), 0.95)
            .required(&["vender"])
            .context(&["casa"])
            .exclude(&["auto"]);

        assert_eq!(rule.required_terms, vec!["vender"]);
        assert_eq!(rule.context_terms, vec!["casa"]);
        assert_eq!(rule.exclusion_terms, vec!["auto"]);
        assert!(matches!(rule.target, IntentTarget::Document { .. }));
    }

    #[test]
    fn test_result_accessors() {
        let result = ClassificationResult::Suggestion {
            keyword: "casa".to_string(),
            document: "compraventa-inmueble".to_string(),
            name: "Compraventa".to_string(),
            price: "$45".to_string(),
            confidence: 0.3,
        };

        assert!(result.is_fallback());
        assert_eq!(result.intent(), None);
        assert_eq!(result.document(), Some("compraventa-inmueble"));
        assert_eq!(result.confidence(), 0.3);
    }

    #[test]
    fn test_result_serializes_with_kind_tag() {
        let result = ClassificationResult::Unrecognized {
            message: "?".to_string(),
            examples: vec![],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "unrecognized");
    }

    #[test]
    fn test_config_from_partial_toml() {
        let config: AssistantConfig = toml::from_str("confidence_threshold = 0.5").unwrap();

        assert_eq!(config.confidence_threshold, 0.5);
        assert_eq!(config.max_history, 50);
        assert!(config.rules.is_none());
    }
}
