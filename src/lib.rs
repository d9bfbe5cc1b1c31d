//! Notaria Intent - document recommendations from free text
//!
//! Maps what a visitor types ("quiero vender mi casa") to the notarial
//! document they need.
//!
//! # Architecture
//!
//! - **Normalizer**: NFC-compose, lower-case, strip punctuation, collapse whitespace
//! - **Lexicon**: synonym-aware substring matching
//! - **Scorer**: required / context / exclusion terms → score in [0, 1]
//! - **Classifier**: best rule above threshold, else keyword fallback
//! - **Session**: per-conversation history and confirmation flow
//!
//! # Usage
//!
//! ```rust
//! use notaria_intent::{Assistant, AssistantConfig, ClassificationResult};
//!
//! let assistant = Assistant::new(AssistantConfig::default()).unwrap();
//!
//! let result = assistant.classify("Quiero vender mi casa");
//! assert_eq!(result.intent(), Some("vender_casa"));
//!
//! let mut session = assistant.new_session();
//! let reply = assistant.respond(&mut session, "Necesito un poder");
//! println!("{}", notaria_intent::response::render_reply(&reply));
//! ```

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod fallback;
pub mod knowledge;
pub mod lexicon;
pub mod normalizer;
pub mod response;
pub mod rules;
pub mod scorer;
pub mod session;
pub mod types;

pub use catalog::{DocumentCatalog, StaticCatalog};
pub use classifier::IntentClassifier;
pub use error::{AssistantError, Result};
pub use response::Reply;
pub use session::{ConversationSession, ConversationStep};
pub use types::*;

use knowledge::KnowledgeBase;
use lexicon::Lexicon;
use rules::RuleSet;
use std::path::Path;
use std::sync::Arc;

/// Entry point tying the classifier to configuration and sessions
pub struct Assistant {
    config: AssistantConfig,
    classifier: IntentClassifier,
}

impl Assistant {
    /// Build from configuration; tables left unset use the built-in ones
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let catalog: Arc<dyn DocumentCatalog> = match &config.catalog {
            Some(documents) => Arc::new(StaticCatalog::new(documents.clone())),
            None => Arc::new(StaticCatalog::builtin()),
        };

        Self::with_catalog(config, catalog)
    }

    /// Build with an external catalog, ignoring `config.catalog`
    pub fn with_catalog(config: AssistantConfig, catalog: Arc<dyn DocumentCatalog>) -> Result<Self> {
        // Below 0 a zero-scored rule would win; at 1 or above nothing can.
        // NaN fails the range check too.
        if !(0.0..1.0).contains(&config.confidence_threshold) {
            return Err(AssistantError::InvalidThreshold(config.confidence_threshold));
        }

        let rules = match &config.rules {
            Some(rules) => RuleSet::new(rules.clone())?,
            None => RuleSet::builtin(),
        };

        let lexicon = match &config.lexicon {
            Some(entries) => Lexicon::new(entries.clone()),
            None => Lexicon::builtin(),
        };

        let mut knowledge = KnowledgeBase::builtin();
        if let Some(guidance) = &config.guidance {
            knowledge.merge(guidance.clone());
        }

        let classifier = IntentClassifier::new(
            lexicon,
            rules,
            knowledge,
            catalog,
            config.confidence_threshold,
        );

        log::debug!(
            "Assistant ready: {} rules, {} lexicon entries, threshold {:.2}",
            classifier.rules().len(),
            classifier.lexicon().len(),
            classifier.threshold()
        );

        Ok(Self { config, classifier })
    }

    /// Load configuration from a TOML file and build
    pub fn from_config_file(path: &Path) -> Result<Self> {
        Self::new(load_config(path)?)
    }

    /// Classify one message with no session involved
    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.classifier.classify(text)
    }

    /// Per-rule scores for `text`, best first
    pub fn explain(&self, text: &str) -> Vec<ScoreBreakdown> {
        self.classifier.rank(text)
    }

    pub fn new_session(&self) -> ConversationSession {
        ConversationSession::new(self.config.max_history)
    }

    /// Answer a message within a conversation
    pub fn respond(&self, session: &mut ConversationSession, text: &str) -> Reply {
        session.handle(&self.classifier, text)
    }

    /// Catalog metadata, falling back to the generic document
    pub fn lookup_document(&self, id: &str) -> DocumentInfo {
        self.classifier.catalog().lookup_document(id)
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Get assistant info
    pub fn info(&self) -> String {
        format!(
            "Notaria Intent Assistant\n\
             Rules: {}\n\
             Lexicon Entries: {}\n\
             Confidence Threshold: {:.2}\n\
             Max History: {}",
            self.classifier.rules().len(),
            self.classifier.lexicon().len(),
            self.classifier.threshold(),
            self.config.max_history
        )
    }
}

/// Read an [`AssistantConfig`] from TOML
pub fn load_config(path: &Path) -> Result<AssistantConfig> {
    log::info!("Loading config from: {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| AssistantError::io(path, e))?;
    Ok(toml::from_str(&content)?)
}

/// Builder for AssistantConfig
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AssistantConfig::default(),
        }
    }

    pub fn confidence_threshold(mut self, threshold: f32) -> Self {
        self.config.confidence_threshold = threshold;
        self
    }

    pub fn max_history(mut self, max_history: usize) -> Self {
        self.config.max_history = max_history;
        self
    }

    pub fn rules(mut self, rules: Vec<IntentRule>) -> Self {
        self.config.rules = Some(rules);
        self
    }

    pub fn history_path(mut self, path: std::path::PathBuf) -> Self {
        self.config.history_path = Some(path);
        self
    }

    pub fn build(self) -> AssistantConfig {
        self.config
    }
}

impl Default for AssistantConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_assistant_creation() {
        let assistant = Assistant::new(AssistantConfig::default()).unwrap();

        assert_eq!(assistant.classifier().threshold(), 0.4);
        assert!(assistant.info().contains("Rules: 12"));
    }

    #[test]
    fn test_config_builder() {
        let config = AssistantConfigBuilder::new()
            .confidence_threshold(0.6)
            .max_history(5)
            .build();

        assert_eq!(config.confidence_threshold, 0.6);
        assert_eq!(config.max_history, 5);
    }

    #[test]
    fn test_higher_threshold_forces_fallback() {
        let config = AssistantConfigBuilder::new().confidence_threshold(0.99).build();
        let assistant = Assistant::new(config).unwrap();

        assert!(assistant.classify("Quiero vender mi casa").is_fallback());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        for threshold in [-1.0, -0.01, 1.0, 1.5, f32::NAN] {
            let config = AssistantConfigBuilder::new().confidence_threshold(threshold).build();

            assert!(
                matches!(Assistant::new(config), Err(AssistantError::InvalidThreshold(_))),
                "threshold {} accepted",
                threshold
            );
        }
    }

    #[test]
    fn test_zero_threshold_never_matches_zero_score() {
        let config = AssistantConfigBuilder::new().confidence_threshold(0.0).build();
        let assistant = Assistant::new(config).unwrap();

        assert!(matches!(
            assistant.classify(""),
            ClassificationResult::Unrecognized { .. }
        ));
    }

    #[test]
    fn test_capitalized_rule_terms_still_match() {
        let config = AssistantConfigBuilder::new()
            .rules(vec![
                IntentRule::new("escritura", IntentTarget::document("escritura"), 1.0)
                    .required(&["Escritura"]),
            ])
            .build();
        let assistant = Assistant::new(config).unwrap();

        assert_eq!(assistant.classify("Escritura").intent(), Some("escritura"));
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let config = AssistantConfigBuilder::new()
            .rules(vec![IntentRule::new("vacia", IntentTarget::document("x"), 0.5)])
            .build();

        assert!(matches!(
            Assistant::new(config),
            Err(AssistantError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_from_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
confidence_threshold = 0.5

[catalog.escritura]
name = "Escritura Pública"
price = "$80"
description = "Escritura ante notario"

[[rules]]
name = "escritura"
required_terms = ["escritura"]
confidence_weight = 1.0
target = {{ type = "document", id = "escritura" }}
"#
        )
        .unwrap();

        let assistant = Assistant::from_config_file(file.path()).unwrap();
        let result = assistant.classify("necesito una escritura");

        assert_eq!(result.intent(), Some("escritura"));
        assert_eq!(assistant.lookup_document("escritura").price, "$80");
        assert_eq!(assistant.lookup_document("poder-simple").name, "Documento Notarial");
    }

    #[test]
    fn test_bad_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "confidence_threshold = \"alto\"").unwrap();

        assert!(matches!(
            Assistant::from_config_file(file.path()),
            Err(AssistantError::Config(_))
        ));
    }
}
