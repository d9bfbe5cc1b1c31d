//! Intent Classifier - free text → document recommendation
//!
//! Two tiers: every rule is scored and the best one above the confidence
//! threshold wins; otherwise the keyword fallback answers. Classification is
//! a pure function of the input and the immutable tables held here.

use crate::catalog::{DocumentCatalog, StaticCatalog};
use crate::fallback;
use crate::knowledge::KnowledgeBase;
use crate::lexicon::Lexicon;
use crate::normalizer::normalize;
use crate::rules::RuleSet;
use crate::scorer;
use crate::types::*;
use std::sync::Arc;

/// Default minimum score (exclusive) for a rule match
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.4;

pub struct IntentClassifier {
    lexicon: Lexicon,
    rules: RuleSet,
    knowledge: KnowledgeBase,
    catalog: Arc<dyn DocumentCatalog>,
    threshold: f32,
}

impl IntentClassifier {
    pub fn new(
        lexicon: Lexicon,
        rules: RuleSet,
        knowledge: KnowledgeBase,
        catalog: Arc<dyn DocumentCatalog>,
        threshold: f32,
    ) -> Self {
        Self {
            lexicon,
            rules,
            knowledge,
            catalog,
            threshold,
        }
    }

    /// Built-in lexicon, rules, knowledge base and catalog
    pub fn builtin() -> Self {
        Self::new(
            Lexicon::builtin(),
            RuleSet::builtin(),
            KnowledgeBase::builtin(),
            Arc::new(StaticCatalog::builtin()),
            DEFAULT_CONFIDENCE_THRESHOLD,
        )
    }

    /// Classify a user message. Never fails; the worst outcome is
    /// [`ClassificationResult::Unrecognized`].
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let normalized = normalize(text);

        let mut best: Option<(&IntentRule, f32)> = None;
        for rule in self.rules.iter() {
            let score = scorer::score(&self.lexicon, &normalized, rule);
            log::debug!("Rule '{}' scored {:.3}", rule.name, score);

            // Strict: the first rule seen keeps an exact tie.
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((rule, score));
            }
        }

        match best {
            Some((rule, score)) if score > self.threshold => {
                log::info!("Classified as '{}' (score {:.2})", rule.name, score);
                self.build_match(rule, score)
            }
            _ => {
                log::info!("No intent above {:.2}, using fallback", self.threshold);
                fallback::fallback(&normalized, self.catalog.as_ref())
            }
        }
    }

    /// Every rule with a non-zero score, best first; ties keep declared order
    pub fn rank(&self, text: &str) -> Vec<ScoreBreakdown> {
        let normalized = normalize(text);

        let mut ranked: Vec<ScoreBreakdown> = self
            .rules
            .iter()
            .map(|rule| scorer::score_detailed(&self.lexicon, &normalized, rule))
            .filter(|detail| detail.score > 0.0)
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    fn build_match(&self, rule: &IntentRule, score: f32) -> ClassificationResult {
        let guidance = self.knowledge.get(&rule.name);

        match &rule.target {
            IntentTarget::Document { id } => {
                let info = self.catalog.lookup_document(id);
                let message = guidance
                    .map(|g| g.message.clone())
                    .unwrap_or_else(|| format!("Te recomendamos: {}.", info.name));
                let requirements = guidance
                    .map(|g| g.requirements.clone())
                    .unwrap_or_default();

                ClassificationResult::Match {
                    intent: rule.name.clone(),
                    document: id.clone(),
                    score,
                    name: info.name,
                    price: info.price,
                    description: info.description,
                    message,
                    requirements,
                }
            }
            IntentTarget::Options { options } => {
                let choices = options
                    .iter()
                    .map(|option| DocumentChoice {
                        document: option.document.clone(),
                        label: option.label.clone(),
                        price: self.catalog.lookup_document(&option.document).price,
                    })
                    .collect();

                ClassificationResult::MultipleOptions {
                    intent: rule.name.clone(),
                    score,
                    message: guidance
                        .map(|g| g.message.clone())
                        .unwrap_or_else(|| "Tenemos varias opciones para ti:".to_string()),
                    options: choices,
                }
            }
        }
    }

    pub fn catalog(&self) -> &dyn DocumentCatalog {
        self.catalog.as_ref()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}
