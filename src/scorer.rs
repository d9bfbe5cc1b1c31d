//! Scorer - evaluates one intent rule against normalized text
//!
//! Order is fixed: exclusions short-circuit to 0, then required terms, then
//! the binary context boost, then the rule weight.

use crate::lexicon::Lexicon;
use crate::types::{IntentRule, ScoreBreakdown};

/// Share of the raw score carried by required terms
pub const REQUIRED_WEIGHT: f32 = 0.7;

/// Share of the raw score carried by the context flag
pub const CONTEXT_WEIGHT: f32 = 0.3;

/// Score `rule` against already-normalized text, in [0, 1]
pub fn score(lexicon: &Lexicon, normalized_text: &str, rule: &IntentRule) -> f32 {
    score_detailed(lexicon, normalized_text, rule).score
}

/// Score with the terms that produced it
pub fn score_detailed(lexicon: &Lexicon, normalized_text: &str, rule: &IntentRule) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown {
        rule: rule.name.clone(),
        excluded_by: None,
        matched_required: Vec::new(),
        matched_context: None,
        score: 0.0,
    };

    if let Some(term) = rule
        .exclusion_terms
        .iter()
        .find(|term| lexicon.contains_term(normalized_text, term))
    {
        breakdown.excluded_by = Some(term.clone());
        return breakdown;
    }

    // Distinct: a term listed twice counts once.
    for term in &rule.required_terms {
        if !breakdown.matched_required.contains(term) && lexicon.contains_term(normalized_text, term) {
            breakdown.matched_required.push(term.clone());
        }
    }

    if breakdown.matched_required.is_empty() {
        return breakdown;
    }

    breakdown.matched_context = rule
        .context_terms
        .iter()
        .find(|term| lexicon.contains_term(normalized_text, term))
        .cloned();

    let required_ratio = breakdown.matched_required.len() as f32 / distinct_count(&rule.required_terms) as f32;
    let context_score = if breakdown.matched_context.is_some() { 1.0 } else { 0.0 };

    let raw = required_ratio * REQUIRED_WEIGHT + context_score * CONTEXT_WEIGHT;
    breakdown.score = (raw * rule.confidence_weight).clamp(0.0, 1.0);

    breakdown
}

fn distinct_count(terms: &[String]) -> usize {
    let mut distinct: Vec<&String> = terms.iter().collect();
    distinct.sort();
    distinct.dedup();
    distinct.len()
}
