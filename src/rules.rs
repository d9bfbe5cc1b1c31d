//! Intent Rule Set - the named intents the classifier scores
//!
//! Rules are evaluated in declared order; on an exact score tie the earlier
//! rule wins.

use crate::error::{AssistantError, Result};
use crate::normalizer::normalize;
use crate::types::*;
use std::collections::HashSet;

/// Validated, ordered collection of intent rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<IntentRule>,
}

impl RuleSet {
    /// Normalize terms, validate and wrap a list of rules.
    ///
    /// Terms are matched against normalized text, so they go through the
    /// same normalization here; a term that normalizes to nothing is
    /// rejected as blank.
    pub fn new(mut rules: Vec<IntentRule>) -> Result<Self> {
        for rule in &mut rules {
            normalize_terms(&mut rule.required_terms);
            normalize_terms(&mut rule.context_terms);
            normalize_terms(&mut rule.exclusion_terms);
        }

        let mut seen = HashSet::new();

        for rule in &rules {
            validate_rule(rule)?;
            if !seen.insert(rule.name.as_str()) {
                return Err(AssistantError::DuplicateRule(rule.name.clone()));
            }
        }

        Ok(Self { rules })
    }

    /// Built-in notarial intents
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntentRule> {
        self.rules.iter()
    }

    pub fn get(&self, name: &str) -> Option<&IntentRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn normalize_terms(terms: &mut [String]) {
    for term in terms.iter_mut() {
        *term = normalize(term);
    }
}

fn validate_rule(rule: &IntentRule) -> Result<()> {
    let invalid = |reason: &str| AssistantError::InvalidRule {
        name: rule.name.clone(),
        reason: reason.to_string(),
    };

    if rule.name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }

    if rule.required_terms.is_empty() {
        return Err(invalid("required_terms must not be empty"));
    }

    if rule
        .required_terms
        .iter()
        .chain(&rule.context_terms)
        .chain(&rule.exclusion_terms)
        .any(|term| term.trim().is_empty())
    {
        return Err(invalid("terms must not be blank"));
    }

    if !(rule.confidence_weight > 0.0 && rule.confidence_weight <= 1.0) {
        return Err(invalid("confidence_weight must be in (0, 1]"));
    }

    if let IntentTarget::Options { options } = &rule.target {
        if options.is_empty() {
            return Err(invalid("options target lists no documents"));
        }
    }

    Ok(())
}

fn builtin_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(
            "vender_casa",
            IntentTarget::document("compraventa-inmueble"),
            0.95,
        )
        .required(&["vender"])
        .context(&["casa", "departamento", "terreno"])
        .exclude(&["auto", "arrendar", "poder"]),
        IntentRule::new(
            "vender_auto",
            IntentTarget::document("compraventa-vehiculo"),
            0.9,
        )
        .required(&["vender"])
        .context(&["auto"])
        .exclude(&["casa", "departamento", "terreno", "arrendar", "poder"]),
        IntentRule::new(
            "comprar_casa",
            IntentTarget::document("compraventa-inmueble"),
            0.9,
        )
        .required(&["comprar"])
        .context(&["casa", "departamento", "terreno"])
        .exclude(&["auto", "arrendar", "poder"]),
        IntentRule::new(
            "comprar_auto",
            IntentTarget::document("compraventa-vehiculo"),
            0.85,
        )
        .required(&["comprar"])
        .context(&["auto"])
        .exclude(&["casa", "departamento", "terreno", "arrendar", "poder"]),
        IntentRule::new(
            "arrendar",
            IntentTarget::options(&[
                ("contrato-arriendo-vivienda", "Arriendo de casa o departamento"),
                ("contrato-arriendo-comercial", "Arriendo de local u oficina"),
            ]),
            0.9,
        )
        .required(&["arrendar"])
        .context(&["casa", "departamento", "local"]),
        IntentRule::new(
            "poder",
            IntentTarget::options(&[
                ("poder-simple", "Poder simple"),
                ("poder-especial", "Poder especial"),
                ("poder-general", "Poder general"),
            ]),
            0.85,
        )
        .required(&["poder"])
        .context(&["banco", "vender", "auto", "casa"]),
        IntentRule::new(
            "autorizacion_viaje",
            IntentTarget::document("autorizacion-viaje-menor"),
            0.9,
        )
        .required(&["autorizar", "viaje"])
        .context(&["menor"]),
        IntentRule::new(
            "declaracion_jurada",
            IntentTarget::document("declaracion-jurada"),
            0.85,
        )
        .required(&["declaracion"])
        .context(&["ingresos", "bienes"]),
        IntentRule::new(
            "finiquito",
            IntentTarget::document("finiquito-laboral"),
            0.9,
        )
        .required(&["finiquito"])
        .context(&["trabajo"]),
        IntentRule::new("testamento", IntentTarget::document("testamento"), 0.85)
            .required(&["testamento"])
            .context(&["bienes", "casa", "menor"]),
        IntentRule::new(
            "reconocimiento_deuda",
            IntentTarget::document("reconocimiento-deuda"),
            0.85,
        )
        .required(&["deuda"])
        .context(&["dinero"]),
        IntentRule::new(
            "contrato_trabajo",
            IntentTarget::document("contrato-trabajo"),
            0.8,
        )
        .required(&["contrato", "trabajo"])
        .exclude(&["arrendar", "finiquito", "vender", "comprar"]),
    ]
}
