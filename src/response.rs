//! Assistant replies and their plain-text rendering

use crate::types::{ClassificationResult, DocumentChoice, DocumentId};
use serde::{Deserialize, Serialize};

/// What the assistant answers to one user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
    /// Fresh classification of the message
    Classified { result: ClassificationResult },

    /// User picked one of the offered options
    OptionSelected { choice: DocumentChoice },

    /// User confirmed; hand off to checkout
    Checkout { document: DocumentId },

    /// User declined the recommendation
    Cancelled,
}

impl Reply {
    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            Reply::Classified { result } => Some(result),
            _ => None,
        }
    }
}

/// Assistant text for a classification result, one line per item
pub fn render(result: &ClassificationResult) -> String {
    let mut lines = Vec::new();

    match result {
        ClassificationResult::Match { name, price, description, message, requirements, .. } => {
            lines.push(message.clone());
            lines.push(format!("📄 {} ({})", name, price));
            lines.push(description.clone());
            if !requirements.is_empty() {
                lines.push("Necesitarás:".to_string());
                lines.extend(requirements.iter().map(|r| format!("  • {}", r)));
            }
            lines.push("¿Quieres comprarlo?".to_string());
        }
        ClassificationResult::MultipleOptions { message, options, .. } => {
            lines.push(message.clone());
            lines.extend(
                options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| format!("  {}. {} ({})", i + 1, option.label, option.price)),
            );
            lines.push("Responde con el número de la opción.".to_string());
        }
        ClassificationResult::Suggestion { name, price, .. } => {
            lines.push(format!("No estoy seguro, pero quizás buscas: {} ({}).", name, price));
            lines.push("¿Es lo que necesitas?".to_string());
        }
        ClassificationResult::Unrecognized { message, examples } => {
            lines.push(message.clone());
            lines.extend(examples.iter().map(|e| format!("  • \"{}\"", e)));
        }
    }

    lines.join("\n")
}

/// Assistant text for any reply
pub fn render_reply(reply: &Reply) -> String {
    match reply {
        Reply::Classified { result } => render(result),
        Reply::OptionSelected { choice } => {
            format!("Elegiste {} ({}). ¿Quieres comprarlo?", choice.label, choice.price)
        }
        Reply::Checkout { document } => {
            format!("Perfecto, te llevamos al pago de '{}'.", document)
        }
        Reply::Cancelled => "Entendido. ¿En qué más te puedo ayudar?".to_string(),
    }
}
