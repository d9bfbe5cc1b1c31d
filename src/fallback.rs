//! Fallback - used when no rule clears the confidence threshold
//!
//! A coarse keyword scan suggests a document with low confidence; otherwise
//! the user gets example phrases to try.

use crate::catalog::DocumentCatalog;
use crate::types::ClassificationResult;

/// Confidence reported for keyword suggestions
pub const SUGGESTION_CONFIDENCE: f32 = 0.3;

/// Scanned in order; first hit wins
const BASIC_KEYWORDS: &[(&str, &str)] = &[
    ("casa", "compraventa-inmueble"),
    ("departamento", "compraventa-inmueble"),
    ("terreno", "compraventa-inmueble"),
    ("auto", "compraventa-vehiculo"),
    ("vehiculo", "compraventa-vehiculo"),
    ("vehículo", "compraventa-vehiculo"),
    ("arriendo", "contrato-arriendo-vivienda"),
    ("poder", "poder-simple"),
    ("viaje", "autorizacion-viaje-menor"),
    ("jurada", "declaracion-jurada"),
    ("trabajo", "contrato-trabajo"),
    ("herencia", "testamento"),
    ("prestamo", "reconocimiento-deuda"),
    ("préstamo", "reconocimiento-deuda"),
];

const EXAMPLE_PHRASES: &[&str] = &[
    "Quiero vender mi casa",
    "Necesito vender mi auto",
    "Voy a arrendar mi departamento",
    "Necesito un poder para cobrar en el banco",
    "Mi hijo va a viajar fuera del país",
    "Necesito una declaración jurada",
];

const UNRECOGNIZED_MESSAGE: &str =
    "No entendí bien qué documento necesitas. Prueba con frases como estas:";

/// Fixed example phrases shown with an unrecognized result
pub fn example_phrases() -> Vec<String> {
    EXAMPLE_PHRASES.iter().map(|p| p.to_string()).collect()
}

/// Suggest from basic keywords, or give up with examples
pub fn fallback(normalized_text: &str, catalog: &dyn DocumentCatalog) -> ClassificationResult {
    let hit = BASIC_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized_text.contains(keyword));

    match hit {
        Some((keyword, document)) => {
            log::debug!("Fallback keyword '{}' suggests {}", keyword, document);
            let info = catalog.lookup_document(document);

            ClassificationResult::Suggestion {
                keyword: keyword.to_string(),
                document: document.to_string(),
                name: info.name,
                price: info.price,
                confidence: SUGGESTION_CONFIDENCE,
            }
        }
        None => ClassificationResult::Unrecognized {
            message: UNRECOGNIZED_MESSAGE.to_string(),
            examples: example_phrases(),
        },
    }
}
