//! Text normalization applied to every user message before matching.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Anything that is not a letter, combining mark, digit or whitespace
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\s]").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Compose, lower-case, blank out punctuation and collapse whitespace.
///
/// Input is NFC-composed first, so a decomposed "vehi\u{301}culo" and a
/// precomposed "vehículo" normalize to the same string. Accented letters
/// and `ñ` are kept as letters. Always returns a string, possibly empty.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let lowered = composed.to_lowercase();
    let spaced = NON_WORD.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("¿Quiero VENDER mi casa?!"), "quiero vender mi casa");
    }

    #[test]
    fn test_keeps_accents_and_enye() {
        assert_eq!(normalize("Declaración de AÑO"), "declaración de año");
    }

    #[test]
    fn test_decomposed_accents_are_composed() {
        assert_eq!(normalize("vehi\u{301}culo"), "vehículo");
        assert_eq!(normalize("An\u{303}o"), "año");
        assert_eq!(normalize("vehi\u{301}culo"), normalize("vehículo"));
    }

    #[test]
    fn test_mark_without_precomposed_form_is_kept() {
        // q + combining acute has no composed code point.
        assert_eq!(normalize("q\u{301}x"), "q\u{301}x");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  poder \t\n  simple  "), "poder simple");
        assert_eq!(normalize("auto,casa"), "auto casa");
    }

    #[test]
    fn test_punctuation_only_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!!???..."), "");
    }

    #[test]
    fn test_keeps_digits() {
        assert_eq!(normalize("Opción #2"), "opción 2");
    }
}
