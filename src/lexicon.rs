//! Lexicon - canonical terms and their synonyms
//!
//! Matching is substring containment over normalized text. A term matches if
//! the term itself or one of its direct synonyms occurs; synonyms are never
//! expanded further.

use crate::normalizer::normalize;
use std::collections::HashMap;

/// Canonical term → synonyms
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<String>>,
}

impl Lexicon {
    /// Build from canonical term → synonym lists.
    ///
    /// Terms and synonyms are normalized like user text so that
    /// configuration such as `"Vehículo"` still matches. Entries whose keys
    /// normalize to the same term are merged.
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::new();

        for (term, synonyms) in entries {
            let term = normalize(&term);
            if term.is_empty() {
                continue;
            }

            let merged = normalized.entry(term).or_default();
            for synonym in synonyms.iter().map(|s| normalize(s)) {
                if !synonym.is_empty() && !merged.contains(&synonym) {
                    merged.push(synonym);
                }
            }
        }

        Self { entries: normalized }
    }

    /// Built-in Spanish lexicon for notarial requests
    pub fn builtin() -> Self {
        let table: &[(&str, &[&str])] = &[
            ("vender", &["venta", "vendo", "vendiendo", "enajenar", "compraventa"]),
            ("comprar", &["compra", "compro", "comprando", "adquirir"]),
            ("casa", &["vivienda", "hogar", "inmueble", "propiedad"]),
            ("departamento", &["depto", "dpto"]),
            ("terreno", &["parcela", "sitio", "lote"]),
            (
                "auto",
                &[
                    "carro", "coche", "automóvil", "automovil", "vehículo", "vehiculo",
                    "camioneta", "moto",
                ],
            ),
            ("arrendar", &["arriendo", "arrendamiento", "alquilar", "alquiler", "arrendatario"]),
            ("local", &["oficina", "negocio", "comercial", "bodega"]),
            ("poder", &["apoderado", "mandato", "representar", "representación", "representacion"]),
            ("banco", &["cobrar", "cuenta", "trámite", "tramite", "pensión", "pension"]),
            ("autorizar", &["autorización", "autorizacion", "permiso"]),
            ("viaje", &["viajar", "viaja", "extranjero", "fuera del país", "fuera del pais"]),
            ("menor", &["hijo", "hija", "niño", "niña", "nieto", "nieta"]),
            ("declaracion", &["declaración", "declarar", "jurada"]),
            ("ingresos", &["sueldo", "renta", "soltería", "solteria", "residencia", "domicilio"]),
            ("finiquito", &["despido", "renuncia", "desvinculación", "desvinculacion"]),
            ("trabajo", &["laboral", "empleador", "trabajador", "empleo", "empresa"]),
            ("testamento", &["herencia", "heredero", "heredar", "sucesión", "sucesion"]),
            ("bienes", &["patrimonio", "familia"]),
            ("deuda", &["préstamo", "prestamo", "pagaré", "pagare", "prestar", "adeuda"]),
            ("dinero", &["plata", "cuotas", "pesos", "monto"]),
            ("contrato", &["acuerdo", "convenio"]),
        ];

        let entries = table
            .iter()
            .map(|(term, synonyms)| {
                (
                    term.to_string(),
                    synonyms.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();

        Self::new(entries)
    }

    /// True if `normalized_text` contains `term` or one of its synonyms.
    ///
    /// Terms without a lexicon entry match only literally.
    pub fn contains_term(&self, normalized_text: &str, term: &str) -> bool {
        if normalized_text.contains(term) {
            return true;
        }

        self.synonyms(term)
            .iter()
            .any(|synonym| normalized_text.contains(synonym.as_str()))
    }

    pub fn synonyms(&self, term: &str) -> &[String] {
        self.entries.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_matches_itself() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.contains_term("quiero vender mi casa", "casa"));
    }

    #[test]
    fn test_term_matches_synonym() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.contains_term("quiero vender mi vivienda", "casa"));
        assert!(lexicon.contains_term("mi camioneta", "auto"));
    }

    #[test]
    fn test_unknown_term_matches_literally() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.contains_term("un barco", "barco"));
        assert!(!lexicon.contains_term("un velero", "barco"));
    }

    #[test]
    fn test_synonyms_are_not_recursive() {
        let mut entries = HashMap::new();
        entries.insert("a".to_string(), vec!["b".to_string()]);
        entries.insert("b".to_string(), vec!["c".to_string()]);
        let lexicon = Lexicon::new(entries);

        assert!(lexicon.contains_term("b", "a"));
        assert!(!lexicon.contains_term("c", "a"));
    }

    #[test]
    fn test_substring_containment() {
        // Containment, not whole words: "auto" is found inside "automatico".
        let lexicon = Lexicon::builtin();
        assert!(lexicon.contains_term("cambio automatico", "auto"));
    }

    #[test]
    fn test_substring_collisions_inside_longer_words() {
        // Known false positives of containment matching.
        let lexicon = Lexicon::builtin();
        assert!(lexicon.contains_term("firmar la autorización", "auto"));
        assert!(lexicon.contains_term("soy casado", "casa"));
    }

    #[test]
    fn test_configured_entries_are_normalized() {
        let mut entries = HashMap::new();
        entries.insert("Barco".to_string(), vec!["Vele-ro".to_string(), "  ".to_string()]);
        entries.insert("BARCO".to_string(), vec!["Lancha".to_string()]);
        let lexicon = Lexicon::new(entries);

        assert_eq!(lexicon.len(), 1);
        assert!(lexicon.contains_term("un barco", "barco"));
        assert!(lexicon.contains_term("un vele ro", "barco"));
        assert!(lexicon.contains_term("una lancha", "barco"));
        assert_eq!(lexicon.synonyms("barco").len(), 2);
    }

    #[test]
    fn test_builtin_survives_normalization() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.synonyms("viaje").contains(&"fuera del país".to_string()));
        assert!(lexicon.contains_term(&normalize("Mi vehi\u{301}culo"), "auto"));
    }
}
