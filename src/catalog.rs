//! Document Catalog - identifier → name, price, description
//!
//! The classifier only reads from a catalog; it never owns or mutates one.

use crate::types::{DocumentId, DocumentInfo};
use std::collections::HashMap;

/// Read-only document metadata source
pub trait DocumentCatalog: Send + Sync {
    fn get(&self, id: &str) -> Option<&DocumentInfo>;

    /// Metadata for `id`, or the generic notarial document when unknown
    fn lookup_document(&self, id: &str) -> DocumentInfo {
        match self.get(id) {
            Some(info) => info.clone(),
            None => {
                log::warn!("Unknown document '{}', using generic metadata", id);
                DocumentInfo::generic()
            }
        }
    }
}

/// In-memory catalog
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    documents: HashMap<DocumentId, DocumentInfo>,
}

impl StaticCatalog {
    pub fn new(documents: HashMap<DocumentId, DocumentInfo>) -> Self {
        Self { documents }
    }

    /// Documents sold on the site
    pub fn builtin() -> Self {
        let table = [
            (
                "compraventa-inmueble",
                "Contrato de Compraventa de Inmueble",
                "$45",
                "Transfiere el dominio de una casa, departamento o terreno",
            ),
            (
                "compraventa-vehiculo",
                "Contrato de Compraventa de Vehículo",
                "$25",
                "Transfiere un vehículo motorizado entre particulares",
            ),
            (
                "contrato-arriendo-vivienda",
                "Contrato de Arriendo de Vivienda",
                "$30",
                "Arriendo de casa o departamento con fines habitacionales",
            ),
            (
                "contrato-arriendo-comercial",
                "Contrato de Arriendo Comercial",
                "$35",
                "Arriendo de local, oficina o bodega",
            ),
            (
                "poder-simple",
                "Poder Simple",
                "$10",
                "Autoriza a un tercero para un trámite puntual",
            ),
            (
                "poder-especial",
                "Poder Especial",
                "$20",
                "Faculta a un apoderado para actos determinados, como vender o cobrar",
            ),
            (
                "poder-general",
                "Poder General",
                "$30",
                "Faculta a un apoderado para administrar bienes y representar en general",
            ),
            (
                "autorizacion-viaje-menor",
                "Autorización de Viaje de Menor",
                "$15",
                "Permite que un menor de edad salga del país",
            ),
            (
                "declaracion-jurada",
                "Declaración Jurada",
                "$12",
                "Declaración de hechos bajo juramento ante notario",
            ),
            (
                "finiquito-laboral",
                "Finiquito Laboral",
                "$18",
                "Pone término a la relación laboral y registra los pagos",
            ),
            (
                "testamento",
                "Testamento",
                "$60",
                "Dispone de los bienes para después del fallecimiento",
            ),
            (
                "reconocimiento-deuda",
                "Reconocimiento de Deuda",
                "$15",
                "Deja constancia de un préstamo y su forma de pago",
            ),
            (
                "contrato-trabajo",
                "Contrato de Trabajo",
                "$20",
                "Formaliza la relación entre empleador y trabajador",
            ),
        ];

        let documents = table
            .iter()
            .map(|(id, name, price, description)| {
                (id.to_string(), DocumentInfo::new(name, price, description))
            })
            .collect();

        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentCatalog for StaticCatalog {
    fn get(&self, id: &str) -> Option<&DocumentInfo> {
        self.documents.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;
    use crate::types::IntentTarget;

    #[test]
    fn test_known_document() {
        let catalog = StaticCatalog::builtin();
        let info = catalog.lookup_document("poder-simple");

        assert_eq!(info.name, "Poder Simple");
        assert_eq!(info.price, "$10");
    }

    #[test]
    fn test_unknown_document_uses_generic() {
        let catalog = StaticCatalog::builtin();
        let info = catalog.lookup_document("no-existe");

        assert_eq!(info.name, "Documento Notarial");
        assert_eq!(info.price, "$15");
        assert_eq!(info.description, "Documento notarial con validez legal");
    }

    #[test]
    fn test_builtin_rules_point_at_known_documents() {
        let catalog = StaticCatalog::builtin();

        for rule in RuleSet::builtin().iter() {
            match &rule.target {
                IntentTarget::Document { id } => {
                    assert!(catalog.get(id).is_some(), "{} -> {}", rule.name, id)
                }
                IntentTarget::Options { options } => {
                    for option in options {
                        assert!(catalog.get(&option.document).is_some(), "{}", option.document);
                    }
                }
            }
        }
    }
}
