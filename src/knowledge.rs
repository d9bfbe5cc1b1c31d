//! Knowledge base - what the assistant says about each intent

use crate::types::IntentGuidance;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    guidance: HashMap<String, IntentGuidance>,
}

impl KnowledgeBase {
    pub fn new(guidance: HashMap<String, IntentGuidance>) -> Self {
        Self { guidance }
    }

    pub fn builtin() -> Self {
        let table: &[(&str, &str, &[&str])] = &[
            (
                "vender_casa",
                "Para vender tu propiedad necesitas un contrato de compraventa de inmueble.",
                &[
                    "Cédula de identidad de comprador y vendedor",
                    "Certificado de dominio vigente",
                    "Certificado de hipotecas y gravámenes",
                    "Rol de avalúo fiscal",
                ],
            ),
            (
                "comprar_casa",
                "Para comprar una propiedad necesitas un contrato de compraventa de inmueble.",
                &[
                    "Cédula de identidad de comprador y vendedor",
                    "Certificado de dominio vigente",
                    "Certificado de hipotecas y gravámenes",
                ],
            ),
            (
                "vender_auto",
                "Para vender tu vehículo necesitas un contrato de compraventa de vehículo.",
                &[
                    "Cédula de identidad de comprador y vendedor",
                    "Certificado de anotaciones vigentes",
                    "Permiso de circulación al día",
                    "Revisión técnica vigente",
                ],
            ),
            (
                "comprar_auto",
                "Para comprar un vehículo necesitas un contrato de compraventa de vehículo.",
                &[
                    "Cédula de identidad de comprador y vendedor",
                    "Certificado de anotaciones vigentes",
                ],
            ),
            (
                "arrendar",
                "Tenemos contratos de arriendo según el tipo de propiedad. ¿Cuál necesitas?",
                &[],
            ),
            (
                "poder",
                "Hay distintos tipos de poder según lo que necesites delegar. ¿Cuál buscas?",
                &[],
            ),
            (
                "autorizacion_viaje",
                "Para que un menor viaje necesitas una autorización notarial de viaje.",
                &[
                    "Cédula de identidad del padre o madre que autoriza",
                    "Certificado de nacimiento del menor",
                    "Destino y fechas del viaje",
                ],
            ),
            (
                "declaracion_jurada",
                "Puedes hacer tu declaración jurada con validez notarial.",
                &["Cédula de identidad", "Texto de lo que se declara"],
            ),
            (
                "finiquito",
                "Para terminar una relación laboral necesitas un finiquito.",
                &[
                    "Cédula de identidad de empleador y trabajador",
                    "Carta de aviso o renuncia",
                    "Detalle de montos a pagar",
                ],
            ),
            (
                "testamento",
                "Un testamento te permite decidir sobre tus bienes.",
                &["Cédula de identidad", "Listado de bienes", "Datos de los herederos"],
            ),
            (
                "reconocimiento_deuda",
                "Un reconocimiento de deuda deja constancia del préstamo y su pago.",
                &["Cédula de identidad de ambas partes", "Monto y forma de pago"],
            ),
            (
                "contrato_trabajo",
                "Para formalizar una contratación necesitas un contrato de trabajo.",
                &[
                    "Cédula de identidad de empleador y trabajador",
                    "Cargo, jornada y remuneración",
                ],
            ),
        ];

        let guidance = table
            .iter()
            .map(|(intent, message, requirements)| {
                (
                    intent.to_string(),
                    IntentGuidance {
                        message: message.to_string(),
                        requirements: requirements.iter().map(|r| r.to_string()).collect(),
                    },
                )
            })
            .collect();

        Self { guidance }
    }

    pub fn get(&self, intent: &str) -> Option<&IntentGuidance> {
        self.guidance.get(intent)
    }

    /// Add or replace entries
    pub fn merge(&mut self, other: HashMap<String, IntentGuidance>) {
        self.guidance.extend(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    #[test]
    fn test_every_builtin_rule_has_guidance() {
        let knowledge = KnowledgeBase::builtin();

        for rule in RuleSet::builtin().iter() {
            assert!(knowledge.get(&rule.name).is_some(), "missing {}", rule.name);
        }
    }

    #[test]
    fn test_merge_overrides() {
        let mut knowledge = KnowledgeBase::builtin();
        let mut extra = HashMap::new();
        extra.insert(
            "poder".to_string(),
            IntentGuidance {
                message: "Otro mensaje".to_string(),
                requirements: vec![],
            },
        );

        knowledge.merge(extra);

        assert_eq!(knowledge.get("poder").unwrap().message, "Otro mensaje");
        assert!(knowledge.get("testamento").is_some());
    }
}
