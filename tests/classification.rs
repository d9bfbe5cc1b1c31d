//! End-to-end classification behaviour of the built-in assistant.

use notaria_intent::lexicon::Lexicon;
use notaria_intent::normalizer::normalize;
use notaria_intent::rules::RuleSet;
use notaria_intent::scorer::score;
use notaria_intent::*;

fn assistant() -> Assistant {
    Assistant::new(AssistantConfig::default()).unwrap()
}

fn house_score(text: &str) -> f32 {
    let rules = RuleSet::builtin();
    let rule = rules.get("vender_casa").unwrap();
    score(&Lexicon::builtin(), &normalize(text), rule)
}

#[test]
fn test_sell_house() {
    let result = assistant().classify("Quiero vender mi casa");

    match result {
        ClassificationResult::Match { intent, document, score, .. } => {
            assert_eq!(intent, "vender_casa");
            assert_eq!(document, "compraventa-inmueble");
            assert!(score >= 0.4);
        }
        other => panic!("Expected Match, got: {:?}", other),
    }
}

#[test]
fn test_sell_car_is_not_house_sale() {
    let result = assistant().classify("Quiero vender mi auto");

    assert_eq!(result.intent(), Some("vender_auto"));
    assert_eq!(house_score("Quiero vender mi auto"), 0.0);
}

#[test]
fn test_gibberish_is_unrecognized() {
    match assistant().classify("asdkjhasd") {
        ClassificationResult::Unrecognized { examples, .. } => {
            assert_eq!(examples, fallback::example_phrases());
        }
        other => panic!("Expected Unrecognized, got: {:?}", other),
    }
}

#[test]
fn test_empty_and_blank_input() {
    let assistant = assistant();

    for input in ["", "   ", "¿¿!!..", "\n\t"] {
        assert!(
            matches!(assistant.classify(input), ClassificationResult::Unrecognized { .. }),
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_synonym_scores_at_least_as_high() {
    let casa = house_score("Quiero vender mi casa");
    let vivienda = house_score("Quiero vender mi vivienda");

    assert!(vivienda >= casa);
    assert_eq!(
        assistant().classify("Quiero vender mi vivienda").intent(),
        Some("vender_casa")
    );
}

#[test]
fn test_classify_is_idempotent() {
    let assistant = assistant();

    for input in ["Quiero vender mi casa", "Necesito un poder", "algo para mi casa", "asdkjhasd"] {
        assert_eq!(assistant.classify(input), assistant.classify(input));
    }
}

#[test]
fn test_zero_required_terms_scores_zero() {
    // Context terms alone never qualify.
    assert_eq!(house_score("mi casa y mi departamento en el terreno"), 0.0);
}

#[test]
fn test_multiple_options_have_prices() {
    match assistant().classify("Voy a arrendar mi departamento") {
        ClassificationResult::MultipleOptions { intent, options, .. } => {
            assert_eq!(intent, "arrendar");
            let documents: Vec<&str> = options.iter().map(|o| o.document.as_str()).collect();
            assert_eq!(documents, ["contrato-arriendo-vivienda", "contrato-arriendo-comercial"]);
            assert!(options.iter().all(|o| o.price.starts_with('$')));
        }
        other => panic!("Expected MultipleOptions, got: {:?}", other),
    }
}

#[test]
fn test_keyword_suggestion_has_low_confidence() {
    let result = assistant().classify("algo para mi casa");

    assert!(matches!(result, ClassificationResult::Suggestion { .. }));
    assert_eq!(result.confidence(), fallback::SUGGESTION_CONFIDENCE);
}

#[test]
fn test_unknown_document_lookup() {
    let info = assistant().lookup_document("no-existe");
    assert_eq!(info, DocumentInfo::generic());
}

#[test]
fn test_assistant_is_shareable_across_threads() {
    let assistant = std::sync::Arc::new(assistant());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let assistant = assistant.clone();
            std::thread::spawn(move || assistant.classify("Quiero vender mi casa"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().intent(), Some("vender_casa"));
    }
}

#[test]
fn test_conversation_to_checkout() {
    let assistant = assistant();
    let mut session = assistant.new_session();

    assistant.respond(&mut session, "Mi hijo va a viajar fuera del país");
    let reply = assistant.respond(&mut session, "si");

    assert_eq!(
        reply,
        Reply::Checkout {
            document: "autorizacion-viaje-menor".to_string()
        }
    );
    assert_eq!(session.len(), 2);
}

#[test]
fn test_decomposed_accents_classify_like_composed() {
    // "vehículo" typed as i + combining acute.
    let assistant = assistant();
    let decomposed = assistant.classify("Quiero vender mi vehi\u{301}culo");

    assert_eq!(decomposed.intent(), Some("vender_auto"));
    assert_eq!(decomposed.document(), Some("compraventa-vehiculo"));
    assert_eq!(decomposed, assistant.classify("Quiero vender mi vehículo"));
}

#[test]
fn test_substring_collision_knocks_out_both_sale_rules() {
    // "casado" contains "casa", which excludes vender_auto, while "auto"
    // excludes vender_casa. The keyword scan then hits "casa" first.
    let result = assistant().classify("Quiero vender mi auto, soy casado");

    match result {
        ClassificationResult::Suggestion { keyword, document, .. } => {
            assert_eq!(keyword, "casa");
            assert_eq!(document, "compraventa-inmueble");
        }
        other => panic!("Expected Suggestion, got: {:?}", other),
    }
}
