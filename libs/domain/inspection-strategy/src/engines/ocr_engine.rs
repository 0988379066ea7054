// [libs/domain/inspection-strategy/src/engines/ocr_engine.rs]
/*!
 * =================================================================
 * APARATO: OCR VALIDATION ENGINE (V14.0 - DECORATED VERDICTS)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: RECONOCIMIENTO DE TEXTO Y VALIDACIÓN ESPERADA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DECORATED VERDICTS: El texto reportado lleva el sello
 *    [PASS: ...] / [FAIL: ...] que el UI de operador renderiza.
 * 2. CASE INSENSITIVE: La validación es por substring sin distinguir
 *    mayúsculas, tras un trim del texto detectado.
 * =================================================================
 */

use argus_domain_models::report::RoiVerdict;
use image::RgbImage;

use crate::capabilities::CapabilityRegistry;
use crate::errors::CapabilityFault;

/// Reconoce el texto del recorte (ya rotado por el ejecutor) y lo
/// valida contra el texto esperado cuando la receta lo declara.
pub fn recognize_text(
    capabilities: &CapabilityRegistry,
    crop: &RgbImage,
    expected_text: Option<&str>,
) -> Result<(RoiVerdict, bool), CapabilityFault> {
    let recognizer = capabilities.text_recognizer().ok_or(CapabilityFault::Unavailable)?;

    let raw_detection = recognizer.recognize(crop)?;
    let trimmed_detection = raw_detection.trim().to_string();

    let decorated = decorate_detection(&trimmed_detection, expected_text);
    let passed = evaluate_pass_rule(&decorated, &trimmed_detection);

    Ok((RoiVerdict::Ocr { ocr_text: decorated }, passed))
}

/// Sella el texto detectado con el veredicto de validación.
pub fn decorate_detection(detected: &str, expected_text: Option<&str>) -> String {
    match expected_text {
        Some(expected) => {
            let matches = detected.to_lowercase().contains(&expected.to_lowercase());
            if matches {
                format!("{}  [PASS: Contains '{}']", detected, expected)
            } else {
                format!("{}  [FAIL: Expected '{}', detected '{}']", detected, expected, detected)
            }
        }
        None => detected.to_string(),
    }
}

/// Regla de aprobación sobre el texto decorado:
/// contiene '[FAIL:' -> reprobado; contiene '[PASS:' -> aprobado;
/// sin sello -> aprobado si hubo detección no vacía.
pub fn evaluate_pass_rule(decorated: &str, detected: &str) -> bool {
    if decorated.contains("[FAIL:") {
        false
    } else if decorated.contains("[PASS:") {
        true
    } else {
        !detected.is_empty()
    }
}
