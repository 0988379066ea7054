// [libs/domain/inspection-strategy/src/engines/compare_engine.rs]
/*!
 * =================================================================
 * APARATO: GOLDEN COMPARE ENGINE (V19.0 - COSINE STRATA)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: SIMILITUD CONTRA EL ALMACÉN DORADO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PRE-NORMALIZATION: Recorte y candidato dorado se normalizan en
 *    iluminación antes de extraer características.
 * 2. SHAPE PARITY: Todo candidato se redimensiona bilinealmente a la
 *    forma exacta del recorte antes de puntuar; el golden retornado
 *    al operador es ese candidato redimensionado, no el archivo.
 * =================================================================
 */

use argus_domain_models::roi::FeatureMethod;
use image::RgbImage;

use crate::capabilities::CapabilityRegistry;
use crate::errors::{CapabilityFault, EngineFault};
use crate::golden_store::GoldenStore;
use crate::imaging;

/// Resultado interno del motor Compare.
#[derive(Debug)]
pub struct CompareOutcome {
    pub similarity: f64,
    pub matched_file: String,
    pub threshold: f64,
    pub passed: bool,
    /// El golden redimensionado realmente puntuado (contrato con el UI).
    pub golden_used: RgbImage,
}

/**
 * Puntúa el recorte (ya normalizado en iluminación por el ejecutor)
 * contra el almacén dorado de la ROI y clasifica contra el umbral.
 *
 * # Errors:
 * - `Capability(Unavailable)`: método de extracción sin plugin registrado.
 * - `GoldenMissing`: la ROI no tiene referencia entrenada.
 */
pub fn compare_against_golden(
    capabilities: &CapabilityRegistry,
    store: &GoldenStore,
    normalized_crop: &RgbImage,
    threshold: f64,
    method: FeatureMethod,
) -> Result<CompareOutcome, EngineFault> {
    let extractor = capabilities
        .feature_extractor(method)
        .ok_or(CapabilityFault::Unavailable)?;

    // Las características del recorte se extraen una sola vez por ROI.
    let crop_features = extractor.extract(normalized_crop)?;
    let crop_width = normalized_crop.width();
    let crop_height = normalized_crop.height();

    let verdict = store.evaluate(threshold, |golden_candidate| {
        let resized_candidate = imaging::resize_to(golden_candidate, crop_width, crop_height);
        let normalized_candidate = imaging::normalize_illumination(&resized_candidate);
        let candidate_features = extractor.extract(&normalized_candidate)?;
        let similarity = imaging::cosine_similarity(&crop_features, &candidate_features);
        Ok((similarity, resized_candidate))
    })?;

    let passed = verdict.similarity >= threshold;

    Ok(CompareOutcome {
        similarity: verdict.similarity,
        matched_file: verdict.matched_file,
        threshold,
        passed,
        golden_used: verdict.golden_used,
    })
}
