// [libs/domain/inspection-strategy/src/executor.rs]
/*!
 * =================================================================
 * APARATO: ROI EXECUTION ENGINE (V33.0 - PANEL PIPELINE)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PIPELINE POR ROI: RECORTE, ROTACIÓN, CAPACIDAD, ARTEFACTOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ROI-LOCAL FAULTS: Ningún fallo individual aborta el panel; toda
 *    excepción degrada a `{passed:false, error}` en esa ROI.
 * 2. POSITIONAL DISCIPLINE: En el despacho de capacidad la posición 2
 *    es el recorte capturado y la posición 3 el golden; el Proving
 *    Grounds asegura el orden (un intercambio histórico rompió el UI).
 * 3. EXACT ARTIFACTS: Se persiste el recorte exacto puntuado y, en
 *    Compare, el golden redimensionado exacto usado en la puntuación.
 * =================================================================
 */

use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use argus_domain_models::report::{RoiOutcomeRecord, RoiVerdict};
use argus_domain_models::roi::{NormalizedRoi, RoiKind, Rotation};
use image::RgbImage;
use tracing::{debug, warn};

use crate::capabilities::CapabilityRegistry;
use crate::context::{PanelTask, ProductContext};
use crate::engines::{barcode_engine, color_engine, compare_engine, ocr_engine};
use crate::errors::EngineFault;
use crate::golden_store::GoldenStore;

/// Umbral de respaldo si una ROI Compare llegara sin umbral declarado
/// (el normalizador lo impide; esto solo blinda el motor).
const FALLBACK_COMPARE_THRESHOLD: f64 = 0.9;

/// Motor de inspección: posee los plugins de capacidad y el candado
/// global de promoción dorada. Se construye una vez en la ignición y
/// se comparte inmutable entre sesiones y workers.
pub struct InspectionEngine {
    capabilities: Arc<CapabilityRegistry>,
    golden_update_lock: Arc<Mutex<()>>,
}

impl InspectionEngine {
    pub fn new(capabilities: Arc<CapabilityRegistry>) -> Self {
        Self {
            capabilities,
            golden_update_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Almacén dorado de una ROI bajo el candado global del motor.
    pub fn golden_store(&self, product: &ProductContext, roi_idx: u32) -> GoldenStore {
        GoldenStore::new(&product.golden_root, roi_idx, Arc::clone(&self.golden_update_lock))
    }

    /**
     * Ejecuta el pipeline completo de una ROI contra el panel.
     *
     * Pasos: recorte con clamp -> rotación -> normalización (Compare)
     * -> capacidad -> clasificación -> persistencia de artefactos.
     * Nunca retorna error: toda falla queda registrada en el récord.
     */
    pub fn evaluate_roi(&self, roi: &NormalizedRoi, task: &PanelTask<'_>) -> RoiOutcomeRecord {
        // 0. SEÑAL DE ABORTO (cliente desconectado / cancelación explícita)
        if task.termination_signal.load(Ordering::Relaxed) {
            return failed_record(roi, "aborted_by_client");
        }

        // 1. CLAMP & RECORTE
        let crop = match crate::imaging::crop_region(task.panel_image, &roi.coords) {
            Some(crop) => crop,
            None => {
                debug!(
                    "📐 [ROI_CLAMP]: ROI {} rect {:?} exceeds panel {}x{}",
                    roi.idx,
                    roi.coords.as_array(),
                    task.panel_image.width(),
                    task.panel_image.height()
                );
                return failed_record(roi, "out_of_bounds");
            }
        };

        // 2. ROTACIÓN (expansión de lienzo, principalmente OCR)
        let crop = if roi.rotation != Rotation::R0 {
            crate::imaging::apply_rotation(&crop, roi.rotation)
        } else {
            crop
        };

        // 3-5. DESPACHO DE CAPACIDAD Y CLASIFICACIÓN
        let (verdict, passed, scored_crop, golden_reference) =
            match self.run_capability(roi, crop, task.product) {
                Ok(dispatch) => dispatch,
                Err(capability_fault) => {
                    return failed_record(roi, &capability_fault.to_string());
                }
            };

        // 6. PERSISTENCIA DE ARTEFACTOS (el recorte exacto puntuado)
        let crop_file = format!("roi_{}.jpg", roi.idx);
        let roi_image_path = match persist_artifact(&scored_crop, &task.workspace.server_path(&crop_file)) {
            Ok(()) => Some(task.workspace.client_path(&crop_file)),
            Err(write_fault) => {
                warn!("💾 [ARTIFACT_FAULT]: ROI {} crop not persisted: {}", roi.idx, write_fault);
                return RoiOutcomeRecord {
                    error: Some(format!("artifact_write_failed: {}", write_fault)),
                    passed: false,
                    ..record_skeleton(roi, verdict)
                };
            }
        };

        let golden_image_path = match &golden_reference {
            Some(golden_used) => {
                let golden_file = format!("golden_{}.jpg", roi.idx);
                match persist_artifact(golden_used, &task.workspace.server_path(&golden_file)) {
                    Ok(()) => Some(task.workspace.client_path(&golden_file)),
                    Err(write_fault) => {
                        warn!(
                            "💾 [ARTIFACT_FAULT]: ROI {} golden not persisted: {}",
                            roi.idx, write_fault
                        );
                        return RoiOutcomeRecord {
                            error: Some(format!("artifact_write_failed: {}", write_fault)),
                            passed: false,
                            roi_image_path,
                            ..record_skeleton(roi, verdict)
                        };
                    }
                }
            }
            None => None,
        };

        RoiOutcomeRecord {
            passed,
            roi_image_path,
            golden_image_path,
            ..record_skeleton(roi, verdict)
        }
    }

    /**
     * Despacho polimórfico por tipo de ROI.
     *
     * Disciplina posicional de la tupla de retorno (contrato con el
     * UI de operador): 0 veredicto, 1 aprobación, 2 recorte capturado,
     * 3 golden redimensionado (ausente fuera de Compare).
     */
    pub(crate) fn run_capability(
        &self,
        roi: &NormalizedRoi,
        crop: RgbImage,
        product: &ProductContext,
    ) -> Result<(RoiVerdict, bool, RgbImage, Option<RgbImage>), EngineFault> {
        match roi.kind {
            RoiKind::Barcode => {
                let (verdict, passed) = barcode_engine::read_barcode(&self.capabilities, &crop)?;
                Ok((verdict, passed, crop, None))
            }

            RoiKind::Compare => {
                // Normalización de iluminación exclusiva del tipo Compare;
                // el recorte persistido es el normalizado que se puntuó.
                let normalized_crop = crate::imaging::normalize_illumination(&crop);
                let threshold = roi.ai_threshold.unwrap_or(FALLBACK_COMPARE_THRESHOLD);
                let store = self.golden_store(product, roi.idx);

                let outcome = compare_engine::compare_against_golden(
                    &self.capabilities,
                    &store,
                    &normalized_crop,
                    threshold,
                    roi.feature_method,
                )?;

                debug!(
                    "🔍 [COMPARE]: ROI {} similarity {:.4} vs {:.2} ({})",
                    roi.idx, outcome.similarity, outcome.threshold, outcome.matched_file
                );

                let verdict =
                    RoiVerdict::compare(outcome.similarity, outcome.threshold, outcome.passed);
                Ok((verdict, outcome.passed, normalized_crop, Some(outcome.golden_used)))
            }

            RoiKind::Ocr => {
                let (verdict, passed) = ocr_engine::recognize_text(
                    &self.capabilities,
                    &crop,
                    roi.expected_text.as_deref(),
                )?;
                Ok((verdict, passed, crop, None))
            }

            RoiKind::Color => {
                let (verdict, passed) = color_engine::classify_color(&crop, &product.color_ranges)?;
                Ok((verdict, passed, crop, None))
            }
        }
    }
}

/// Esqueleto común del registro; el llamador ajusta veredicto y rutas.
fn record_skeleton(roi: &NormalizedRoi, verdict: RoiVerdict) -> RoiOutcomeRecord {
    RoiOutcomeRecord {
        roi_id: roi.idx,
        device_id: roi.device_location,
        roi_type_name: roi.kind.type_name().to_string(),
        passed: false,
        coordinates: roi.coords,
        roi_image_path: None,
        golden_image_path: None,
        error: None,
        verdict,
        is_primary_barcode: roi.is_primary_barcode(),
    }
}

/// Registro reprobado con el veredicto vacío canónico de su tipo.
pub(crate) fn failed_record(roi: &NormalizedRoi, error: &str) -> RoiOutcomeRecord {
    let empty_verdict = match roi.kind {
        RoiKind::Barcode => RoiVerdict::Barcode { barcode_values: Vec::new() },
        RoiKind::Compare => {
            RoiVerdict::compare(0.0, roi.ai_threshold.unwrap_or(FALLBACK_COMPARE_THRESHOLD), false)
        }
        RoiKind::Ocr => RoiVerdict::Ocr { ocr_text: String::new() },
        RoiKind::Color => RoiVerdict::Color {
            detected_color: String::new(),
            match_percentage: 0.0,
            match_percentage_raw: 0.0,
            dominant_color: [0, 0, 0],
            threshold: 0.0,
        },
    };

    RoiOutcomeRecord {
        error: Some(error.to_string()),
        ..record_skeleton(roi, empty_verdict)
    }
}

fn persist_artifact(artifact: &RgbImage, target: &Path) -> Result<(), String> {
    artifact.save(target).map_err(|save_fault| save_fault.to_string())
}
