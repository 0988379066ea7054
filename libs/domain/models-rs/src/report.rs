// [libs/domain/models-rs/src/report.rs]
/*!
 * =================================================================
 * APARATO: INSPECTION RESULT CONTRACTS (V22.0 - BIT EXACT KEYS)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: FORMA DE CABLE DEL VEREDICTO DE INSPECCIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BIT EXACT KEYS: Las claves serializadas son el contrato con el
 *    UI de operador; los campos específicos de tipo viajan aplanados
 *    mediante una variante etiquetada por estructura.
 * 2. STRING KEY DISCIPLINE: Los ids de dispositivo serializan como
 *    claves string en 'device_summaries'.
 * 3. INVARIANT READY: Los contadores se derivan con constructores
 *    auditables, nunca a mano en los handlers.
 * =================================================================
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::roi::RoiCoordinates;

/// Carga específica por tipo de ROI, aplanada dentro del registro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoiVerdict {
    Barcode {
        barcode_values: Vec<String>,
    },
    Compare {
        match_result: String,
        ai_similarity: f64,
        threshold: f64,
    },
    Ocr {
        ocr_text: String,
    },
    Color {
        detected_color: String,
        match_percentage: f64,
        match_percentage_raw: f64,
        dominant_color: [u8; 3],
        threshold: f64,
    },
}

impl RoiVerdict {
    /// Veredicto Compare con el literal de cable "Match" / "Different".
    pub fn compare(similarity: f64, threshold: f64, passed: bool) -> Self {
        Self::Compare {
            match_result: if passed { "Match" } else { "Different" }.to_string(),
            ai_similarity: similarity,
            threshold,
        }
    }
}

/// Registro de resultado de una ROI individual (entrada de `roi_results`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiOutcomeRecord {
    pub roi_id: u32,
    pub device_id: u32,
    /// Uno de los cuatro nombres canónicos en minúsculas.
    pub roi_type_name: String,
    pub passed: bool,
    pub coordinates: RoiCoordinates,
    /// Ruta visible para el cliente del recorte exacto usado en el chequeo.
    pub roi_image_path: Option<String>,
    /// Ruta visible para el cliente del golden redimensionado (solo Compare).
    pub golden_image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub verdict: RoiVerdict,
    /// Marca interna de barcode primario; nunca viaja por el cable.
    #[serde(skip)]
    pub is_primary_barcode: bool,
}

/// Resumen por dispositivo físico dentro del panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub total_rois: usize,
    pub passed_rois: usize,
    pub failed_rois: usize,
    pub device_passed: bool,
    /// Barcode resuelto por prioridad; "N/A" cuando ninguna fuente aplica.
    pub barcode: String,
    pub results: Vec<RoiOutcomeRecord>,
}

/// Veredicto global del panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallResult {
    pub passed: bool,
    pub total_rois: usize,
    pub passed_rois: usize,
    pub failed_rois: usize,
}

impl OverallResult {
    /// Regla global: aprobado si hubo al menos una ROI y ninguna falló.
    pub fn from_counts(total_rois: usize, passed_rois: usize) -> Self {
        let failed_rois = total_rois - passed_rois;
        Self {
            passed: total_rois > 0 && failed_rois == 0,
            total_rois,
            passed_rois,
            failed_rois,
        }
    }
}

/// Respuesta completa de una inspección simple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionReport {
    pub roi_results: Vec<RoiOutcomeRecord>,
    /// Claves string: `device_summaries["1"]`.
    pub device_summaries: BTreeMap<String, DeviceSummary>,
    pub overall_result: OverallResult,
    /// Segundos de pared del pipeline completo.
    pub processing_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Desglose por grupo de captura en la respuesta agrupada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOutcome {
    pub focus: u32,
    pub exposure: u32,
    pub total_rois: usize,
    pub passed_rois: usize,
    pub failed_rois: usize,
}

/// Respuesta completa de una inspección agrupada multi-captura.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedInspectionReport {
    pub session_id: String,
    pub product_name: String,
    #[serde(flatten)]
    pub report: InspectionReport,
    /// Claves "focus,exposure" tal como llegaron en la petición.
    pub group_results: BTreeMap<String, GroupOutcome>,
}
