// [libs/domain/models-rs/src/schema.rs]
/*!
 * =================================================================
 * APARATO: SCHEMA DESCRIPTOR ORACLE (V6.0 - SELF ADAPTATION)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DESCRIPTORES DE ESQUEMA LEGIBLES POR MÁQUINA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SELF ADAPTATION: Los clientes consultan estos descriptores para
 *    auto-adaptarse entre versiones sin redespliegue coordinado.
 * 2. SINGLE SOURCE: Los descriptores se derivan del mismo módulo que
 *    define los tipos del runtime; no existe un segundo catálogo.
 * =================================================================
 */

use serde_json::{json, Value};

/// Versión del contrato de ROI canónica (anchuras retrocompatibles 3..11).
pub const ROI_SCHEMA_VERSION: &str = "3.0";
/// Versión del contrato de resultado de inspección.
pub const RESULT_SCHEMA_VERSION: &str = "2.0";

/// Descriptor completo de la estructura ROI: campos, enumeraciones,
/// defaults legados y anchuras aceptadas.
pub fn roi_schema_descriptor() -> Value {
    json!({
        "version": ROI_SCHEMA_VERSION,
        "canonical_width": 11,
        "accepted_widths": { "min": 3, "max": 11 },
        "fields": [
            { "position": 0, "name": "idx", "type": "positive_int",
              "notes": "unique per product; names the golden directory" },
            { "position": 1, "name": "type", "type": "enum_int",
              "values": { "1": "barcode", "2": "compare", "3": "ocr", "4": "color" } },
            { "position": 2, "name": "coords", "type": "int4_tuple",
              "constraints": "x1<x2, y1<y2, non-negative" },
            { "position": 3, "name": "focus", "type": "positive_int", "default": 305 },
            { "position": 4, "name": "exposure", "type": "positive_int",
              "unit": "microseconds", "default": 3000 },
            { "position": 5, "name": "ai_threshold", "type": "real_0_1",
              "applies_to": "compare", "default_for_compare": 0.9 },
            { "position": 6, "name": "feature_method", "type": "enum_str",
              "values": ["deep_cnn", "keypoint_local", "keypoint_binary",
                          "generic", "barcode", "ocr", "none"] },
            { "position": 7, "name": "rotation", "type": "enum_int",
              "values": [0, 90, 180, 270], "default": 0 },
            { "position": 8, "name": "device_location", "type": "positive_int", "default": 1 },
            { "position": 9, "name": "expected_text", "type": "string",
              "applies_to": "ocr", "optional": true },
            { "position": 10, "name": "is_device_barcode", "type": "bool",
              "applies_to": "barcode", "optional": true,
              "constraints": "at most one true per device_location" }
        ]
    })
}

/// Descriptor de la estructura de resultado (claves comunes + por tipo).
pub fn result_schema_descriptor() -> Value {
    json!({
        "version": RESULT_SCHEMA_VERSION,
        "roi_result_common_keys": [
            "roi_id", "device_id", "roi_type_name", "passed", "coordinates",
            "roi_image_path", "golden_image_path", "error?"
        ],
        "roi_result_type_keys": {
            "barcode": ["barcode_values"],
            "compare": ["match_result", "ai_similarity", "threshold"],
            "ocr": ["ocr_text"],
            "color": ["detected_color", "match_percentage", "match_percentage_raw",
                       "dominant_color", "threshold"]
        },
        "device_summary_keys": [
            "total_rois", "passed_rois", "failed_rois", "device_passed",
            "barcode", "results"
        ],
        "overall_result_keys": ["passed", "total_rois", "passed_rois", "failed_rois"],
        "notes": {
            "device_summaries": "integer device ids serialize as string keys",
            "processing_time": "wall-clock seconds, floating point",
            "barcode_fallback": "\"N/A\" when no source applies"
        }
    })
}

/// Descriptor de versiones para el endpoint `/schema/version`.
pub fn version_descriptor() -> Value {
    json!({
        "roi_schema_version": ROI_SCHEMA_VERSION,
        "result_schema_version": RESULT_SCHEMA_VERSION,
        "backward_compatible_roi_widths": [3, 4, 5, 6, 7, 8, 9, 10, 11]
    })
}
