// [libs/domain/models-rs/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS ROOT (V9.0 - SINGLE SOURCE OF TRUTH)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN SUPREMA DE CONTRATOS DE INSPECCIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL AUTHORITY: Todo contrato compartido entre el servidor,
 *    el catálogo y el motor de inspección nace en este estrato.
 * 2. SCHEMA PARITY: Los descriptores de esquema publicados por la
 *    API se derivan de las mismas definiciones que el runtime usa.
 * 3. ZERO ABBREVIATIONS: Nomenclatura nominal absoluta.
 * =================================================================
 */

/// Configuración cromática por producto (rangos RGB/HSV nominados).
pub mod color;
/// Adaptador de anchuras legadas hacia la forma canónica de 11 campos.
pub mod normalizer;
/// Contratos de resultado: registros por ROI, resúmenes y veredicto global.
pub mod report;
/// Formas de entrada del cliente (imagen inline o en workspace, mapas de barcode).
pub mod request;
/// Modelo canónico de Región de Interés y sus enumeraciones.
pub mod roi;
/// Descriptores de esquema legibles por máquina (auto-adaptación de clientes).
pub mod schema;
/// DTOs del ciclo de vida de sesión.
pub mod session;

pub use color::{ColorRange, ColorSpace};
pub use normalizer::{normalize, validate_set, RawRoi, RoiValidationFault};
pub use report::{
    DeviceSummary, GroupOutcome, GroupedInspectionReport, InspectionReport, OverallResult,
    RoiOutcomeRecord, RoiVerdict,
};
pub use request::{
    CaptureGroupPayload, DeviceBarcodeField, GroupedInspectPayload, ImageSource, InspectPayload,
    RequestFault, SessionCreatePayload,
};
pub use roi::{FeatureMethod, NormalizedRoi, RoiCoordinates, RoiKind, Rotation};
