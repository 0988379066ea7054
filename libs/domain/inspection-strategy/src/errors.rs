// [libs/domain/inspection-strategy/src/errors.rs]
//! =================================================================
//! APARATO: INSPECTION ENGINE ERRORS (V9.0)
//! RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DEL MOTOR DE INSPECCIÓN
//! =================================================================
//!
//! Los mensajes cortos en minúsculas ('capability_unavailable',
//! 'decoder_timeout', 'golden_reference_missing') son contrato de
//! cable: viajan literalmente en el campo 'error' del registro ROI.

use thiserror::Error;

/// Fallos de un plugin de capacidad (decodificador, extractor, OCR).
#[derive(Error, Debug)]
pub enum CapabilityFault {
    /// Ningún plugin registrado cubre la capacidad solicitada.
    #[error("capability_unavailable")]
    Unavailable,

    /// El decodificador de barcode excedió su ventana dura de tiempo.
    #[error("decoder_timeout")]
    DecoderTimeout,

    /// Fallo interno reportado por el propio plugin.
    #[error("capability_fault: {0}")]
    Backend(String),
}

/// Fallos ROI-locales del motor; se degradan a `{passed:false, error}`
/// sin abortar el resto del panel.
#[derive(Error, Debug)]
pub enum EngineFault {
    /// El directorio dorado de la ROI no tiene `best_golden.jpg`.
    #[error("golden_reference_missing")]
    GoldenMissing,

    /// Acceso a disco del almacén dorado denegado o colapsado.
    #[error("golden_io_fault: {0}")]
    GoldenIo(#[from] std::io::Error),

    /// Un archivo dorado no decodifica como imagen.
    #[error("golden_image_fault: {0}")]
    GoldenImage(String),

    /// La ROI de color no tiene rangos declarados en la receta.
    #[error("color_config_missing")]
    ColorConfigMissing,

    #[error(transparent)]
    Capability(#[from] CapabilityFault),
}

/// Violación de un invariante de conteo en la agregación final.
/// Inalcanzable en una implementación correcta; burbujea como 500.
#[derive(Error, Debug)]
#[error("[L2_AGGREGATION_FAULT]: INVARIANT_VIOLATION -> {0}")]
pub struct AggregationFault(pub String);
