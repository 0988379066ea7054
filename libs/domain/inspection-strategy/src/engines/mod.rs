// [libs/domain/inspection-strategy/src/engines/mod.rs]
//! =================================================================
//! APARATO: CAPABILITY ENGINES ROOT (V6.0)
//! RESPONSABILIDAD: UN MOTOR ATÓMICO POR TIPO DE ROI
//! =================================================================

pub mod barcode_engine;
pub mod color_engine;
pub mod compare_engine;
pub mod ocr_engine;
