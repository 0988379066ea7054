// [apps/inspector/src/services/mod.rs]
//! =================================================================
//! APARATO: APPLICATION SERVICES ROOT (V5.0)
//! RESPONSABILIDAD: ORQUESTACIÓN DE INSPECCIÓN Y DAEMONS DE FONDO
//! =================================================================

pub mod barcode_resolver;
pub mod coordinator;
pub mod reaper;

pub use reaper::spawn_reaper;
