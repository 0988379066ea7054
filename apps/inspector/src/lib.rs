// [apps/inspector/src/lib.rs]
/*!
 * =================================================================
 * APARATO: INSPECTOR LIBRARY ROOT (V8.0 - SOVEREIGN AUTHORITY)
 * CLASIFICACIÓN: CRATE ROOT (ESTRATO L3)
 * RESPONSABILIDAD: DEFINICIÓN SUPREMA DEL ÁRBOL DE MÓDULOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. MODULE HIERARCHY: Autoridad única de módulos para que 'crate::'
 *    resuelva de forma determinista en librería y binario.
 * 2. PUBLIC INTERFACE: Expone 'prelude' para la ignición mínima del
 *    Kernel desde 'main.rs' y desde el Proving Grounds.
 * =================================================================
 */

// --- ESTRATO DE INFRAESTRUCTURA Y ARRANQUE ---
/// Adquisición única de coordenadas de entorno.
pub mod config;
/// Núcleo de mando y control para la ignición de servicios.
pub mod kernel;

// --- ESTRATO DE DATOS Y ESTADO (L1-APP) ---
/// Estado compartido: motor, catálogo, enlace y sesiones.
pub mod state;

// --- ESTRATO DE TRANSPORTE Y ACCIÓN ---
/// Taxonomía de fallos de API y su proyección HTTP.
pub mod errors;
/// Adaptadores de entrada HTTP.
pub mod handlers;
/// Topología de red y rutas.
pub mod routes;

// --- ESTRATO DE SEGURIDAD Y SOPORTE ---
/// Guardianes perimetrales (escudo de mantenimiento).
pub mod middleware;
/// Coordinación de inspección, resolución de barcodes y daemons.
pub mod services;

/**
 * PRELUDIO DEL INSPECTOR
 *
 * Re-exportación estratégica de los componentes necesarios para la
 * ignición mínima del sistema.
 */
pub mod prelude {
    pub use crate::config::InspectorConfig;
    pub use crate::kernel::InspectorKernel;
    pub use crate::state::{AppState, SystemMode};
}
