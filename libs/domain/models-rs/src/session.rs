// [libs/domain/models-rs/src/session.rs]
//! =================================================================
//! APARATO: SESSION LIFECYCLE DTOS (V5.0)
//! RESPONSABILIDAD: CONTRATOS DE CICLO DE VIDA DE SESIÓN
//! =================================================================

use serde::{Deserialize, Serialize};

/// Respuesta de `POST /session/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreatedReport {
    pub session_id: String,
}

/// Respuesta de `GET /session/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusReport {
    pub session_id: String,
    pub product_name: String,
    pub inspection_count: u64,
    pub created_at: String,
    pub last_activity: String,
    pub inspection_in_progress: bool,
}

/// Respuesta de `POST /session/{id}/close`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClosedReport {
    pub duration_seconds: f64,
    pub inspection_count: u64,
    /// Falso si la purga del workspace falló (la sesión igual se cierra).
    pub directory_cleaned: bool,
}
