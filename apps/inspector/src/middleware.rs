// [apps/inspector/src/middleware.rs]
/*!
 * =================================================================
 * APARATO: PERIMETER GUARDS (V7.0 - MAINTENANCE SHIELD)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: INTERCEPTACIÓN PERIMETRAL POR MODO DE SISTEMA
 * =================================================================
 */

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/**
 * Guardia de salud: en modo mantenimiento toda ruta protegida
 * responde 503 con la razón declarada. `/health` y la landing quedan
 * fuera del escudo a propósito.
 */
pub async fn health_guard(
    State(application_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match application_state.is_operational() {
        Ok(()) => next.run(request).await,
        Err(maintenance_reason) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": format!("MAINTENANCE_ACTIVE: {}", maintenance_reason) })),
        )
            .into_response(),
    }
}
