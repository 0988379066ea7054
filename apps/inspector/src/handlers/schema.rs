// [apps/inspector/src/handlers/schema.rs]
/*!
 * =================================================================
 * APARATO: SCHEMA PUBLISHER HANDLER (V8.0 - MACHINE ORACLE)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PUBLICACIÓN DE DESCRIPTORES DE ESQUEMA
 *
 * Los clientes consultan estos endpoints de solo lectura para
 * auto-adaptarse entre versiones del contrato ROI/resultado.
 * =================================================================
 */

use argus_domain_models::schema;
use axum::extract::Json;
use axum::response::IntoResponse;

/// Endpoint: GET /schema/roi
pub async fn handle_roi_schema() -> impl IntoResponse {
    Json(schema::roi_schema_descriptor())
}

/// Endpoint: GET /schema/result
pub async fn handle_result_schema() -> impl IntoResponse {
    Json(schema::result_schema_descriptor())
}

/// Endpoint: GET /schema/version
pub async fn handle_version_schema() -> impl IntoResponse {
    Json(schema::version_descriptor())
}
