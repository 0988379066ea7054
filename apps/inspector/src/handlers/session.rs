// [apps/inspector/src/handlers/session.rs]
/*!
 * =================================================================
 * APARATO: SESSION LIFECYCLE HANDLER (V17.0 - WORKSPACE GATE)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CREACIÓN, ESTADO Y CIERRE DE SESIONES
 * =================================================================
 */

use argus_domain_models::request::SessionCreatePayload;
use argus_domain_models::session::SessionCreatedReport;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::InspectionApiFault;
use crate::state::AppState;

pub struct SessionLifecycleHandler;

impl SessionLifecycleHandler {
    /**
     * Endpoint: POST /session/create
     *
     * Valida la existencia del producto y forja el workspace limpio.
     *
     * # Errors:
     * - `NOT_FOUND`: el producto no existe bajo la raíz de recetas.
     * - `INTERNAL_SERVER_ERROR`: el share no permitió crear el workspace.
     */
    #[instrument(skip(application_state, creation_payload), fields(product = %creation_payload.product_name))]
    pub async fn handle_session_creation(
        State(application_state): State<AppState>,
        Json(creation_payload): Json<SessionCreatePayload>,
    ) -> impl IntoResponse {
        if !application_state.catalog.product_exists(&creation_payload.product_name) {
            return InspectionApiFault::ProductNotFound(creation_payload.product_name)
                .into_response();
        }

        match application_state.sessions.create(&creation_payload.product_name) {
            Ok(session_id) => {
                if let Some(client_info) = &creation_payload.client_info {
                    info!("🪪 [CLIENT_INFO]: {} -> {}", session_id, client_info);
                }
                (
                    StatusCode::OK,
                    Json(SessionCreatedReport { session_id: session_id.to_string() }),
                )
                    .into_response()
            }
            Err(workspace_fault) => {
                warn!("❌ [SESSION_CREATE_FAULT]: {}", workspace_fault);
                InspectionApiFault::from(workspace_fault).into_response()
            }
        }
    }

    /**
     * Endpoint: GET /session/{id}/status
     */
    #[instrument(skip(application_state), fields(session = %session_id_raw))]
    pub async fn handle_session_status(
        State(application_state): State<AppState>,
        Path(session_id_raw): Path<String>,
    ) -> impl IntoResponse {
        let session_id = match Uuid::parse_str(&session_id_raw) {
            Ok(parsed) => parsed,
            Err(_) => {
                return InspectionApiFault::InvalidRequest(format!(
                    "malformed session id '{}'",
                    session_id_raw
                ))
                .into_response()
            }
        };

        match application_state.sessions.status(session_id) {
            Some(status_report) => (StatusCode::OK, Json(status_report)).into_response(),
            None => InspectionApiFault::SessionNotFound(session_id_raw).into_response(),
        }
    }

    /**
     * Endpoint: GET /session/{id}/last_result
     *
     * Último veredicto sellado, para revisión del operador.
     */
    #[instrument(skip(application_state), fields(session = %session_id_raw))]
    pub async fn handle_session_last_result(
        State(application_state): State<AppState>,
        Path(session_id_raw): Path<String>,
    ) -> impl IntoResponse {
        let session_id = match Uuid::parse_str(&session_id_raw) {
            Ok(parsed) => parsed,
            Err(_) => {
                return InspectionApiFault::InvalidRequest(format!(
                    "malformed session id '{}'",
                    session_id_raw
                ))
                .into_response()
            }
        };

        match application_state.sessions.last_results(session_id) {
            Ok(Some(last_verdict)) => (StatusCode::OK, Json(last_verdict)).into_response(),
            Ok(None) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "NO_RESULTS_YET: Session has not inspected" })),
            )
                .into_response(),
            Err(session_fault) => InspectionApiFault::from(session_fault).into_response(),
        }
    }

    /**
     * Endpoint: POST /session/{id}/close
     *
     * Purga el workspace recursivamente; el reporte declara si la
     * limpieza física tuvo éxito.
     */
    #[instrument(skip(application_state), fields(session = %session_id_raw))]
    pub async fn handle_session_close(
        State(application_state): State<AppState>,
        Path(session_id_raw): Path<String>,
    ) -> impl IntoResponse {
        let session_id = match Uuid::parse_str(&session_id_raw) {
            Ok(parsed) => parsed,
            Err(_) => {
                return InspectionApiFault::InvalidRequest(format!(
                    "malformed session id '{}'",
                    session_id_raw
                ))
                .into_response()
            }
        };

        match application_state.sessions.close(session_id) {
            Ok(closed_report) => (StatusCode::OK, Json(closed_report)).into_response(),
            Err(session_fault) => InspectionApiFault::from(session_fault).into_response(),
        }
    }
}

/// Endpoint: GET /health (siempre abierto, incluso en mantenimiento).
pub async fn handle_health_probe(State(application_state): State<AppState>) -> impl IntoResponse {
    let mode_label = match application_state.is_operational() {
        Ok(()) => "operational".to_string(),
        Err(reason) => format!("maintenance: {}", reason),
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "STATUS_OK",
            "mode": mode_label,
            "active_sessions": application_state.sessions.active_count(),
        })),
    )
}
