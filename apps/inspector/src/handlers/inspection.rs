// [apps/inspector/src/handlers/inspection.rs]
/*!
 * =================================================================
 * APARATO: INSPECTION HANDLER (V23.0 - VERDICT GATEWAY)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ADAPTACIÓN HTTP DE LAS DOS ENTRADAS DE INSPECCIÓN
 *
 * # Logic:
 * Los handlers son adaptadores finos: decodifican la petición, delegan
 * al coordinador y proyectan el fallo tipado al estatus HTTP. El éxito
 * parcial (ROIs reprobadas) viaja dentro del resultado con 200.
 * =================================================================
 */

use argus_domain_models::request::{GroupedInspectPayload, InspectPayload};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::services::coordinator;
use crate::state::AppState;

pub struct InspectionHandler;

impl InspectionHandler {
    /**
     * Endpoint: POST /session/{id}/inspect
     *
     * # Errors:
     * - `NOT_FOUND`: sesión o producto inexistentes.
     * - `CONFLICT`: otra inspección en vuelo sobre la sesión.
     * - `BAD_REQUEST`: petición malformada (imagen, mapas, receta).
     */
    #[instrument(skip(application_state, inspect_payload), fields(session = %session_id_raw))]
    pub async fn handle_single_inspection(
        State(application_state): State<AppState>,
        Path(session_id_raw): Path<String>,
        Json(inspect_payload): Json<InspectPayload>,
    ) -> impl IntoResponse {
        match coordinator::run_single_inspection(
            &application_state,
            &session_id_raw,
            inspect_payload,
        )
        .await
        {
            Ok(inspection_report) => (StatusCode::OK, Json(inspection_report)).into_response(),
            Err(api_fault) => api_fault.into_response(),
        }
    }

    /**
     * Endpoint: POST /session/{id}/process_grouped_inspection
     */
    #[instrument(skip(application_state, grouped_payload), fields(session = %session_id_raw))]
    pub async fn handle_grouped_inspection(
        State(application_state): State<AppState>,
        Path(session_id_raw): Path<String>,
        Json(grouped_payload): Json<GroupedInspectPayload>,
    ) -> impl IntoResponse {
        match coordinator::run_grouped_inspection(
            &application_state,
            &session_id_raw,
            grouped_payload,
        )
        .await
        {
            Ok(grouped_report) => (StatusCode::OK, Json(grouped_report)).into_response(),
            Err(api_fault) => api_fault.into_response(),
        }
    }
}
