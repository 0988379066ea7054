// [apps/inspector/src/handlers/admin.rs]
/*!
 * =================================================================
 * APARATO: ADMINISTRATION HANDLER (V13.0 - OPERATOR COMMAND)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: MODO DE MANTENIMIENTO Y ENTRENAMIENTO DORADO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. MAINTENANCE COMMAND: El operador suspende y reanuda el despacho
 *    sin matar el proceso; el escudo perimetral responde 503 con la
 *    razón declarada mientras dure la suspensión.
 * 2. GOLDEN TRAINING: Alta de referencias doradas por ROI; la
 *    primera imagen corona el 'best_golden', las siguientes se
 *    archivan como alternates bajo el candado de promoción.
 * =================================================================
 */

use argus_domain_inspection::ProductContext;
use argus_domain_models::request::ImageSource;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::InspectionApiFault;
use crate::state::{AppState, SystemMode};

/// Cuerpo de `POST /admin/maintenance`.
#[derive(Debug, Deserialize)]
pub struct MaintenancePayload {
    pub reason: String,
}

/// Cuerpo de `POST /admin/golden/train`.
#[derive(Debug, Deserialize)]
pub struct GoldenTrainingPayload {
    pub product_name: String,
    pub roi_idx: u32,
    /// Imagen de referencia inline (base64, con o sin prefijo data:).
    pub image: String,
}

pub struct AdministrationHandler;

impl AdministrationHandler {
    /**
     * Endpoint: POST /admin/maintenance
     *
     * Suspende el despacho de inspecciones declarando la razón.
     */
    #[instrument(skip(application_state, maintenance_payload))]
    pub async fn handle_maintenance_transition(
        State(application_state): State<AppState>,
        Json(maintenance_payload): Json<MaintenancePayload>,
    ) -> impl IntoResponse {
        application_state.set_mode(SystemMode::Maintenance(maintenance_payload.reason.clone()));
        (
            StatusCode::OK,
            Json(json!({ "mode": "maintenance", "reason": maintenance_payload.reason })),
        )
    }

    /**
     * Endpoint: POST /admin/resume
     *
     * Reanuda el despacho nominal de inspecciones.
     */
    #[instrument(skip(application_state))]
    pub async fn handle_operational_resume(
        State(application_state): State<AppState>,
    ) -> impl IntoResponse {
        application_state.set_mode(SystemMode::Operational);
        (StatusCode::OK, Json(json!({ "mode": "operational" })))
    }

    /**
     * Endpoint: POST /admin/golden/train
     *
     * Registra una referencia dorada para la ROI declarada.
     *
     * # Errors:
     * - `NOT_FOUND`: producto inexistente.
     * - `BAD_REQUEST`: imagen inline indecodificable.
     */
    #[instrument(
        skip(application_state, training_payload),
        fields(product = %training_payload.product_name, roi = training_payload.roi_idx)
    )]
    pub async fn handle_golden_training(
        State(application_state): State<AppState>,
        Json(training_payload): Json<GoldenTrainingPayload>,
    ) -> impl IntoResponse {
        // 1. RECETA DEL PRODUCTO (valida existencia y ROIs)
        let recipe = match application_state.catalog.load_recipe(&training_payload.product_name) {
            Ok(recipe) => recipe,
            Err(catalog_fault) => return InspectionApiFault::from(catalog_fault).into_response(),
        };

        if !recipe.rois.iter().any(|roi| roi.idx == training_payload.roi_idx) {
            return InspectionApiFault::InvalidRequest(format!(
                "ROI {} is not declared by product '{}'",
                training_payload.roi_idx, training_payload.product_name
            ))
            .into_response();
        }

        // 2. DECODIFICACIÓN DE LA REFERENCIA
        let reference_bytes = match ImageSource::decode_inline(&training_payload.image) {
            Ok(bytes) => bytes,
            Err(request_fault) => return InspectionApiFault::from(request_fault).into_response(),
        };
        let reference_image = match image::load_from_memory(&reference_bytes) {
            Ok(decoded) => decoded.to_rgb8(),
            Err(decode_fault) => {
                return InspectionApiFault::ImageDecode(decode_fault.to_string()).into_response()
            }
        };

        // 3. ALTA BAJO EL CANDADO DE PROMOCIÓN
        let product_context = ProductContext {
            product_name: recipe.product_name.clone(),
            golden_root: recipe.golden_root.clone(),
            color_ranges: Vec::new(),
        };
        let store = application_state
            .engine
            .golden_store(&product_context, training_payload.roi_idx);

        match store.register_reference(&reference_image) {
            Ok(registered_as) => {
                info!(
                    "📦 [GOLDEN_TRAINED]: {}/roi_{} -> {}",
                    training_payload.product_name, training_payload.roi_idx, registered_as
                );
                (
                    StatusCode::OK,
                    Json(json!({
                        "product_name": training_payload.product_name,
                        "roi_idx": training_payload.roi_idx,
                        "registered_as": registered_as,
                    })),
                )
                    .into_response()
            }
            Err(store_fault) => {
                warn!("❌ [TRAINING_FAULT]: {}", store_fault);
                InspectionApiFault::Internal(store_fault.to_string()).into_response()
            }
        }
    }
}
