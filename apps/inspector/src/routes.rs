// [apps/inspector/src/routes.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN ROUTING MATRIX (V12.0 - INSPECTION TOPOLOGY)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: TOPOLOGÍA DE RUTAS DE SESIÓN, INSPECCIÓN Y ESQUEMA
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. REST Táctico para el ciclo de sesión e inspección.
 * 2. Oráculo de Esquema de solo lectura para auto-adaptación.
 * 3. Escudo de mantenimiento sobre el estrato de sesión; /health y
 *    la landing permanecen abiertos.
 * =================================================================
 */

use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{admin, inspection, schema, session, visual};
use crate::middleware::health_guard;
use crate::state::AppState;

pub fn create_inspection_router(application_shared_state: AppState) -> Router {
    // Escudo de Red: CORS permisivo para dashboards de operador.
    let network_security_shield = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    // ESTRATO TÁCTICO: Ciclo de vida de sesión e inspección.
    let session_stratum = Router::new()
        // Apertura de sesión y workspace
        .route("/create", post(session::SessionLifecycleHandler::handle_session_creation))
        // Estado de la sesión
        .route("/:session_id/status", get(session::SessionLifecycleHandler::handle_session_status))
        // Último veredicto sellado (revisión del operador)
        .route(
            "/:session_id/last_result",
            get(session::SessionLifecycleHandler::handle_session_last_result),
        )
        // Cierre y purga del workspace
        .route("/:session_id/close", post(session::SessionLifecycleHandler::handle_session_close))
        // Inspección de imagen única
        .route("/:session_id/inspect", post(inspection::InspectionHandler::handle_single_inspection))
        // Inspección agrupada multi-captura
        .route(
            "/:session_id/process_grouped_inspection",
            post(inspection::InspectionHandler::handle_grouped_inspection),
        )
        // Escudo de mantenimiento (503 con razón)
        .layer(middleware::from_fn_with_state(
            application_shared_state.clone(),
            health_guard,
        ));

    // ORÁCULO DE ESQUEMA: Solo lectura, sin escudo.
    let schema_stratum = Router::new()
        .route("/roi", get(schema::handle_roi_schema))
        .route("/result", get(schema::handle_result_schema))
        .route("/version", get(schema::handle_version_schema));

    // ESTRATO DE ADMINISTRACIÓN: Mando de operador, fuera del escudo
    // (la salida de mantenimiento debe funcionar durante el mantenimiento).
    let admin_stratum = Router::new()
        .route("/maintenance", post(admin::AdministrationHandler::handle_maintenance_transition))
        .route("/resume", post(admin::AdministrationHandler::handle_operational_resume))
        .route("/golden/train", post(admin::AdministrationHandler::handle_golden_training));

    // COMPOSICIÓN GLOBAL (Root Topology)
    Router::new()
        .route("/", get(visual::handle_visual_landing))
        .route("/health", get(session::handle_health_probe))
        .nest("/session", session_stratum)
        .nest("/schema", schema_stratum)
        .nest("/admin", admin_stratum)
        .layer(network_security_shield)
        .with_state(application_shared_state)
}
