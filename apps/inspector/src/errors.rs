// [apps/inspector/src/errors.rs]
/*!
 * =================================================================
 * APARATO: API FAULT CATALOG (V11.0 - STATUS DISCIPLINE)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: TAXONOMÍA DE FALLOS Y PROYECCIÓN A HTTP
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STATUS DISCIPLINE: Toda respuesta es un resultado completo o un
 *    único error estructurado con estatus en {400,404,409,500,503}.
 * 2. PARTIAL SUCCESS INSIDE: Las ROIs reprobadas viajan dentro del
 *    resultado con estatus 200; este catálogo solo cubre fallos que
 *    impiden correr la inspección de punta a punta.
 * =================================================================
 */

use argus_domain_inspection::AggregationFault;
use argus_domain_models::request::RequestFault;
use argus_infra_catalog::CatalogFault;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::state::session_registry::SessionFault;

/// Fallos a nivel petición del coordinador de inspección.
#[derive(Error, Debug)]
pub enum InspectionApiFault {
    #[error("SESSION_NOT_FOUND: {0}")]
    SessionNotFound(String),

    #[error("SESSION_BUSY: An inspection is already running on {0}")]
    SessionBusy(String),

    #[error("PRODUCT_NOT_FOUND: {0}")]
    ProductNotFound(String),

    #[error("INVALID_REQUEST: {0}")]
    InvalidRequest(String),

    #[error("INVALID_RECIPE: {0}")]
    RecipeInvalid(String),

    #[error("IMAGE_DECODE_FAULT: {0}")]
    ImageDecode(String),

    #[error("MAINTENANCE_ACTIVE: {0}")]
    Maintenance(String),

    #[error("INTERNAL_FAULT: {0}")]
    Internal(String),
}

impl InspectionApiFault {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::SessionNotFound(_) | Self::ProductNotFound(_) => StatusCode::NOT_FOUND,
            Self::SessionBusy(_) => StatusCode::CONFLICT,
            Self::InvalidRequest(_) | Self::RecipeInvalid(_) | Self::ImageDecode(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Maintenance(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InspectionApiFault {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<SessionFault> for InspectionApiFault {
    fn from(fault: SessionFault) -> Self {
        match fault {
            SessionFault::NotFound(session_id) => Self::SessionNotFound(session_id),
            SessionFault::Conflict(session_id) => Self::SessionBusy(session_id),
            SessionFault::WorkspaceIo(io_fault) => Self::Internal(io_fault.to_string()),
        }
    }
}

impl From<CatalogFault> for InspectionApiFault {
    fn from(fault: CatalogFault) -> Self {
        match fault {
            CatalogFault::ProductNotFound(product) => Self::ProductNotFound(product),
            CatalogFault::RecipeInvalid(validation) => Self::RecipeInvalid(validation.to_string()),
            other => Self::RecipeInvalid(other.to_string()),
        }
    }
}

impl From<RequestFault> for InspectionApiFault {
    fn from(fault: RequestFault) -> Self {
        match fault {
            RequestFault::MalformedBase64(detail) => Self::ImageDecode(detail),
            other => Self::InvalidRequest(other.to_string()),
        }
    }
}

impl From<AggregationFault> for InspectionApiFault {
    fn from(fault: AggregationFault) -> Self {
        Self::Internal(fault.to_string())
    }
}
