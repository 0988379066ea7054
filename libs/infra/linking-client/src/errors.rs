// [libs/infra/linking-client/src/errors.rs]
//! =================================================================
//! APARATO: LINKING CLIENT ERRORS (V4.0)
//! RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE ENLACE EXTERNO
//! =================================================================

use thiserror::Error;

/// Fallos del servicio de enlace. Todos se degradan al barcode crudo
/// en el resolutor; existen como tipos para el rastro de WARN.
#[derive(Error, Debug)]
pub enum LinkingFault {
    #[error("LINK_NETWORK_FAULT: {0}")]
    NetworkFault(#[from] reqwest::Error),

    #[error("LINK_REJECTION: Server returned status {0}")]
    ServerRejection(u16),

    #[error("LINK_NULL_RESULT: Service declared no linkage")]
    NullLinkage,

    #[error("LINK_EMPTY_BODY: Service returned an empty body")]
    EmptyBody,

    #[error("LINK_UNCONFIGURED: No linking endpoint configured")]
    Unconfigured,
}
