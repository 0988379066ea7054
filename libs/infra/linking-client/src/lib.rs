// [libs/infra/linking-client/src/lib.rs]
//! =================================================================
//! APARATO: LINKING CLIENT ROOT (V3.0)
//! RESPONSABILIDAD: EXPOSICIÓN NOMINAL DEL ADAPTADOR DE ENLACE
//! =================================================================

pub mod client;
pub mod errors;

pub use client::{parse_linkage_body, LinkingClient, DEFAULT_LINKING_TIMEOUT};
pub use errors::LinkingFault;
