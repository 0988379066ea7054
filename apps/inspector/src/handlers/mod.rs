// [apps/inspector/src/handlers/mod.rs]
//! =================================================================
//! APARATO: API HANDLERS ROOT (V6.0)
//! RESPONSABILIDAD: ADAPTADORES DE ENTRADA HTTP
//! =================================================================

pub mod admin;
pub mod inspection;
pub mod schema;
pub mod session;
pub mod visual;
