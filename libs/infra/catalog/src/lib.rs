// [libs/infra/catalog/src/lib.rs]
//! =================================================================
//! APARATO: CATALOG ROOT (V3.0)
//! RESPONSABILIDAD: EXPOSICIÓN NOMINAL DEL REPOSITORIO DE RECETAS
//! =================================================================

pub mod errors;
pub mod repository;

pub use errors::CatalogFault;
pub use repository::{ProductCatalog, ProductRecipe};
