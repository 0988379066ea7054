// [libs/infra/catalog/src/errors.rs]
//! =================================================================
//! APARATO: CATALOG ERRORS (V5.0)
//! RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE RECETAS DE PRODUCTO
//! =================================================================

use argus_domain_models::normalizer::RoiValidationFault;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogFault {
    /// El producto no existe bajo la raíz de configuración.
    #[error("[L3_CATALOG_FAULT]: PRODUCT_NOT_FOUND -> {0}")]
    ProductNotFound(String),

    /// Acceso a disco de la receta denegado o colapsado.
    #[error("[L3_CATALOG_FAULT]: RECIPE_IO_FAULT -> {0}")]
    RecipeIo(#[from] std::io::Error),

    /// La receta no es JSON decodificable.
    #[error("[L3_CATALOG_FAULT]: RECIPE_PARSE_FAULT -> {0}")]
    RecipeParse(#[from] serde_json::Error),

    /// Una fila de ROI o el conjunto completo viola la forma canónica.
    #[error("[L3_CATALOG_FAULT]: RECIPE_INVALID -> {0}")]
    RecipeInvalid(#[from] RoiValidationFault),
}
