// [libs/infra/catalog/src/repository.rs]
/*!
 * =================================================================
 * APARATO: PRODUCT RECIPE REPOSITORY (V18.0 - FILESYSTEM AUTHORITY)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: CARGA Y NORMALIZACIÓN DE RECETAS DE PRODUCTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FILESYSTEM AUTHORITY: La verdad de cada producto vive bajo
 *    `products/{name}/` en la raíz de configuración montada.
 * 2. LOAD-TIME UPGRADE: Las filas legadas (anchuras 3..11) se
 *    promueven a la forma canónica en la carga; el motor solo ve
 *    ROIs normalizadas y validadas.
 * 3. IMMUTABLE PER RUN: La receta se carga por inspección y se trata
 *    como inmutable durante la corrida.
 * =================================================================
 */

use std::fs;
use std::path::{Path, PathBuf};

use argus_domain_models::color::ColorRange;
use argus_domain_models::normalizer::{normalize, validate_set, RawRoi};
use argus_domain_models::roi::NormalizedRoi;
use tracing::{debug, instrument};

use crate::errors::CatalogFault;

/// Subdirectorio de referencias doradas dentro de cada producto.
const GOLDEN_ROOT_DIR: &str = "golden_rois";

/// Receta completa de un producto, lista para el motor.
pub struct ProductRecipe {
    pub product_name: String,
    pub rois: Vec<NormalizedRoi>,
    /// Rangos cromáticos; vacío si el producto no declara receta de color.
    pub color_ranges: Vec<ColorRange>,
    /// Raíz de los directorios dorados (`golden_rois/roi_{idx}/`).
    pub golden_root: PathBuf,
}

/// Repositorio de recetas sobre la raíz de configuración compartida:
/// `{config_root}/products/{name}/rois_config_{name}.json` etc.
pub struct ProductCatalog {
    config_root: PathBuf,
}

impl ProductCatalog {
    pub fn new(config_root: PathBuf) -> Self {
        Self { config_root }
    }

    fn product_directory(&self, product_name: &str) -> PathBuf {
        self.config_root.join("products").join(product_name)
    }

    /**
     * Carga, normaliza y valida la receta completa de un producto.
     *
     * # Errors:
     * - `ProductNotFound`: no existe `products/{name}/`.
     * - `RecipeParse` / `RecipeInvalid`: receta corrupta o ilegal.
     */
    #[instrument(skip(self))]
    pub fn load_recipe(&self, product_name: &str) -> Result<ProductRecipe, CatalogFault> {
        let product_directory = self.product_directory(product_name);
        if !product_directory.is_dir() {
            return Err(CatalogFault::ProductNotFound(product_name.to_string()));
        }

        // 1. RECETA DE ROIS (obligatoria)
        let rois_path =
            product_directory.join(format!("rois_config_{}.json", product_name));
        let raw_rows: Vec<RawRoi> = serde_json::from_str(&fs::read_to_string(&rois_path)?)?;

        let rois = raw_rows
            .iter()
            .map(normalize)
            .collect::<Result<Vec<NormalizedRoi>, _>>()?;
        validate_set(&rois)?;

        // 2. RECETA CROMÁTICA (opcional)
        let colors_path =
            product_directory.join(format!("colors_config_{}.json", product_name));
        let color_ranges: Vec<ColorRange> = if colors_path.is_file() {
            serde_json::from_str(&fs::read_to_string(&colors_path)?)?
        } else {
            Vec::new()
        };

        debug!(
            "📋 [RECIPE_LOADED]: {} with {} ROIs / {} color ranges.",
            product_name,
            rois.len(),
            color_ranges.len()
        );

        Ok(ProductRecipe {
            product_name: product_name.to_string(),
            rois,
            color_ranges,
            golden_root: product_directory.join(GOLDEN_ROOT_DIR),
        })
    }

    /// Existencia del producto sin cargar la receta.
    pub fn product_exists(&self, product_name: &str) -> bool {
        self.product_directory(product_name).is_dir()
    }

    pub fn config_root(&self) -> &Path {
        &self.config_root
    }
}
