// [libs/domain/inspection-strategy/src/context.rs]
/*!
 * =================================================================
 * APARATO: EXECUTION CONTEXTS (V8.0 - OWNERSHIP DISCIPLINE)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CONTEXTOS INMUTABLES DEL PIPELINE DE PANEL
 * =================================================================
 */

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use argus_domain_models::color::ColorRange;
use image::RgbImage;

/// Contexto de producto cargado del catálogo, inmutable durante la corrida.
pub struct ProductContext {
    pub product_name: String,
    /// Raíz de los directorios dorados: `golden_rois/roi_{idx}/`.
    pub golden_root: PathBuf,
    /// Rangos cromáticos para las ROIs de tipo Color (puede estar vacío).
    pub color_ranges: Vec<ColorRange>,
}

/// Workspace de artefactos de la sesión: escritura física en `output/`
/// y proyección de rutas a la forma visible por el cliente.
///
/// El servidor solo escribe bajo el workspace; la ruta retornada es una
/// transformación de prefijo, nunca un symlink.
pub struct ArtifactWorkspace {
    output_directory: PathBuf,
    client_output_prefix: String,
}

impl ArtifactWorkspace {
    pub fn new(output_directory: PathBuf, client_output_prefix: String) -> Self {
        Self {
            output_directory,
            client_output_prefix: client_output_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Ruta física donde el servidor escribe el artefacto.
    pub fn server_path(&self, file_name: &str) -> PathBuf {
        self.output_directory.join(file_name)
    }

    /// Ruta del mismo artefacto en la forma de montaje del cliente.
    pub fn client_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.client_output_prefix, file_name)
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }
}

/// Tarea de panel compartida de solo lectura entre los workers.
pub struct PanelTask<'a> {
    /// Imagen capturada completa, decodificada una única vez.
    pub panel_image: &'a RgbImage,
    pub product: &'a ProductContext,
    pub workspace: &'a ArtifactWorkspace,
    /// Señal de aborto: los workers pendientes degradan sin artefactos.
    pub termination_signal: &'a AtomicBool,
}
