// [libs/domain/models-rs/src/color.rs]
/*!
 * =================================================================
 * APARATO: COLOR RECIPE MODELS (V7.1 - CHROMATIC CONTRACTS)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: RANGOS CROMÁTICOS NOMINADOS POR PRODUCTO
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Espacio de color en el que se evalúa un rango.
///
/// Convención HSV del motor: H en [0,180), S y V en [0,255].
/// Los rangos RGB son 0..255 por canal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpace {
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "HSV")]
    Hsv,
}

/// Un rango cromático nominado dentro de la receta de color de un producto.
///
/// Varios rangos pueden compartir `name`; sus porcentajes de coincidencia
/// se suman al agregarse por color (rangos disjuntos de un mismo tono).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    pub name: String,
    /// Límite inferior inclusivo por canal, en el espacio declarado.
    pub lower: [f32; 3],
    /// Límite superior inclusivo por canal, en el espacio declarado.
    pub upper: [f32; 3],
    pub color_space: ColorSpace,
    /// Porcentaje mínimo de píxeles (0..100) para declarar el color presente.
    pub threshold: f64,
}

impl ColorRange {
    /// Pertenencia inclusiva de un píxel ya convertido al espacio del rango.
    pub fn contains(&self, channels: [f32; 3]) -> bool {
        channels
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(value, (low, high))| value >= low && value <= high)
    }
}
