// [libs/domain/models-rs/src/roi.rs]
/*!
 * =================================================================
 * APARATO: ROI CANONICAL MODEL (V31.0 - ELEVEN FIELD SEAL)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: FORMA CANÓNICA DE LA REGIÓN DE INTERÉS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TAGGED DISPATCH: El tipo de ROI es una enumeración cerrada con
 *    código de cable numérico (1..4), erradicando strings mágicos.
 * 2. OPTIONAL DISCIPLINE: Los campos específicos de tipo
 *    (ai_threshold, expected_text, is_device_barcode) viven como
 *    Option y el normalizador garantiza su coherencia.
 * 3. WIRE PARITY: La serialización reproduce bit-a-bit la forma de
 *    objeto canónica aceptada en los archivos de configuración.
 * =================================================================
 */

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Clasificación operativa de una Región de Interés.
///
/// El código de cable (1..4) es el discriminador histórico de las
/// recetas de producto y se preserva en la serialización.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoiKind {
    /// Lectura y decodificación de códigos de barras / DataMatrix.
    Barcode,
    /// Comparación de similitud contra la referencia dorada.
    Compare,
    /// Reconocimiento óptico de caracteres con validación opcional.
    Ocr,
    /// Clasificación cromática por rangos nominados.
    Color,
}

impl RoiKind {
    /// Decodifica el discriminador numérico de las recetas (1..4).
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Barcode),
            2 => Some(Self::Compare),
            3 => Some(Self::Ocr),
            4 => Some(Self::Color),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Barcode => 1,
            Self::Compare => 2,
            Self::Ocr => 3,
            Self::Color => 4,
        }
    }

    /// Nombre canónico en minúsculas usado en `roi_type_name`.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Barcode => "barcode",
            Self::Compare => "compare",
            Self::Ocr => "ocr",
            Self::Color => "color",
        }
    }

    /// Variante de extracción por defecto cuando la receta no declara
    /// un método compatible con el tipo.
    pub fn default_feature_method(self) -> FeatureMethod {
        match self {
            Self::Barcode => FeatureMethod::Barcode,
            Self::Compare => FeatureMethod::DeepCnn,
            Self::Ocr => FeatureMethod::Ocr,
            Self::Color => FeatureMethod::Disabled,
        }
    }

    /// Determina si un método de extracción es legal para este tipo.
    pub fn accepts_feature_method(self, method: FeatureMethod) -> bool {
        match self {
            Self::Barcode => matches!(method, FeatureMethod::Barcode),
            Self::Compare => matches!(
                method,
                FeatureMethod::DeepCnn
                    | FeatureMethod::KeypointLocal
                    | FeatureMethod::KeypointBinary
                    | FeatureMethod::Generic
            ),
            Self::Ocr => matches!(method, FeatureMethod::Ocr),
            Self::Color => matches!(method, FeatureMethod::Disabled),
        }
    }
}

impl Serialize for RoiKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for RoiKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u64::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("ROI_TYPE_OUT_OF_RANGE: {}", code)))
    }
}

/// Variante del extractor de características que alimenta al motor Compare,
/// o el marcador del backend propio (barcode / ocr / none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureMethod {
    /// Embedding de red convolucional profunda (≈1280-d, similitud coseno).
    DeepCnn,
    /// Descriptores locales de punto clave (similitud mapeada a [0,1]).
    KeypointLocal,
    /// Descriptores binarios de punto clave.
    KeypointBinary,
    /// Histograma de canales nativo (sin modelo externo).
    Generic,
    /// El ROI usa el decodificador de barcode, no el extractor.
    Barcode,
    /// El ROI usa el reconocedor de texto, no el extractor.
    Ocr,
    /// Sin extracción (ROIs de color).
    #[serde(rename = "none")]
    Disabled,
}

impl FeatureMethod {
    /// Parseo laxo desde las recetas: un string desconocido retorna None
    /// y el normalizador aplica el método por defecto del tipo.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "deep_cnn" => Some(Self::DeepCnn),
            "keypoint_local" => Some(Self::KeypointLocal),
            "keypoint_binary" => Some(Self::KeypointBinary),
            "generic" => Some(Self::Generic),
            "barcode" => Some(Self::Barcode),
            "ocr" => Some(Self::Ocr),
            "none" => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// Rotación aplicada al recorte antes del backend (principalmente OCR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn from_degrees(degrees: u64) -> Option<Self> {
        match degrees {
            0 => Some(Self::R0),
            90 => Some(Self::R90),
            180 => Some(Self::R180),
            270 => Some(Self::R270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }
}

impl Serialize for Rotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.degrees())
    }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let degrees = u64::deserialize(deserializer)?;
        Self::from_degrees(degrees)
            .ok_or_else(|| D::Error::custom(format!("ROTATION_OUT_OF_RANGE: {}", degrees)))
    }
}

/// Rectángulo de píxeles (x1,y1) inclusivo -> (x2,y2) exclusivo.
/// Invariante geométrico: x1 < x2, y1 < y2 (sellado por el normalizador).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoiCoordinates {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl RoiCoordinates {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Determina si el rectángulo cabe dentro de un lienzo de WxH.
    pub fn fits_within(&self, canvas_width: u32, canvas_height: u32) -> bool {
        self.x2 <= canvas_width && self.y2 <= canvas_height
    }

    pub fn as_array(&self) -> [u32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

impl Serialize for RoiCoordinates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.x1, self.y1, self.x2, self.y2).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RoiCoordinates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x1, y1, x2, y2) = <(u32, u32, u32, u32)>::deserialize(deserializer)?;
        Ok(Self { x1, y1, x2, y2 })
    }
}

/// Región de Interés en su forma canónica de 11 campos.
///
/// Toda ROI que circula por el motor ha pasado por `normalizer::normalize`,
/// de modo que los Option específicos de tipo cumplen su disciplina:
/// `ai_threshold` solo en Compare, `expected_text` solo en OCR,
/// `is_device_barcode` solo en Barcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRoi {
    /// Identificador único dentro del producto; nombra el directorio dorado.
    pub idx: u32,
    #[serde(rename = "type")]
    pub kind: RoiKind,
    pub coords: RoiCoordinates,
    /// Clave de grupo de captura (posición del plano focal).
    pub focus: u32,
    /// Clave de grupo de captura (microsegundos de exposición).
    pub exposure: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_threshold: Option<f64>,
    pub feature_method: FeatureMethod,
    pub rotation: Rotation,
    /// Agrupa ROIs por unidad física dentro del panel (1..N).
    pub device_location: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_device_barcode: Option<bool>,
}

impl NormalizedRoi {
    /// ROI marcada como portadora del barcode primario de su dispositivo.
    pub fn is_primary_barcode(&self) -> bool {
        self.kind == RoiKind::Barcode && self.is_device_barcode == Some(true)
    }

    /// Pertenencia al grupo de captura `(focus, exposure)`.
    pub fn matches_capture_group(&self, focus: u32, exposure: u32) -> bool {
        self.focus == focus && self.exposure == exposure
    }
}
