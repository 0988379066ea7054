// [libs/domain/models-rs/src/normalizer.rs]
/*!
 * =================================================================
 * APARATO: ROI NORMALIZER & VALIDATOR (V44.0 - LEGACY BRIDGE)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PROMOCIÓN DE ANCHURAS LEGADAS A LA FORMA CANÓNICA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LEGACY BRIDGE: Acepta filas de 3..11 posiciones o la forma de
 *    objeto con cualquier subconjunto de claves canónicas, y entrega
 *    siempre la ROI de 11 campos con defaults por tipo.
 * 2. OPTIONAL DISCIPLINE: Sella los invariantes de campos opcionales
 *    (ai_threshold / expected_text / is_device_barcode) en carga.
 * 3. IDEMPOTENT SEAL: normalize(normalize(r)) == normalize(r) para
 *    toda entrada legal, certificado en el Proving Grounds.
 * =================================================================
 */

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::roi::{FeatureMethod, NormalizedRoi, RoiCoordinates, RoiKind, Rotation};

/// Defaults históricos de grupo de captura para recetas legadas.
const DEFAULT_FOCUS: u32 = 305;
const DEFAULT_EXPOSURE_MICROSECONDS: u32 = 3000;
const DEFAULT_DEVICE_LOCATION: u32 = 1;
/// Umbral de similitud por defecto para ROIs Compare sin declaración.
const DEFAULT_COMPARE_THRESHOLD: f64 = 0.9;

/// Posición nominal de cada campo en la forma de fila legada.
const FIELD_KEYS: [&str; 11] = [
    "idx",
    "type",
    "coords",
    "focus",
    "exposure",
    "ai_threshold",
    "feature_method",
    "rotation",
    "device_location",
    "expected_text",
    "is_device_barcode",
];

#[derive(Error, Debug)]
pub enum RoiValidationFault {
    /// Una fila o registro individual no puede promoverse a la forma canónica.
    #[error("[L2_ROI_FAULT]: INVALID_ROI -> {reason}")]
    InvalidRoi { reason: String },

    /// El conjunto de ROIs viola una regla de unicidad a nivel producto.
    #[error("[L2_ROI_FAULT]: INVALID_CONFIG -> {reason}")]
    InvalidConfig { reason: String },
}

impl RoiValidationFault {
    fn roi(reason: impl Into<String>) -> Self {
        Self::InvalidRoi { reason: reason.into() }
    }
}

/// Forma cruda de una ROI tal como llega de una receta de producto:
/// una fila posicional de anchura variable o un objeto con claves canónicas.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRoi {
    Row(Vec<Value>),
    Record(serde_json::Map<String, Value>),
}

impl RawRoi {
    /// Acceso unificado por posición nominal; `Null` cuenta como ausente.
    fn field(&self, position: usize) -> Option<&Value> {
        let value = match self {
            Self::Row(values) => values.get(position),
            Self::Record(map) => map.get(FIELD_KEYS[position]),
        };
        value.filter(|v| !v.is_null())
    }
}

/// Promueve una entrada cruda de anchura 3..11 (o forma de objeto) a la
/// ROI canónica de 11 campos, aplicando los defaults por tipo.
pub fn normalize(raw: &RawRoi) -> Result<NormalizedRoi, RoiValidationFault> {
    // 1. AUDITORÍA DE ANCHURA (solo aplica a la forma de fila)
    if let RawRoi::Row(values) = raw {
        if values.len() < 3 {
            return Err(RoiValidationFault::roi(format!(
                "row width {} below minimum 3",
                values.len()
            )));
        }
        if values.len() > 11 {
            return Err(RoiValidationFault::roi(format!(
                "row width {} above canonical 11",
                values.len()
            )));
        }
    }

    // 2. CAMPOS OBLIGATORIOS (idx, type, coords)
    let idx = raw
        .field(0)
        .and_then(coerce_u32)
        .filter(|v| *v >= 1)
        .ok_or_else(|| RoiValidationFault::roi("idx must be a positive integer"))?;

    let kind = raw
        .field(1)
        .and_then(Value::as_u64)
        .and_then(RoiKind::from_code)
        .ok_or_else(|| RoiValidationFault::roi("type must be one of 1..4"))?;

    let coords = raw
        .field(2)
        .ok_or_else(|| RoiValidationFault::roi("coords missing"))
        .and_then(coerce_coordinates)?;

    // 3. CLAVES DE GRUPO DE CAPTURA (defaults legados)
    let focus = optional_positive(raw.field(3), "focus")?.unwrap_or(DEFAULT_FOCUS);
    let exposure =
        optional_positive(raw.field(4), "exposure")?.unwrap_or(DEFAULT_EXPOSURE_MICROSECONDS);

    // 4. UMBRAL DE SIMILITUD (disciplina por tipo)
    let ai_threshold = if kind == RoiKind::Compare {
        match raw.field(5) {
            Some(value) => {
                let threshold = value.as_f64().ok_or_else(|| {
                    RoiValidationFault::roi("ai_threshold must be a real number")
                })?;
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(RoiValidationFault::roi(format!(
                        "ai_threshold {} outside [0,1]",
                        threshold
                    )));
                }
                Some(threshold)
            }
            None => Some(DEFAULT_COMPARE_THRESHOLD),
        }
    } else {
        None
    };

    // 5. MÉTODO DE EXTRACCIÓN (incompatible -> default del tipo)
    let feature_method = raw
        .field(6)
        .and_then(Value::as_str)
        .and_then(FeatureMethod::parse)
        .filter(|method| kind.accepts_feature_method(*method))
        .unwrap_or_else(|| kind.default_feature_method());

    // 6. ROTACIÓN (solo pasos de 90 grados)
    let rotation = match raw.field(7) {
        Some(value) => value
            .as_u64()
            .and_then(Rotation::from_degrees)
            .ok_or_else(|| RoiValidationFault::roi("rotation must be one of 0/90/180/270"))?,
        None => Rotation::R0,
    };

    let device_location =
        optional_positive(raw.field(8), "device_location")?.unwrap_or(DEFAULT_DEVICE_LOCATION);

    // 7. VALIDADORES ESPECÍFICOS DE TIPO
    let expected_text = if kind == RoiKind::Ocr {
        match raw.field(9) {
            Some(value) => Some(
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| RoiValidationFault::roi("expected_text must be a string"))?,
            ),
            None => None,
        }
    } else {
        None
    };

    let is_device_barcode = if kind == RoiKind::Barcode {
        match raw.field(10) {
            Some(value) => Some(
                value
                    .as_bool()
                    .ok_or_else(|| RoiValidationFault::roi("is_device_barcode must be a bool"))?,
            ),
            None => None,
        }
    } else {
        None
    };

    Ok(NormalizedRoi {
        idx,
        kind,
        coords,
        focus,
        exposure,
        ai_threshold,
        feature_method,
        rotation,
        device_location,
        expected_text,
        is_device_barcode,
    })
}

/// Reglas de unicidad a nivel producto: idx único y a lo sumo un
/// barcode primario por dispositivo.
pub fn validate_set(rois: &[NormalizedRoi]) -> Result<(), RoiValidationFault> {
    let mut seen_indices: HashSet<u32> = HashSet::with_capacity(rois.len());
    let mut primary_barcodes_per_device: HashMap<u32, u32> = HashMap::new();

    for roi in rois {
        if !seen_indices.insert(roi.idx) {
            return Err(RoiValidationFault::InvalidConfig {
                reason: format!("duplicate ROI idx {}", roi.idx),
            });
        }

        if roi.is_primary_barcode() {
            let counter = primary_barcodes_per_device.entry(roi.device_location).or_insert(0);
            *counter += 1;
            if *counter > 1 {
                return Err(RoiValidationFault::InvalidConfig {
                    reason: format!(
                        "device {} declares more than one primary barcode ROI",
                        roi.device_location
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Coerción numérica laxa: acepta enteros JSON y reales sin parte
/// fraccionaria (las recetas exportadas a veces llevan 305.0).
fn coerce_u32(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    if let Some(f) = value.as_f64() {
        if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
            return Some(f as u32);
        }
    }
    None
}

fn optional_positive(
    value: Option<&Value>,
    field_name: &str,
) -> Result<Option<u32>, RoiValidationFault> {
    match value {
        Some(v) => coerce_u32(v)
            .filter(|n| *n >= 1)
            .map(Some)
            .ok_or_else(|| RoiValidationFault::roi(format!("{} must be a positive integer", field_name))),
        None => Ok(None),
    }
}

fn coerce_coordinates(value: &Value) -> Result<RoiCoordinates, RoiValidationFault> {
    let entries = value
        .as_array()
        .filter(|array| array.len() == 4)
        .ok_or_else(|| RoiValidationFault::roi("coords must be a 4-tuple"))?;

    let mut decoded = [0u32; 4];
    for (slot, entry) in decoded.iter_mut().zip(entries.iter()) {
        *slot = coerce_u32(entry)
            .ok_or_else(|| RoiValidationFault::roi("coords entries must be non-negative ints"))?;
    }

    let coordinates = RoiCoordinates {
        x1: decoded[0],
        y1: decoded[1],
        x2: decoded[2],
        y2: decoded[3],
    };

    if coordinates.x1 >= coordinates.x2 || coordinates.y1 >= coordinates.y2 {
        return Err(RoiValidationFault::roi(format!(
            "degenerate geometry ({},{})..({},{})",
            coordinates.x1, coordinates.y1, coordinates.x2, coordinates.y2
        )));
    }

    Ok(coordinates)
}
