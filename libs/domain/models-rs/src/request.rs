// [libs/domain/models-rs/src/request.rs]
/*!
 * =================================================================
 * APARATO: REQUEST BOUNDARY MODELS (V18.0 - SUM TYPE GATE)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: NORMALIZACIÓN DE FORMAS DE ENTRADA DEL CLIENTE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SUM TYPE GATE: "base64 o filename" y "mapa o lista" se modelan
 *    como tipos suma y se normalizan una sola vez en la frontera.
 * 2. DATA URI TOLERANCE: Las cargas inline aceptan el prefijo
 *    'data:...;base64,' emitido por los capturadores de los clientes.
 * =================================================================
 */

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestFault {
    /// La petición trae imagen inline y filename a la vez.
    #[error("[L2_REQUEST_FAULT]: AMBIGUOUS_IMAGE_SOURCE -> provide image xor image_filename")]
    AmbiguousImageSource,

    /// La petición no trae ninguna fuente de imagen.
    #[error("[L2_REQUEST_FAULT]: MISSING_IMAGE_SOURCE -> provide image or image_filename")]
    MissingImageSource,

    /// La carga inline no es base64 decodificable.
    #[error("[L2_REQUEST_FAULT]: MALFORMED_BASE64 -> {0}")]
    MalformedBase64(String),

    /// Una clave del mapa de barcodes no es un id de dispositivo.
    #[error("[L2_REQUEST_FAULT]: MALFORMED_DEVICE_KEY -> {0}")]
    MalformedDeviceKey(String),
}

/// Cuerpo de `POST /session/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionCreatePayload {
    pub product_name: String,
    #[serde(default)]
    pub client_info: Option<String>,
}

/// Fuente de imagen ya desambiguada (exactamente una de las dos formas).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Nombre de archivo relativo al `input/` del workspace de sesión.
    WorkspaceFile(String),
    /// Carga base64 inline, con o sin prefijo `data:`.
    InlineBase64(String),
}

impl ImageSource {
    /// Desambigua el par opcional (filename, inline) exigiendo exactamente uno.
    pub fn resolve(
        image_filename: &Option<String>,
        inline_image: &Option<String>,
    ) -> Result<Self, RequestFault> {
        match (image_filename, inline_image) {
            (Some(_), Some(_)) => Err(RequestFault::AmbiguousImageSource),
            (Some(filename), None) => Ok(Self::WorkspaceFile(filename.clone())),
            (None, Some(payload)) => Ok(Self::InlineBase64(payload.clone())),
            (None, None) => Err(RequestFault::MissingImageSource),
        }
    }

    /// Decodifica una carga inline a bytes crudos de imagen.
    pub fn decode_inline(payload: &str) -> Result<Vec<u8>, RequestFault> {
        let trimmed = payload.trim();

        // Tolerancia Data-URI: 'data:image/jpeg;base64,<payload>'
        let raw_base64 = if trimmed.starts_with("data:") {
            trimmed
                .split_once("base64,")
                .map(|(_, tail)| tail)
                .ok_or_else(|| {
                    RequestFault::MalformedBase64("data URI without base64 marker".into())
                })?
        } else {
            trimmed
        };

        BASE64_STANDARD
            .decode(raw_base64)
            .map_err(|decode_fault| RequestFault::MalformedBase64(decode_fault.to_string()))
    }
}

/// Mapa de barcodes provisto por el cliente: forma de mapa `{device: value}`
/// o forma de lista `[{device_id, barcode}]`, normalizadas a mapa.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeviceBarcodeField {
    Map(BTreeMap<String, String>),
    List(Vec<DeviceBarcodeEntry>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceBarcodeEntry {
    pub device_id: u32,
    pub barcode: String,
}

impl DeviceBarcodeField {
    /// Normaliza ambas formas al mapa canónico `device_id -> barcode`.
    pub fn into_device_map(self) -> Result<BTreeMap<u32, String>, RequestFault> {
        match self {
            Self::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| {
                    key.parse::<u32>()
                        .map(|device_id| (device_id, value))
                        .map_err(|_| RequestFault::MalformedDeviceKey(key))
                })
                .collect(),
            Self::List(entries) => Ok(entries
                .into_iter()
                .map(|entry| (entry.device_id, entry.barcode))
                .collect()),
        }
    }
}

/// Cuerpo de `POST /session/{id}/inspect`.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectPayload {
    #[serde(default)]
    pub image_filename: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub device_barcodes: Option<DeviceBarcodeField>,
    /// Forma legada: un singleton aplicado a todo dispositivo sin barcode.
    #[serde(default)]
    pub device_barcode: Option<String>,
}

impl InspectPayload {
    pub fn image_source(&self) -> Result<ImageSource, RequestFault> {
        ImageSource::resolve(&self.image_filename, &self.image)
    }
}

/// Un grupo de captura dentro de una inspección agrupada.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureGroupPayload {
    pub focus: u32,
    pub exposure: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_filename: Option<String>,
    /// Lista advisory de ids de ROI; se interseca con el filtro (focus, exposure).
    #[serde(default)]
    pub rois: Option<Vec<u32>>,
}

impl CaptureGroupPayload {
    pub fn image_source(&self) -> Result<ImageSource, RequestFault> {
        ImageSource::resolve(&self.image_filename, &self.image)
    }
}

/// Cuerpo de `POST /session/{id}/process_grouped_inspection`.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupedInspectPayload {
    #[serde(default)]
    pub product_name: Option<String>,
    /// Claves "focus,exposure" -> grupo de captura.
    pub groups: BTreeMap<String, CaptureGroupPayload>,
    #[serde(default)]
    pub device_barcodes: Option<DeviceBarcodeField>,
    #[serde(default)]
    pub device_barcode: Option<String>,
}
