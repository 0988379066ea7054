// [libs/domain/inspection-strategy/src/capabilities.rs]
/*!
 * =================================================================
 * APARATO: CAPABILITY PLUGIN REGISTRY (V21.0 - NARROW SEAMS)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: COSTURAS ESTRECHAS HACIA DECODIFICADOR, EXTRACTOR Y OCR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NARROW SEAMS: Cada dependencia pesada (decoder, CNN, OCR) entra
 *    por un trait de un método; el núcleo se certifica sin ellas.
 * 2. GRACEFUL VOID: Una capacidad ausente nunca aborta el panel; la
 *    ROI degrada a 'capability_unavailable'.
 * 3. DEADLINE SHIELD: La decodificación de barcode corre tras una
 *    ventana dura; un decoder colgado pierde su resultado.
 * =================================================================
 */

use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use argus_domain_models::roi::FeatureMethod;
use image::RgbImage;
use tracing::warn;

use crate::errors::CapabilityFault;
use crate::imaging;

/// Ventana dura para el decodificador de barcode externo.
pub const BARCODE_DECODE_DEADLINE: Duration = Duration::from_secs(2);

/// Malla de la incrustación nativa del método 'generic'.
const GENERIC_GRID_WIDTH: u32 = 16;
const GENERIC_GRID_HEIGHT: u32 = 16;

/// Decodificador de códigos de barras / DataMatrix conectable.
pub trait BarcodeDecoder: Send + Sync {
    fn decode(&self, crop: &RgbImage) -> Result<Vec<String>, CapabilityFault>;
}

/// Extractor de características para el motor Compare; una
/// implementación registrada por variante de `FeatureMethod`.
pub trait FeatureExtractor: Send + Sync {
    fn extract(&self, image: &RgbImage) -> Result<Vec<f32>, CapabilityFault>;
}

/// Reconocedor óptico de caracteres conectable.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &RgbImage) -> Result<String, CapabilityFault>;
}

/// Extractor nativo del método 'generic': incrustación de rejilla
/// 16x16 RGB reducida bilinealmente (sin modelo externo).
pub struct GridFeatureExtractor;

impl FeatureExtractor for GridFeatureExtractor {
    fn extract(&self, image: &RgbImage) -> Result<Vec<f32>, CapabilityFault> {
        Ok(imaging::grid_embedding(image, GENERIC_GRID_WIDTH, GENERIC_GRID_HEIGHT))
    }
}

/// Registro de plugins de capacidad del motor.
///
/// Las capacidades son opcionales por diseño: un despliegue sin el
/// runtime CNN o sin motor OCR sigue inspeccionando los tipos que
/// sí puede cubrir.
#[derive(Default)]
pub struct CapabilityRegistry {
    barcode_decoder: Option<Arc<dyn BarcodeDecoder>>,
    feature_extractors: HashMap<FeatureMethod, Arc<dyn FeatureExtractor>>,
    text_recognizer: Option<Arc<dyn TextRecognizer>>,
}

impl CapabilityRegistry {
    /// Registro vacío: toda capacidad degrada a 'capability_unavailable'.
    pub fn offline() -> Self {
        Self::default()
    }

    /// Registro estándar: extractor nativo de rejilla para 'generic'.
    /// Los plugins pesados (deep_cnn, keypoints, decoder, OCR) se
    /// conectan explícitamente en la ignición del servidor.
    pub fn standard() -> Self {
        Self::default()
            .with_feature_extractor(FeatureMethod::Generic, Arc::new(GridFeatureExtractor))
    }

    pub fn with_barcode_decoder(mut self, decoder: Arc<dyn BarcodeDecoder>) -> Self {
        self.barcode_decoder = Some(decoder);
        self
    }

    pub fn with_feature_extractor(
        mut self,
        method: FeatureMethod,
        extractor: Arc<dyn FeatureExtractor>,
    ) -> Self {
        self.feature_extractors.insert(method, extractor);
        self
    }

    pub fn with_text_recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.text_recognizer = Some(recognizer);
        self
    }

    pub fn barcode_decoder(&self) -> Option<Arc<dyn BarcodeDecoder>> {
        self.barcode_decoder.clone()
    }

    pub fn feature_extractor(&self, method: FeatureMethod) -> Option<Arc<dyn FeatureExtractor>> {
        self.feature_extractors.get(&method).cloned()
    }

    pub fn text_recognizer(&self) -> Option<Arc<dyn TextRecognizer>> {
        self.text_recognizer.clone()
    }
}

/// Ejecuta la decodificación en un hilo sacrificable tras la ventana
/// dura. Un decoder que exceda la ventana sigue corriendo hasta morir
/// solo; su resultado tardío se descarta.
pub fn decode_with_deadline(
    decoder: Arc<dyn BarcodeDecoder>,
    crop: RgbImage,
    deadline: Duration,
) -> Result<Vec<String>, CapabilityFault> {
    let (verdict_sender, verdict_receiver) = mpsc::channel();

    thread::spawn(move || {
        let decoded = decoder.decode(&crop);
        // El receptor puede haber abandonado tras el deadline.
        let _ = verdict_sender.send(decoded);
    });

    match verdict_receiver.recv_timeout(deadline) {
        Ok(decoded) => decoded,
        Err(_) => {
            warn!("⏱️ [DECODER_DEADLINE]: Barcode decoder exceeded {:?} window.", deadline);
            Err(CapabilityFault::DecoderTimeout)
        }
    }
}
