// [libs/domain/inspection-strategy/src/lib.rs]
/*!
 * =================================================================
 * APARATO: INSPECTION STRATEGY ROOT (V14.0 - SOVEREIGN AUTHORITY)
 * CLASIFICACIÓN: CRATE ROOT (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN SUPREMA DEL ÁRBOL DE MÓDULOS DEL MOTOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ENGINE VALUE: El estado compartido (plugins + candado dorado)
 *    vive en 'InspectionEngine' y viaja explícito por el grafo de
 *    llamadas; cero singletons ocultos.
 * 2. NARROW SEAMS: Las dependencias pesadas entran por los traits de
 *    'capabilities'; el núcleo se certifica sin ellas.
 * =================================================================
 */

// --- ESTRATO DE SOPORTE ---
/// Costuras de plugins: decodificador, extractores y OCR.
pub mod capabilities;
/// Contextos inmutables del pipeline (producto, workspace, tarea).
pub mod context;
/// Catálogo de fallos del motor.
pub mod errors;
/// Primitivas de imagen: recorte, rotación, normalización, métricas.
pub mod imaging;

// --- ESTRATO DE MOTORES ATÓMICOS ---
/// Un motor por tipo de ROI (barcode / compare / ocr / color).
pub mod engines;
/// Almacén dorado con promoción atómica bajo candado global.
pub mod golden_store;

// --- ESTRATO DE ORQUESTACIÓN DE PANEL ---
/// Agrupación por dispositivo y veredicto global con invariantes.
pub mod aggregator;
/// Abanico paralelo acotado por núcleos.
pub mod dispatcher;
/// Pipeline por ROI y motor de inspección.
pub mod executor;
/// Tabla de prioridades de barcode por dispositivo.
pub mod resolver;

pub use aggregator::{aggregate_panel, AggregatedPanel, BARCODE_NOT_AVAILABLE};
pub use capabilities::{
    BarcodeDecoder, CapabilityRegistry, FeatureExtractor, GridFeatureExtractor, TextRecognizer,
};
pub use context::{ArtifactWorkspace, PanelTask, ProductContext};
pub use errors::{AggregationFault, CapabilityFault, EngineFault};
pub use executor::InspectionEngine;
pub use golden_store::{GoldenStore, GoldenVerdict, BEST_GOLDEN_FILE, GOLDEN_SAMPLE_SUFFIX};
pub use resolver::{select_device_barcode, BarcodeOrigin};
