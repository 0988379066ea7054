// [libs/domain/inspection-strategy/src/resolver.rs]
/*!
 * =================================================================
 * APARATO: BARCODE PRIORITY RESOLVER (V13.0 - FOUR TIER TABLE)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: SELECCIÓN DE BARCODE POR DISPOSITIVO SEGÚN PRIORIDAD
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FOUR TIER TABLE: ROI primaria > cualquier ROI barcode > mapa del
 *    cliente > singleton legado. Solo el quinto escalón es "N/A".
 * 2. PURE SELECTION: La selección es una función pura sobre los
 *    registros agregados; el enlace externo se aplica después y
 *    jamás altera la prioridad elegida.
 * 3. MERGED SET RULE: En inspecciones agrupadas la resolución corre
 *    una única vez sobre el set fusionado; resolver por pasada y
 *    fusionar después pisaría una prioridad alta con una baja.
 * =================================================================
 */

use std::collections::BTreeMap;

use argus_domain_models::report::{RoiOutcomeRecord, RoiVerdict};

/// Fuente que aportó el barcode elegido (diagnóstico y telemetría).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarcodeOrigin {
    /// Prioridad 0: ROI marcada `is_device_barcode` con primer valor útil.
    PrimaryRoi,
    /// Prioridad 1: primer valor no vacío de cualquier ROI barcode del dispositivo.
    AnyBarcodeRoi,
    /// Prioridad 2: mapa `device_barcodes` provisto por el cliente.
    ClientMap,
    /// Prioridad 3: singleton legado aplicado uniformemente.
    LegacySingleton,
}

/// Selecciona el barcode crudo de un dispositivo según la tabla de
/// prioridades. `None` cuando ninguna fuente aplica (el resumen queda
/// en "N/A" y el enlace externo no se invoca).
pub fn select_device_barcode(
    device_id: u32,
    records: &[RoiOutcomeRecord],
    client_map: &BTreeMap<u32, String>,
    legacy_singleton: Option<&str>,
) -> Option<(String, BarcodeOrigin)> {
    // PRIORIDAD 0: ROI primaria del dispositivo con values[0] no vacío.
    for record in records.iter().filter(|r| r.device_id == device_id) {
        if record.is_primary_barcode {
            if let RoiVerdict::Barcode { barcode_values } = &record.verdict {
                if let Some(first_value) = barcode_values.first() {
                    if !first_value.is_empty() {
                        return Some((first_value.clone(), BarcodeOrigin::PrimaryRoi));
                    }
                }
            }
        }
    }

    // PRIORIDAD 1: primer valor no vacío de cualquier ROI barcode.
    for record in records.iter().filter(|r| r.device_id == device_id) {
        if let RoiVerdict::Barcode { barcode_values } = &record.verdict {
            if let Some(value) = barcode_values.iter().find(|value| !value.is_empty()) {
                return Some((value.clone(), BarcodeOrigin::AnyBarcodeRoi));
            }
        }
    }

    // PRIORIDAD 2: mapa del cliente.
    if let Some(client_value) = client_map.get(&device_id) {
        if !client_value.is_empty() {
            return Some((client_value.clone(), BarcodeOrigin::ClientMap));
        }
    }

    // PRIORIDAD 3: singleton legado.
    if let Some(legacy_value) = legacy_singleton.filter(|value| !value.is_empty()) {
        return Some((legacy_value.to_string(), BarcodeOrigin::LegacySingleton));
    }

    None
}
