// [libs/domain/inspection-strategy/src/aggregator.rs]
/*!
 * =================================================================
 * APARATO: RESULT AGGREGATION ENGINE (V12.0 - INVARIANT SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: RESÚMENES POR DISPOSITIVO Y VEREDICTO GLOBAL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. COUNT DISCIPLINE: Todos los contadores se derivan de los
 *    registros; una divergencia es un fallo interno, nunca silencio.
 * 2. STRING KEY DISCIPLINE: Los ids de dispositivo se proyectan a
 *    claves string en el mapa de resúmenes (contrato de cable).
 * =================================================================
 */

use std::collections::BTreeMap;

use argus_domain_models::report::{DeviceSummary, OverallResult, RoiOutcomeRecord};

use crate::errors::AggregationFault;

/// Barcode por defecto cuando ninguna fuente de prioridad aplica.
pub const BARCODE_NOT_AVAILABLE: &str = "N/A";

/// Panel agregado: la porción del reporte que no depende del reloj
/// ni de la sesión (el coordinador añade tiempos y barcodes).
pub struct AggregatedPanel {
    pub roi_results: Vec<RoiOutcomeRecord>,
    pub device_summaries: BTreeMap<String, DeviceSummary>,
    pub overall_result: OverallResult,
}

/**
 * Agrupa los registros por dispositivo y deriva el veredicto global.
 *
 * Entrada en cualquier orden; salida estable por idx. Los invariantes
 * de conteo se verifican al final y una violación burbujea como fallo
 * interno (inalcanzable en una implementación correcta).
 */
pub fn aggregate_panel(
    mut records: Vec<RoiOutcomeRecord>,
) -> Result<AggregatedPanel, AggregationFault> {
    records.sort_by_key(|record| record.roi_id);

    // 1. AGRUPACIÓN POR DISPOSITIVO FÍSICO
    let mut summaries_by_device: BTreeMap<u32, DeviceSummary> = BTreeMap::new();

    for record in &records {
        let summary = summaries_by_device.entry(record.device_id).or_insert_with(|| {
            DeviceSummary {
                total_rois: 0,
                passed_rois: 0,
                failed_rois: 0,
                device_passed: true,
                barcode: BARCODE_NOT_AVAILABLE.to_string(),
                results: Vec::new(),
            }
        });

        summary.total_rois += 1;
        if record.passed {
            summary.passed_rois += 1;
        } else {
            summary.failed_rois += 1;
        }
        summary.device_passed = summary.failed_rois == 0;
        summary.results.push(record.clone());
    }

    // 2. VEREDICTO GLOBAL
    let total_rois = records.len();
    let passed_rois = records.iter().filter(|record| record.passed).count();
    let overall_result = OverallResult::from_counts(total_rois, passed_rois);

    // 3. PROYECCIÓN A CLAVES STRING (contrato de cable)
    let device_summaries: BTreeMap<String, DeviceSummary> = summaries_by_device
        .into_iter()
        .map(|(device_id, summary)| (device_id.to_string(), summary))
        .collect();

    let panel = AggregatedPanel { roi_results: records, device_summaries, overall_result };
    verify_invariants(&panel)?;
    Ok(panel)
}

/// Auditoría de los invariantes de conteo del contrato de resultado.
fn verify_invariants(panel: &AggregatedPanel) -> Result<(), AggregationFault> {
    let overall = &panel.overall_result;

    if overall.total_rois != panel.roi_results.len() {
        return Err(AggregationFault(format!(
            "overall.total_rois {} != |roi_results| {}",
            overall.total_rois,
            panel.roi_results.len()
        )));
    }

    if overall.passed_rois + overall.failed_rois != overall.total_rois {
        return Err(AggregationFault("overall counters do not add up".into()));
    }

    let expected_passed = panel.roi_results.iter().filter(|record| record.passed).count();
    if overall.passed_rois != expected_passed {
        return Err(AggregationFault(format!(
            "overall.passed_rois {} != recount {}",
            overall.passed_rois, expected_passed
        )));
    }

    if overall.passed != (overall.total_rois > 0 && overall.failed_rois == 0) {
        return Err(AggregationFault("overall.passed violates the global rule".into()));
    }

    let mut devices_total = 0usize;
    for (device_key, summary) in &panel.device_summaries {
        devices_total += summary.total_rois;

        if summary.total_rois != summary.results.len() {
            return Err(AggregationFault(format!(
                "device {} total {} != |results| {}",
                device_key,
                summary.total_rois,
                summary.results.len()
            )));
        }
        if summary.passed_rois + summary.failed_rois != summary.total_rois {
            return Err(AggregationFault(format!("device {} counters do not add up", device_key)));
        }
        if summary.device_passed != (summary.failed_rois == 0) {
            return Err(AggregationFault(format!(
                "device {} passed flag violates the rule",
                device_key
            )));
        }
    }

    if devices_total != overall.total_rois {
        return Err(AggregationFault(format!(
            "device partition {} != overall {}",
            devices_total, overall.total_rois
        )));
    }

    Ok(())
}
