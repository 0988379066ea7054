// [libs/domain/inspection-strategy/src/dispatcher.rs]
/*!
 * =================================================================
 * APARATO: PARALLEL PANEL DISPATCHER (V17.0 - BOUNDED FAN OUT)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: DESPACHO DE ROIS A UN POOL ACOTADO POR NÚCLEOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BOUNDED POOL: min(|rois|, núcleos disponibles) workers; cada
 *    worker produce su recorte y posee sus entradas completas.
 * 2. PANIC DOWNGRADE: Un pánico dentro de un worker se captura y se
 *    convierte en una ROI reprobada; jamás se propaga al panel.
 * 3. STABLE ORDER: Los resultados se recolectan por terminación y el
 *    orden final se restaura por idx antes de agregar.
 * =================================================================
 */

use std::panic::{catch_unwind, AssertUnwindSafe};

use argus_domain_models::report::RoiOutcomeRecord;
use argus_domain_models::roi::NormalizedRoi;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::context::PanelTask;
use crate::executor::{failed_record, InspectionEngine};

impl InspectionEngine {
    /**
     * Abanico paralelo del panel completo.
     *
     * Las ROIs no tienen dependencias cruzadas salvo el almacén
     * dorado, que serializa sus promociones con su propio candado.
     * Si el pool acotado no puede construirse, el despacho degrada a
     * ejecución secuencial en lugar de reprobar el panel.
     */
    pub fn dispatch_panel(
        &self,
        rois: &[NormalizedRoi],
        task: &PanelTask<'_>,
    ) -> Vec<RoiOutcomeRecord> {
        if rois.is_empty() {
            return Vec::new();
        }

        let worker_count = rois.len().min(num_cpus::get().max(1));
        debug!(
            "🧵 [DISPATCH]: Fan-out of {} ROIs across {} workers.",
            rois.len(),
            worker_count
        );

        let mut records: Vec<RoiOutcomeRecord> =
            match rayon::ThreadPoolBuilder::new().num_threads(worker_count).build() {
                Ok(bounded_pool) => bounded_pool.install(|| {
                    rois.par_iter().map(|roi| self.evaluate_roi_guarded(roi, task)).collect()
                }),
                Err(pool_fault) => {
                    warn!(
                        "🧵 [POOL_FALLBACK]: Bounded pool unavailable ({}); running sequentially.",
                        pool_fault
                    );
                    rois.iter().map(|roi| self.evaluate_roi_guarded(roi, task)).collect()
                }
            };

        records.sort_by_key(|record| record.roi_id);
        records
    }

    /// Blindaje de worker: un pánico degrada a ROI reprobada.
    fn evaluate_roi_guarded(&self, roi: &NormalizedRoi, task: &PanelTask<'_>) -> RoiOutcomeRecord {
        catch_unwind(AssertUnwindSafe(|| self.evaluate_roi(roi, task))).unwrap_or_else(|_| {
            warn!("💀 [WORKER_PANIC]: ROI {} worker collapsed; downgrading.", roi.idx);
            failed_record(roi, "worker_panic")
        })
    }
}
