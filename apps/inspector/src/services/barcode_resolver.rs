// [apps/inspector/src/services/barcode_resolver.rs]
/*!
 * =================================================================
 * APARATO: BARCODE RESOLUTION SERVICE (V14.0 - LINKED TIERS)
 * CLASIFICACIÓN: APPLICATION SERVICE (ESTRATO L1-APP)
 * RESPONSABILIDAD: APLICAR LA TABLA DE PRIORIDADES Y EL ENLACE EXTERNO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LINKED TIERS: Toda fuente que aporta un valor (prioridades 0..3)
 *    pasa por el servicio de enlace; solo el escalón "N/A" no enlaza.
 * 2. NON BLOCKING: Cada llamada de enlace corre bajo su propia
 *    ventana de 3 s y degrada al valor crudo; la resolución jamás
 *    bloquea el veredicto.
 * =================================================================
 */

use std::collections::BTreeMap;

use argus_domain_inspection::{select_device_barcode, AggregatedPanel};
use argus_infra_linking::LinkingClient;
use tracing::debug;

/**
 * Rellena `device_summaries[*].barcode` sobre el panel agregado.
 *
 * La selección por prioridad es pura; el enlace externo se aplica al
 * valor elegido con degradación silenciosa al crudo.
 */
pub async fn resolve_panel_barcodes(
    panel: &mut AggregatedPanel,
    client_barcode_map: &BTreeMap<u32, String>,
    legacy_singleton: Option<&str>,
    linking: &LinkingClient,
) {
    let AggregatedPanel { roi_results, device_summaries, .. } = panel;

    for (device_key, summary) in device_summaries.iter_mut() {
        // Las claves del mapa nacen de ids u32 en el agregador.
        let device_id: u32 = match device_key.parse() {
            Ok(parsed) => parsed,
            Err(_) => continue,
        };

        match select_device_barcode(device_id, roi_results, client_barcode_map, legacy_singleton)
        {
            Some((raw_barcode, origin)) => {
                let linked = linking.link_or_fallback(&raw_barcode).await;
                debug!(
                    "🏷️ [BARCODE_RESOLVED]: device {} via {:?}: '{}'",
                    device_id, origin, linked
                );
                summary.barcode = linked;
            }
            None => {
                // El resumen ya nace en "N/A" desde el agregador.
                debug!("🏷️ [BARCODE_VOID]: device {} has no source", device_id);
            }
        }
    }
}
