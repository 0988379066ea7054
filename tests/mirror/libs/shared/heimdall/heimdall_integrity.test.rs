// [tests/mirror/libs/shared/heimdall/heimdall_integrity.test.rs]
/**
 * =================================================================
 * APARATO: HEIMDALL INTEGRITY CERTIFICATION (V6.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L4-SHARED)
 * RESPONSABILIDAD: IGNICIÓN IDEMPOTENTE DEL OBSERVADOR
 * =================================================================
 */

use argus_shared_heimdall::init_tracing;

/**
 * CERTIFICACIÓN: La re-ignición del observador es inocua.
 *
 * El candado atómico garantiza que un segundo init no intente
 * instalar otro suscriptor global (lo que entraría en pánico).
 */
#[test]
fn certify_idempotent_ignition() {
    init_tracing("argus_certification");
    init_tracing("argus_certification");
    init_tracing("argus_certification_other_service");

    // Emisión nominal tras la ignición: no debe entrar en pánico.
    tracing::info!("🧪 [PROVING_GROUNDS]: Heimdall ignition certified.");
}
