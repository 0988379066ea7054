// [apps/inspector/src/main.rs]
/*!
 * =================================================================
 * APARATO: INSPECTOR MAIN ENTRY POINT (V9.0 - GOLD MASTER)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICIÓN SEGURA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DETERMINISTIC IGNITION: Observabilidad y configuración quedan
 *    selladas antes de abrir el socket TCP.
 * 2. RUNTIME REFINERY: Runtime multi-hilo explícito; el cómputo de
 *    panel corre bajo 'spawn_blocking', nunca en los hilos de red.
 * =================================================================
 */

use argus_inspector::prelude::*;

use argus_shared_heimdall::init_tracing;
use dotenvy::dotenv;
use tracing::info;

/**
 * Punto de ignición supremo del binario del Inspector.
 */
fn main() -> anyhow::Result<()> {
    // 1. CARGA DE ENTORNO SOBERANO
    dotenv().ok();

    // 2. INICIALIZACIÓN DE OBSERVABILIDAD NEURAL (HEIMDALL)
    init_tracing("argus_inspector");

    // 3. CONSTRUCCIÓN DEL RUNTIME MULTI-HILO
    let runtime_inspector = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    runtime_inspector.block_on(async {
        info!("🛰️  [INSPECTOR]: Global ignition sequence starting...");

        // 4. ADQUISICIÓN DE COORDENADAS TÁCTICAS
        let configuration = InspectorConfig::from_environment();
        let listening_port = configuration.listening_port;

        // 5. CONSTRUCCIÓN DEL KERNEL SOBERANO (ESTRATO L1-APP)
        let kernel_instance = InspectorKernel::ignite(configuration);

        // 6. IGNICIÓN DE OPERACIONES
        info!("🚀 [ARGUS_ONLINE]: Inspector operational on port {}.", listening_port);
        kernel_instance.launch_inspection_operations().await;

        Ok(())
    })
}
