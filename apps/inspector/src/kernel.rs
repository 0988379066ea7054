// [apps/inspector/src/kernel.rs]
/**
 * =================================================================
 * APARATO: INSPECTOR SOVEREIGN KERNEL (V16.0 - GUARDED IGNITION)
 * CLASIFICACIÓN: COMPOSITION ROOT (ESTRATO L1-APP)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICIÓN SEGURA
 *
 * VISION HIPER-HOLÍSTICA:
 * Actúa como la placa base donde se conectan todos los servicios:
 * estado neural, daemon de higiene de sesiones y transporte HTTP.
 * =================================================================
 */

use std::net::{IpAddr, SocketAddr};

use tracing::{error, info};

use crate::config::InspectorConfig;
use crate::routes::create_inspection_router;
use crate::services::spawn_reaper;
use crate::state::AppState;

pub struct InspectorKernel {
    pub server_network_port: u16,
    pub application_shared_state: AppState,
}

impl InspectorKernel {
    /**
     * Realiza la ignición del estado neural del inspector.
     * Verifica la raíz de recetas antes de levantar servicios.
     */
    pub fn ignite(configuration: InspectorConfig) -> Self {
        if !configuration.config_root.is_dir() {
            error!(
                "⚠️ [CATALOG_VOID]: Config root {} does not exist yet; products will 404.",
                configuration.config_root.display()
            );
        }

        Self {
            server_network_port: configuration.listening_port,
            application_shared_state: AppState::new(configuration),
        }
    }

    /**
     * Lanza los daemons de fondo y el servidor HTTP principal.
     */
    pub async fn launch_inspection_operations(self) {
        let shared_application_state = self.application_shared_state.clone();

        // --- 1. DAEMON DE HIGIENE DE SESIONES (REAPER) ---
        spawn_reaper(shared_application_state.clone()).await;

        // --- 2. IGNICIÓN DEL TRANSPORTE HTTP (AXUM) ---
        let inspection_router = create_inspection_router(shared_application_state);

        let bind_address = SocketAddr::new(
            "0.0.0.0".parse::<IpAddr>().expect("static address parses"),
            self.server_network_port,
        );

        info!("🚀 [KERNEL_ONLINE]: Argus Inspector listening at {}", bind_address);

        let tcp_listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .expect("CRITICAL_FAULT: Failed to bind network port.");

        if let Err(server_error) = axum::serve(tcp_listener, inspection_router).await {
            error!("💀 [KERNEL_COLLAPSE]: Runtime failure: {}", server_error);
            std::process::exit(1);
        }
    }
}
