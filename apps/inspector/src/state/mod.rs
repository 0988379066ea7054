// [apps/inspector/src/state/mod.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN STATE ORCHESTRATOR (V13.0 - INSPECTION HUB)
 * CLASIFICACIÓN: APPLICATION STATE (ESTRATO L1-APP)
 * RESPONSABILIDAD: COMPOSICIÓN DE MOTOR, CATÁLOGO, ENLACE Y SESIONES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. COMPOSITION ROOT: El estado ensambla los estratos (motor L2,
 *    catálogo L3, enlace L3, registro de sesiones L1) y viaja
 *    clonado por los handlers; cero singletons ocultos.
 * 2. MAINTENANCE GATE: El modo de sistema permite suspender el
 *    despacho con un 503 perimetral sin matar el proceso.
 * =================================================================
 */

pub mod session_registry;

use std::sync::{Arc, RwLock};

use argus_domain_inspection::{CapabilityRegistry, InspectionEngine};
use argus_infra_catalog::ProductCatalog;
use argus_infra_linking::LinkingClient;
use tracing::{debug, error, info, warn};

use crate::config::InspectorConfig;
use session_registry::SessionRegistry;

/// Modos de salud del sistema para la interceptación perimetral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemMode {
    /// El sistema acepta y despacha inspecciones de forma nominal.
    Operational,
    /// Despacho suspendido por mantenimiento o mando del operador.
    Maintenance(String),
}

/// Contenedor de estado compartido (Thread-Safe) del Inspector.
#[derive(Clone)]
pub struct AppState {
    /// Motor de inspección: plugins de capacidad + candado dorado.
    pub engine: Arc<InspectionEngine>,
    /// Repositorio de recetas de producto.
    pub catalog: Arc<ProductCatalog>,
    /// Cliente del servicio externo de enlace de barcodes.
    pub linking: Arc<LinkingClient>,
    /// Inventario de sesiones y workspaces.
    pub sessions: Arc<SessionRegistry>,
    /// Configuración inmutable de la ignición.
    pub config: Arc<InspectorConfig>,
    /// Estado de liveness para el guardia perimetral.
    pub current_system_mode: Arc<RwLock<SystemMode>>,
}

impl AppState {
    /// Forja el Estado Maestro inyectando todas las dependencias.
    pub fn new(config: InspectorConfig) -> Self {
        debug!("🧬 [APP_STATE]: Executing inspector ignition sequence...");

        let capability_registry = Arc::new(CapabilityRegistry::standard());

        let linking_client = Arc::new(LinkingClient::new(
            config.linking_endpoint.clone(),
            config.linking_timeout,
        ));

        Self {
            engine: Arc::new(InspectionEngine::new(capability_registry)),
            catalog: Arc::new(ProductCatalog::new(config.config_root.clone())),
            linking: linking_client,
            sessions: Arc::new(SessionRegistry::new(config.shared_root.clone())),
            config: Arc::new(config),
            current_system_mode: Arc::new(RwLock::new(SystemMode::Operational)),
        }
    }

    /// Sincroniza el modo operativo del servidor.
    pub fn set_mode(&self, target_system_mode: SystemMode) {
        match self.current_system_mode.write() {
            Ok(mut mode_guard) => {
                info!("🔄 [STATE_SHIFT]: System transitioning to mode: {:?}", target_system_mode);
                *mode_guard = target_system_mode;
            }
            Err(lock_poison_fault) => {
                error!("💀 [KERNEL_CRASH]: System mode lock poisoned: {}", lock_poison_fault);
            }
        }
    }

    /// Evalúa la capacidad operativa ante ráfagas HTTP entrantes.
    pub fn is_operational(&self) -> Result<(), String> {
        let mode_guard = self
            .current_system_mode
            .read()
            .map_err(|e| format!("LOCK_POISON_FAULT: {}", e))?;

        match &*mode_guard {
            SystemMode::Operational => Ok(()),
            SystemMode::Maintenance(rejection_reason) => {
                warn!("⛔ [ACCESS_DENIED]: Maintenance active: {}", rejection_reason);
                Err(rejection_reason.clone())
            }
        }
    }
}
