// [apps/inspector/src/config.rs]
/*!
 * =================================================================
 * APARATO: INSPECTOR CONFIGURATION (V9.0 - ENVIRONMENT IGNITION)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: ADQUISICIÓN ÚNICA DE COORDENADAS DE ENTORNO
 * =================================================================
 */

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

/// Ventana por defecto del servicio de enlace (milisegundos).
const DEFAULT_LINKING_TIMEOUT_MILLISECONDS: u64 = 3000;
/// Expiración por inactividad de sesión (1 hora).
const DEFAULT_SESSION_IDLE_TIMEOUT_SECONDS: i64 = 3600;

/// Configuración inmutable del servidor, hidratada una vez en la ignición.
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Raíz de recetas de producto (`products/{name}/...`).
    pub config_root: PathBuf,
    /// Raíz del filesystem compartido de sesiones.
    pub shared_root: PathBuf,
    /// Prefijo de montaje con el que el cliente ve los artefactos.
    pub client_mount_prefix: String,
    /// Endpoint del servicio de enlace de barcodes; None lo deshabilita.
    pub linking_endpoint: Option<String>,
    pub linking_timeout: Duration,
    /// Inactividad máxima antes de que el Reaper purgue una sesión.
    pub session_idle_timeout: chrono::Duration,
    pub listening_port: u16,
}

impl InspectorConfig {
    /// Hidrata la configuración desde el entorno del proceso.
    pub fn from_environment() -> Self {
        let config_root = PathBuf::from(
            std::env::var("ARGUS_CONFIG_ROOT").unwrap_or_else(|_| "./inspection_data".to_string()),
        );
        let shared_root = PathBuf::from(
            std::env::var("ARGUS_SHARED_ROOT").unwrap_or_else(|_| "./shared".to_string()),
        );
        let client_mount_prefix = std::env::var("ARGUS_CLIENT_MOUNT_PREFIX")
            .unwrap_or_else(|_| shared_root.display().to_string());

        let linking_endpoint = std::env::var("ARGUS_LINKING_URL").ok().filter(|url| !url.is_empty());
        if linking_endpoint.is_none() {
            warn!("🔗 [LINKING_OFFLINE]: ARGUS_LINKING_URL not set; raw barcodes pass through.");
        }

        let linking_timeout = Duration::from_millis(
            std::env::var("ARGUS_LINKING_TIMEOUT_MS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_LINKING_TIMEOUT_MILLISECONDS),
        );

        let session_idle_timeout = chrono::Duration::seconds(
            std::env::var("ARGUS_SESSION_IDLE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_SESSION_IDLE_TIMEOUT_SECONDS),
        );

        let listening_port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        info!(
            "⚙️  [CONFIG]: config_root={} shared_root={} port={}",
            config_root.display(),
            shared_root.display(),
            listening_port
        );

        Self {
            config_root,
            shared_root,
            client_mount_prefix,
            linking_endpoint,
            linking_timeout,
            session_idle_timeout,
            listening_port,
        }
    }
}
