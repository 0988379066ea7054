// [apps/inspector/src/services/reaper.rs]
/**
 * =================================================================
 * APARATO: THE REAPER SYSTEM SERVICE (V19.0 - SESSION HYGIENE)
 * CLASIFICACIÓN: BACKGROUND INFRASTRUCTURE (ESTRATO L4)
 * RESPONSABILIDAD: PURGA DE SESIONES INACTIVAS Y SUS WORKSPACES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. IDLE EVICTION: Sesiones sin actividad por encima del umbral
 *    configurado (1 hora nominal) se purgan junto a su workspace.
 * 2. IN-FLIGHT IMMUNITY: Una sesión con inspección en vuelo jamás se
 *    purga, sin importar su marca de actividad.
 * =================================================================
 */

use std::time::Duration;
use tokio::time::interval;
use tracing::{info, instrument};

use crate::state::AppState;

/// Cadencia del ciclo de higiene.
const REAPER_INTERVAL_SECONDS: u64 = 60;

/**
 * Inicia el servicio de limpieza perpetua en el runtime de Tokio.
 *
 * El ciclo de 60 segundos mantiene el share libre de workspaces
 * huérfanos sin introducir jitter en los hilos de inspección.
 */
#[instrument(skip(application_state))]
pub async fn spawn_reaper(application_state: AppState) {
    let mut maintenance_ticker = interval(Duration::from_secs(REAPER_INTERVAL_SECONDS));
    let idle_timeout = application_state.config.session_idle_timeout;

    tokio::spawn(async move {
        info!("💀 [REAPER_ACTIVE]: Session hygiene daemon initiated.");

        loop {
            maintenance_ticker.tick().await;

            let purged_sessions = application_state.sessions.sweep_idle(idle_timeout);
            if purged_sessions > 0 {
                info!(
                    "💀 [REAPER_CLEANUP]: Evicted {} idle sessions ({} still active).",
                    purged_sessions,
                    application_state.sessions.active_count()
                );
            }
        }
    });
}
