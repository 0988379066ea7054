// [apps/inspector/src/state/session_registry.rs]
/*!
 * =================================================================
 * APARATO: SESSION REGISTRY MANAGER (V24.0 - SCOPED PERMITS)
 * CLASIFICACIÓN: APPLICATION STATE (ESTRATO L1-APP)
 * RESPONSABILIDAD: CICLO DE VIDA DE SESIONES Y WORKSPACES COMPARTIDOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SCOPED ACQUISITION: 'begin_inspection' entrega un permiso con
 *    Drop; cualquier ruta de error libera 'inspection_in_progress' y
 *    la sesión jamás queda bloqueada de forma permanente.
 * 2. BRIEF LOCKS: El mapa vive tras un Mutex con accesos breves; el
 *    I/O de workspace ocurre siempre fuera del candado.
 * 3. BEST EFFORT CLEANUP: Un fallo al purgar el workspace no corrompe
 *    el registro en RAM (rastro WARN y continuar).
 * =================================================================
 */

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use argus_domain_models::session::{SessionClosedReport, SessionStatusReport};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SessionFault {
    #[error("SESSION_NOT_FOUND: {0}")]
    NotFound(String),

    /// La sesión ya tiene una inspección en vuelo.
    #[error("SESSION_CONFLICT: {0}")]
    Conflict(String),

    #[error("WORKSPACE_IO_FAULT: {0}")]
    WorkspaceIo(#[from] std::io::Error),
}

/// Registro en RAM de una sesión activa.
struct SessionRecord {
    product_name: String,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    inspection_count: u64,
    inspection_in_progress: bool,
    last_results: Option<serde_json::Value>,
}

/// Gestor del inventario de sesiones y sus workspaces en el
/// filesystem compartido (`{shared_root}/sessions/{id}/`).
pub struct SessionRegistry {
    shared_root: PathBuf,
    sessions: Mutex<HashMap<Uuid, SessionRecord>>,
}

impl SessionRegistry {
    pub fn new(shared_root: PathBuf) -> Self {
        Self {
            shared_root,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Raíz del workspace físico de una sesión.
    pub fn workspace_root(&self, session_id: Uuid) -> PathBuf {
        self.shared_root.join("sessions").join(session_id.to_string())
    }

    pub fn input_directory(&self, session_id: Uuid) -> PathBuf {
        self.workspace_root(session_id).join("input")
    }

    pub fn output_directory(&self, session_id: Uuid) -> PathBuf {
        self.workspace_root(session_id).join("output")
    }

    /**
     * Crea una sesión nueva con workspace limpio.
     *
     * Cualquier directorio residual en la ruta objetivo se purga de
     * forma defensiva antes de crear `input/` y `output/`.
     */
    pub fn create(&self, product_name: &str) -> Result<Uuid, SessionFault> {
        let session_id = Uuid::new_v4();
        let workspace = self.workspace_root(session_id);

        // Purga defensiva de residuos (colisión de UUID es teórica,
        // pero un despliegue anterior pudo dejar basura en el share).
        if workspace.exists() {
            warn!("🧹 [WORKSPACE_RESIDUE]: Purging stale directory {}", workspace.display());
            fs::remove_dir_all(&workspace)?;
        }

        fs::create_dir_all(workspace.join("input"))?;
        fs::create_dir_all(workspace.join("output"))?;

        let now = Utc::now();
        let record = SessionRecord {
            product_name: product_name.to_string(),
            created_at: now,
            last_activity: now,
            inspection_count: 0,
            inspection_in_progress: false,
            last_results: None,
        };

        self.sessions
            .lock()
            .expect("FATAL: Session registry lock poisoned.")
            .insert(session_id, record);

        info!("🆕 [SESSION_OPEN]: {} for product [{}]", session_id, product_name);
        Ok(session_id)
    }

    /// Producto asociado a la sesión.
    pub fn product_name(&self, session_id: Uuid) -> Option<String> {
        self.sessions
            .lock()
            .expect("FATAL: Session registry lock poisoned.")
            .get(&session_id)
            .map(|record| record.product_name.clone())
    }

    /// Instantánea de estado para la superficie HTTP.
    pub fn status(&self, session_id: Uuid) -> Option<SessionStatusReport> {
        self.sessions
            .lock()
            .expect("FATAL: Session registry lock poisoned.")
            .get(&session_id)
            .map(|record| SessionStatusReport {
                session_id: session_id.to_string(),
                product_name: record.product_name.clone(),
                inspection_count: record.inspection_count,
                created_at: record.created_at.to_rfc3339(),
                last_activity: record.last_activity.to_rfc3339(),
                inspection_in_progress: record.inspection_in_progress,
            })
    }

    /// Último veredicto sellado en la sesión (None si aún no inspeccionó).
    pub fn last_results(&self, session_id: Uuid) -> Result<Option<serde_json::Value>, SessionFault> {
        self.sessions
            .lock()
            .expect("FATAL: Session registry lock poisoned.")
            .get(&session_id)
            .map(|record| record.last_results.clone())
            .ok_or_else(|| SessionFault::NotFound(session_id.to_string()))
    }

    /**
     * Adquiere el permiso exclusivo de inspección de la sesión.
     *
     * La marca se toma atómicamente bajo el candado del registro; un
     * segundo intento concurrente recibe 'Conflict'. El permiso
     * liberará la marca en Drop aunque la corrida falle.
     */
    pub fn begin_inspection(
        self: Arc<Self>,
        session_id: Uuid,
    ) -> Result<InspectionPermit, SessionFault> {
        {
            let mut sessions_guard =
                self.sessions.lock().expect("FATAL: Session registry lock poisoned.");

            let record = sessions_guard
                .get_mut(&session_id)
                .ok_or_else(|| SessionFault::NotFound(session_id.to_string()))?;

            if record.inspection_in_progress {
                return Err(SessionFault::Conflict(session_id.to_string()));
            }
            record.inspection_in_progress = true;
        }

        Ok(InspectionPermit {
            registry: self,
            session_id,
            released: false,
        })
    }

    /// Liberación simple de la marca (ruta de error del permiso).
    fn release(&self, session_id: Uuid) {
        if let Some(record) = self
            .sessions
            .lock()
            .expect("FATAL: Session registry lock poisoned.")
            .get_mut(&session_id)
        {
            record.inspection_in_progress = false;
        }
    }

    /// Cierre exitoso de una inspección: contadores y último resultado.
    fn finish(&self, session_id: Uuid, results: serde_json::Value) {
        if let Some(record) = self
            .sessions
            .lock()
            .expect("FATAL: Session registry lock poisoned.")
            .get_mut(&session_id)
        {
            record.inspection_in_progress = false;
            record.inspection_count += 1;
            record.last_activity = Utc::now();
            record.last_results = Some(results);
        }
    }

    /**
     * Cierra la sesión y purga su workspace recursivamente.
     *
     * Una sesión con inspección en vuelo no se cierra (Conflict): el
     * workspace está siendo escrito por los workers.
     */
    pub fn close(&self, session_id: Uuid) -> Result<SessionClosedReport, SessionFault> {
        let record = {
            let mut sessions_guard =
                self.sessions.lock().expect("FATAL: Session registry lock poisoned.");

            let in_flight = match sessions_guard.get(&session_id) {
                Some(record) => record.inspection_in_progress,
                None => return Err(SessionFault::NotFound(session_id.to_string())),
            };
            if in_flight {
                return Err(SessionFault::Conflict(session_id.to_string()));
            }
            sessions_guard.remove(&session_id).expect("presence checked under the lock")
        };

        // I/O fuera del candado: la purga es best-effort.
        let workspace = self.workspace_root(session_id);
        let directory_cleaned = match fs::remove_dir_all(&workspace) {
            Ok(()) => true,
            Err(cleanup_fault) => {
                warn!(
                    "🧹 [CLEANUP_FAULT]: Workspace {} not fully removed: {}",
                    workspace.display(),
                    cleanup_fault
                );
                false
            }
        };

        let duration_seconds =
            (Utc::now() - record.created_at).num_milliseconds() as f64 / 1000.0;

        info!(
            "🔚 [SESSION_CLOSED]: {} after {} inspections ({}s)",
            session_id, record.inspection_count, duration_seconds
        );

        Ok(SessionClosedReport {
            duration_seconds,
            inspection_count: record.inspection_count,
            directory_cleaned,
        })
    }

    /**
     * Purga de sesiones inactivas (daemon Reaper).
     *
     * Una sesión con inspección en vuelo jamás se purga, sin importar
     * su marca de actividad.
     */
    pub fn sweep_idle(&self, max_idle: chrono::Duration) -> usize {
        let expiration_cutoff = Utc::now() - max_idle;

        let expired_sessions: Vec<Uuid> = {
            let mut sessions_guard =
                self.sessions.lock().expect("FATAL: Session registry lock poisoned.");

            let expired: Vec<Uuid> = sessions_guard
                .iter()
                .filter(|(_, record)| {
                    !record.inspection_in_progress && record.last_activity < expiration_cutoff
                })
                .map(|(session_id, _)| *session_id)
                .collect();

            for session_id in &expired {
                sessions_guard.remove(session_id);
            }
            expired
        };

        // Purga de workspaces fuera del candado.
        for session_id in &expired_sessions {
            let workspace = self.workspace_root(*session_id);
            if let Err(cleanup_fault) = fs::remove_dir_all(&workspace) {
                warn!(
                    "💀 [REAPER_CLEANUP]: Workspace {} not removed: {}",
                    workspace.display(),
                    cleanup_fault
                );
            }
        }

        expired_sessions.len()
    }

    /// Cantidad de sesiones vivas (telemetría).
    pub fn active_count(&self) -> usize {
        self.sessions.lock().expect("FATAL: Session registry lock poisoned.").len()
    }

    /// Retrocede la marca de actividad de una sesión (solo Proving Grounds).
    #[doc(hidden)]
    pub fn rewind_activity_for_tests(&self, session_id: Uuid, backwards: chrono::Duration) {
        if let Some(record) = self
            .sessions
            .lock()
            .expect("FATAL: Session registry lock poisoned.")
            .get_mut(&session_id)
        {
            record.last_activity -= backwards;
        }
    }
}

/// Permiso de inspección con alcance: liberar es imposible de olvidar.
pub struct InspectionPermit {
    registry: Arc<SessionRegistry>,
    session_id: Uuid,
    released: bool,
}

impl InspectionPermit {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Sella la inspección: contador, actividad y último resultado.
    pub fn complete(mut self, results: serde_json::Value) {
        self.registry.finish(self.session_id, results);
        self.released = true;
    }
}

impl Drop for InspectionPermit {
    fn drop(&mut self) {
        if !self.released {
            debug!("♻️ [PERMIT_RELEASED]: Inspection flag cleared for {}", self.session_id);
            self.registry.release(self.session_id);
        }
    }
}
