// [tests/mirror/apps/inspector/session_lifecycle.test.rs]
/**
 * =================================================================
 * APARATO: SESSION LIFECYCLE CERTIFICATION (V11.0 - SCOPED GUARD)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L1-APP)
 * RESPONSABILIDAD: CICLO DE VIDA DE SESIONES Y PERMISOS CON ALCANCE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CONFLICT GATE: Dos inspecciones concurrentes sobre la misma
 *    sesión son imposibles; la segunda recibe Conflict.
 * 2. DROP DISCIPLINE: El permiso libera la marca en Drop; una ruta
 *    de error jamás deja la sesión bloqueada.
 * 3. REAPER RULES: La purga por inactividad respeta las inspecciones
 *    en vuelo y elimina el workspace físico.
 * =================================================================
 */

use std::sync::Arc;

use argus_inspector::state::session_registry::{SessionFault, SessionRegistry};
use tempfile::TempDir;
use uuid::Uuid;

fn registry_in(root: &TempDir) -> Arc<SessionRegistry> {
    Arc::new(SessionRegistry::new(root.path().to_path_buf()))
}

#[test]
fn certify_creation_builds_a_clean_workspace() {
    let root = TempDir::new().unwrap();
    let registry = registry_in(&root);

    let session_id = registry.create("P1").expect("workspace must be created");

    assert!(registry.input_directory(session_id).is_dir());
    assert!(registry.output_directory(session_id).is_dir());

    let status = registry.status(session_id).expect("session is registered");
    assert_eq!(status.product_name, "P1");
    assert_eq!(status.inspection_count, 0);
    assert!(!status.inspection_in_progress);
}

#[test]
fn certify_inspection_conflict_and_drop_release() {
    let root = TempDir::new().unwrap();
    let registry = registry_in(&root);
    let session_id = registry.create("P1").unwrap();

    // 1. PERMISO EXCLUSIVO: el segundo intento recibe Conflict.
    let permit = Arc::clone(&registry).begin_inspection(session_id).expect("first permit granted");
    assert!(matches!(
        Arc::clone(&registry).begin_inspection(session_id),
        Err(SessionFault::Conflict(_))
    ));

    // 2. DROP DISCIPLINE: la ruta de error libera la marca.
    drop(permit);
    assert!(!registry.status(session_id).unwrap().inspection_in_progress);

    // 3. SELLADO NOMINAL: complete() suma el contador.
    let permit = Arc::clone(&registry).begin_inspection(session_id).expect("re-acquired after drop");
    permit.complete(serde_json::json!({ "overall_result": { "passed": true } }));

    let status = registry.status(session_id).unwrap();
    assert_eq!(status.inspection_count, 1);
    assert!(!status.inspection_in_progress);
}

#[test]
fn certify_close_purges_the_workspace() {
    let root = TempDir::new().unwrap();
    let registry = registry_in(&root);
    let session_id = registry.create("P1").unwrap();
    let workspace = registry.workspace_root(session_id);

    // Artefacto residual para verificar la purga recursiva.
    std::fs::write(workspace.join("output").join("roi_1.jpg"), b"stub").unwrap();

    let closed_report = registry.close(session_id).expect("close succeeds");
    assert!(closed_report.directory_cleaned);
    assert!(!workspace.exists());

    // Cerrar dos veces es NotFound; un id desconocido también.
    assert!(matches!(registry.close(session_id), Err(SessionFault::NotFound(_))));
    assert!(matches!(registry.close(Uuid::new_v4()), Err(SessionFault::NotFound(_))));
}

#[test]
fn certify_close_refuses_while_inspection_in_flight() {
    let root = TempDir::new().unwrap();
    let registry = registry_in(&root);
    let session_id = registry.create("P1").unwrap();

    let _permit = Arc::clone(&registry).begin_inspection(session_id).unwrap();
    assert!(matches!(registry.close(session_id), Err(SessionFault::Conflict(_))));
}

#[test]
fn certify_reaper_evicts_only_idle_sessions() {
    let root = TempDir::new().unwrap();
    let registry = registry_in(&root);

    let idle_session = registry.create("P1").unwrap();
    let busy_session = registry.create("P1").unwrap();
    let fresh_session = registry.create("P1").unwrap();

    // Ambas superan el umbral de inactividad, pero una está en vuelo.
    registry.rewind_activity_for_tests(idle_session, chrono::Duration::hours(2));
    registry.rewind_activity_for_tests(busy_session, chrono::Duration::hours(2));
    let _busy_permit = Arc::clone(&registry).begin_inspection(busy_session).unwrap();

    let purged = registry.sweep_idle(chrono::Duration::hours(1));

    assert_eq!(purged, 1, "only the idle session is evicted");
    assert!(registry.status(idle_session).is_none());
    assert!(!registry.workspace_root(idle_session).exists());
    assert!(registry.status(busy_session).is_some(), "in-flight session survives");
    assert!(registry.status(fresh_session).is_some(), "fresh session survives");
}
