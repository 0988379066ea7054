// [apps/inspector/src/services/coordinator.rs]
/*!
 * =================================================================
 * APARATO: INSPECTION COORDINATOR (V41.0 - DUAL ENTRY POINTS)
 * CLASIFICACIÓN: APPLICATION SERVICE (ESTRATO L1-APP)
 * RESPONSABILIDAD: ORQUESTACIÓN DE INSPECCIONES SIMPLES Y AGRUPADAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SCOPED PERMIT: El permiso de sesión libera la marca en toda ruta
 *    de error; el cómputo CPU corre bajo 'spawn_blocking' como el
 *    resto de los motores pesados del ecosistema.
 * 2. MERGED RESOLUTION: En inspecciones agrupadas los barcodes se
 *    resuelven una única vez sobre el set fusionado; resolver por
 *    pasada pisaría una prioridad alta con una baja.
 * 3. ABORT GUARD: Si el cliente abandona (future descartado), la
 *    señal de terminación degrada las ROIs pendientes; los workers
 *    en vuelo terminan y sus artefactos se descartan.
 * =================================================================
 */

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use argus_domain_inspection::{
    aggregate_panel, ArtifactWorkspace, InspectionEngine, PanelTask, ProductContext,
};
use argus_domain_models::report::{
    GroupOutcome, GroupedInspectionReport, InspectionReport, RoiOutcomeRecord,
};
use argus_domain_models::request::{
    GroupedInspectPayload, ImageSource, InspectPayload,
};
use argus_domain_models::roi::NormalizedRoi;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::InspectionApiFault;
use crate::services::barcode_resolver::resolve_panel_barcodes;
use crate::state::AppState;

/// Señal de aborto con disparo en Drop: si el future del handler se
/// descarta (cliente desconectado), las ROIs pendientes degradan.
struct AbortSignalGuard {
    signal: Arc<AtomicBool>,
    defused: bool,
}

impl AbortSignalGuard {
    fn new() -> Self {
        Self { signal: Arc::new(AtomicBool::new(false)), defused: false }
    }

    fn signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.signal)
    }

    fn defuse(mut self) {
        self.defused = true;
    }
}

impl Drop for AbortSignalGuard {
    fn drop(&mut self) {
        if !self.defused {
            self.signal.store(true, Ordering::Relaxed);
        }
    }
}

/**
 * Entrada (i): inspección de imagen única.
 *
 * Pipeline: permiso -> receta -> imagen -> abanico paralelo ->
 * agregación -> resolución de barcodes -> sellado de sesión.
 */
#[instrument(skip(state, payload), fields(session = %session_id_raw))]
pub async fn run_single_inspection(
    state: &AppState,
    session_id_raw: &str,
    payload: InspectPayload,
) -> Result<InspectionReport, InspectionApiFault> {
    let session_id = parse_session_id(session_id_raw)?;

    // 1. PERMISO EXCLUSIVO (liberación garantizada por Drop)
    let permit = Arc::clone(&state.sessions).begin_inspection(session_id)?;
    let ignition_timestamp = Instant::now();

    // 2. RECETA DEL PRODUCTO DE LA SESIÓN
    let product_name = state
        .sessions
        .product_name(session_id)
        .ok_or_else(|| InspectionApiFault::SessionNotFound(session_id.to_string()))?;
    let recipe = state.catalog.load_recipe(&product_name)?;

    // 3. FRONTERA DE PETICIÓN (imagen + mapas de barcode)
    let client_barcode_map = match payload.device_barcodes.clone() {
        Some(field) => field.into_device_map()?,
        None => BTreeMap::new(),
    };
    let legacy_singleton = payload.device_barcode.clone();
    let image_bytes = load_image_bytes(state, session_id, &payload.image_source()?)?;

    // 4. ABANICO PARALELO DEL PANEL
    let abort_guard = AbortSignalGuard::new();
    let product_context = ProductContext {
        product_name: product_name.clone(),
        golden_root: recipe.golden_root.clone(),
        color_ranges: recipe.color_ranges.clone(),
    };
    let records = execute_panel_pass(
        state,
        session_id,
        image_bytes,
        recipe.rois.clone(),
        product_context,
        abort_guard.signal(),
    )
    .await?;

    // 5. AGREGACIÓN + RESOLUCIÓN DE BARCODES
    let mut panel = aggregate_panel(records)?;
    resolve_panel_barcodes(
        &mut panel,
        &client_barcode_map,
        legacy_singleton.as_deref(),
        &state.linking,
    )
    .await;
    abort_guard.defuse();

    let report = InspectionReport {
        roi_results: panel.roi_results,
        device_summaries: panel.device_summaries,
        overall_result: panel.overall_result,
        processing_time: ignition_timestamp.elapsed().as_secs_f64(),
        timestamp: Some(Utc::now().timestamp()),
    };

    info!(
        "✅ [INSPECTED]: {} -> {}/{} ROIs passed in {:.3}s",
        session_id,
        report.overall_result.passed_rois,
        report.overall_result.total_rois,
        report.processing_time
    );

    // 6. SELLADO DE SESIÓN
    permit.complete(serde_json::to_value(&report).unwrap_or(serde_json::Value::Null));
    Ok(report)
}

/**
 * Entrada (ii): inspección agrupada multi-captura.
 *
 * Cada grupo corre con la receta filtrada a su par (focus, exposure);
 * una ROI definida para otra exposición jamás se evalúa contra esta
 * imagen (el contexto de iluminación sería el equivocado). La
 * agregación y la resolución de barcodes corren una única vez sobre
 * el set concatenado.
 */
#[instrument(skip(state, payload), fields(session = %session_id_raw))]
pub async fn run_grouped_inspection(
    state: &AppState,
    session_id_raw: &str,
    payload: GroupedInspectPayload,
) -> Result<GroupedInspectionReport, InspectionApiFault> {
    let session_id = parse_session_id(session_id_raw)?;

    let permit = Arc::clone(&state.sessions).begin_inspection(session_id)?;
    let ignition_timestamp = Instant::now();

    let session_product = state
        .sessions
        .product_name(session_id)
        .ok_or_else(|| InspectionApiFault::SessionNotFound(session_id.to_string()))?;
    let product_name = payload.product_name.clone().unwrap_or(session_product);
    let recipe = state.catalog.load_recipe(&product_name)?;

    let client_barcode_map = match payload.device_barcodes.clone() {
        Some(field) => field.into_device_map()?,
        None => BTreeMap::new(),
    };
    let legacy_singleton = payload.device_barcode.clone();

    let abort_guard = AbortSignalGuard::new();
    let mut merged_records: Vec<RoiOutcomeRecord> = Vec::new();
    let mut group_results: BTreeMap<String, GroupOutcome> = BTreeMap::new();

    // Los grupos de captura son pasadas secuenciales del mismo panel
    // físico; el paralelismo vive dentro de cada pasada.
    for (group_key, capture_group) in &payload.groups {
        let image_bytes =
            load_image_bytes(state, session_id, &capture_group.image_source()?)?;

        // Filtro esencial por grupo de captura, intersecado con la
        // lista advisory cuando el cliente la envía.
        let mut pass_rois: Vec<NormalizedRoi> = recipe
            .rois
            .iter()
            .filter(|roi| roi.matches_capture_group(capture_group.focus, capture_group.exposure))
            .cloned()
            .collect();

        if let Some(advisory_ids) = &capture_group.rois {
            let allowed: HashSet<u32> = advisory_ids.iter().copied().collect();
            pass_rois.retain(|roi| allowed.contains(&roi.idx));
        }

        let product_context = ProductContext {
            product_name: product_name.clone(),
            golden_root: recipe.golden_root.clone(),
            color_ranges: recipe.color_ranges.clone(),
        };

        let pass_records = execute_panel_pass(
            state,
            session_id,
            image_bytes,
            pass_rois,
            product_context,
            abort_guard.signal(),
        )
        .await?;

        let passed_count = pass_records.iter().filter(|record| record.passed).count();
        group_results.insert(
            group_key.clone(),
            GroupOutcome {
                focus: capture_group.focus,
                exposure: capture_group.exposure,
                total_rois: pass_records.len(),
                passed_rois: passed_count,
                failed_rois: pass_records.len() - passed_count,
            },
        );

        merged_records.extend(pass_records);
    }

    // Agregación y resolución ÚNICAS sobre el set fusionado.
    let mut panel = aggregate_panel(merged_records)?;
    resolve_panel_barcodes(
        &mut panel,
        &client_barcode_map,
        legacy_singleton.as_deref(),
        &state.linking,
    )
    .await;
    abort_guard.defuse();

    let report = InspectionReport {
        roi_results: panel.roi_results,
        device_summaries: panel.device_summaries,
        overall_result: panel.overall_result,
        processing_time: ignition_timestamp.elapsed().as_secs_f64(),
        timestamp: Some(Utc::now().timestamp()),
    };

    permit.complete(serde_json::to_value(&report).unwrap_or(serde_json::Value::Null));

    Ok(GroupedInspectionReport {
        session_id: session_id.to_string(),
        product_name,
        report,
        group_results,
    })
}

fn parse_session_id(raw: &str) -> Result<Uuid, InspectionApiFault> {
    Uuid::parse_str(raw)
        .map_err(|_| InspectionApiFault::InvalidRequest(format!("malformed session id '{}'", raw)))
}

/// Resuelve la fuente de imagen a bytes crudos listos para decodificar.
fn load_image_bytes(
    state: &AppState,
    session_id: Uuid,
    source: &ImageSource,
) -> Result<Vec<u8>, InspectionApiFault> {
    match source {
        ImageSource::WorkspaceFile(file_name) => {
            // El nombre es relativo al input/ del workspace; una ruta
            // con separadores escaparía del share montado.
            if file_name.contains('/') || file_name.contains("..") {
                return Err(InspectionApiFault::InvalidRequest(format!(
                    "image_filename '{}' must be a bare file name",
                    file_name
                )));
            }
            let image_path = state.sessions.input_directory(session_id).join(file_name);
            fs::read(&image_path).map_err(|read_fault| {
                InspectionApiFault::InvalidRequest(format!(
                    "image '{}' unreadable in workspace input: {}",
                    file_name, read_fault
                ))
            })
        }
        ImageSource::InlineBase64(payload) => Ok(ImageSource::decode_inline(payload)?),
    }
}

/**
 * Una pasada completa de panel bajo 'spawn_blocking': decodificación,
 * abanico paralelo y artefactos son CPU/IO puro y no deben bloquear
 * el runtime asíncrono.
 */
async fn execute_panel_pass(
    state: &AppState,
    session_id: Uuid,
    image_bytes: Vec<u8>,
    rois: Vec<NormalizedRoi>,
    product: ProductContext,
    termination_signal: Arc<AtomicBool>,
) -> Result<Vec<RoiOutcomeRecord>, InspectionApiFault> {
    let engine: Arc<InspectionEngine> = Arc::clone(&state.engine);
    let output_directory = state.sessions.output_directory(session_id);
    let client_output_prefix = format!(
        "{}/sessions/{}/output",
        state.config.client_mount_prefix.trim_end_matches('/'),
        session_id
    );

    let join_verdict = tokio::task::spawn_blocking(move || {
        let panel_image = image::load_from_memory(&image_bytes)
            .map_err(|decode_fault| InspectionApiFault::ImageDecode(decode_fault.to_string()))?
            .to_rgb8();

        let workspace = ArtifactWorkspace::new(output_directory, client_output_prefix);
        let task = PanelTask {
            panel_image: &panel_image,
            product: &product,
            workspace: &workspace,
            termination_signal: &termination_signal,
        };

        Ok::<Vec<RoiOutcomeRecord>, InspectionApiFault>(engine.dispatch_panel(&rois, &task))
    })
    .await;

    join_verdict.map_err(|join_fault| InspectionApiFault::Internal(join_fault.to_string()))?
}
