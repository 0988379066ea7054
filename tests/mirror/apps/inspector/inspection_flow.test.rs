// [tests/mirror/apps/inspector/inspection_flow.test.rs]
/**
 * =================================================================
 * APARATO: INSPECTION FLOW CERTIFICATION (V14.0 - FULL CIRCUIT)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L1-APP)
 * RESPONSABILIDAD: CIRCUITO COMPLETO SESIÓN -> COORDINADOR -> VEREDICTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FULL CIRCUIT: Receta real en disco, sesión con workspace, imagen
 *    inline base64 y veredicto agregado con rutas proyectadas.
 * 2. CLAMP RESILIENCE: Una ROI fuera de lienzo reprueba su panel sin
 *    abortar a las vecinas.
 * 3. CLIENT MAP TIER: Sin ROIs barcode, el mapa del cliente puebla el
 *    resumen del dispositivo (enlace deshabilitado -> valor crudo).
 * =================================================================
 */

use std::io::Cursor;
use std::time::Duration;

use argus_domain_inspection::ProductContext;
use argus_domain_models::request::{DeviceBarcodeField, InspectPayload};
use argus_inspector::config::InspectorConfig;
use argus_inspector::services::coordinator;
use argus_inspector::state::AppState;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use image::{Rgb, RgbImage};
use tempfile::TempDir;

struct CircuitFixture {
    _config_root: TempDir,
    _shared_root: TempDir,
    state: AppState,
}

fn circuit_with_recipe(rois_json: &str, colors_json: Option<&str>) -> CircuitFixture {
    let config_root = TempDir::new().unwrap();
    let shared_root = TempDir::new().unwrap();

    let product_directory = config_root.path().join("products").join("P1");
    std::fs::create_dir_all(&product_directory).unwrap();
    std::fs::write(product_directory.join("rois_config_P1.json"), rois_json).unwrap();
    if let Some(colors) = colors_json {
        std::fs::write(product_directory.join("colors_config_P1.json"), colors).unwrap();
    }

    let configuration = InspectorConfig {
        config_root: config_root.path().to_path_buf(),
        shared_root: shared_root.path().to_path_buf(),
        client_mount_prefix: "/mnt/inspection".to_string(),
        linking_endpoint: None,
        linking_timeout: Duration::from_millis(500),
        session_idle_timeout: chrono::Duration::hours(1),
        listening_port: 0,
    };

    CircuitFixture {
        _config_root: config_root,
        _shared_root: shared_root,
        state: AppState::new(configuration),
    }
}

fn inline_jpeg(panel: &RgbImage) -> String {
    let mut encoded_bytes: Vec<u8> = Vec::new();
    panel
        .write_to(&mut Cursor::new(&mut encoded_bytes), image::ImageOutputFormat::Jpeg(95))
        .expect("panel must encode");
    BASE64_STANDARD.encode(encoded_bytes)
}

fn payload_with_image(panel: &RgbImage) -> InspectPayload {
    InspectPayload {
        image_filename: None,
        image: Some(inline_jpeg(panel)),
        device_barcodes: None,
        device_barcode: None,
    }
}

/**
 * CERTIFICACIÓN: ROI Compare entrenada aprueba de punta a punta.
 */
#[tokio::test]
async fn certify_full_circuit_compare_match() {
    println!("\n🧪 [PROVING_GROUNDS]: Validating full inspection circuit...");

    let fixture = circuit_with_recipe(
        r#"[[1, 2, [10, 10, 110, 110], 305, 3000, 0.9, "generic", 0, 1]]"#,
        None,
    );

    // Entrenamiento de la referencia dorada vía el almacén del motor.
    let recipe = fixture.state.catalog.load_recipe("P1").unwrap();
    let product_context = ProductContext {
        product_name: recipe.product_name.clone(),
        golden_root: recipe.golden_root.clone(),
        color_ranges: Vec::new(),
    };
    fixture
        .state
        .engine
        .golden_store(&product_context, 1)
        .register_reference(&RgbImage::from_pixel(100, 100, Rgb([170, 90, 40])))
        .unwrap();

    let session_id = fixture.state.sessions.create("P1").unwrap();
    let panel = RgbImage::from_pixel(200, 200, Rgb([170, 90, 40]));

    let report = coordinator::run_single_inspection(
        &fixture.state,
        &session_id.to_string(),
        payload_with_image(&panel),
    )
    .await
    .expect("inspection must run end to end");

    assert!(report.overall_result.passed);
    assert_eq!(report.overall_result.total_rois, 1);
    assert!(report.processing_time > 0.0);
    assert!(report.timestamp.is_some());

    let record = &report.roi_results[0];
    assert_eq!(record.roi_type_name, "compare");
    let expected_prefix = format!("/mnt/inspection/sessions/{}/output/", session_id);
    assert_eq!(
        record.roi_image_path.as_deref(),
        Some(format!("{}roi_1.jpg", expected_prefix).as_str())
    );
    assert_eq!(
        record.golden_image_path.as_deref(),
        Some(format!("{}golden_1.jpg", expected_prefix).as_str())
    );

    // Los artefactos físicos viven bajo el workspace, no bajo el prefijo.
    let output_directory = fixture.state.sessions.output_directory(session_id);
    assert!(output_directory.join("roi_1.jpg").is_file());
    assert!(output_directory.join("golden_1.jpg").is_file());

    // La sesión quedó sellada y desbloqueada.
    let status = fixture.state.sessions.status(session_id).unwrap();
    assert_eq!(status.inspection_count, 1);
    assert!(!status.inspection_in_progress);

    println!("   ✅ [SUCCESS]: Full circuit verdict confirmed.");
}

/**
 * CERTIFICACIÓN: ROI fuera de lienzo reprueba el panel sin abortar.
 */
#[tokio::test]
async fn certify_full_circuit_out_of_bounds_degradation() {
    let fixture = circuit_with_recipe(
        r#"[
            [1, 4, [10, 10, 60, 60]],
            [2, 1, [350, 50, 500, 150]]
        ]"#,
        Some(r#"[{"name":"steel","lower":[20,20,20],"upper":[90,90,90],"color_space":"RGB","threshold":50.0}]"#),
    );

    let session_id = fixture.state.sessions.create("P1").unwrap();
    let panel = RgbImage::from_pixel(400, 300, Rgb([40, 40, 40]));

    let report = coordinator::run_single_inspection(
        &fixture.state,
        &session_id.to_string(),
        payload_with_image(&panel),
    )
    .await
    .unwrap();

    assert!(!report.overall_result.passed);
    assert_eq!(report.overall_result.total_rois, 2);
    assert_eq!(report.overall_result.failed_rois, 1);

    assert!(report.roi_results[0].passed, "in-bounds color ROI proceeds");
    assert_eq!(report.roi_results[1].error.as_deref(), Some("out_of_bounds"));
    assert_eq!(report.roi_results[1].roi_image_path, None);
}

/**
 * CERTIFICACIÓN: El mapa del cliente puebla el barcode del dispositivo
 * cuando no hay ROIs barcode (enlace deshabilitado -> crudo).
 */
#[tokio::test]
async fn certify_client_map_populates_device_barcode() {
    let fixture = circuit_with_recipe(
        r#"[[1, 4, [0, 0, 40, 40]]]"#,
        Some(r#"[{"name":"steel","lower":[20,20,20],"upper":[90,90,90],"color_space":"RGB","threshold":50.0}]"#),
    );

    let session_id = fixture.state.sessions.create("P1").unwrap();
    let panel = RgbImage::from_pixel(80, 80, Rgb([40, 40, 40]));

    let mut payload = payload_with_image(&panel);
    payload.device_barcodes = Some(
        serde_json::from_value::<DeviceBarcodeField>(serde_json::json!({ "1": "CLIENT-MAP-77" }))
            .unwrap(),
    );

    let report = coordinator::run_single_inspection(
        &fixture.state,
        &session_id.to_string(),
        payload,
    )
    .await
    .unwrap();

    assert_eq!(report.device_summaries["1"].barcode, "CLIENT-MAP-77");
}

/**
 * CERTIFICACIÓN: Petición sin fuente de imagen es un 400 semántico y
 * la sesión queda liberada para el siguiente intento.
 */
#[tokio::test]
async fn certify_missing_image_source_releases_the_session() {
    let fixture = circuit_with_recipe(r#"[[1, 4, [0, 0, 40, 40]]]"#, None);
    let session_id = fixture.state.sessions.create("P1").unwrap();

    let empty_payload = InspectPayload {
        image_filename: None,
        image: None,
        device_barcodes: None,
        device_barcode: None,
    };

    let fault = coordinator::run_single_inspection(
        &fixture.state,
        &session_id.to_string(),
        empty_payload,
    )
    .await
    .expect_err("missing image source must fail");
    assert!(fault.to_string().contains("MISSING_IMAGE_SOURCE"));

    // El permiso se liberó en la ruta de error.
    assert!(!fixture.state.sessions.status(session_id).unwrap().inspection_in_progress);
}
