// [tests/mirror/libs/domain/inspection_strategy/panel_pipeline.test.rs]
/**
 * =================================================================
 * APARATO: PANEL PIPELINE CERTIFICATION (V15.0 - END TO END)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L2-INSPECTION)
 * RESPONSABILIDAD: ESCENARIOS DE PANEL DE EXTREMO A EXTREMO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. COMPARE HAPPY PATH: Un ROI Compare entrenado aprueba con
 *    artefactos (recorte + golden redimensionado) en disco.
 * 2. CLAMP DISCIPLINE: Un ROI fuera de lienzo reprueba sin abortar a
 *    sus vecinos; el veredicto global refleja la falla.
 * 3. GROUP EQUIVALENCE: Filtrar por grupo de captura y fusionar
 *    equivale a correr cada grupo por separado y concatenar.
 * =================================================================
 */

use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use argus_domain_inspection::{
    aggregate_panel, ArtifactWorkspace, CapabilityRegistry, InspectionEngine, PanelTask,
    ProductContext,
};
use argus_domain_models::normalizer::{normalize, validate_set, RawRoi};
use argus_domain_models::report::{RoiOutcomeRecord, RoiVerdict};
use argus_domain_models::roi::NormalizedRoi;
use image::{Rgb, RgbImage};
use serde_json::json;
use tempfile::TempDir;

fn roi_from(values: Vec<serde_json::Value>) -> NormalizedRoi {
    normalize(&RawRoi::Row(values)).expect("certification ROI is legal")
}

fn flat(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

struct PanelFixture {
    _workspace_root: TempDir,
    _golden_root: TempDir,
    workspace: ArtifactWorkspace,
    product: ProductContext,
    engine: InspectionEngine,
}

fn fixture_with_colors(color_ranges: Vec<argus_domain_models::color::ColorRange>) -> PanelFixture {
    let workspace_root = TempDir::new().unwrap();
    let golden_root = TempDir::new().unwrap();
    let workspace = ArtifactWorkspace::new(
        workspace_root.path().to_path_buf(),
        "/mnt/argus/sessions/cert/output".to_string(),
    );
    let product = ProductContext {
        product_name: "P1".into(),
        golden_root: golden_root.path().to_path_buf(),
        color_ranges,
    };
    let engine = InspectionEngine::new(Arc::new(CapabilityRegistry::standard()));
    PanelFixture {
        _workspace_root: workspace_root,
        _golden_root: golden_root,
        workspace,
        product,
        engine,
    }
}

fn dispatch(fixture: &PanelFixture, rois: &[NormalizedRoi], panel: &RgbImage) -> Vec<RoiOutcomeRecord> {
    let termination_signal = AtomicBool::new(false);
    fixture.engine.dispatch_panel(
        rois,
        &PanelTask {
            panel_image: panel,
            product: &fixture.product,
            workspace: &fixture.workspace,
            termination_signal: &termination_signal,
        },
    )
}

/**
 * CERTIFICACIÓN: ROI Compare único con referencia entrenada (match).
 */
#[test]
fn certify_single_compare_roi_match() {
    println!("\n🧪 [PROVING_GROUNDS]: Validating compare happy path...");

    let fixture = fixture_with_colors(Vec::new());
    let roi = roi_from(vec![
        json!(1),
        json!(2),
        json!([10, 10, 110, 110]),
        json!(305),
        json!(3000),
        json!(0.9),
        json!("generic"),
        json!(0),
        json!(1),
    ]);
    validate_set(std::slice::from_ref(&roi)).unwrap();

    let panel = flat(200, 200, [170, 90, 40]);
    // Referencia entrenada con el mismo contenido del recorte.
    fixture
        .engine
        .golden_store(&fixture.product, roi.idx)
        .register_reference(&flat(100, 100, [170, 90, 40]))
        .unwrap();

    let records = dispatch(&fixture, std::slice::from_ref(&roi), &panel);
    let panel_summary = aggregate_panel(records).unwrap();

    let record = &panel_summary.roi_results[0];
    assert_eq!(record.roi_id, 1);
    assert_eq!(record.device_id, 1);
    assert_eq!(record.roi_type_name, "compare");
    assert!(record.passed);
    assert_eq!(record.coordinates.as_array(), [10, 10, 110, 110]);
    assert_eq!(
        record.roi_image_path.as_deref(),
        Some("/mnt/argus/sessions/cert/output/roi_1.jpg")
    );
    assert_eq!(
        record.golden_image_path.as_deref(),
        Some("/mnt/argus/sessions/cert/output/golden_1.jpg")
    );
    match &record.verdict {
        RoiVerdict::Compare { match_result, ai_similarity, threshold } => {
            assert_eq!(match_result, "Match");
            assert!(*ai_similarity >= 0.9, "similarity {} must clear 0.9", ai_similarity);
            assert_eq!(*threshold, 0.9);
        }
        other => panic!("unexpected verdict: {:?}", other),
    }

    let device_summary = &panel_summary.device_summaries["1"];
    assert!(device_summary.device_passed);
    assert_eq!(device_summary.barcode, "N/A");
    assert!(panel_summary.overall_result.passed);
    assert_eq!(panel_summary.overall_result.total_rois, 1);

    // Artefactos físicos presentes con la forma exacta puntuada.
    let crop_artifact =
        image::open(fixture.workspace.server_path("roi_1.jpg")).unwrap().to_rgb8();
    let golden_artifact =
        image::open(fixture.workspace.server_path("golden_1.jpg")).unwrap().to_rgb8();
    assert_eq!((crop_artifact.width(), crop_artifact.height()), (100, 100));
    assert_eq!((golden_artifact.width(), golden_artifact.height()), (100, 100));

    println!("   ✅ [SUCCESS]: Compare verdict + artifacts confirmed.");
}

/**
 * CERTIFICACIÓN: ROI fuera de lienzo reprueba sin abortar vecinos.
 */
#[test]
fn certify_out_of_bounds_roi_does_not_abort_the_panel() {
    let ranges = vec![argus_domain_models::color::ColorRange {
        name: "steel".into(),
        lower: [20.0, 20.0, 20.0],
        upper: [90.0, 90.0, 90.0],
        color_space: argus_domain_models::color::ColorSpace::Rgb,
        threshold: 50.0,
    }];
    let fixture = fixture_with_colors(ranges);

    let panel = flat(400, 300, [40, 40, 40]);
    let rois = vec![
        roi_from(vec![json!(1), json!(4), json!([10, 10, 60, 60])]),
        roi_from(vec![json!(2), json!(1), json!([350, 50, 500, 150])]),
    ];

    let records = dispatch(&fixture, &rois, &panel);
    let panel_summary = aggregate_panel(records).unwrap();

    let color_record = &panel_summary.roi_results[0];
    assert!(color_record.passed, "in-bounds neighbor must proceed");

    let clamped_record = &panel_summary.roi_results[1];
    assert!(!clamped_record.passed);
    assert_eq!(clamped_record.error.as_deref(), Some("out_of_bounds"));

    assert!(!panel_summary.overall_result.passed);
    assert_eq!(panel_summary.overall_result.failed_rois, 1);
}

/**
 * CERTIFICACIÓN: Equivalencia de agrupación (filtro por captura).
 *
 * Inspeccionar {G1, G2} con sets disjuntos produce los mismos
 * registros que correr dos inspecciones separadas y concatenar.
 */
#[test]
fn certify_grouped_filtering_equivalence() {
    let ranges = vec![
        argus_domain_models::color::ColorRange {
            name: "red".into(),
            lower: [150.0, 0.0, 0.0],
            upper: [255.0, 90.0, 90.0],
            color_space: argus_domain_models::color::ColorSpace::Rgb,
            threshold: 60.0,
        },
        argus_domain_models::color::ColorRange {
            name: "blue".into(),
            lower: [0.0, 0.0, 150.0],
            upper: [90.0, 90.0, 255.0],
            color_space: argus_domain_models::color::ColorSpace::Rgb,
            threshold: 60.0,
        },
    ];
    let fixture = fixture_with_colors(ranges);

    // ROI A: exposición 700 sobre panel rojo. ROI B: 3000 sobre azul.
    let roi_a = roi_from(vec![json!(1), json!(4), json!([0, 0, 40, 40]), json!(305), json!(700)]);
    let roi_b = roi_from(vec![json!(2), json!(4), json!([0, 0, 40, 40]), json!(305), json!(3000)]);
    let recipe = vec![roi_a.clone(), roi_b.clone()];

    let red_panel = flat(80, 80, [200, 30, 30]);
    let blue_panel = flat(80, 80, [30, 30, 200]);

    // Corrida agrupada: filtro por (focus, exposure) y fusión única.
    let mut merged_records: Vec<RoiOutcomeRecord> = Vec::new();
    let capture_groups: BTreeMap<&str, (u32, u32, &RgbImage)> = BTreeMap::from([
        ("305,700", (305u32, 700u32, &red_panel)),
        ("305,3000", (305u32, 3000u32, &blue_panel)),
    ]);

    for (_, (focus, exposure, group_panel)) in &capture_groups {
        let group_rois: Vec<NormalizedRoi> = recipe
            .iter()
            .filter(|roi| roi.matches_capture_group(*focus, *exposure))
            .cloned()
            .collect();
        assert_eq!(group_rois.len(), 1, "disjoint capture groups");
        merged_records.extend(dispatch(&fixture, &group_rois, group_panel));
    }

    let grouped_summary = aggregate_panel(merged_records).unwrap();

    // Corridas individuales equivalentes.
    let mut concatenated = dispatch(&fixture, std::slice::from_ref(&roi_a), &red_panel);
    concatenated.extend(dispatch(&fixture, std::slice::from_ref(&roi_b), &blue_panel));
    let reference_summary = aggregate_panel(concatenated).unwrap();

    // Cada ROI aparece exactamente una vez y contra su propia imagen.
    assert_eq!(grouped_summary.roi_results.len(), 2);
    for (grouped_record, reference_record) in grouped_summary
        .roi_results
        .iter()
        .zip(reference_summary.roi_results.iter())
    {
        assert_eq!(grouped_record.roi_id, reference_record.roi_id);
        assert_eq!(grouped_record.passed, reference_record.passed);
        match (&grouped_record.verdict, &reference_record.verdict) {
            (
                RoiVerdict::Color { detected_color: grouped_color, .. },
                RoiVerdict::Color { detected_color: reference_color, .. },
            ) => assert_eq!(grouped_color, reference_color),
            other => panic!("unexpected verdict pair: {:?}", other),
        }
    }

    // ROI A vio el panel rojo; ROI B el azul.
    match &grouped_summary.roi_results[0].verdict {
        RoiVerdict::Color { detected_color, .. } => assert_eq!(detected_color, "red"),
        other => panic!("unexpected verdict: {:?}", other),
    }
    match &grouped_summary.roi_results[1].verdict {
        RoiVerdict::Color { detected_color, .. } => assert_eq!(detected_color, "blue"),
        other => panic!("unexpected verdict: {:?}", other),
    }

    assert_eq!(
        grouped_summary.overall_result,
        reference_summary.overall_result,
        "grouped aggregation equals concatenated single passes"
    );
}
