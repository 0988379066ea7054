// [tests/mirror/libs/domain/models_rs/roi_normalization.test.rs]
/**
 * =================================================================
 * APARATO: ROI NORMALIZATION CERTIFICATION (V10.0 - WIDTH LADDER)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L2-MODELS)
 * RESPONSABILIDAD: ESCALERA DE ANCHURAS LEGADAS 3..11
 * =================================================================
 */

use argus_domain_models::normalizer::{normalize, validate_set, RawRoi};
use argus_domain_models::roi::{FeatureMethod, NormalizedRoi, RoiKind, Rotation};
use serde_json::json;

fn normalize_row(values: Vec<serde_json::Value>) -> NormalizedRoi {
    normalize(&RawRoi::Row(values)).expect("ladder row is legal")
}

/**
 * CERTIFICACIÓN: Cada peldaño de la escalera 3..11 produce la misma
 * ROI canónica que la fila completa, con defaults en la cola.
 */
#[test]
fn certify_legacy_width_ladder() {
    println!("\n🧪 [PROVING_GROUNDS]: Validating width ladder strata...");

    let full_row = vec![
        json!(9),
        json!(3),
        json!([4, 4, 64, 24]),
        json!(305),
        json!(3000),
        serde_json::Value::Null,
        json!("ocr"),
        json!(0),
        json!(1),
        serde_json::Value::Null,
        serde_json::Value::Null,
    ];

    let canonical = normalize_row(full_row.clone());

    for width in 3..=11 {
        let truncated: Vec<serde_json::Value> = full_row.iter().take(width).cloned().collect();
        let upgraded = normalize_row(truncated);
        assert_eq!(
            upgraded, canonical,
            "width {} must upgrade to the canonical eleven-field form",
            width
        );
    }

    println!("   ✅ [SUCCESS]: Ladder parity confirmed.");
}

#[test]
fn certify_type_defaults_across_kinds() {
    // Barcode: método barcode, sin umbral.
    let barcode = normalize_row(vec![json!(1), json!(1), json!([0, 0, 10, 10])]);
    assert_eq!(barcode.feature_method, FeatureMethod::Barcode);
    assert_eq!(barcode.ai_threshold, None);

    // Compare: umbral 0.9 y deep_cnn por defecto.
    let compare = normalize_row(vec![json!(2), json!(2), json!([0, 0, 10, 10])]);
    assert_eq!(compare.ai_threshold, Some(0.9));
    assert_eq!(compare.feature_method, FeatureMethod::DeepCnn);

    // OCR: método ocr; Color: sin método.
    let ocr = normalize_row(vec![json!(3), json!(3), json!([0, 0, 10, 10])]);
    assert_eq!(ocr.feature_method, FeatureMethod::Ocr);
    let color = normalize_row(vec![json!(4), json!(4), json!([0, 0, 10, 10])]);
    assert_eq!(color.feature_method, FeatureMethod::Disabled);

    // Defaults compartidos de grupo de captura.
    for roi in [&barcode, &compare, &ocr, &color] {
        assert_eq!((roi.focus, roi.exposure), (305, 3000));
        assert_eq!(roi.rotation, Rotation::R0);
        assert_eq!(roi.device_location, 1);
    }
}

#[test]
fn certify_object_form_and_set_rules() {
    let record = match json!({
        "idx": 21,
        "type": 1,
        "coords": [0, 0, 30, 12],
        "device_location": 2,
        "is_device_barcode": true
    }) {
        serde_json::Value::Object(map) => RawRoi::Record(map),
        _ => unreachable!(),
    };
    let primary = normalize(&record).expect("object form is legal");
    assert_eq!(primary.kind, RoiKind::Barcode);
    assert!(primary.is_primary_barcode());

    // Un segundo primario en el mismo dispositivo viola la regla.
    let mut rival = primary.clone();
    rival.idx = 22;
    assert!(validate_set(&[primary.clone(), rival]).is_err());

    // En dispositivos distintos la regla no aplica.
    let mut neighbor = primary.clone();
    neighbor.idx = 23;
    neighbor.device_location = 3;
    assert!(validate_set(&[primary, neighbor]).is_ok());
}
