// [tests/mirror/apps/inspector/linking_resolution.test.rs]
/**
 * =================================================================
 * APARATO: LINKING RESOLUTION CERTIFICATION (V10.0 - WIRE LEVEL)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L1-APP)
 * RESPONSABILIDAD: RESOLUCIÓN DE BARCODES CONTRA UN ENLACE REAL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. WIRE LEVEL: Un stub HTTP real (TcpListener de Tokio) certifica
 *    la transformación del barcode crudo al identificador enlazado.
 * 2. NULL FALLBACK: El literal 'null' del servicio degrada al valor
 *    crudo sin contaminar los registros ROI.
 * =================================================================
 */

use std::collections::BTreeMap;
use std::time::Duration;

use argus_domain_inspection::aggregate_panel;
use argus_domain_models::report::{RoiOutcomeRecord, RoiVerdict};
use argus_domain_models::roi::RoiCoordinates;
use argus_infra_linking::LinkingClient;
use argus_inspector::services::barcode_resolver::resolve_panel_barcodes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Stub HTTP de un solo uso: responde 200 con el cuerpo declarado.
async fn spawn_linking_stub(response_body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("stub binds");
    let stub_address = format!("http://{}/linking", listener.local_addr().unwrap());

    tokio::spawn(async move {
        // Atiende las conexiones que lleguen durante la certificación.
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                // Drena la petición (cabeceras + cuerpo JSON corto).
                let mut request_buffer = [0u8; 4096];
                let mut drained: Vec<u8> = Vec::new();
                loop {
                    match stream.read(&mut request_buffer).await {
                        Ok(0) => break,
                        Ok(read_count) => {
                            drained.extend_from_slice(&request_buffer[..read_count]);
                            // Cuerpo presente tras el separador de cabeceras.
                            if let Some(header_end) =
                                drained.windows(4).position(|window| window == b"\r\n\r\n")
                            {
                                let headers = String::from_utf8_lossy(&drained[..header_end]);
                                let declared_length: usize = headers
                                    .lines()
                                    .find_map(|line| {
                                        line.to_ascii_lowercase()
                                            .strip_prefix("content-length:")
                                            .map(|value| value.trim().parse().unwrap_or(0))
                                    })
                                    .unwrap_or(0);
                                if drained.len() >= header_end + 4 + declared_length {
                                    break;
                                }
                            }
                        }
                        Err(_) => break,
                    }
                }

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response_body.len(),
                    response_body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    stub_address
}

fn primary_barcode_panel(raw_value: &str) -> Vec<RoiOutcomeRecord> {
    vec![RoiOutcomeRecord {
        roi_id: 1,
        device_id: 1,
        roi_type_name: "barcode".into(),
        passed: true,
        coordinates: RoiCoordinates { x1: 0, y1: 0, x2: 50, y2: 20 },
        roi_image_path: None,
        golden_image_path: None,
        error: None,
        verdict: RoiVerdict::Barcode { barcode_values: vec![raw_value.to_string()] },
        is_primary_barcode: true,
    }]
}

const RAW_SCAN: &str = "1897848 S/N: 65514 3969 1006 V";

/**
 * CERTIFICACIÓN: El servicio enlaza el crudo al identificador canónico.
 * El valor crudo permanece intacto en los registros ROI.
 */
#[tokio::test]
async fn certify_linked_identifier_replaces_raw_in_summary_only() {
    println!("\n🧪 [PROVING_GROUNDS]: Validating wire-level linkage...");

    let stub_address = spawn_linking_stub("\"1897848-0001555-118714\"").await;
    let linking = LinkingClient::new(Some(stub_address), Duration::from_secs(3));

    let mut panel = aggregate_panel(primary_barcode_panel(RAW_SCAN)).unwrap();
    resolve_panel_barcodes(&mut panel, &BTreeMap::new(), None, &linking).await;

    assert_eq!(panel.device_summaries["1"].barcode, "1897848-0001555-118714");

    // El crudo sobrevive en el registro ROI.
    match &panel.roi_results[0].verdict {
        RoiVerdict::Barcode { barcode_values } => assert_eq!(barcode_values[0], RAW_SCAN),
        other => panic!("unexpected verdict: {:?}", other),
    }

    println!("   ✅ [SUCCESS]: Linked transformation confirmed.");
}

/**
 * CERTIFICACIÓN: El literal 'null' degrada al barcode crudo.
 */
#[tokio::test]
async fn certify_null_linkage_falls_back_to_raw() {
    let stub_address = spawn_linking_stub("\"null\"").await;
    let linking = LinkingClient::new(Some(stub_address), Duration::from_secs(3));

    let mut panel = aggregate_panel(primary_barcode_panel(RAW_SCAN)).unwrap();
    resolve_panel_barcodes(&mut panel, &BTreeMap::new(), None, &linking).await;

    assert_eq!(panel.device_summaries["1"].barcode, RAW_SCAN);
}

/**
 * CERTIFICACIÓN: Sin fuente alguna, el resumen conserva "N/A" y el
 * servicio de enlace jamás se invoca.
 */
#[tokio::test]
async fn certify_no_source_keeps_not_available() {
    let linking = LinkingClient::new(None, Duration::from_secs(3));

    let mut panel = aggregate_panel(Vec::new()).unwrap();
    resolve_panel_barcodes(&mut panel, &BTreeMap::new(), None, &linking).await;
    assert!(panel.device_summaries.is_empty());

    // Con un dispositivo sin ROIs barcode: "N/A" intacto.
    let color_only = vec![RoiOutcomeRecord {
        roi_id: 2,
        device_id: 3,
        roi_type_name: "color".into(),
        passed: true,
        coordinates: RoiCoordinates { x1: 0, y1: 0, x2: 10, y2: 10 },
        roi_image_path: None,
        golden_image_path: None,
        error: None,
        verdict: RoiVerdict::Color {
            detected_color: "green".into(),
            match_percentage: 88.0,
            match_percentage_raw: 88.0,
            dominant_color: [10, 180, 20],
            threshold: 60.0,
        },
        is_primary_barcode: false,
    }];

    let mut panel = aggregate_panel(color_only).unwrap();
    resolve_panel_barcodes(&mut panel, &BTreeMap::new(), None, &linking).await;
    assert_eq!(panel.device_summaries["3"].barcode, "N/A");
}
