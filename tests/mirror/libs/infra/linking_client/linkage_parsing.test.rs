// [tests/mirror/libs/infra/linking_client/linkage_parsing.test.rs]
/**
 * =================================================================
 * APARATO: LINKAGE PARSING CERTIFICATION (V7.0 - QUOTE DISCIPLINE)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L3-LINKING)
 * RESPONSABILIDAD: REGLAS DE PARSING DEL CUERPO DE ENLACE
 *
 * Los cuatro literales del contrato: '"X"', 'X', '  "X"  ' y
 * '"null"' resuelven a X, X, X y sin-enlace respectivamente.
 * =================================================================
 */

use std::time::Duration;

use argus_infra_linking::{parse_linkage_body, LinkingClient, LinkingFault};

#[test]
fn certify_contract_literals() {
    println!("\n🧪 [PROVING_GROUNDS]: Validating linkage body contract...");

    assert_eq!(parse_linkage_body("\"X\"").unwrap(), "X");
    assert_eq!(parse_linkage_body("X").unwrap(), "X");
    assert_eq!(parse_linkage_body("  \"X\"  ").unwrap(), "X");
    assert!(matches!(parse_linkage_body("\"null\""), Err(LinkingFault::NullLinkage)));

    println!("   ✅ [SUCCESS]: Quote stripping parity confirmed.");
}

#[test]
fn certify_realistic_linkage_identifiers() {
    // Identificador canónico devuelto por el servicio de enlace real.
    assert_eq!(
        parse_linkage_body("\"1897848-0001555-118714\"").unwrap(),
        "1897848-0001555-118714"
    );
    // Variantes de null y vacío.
    assert!(parse_linkage_body("Null").is_err());
    assert!(parse_linkage_body("").is_err());
    assert!(parse_linkage_body("\"\"").is_err());
}

/**
 * CERTIFICACIÓN: La degradación nunca propaga fallos de red.
 *
 * Un endpoint muerto y un cliente sin configurar devuelven siempre
 * el barcode crudo original.
 */
#[tokio::test]
async fn certify_silent_degradation_to_raw_barcode() {
    let raw_scan = "1897848 S/N: 65514 3969 1006 V";

    let offline_client = LinkingClient::new(None, Duration::from_millis(200));
    assert_eq!(offline_client.link_or_fallback(raw_scan).await, raw_scan);

    let dead_endpoint_client = LinkingClient::new(
        Some("http://127.0.0.1:9/linking".to_string()),
        Duration::from_millis(200),
    );
    assert_eq!(dead_endpoint_client.link_or_fallback(raw_scan).await, raw_scan);
}
