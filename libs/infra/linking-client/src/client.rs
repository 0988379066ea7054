// [libs/infra/linking-client/src/client.rs]
/*!
 * =================================================================
 * APARATO: BARCODE LINKING UPLINK (V15.0 - SILENT DEGRADATION)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: NEGOCIACIÓN CON EL SERVICIO EXTERNO DE ENLACE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HARD CEILING: Cada llamada corre bajo su propia ventana de 3 s
 *    (configurable); el enlace jamás bloquea la resolución.
 * 2. SILENT DEGRADATION: Timeout, no-200, cuerpo nulo o vacío se
 *    degradan al barcode crudo con rastro WARN; nunca se propagan.
 * 3. QUOTE STRIPPING: El servicio responde un string literal JSON;
 *    se pela exactamente un par de comillas envolventes y el literal
 *    'null' (case-insensitive) cuenta como sin-enlace.
 * =================================================================
 */

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::errors::LinkingFault;

/// Ventana dura por defecto del servicio de enlace.
pub const DEFAULT_LINKING_TIMEOUT: Duration = Duration::from_secs(3);

/// Cliente del servicio externo que normaliza un barcode crudo a un
/// identificador canónico de dispositivo. El enlace es best-effort e
/// idempotente; el servicio solo lee.
pub struct LinkingClient {
    network_session_client: Client,
    linking_endpoint: Option<String>,
    request_timeout: Duration,
}

impl LinkingClient {
    /// `endpoint: None` deshabilita el enlace: toda resolución cae al
    /// barcode crudo sin tocar la red.
    pub fn new(endpoint: Option<String>, request_timeout: Duration) -> Self {
        Self {
            network_session_client: Client::builder()
                .user_agent("Argus-Inspector-Uplink/V2.1")
                .timeout(request_timeout)
                .build()
                .expect("FATAL: Linking client initialization failed."),
            linking_endpoint: endpoint.map(|url| url.trim_end_matches('/').to_string()),
            request_timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.linking_endpoint.is_some()
    }

    /**
     * Intenta el enlace del barcode crudo.
     *
     * # Errors:
     * Todos los fallos son degradables: el llamador debe caer al
     * barcode crudo (use `link_or_fallback` salvo diagnóstico).
     */
    pub async fn link_device_identifier(&self, raw_barcode: &str) -> Result<String, LinkingFault> {
        let endpoint = self.linking_endpoint.as_ref().ok_or(LinkingFault::Unconfigured)?;

        // El cuerpo es el barcode como string literal JSON ("...").
        let network_response = self
            .network_session_client
            .post(endpoint)
            .json(&raw_barcode)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if network_response.status() != StatusCode::OK {
            return Err(LinkingFault::ServerRejection(network_response.status().as_u16()));
        }

        let response_body = network_response.text().await?;
        parse_linkage_body(&response_body)
    }

    /**
     * Enlace con degradación silenciosa: cualquier fallo retorna el
     * barcode crudo original con rastro WARN.
     */
    pub async fn link_or_fallback(&self, raw_barcode: &str) -> String {
        match self.link_device_identifier(raw_barcode).await {
            Ok(linked_identifier) => {
                debug!("🔗 [LINKED]: '{}' -> '{}'", raw_barcode, linked_identifier);
                linked_identifier
            }
            Err(LinkingFault::Unconfigured) => raw_barcode.to_string(),
            Err(linking_fault) => {
                warn!(
                    "🔗 [LINK_FALLBACK]: Keeping raw barcode '{}': {}",
                    raw_barcode, linking_fault
                );
                raw_barcode.to_string()
            }
        }
    }
}

/**
 * Parseo del cuerpo de respuesta del servicio de enlace.
 *
 * Reglas: trim de espacios; si el cuerpo empieza y termina con '"'
 * se pela exactamente un par; el literal 'null' (sin distinguir
 * mayúsculas) y el vacío cuentan como sin-enlace.
 */
pub fn parse_linkage_body(body: &str) -> Result<String, LinkingFault> {
    let trimmed = body.trim();

    let unquoted = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    if unquoted.is_empty() {
        return Err(LinkingFault::EmptyBody);
    }
    if unquoted.eq_ignore_ascii_case("null") {
        return Err(LinkingFault::NullLinkage);
    }

    Ok(unquoted.to_string())
}
