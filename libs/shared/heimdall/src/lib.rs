// [libs/shared/heimdall/src/lib.rs]
/*!
 * =================================================================
 * APARATO: HEIMDALL NEURAL OBSERVER (V12.2 - INSPECTION GRADE)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: GESTIÓN DE TELEMETRÍA, TRAZADO Y CAPTURA DE PÁNICOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PANOPTICON DUAL MODE: Logs interactivos en desarrollo, tramas
 *    JSON planas en producción para la ingesta del Dashboard.
 * 2. PHOENIX SHIELD: Hook de pánico con detección de estrato y
 *    volcado forense del payload antes de la defunción del proceso.
 * 3. ZERO ABBREVIATIONS: 'fmt' -> 'formatting_layer'.
 * =================================================================
 */

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};

/// Candado de ignición única: un segundo init es un no-op silencioso.
static OBSERVER_IGNITED: AtomicBool = AtomicBool::new(false);

/// Inicializa el sistema de trazas Heimdall con blindaje de pánicos.
///
/// # Comportamiento:
/// - Desarrollo: Logs compactos con resaltado para el operador.
/// - Producción: Estructura JSON plana para la ingesta del Panóptico.
///
/// La re-invocación es inocua: el candado atómico garantiza que el
/// suscriptor global se instale exactamente una vez por proceso.
pub fn init_tracing(service_nominal_identifier: &str) {
    if OBSERVER_IGNITED.swap(true, Ordering::SeqCst) {
        return;
    }

    // 1. CONFIGURACIÓN DEL FILTRO DINÁMICO (Sovereign Filter)
    // Priorizamos los logs del dominio y silenciamos el ruido de red.
    let environmental_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{}={level},tower_http=warn,hyper=warn,reqwest=warn",
            service_nominal_identifier,
            level = if cfg!(debug_assertions) { "debug" } else { "info" }
        )
        .into()
    });

    let is_production_strata = !cfg!(debug_assertions);

    // 2. CONSTRUCCIÓN DE LA ARQUITECTURA DE SUSCRIPCIÓN (Dual Mode)
    if is_production_strata {
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().compact().with_target(false))
            .init();
    }

    // 3. PROTOCOLO PHOENIX SHIELD (Global Panic Hook)
    // Captura colapsos en hilos secundarios (workers de inspección)
    // y los emite al Panóptico antes de que el proceso muera.
    let service_id_snapshot = service_nominal_identifier.to_string();

    panic::set_hook(Box::new(move |panic_metadata| {
        let panic_location = panic_metadata
            .location()
            .map(|location| format!("{}:{}:{}", location.file(), location.line(), location.column()))
            .unwrap_or_else(|| "UNKNOWN_STRATA_COORDINATES".to_string());

        let panic_payload_message = panic_metadata
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_metadata.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("UNDEFINED_KERNEL_COLLAPSE_PAYLOAD");

        error!(
            target: "panic_monitor",
            service = %service_id_snapshot,
            estrato = %panic_location,
            "🔥 [CRITICAL_PANIC]: Thread terminated abruptly. Analysis: {}",
            panic_payload_message
        );
    }));

    info!(
        "👁️  [HEIMDALL_ONLINE]: Observability strata levelized for [{}]. Phoenix Shield ACTIVE.",
        service_nominal_identifier
    );
}
