// [apps/inspector/src/handlers/visual.rs]
/**
 * =================================================================
 * APARATO: VISUAL TERMINAL GATEWAY (V3.0 - RAW STATIC)
 * CLASIFICACIÓN: API ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: RENDERIZADO DE INTERFAZ DE ESTADO PÚBLICO
 *
 * VISION HIPER-HOLÍSTICA:
 * Landing de diagnóstico con strings crudos de Rust, sin macros de
 * templating ni dependencias de render adicionales.
 * =================================================================
 */

use axum::response::{Html, IntoResponse};

pub async fn handle_visual_landing() -> impl IntoResponse {
    // Renderizado atómico sin overhead de templating engine
    Html(r#"
    <!DOCTYPE html>
    <html lang="en">
    <head>
        <meta charset="UTF-8">
        <meta name="viewport" content="width=device-width, initial-scale=1.0">
        <title>ARGUS // INSPECTOR</title>
        <style>
            body { font-family: monospace; background-color: #060608; color: #38bdf8;
                   display: flex; align-items: center; justify-content: center; min-height: 95vh; }
            .panel { max-width: 560px; padding: 2.5rem; border: 1px solid #38bdf833;
                     border-radius: 1rem; background: #0b0b10; box-shadow: 0 0 40px #38bdf81a; }
            h1 { letter-spacing: 0.2em; text-transform: uppercase; font-size: 1.4rem; }
            .tag { color: #64748b; font-size: 0.7rem; letter-spacing: 0.4em; text-transform: uppercase; }
            .console { background: #000; border: 1px solid #ffffff0d; border-radius: 0.5rem;
                       padding: 1rem; font-size: 0.75rem; line-height: 1.6; margin-top: 1.5rem; }
            .ok { color: #34d399; }
            .warn { color: #f59e0b; }
        </style>
    </head>
    <body>
        <div class="panel">
            <h1>Argus_L3</h1>
            <p class="tag">Visual_Inspection_Service // V2</p>
            <div class="console">
                <p>&gt; systemctl status argus-inspector</p>
                <p class="ok">&#9679; [ENGINE] ROI dispatch pool: READY</p>
                <p class="ok">&#9679; [GOLDEN] Promotion lock: ARMED</p>
                <p class="warn">! [API] Use /session/create to begin an inspection session.</p>
            </div>
        </div>
    </body>
    </html>
    "#)
}
