// [libs/domain/models-rs/src/tests_serialization.rs]
/**
 * =================================================================
 * APARATO: DOMAIN SERIALIZATION TEST (V9.1 - INTEGRATION LEVEL)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L2-MODELS)
 * RESPONSABILIDAD: CERTIFICACIÓN DE PARIDAD JSON DEL CONTRATO DE RESULTADO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FLATTEN AUDIT: Valida que las claves específicas por tipo viajen
 *    aplanadas junto a las comunes, sin envoltorio de variante.
 * 2. STRING KEY DISCIPLINE: Certifica que los ids de dispositivo
 *    serialicen como claves string en 'device_summaries'.
 * 3. NULL CONTRACT: 'roi_image_path' viaja como null explícito cuando
 *    no hay artefacto; 'error' se omite cuando no existe.
 * =================================================================
 */
