// [libs/domain/inspection-strategy/src/engines/barcode_engine.rs]
/*!
 * =================================================================
 * APARATO: BARCODE READING ENGINE (V11.0 - DEADLINE SHIELDED)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: LECTURA DE CÓDIGOS CON VENTANA DURA DE TIEMPO
 * =================================================================
 */

use argus_domain_models::report::RoiVerdict;
use image::RgbImage;

use crate::capabilities::{decode_with_deadline, CapabilityRegistry, BARCODE_DECODE_DEADLINE};
use crate::errors::CapabilityFault;

/// Lee los códigos presentes en el recorte a través del decodificador
/// conectado. Regla de aprobación: al menos un valor y el primero no vacío.
pub fn read_barcode(
    capabilities: &CapabilityRegistry,
    crop: &RgbImage,
) -> Result<(RoiVerdict, bool), CapabilityFault> {
    let decoder = capabilities.barcode_decoder().ok_or(CapabilityFault::Unavailable)?;

    let values = decode_with_deadline(decoder, crop.clone(), BARCODE_DECODE_DEADLINE)?;
    let passed = values.first().map(|first| !first.is_empty()).unwrap_or(false);

    Ok((RoiVerdict::Barcode { barcode_values: values }, passed))
}
