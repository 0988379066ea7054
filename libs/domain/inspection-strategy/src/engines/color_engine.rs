// [libs/domain/inspection-strategy/src/engines/color_engine.rs]
/*!
 * =================================================================
 * APARATO: CHROMATIC CLASSIFICATION ENGINE (V16.0 - SUMMED STRATA)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CLASIFICACIÓN POR RANGOS CROMÁTICOS NOMINADOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SUMMED STRATA: Rangos homónimos agregan sus porcentajes por
 *    suma; un tono partido en varios sub-rangos compite unificado.
 * 2. MIN THRESHOLD RULE: Con umbrales dispares dentro de un mismo
 *    nombre gana el mínimo declarado (la declaración más permisiva).
 * 3. DUAL REPORT: 'match_percentage' se satura a 100 para display;
 *    'match_percentage_raw' conserva la suma sin recorte.
 * =================================================================
 */

use argus_domain_models::color::{ColorRange, ColorSpace};
use argus_domain_models::report::RoiVerdict;
use image::{Rgb, RgbImage};

use crate::errors::EngineFault;
use crate::imaging;

/// Acumulador por color nominado, en orden de primera aparición.
struct ColorTally {
    name: String,
    total_percentage: f64,
    effective_threshold: f64,
}

/// Clasifica el recorte contra los rangos del producto.
///
/// Cada rango aporta `(pixeles en rango / total) * 100`; los rangos
/// que comparten nombre se suman. Gana el mayor total y aprueba si
/// alcanza el umbral efectivo de ese color.
pub fn classify_color(
    crop: &RgbImage,
    ranges: &[ColorRange],
) -> Result<(RoiVerdict, bool), EngineFault> {
    if ranges.is_empty() {
        return Err(EngineFault::ColorConfigMissing);
    }

    let pixel_total = (crop.width() as u64 * crop.height() as u64).max(1) as f64;
    let mut tallies: Vec<ColorTally> = Vec::new();

    for range in ranges {
        let mut pixels_in_range = 0u64;

        for Rgb(channels) in crop.pixels() {
            let converted = match range.color_space {
                ColorSpace::Rgb => {
                    [f32::from(channels[0]), f32::from(channels[1]), f32::from(channels[2])]
                }
                ColorSpace::Hsv => imaging::rgb_to_hsv(*channels),
            };
            if range.contains(converted) {
                pixels_in_range += 1;
            }
        }

        let range_percentage = (pixels_in_range as f64 / pixel_total) * 100.0;

        match tallies.iter_mut().find(|tally| tally.name == range.name) {
            Some(tally) => {
                tally.total_percentage += range_percentage;
                // Umbrales dispares dentro del nombre: gana el mínimo.
                tally.effective_threshold = tally.effective_threshold.min(range.threshold);
            }
            None => tallies.push(ColorTally {
                name: range.name.clone(),
                total_percentage: range_percentage,
                effective_threshold: range.threshold,
            }),
        }
    }

    // Ganador por argmax; empate resuelto por orden de declaración.
    let winner = tallies
        .iter()
        .fold(None::<&ColorTally>, |best, tally| match best {
            Some(current) if tally.total_percentage > current.total_percentage => Some(tally),
            None => Some(tally),
            _ => best,
        })
        .expect("tallies non-empty because ranges non-empty");

    let passed = winner.total_percentage >= winner.effective_threshold;

    let verdict = RoiVerdict::Color {
        detected_color: winner.name.clone(),
        match_percentage: winner.total_percentage.min(100.0),
        match_percentage_raw: winner.total_percentage,
        dominant_color: imaging::mean_rgb(crop),
        threshold: winner.effective_threshold,
    };

    Ok((verdict, passed))
}
