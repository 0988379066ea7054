// [libs/domain/inspection-strategy/src/imaging.rs]
/*!
 * =================================================================
 * APARATO: IMAGING PRIMITIVES (V15.0 - RGB8 SUBSTRATE)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: RECORTE, ROTACIÓN, NORMALIZACIÓN Y MÉTRICAS DE PÍXEL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE COLOR ORDER: Todo el motor opera sobre RGB8; el panel se
 *    decodifica una sola vez y ningún backend ve otro orden de canal.
 * 2. EXPAND ROTATION: Las rotaciones de 90/270 intercambian las
 *    dimensiones del lienzo; nunca se recorta contenido.
 * 3. HSV CONVENTION: H en [0,180), S y V en [0,255] (la convención
 *    con la que se autoran las recetas cromáticas industriales).
 * =================================================================
 */

use argus_domain_models::roi::{RoiCoordinates, Rotation};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Luminancia objetivo de la normalización de iluminación.
const TARGET_MEAN_LUMA: f64 = 128.0;

/// Recorta la región declarada; `None` si el rectángulo excede el lienzo.
pub fn crop_region(panel: &RgbImage, coords: &RoiCoordinates) -> Option<RgbImage> {
    if !coords.fits_within(panel.width(), panel.height()) {
        return None;
    }
    Some(
        imageops::crop_imm(panel, coords.x1, coords.y1, coords.width(), coords.height())
            .to_image(),
    )
}

/// Rotación en pasos de 90 grados con expansión del lienzo.
pub fn apply_rotation(source: &RgbImage, rotation: Rotation) -> RgbImage {
    match rotation {
        Rotation::R0 => source.clone(),
        Rotation::R90 => imageops::rotate90(source),
        Rotation::R180 => imageops::rotate180(source),
        Rotation::R270 => imageops::rotate270(source),
    }
}

/// Redimensionado bilineal al tamaño exacto del recorte bajo chequeo.
pub fn resize_to(source: &RgbImage, width: u32, height: u32) -> RgbImage {
    if source.width() == width && source.height() == height {
        return source.clone();
    }
    imageops::resize(source, width, height, FilterType::Triangle)
}

/// Reescala linealmente la luminancia media hacia 128, por canal y
/// con saturación. Neutraliza derivas de exposición entre el recorte
/// y la referencia dorada antes de puntuar.
pub fn normalize_illumination(source: &RgbImage) -> RgbImage {
    let pixel_count = (source.width() as u64 * source.height() as u64).max(1);

    let luma_sum: f64 = source
        .pixels()
        .map(|Rgb([r, g, b])| {
            0.299 * f64::from(*r) + 0.587 * f64::from(*g) + 0.114 * f64::from(*b)
        })
        .sum();

    let mean_luma = luma_sum / pixel_count as f64;
    if mean_luma <= f64::EPSILON {
        return source.clone();
    }

    let gain = TARGET_MEAN_LUMA / mean_luma;
    let mut normalized = source.clone();
    for Rgb(channels) in normalized.pixels_mut() {
        for channel in channels.iter_mut() {
            *channel = (f64::from(*channel) * gain).round().clamp(0.0, 255.0) as u8;
        }
    }
    normalized
}

/// Centroide RGB del recorte (color dominante reportado al operador).
pub fn mean_rgb(source: &RgbImage) -> [u8; 3] {
    let pixel_count = (source.width() as u64 * source.height() as u64).max(1);
    let mut accumulator = [0u64; 3];

    for Rgb([r, g, b]) in source.pixels() {
        accumulator[0] += u64::from(*r);
        accumulator[1] += u64::from(*g);
        accumulator[2] += u64::from(*b);
    }

    [
        (accumulator[0] / pixel_count) as u8,
        (accumulator[1] / pixel_count) as u8,
        (accumulator[2] / pixel_count) as u8,
    ]
}

/// Conversión RGB -> HSV con H en [0,180), S y V en [0,255].
pub fn rgb_to_hsv(pixel: [u8; 3]) -> [f32; 3] {
    let r = f32::from(pixel[0]) / 255.0;
    let g = f32::from(pixel[1]) / 255.0;
    let b = f32::from(pixel[2]) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue_degrees = if delta <= f32::EPSILON {
        0.0
    } else if (max - r).abs() <= f32::EPSILON {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if (max - g).abs() <= f32::EPSILON {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let saturation = if max <= f32::EPSILON { 0.0 } else { delta / max };

    [hue_degrees / 2.0, saturation * 255.0, max * 255.0]
}

/// Incrustación de rejilla: el recorte se reduce bilinealmente a una
/// malla fija y se concatenan sus intensidades RGB. Es el sustrato del
/// extractor 'generic': determinista y tolerante al ruido de recompresión.
pub fn grid_embedding(source: &RgbImage, grid_width: u32, grid_height: u32) -> Vec<f32> {
    let thumbnail = resize_to(source, grid_width, grid_height);
    let mut features = Vec::with_capacity((grid_width * grid_height * 3) as usize);

    for Rgb(channels) in thumbnail.pixels() {
        for value in channels.iter() {
            features.push(f32::from(*value));
        }
    }
    features
}

/// Similitud coseno saturada a [0,1].
pub fn cosine_similarity(left: &[f32], right: &[f32]) -> f64 {
    if left.is_empty() || left.len() != right.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_left = 0.0f64;
    let mut norm_right = 0.0f64;

    for (a, b) in left.iter().zip(right.iter()) {
        dot += f64::from(*a) * f64::from(*b);
        norm_left += f64::from(*a) * f64::from(*a);
        norm_right += f64::from(*b) * f64::from(*b);
    }

    if norm_left <= f64::EPSILON || norm_right <= f64::EPSILON {
        return 0.0;
    }

    (dot / (norm_left.sqrt() * norm_right.sqrt())).clamp(0.0, 1.0)
}
