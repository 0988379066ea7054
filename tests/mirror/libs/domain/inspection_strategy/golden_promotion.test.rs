// [tests/mirror/libs/domain/inspection_strategy/golden_promotion.test.rs]
/**
 * =================================================================
 * APARATO: GOLDEN PROMOTION CERTIFICATION (V12.0 - ATOMICITY AUDIT)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L2-INSPECTION)
 * RESPONSABILIDAD: ATOMICIDAD DE PROMOCIÓN BAJO CARGA PARALELA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BURST PROMOTION: N workers promoviendo sobre la misma ROI jamás
 *    colisionan en nombres de respaldo ni pierden alternates.
 * 2. SHORT CIRCUIT SEAL: Tras la primera promoción, las inspecciones
 *    siguientes cortocircuitan en el best vigente sin volver a promover.
 * =================================================================
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use argus_domain_inspection::golden_store::{
    GoldenStore, BEST_GOLDEN_FILE, GOLDEN_SAMPLE_SUFFIX,
};
use image::{Rgb, RgbImage};
use tempfile::TempDir;

fn flat(brightness: u8) -> RgbImage {
    RgbImage::from_pixel(12, 12, Rgb([brightness, brightness, brightness]))
}

/// Similitud sintética keyed al contenido: brillo alto = candidato fuerte.
fn brightness_similarity(candidate: &RgbImage) -> f64 {
    if candidate.get_pixel(0, 0)[0] > 128 { 0.98 } else { 0.60 }
}

/**
 * CERTIFICACIÓN: Tres inspecciones consecutivas sobre la misma ROI.
 *
 * La primera promueve el alternate fuerte; la segunda y tercera
 * cortocircuitan en el best vigente con la misma similitud y sin
 * tocar el directorio.
 */
#[test]
fn certify_promotion_then_short_circuit_sequence() {
    println!("\n🧪 [PROVING_GROUNDS]: Validating promotion + short-circuit strata...");

    let root = TempDir::new().unwrap();
    let promotion_lock = Arc::new(Mutex::new(()));
    let store = GoldenStore::new(root.path(), 3, promotion_lock);

    // best débil (oscuro) + alternate fuerte (brillante).
    store.register_reference(&flat(20)).unwrap();
    store.register_reference(&flat(230)).unwrap();

    // INSPECCIÓN 1: promoción del alternate fuerte.
    let first_verdict = store
        .evaluate(0.93, |candidate| Ok((brightness_similarity(candidate), candidate.clone())))
        .expect("first inspection scores");
    assert_eq!(first_verdict.matched_file, BEST_GOLDEN_FILE);
    assert!((first_verdict.similarity - 0.98).abs() < 1e-9);

    // INSPECCIONES 2 y 3: cortocircuito en el best promovido, cero
    // invocaciones sobre alternates.
    for inspection_round in 2..=3 {
        let scored_candidates = AtomicUsize::new(0);
        let verdict = store
            .evaluate(0.93, |candidate| {
                scored_candidates.fetch_add(1, Ordering::SeqCst);
                Ok((brightness_similarity(candidate), candidate.clone()))
            })
            .expect("subsequent inspection scores");

        assert_eq!(verdict.matched_file, BEST_GOLDEN_FILE);
        assert!((verdict.similarity - 0.98).abs() < 1e-9);
        assert_eq!(
            scored_candidates.load(Ordering::SeqCst),
            1,
            "round {} must short-circuit at best_golden",
            inspection_round
        );
    }

    // El directorio queda con exactamente un best + el respaldo del viejo best.
    let directory_entries: Vec<String> = std::fs::read_dir(store.directory())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();

    assert_eq!(directory_entries.iter().filter(|name| *name == BEST_GOLDEN_FILE).count(), 1);
    assert_eq!(
        directory_entries.iter().filter(|name| name.ends_with(GOLDEN_SAMPLE_SUFFIX)).count(),
        1
    );

    println!("   ✅ [SUCCESS]: Promotion atomicity and short-circuit confirmed.");
}

/**
 * CERTIFICACIÓN: Ráfaga paralela de promociones sobre la misma ROI.
 *
 * Tras la ráfaga: exactamente un 'best_golden.jpg', ningún alternate
 * perdido (el conteo total de archivos se preserva) y nombres de
 * respaldo únicos por construcción.
 */
#[test]
fn certify_parallel_promotion_burst_preserves_the_directory() {
    println!("\n🧪 [PROVING_GROUNDS]: Validating parallel promotion burst...");

    let root = TempDir::new().unwrap();
    let promotion_lock = Arc::new(Mutex::new(()));
    let store = Arc::new(GoldenStore::new(root.path(), 7, promotion_lock));

    // best débil + 6 alternates fuertes con brillos únicos.
    store.register_reference(&flat(10)).unwrap();
    for alternate_brightness in [200u8, 205, 210, 215, 220, 225] {
        store.register_reference(&flat(alternate_brightness)).unwrap();
    }
    let seeded_file_count = std::fs::read_dir(store.directory()).unwrap().count();
    assert_eq!(seeded_file_count, 7);

    // 8 workers evaluando (y promoviendo) en paralelo. Un worker que
    // caiga en la ventana entre renames reporta error y se tolera: la
    // propiedad auditada es la integridad del directorio.
    let worker_handles: Vec<_> = (0..8)
        .map(|_| {
            let store_reference = Arc::clone(&store);
            thread::spawn(move || {
                store_reference.evaluate(0.93, |candidate| {
                    Ok((brightness_similarity(candidate), candidate.clone()))
                })
            })
        })
        .collect();

    let mut successful_evaluations = 0usize;
    for handle in worker_handles {
        if handle.join().expect("worker thread must not panic").is_ok() {
            successful_evaluations += 1;
        }
    }
    assert!(successful_evaluations >= 1, "at least one evaluation must land");

    // AUDITORÍA DEL DIRECTORIO
    let final_entries: Vec<String> = std::fs::read_dir(store.directory())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();

    let best_count = final_entries.iter().filter(|name| *name == BEST_GOLDEN_FILE).count();
    let sample_count =
        final_entries.iter().filter(|name| name.ends_with(GOLDEN_SAMPLE_SUFFIX)).count();

    assert_eq!(best_count, 1, "exactly one best_golden.jpg after the burst");
    assert_eq!(
        best_count + sample_count,
        seeded_file_count,
        "no reference file may be lost or duplicated"
    );

    // El best final es uno de los candidatos fuertes.
    let final_best = image::open(store.directory().join(BEST_GOLDEN_FILE)).unwrap().to_rgb8();
    assert!(final_best.get_pixel(0, 0)[0] > 128, "a strong candidate must hold the throne");

    println!("   ✅ [SUCCESS]: Directory integrity preserved under burst promotion.");
}
