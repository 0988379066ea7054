// [libs/domain/inspection-strategy/src/golden_store.rs]
/*!
 * =================================================================
 * APARATO: GOLDEN REFERENCE STORE (V27.0 - ATOMIC PROMOTION)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PUNTUACIÓN CONTRA REFERENCIAS Y PROMOCIÓN ATÓMICA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SHORT CIRCUIT: 'best_golden.jpg' se puntúa primero; si supera el
 *    umbral no se toca ningún alternate (cero I/O extra).
 * 2. ATOMIC PROMOTION: El respaldo y la promoción son dos renames en
 *    el mismo filesystem bajo el candado global del motor; la
 *    identidad de los nombres de respaldo queda serializada.
 * 3. MILLISECOND STAMPS: Los respaldos usan milisegundos desde epoch
 *    con desambiguación incremental ante ráfagas de promoción.
 * =================================================================
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use image::RgbImage;
use tracing::{debug, info, warn};

use crate::errors::EngineFault;

/// Nombre canónico de la referencia vigente.
pub const BEST_GOLDEN_FILE: &str = "best_golden.jpg";
/// Sufijo de los candidatos históricos.
pub const GOLDEN_SAMPLE_SUFFIX: &str = "_golden_sample.jpg";

/// Veredicto de una evaluación contra el almacén.
#[derive(Debug)]
pub struct GoldenVerdict {
    /// Mejor similitud observada en [0,1].
    pub similarity: f64,
    /// Identidad lógica del archivo ganador tras una eventual promoción.
    pub matched_file: String,
    /// El golden redimensionado que realmente se puntuó; es el que se
    /// persiste como artefacto para el UI de operador.
    pub golden_used: RgbImage,
}

/// Almacén dorado de una ROI: `golden_rois/roi_{idx}/` con exactamente
/// un `best_golden.jpg` y cero o más alternates con sello temporal.
pub struct GoldenStore {
    roi_directory: PathBuf,
    /// Candado de promoción a nivel proceso, propiedad del motor.
    promotion_lock: Arc<Mutex<()>>,
}

impl GoldenStore {
    pub fn new(product_golden_root: &Path, roi_idx: u32, promotion_lock: Arc<Mutex<()>>) -> Self {
        Self {
            roi_directory: product_golden_root.join(format!("roi_{}", roi_idx)),
            promotion_lock,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.roi_directory
    }

    /**
     * Evalúa el recorte contra el almacén y promueve si corresponde.
     *
     * Contrato de puntuación:
     * 1. `best_golden.jpg` primero; umbral superado -> retorno inmediato.
     * 2. Si no, todos los alternates; el ganador que supere el umbral y
     *    al best vigente se promueve antes de retornar.
     * 3. Siempre retorna la máxima similitud observada.
     *
     * El closure `score` recibe cada candidato y entrega la similitud
     * junto al candidato redimensionado realmente puntuado.
     */
    pub fn evaluate<F>(&self, threshold: f64, score: F) -> Result<GoldenVerdict, EngineFault>
    where
        F: Fn(&RgbImage) -> Result<(f64, RgbImage), EngineFault>,
    {
        let best_path = self.roi_directory.join(BEST_GOLDEN_FILE);
        if !best_path.exists() {
            return Err(EngineFault::GoldenMissing);
        }

        // 1. REFERENCIA VIGENTE (camino caliente)
        let best_image = read_reference(&best_path)?;
        let (best_similarity, best_resized) = score(&best_image)?;

        if best_similarity >= threshold {
            return Ok(GoldenVerdict {
                similarity: best_similarity,
                matched_file: BEST_GOLDEN_FILE.to_string(),
                golden_used: best_resized,
            });
        }

        // 2. BARRIDO DE ALTERNATES (camino frío)
        let mut alternate_winner: Option<(f64, String, RgbImage)> = None;

        for alternate_name in self.list_alternates()? {
            let alternate_path = self.roi_directory.join(&alternate_name);
            let alternate_image = match read_reference(&alternate_path) {
                Ok(image) => image,
                Err(decode_fault) => {
                    // Un alternate corrupto no invalida el barrido.
                    warn!(
                        "🖼️ [GOLDEN_SKIP]: Unreadable alternate {}: {}",
                        alternate_name, decode_fault
                    );
                    continue;
                }
            };

            let (alternate_similarity, alternate_resized) = score(&alternate_image)?;
            let is_new_winner = alternate_winner
                .as_ref()
                .map(|(current, _, _)| alternate_similarity > *current)
                .unwrap_or(true);

            if is_new_winner {
                alternate_winner =
                    Some((alternate_similarity, alternate_name, alternate_resized));
            }
        }

        // 3. VEREDICTO + PROMOCIÓN CONDICIONAL
        match alternate_winner {
            Some((alternate_similarity, alternate_name, alternate_resized))
                if alternate_similarity > best_similarity =>
            {
                let matched_file = if alternate_similarity >= threshold {
                    match self.promote(&alternate_name) {
                        Ok(()) => BEST_GOLDEN_FILE.to_string(),
                        Err(promotion_fault) => {
                            // La similitud ya está computada en RAM; el
                            // almacén podrá reintentar en otra inspección.
                            warn!(
                                "⚠️ [PROMOTION_ABORTED]: {} stays in place: {}",
                                alternate_name, promotion_fault
                            );
                            alternate_name
                        }
                    }
                } else {
                    alternate_name
                };

                Ok(GoldenVerdict {
                    similarity: alternate_similarity,
                    matched_file,
                    golden_used: alternate_resized,
                })
            }
            _ => Ok(GoldenVerdict {
                similarity: best_similarity,
                matched_file: BEST_GOLDEN_FILE.to_string(),
                golden_used: best_resized,
            }),
        }
    }

    /**
     * Promoción atómica: respalda el best vigente con sello de
     * milisegundos único y asciende al alternate ganador.
     *
     * La sección completa (identidad del respaldo + par de renames)
     * corre bajo el candado global; dos workers promoviendo sobre la
     * misma ROI jamás colisionan en nombres de respaldo.
     */
    fn promote(&self, alternate_name: &str) -> Result<(), EngineFault> {
        let _promotion_guard = self
            .promotion_lock
            .lock()
            .expect("FATAL: Golden promotion lock poisoned.");

        let backup_name = self.unique_backup_name();
        let best_path = self.roi_directory.join(BEST_GOLDEN_FILE);
        let backup_path = self.roi_directory.join(&backup_name);
        let alternate_path = self.roi_directory.join(alternate_name);

        // Otro worker pudo promover este mismo alternate mientras se
        // esperaba el candado; verificar antes de tocar el best.
        if !alternate_path.exists() {
            return Err(EngineFault::GoldenIo(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("alternate {} already promoted", alternate_name),
            )));
        }

        fs::rename(&best_path, &backup_path)?;
        fs::rename(&alternate_path, &best_path)?;

        info!(
            "🏆 [GOLDEN_PROMOTED]: {} -> {} (previous best archived as {})",
            alternate_name, BEST_GOLDEN_FILE, backup_name
        );
        Ok(())
    }

    /**
     * Registra una referencia de entrenamiento: la primera imagen se
     * convierte en `best_golden.jpg`; las siguientes se archivan como
     * alternates con sello temporal, bajo el mismo candado.
     */
    pub fn register_reference(&self, reference: &RgbImage) -> Result<String, EngineFault> {
        let _promotion_guard = self
            .promotion_lock
            .lock()
            .expect("FATAL: Golden promotion lock poisoned.");

        fs::create_dir_all(&self.roi_directory)?;

        let best_path = self.roi_directory.join(BEST_GOLDEN_FILE);
        let target_name = if best_path.exists() {
            self.unique_backup_name()
        } else {
            BEST_GOLDEN_FILE.to_string()
        };

        let target_path = self.roi_directory.join(&target_name);
        reference
            .save(&target_path)
            .map_err(|encode_fault| EngineFault::GoldenImage(encode_fault.to_string()))?;

        debug!("📦 [GOLDEN_TRAINED]: Reference registered as {}", target_name);
        Ok(target_name)
    }

    /// Nombre de respaldo `{millis}_golden_sample.jpg` garantizado único
    /// dentro del directorio. Solo legal bajo el candado de promoción.
    fn unique_backup_name(&self) -> String {
        let mut stamp_milliseconds = Utc::now().timestamp_millis();
        loop {
            let candidate = format!("{}{}", stamp_milliseconds, GOLDEN_SAMPLE_SUFFIX);
            if !self.roi_directory.join(&candidate).exists() {
                return candidate;
            }
            stamp_milliseconds += 1;
        }
    }

    /// Alternates presentes, en orden de nombre para un barrido determinista.
    fn list_alternates(&self) -> Result<Vec<String>, EngineFault> {
        let mut alternates: Vec<String> = fs::read_dir(&self.roi_directory)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(GOLDEN_SAMPLE_SUFFIX))
            .collect();
        alternates.sort();
        Ok(alternates)
    }
}

fn read_reference(path: &Path) -> Result<RgbImage, EngineFault> {
    image::open(path)
        .map(|decoded| decoded.to_rgb8())
        .map_err(|decode_fault| EngineFault::GoldenImage(decode_fault.to_string()))
}
