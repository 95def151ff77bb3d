// src/fleet/drift.rs - Simulated sensor drift for printing records

use printlab_shared::PrinterRecord;
use rand::Rng;

use crate::config::SimulationConfig;

/// Parameters of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftSettings {
    pub progress_step: f64,
    pub progress_ceiling: f64,
    pub temp_jitter: f64,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self {
            progress_step: 0.5,
            progress_ceiling: 99.0,
            temp_jitter: 0.5,
        }
    }
}

impl From<&SimulationConfig> for DriftSettings {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            progress_step: config.progress_step,
            progress_ceiling: config.progress_ceiling,
            temp_jitter: config.temp_jitter,
        }
    }
}

/// Advances every printing record by one tick and returns how many changed.
///
/// Progress moves to `min(progress + step, ceiling)` and the nozzle reading
/// gains a uniform perturbation in `[-jitter, +jitter]`. Records in any other
/// status are not touched. Completion is never simulated: progress saturates at
/// the ceiling and the status stays `printing`.
pub fn apply_drift<R: Rng>(printers: &mut [PrinterRecord], settings: &DriftSettings, rng: &mut R) -> usize {
    let mut updated = 0;
    for printer in printers.iter_mut().filter(|p| p.is_printing()) {
        printer.progress = (printer.progress + settings.progress_step).min(settings.progress_ceiling);
        if settings.temp_jitter > 0.0 {
            printer.nozzle_temp += rng.random_range(-settings.temp_jitter..=settings.temp_jitter);
        }
        updated += 1;
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use printlab_shared::fixtures::initial_printers;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_only_printing_records_change() {
        let before = initial_printers();
        let mut after = before.clone();
        let mut rng = StdRng::seed_from_u64(1);
        let updated = apply_drift(&mut after, &DriftSettings::default(), &mut rng);
        assert_eq!(updated, 2);
        for (old, new) in before.iter().zip(&after) {
            if !old.is_printing() {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_zero_jitter_keeps_temperature() {
        let mut printers = initial_printers();
        let settings = DriftSettings { temp_jitter: 0.0, ..DriftSettings::default() };
        let mut rng = StdRng::seed_from_u64(9);
        apply_drift(&mut printers, &settings, &mut rng);
        assert_eq!(printers[0].nozzle_temp, 215.0);
        assert_eq!(printers[0].progress, 65.5);
    }
}
