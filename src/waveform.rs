use strum::{Display, EnumIter, IntoEnumIterator};

use crate::config::HeartConfig;
use crate::error::HeartError;

/// The segments of one synthetic ECG beat, in playing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum PhaseName {
    #[strum(serialize = "P")]
    PWave,
    #[strum(serialize = "QRS")]
    Qrs,
    #[strum(serialize = "T")]
    TWave,
}

/// A named stretch of the beat with the scale values it steps through.
///
/// The duration is nominal: playback advances one scale value per tick,
/// so the real speed is the timer interval times the number of steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    name: String,
    duration: f32,
    scales: Vec<f32>,
}

impl Phase {
    pub fn new(name: impl Into<String>, duration: f32, scales: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            duration,
            scales,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

/// Evenly spaced values from `start` to `end`, both included
pub fn linspace(start: f32, end: f32, steps: usize) -> Vec<f32> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (steps - 1) as f32;
            (0..steps)
                .map(|step| {
                    if step == steps - 1 {
                        end
                    } else {
                        start + (end - start) * step as f32 / last
                    }
                })
                .collect()
        }
    }
}

/// P rises from the base to the maximum, QRS contracts down to the minimum,
/// T relaxes back up towards 80% of the maximum.
pub fn ecg_phases(config: &HeartConfig) -> Vec<Phase> {
    let base = config.base_scale;
    let min = config.scale_min();
    let max = config.scale_max();
    let steps = config.steps_per_phase;
    PhaseName::iter()
        .map(|name| {
            let (duration, scales) = match name {
                PhaseName::PWave => (config.p_wave_duration, linspace(base, max, steps)),
                PhaseName::Qrs => (config.qrs_duration, linspace(max, min, steps)),
                PhaseName::TWave => (config.t_wave_duration, linspace(min, max * 0.8, steps)),
            };
            Phase::new(name.to_string(), duration, scales)
        })
        .collect()
}

pub fn validate_phases(phases: &[Phase]) -> Result<(), HeartError> {
    if phases.is_empty() {
        return Err(HeartError::EmptyPhaseTable);
    }
    if let Some(phase) = phases.iter().find(|phase| phase.is_empty()) {
        return Err(HeartError::EmptyScaleSequence {
            phase: phase.name.clone(),
        });
    }
    Ok(())
}

/// Ticks needed to play every phase once
pub fn ticks_per_beat(phases: &[Phase]) -> usize {
    phases.iter().map(Phase::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        assert_eq!(linspace(10.0, 10.5, 5), vec![10.0, 10.125, 10.25, 10.375, 10.5]);
        assert_eq!(linspace(2.0, 7.0, 1), vec![2.0]);
        assert!(linspace(2.0, 7.0, 0).is_empty());
        assert_eq!(linspace(1.0, 0.0, 3), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_ecg_table() {
        let phases = ecg_phases(&HeartConfig::default());
        let names: Vec<&str> = phases.iter().map(Phase::name).collect();
        assert_eq!(names, ["P", "QRS", "T"]);
        assert_eq!(phases[0].scales(), &[10.0, 10.125, 10.25, 10.375, 10.5]);
        assert_eq!(phases[1].scales(), &[10.5, 10.25, 10.0, 9.75, 9.5]);
        let t = phases[2].scales();
        assert_eq!(t.len(), 5);
        assert_eq!(t[0], 9.5);
        assert!((t[4] - 8.4).abs() < 1e-5);
        assert_eq!(phases[1].duration(), 0.286);
        assert_eq!(ticks_per_beat(&phases), 15);
    }

    #[test]
    fn test_phase_names_display() {
        let names: Vec<String> = PhaseName::iter().map(|name| name.to_string()).collect();
        assert_eq!(names, ["P", "QRS", "T"]);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(validate_phases(&[]), Err(HeartError::EmptyPhaseTable)));
        let phases = vec![
            Phase::new("P", 0.1, vec![1.0]),
            Phase::new("QRS", 0.1, vec![]),
        ];
        match validate_phases(&phases) {
            Err(HeartError::EmptyScaleSequence { phase }) => assert_eq!(phase, "QRS"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(validate_phases(&ecg_phases(&HeartConfig::default())).is_ok());
    }
}
