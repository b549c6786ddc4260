use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HeartError;

/// Tunable constants for the model, the waveform and the window.
///
/// Every field has a default, so a config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartConfig {
    pub model_path: PathBuf,
    /// Overrides the `mtllib` named inside the model
    pub material_path: Option<PathBuf>,
    /// Increase (>10) for a larger heart, decrease for a smaller one
    pub base_scale: f32,
    pub min_multiplier: f32,
    pub max_multiplier: f32,
    /// Number of scale steps per phase (smoothness)
    pub steps_per_phase: usize,
    /// Smaller is smoother
    pub timer_interval_ms: u64,
    pub p_wave_duration: f32,
    pub qrs_duration: f32,
    pub t_wave_duration: f32,
    /// None runs forever
    pub max_beats: Option<u32>,
    pub window_width: u32,
    pub window_height: u32,
    pub background: [f32; 3],
    pub light_position: [f32; 3],
    pub light_intensity: f32,
    pub label_font_size: f32,
    pub label_color: [f32; 4],
    /// Pixels from the bottom-left corner
    pub label_offset: [f32; 2],
}

impl Default for HeartConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/heart.obj"),
            material_path: None,
            base_scale: 10.0,
            min_multiplier: 0.95,
            max_multiplier: 1.05,
            steps_per_phase: 5,
            timer_interval_ms: 20,
            // ~70 BPM, 0.857s per beat
            p_wave_duration: 0.143,
            qrs_duration: 0.286,
            t_wave_duration: 0.429,
            max_beats: None,
            window_width: 800,
            window_height: 600,
            background: [0.1, 0.2, 0.4],
            light_position: [10.0, 10.0, 10.0],
            light_intensity: 1.0,
            label_font_size: 36.0,
            label_color: [1.0, 1.0, 1.0, 1.0],
            label_offset: [20.0, 20.0],
        }
    }
}

impl HeartConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, HeartError> {
        let source = fs::read_to_string(path).map_err(|err| HeartError::io(path, err))?;
        Self::from_json_str(&source, path)
    }

    pub fn from_json_str(source: &str, path: &Path) -> Result<Self, HeartError> {
        serde_json::from_str(source).map_err(|err| HeartError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), HeartError> {
        if !(self.base_scale > 0.0) {
            return Err(HeartError::InvalidConfig(format!(
                "base scale must be positive, got {}",
                self.base_scale
            )));
        }
        if self.min_multiplier > self.max_multiplier {
            return Err(HeartError::InvalidConfig(format!(
                "min multiplier {} exceeds max multiplier {}",
                self.min_multiplier, self.max_multiplier
            )));
        }
        if self.steps_per_phase == 0 {
            return Err(HeartError::InvalidConfig("steps per phase must be at least 1".into()));
        }
        if self.timer_interval_ms == 0 {
            return Err(HeartError::InvalidConfig("timer interval must be at least 1 ms".into()));
        }
        Ok(())
    }

    pub fn scale_min(&self) -> f32 {
        self.min_multiplier * self.base_scale
    }

    pub fn scale_max(&self) -> f32 {
        self.max_multiplier * self.base_scale
    }

    pub fn timer_interval(&self) -> Duration {
        Duration::from_millis(self.timer_interval_ms)
    }

    /// Directory the model lives in, used to resolve a relative `mtllib`
    pub fn model_directory(&self) -> &Path {
        self.model_path.parent().unwrap_or_else(|| Path::new("."))
    }
}
