use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use winit::event_loop::EventLoop;

use heart_pulse::application::Application;
use heart_pulse::config::HeartConfig;
use heart_pulse::error::HeartError;
use heart_pulse::HeartEvent;

#[derive(Parser, Debug)]
#[command(author, version, about = "A heart model pulsing to a synthetic ECG", long_about = None)]
struct Args {
    /// Wavefront OBJ model to load
    #[arg(long)]
    model: Option<PathBuf>,
    /// Material library, instead of the one the model names
    #[arg(long)]
    material: Option<PathBuf>,
    /// JSON file with any of the tunable constants
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    base_scale: Option<f32>,
    #[arg(long)]
    min_multiplier: Option<f32>,
    #[arg(long)]
    max_multiplier: Option<f32>,
    /// Scale steps per phase
    #[arg(long)]
    steps: Option<usize>,
    /// Milliseconds between animation ticks
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Stop after this many beats, otherwise run forever
    #[arg(long)]
    max_beats: Option<u32>,
}

impl Args {
    fn into_config(self) -> Result<HeartConfig, HeartError> {
        let mut config = match &self.config {
            Some(path) => HeartConfig::from_json_file(path)?,
            None => HeartConfig::default(),
        };
        if let Some(model) = self.model {
            config.model_path = model;
        }
        if let Some(material) = self.material {
            config.material_path = Some(material);
        }
        if let Some(base_scale) = self.base_scale {
            config.base_scale = base_scale;
        }
        if let Some(min_multiplier) = self.min_multiplier {
            config.min_multiplier = min_multiplier;
        }
        if let Some(max_multiplier) = self.max_multiplier {
            config.max_multiplier = max_multiplier;
        }
        if let Some(steps) = self.steps {
            config.steps_per_phase = steps;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.timer_interval_ms = interval_ms;
        }
        if self.max_beats.is_some() {
            config.max_beats = self.max_beats;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), HeartError> {
    let config = args.into_config()?;
    let event_loop = EventLoop::<HeartEvent>::with_user_event()
        .build()
        .map_err(|err| HeartError::Graphics(err.to_string()))?;
    let mut app = Application::new(config, event_loop.create_proxy())?;
    event_loop
        .run_app(&mut app)
        .map_err(|err| HeartError::Graphics(err.to_string()))?;
    app.into_result()
}
