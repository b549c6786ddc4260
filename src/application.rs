use std::sync::Arc;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::actor::Actor;
use crate::animator::{Animator, TickOutcome};
use crate::config::HeartConfig;
use crate::error::HeartError;
use crate::mesh::bounds::Bounds;
use crate::mesh::{load_model, model_bounds};
use crate::scene::Scene;
use crate::timer::RepeatingTimer;
use crate::waveform::{ecg_phases, ticks_per_beat};
use crate::wgpu::Wgpu;
use crate::{HeartEvent, Radio};

pub struct Application {
    config: HeartConfig,
    radio: Radio,
    window: Option<Arc<Window>>,
    scene: Option<Scene>,
    /// Waiting for the graphics context
    pending: Option<(Vec<Actor>, Bounds)>,
    animator: Animator,
    timer: Option<RepeatingTimer>,
    failure: Option<HeartError>,
}

impl Application {
    /// Load the model and build the waveform before any window exists
    pub fn new(config: HeartConfig, radio: Radio) -> Result<Application, HeartError> {
        config.validate()?;
        let meshes = load_model(&config.model_path, config.material_path.as_deref())?;
        let bounds = model_bounds(&meshes).ok_or_else(|| HeartError::NoActors {
            path: config.model_path.clone(),
        })?;
        log::info!(
            "Loaded {} actors ({} triangles) from {}, bounds {:?} to {:?}",
            meshes.len(),
            meshes.iter().map(|mesh| mesh.triangle_count()).sum::<usize>(),
            config.model_path.display(),
            bounds.min,
            bounds.max,
        );
        let actors = Actor::centered(meshes, &bounds, config.base_scale);
        let animator = Animator::new(ecg_phases(&config), config.max_beats)?;
        log::info!(
            "{} ticks per beat at {} ms per tick",
            ticks_per_beat(animator.phases()),
            config.timer_interval_ms,
        );
        Ok(Application {
            config,
            radio,
            window: None,
            scene: None,
            pending: Some((actors, bounds)),
            animator,
            timer: None,
            failure: None,
        })
    }

    /// The error that ended the event loop, if any
    pub fn into_result(self) -> Result<(), HeartError> {
        match self.failure {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: HeartError) {
        self.failure = Some(err);
        event_loop.exit();
    }

    fn context_created(&mut self, wgpu: Wgpu) -> Result<(), HeartError> {
        let Some((actors, bounds)) = self.pending.take() else {
            return Ok(());
        };
        self.scene = Some(Scene::new(wgpu, actors, &bounds, &self.config)?);
        self.timer = Some(RepeatingTimer::new(self.config.timer_interval(), Instant::now()));
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        Ok(())
    }

    fn handle_key_event(&mut self, event_loop: &ActiveEventLoop, key_event: KeyEvent) {
        if !key_event.state.is_pressed() {
            return;
        }
        if let PhysicalKey::Code(code) = key_event.physical_key {
            match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyR => {
                    if let (Some(scene), Some(window)) = (&mut self.scene, &self.window) {
                        scene.reset_camera();
                        window.request_redraw();
                    }
                }
                _ => {}
            }
        }
    }
}

impl ApplicationHandler<HeartEvent> for Application {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("Heart Pulse")
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                let window = Arc::new(window);
                self.window = Some(Arc::clone(&window));
                Wgpu::create_and_send(window, self.radio.clone());
            }
            Err(err) => self.fail(event_loop, HeartError::Graphics(err.to_string())),
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: HeartEvent) {
        match event {
            HeartEvent::ContextCreated(wgpu) => {
                if let Err(err) = wgpu.and_then(|wgpu| self.context_created(wgpu)) {
                    self.fail(event_loop, err);
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.handle_key_event(event_loop, key_event)
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(scene) = &mut self.scene {
                    scene.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(scene) = &mut self.scene {
                    if let Err(err) = scene.render() {
                        self.fail(event_loop, err);
                    }
                }
            }
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. } => {
                if let (Some(scene), Some(window)) = (&mut self.scene, &self.window) {
                    scene.window_event(&event);
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(scene), Some(window), Some(timer)) =
            (&mut self.scene, &self.window, &mut self.timer)
        else {
            return;
        };
        if timer.poll(Instant::now()) {
            if let TickOutcome::Completed = scene.animate(&mut self.animator, &**window) {
                timer.cancel();
            }
        }
        event_loop.set_control_flow(match timer.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        });
    }
}
