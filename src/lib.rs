use crate::error::HeartError;
use crate::wgpu::Wgpu;

pub mod actor;
pub mod animator;
pub mod application;
pub mod camera;
pub mod config;
pub mod error;
pub mod mesh;
pub mod scene;
pub mod timer;
pub mod waveform;
pub mod wgpu;

#[derive(Debug)]
pub enum HeartEvent {
    ContextCreated(Result<Wgpu, HeartError>),
}

pub type Radio = winit::event_loop::EventLoopProxy<HeartEvent>;

impl HeartEvent {
    pub fn send(self, radio: &Radio) {
        if radio.send_event(self).is_err() {
            log::warn!("Event loop closed before the event arrived");
        }
    }
}
