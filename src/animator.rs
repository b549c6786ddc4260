use glam::Vec3;

use crate::animator::Stage::{Running, Stopped};
use crate::error::HeartError;
use crate::waveform::{validate_phases, Phase};

/// Anything whose uniform scale the animator writes each tick
pub trait ScaleTarget {
    fn set_scale(&mut self, scale: Vec3);
}

/// The text overlay naming the current phase
pub trait PhaseLabel {
    fn set_text(&mut self, text: &str);
}

pub trait RedrawSurface {
    fn request_redraw(&self);
}

impl RedrawSurface for winit::window::Window {
    fn request_redraw(&self) {
        winit::window::Window::request_redraw(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Running,
    Stopped,
}

/// Where the animator is in the phase table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationState {
    pub phase_index: usize,
    pub scale_index: usize,
    pub beat_count: u32,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Advanced { phase_index: usize, scale: f32 },
    /// The beat limit was reached on this tick, the timer should be cancelled
    Completed,
    /// Already stopped, nothing changed
    Stopped,
}

pub struct Animator {
    phases: Vec<Phase>,
    max_beats: Option<u32>,
    state: AnimationState,
    stage: Stage,
}

impl Animator {
    pub fn new(phases: Vec<Phase>, max_beats: Option<u32>) -> Result<Self, HeartError> {
        validate_phases(&phases)?;
        Ok(Self {
            phases,
            max_beats,
            state: AnimationState::default(),
            stage: Running,
        })
    }

    /// Apply the current scale value, then step to the next one.
    pub fn tick<T: ScaleTarget>(
        &mut self,
        targets: &mut [T],
        label: &mut impl PhaseLabel,
        surface: &impl RedrawSurface,
    ) -> TickOutcome {
        if self.stage == Stopped {
            return TickOutcome::Stopped;
        }
        if self.finished() {
            self.stage = Stopped;
            log::info!("Timer animation completed.");
            return TickOutcome::Completed;
        }
        let AnimationState {
            phase_index,
            scale_index,
            ..
        } = self.state;
        let phase = &self.phases[phase_index];
        let scale = phase.scales()[scale_index];
        label.set_text(phase.name());
        for target in targets.iter_mut() {
            target.set_scale(Vec3::splat(scale));
        }
        surface.request_redraw();
        self.advance();
        TickOutcome::Advanced { phase_index, scale }
    }

    fn advance(&mut self) {
        let state = &mut self.state;
        state.scale_index += 1;
        if state.scale_index >= self.phases[state.phase_index].len() {
            state.scale_index = 0;
            state.phase_index += 1;
            if state.phase_index >= self.phases.len() {
                state.phase_index = 0;
                state.beat_count = state.beat_count.saturating_add(1);
                log::debug!("Beat {}", state.beat_count);
            }
        }
    }

    fn finished(&self) -> bool {
        self.max_beats
            .is_some_and(|max_beats| self.state.beat_count >= max_beats)
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn current_phase(&self) -> &Phase {
        &self.phases[self.state.phase_index]
    }

    pub fn max_beats(&self) -> Option<u32> {
        self.max_beats
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Default)]
    struct Probe(Vec3);

    impl ScaleTarget for Probe {
        fn set_scale(&mut self, scale: Vec3) {
            self.0 = scale;
        }
    }

    #[derive(Default)]
    struct Text(String);

    impl PhaseLabel for Text {
        fn set_text(&mut self, text: &str) {
            self.0 = text.to_string();
        }
    }

    #[derive(Default)]
    struct Redraws(Cell<usize>);

    impl RedrawSurface for Redraws {
        fn request_redraw(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn two_phases() -> Vec<Phase> {
        vec![
            Phase::new("up", 0.5, vec![1.0, 2.0, 3.0]),
            Phase::new("down", 0.5, vec![2.0]),
        ]
    }

    #[test]
    fn test_rejects_empty_tables() {
        assert!(Animator::new(vec![], None).is_err());
        assert!(Animator::new(vec![Phase::new("P", 0.1, vec![])], None).is_err());
    }

    #[test]
    fn test_tick_writes_label_scale_and_redraw() {
        let mut animator = Animator::new(two_phases(), None).unwrap();
        let mut targets = [Probe::default(), Probe::default()];
        let mut label = Text::default();
        let redraws = Redraws::default();

        let outcome = animator.tick(&mut targets, &mut label, &redraws);
        assert_eq!(outcome, TickOutcome::Advanced { phase_index: 0, scale: 1.0 });
        assert_eq!(label.0, "up");
        assert!(targets.iter().all(|probe| probe.0 == Vec3::splat(1.0)));
        assert_eq!(redraws.0.get(), 1);
        assert_eq!(animator.state(), AnimationState { phase_index: 0, scale_index: 1, beat_count: 0 });
    }

    #[test]
    fn test_wraps_into_next_beat() {
        let mut animator = Animator::new(two_phases(), None).unwrap();
        let mut targets: [Probe; 0] = [];
        let mut label = Text::default();
        let redraws = Redraws::default();
        for _ in 0..3 {
            animator.tick(&mut targets, &mut label, &redraws);
        }
        assert_eq!(animator.state(), AnimationState { phase_index: 1, scale_index: 0, beat_count: 0 });
        assert_eq!(animator.current_phase().name(), "down");
        animator.tick(&mut targets, &mut label, &redraws);
        assert_eq!(label.0, "down");
        assert_eq!(animator.state(), AnimationState { phase_index: 0, scale_index: 0, beat_count: 1 });
    }

    #[test]
    fn test_zero_beats_stops_immediately() {
        let mut animator = Animator::new(two_phases(), Some(0)).unwrap();
        let mut targets = [Probe::default()];
        let mut label = Text::default();
        let redraws = Redraws::default();
        assert_eq!(animator.tick(&mut targets, &mut label, &redraws), TickOutcome::Completed);
        assert_eq!(animator.stage(), Stage::Stopped);
        assert_eq!(animator.tick(&mut targets, &mut label, &redraws), TickOutcome::Stopped);
        assert_eq!(redraws.0.get(), 0);
        assert_eq!(targets[0].0, Vec3::ZERO);
        assert!(label.0.is_empty());
    }
}
