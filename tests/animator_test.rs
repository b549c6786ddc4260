//! Drives the animator by hand, the way the timer would, against the ECG table

use std::cell::Cell;

use glam::Vec3;
use heart_pulse::animator::{AnimationState, Animator, PhaseLabel, RedrawSurface, ScaleTarget, Stage, TickOutcome};
use heart_pulse::config::HeartConfig;
use heart_pulse::timer::RepeatingTimer;
use heart_pulse::waveform::{ecg_phases, ticks_per_beat, Phase};

#[derive(Default)]
struct RecordingTarget {
    scales: Vec<Vec3>,
}

impl ScaleTarget for RecordingTarget {
    fn set_scale(&mut self, scale: Vec3) {
        self.scales.push(scale);
    }
}

#[derive(Default)]
struct RecordingLabel {
    texts: Vec<String>,
}

impl RecordingLabel {
    fn last(&self) -> &str {
        self.texts.last().map(String::as_str).unwrap_or_default()
    }
}

impl PhaseLabel for RecordingLabel {
    fn set_text(&mut self, text: &str) {
        self.texts.push(text.to_string());
    }
}

#[derive(Default)]
struct CountingSurface(Cell<usize>);

impl RedrawSurface for CountingSurface {
    fn request_redraw(&self) {
        self.0.set(self.0.get() + 1);
    }
}

struct Rig {
    animator: Animator,
    targets: Vec<RecordingTarget>,
    label: RecordingLabel,
    surface: CountingSurface,
}

impl Rig {
    fn new(max_beats: Option<u32>) -> Self {
        let animator = Animator::new(ecg_phases(&HeartConfig::default()), max_beats).unwrap();
        Self {
            animator,
            targets: vec![RecordingTarget::default(), RecordingTarget::default(), RecordingTarget::default()],
            label: RecordingLabel::default(),
            surface: CountingSurface::default(),
        }
    }

    fn tick(&mut self) -> TickOutcome {
        self.animator
            .tick(self.targets.as_mut_slice(), &mut self.label, &self.surface)
    }
}

/// Where the animator should be after `ticks` ticks, worked out from the table sizes alone
fn expected_state(phases: &[Phase], ticks: usize) -> AnimationState {
    let per_beat = ticks_per_beat(phases);
    let mut remainder = ticks % per_beat;
    let mut phase_index = 0;
    while remainder >= phases[phase_index].len() {
        remainder -= phases[phase_index].len();
        phase_index += 1;
    }
    AnimationState {
        phase_index,
        scale_index: remainder,
        beat_count: (ticks / per_beat) as u32,
    }
}

#[test]
fn test_classic_scenario() {
    let mut rig = Rig::new(None);
    let phases = rig.animator.phases().to_vec();
    assert_eq!(phases[0].scales(), &[10.0, 10.125, 10.25, 10.375, 10.5]);

    assert_eq!(rig.tick(), TickOutcome::Advanced { phase_index: 0, scale: 10.0 });
    assert_eq!(rig.label.last(), "P");
    for _ in 2..=5 {
        rig.tick();
    }
    assert_eq!(rig.label.last(), "P");
    assert_eq!(*rig.targets[0].scales.last().unwrap(), Vec3::splat(10.5));

    let outcome = rig.tick();
    assert_eq!(rig.label.last(), "QRS");
    assert_eq!(outcome, TickOutcome::Advanced { phase_index: 1, scale: phases[1].scales()[0] });
    assert_eq!(*rig.targets[2].scales.last().unwrap(), Vec3::splat(10.5));
}

#[test]
fn test_full_beat_is_fifteen_ticks() {
    let mut rig = Rig::new(None);
    for tick in 1..=15 {
        assert_eq!(rig.animator.state().beat_count, 0, "tick {tick}");
        rig.tick();
    }
    assert_eq!(
        rig.animator.state(),
        AnimationState { phase_index: 0, scale_index: 0, beat_count: 1 }
    );
    assert_eq!(rig.surface.0.get(), 15);
}

#[test]
fn test_state_matches_analytic_derivation() {
    let mut rig = Rig::new(None);
    let phases = rig.animator.phases().to_vec();
    let mut previous = rig.animator.state();
    for ticks in 1..=1000 {
        let active = phases[previous.phase_index].name().to_string();
        rig.tick();
        let state = rig.animator.state();
        assert!(state.phase_index < phases.len());
        assert!(state.scale_index < phases[state.phase_index].len());
        assert_eq!(state, expected_state(&phases, ticks), "after {ticks} ticks");
        assert_eq!(rig.label.last(), active);
        previous = state;
    }
}

#[test]
fn test_scaling_is_uniform_on_every_target() {
    let mut rig = Rig::new(None);
    for _ in 0..45 {
        rig.tick();
    }
    for target in &rig.targets {
        assert_eq!(target.scales.len(), 45);
        for scale in &target.scales {
            assert_eq!(scale.x, scale.y);
            assert_eq!(scale.y, scale.z);
        }
    }
    assert_eq!(rig.targets[0].scales, rig.targets[1].scales);
}

#[test]
fn test_stops_after_max_beats() {
    let mut rig = Rig::new(Some(2));
    for _ in 0..30 {
        assert!(matches!(rig.tick(), TickOutcome::Advanced { .. }));
    }
    assert_eq!(rig.animator.state().beat_count, 2);
    assert_eq!(rig.animator.stage(), Stage::Running);

    assert_eq!(rig.tick(), TickOutcome::Completed);
    assert_eq!(rig.animator.stage(), Stage::Stopped);
    let frozen = rig.animator.state();
    let redraws = rig.surface.0.get();
    for _ in 0..10 {
        assert_eq!(rig.tick(), TickOutcome::Stopped);
    }
    assert_eq!(rig.animator.state(), frozen);
    assert_eq!(rig.surface.0.get(), redraws);
    assert_eq!(rig.label.texts.len(), 30);
    assert_eq!(rig.targets[0].scales.len(), 30);
}

#[test]
fn test_timer_cancelled_on_completion() {
    let mut rig = Rig::new(Some(1));
    let start = instant::Instant::now();
    let interval = HeartConfig::default().timer_interval();
    let mut timer = RepeatingTimer::new(interval, start);
    let mut now = start;
    for _ in 0..100 {
        now += interval;
        if timer.poll(now) && rig.tick() == TickOutcome::Completed {
            timer.cancel();
        }
    }
    assert!(!timer.is_active());
    assert_eq!(timer.fired(), 16);
    assert_eq!(rig.animator.state().beat_count, 1);
}

#[test]
fn test_durations_do_not_gate_ticks() {
    let mut config = HeartConfig::default();
    config.p_wave_duration = 100.0;
    config.qrs_duration = 0.0;
    config.t_wave_duration = -1.0;
    let mut animator = Animator::new(ecg_phases(&config), None).unwrap();
    let mut targets = [RecordingTarget::default()];
    let mut label = RecordingLabel::default();
    let surface = CountingSurface::default();
    for _ in 0..15 {
        animator.tick(&mut targets, &mut label, &surface);
    }
    assert_eq!(animator.state().beat_count, 1);
    let phases: Vec<&str> = label.texts.iter().map(String::as_str).collect();
    assert_eq!(&phases[..6], &["P", "P", "P", "P", "P", "QRS"]);
}
