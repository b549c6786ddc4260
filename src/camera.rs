use glam::{Mat4, Quat, Vec3};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

const VIEW_ANGLE_DEGREES: f32 = 30.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;
const SPEED: Vec3 = Vec3::new(0.5, 0.4, 0.01);
const LINE_SCROLL_PIXELS: f32 = 40.0;
const MIN_DISTANCE: f32 = 0.5;

pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub moving_mouse: PhysicalPosition<f64>,
    pub pressed_mouse: Option<PhysicalPosition<f64>>,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            moving_mouse: PhysicalPosition::new(0.0, 0.0),
            pressed_mouse: None,
        }
    }

    /// Look down -Z at the origin from far enough away to see a sphere of `radius`
    pub fn reset(&mut self, radius: f32) {
        let half_angle = (VIEW_ANGLE_DEGREES / 2.0).to_radians();
        let distance = radius.max(f32::EPSILON) / half_angle.sin();
        self.look_at = Vec3::ZERO;
        self.up = Vec3::Y;
        self.position = Vec3::new(0.0, 0.0, distance);
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.look_at)
    }

    pub fn window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.pressed_mouse = Some(self.moving_mouse),
                ElementState::Released => self.pressed_mouse = None,
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.moving_mouse = *position;
                if let Some(rotation) = self.rotation() {
                    self.position = self.look_at + rotation * (self.position - self.look_at);
                    self.up = (rotation * self.up).normalize();
                    self.pressed_mouse = Some(self.moving_mouse);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let pixels = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y * LINE_SCROLL_PIXELS,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                self.zoom(pixels * SPEED.z);
            }
            _ => {}
        }
    }

    /// Positive moves towards the target, never closer than a minimum distance
    pub fn zoom(&mut self, fraction: f32) {
        let gaze = self.look_at - self.position;
        let distance = gaze.length() * (1.0 - fraction);
        if distance > MIN_DISTANCE {
            self.position = self.look_at - gaze.normalize() * distance;
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, self.up)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(VIEW_ANGLE_DEGREES.to_radians(), self.aspect, NEAR, FAR)
    }

    fn rotation(&self) -> Option<Quat> {
        let (dx, dy) = self.angles()?;
        let gaze = (self.look_at - self.position).normalize();
        let side = gaze.cross(self.up).normalize_or_zero();
        let around_up = Quat::from_axis_angle(self.up, dx);
        if side == Vec3::ZERO {
            return Some(around_up);
        }
        Some(around_up * Quat::from_axis_angle(side, dy))
    }

    fn angles(&self) -> Option<(f32, f32)> {
        let pressed = self.pressed_mouse?;
        let PhysicalPosition { x, y } = self.moving_mouse;
        let dx = (pressed.x - x) as f32;
        let dy = (pressed.y - y) as f32;
        Some(((dx * SPEED.x).to_radians(), (dy * SPEED.y).to_radians()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_frames_radius() {
        let mut camera = Camera::new(800.0 / 600.0);
        camera.reset(5.0);
        let expected = 5.0 / 15f32.to_radians().sin();
        assert!((camera.distance() - expected).abs() < 1e-3);
        assert_eq!(camera.look_at, Vec3::ZERO);
        assert!(camera.position.x.abs() < 1e-6 && camera.position.z > 0.0);
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let mut camera = Camera::new(1.0);
        camera.reset(2.0);
        let clip = camera.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_zoom_keeps_minimum_distance() {
        let mut camera = Camera::new(1.0);
        camera.reset(1.0);
        let before = camera.distance();
        camera.zoom(0.5);
        assert!((camera.distance() - before * 0.5).abs() < 1e-4);
        camera.zoom(0.999);
        assert!(camera.distance() > MIN_DISTANCE);
    }
}
