//! Orbiting perspective camera for the editor viewport.

use glam::{Mat4, Vec2, Vec3};

use crate::event::{Event, Key, Modifiers, MouseButton};
use crate::time::Timestep;

const ORBIT_SPEED_X: f32 = 0.012;
const ORBIT_SPEED_Y: f32 = 0.009;
const PAN_RATE: f32 = 0.002;
const DRAG_ZOOM_RATE: f32 = 0.02;
const WHEEL_ZOOM_RATE: f32 = 0.01;
const PITCH_LIMIT: f32 = 1.45;
const DISTANCE_MIN: f32 = 0.8;
const DISTANCE_MAX: f32 = 80.0;

const DEFAULT_YAW: f32 = 0.78;
const DEFAULT_PITCH: f32 = 0.42;
const DEFAULT_DISTANCE: f32 = 4.8;

/// Perspective camera orbiting a focal point.
///
/// Input arrives through `on_event` and is parked as pending deltas;
/// `on_update` applies them so all camera motion happens at one point in
/// the frame. Alt + left drag orbits, Alt + middle drag pans, Alt + right
/// drag or the scroll wheel zooms, `R` resets the framing.
#[derive(Debug, Clone)]
pub struct EditorCamera {
    fov_y_deg: f32,
    aspect: f32,
    near: f32,
    far: f32,

    focal_point: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,

    modifiers: Modifiers,
    left_down: bool,
    middle_down: bool,
    right_down: bool,
    last_cursor: Option<Vec2>,

    pending_orbit: Vec2,
    pending_pan: Vec2,
    pending_zoom: f32,
}

impl EditorCamera {
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            aspect,
            near,
            far,
            focal_point: Vec3::ZERO,
            distance: DEFAULT_DISTANCE,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            modifiers: Modifiers::default(),
            left_down: false,
            middle_down: false,
            right_down: false,
            last_cursor: None,
            pending_orbit: Vec2::ZERO,
            pending_pan: Vec2::ZERO,
            pending_zoom: 0.0,
        }
    }

    /// Updates the projection for a new viewport size.
    ///
    /// Degenerate sizes (minimized window, collapsed panel) are rejected;
    /// a zero dimension would make the aspect ratio meaningless.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.aspect = width / height;
    }

    pub fn on_event(&mut self, event: &Event) {
        match *event {
            Event::MouseMoved { x, y } => {
                let cursor = Vec2::new(x, y);
                let delta = match self.last_cursor {
                    Some(last) => cursor - last,
                    None => Vec2::ZERO,
                };
                self.last_cursor = Some(cursor);

                if self.modifiers.alt {
                    if self.left_down {
                        self.pending_orbit += delta;
                    }
                    if self.middle_down {
                        self.pending_pan += delta;
                    }
                    if self.right_down {
                        self.pending_zoom += delta.y * DRAG_ZOOM_RATE;
                    }
                }
            }
            Event::MouseScrolled { dy, .. } => {
                self.pending_zoom -= dy * WHEEL_ZOOM_RATE;
            }
            Event::MouseButtonPressed { button } => self.set_button(button, true),
            Event::MouseButtonReleased { button } => self.set_button(button, false),
            Event::ModifiersChanged(modifiers) => self.modifiers = modifiers,
            Event::KeyPressed { key: Key::R, .. } => self.reset_framing(),
            _ => {}
        }
    }

    /// Applies the input parked since the last update.
    pub fn on_update(&mut self, _ts: Timestep) {
        let orbit = std::mem::take(&mut self.pending_orbit);
        let pan = std::mem::take(&mut self.pending_pan);
        let zoom = std::mem::take(&mut self.pending_zoom);

        self.yaw -= orbit.x * ORBIT_SPEED_X;
        self.pitch = (self.pitch - orbit.y * ORBIT_SPEED_Y).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        if pan != Vec2::ZERO {
            let pan_scale = self.distance * PAN_RATE;
            self.focal_point += self.right() * (-pan.x * pan_scale);
            self.focal_point += Vec3::Y * (pan.y * pan_scale);
        }

        self.distance = (self.distance + zoom * self.distance.max(1.0))
            .clamp(DISTANCE_MIN, DISTANCE_MAX);
    }

    fn set_button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left_down = down,
            MouseButton::Middle => self.middle_down = down,
            MouseButton::Right => self.right_down = down,
        }
    }

    fn reset_framing(&mut self) {
        self.focal_point = Vec3::ZERO;
        self.distance = DEFAULT_DISTANCE;
        self.yaw = DEFAULT_YAW;
        self.pitch = DEFAULT_PITCH;
    }

    fn orbit_direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
    }

    fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.focal_point + self.orbit_direction() * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.focal_point, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn focal_point(&self) -> Vec3 {
        self.focal_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> EditorCamera {
        EditorCamera::new(45.0, 16.0 / 9.0, 0.001, 100.0)
    }

    fn press_alt(camera: &mut EditorCamera) {
        camera.on_event(&Event::ModifiersChanged(Modifiers {
            alt: true,
            ..Default::default()
        }));
    }

    fn drag(camera: &mut EditorCamera, button: MouseButton, from: (f32, f32), to: (f32, f32)) {
        camera.on_event(&Event::MouseMoved {
            x: from.0,
            y: from.1,
        });
        camera.on_event(&Event::MouseButtonPressed { button });
        camera.on_event(&Event::MouseMoved { x: to.0, y: to.1 });
        camera.on_event(&Event::MouseButtonReleased { button });
    }

    #[test]
    fn viewport_size_updates_aspect() {
        let mut camera = camera();
        camera.set_viewport_size(1024.0, 768.0);
        assert_eq!(camera.aspect(), 1024.0 / 768.0);
    }

    #[test]
    fn degenerate_viewport_size_is_rejected() {
        let mut camera = camera();
        let before = camera.aspect();
        camera.set_viewport_size(0.0, 768.0);
        camera.set_viewport_size(1024.0, 0.0);
        assert_eq!(camera.aspect(), before);
    }

    #[test]
    fn alt_left_drag_orbits() {
        let mut camera = camera();
        let eye_before = camera.position();
        press_alt(&mut camera);
        drag(&mut camera, MouseButton::Left, (100.0, 100.0), (160.0, 100.0));
        camera.on_update(Timestep::from_millis(16.0));
        assert!(camera.position().distance(eye_before) > 1e-3);
        // Orbiting keeps the distance to the focal point fixed.
        assert!((camera.position().distance(camera.focal_point()) - camera.distance()).abs() < 1e-4);
    }

    #[test]
    fn drag_without_alt_does_not_orbit() {
        let mut camera = camera();
        let eye_before = camera.position();
        drag(&mut camera, MouseButton::Left, (100.0, 100.0), (160.0, 100.0));
        camera.on_update(Timestep::from_millis(16.0));
        assert_eq!(camera.position(), eye_before);
    }

    #[test]
    fn alt_middle_drag_pans_focal_point() {
        let mut camera = camera();
        press_alt(&mut camera);
        drag(&mut camera, MouseButton::Middle, (0.0, 0.0), (50.0, -20.0));
        camera.on_update(Timestep::from_millis(16.0));
        assert!(camera.focal_point().distance(Vec3::ZERO) > 1e-3);
    }

    #[test]
    fn scroll_zooms_without_modifiers() {
        let mut camera = camera();
        let before = camera.distance();
        camera.on_event(&Event::MouseScrolled { dx: 0.0, dy: 10.0 });
        camera.on_update(Timestep::from_millis(16.0));
        assert!(camera.distance() < before);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = camera();
        for _ in 0..100 {
            camera.on_event(&Event::MouseScrolled { dx: 0.0, dy: 500.0 });
            camera.on_update(Timestep::from_millis(16.0));
        }
        assert!(camera.distance() >= DISTANCE_MIN);
        for _ in 0..100 {
            camera.on_event(&Event::MouseScrolled { dx: 0.0, dy: -500.0 });
            camera.on_update(Timestep::from_millis(16.0));
        }
        assert!(camera.distance() <= DISTANCE_MAX);
    }

    #[test]
    fn pitch_is_clamped_to_avoid_pole_flip() {
        let mut camera = camera();
        press_alt(&mut camera);
        camera.on_event(&Event::MouseMoved { x: 0.0, y: 0.0 });
        camera.on_event(&Event::MouseButtonPressed {
            button: MouseButton::Left,
        });
        camera.on_event(&Event::MouseMoved { x: 0.0, y: -10_000.0 });
        camera.on_update(Timestep::from_millis(16.0));
        // Looking nearly straight down must still keep Y as a usable up axis.
        let view = camera.view_matrix();
        assert!(view.is_finite());
    }

    #[test]
    fn reset_key_restores_default_framing() {
        let mut camera = camera();
        press_alt(&mut camera);
        drag(&mut camera, MouseButton::Middle, (0.0, 0.0), (200.0, 80.0));
        camera.on_event(&Event::MouseScrolled { dx: 0.0, dy: 30.0 });
        camera.on_update(Timestep::from_millis(16.0));
        camera.on_event(&Event::KeyPressed {
            key: Key::R,
            repeat: false,
        });
        camera.on_update(Timestep::from_millis(16.0));
        assert_eq!(camera.focal_point(), Vec3::ZERO);
        assert_eq!(camera.distance(), DEFAULT_DISTANCE);
    }

    #[test]
    fn window_resize_event_is_ignored_by_the_camera() {
        // The shell applies viewport sizes explicitly; the raw event alone
        // must not touch the projection.
        let mut camera = camera();
        let before = camera.aspect();
        camera.on_event(&Event::WindowResize {
            width: 10,
            height: 10,
        });
        assert_eq!(camera.aspect(), before);
    }
}
