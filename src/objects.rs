//! Scene objects rendered into the viewport framebuffer.

use engine_core::{Event, Key, Timestep, Transform};
use engine_render::{MeshHandle, ScenePass};
use glam::{Vec3, Vec4};

/// Lit cube with an optional idle spin.
pub struct Cube {
    transform: Transform,
    tint: Vec4,
    mesh: MeshHandle,
    spin_rate: f32,
    spinning: bool,
}

impl Cube {
    pub fn new(mesh: MeshHandle, position: Vec3, scale: Vec3, tint: Vec4) -> Self {
        Self {
            transform: Transform::from_position(position).with_scale(scale),
            tint,
            mesh,
            spin_rate: 0.0,
            spinning: false,
        }
    }

    /// Enables the idle spin at `rate` radians per second around +Y.
    pub fn with_spin(mut self, rate: f32) -> Self {
        self.spin_rate = rate;
        self.spinning = true;
        self
    }

    pub fn on_update(&mut self, ts: Timestep) {
        if self.spinning && self.spin_rate != 0.0 {
            self.transform.rotate_y(self.spin_rate * ts.seconds());
        }
    }

    /// Space toggles the idle spin; key repeats are ignored.
    pub fn on_event(&mut self, event: &Event) {
        if let Event::KeyPressed {
            key: Key::Space,
            repeat: false,
        } = event
        {
            self.spinning = !self.spinning;
        }
    }

    pub fn render(&self, pass: &mut ScenePass<'_>) {
        pass.draw_mesh(self.mesh, self.transform.to_mat4(), self.tint);
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

/// Background sky, drawn before any geometry.
pub struct Skybox;

impl Skybox {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, pass: &mut ScenePass<'_>) {
        pass.draw_sky();
    }
}

impl Default for Skybox {
    fn default() -> Self {
        Self::new()
    }
}
