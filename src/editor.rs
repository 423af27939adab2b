//! The editor layer: per-frame update, event handling and the UI pass.
//!
//! Driven by the shell once per frame in the fixed order
//! events -> update -> UI. The update phase renders the scene into an
//! offscreen framebuffer; the UI phase presents that framebuffer inside a
//! dockable viewport panel next to the settings and statistics panels.

use eframe::egui;
use egui_dock::{DockArea, DockState, NodeIndex};
use engine_core::{EditorCamera, Event, FrameStats, Timestep};
use engine_render::{Framebuffer, FramebufferSpec, RenderContext, Renderer};
use glam::{Vec3, Vec4};

use crate::input::InputGate;
use crate::objects::{Cube, Skybox};

const CLEAR_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
const INITIAL_TARGET: FramebufferSpec = FramebufferSpec::new(1280, 720);
const CUBE_SPIN_RATE: f32 = 0.6;

/// One-shot viewport resize request.
///
/// The UI pass observes panel size changes and parks them here; the next
/// update applies the size before anything is drawn, so the render target
/// never changes dimensions mid-frame. The size only exists while a resize
/// is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingResize {
    Idle,
    Pending { width: u32, height: u32 },
}

impl PendingResize {
    /// Records a newly observed panel size, replacing any parked one.
    pub fn observe(&mut self, width: u32, height: u32) {
        *self = Self::Pending { width, height };
    }

    /// Takes the parked size and returns the state to idle.
    pub fn take(&mut self) -> Option<(u32, u32)> {
        match std::mem::replace(self, Self::Idle) {
            Self::Idle => None,
            Self::Pending { width, height } => Some((width, height)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorTab {
    Viewport,
    SceneSettings,
    CameraControls,
    PerformanceStats,
}

/// Scene state, render target and panel state of the editor.
pub struct EditorLayer {
    ctx: RenderContext,
    renderer: Renderer,
    framebuffer: Framebuffer,
    camera: EditorCamera,
    cube: Cube,
    floor: Cube,
    skybox: Skybox,
    light_pos: Vec3,
    stats: FrameStats,

    viewport_panel_size: egui::Vec2,
    pending_resize: PendingResize,
    viewport_focused: bool,
    viewport_hovered: bool,
    dock_state: DockState<EditorTab>,
    close_requested: bool,
}

impl EditorLayer {
    pub fn new(ctx: RenderContext) -> Self {
        let renderer = Renderer::new(&ctx);
        let framebuffer = Framebuffer::new(&ctx, INITIAL_TARGET);
        let camera = EditorCamera::new(45.0, 16.0 / 9.0, 0.001, 100.0);

        let cube = Cube::new(
            renderer.cube_mesh(),
            Vec3::ZERO,
            Vec3::ONE,
            Vec4::new(0.8, 0.35, 0.2, 1.0),
        )
        .with_spin(CUBE_SPIN_RATE);
        let floor = Cube::new(
            renderer.cube_mesh(),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(2.0, 0.1, 2.0),
            Vec4::new(0.55, 0.55, 0.58, 1.0),
        );

        let mut dock_state = DockState::new(vec![EditorTab::Viewport]);
        let surface = dock_state.main_surface_mut();
        let [_, side] = surface.split_right(
            NodeIndex::root(),
            0.75,
            vec![EditorTab::SceneSettings, EditorTab::CameraControls],
        );
        surface.split_below(side, 0.55, vec![EditorTab::PerformanceStats]);

        Self {
            ctx,
            renderer,
            framebuffer,
            camera,
            cube,
            floor,
            skybox: Skybox::new(),
            light_pos: Vec3::new(-1.0, 2.0, 1.5),
            stats: FrameStats::new(),
            viewport_panel_size: egui::Vec2::ZERO,
            pending_resize: PendingResize::Idle,
            viewport_focused: false,
            viewport_hovered: false,
            dock_state,
            close_requested: false,
        }
    }

    pub fn on_update(&mut self, ts: Timestep) {
        // Service a parked viewport resize strictly before any drawing
        // touches the target.
        if let Some((width, height)) = self.pending_resize.take() {
            self.camera.set_viewport_size(width as f32, height as f32);
            self.framebuffer.resize(&self.ctx, width, height);
        }

        self.stats.tick(ts);

        self.camera.on_update(ts);
        self.cube.on_update(ts);

        let mut pass = self.renderer.begin_scene(
            &self.ctx,
            &self.framebuffer,
            &self.camera,
            self.light_pos,
            CLEAR_COLOR,
        );
        self.skybox.render(&mut pass);
        self.cube.render(&mut pass);
        self.floor.render(&mut pass);
        pass.end_scene();
    }

    pub fn on_event(&mut self, event: &Event) {
        if let Event::WindowResize { width, height } = *event {
            self.on_window_resize(width, height);
        }
        self.camera.on_event(event);
        self.cube.on_event(event);
    }

    /// Window-level resize. Zero dimensions signal a minimized window and
    /// leave the camera untouched.
    fn on_window_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.set_viewport_size(width as f32, height as f32);
    }

    pub fn on_ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        self.close_requested = true;
                        ui.close();
                    }
                });
            });
        });

        let mut viewer = PanelViewer {
            framebuffer: &self.framebuffer,
            light_pos: &mut self.light_pos,
            stats: &self.stats,
            viewport_panel_size: &mut self.viewport_panel_size,
            pending_resize: &mut self.pending_resize,
            viewport_focused: &mut self.viewport_focused,
            viewport_hovered: &mut self.viewport_hovered,
        };
        DockArea::new(&mut self.dock_state)
            .style(egui_dock::Style::from_egui(ctx.style().as_ref()))
            .show(ctx, &mut viewer);
    }

    /// Input gating for the shell, derived from the previous UI pass.
    pub fn input_gate(&self) -> InputGate {
        InputGate {
            block_keys: !self.viewport_focused,
            block_pointer: !self.viewport_hovered,
        }
    }

    /// True once after `File -> Exit` was clicked.
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }
}

/// Per-tab UI, borrowing only what the panels touch.
struct PanelViewer<'a> {
    framebuffer: &'a Framebuffer,
    light_pos: &'a mut Vec3,
    stats: &'a FrameStats,
    viewport_panel_size: &'a mut egui::Vec2,
    pending_resize: &'a mut PendingResize,
    viewport_focused: &'a mut bool,
    viewport_hovered: &'a mut bool,
}

impl PanelViewer<'_> {
    fn viewport_ui(&mut self, ui: &mut egui::Ui) {
        let panel_size = ui.available_size();
        if panel_size != *self.viewport_panel_size && panel_size.x > 0.0 && panel_size.y > 0.0 {
            *self.viewport_panel_size = panel_size;
            self.pending_resize
                .observe(panel_size.x as u32, panel_size.y as u32);
        }

        // The render target's row order is the inverse of the UI image
        // convention, hence the flipped V coordinates.
        let image = egui::Image::from_texture(egui::load::SizedTexture::new(
            self.framebuffer.color_attachment(),
            panel_size,
        ))
        .uv(egui::Rect::from_min_max(
            egui::pos2(0.0, 1.0),
            egui::pos2(1.0, 0.0),
        ))
        .sense(egui::Sense::click());
        let response = ui.add(image);

        if response.clicked() {
            response.request_focus();
        }
        *self.viewport_hovered = response.hovered();
        *self.viewport_focused = response.has_focus();
    }

    fn scene_settings_ui(&mut self, ui: &mut egui::Ui) {
        ui.label("Light Position");
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut self.light_pos.x).speed(0.01).prefix("x: "));
            ui.add(egui::DragValue::new(&mut self.light_pos.y).speed(0.01).prefix("y: "));
            ui.add(egui::DragValue::new(&mut self.light_pos.z).speed(0.01).prefix("z: "));
        });
    }

    fn camera_controls_ui(ui: &mut egui::Ui) {
        ui.label("Left Alt + LMB to Orbit");
        ui.label("Left Alt + MMB to Pan");
        ui.label("Left Alt + RMB to Zoom");
        ui.label("Scroll to Zoom");
        ui.label("R to Reset Framing");
        ui.separator();
        ui.label("Space to Toggle Cube Spin");
    }

    fn performance_ui(&mut self, ui: &mut egui::Ui) {
        match self.stats.snapshot() {
            Some(snapshot) => {
                ui.label(format!("MSPF: {:.2}", snapshot.millis_per_frame()));
                ui.label(format!("SPF: {:.4}", snapshot.seconds_per_frame()));
                ui.label(format!("FPS: {}", snapshot.fps().round() as u32));
            }
            None => {
                ui.label("Collecting samples...");
            }
        }
    }
}

impl egui_dock::TabViewer for PanelViewer<'_> {
    type Tab = EditorTab;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        match tab {
            EditorTab::Viewport => "Viewport".into(),
            EditorTab::SceneSettings => "Scene Settings".into(),
            EditorTab::CameraControls => "Camera Controls".into(),
            EditorTab::PerformanceStats => "Performance Statistics".into(),
        }
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            EditorTab::Viewport => self.viewport_ui(ui),
            EditorTab::SceneSettings => self.scene_settings_ui(ui),
            EditorTab::CameraControls => Self::camera_controls_ui(ui),
            EditorTab::PerformanceStats => self.performance_ui(ui),
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_starts_idle_and_takes_nothing() {
        let mut resize = PendingResize::Idle;
        assert_eq!(resize.take(), None);
        assert_eq!(resize, PendingResize::Idle);
    }

    #[test]
    fn observed_size_is_taken_exactly_once() {
        let mut resize = PendingResize::Idle;
        resize.observe(1024, 768);
        assert_eq!(resize.take(), Some((1024, 768)));
        // Serviced: the next update sees nothing to apply.
        assert_eq!(resize.take(), None);
    }

    #[test]
    fn later_observation_wins_before_servicing() {
        let mut resize = PendingResize::Idle;
        resize.observe(800, 600);
        resize.observe(1024, 768);
        assert_eq!(resize.take(), Some((1024, 768)));
    }
}
