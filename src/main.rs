// src/main.rs
mod editor;
mod input;
mod objects;

use eframe::{App, Frame, NativeOptions, egui};
use engine_core::{Event, FrameClock};
use engine_render::RenderContext;

use editor::EditorLayer;

/// Editor shell: owns the frame clock and drives the layer's
/// events -> update -> UI sequence once per eframe tick.
struct EditorApp {
    layer: EditorLayer,
    clock: FrameClock,
    last_modifiers: egui::Modifiers,
    last_window_size: egui::Vec2,
}

impl EditorApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, String> {
        let ctx = RenderContext::new(cc.wgpu_render_state.as_ref())?;
        log::info!("editor started");
        Ok(Self {
            layer: EditorLayer::new(ctx),
            clock: FrameClock::new(),
            last_modifiers: egui::Modifiers::default(),
            last_window_size: egui::Vec2::ZERO,
        })
    }

    /// Drains egui input into engine events, honoring the layer's gate.
    ///
    /// Window-size and modifier changes are synthesized from egui state so
    /// the layer sees them as ordinary events.
    fn gather_events(&mut self, ctx: &egui::Context) -> Vec<Event> {
        let gate = self.layer.input_gate();
        let (raw_events, modifiers, window_size) =
            ctx.input(|i| (i.events.clone(), i.modifiers, i.screen_rect().size()));

        let mut events = Vec::new();

        if modifiers != self.last_modifiers {
            self.last_modifiers = modifiers;
            events.push(Event::ModifiersChanged(input::translate_modifiers(
                modifiers,
            )));
        }

        if window_size != self.last_window_size {
            self.last_window_size = window_size;
            events.push(Event::WindowResize {
                width: window_size.x.max(0.0) as u32,
                height: window_size.y.max(0.0) as u32,
            });
        }

        events.extend(
            raw_events
                .iter()
                .filter_map(input::translate_event)
                .filter(|event| gate.allows(event)),
        );
        events
    }
}

impl App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        for event in self.gather_events(ctx) {
            self.layer.on_event(&event);
        }

        let ts = self.clock.tick();
        self.layer.on_update(ts);
        self.layer.on_ui(ctx);

        if self.layer.take_close_request() {
            log::info!("exit requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // The scene animates without input; keep the frame loop running.
        ctx.request_repaint();
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Lucent Editor")
            .with_inner_size([1600.0, 900.0]),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Lucent Editor",
        options,
        Box::new(|cc| {
            let app = EditorApp::new(cc)?;
            Ok(Box::new(app))
        }),
    )
}
