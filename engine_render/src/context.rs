//! GPU device access shared with the UI layer.

use egui_wgpu::{RenderState, wgpu};

/// Device, queue and egui texture registration in one clone-cheap handle.
///
/// The editor renders its scene with the same device eframe uses for the
/// UI, so framebuffer attachments can be handed to egui without copies.
#[derive(Clone)]
pub struct RenderContext {
    render_state: RenderState,
}

impl RenderContext {
    /// Wraps the eframe wgpu render state.
    ///
    /// Fails when the shell was started with a non-wgpu backend, in which
    /// case there is no device to render the scene with.
    pub fn new(render_state: Option<&RenderState>) -> Result<Self, String> {
        let render_state = render_state
            .cloned()
            .ok_or_else(|| "no wgpu render state; the editor requires the wgpu backend".to_string())?;
        Ok(Self { render_state })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.render_state.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.render_state.queue
    }

    /// Publishes a texture view to egui and returns the id to draw it with.
    pub fn register_texture(&self, view: &wgpu::TextureView) -> egui::TextureId {
        self.render_state.renderer.write().register_native_texture(
            &self.render_state.device,
            view,
            wgpu::FilterMode::Linear,
        )
    }

    /// Releases a texture id previously handed to egui.
    pub fn unregister_texture(&self, id: egui::TextureId) {
        self.render_state.renderer.write().free_texture(&id);
    }
}
