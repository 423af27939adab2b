//! Offscreen render target displayed by the viewport panel.

use egui_wgpu::wgpu;

use crate::context::RenderContext;

pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Pixel dimensions of a framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferSpec {
    pub width: u32,
    pub height: u32,
}

impl FramebufferSpec {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero-area targets can neither be rendered to nor sampled.
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// GPU render target whose color attachment egui can display.
///
/// The color view is registered with the UI renderer, so the returned
/// texture id stays valid for `egui::Image` until the next `resize`.
pub struct Framebuffer {
    spec: FramebufferSpec,
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    texture_id: egui::TextureId,
}

impl Framebuffer {
    pub fn new(ctx: &RenderContext, spec: FramebufferSpec) -> Self {
        debug_assert!(spec.is_valid());
        let color_view = create_attachment(
            ctx,
            "framebuffer_color",
            spec,
            COLOR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let depth_view = create_attachment(
            ctx,
            "framebuffer_depth",
            spec,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let texture_id = ctx.register_texture(&color_view);
        Self {
            spec,
            color_view,
            depth_view,
            texture_id,
        }
    }

    /// Recreates the attachments at the new size.
    ///
    /// Degenerate and unchanged sizes are ignored. The old egui texture id
    /// is released and a fresh one registered for the new color attachment.
    pub fn resize(&mut self, ctx: &RenderContext, width: u32, height: u32) {
        let spec = FramebufferSpec::new(width, height);
        if !spec.is_valid() {
            log::warn!("ignoring zero-sized framebuffer resize {width}x{height}");
            return;
        }
        if spec == self.spec {
            return;
        }
        log::debug!("resizing framebuffer to {width}x{height}");

        ctx.unregister_texture(self.texture_id);
        self.color_view = create_attachment(
            ctx,
            "framebuffer_color",
            spec,
            COLOR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        self.depth_view = create_attachment(
            ctx,
            "framebuffer_depth",
            spec,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        self.texture_id = ctx.register_texture(&self.color_view);
        self.spec = spec;
    }

    /// Texture id of the color attachment, for display in the UI.
    pub fn color_attachment(&self) -> egui::TextureId {
        self.texture_id
    }

    pub fn spec(&self) -> FramebufferSpec {
        self.spec
    }

    pub(crate) fn color_view(&self) -> &wgpu::TextureView {
        &self.color_view
    }

    pub(crate) fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }
}

fn create_attachment(
    ctx: &RenderContext,
    label: &str,
    spec: FramebufferSpec,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
) -> wgpu::TextureView {
    let texture = ctx.device().create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: spec.width,
            height: spec.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
