//! Scene renderer: pipelines, uniforms and the per-frame draw bracket.
//!
//! `begin_scene` uploads camera and light state and opens a cleared render
//! pass on a framebuffer; scene objects then submit their meshes through
//! the returned [`ScenePass`] and `end_scene` submits the recorded work.

use bytemuck::{Pod, Zeroable};
use egui_wgpu::wgpu;
use egui_wgpu::wgpu::util::DeviceExt;
use engine_core::EditorCamera;
use glam::{Mat4, Vec3, Vec4};

use crate::context::RenderContext;
use crate::framebuffer::{COLOR_FORMAT, DEPTH_FORMAT, Framebuffer};
use crate::mesh::{MeshData, MeshHandle, MeshRegistry};
use crate::shader;

/// Per-frame object slot budget of the dynamic uniform buffer.
const MAX_SCENE_OBJECTS: u32 = 16;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_pos: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    tint: [f32; 4],
}

/// Owns the GPU pipelines, uniform buffers and mesh registry.
pub struct Renderer {
    lit_pipeline: wgpu::RenderPipeline,
    sky_pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    object_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    meshes: MeshRegistry,
    cube: MeshHandle,
}

impl Renderer {
    pub fn new(ctx: &RenderContext) -> Self {
        let device = ctx.device();

        let lit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lit_shader"),
            source: wgpu::ShaderSource::Wgsl(shader::LIT_SHADER.into()),
        });
        let sky_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky_shader"),
            source: wgpu::ShaderSource::Wgsl(shader::SKY_SHADER.into()),
        });

        let bind_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(shader::SCENE_UNIFORM_SIZE as u64),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(shader::OBJECT_UNIFORM_SIZE as u64),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: shader::LIT_VERTEX_STRIDE as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 24,
                    shader_location: 2,
                },
            ],
        };

        let lit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lit_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &lit_shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[vertex_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &lit_shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: COLOR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let sky_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &sky_shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &sky_shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: COLOR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                // The sky sits at the far plane; geometry always wins.
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_ubo"),
            contents: &[0_u8; shader::SCENE_UNIFORM_SIZE],
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object_ubo"),
            size: (shader::OBJECT_UNIFORM_STRIDE as u64) * MAX_SCENE_OBJECTS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &object_buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(shader::OBJECT_UNIFORM_SIZE as u64),
                    }),
                },
            ],
        });

        let mut meshes = MeshRegistry::new();
        let cube = meshes.insert(ctx, "cube_mesh", &MeshData::cube());

        Self {
            lit_pipeline,
            sky_pipeline,
            scene_buffer,
            object_buffer,
            bind_group,
            meshes,
            cube,
        }
    }

    /// Handle of the built-in unit cube.
    pub fn cube_mesh(&self) -> MeshHandle {
        self.cube
    }

    /// Opens the draw bracket targeting `target`.
    ///
    /// Uploads the scene-wide uniforms (camera matrices, eye position,
    /// light position) and starts a render pass that clears both
    /// attachments.
    pub fn begin_scene<'a>(
        &'a self,
        ctx: &'a RenderContext,
        target: &Framebuffer,
        camera: &EditorCamera,
        light_pos: Vec3,
        clear_color: [f32; 4],
    ) -> ScenePass<'a> {
        let view_proj = camera.view_projection();
        let uniforms = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            camera_pos: camera.position().extend(1.0).to_array(),
            light_pos: light_pos.extend(1.0).to_array(),
        };
        ctx.queue()
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });
        let pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view(),
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear_color[0] as f64,
                            g: clear_color[1] as f64,
                            b: clear_color[2] as f64,
                            a: clear_color[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: target.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        ScenePass {
            renderer: self,
            ctx,
            pass: Some(pass),
            encoder: Some(encoder),
            object_slot: 0,
        }
    }
}

/// In-flight draw bracket returned by [`Renderer::begin_scene`].
///
/// Dropping the pass submits whatever was recorded, so the bracket cannot
/// leak an unfinished encoder; `end_scene` closes it explicitly.
pub struct ScenePass<'a> {
    renderer: &'a Renderer,
    ctx: &'a RenderContext,
    pass: Option<wgpu::RenderPass<'static>>,
    encoder: Option<wgpu::CommandEncoder>,
    object_slot: u32,
}

impl ScenePass<'_> {
    /// Draws the sky background as a fullscreen triangle.
    pub fn draw_sky(&mut self) {
        let Some(pass) = self.pass.as_mut() else {
            return;
        };
        pass.set_pipeline(&self.renderer.sky_pipeline);
        pass.set_bind_group(0, &self.renderer.bind_group, &[0]);
        pass.draw(0..3, 0..1);
    }

    /// Submits one mesh with the given model transform and tint.
    pub fn draw_mesh(&mut self, mesh: MeshHandle, model: Mat4, tint: Vec4) {
        let Some(pass) = self.pass.as_mut() else {
            return;
        };
        let Some(gpu_mesh) = self.renderer.meshes.get(mesh) else {
            log::warn!("draw of unknown mesh handle {mesh:?}");
            return;
        };
        if self.object_slot >= MAX_SCENE_OBJECTS {
            log::warn!("scene object budget ({MAX_SCENE_OBJECTS}) exceeded; draw skipped");
            return;
        }

        let offset = self.object_slot * shader::OBJECT_UNIFORM_STRIDE as u32;
        let uniforms = ObjectUniforms {
            model: model.to_cols_array_2d(),
            tint: tint.to_array(),
        };
        self.ctx.queue().write_buffer(
            &self.renderer.object_buffer,
            offset as u64,
            bytemuck::bytes_of(&uniforms),
        );

        pass.set_pipeline(&self.renderer.lit_pipeline);
        pass.set_bind_group(0, &self.renderer.bind_group, &[offset]);
        pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
        self.object_slot += 1;
    }

    /// Closes the bracket and submits the recorded commands.
    pub fn end_scene(self) {}
}

impl Drop for ScenePass<'_> {
    fn drop(&mut self) {
        // The pass must end before the encoder can finish.
        self.pass.take();
        if let Some(encoder) = self.encoder.take() {
            self.ctx.queue().submit(std::iter::once(encoder.finish()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_structs_match_the_documented_layout() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), shader::SCENE_UNIFORM_SIZE);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), shader::OBJECT_UNIFORM_SIZE);
    }
}
