//! Mesh data and GPU upload.
//!
//! `MeshData` holds geometry ready for upload: positions, normals, UVs and
//! indices. Uploaded meshes live in the registry and are referenced by
//! handle.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use egui_wgpu::wgpu;
use egui_wgpu::wgpu::util::DeviceExt;
use glam::Vec3;

use crate::context::RenderContext;

/// Vertex as uploaded to the GPU.
///
/// Layout: position (vec3), normal (vec3), texcoord (vec2) = 32 bytes,
/// matching [`crate::shader::LIT_VERTEX_STRIDE`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

/// Mesh geometry ready for upload.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Unit cube centered at the origin.
    ///
    /// Four vertices per face so normals stay flat; counter-clockwise
    /// winding seen from outside.
    pub fn cube() -> Self {
        // (normal, u axis, v axis) per face, with u x v = normal.
        const FACES: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::new(0.0, 0.0, -1.0), Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::new(0.0, 0.0, -1.0)),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::new(-1.0, 0.0, 0.0), Vec3::Y),
        ];
        const CORNERS: [(f32, f32, [f32; 2]); 4] = [
            (-0.5, -0.5, [0.0, 0.0]),
            (0.5, -0.5, [1.0, 0.0]),
            (0.5, 0.5, [1.0, 1.0]),
            (-0.5, 0.5, [0.0, 1.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u_axis, v_axis) in FACES {
            let base = vertices.len() as u32;
            for (u, v, texcoord) in CORNERS {
                let position = normal * 0.5 + u_axis * u + v_axis * v;
                vertices.push(Vertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    texcoord,
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }
}

/// Handle into the renderer's mesh registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle {
    id: u64,
}

impl MeshHandle {
    /// Handle that refers to no mesh; draws with it are skipped.
    pub fn invalid() -> Self {
        Self { id: 0 }
    }

    pub fn is_valid(&self) -> bool {
        self.id != 0
    }
}

impl Default for MeshHandle {
    fn default() -> Self {
        Self::invalid()
    }
}

/// Uploaded vertex and index buffers.
pub struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

/// Owns every mesh the renderer can draw, keyed by handle.
pub struct MeshRegistry {
    meshes: HashMap<u64, GpuMesh>,
    next_id: u64,
}

impl Default for MeshRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshRegistry {
    pub fn new() -> Self {
        Self {
            meshes: HashMap::new(),
            next_id: 1,
        }
    }

    /// Uploads mesh data and returns a handle to draw it with.
    pub fn insert(&mut self, ctx: &RenderContext, label: &str, data: &MeshData) -> MeshHandle {
        let vertex_buffer = ctx
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = ctx
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let id = self.next_id;
        self.next_id += 1;
        self.meshes.insert(
            id,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: data.indices.len() as u32,
            },
        );
        MeshHandle { id }
    }

    pub(crate) fn get(&self, handle: MeshHandle) -> Option<&GpuMesh> {
        self.meshes.get(&handle.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::LIT_VERTEX_STRIDE;

    #[test]
    fn vertex_matches_shader_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), LIT_VERTEX_STRIDE);
    }

    #[test]
    fn cube_has_one_quad_per_face() {
        let cube = MeshData::cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.indices.iter().all(|&i| (i as usize) < 24));
    }

    #[test]
    fn cube_fits_the_unit_box() {
        let cube = MeshData::cube();
        for vertex in &cube.vertices {
            for c in vertex.position {
                assert!(c.abs() <= 0.5 + 1e-6);
            }
        }
    }

    #[test]
    fn cube_normals_are_unit_and_axis_aligned() {
        let cube = MeshData::cube();
        for vertex in &cube.vertices {
            let n = Vec3::from_array(vertex.normal);
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert_eq!(n.abs().max_element(), 1.0);
        }
    }

    #[test]
    fn cube_winding_is_counter_clockwise_seen_from_outside() {
        let cube = MeshData::cube();
        for tri in cube.indices.chunks(3) {
            let a = Vec3::from_array(cube.vertices[tri[0] as usize].position);
            let b = Vec3::from_array(cube.vertices[tri[1] as usize].position);
            let c = Vec3::from_array(cube.vertices[tri[2] as usize].position);
            let face_normal = (b - a).cross(c - a);
            let stored = Vec3::from_array(cube.vertices[tri[0] as usize].normal);
            assert!(
                face_normal.dot(stored) > 0.0,
                "triangle {tri:?} winds against its normal"
            );
        }
    }
}
