//! WGSL shaders for the scene renderer.

/// Scene-wide uniforms (bind group 0, binding 0):
///   - view_proj: mat4x4<f32>      (64 bytes)
///   - inv_view_proj: mat4x4<f32>  (64 bytes)
///   - camera_pos: vec4<f32>       (16 bytes)
///   - light_pos: vec4<f32>        (16 bytes)
///   Total = 160 bytes
pub const SCENE_UNIFORM_SIZE: usize = 160;

/// Per-object uniforms (bind group 0, binding 1, dynamic offset):
///   - model: mat4x4<f32> (64 bytes)
///   - tint: vec4<f32>    (16 bytes)
///   Total = 80 bytes per slot
pub const OBJECT_UNIFORM_SIZE: usize = 80;

/// Dynamic-offset stride per object slot. wgpu requires 256-byte alignment
/// for dynamic uniform offsets on all backends.
pub const OBJECT_UNIFORM_STRIDE: usize = 256;

/// Stride of a single vertex in bytes: pos(12) + normal(12) + uv(8) = 32.
pub const LIT_VERTEX_STRIDE: usize = 32;

/// Lit shader - Blinn-Phong with a point light at the scene light position.
pub const LIT_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    light_pos: vec4<f32>,
};

struct ObjectUniforms {
    model: mat4x4<f32>,
    tint: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;
@group(0) @binding(1)
var<uniform> object: ObjectUniforms;

struct VsIn {
    @location(0) pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VsOut {
    @builtin(position) clip_pos: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(v: VsIn) -> VsOut {
    var out: VsOut;
    let world = object.model * vec4<f32>(v.pos, 1.0);
    out.clip_pos = scene.view_proj * world;
    out.world_pos = world.xyz;
    // Assumes uniform scale; otherwise use the inverse-transpose.
    out.world_normal = normalize((object.model * vec4<f32>(v.normal, 0.0)).xyz);
    out.uv = v.uv;
    return out;
}

@fragment
fn fs_main(v: VsOut) -> @location(0) vec4<f32> {
    let n = normalize(v.world_normal);
    let l = normalize(scene.light_pos.xyz - v.world_pos);
    let view_dir = normalize(scene.camera_pos.xyz - v.world_pos);

    let ambient = 0.15;
    let diffuse = max(dot(n, l), 0.0) * 0.7;

    // Specular (Blinn half-vector)
    let half_dir = normalize(l + view_dir);
    let specular = pow(max(dot(n, half_dir), 0.0), 32.0) * 0.25;

    let shade = clamp(ambient + diffuse + specular, 0.0, 1.2);
    let color = object.tint.rgb * shade;
    return vec4<f32>(color, object.tint.a);
}
"#;

/// Sky shader - fullscreen triangle unprojected into a vertical gradient.
///
/// Emitted at the far plane with depth writes off, so geometry drawn
/// afterwards always wins the depth test.
pub const SKY_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    light_pos: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

struct VsOut {
    @builtin(position) clip_pos: vec4<f32>,
    @location(0) near_point: vec3<f32>,
    @location(1) far_point: vec3<f32>,
};

fn unproject(p: vec3<f32>) -> vec3<f32> {
    let r = scene.inv_view_proj * vec4<f32>(p, 1.0);
    return r.xyz / r.w;
}

@vertex
fn vs_main(@builtin(vertex_index) idx: u32) -> VsOut {
    // Fullscreen triangle
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0), vec2<f32>(3.0, -1.0), vec2<f32>(-1.0, 3.0),
    );
    let p = positions[idx];
    var out: VsOut;
    out.clip_pos = vec4<f32>(p, 1.0, 1.0);
    out.near_point = unproject(vec3<f32>(p, 0.0));
    out.far_point = unproject(vec3<f32>(p, 1.0));
    return out;
}

@fragment
fn fs_main(v: VsOut) -> @location(0) vec4<f32> {
    let dir = normalize(v.far_point - v.near_point);
    let horizon = vec3<f32>(0.64, 0.69, 0.76);
    let zenith = vec3<f32>(0.17, 0.26, 0.45);
    let ground = vec3<f32>(0.22, 0.20, 0.19);

    var color: vec3<f32>;
    if (dir.y >= 0.0) {
        color = mix(horizon, zenith, pow(clamp(dir.y, 0.0, 1.0), 0.8));
    } else {
        color = mix(horizon, ground, min(-dir.y * 3.0, 1.0));
    }
    return vec4<f32>(color, 1.0);
}
"#;
