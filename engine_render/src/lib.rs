//! Engine render - offscreen scene rendering for the editor viewport
//!
//! Wraps the GPU device shared with the UI layer, owns mesh geometry and
//! pipelines, and draws the scene into a framebuffer the UI displays as an
//! image.

pub mod context;
pub mod framebuffer;
pub mod mesh;
pub mod renderer;
pub mod shader;

pub use context::*;
pub use framebuffer::*;
pub use mesh::*;
pub use renderer::*;
pub use shader::*;
