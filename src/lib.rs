//! A CPU-based software-rendered 3D graphics pipeline.
//!
//! Textured triangle meshes go through camera transform, homogeneous
//! clipping, and a perspective-correct scanline rasterizer into a
//! z-buffered frame buffer. SDL2 is used only to put the finished pixels
//! on screen; all rendering happens on the CPU, with triangles of each
//! draw call spread across a rayon worker pool.
//!
//! # Quick Start
//!
//! ```ignore
//! use softscan::prelude::*;
//!
//! let light = DirectionalLight::new(Vec3::new(0.0, -0.5, 1.0));
//! let context = RenderContext::new(800, 600, light);
//! let cube = Mesh::unit_cube();
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod light;
pub mod math;
pub mod mesh;
pub mod obj;
pub mod projection;
pub mod texture;
pub mod transform;
pub mod vertex;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod clipper;
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use mesh::Mesh;
pub use obj::{IndexedModel, ObjError, ObjModel};
pub use projection::Projection;
pub use render::RenderContext;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softscan::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraController};

    // Scene
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::Mesh;
    pub use crate::projection::Projection;
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;
    pub use crate::vertex::Vertex;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::quat::Quat;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::RenderContext;

    // Window & Input
    pub use crate::window::{
        FpsCounter, FrameLimiter, InputState, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH,
    };
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{FrameBuffer, RenderContext};
}
