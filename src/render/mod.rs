//! The software rasterizer: frame buffer, gradients, edge walkers, and the
//! render context that ties them together.

pub mod context;
pub mod edge;
pub mod framebuffer;
pub mod gradients;

pub use context::RenderContext;
pub use framebuffer::FrameBuffer;
