//! Math primitives for the rendering pipeline.
//!
//! Plain `Copy` value types with operator overloads. Vectors are column
//! vectors; matrices multiply on the left (`Mat4 * Vec4`).

pub mod mat4;
pub mod quat;
pub mod vec2;
pub mod vec3;
pub mod vec4;

/// Threshold below which a squared length is treated as zero.
///
/// Used to guard every division by a vector or quaternion length.
pub const NEAR_ZERO: f32 = 1e-12;
