//! Software rasterizer for the particle scene
//!
//! # Module Organization
//!
//! - `types` - Color and BlendMode
//! - `math` - Vec3, Mat4 and rotation helpers
//! - `camera` - Perspective camera with projection
//! - `render` - Framebuffer and splat/line drawing
//! - `ray` - Pointer-to-ray conversion and sphere intersection

pub mod camera;
pub mod math;
pub mod ray;
pub mod render;
pub mod types;

// Types - core data structures
pub use types::{BlendMode, Color};

// Math - vectors and matrices
pub use math::{
    Vec3, Mat4,
    mat4_identity, mat4_translation, mat4_rotation_y, mat4_scale,
    mat4_mul, mat4_transform_point, rotate_y,
};

// Camera
pub use camera::Camera;

// Render - framebuffer
pub use render::Framebuffer;

// Ray utilities
pub use ray::{Ray, pointer_to_ndc, screen_to_ray, ray_sphere_intersection};
