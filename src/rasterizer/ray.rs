//! Ray casting utilities for 3D picking
//!
//! Inverts the camera projection so a pointer position becomes a world ray,
//! and intersects rays with the spherical hit volumes used by acupoints.

use super::camera::Camera;
use super::math::Vec3;

/// A 3D ray with origin and direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,  // Normalized
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize()
        }
    }

    /// Get point at distance t along ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Convert a pointer position (window pixels, origin top-left) into
/// normalized device coordinates in [-1, 1] with +Y up.
pub fn pointer_to_ndc(x: f32, y: f32, screen_width: f32, screen_height: f32) -> (f32, f32) {
    if screen_width <= 0.0 || screen_height <= 0.0 {
        return (0.0, 0.0);
    }
    (
        (x / screen_width) * 2.0 - 1.0,
        -(y / screen_height) * 2.0 + 1.0,
    )
}

/// Generate a ray from normalized device coordinates through the camera.
///
/// This inverts `Camera::project`: a point at camera-space depth `d` lands on
/// `ndc = (x / (d * tan * aspect), y / (d * tan))`, so the direction at unit
/// depth is `forward + right * ndc_x * tan * aspect + up * ndc_y * tan`.
pub fn screen_to_ray(ndc_x: f32, ndc_y: f32, camera: &Camera) -> Ray {
    let t = camera.tan_half_fov();
    let dir = camera.basis_z
        + camera.basis_x * (ndc_x * t * camera.aspect)
        + camera.basis_y * (ndc_y * t);
    Ray::new(camera.position, dir)
}

/// Find the first intersection of a ray with a sphere.
///
/// Returns the distance along the ray to the entry point, or the exit point
/// when the ray starts inside the sphere. None if the sphere is missed or
/// lies entirely behind the ray origin.
pub fn ray_sphere_intersection(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    if radius <= 0.0 {
        return None;
    }

    let oc = ray.origin - center;
    // direction is normalized, so a = 1
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_d;
    if far >= 0.0 {
        return Some(far);
    }
    None
}
