//! Perspective camera
//!
//! Holds the view position and projection parameters. The basis vectors are
//! recomputed by `look_at`; `set_viewport` only touches the aspect ratio so it
//! can run between frames without disturbing anything in the scene.

use super::math::Vec3;

/// A world point projected into framebuffer space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Framebuffer x (pixels, left to right)
    pub x: f32,
    /// Framebuffer y (pixels, top to bottom)
    pub y: f32,
    /// Camera-space depth along the view direction
    pub depth: f32,
}

/// Camera state for 3D rendering and picking
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Viewport width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    // Computed basis vectors
    /// Right
    pub basis_x: Vec3,
    /// Up
    pub basis_y: Vec3,
    /// Forward (into the scene)
    pub basis_z: Vec3,
}

impl Camera {
    /// Create a perspective camera at the origin looking down -Z
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            fov_y: fov_y_degrees.to_radians(),
            aspect: sanitize_aspect(aspect),
            near,
            far,
            basis_x: Vec3::new(1.0, 0.0, 0.0),
            basis_y: Vec3::new(0.0, 1.0, 0.0),
            basis_z: Vec3::new(0.0, 0.0, -1.0),
        }
    }

    /// Point the camera at a world position (world +Y stays up)
    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).normalize();
        if forward == Vec3::ZERO {
            return;
        }
        let mut right = forward.cross(Vec3::UP).normalize();
        if right == Vec3::ZERO {
            // Looking straight up or down, any horizontal right vector works
            right = Vec3::new(1.0, 0.0, 0.0);
        }
        self.basis_z = forward;
        self.basis_x = right;
        self.basis_y = right.cross(forward);
    }

    /// Update the projection for a new viewport size
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = sanitize_aspect(width / height);
        }
    }

    /// tan(fov_y / 2), the half-height of the view frustum at unit depth
    pub fn tan_half_fov(&self) -> f32 {
        (self.fov_y * 0.5).tan()
    }

    /// World position to camera space (x right, y up, z depth)
    pub fn to_camera_space(&self, world: Vec3) -> Vec3 {
        let rel = world - self.position;
        Vec3::new(rel.dot(self.basis_x), rel.dot(self.basis_y), rel.dot(self.basis_z))
    }

    /// Project a world point to framebuffer coordinates.
    /// Returns None for points in front of the near plane or past the far plane.
    pub fn project(&self, world: Vec3, fb_width: usize, fb_height: usize) -> Option<Projected> {
        let cam = self.to_camera_space(world);
        if cam.z <= self.near || cam.z > self.far {
            return None;
        }

        let t = self.tan_half_fov();
        let ndc_x = cam.x / (cam.z * t * self.aspect);
        let ndc_y = cam.y / (cam.z * t);

        Some(Projected {
            x: (ndc_x + 1.0) * 0.5 * fb_width as f32,
            y: (1.0 - ndc_y) * 0.5 * fb_height as f32,
            depth: cam.z,
        })
    }

    /// How many framebuffer pixels one world unit covers at a given depth
    pub fn pixels_per_unit(&self, depth: f32, fb_height: usize) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        (fb_height as f32 * 0.5) / (depth * self.tan_half_fov())
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_camera() -> Camera {
        let mut cam = Camera::perspective(75.0, 4.0 / 3.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 4.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    #[test]
    fn test_look_at_origin_basis() {
        let cam = front_camera();
        assert!(cam.basis_z.distance(Vec3::new(0.0, 0.0, -1.0)) < 1e-6);
        assert!(cam.basis_x.distance(Vec3::new(1.0, 0.0, 0.0)) < 1e-6);
        assert!(cam.basis_y.distance(Vec3::new(0.0, 1.0, 0.0)) < 1e-6);
    }

    #[test]
    fn test_project_origin_is_center() {
        let cam = front_camera();
        let p = cam.project(Vec3::ZERO, 640, 480).expect("origin is visible");
        assert!((p.x - 320.0).abs() < 1e-3);
        assert!((p.y - 240.0).abs() < 1e-3);
        assert!((p.depth - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_project_up_is_screen_up() {
        let cam = front_camera();
        let p = cam.project(Vec3::new(0.0, 1.0, 0.0), 640, 480).unwrap();
        assert!(p.y < 240.0);
        let q = cam.project(Vec3::new(1.0, 0.0, 0.0), 640, 480).unwrap();
        assert!(q.x > 320.0);
    }

    #[test]
    fn test_project_behind_camera() {
        let cam = front_camera();
        assert!(cam.project(Vec3::new(0.0, 0.0, 5.0), 640, 480).is_none());
    }

    #[test]
    fn test_set_viewport_ignores_degenerate() {
        let mut cam = front_camera();
        cam.set_viewport(1920.0, 1080.0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-5);
        cam.set_viewport(100.0, 0.0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-5);
    }
}
