//! Transform Components
//!
//! Two-tier transforms for the point group hierarchy:
//! - Transform: local position / Y rotation / uniform scale relative to the parent
//! - GlobalTransform: the composed world matrix used for picking and drawing
//!
//! For nodes with parents, GlobalTransform = parent.GlobalTransform * self.Transform

use crate::rasterizer::{
    Vec3, Mat4, mat4_identity, mat4_mul, mat4_rotation_y, mat4_scale, mat4_transform_point,
    mat4_translation,
};

/// Local transform relative to parent (or world if no parent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation about Y in radians
    pub rotation_y: f32,
    /// Scale factor (uniform)
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation_y: 0.0,
        scale: 1.0,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Translation * RotationY * Scale
    pub fn to_matrix(&self) -> Mat4 {
        let rs = mat4_mul(&mat4_rotation_y(self.rotation_y), &mat4_scale(self.scale));
        mat4_mul(&mat4_translation(self.position), &rs)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// World-space transform, recomputed from the hierarchy each time it is needed
#[derive(Debug, Clone, Copy)]
pub struct GlobalTransform {
    matrix: Mat4,
}

impl GlobalTransform {
    pub fn identity() -> Self {
        Self { matrix: mat4_identity() }
    }

    /// For root nodes
    pub fn from_transform(transform: &Transform) -> Self {
        Self { matrix: transform.to_matrix() }
    }

    /// Compute child's global transform from parent's global and child's local
    pub fn from_parent_and_local(parent: &GlobalTransform, local: &Transform) -> Self {
        Self {
            matrix: mat4_mul(&parent.matrix, &local.to_matrix()),
        }
    }

    /// World position (translation component)
    pub fn position(&self) -> Vec3 {
        self.transform_point(Vec3::ZERO)
    }

    /// Uniform scale, read back from the X basis column
    pub fn scale(&self) -> f32 {
        Vec3::new(self.matrix[0][0], self.matrix[1][0], self.matrix[2][0]).len()
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        mat4_transform_point(&self.matrix, point)
    }
}

impl Default for GlobalTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::rotate_y;

    #[test]
    fn test_identity_is_noop() {
        let g = GlobalTransform::from_transform(&Transform::IDENTITY);
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(g.transform_point(p).distance(p) < 1e-6);
        assert!((g.scale() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_child_follows_rotating_parent() {
        let parent = GlobalTransform::from_transform(&Transform { rotation_y: 0.7, ..Transform::IDENTITY });
        let local = Transform::from_position(Vec3::new(0.8, 0.0, 0.2));
        let child = GlobalTransform::from_parent_and_local(&parent, &local);
        let expected = rotate_y(local.position, 0.7);
        assert!(child.position().distance(expected) < 1e-5);
    }

    #[test]
    fn test_scale_composes() {
        let parent = GlobalTransform::from_transform(&Transform { rotation_y: 1.1, ..Transform::IDENTITY });
        let core = GlobalTransform::from_parent_and_local(&parent, &Transform::from_position(Vec3::new(0.0, 1.8, 0.0)));
        let glow = GlobalTransform::from_parent_and_local(&core, &Transform { scale: 1.4, ..Transform::IDENTITY });
        assert!((glow.scale() - 1.4).abs() < 1e-5);
        assert!(glow.position().distance(core.position()) < 1e-6);
    }
}
