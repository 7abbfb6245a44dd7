//! Picking service
//!
//! Casts the pointer into the scene and reports which acupoint (if any)
//! it lands on, along with the exact impact position the needle flies to.

use crate::rasterizer::{pointer_to_ndc, ray_sphere_intersection, screen_to_ray, Camera, Ray, Vec3};
use super::scene::{NodeId, PointGroup};

#[derive(Debug, Clone, PartialEq)]
pub struct PickResult {
    pub hit_id: Option<String>,
    pub impact: Vec3,
}

/// Pick from a pointer position in window pixels
pub fn pick_screen(
    x: f32,
    y: f32,
    viewport_width: f32,
    viewport_height: f32,
    camera: &Camera,
    group: &PointGroup,
    whiff_distance: f32,
) -> PickResult {
    let (ndc_x, ndc_y) = pointer_to_ndc(x, y, viewport_width, viewport_height);
    let ray = screen_to_ray(ndc_x, ndc_y, camera);
    pick(&ray, group, whiff_distance)
}

/// Nearest identity-bearing hit along the ray, or a whiff at a fixed distance
pub fn pick(ray: &Ray, group: &PointGroup, whiff_distance: f32) -> PickResult {
    let mut hits: Vec<(f32, NodeId)> = group
        .hit_volumes()
        .iter()
        .filter_map(|v| ray_sphere_intersection(ray, v.center, v.radius).map(|t| (t, v.node)))
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (t, node) in hits {
        if let Some(id) = group.owner_identity(node) {
            return PickResult {
                hit_id: Some(id.to_string()),
                impact: ray.at(t),
            };
        }
    }

    PickResult {
        hit_id: None,
        impact: ray.at(whiff_distance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Acupoint, PointRegistry};

    fn registry(points: &[(&str, Vec3)]) -> PointRegistry {
        PointRegistry::from_points(
            points
                .iter()
                .map(|(id, pos)| Acupoint {
                    id: id.to_string(),
                    name: id.to_string(),
                    chinese_name: String::new(),
                    meridian: String::new(),
                    position: *pos,
                    description: String::new(),
                })
                .collect(),
        )
        .unwrap()
    }

    fn camera() -> Camera {
        let mut cam = Camera::perspective(75.0, 1.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 4.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    fn ray_toward(target: Vec3) -> Ray {
        let origin = Vec3::new(0.0, 0.0, 4.0);
        Ray::new(origin, target - origin)
    }

    #[test]
    fn test_direct_hit() {
        let g = PointGroup::build(&registry(&[("LI4", Vec3::new(0.8, 0.0, 0.2))]), 0.07, 0.14);
        let result = pick(&ray_toward(Vec3::new(0.8, 0.0, 0.2)), &g, 10.0);
        assert_eq!(result.hit_id.as_deref(), Some("LI4"));
        // The glow shell is hit first, so impact sits on its surface
        assert!((result.impact.distance(Vec3::new(0.8, 0.0, 0.2)) - 0.14).abs() < 1e-4);
    }

    #[test]
    fn test_miss_lands_at_whiff_distance() {
        let g = PointGroup::build(&registry(&[("LI4", Vec3::new(0.8, 0.0, 0.2))]), 0.07, 0.14);
        let ray = ray_toward(Vec3::new(-2.0, 2.0, 0.0));
        let result = pick(&ray, &g, 10.0);
        assert_eq!(result.hit_id, None);
        assert!((result.impact.distance(ray.origin) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_nearest_point_wins() {
        let g = PointGroup::build(
            &registry(&[("BACK", Vec3::new(0.0, 0.0, -0.4)), ("FRONT", Vec3::new(0.0, 0.0, 0.4))]),
            0.07,
            0.14,
        );
        let result = pick(&ray_toward(Vec3::ZERO), &g, 10.0);
        assert_eq!(result.hit_id.as_deref(), Some("FRONT"));
    }

    #[test]
    fn test_uses_rotated_positions() {
        let mut g = PointGroup::build(&registry(&[("LI4", Vec3::new(0.8, 0.0, 0.2))]), 0.07, 0.14);
        g.rotate(std::f32::consts::PI);
        // The rest pose is empty now
        assert_eq!(pick(&ray_toward(Vec3::new(0.8, 0.0, 0.2)), &g, 10.0).hit_id, None);
        let result = pick(&ray_toward(Vec3::new(-0.8, 0.0, -0.2)), &g, 10.0);
        assert_eq!(result.hit_id.as_deref(), Some("LI4"));
    }

    #[test]
    fn test_pick_screen_center() {
        let g = PointGroup::build(&registry(&[("CV17", Vec3::new(0.0, 0.0, 0.0))]), 0.07, 0.14);
        let result = pick_screen(400.0, 300.0, 800.0, 600.0, &camera(), &g, 10.0);
        assert_eq!(result.hit_id.as_deref(), Some("CV17"));
    }
}
