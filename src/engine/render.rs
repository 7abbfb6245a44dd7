//! Scene rendering
//!
//! Draws one frame into the software framebuffer: body cloud, acupoint
//! markers (back to front, glow under core), needles and spark bursts.
//! Everything fades toward the background with linear depth fog.

use crate::config::Tuning;
use crate::rasterizer::{rotate_y, BlendMode, Camera, Color, Framebuffer, Vec3};
use super::body::BodyField;
use super::burst::{BurstSystem, BurstTag};
use super::needle::NeedleSystem;
use super::scene::PointGroup;
use super::visuals::PointVisual;

/// Borrowed view of everything that appears in a frame
pub struct SceneView<'a> {
    pub tuning: &'a Tuning,
    pub camera: &'a Camera,
    pub body: &'a BodyField,
    pub group: &'a PointGroup,
    pub visuals: &'a [PointVisual],
    pub needles: &'a NeedleSystem,
    pub bursts: &'a BurstSystem,
}

/// 1.0 at or before fog start, 0.0 at or past fog end
pub fn fog_visibility(depth: f32, fog_near: f32, fog_far: f32) -> f32 {
    if fog_far <= fog_near {
        return 1.0;
    }
    1.0 - ((depth - fog_near) / (fog_far - fog_near)).clamp(0.0, 1.0)
}

impl SceneView<'_> {
    pub fn render(&self, fb: &mut Framebuffer) {
        fb.clear(self.tuning.background);
        self.draw_body(fb);
        self.draw_points(fb);
        self.draw_needles(fb);
        self.draw_bursts(fb);
    }

    fn visibility(&self, depth: f32) -> f32 {
        fog_visibility(depth, self.tuning.fog_near, self.tuning.fog_far)
    }

    /// Splat a world-space sphere of `radius` units
    fn splat(&self, fb: &mut Framebuffer, world: Vec3, radius: f32, color: Color, mode: BlendMode, alpha: f32) {
        if let Some(p) = self.camera.project(world, fb.width, fb.height) {
            let r = radius * self.camera.pixels_per_unit(p.depth, fb.height);
            fb.fill_disc(p.x, p.y, r, color, mode, alpha * self.visibility(p.depth));
        }
    }

    fn draw_body(&self, fb: &mut Framebuffer) {
        let rotation = self.group.rotation();
        let radius = self.tuning.body_size * 0.5;
        for (pos, color) in self.body.positions.iter().zip(self.body.colors.iter()) {
            self.splat(fb, rotate_y(*pos, rotation), radius, *color, BlendMode::Add, self.tuning.body_opacity);
        }
    }

    fn draw_points(&self, fb: &mut Framebuffer) {
        let positions = self.group.marker_positions();

        // Painter's order: farthest first
        let mut order: Vec<(f32, usize)> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (self.camera.to_camera_space(*p).z, i))
            .collect();
        order.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (_, i) in order {
            let Some(visual) = self.visuals.get(i) else { continue };
            let pos = positions[i];
            if visual.glow_active && visual.glow_opacity > 0.0 {
                let radius = self.tuning.glow_radius * self.group.glow_scale(i);
                self.splat(fb, pos, radius, visual.color, BlendMode::Add, visual.glow_opacity);
            }
            self.splat(fb, pos, self.tuning.point_radius, visual.color, BlendMode::Alpha, visual.opacity);
        }
    }

    fn draw_needles(&self, fb: &mut Framebuffer) {
        for needle in self.needles.iter() {
            let tip = needle.position();
            let tail = tip - needle.direction() * (self.tuning.needle_length * needle.scale);
            let color = if needle.hit_id.is_some() {
                self.tuning.needle_aimed_color
            } else {
                self.tuning.needle_idle_color
            };

            let (Some(a), Some(b)) = (
                self.camera.project(tail, fb.width, fb.height),
                self.camera.project(tip, fb.width, fb.height),
            ) else {
                continue;
            };
            // Lines are drawn in integer pixels; wildly off-screen ends are skipped
            let limit = (fb.width.max(fb.height) * 4) as f32;
            if a.x.abs() > limit || a.y.abs() > limit || b.x.abs() > limit || b.y.abs() > limit {
                continue;
            }
            fb.draw_line_blended(
                a.x as i32,
                a.y as i32,
                b.x as i32,
                b.y as i32,
                color,
                BlendMode::Alpha,
                self.visibility(b.depth),
            );
        }
    }

    fn draw_bursts(&self, fb: &mut Framebuffer) {
        let radius = self.tuning.burst_size * 0.5;
        for burst in self.bursts.iter() {
            let color = match burst.tag {
                BurstTag::Correct => self.tuning.correct_color,
                BurstTag::Incorrect => self.tuning.incorrect_color,
                BurstTag::Miss => self.tuning.miss_color,
            };
            for spark in &burst.sparks {
                self.splat(fb, spark.position, radius, color, BlendMode::Add, burst.opacity());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fog_visibility() {
        assert_eq!(fog_visibility(0.5, 1.0, 15.0), 1.0);
        assert_eq!(fog_visibility(15.0, 1.0, 15.0), 0.0);
        assert_eq!(fog_visibility(30.0, 1.0, 15.0), 0.0);
        assert!((fog_visibility(8.0, 1.0, 15.0) - 0.5).abs() < 1e-6);
        assert_eq!(fog_visibility(5.0, 3.0, 3.0), 1.0);
    }
}
