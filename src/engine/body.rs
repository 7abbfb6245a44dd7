//! Particle field builder
//!
//! A dense, purely decorative point cloud shaped like a standing figure:
//! head, torso, two legs and two arms. Built once per mount.

use crate::rasterizer::{Color, Vec3};
use super::rng::Rng;

/// Share of the region roll drawn in the primary color
const PRIMARY_SHARE: f32 = 0.3;

/// Body-space particle cloud
pub struct BodyField {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Color>,
}

impl BodyField {
    pub fn build(count: usize, seed: u32, primary: Color, secondary: Color) -> Self {
        let mut rng = Rng::new(seed);
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for _ in 0..count {
            let part = rng.next_f32();
            positions.push(sample_region(&mut rng, part));
            colors.push(if part < PRIMARY_SHARE { primary } else { secondary });
        }

        Self { positions, colors }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn sample_region(rng: &mut Rng, part: f32) -> Vec3 {
    if part < 0.12 {
        // Head
        Vec3::new(rng.centered(0.2), 1.65 + rng.centered(0.25), rng.centered(0.2))
    } else if part < 0.55 {
        // Torso
        Vec3::new(rng.centered(0.45), 0.5 + rng.centered(0.8), rng.centered(0.225))
    } else if rng.next_f32() > 0.5 {
        // Legs
        let side = if rng.next_f32() > 0.5 { 0.3 } else { -0.3 };
        let x = side + rng.centered(0.1);
        let y = -0.5 - rng.next_f32() * 1.7;
        Vec3::new(x, y, rng.centered(0.1))
    } else {
        // Arms
        let side = if rng.next_f32() > 0.5 { 0.75 } else { -0.75 };
        let x = side + rng.centered(0.1);
        let y = 0.3 + rng.centered(0.6);
        Vec3::new(x, y, rng.centered(0.1))
    }
}
