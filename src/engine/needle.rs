//! Projectile subsystem
//!
//! Needles fly from a fixed launch point to the picked impact position.
//! Progress grows by a fixed step per tick; the tick on which it first
//! reaches 1.0 resolves the needle exactly once. Resolved needles stay at
//! the target and shrink until negligible, then are dropped.

use crate::rasterizer::Vec3;
use super::outcome::{classify, HitOutcome};

#[derive(Debug, Clone)]
pub struct Needle {
    pub origin: Vec3,
    pub target: Vec3,
    pub progress: f32,
    pub hit_id: Option<String>,
    /// Visual scale, 1.0 until resolution
    pub scale: f32,
    resolved: bool,
}

impl Needle {
    pub fn new(origin: Vec3, target: Vec3, hit_id: Option<String>) -> Self {
        Self {
            origin,
            target,
            progress: 0.0,
            hit_id,
            scale: 1.0,
            resolved: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.origin.lerp(self.target, self.progress.min(1.0))
    }

    /// Unit flight direction (the needle points along it)
    pub fn direction(&self) -> Vec3 {
        (self.target - self.origin).normalize()
    }
}

/// Emitted once per needle, on the tick it arrives
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub outcome: HitOutcome,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy)]
pub struct NeedleParams {
    pub step: f32,
    pub shrink: f32,
    pub min_scale: f32,
}

pub struct NeedleSystem {
    needles: Vec<Needle>,
    params: NeedleParams,
}

impl NeedleSystem {
    pub fn new(params: NeedleParams) -> Self {
        Self {
            needles: Vec::new(),
            params,
        }
    }

    pub fn spawn(&mut self, origin: Vec3, target: Vec3, hit_id: Option<String>) {
        self.needles.push(Needle::new(origin, target, hit_id));
    }

    /// Advance every needle by `dt_ticks` reference ticks.
    /// `is_required` is consulted only for needles resolving this call.
    pub fn advance<F>(&mut self, dt_ticks: f32, is_required: F) -> Vec<Resolution>
    where
        F: Fn(&str) -> bool,
    {
        let params = self.params;
        let mut resolutions = Vec::new();

        for needle in &mut self.needles {
            if needle.resolved {
                needle.scale *= params.shrink.powf(dt_ticks);
                continue;
            }

            let before = needle.progress;
            needle.progress += params.step * dt_ticks;
            if before < 1.0 && needle.progress >= 1.0 {
                needle.resolved = true;
                let outcome = classify(needle.hit_id.as_deref(), &is_required);
                resolutions.push(Resolution {
                    outcome: HitOutcome {
                        point_id: needle.hit_id.clone(),
                        outcome,
                    },
                    position: needle.position(),
                });
            }
        }

        self.needles
            .retain(|n| !(n.resolved && n.scale < params.min_scale));
        resolutions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Needle> {
        self.needles.iter()
    }

    pub fn len(&self) -> usize {
        self.needles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    /// Drop every needle without resolving it
    pub fn clear(&mut self) {
        self.needles.clear();
    }
}
