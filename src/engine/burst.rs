//! Effect subsystem
//!
//! Short-lived spark bursts spawned where a needle resolves. Each spark
//! drifts with a constant velocity while the whole burst fades; opacity is
//! the remaining life.

use crate::rasterizer::Vec3;
use super::outcome::Outcome;
use super::rng::Rng;

/// Burst palette selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstTag {
    Correct,
    Incorrect,
    Miss,
}

impl From<Outcome> for BurstTag {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => BurstTag::Correct,
            Outcome::Incorrect => BurstTag::Incorrect,
            Outcome::Miss => BurstTag::Miss,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Spark {
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Clone)]
pub struct Burst {
    pub sparks: Vec<Spark>,
    /// 1.0 at spawn, removed at or below 0
    pub life: f32,
    pub tag: BurstTag,
}

impl Burst {
    pub fn opacity(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BurstParams {
    pub count: usize,
    /// Half-width of each velocity component's range
    pub spread: f32,
    pub life_decay: f32,
}

pub struct BurstSystem {
    bursts: Vec<Burst>,
    params: BurstParams,
    rng: Rng,
}

impl BurstSystem {
    pub fn new(params: BurstParams, seed: u32) -> Self {
        Self {
            bursts: Vec::new(),
            params,
            rng: Rng::new(seed),
        }
    }

    pub fn spawn(&mut self, position: Vec3, tag: BurstTag) {
        let spread = self.params.spread;
        let sparks = (0..self.params.count)
            .map(|_| Spark {
                position,
                velocity: Vec3::new(
                    self.rng.centered(spread),
                    self.rng.centered(spread),
                    self.rng.centered(spread),
                ),
            })
            .collect();
        self.bursts.push(Burst { sparks, life: 1.0, tag });
    }

    pub fn advance(&mut self, dt_ticks: f32) {
        let decay = self.params.life_decay * dt_ticks;
        for burst in &mut self.bursts {
            for spark in &mut burst.sparks {
                spark.position += spark.velocity * dt_ticks;
            }
            burst.life -= decay;
        }
        self.bursts.retain(|b| b.life > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Burst> {
        self.bursts.iter()
    }

    pub fn len(&self) -> usize {
        self.bursts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }

    pub fn clear(&mut self) {
        self.bursts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: BurstParams = BurstParams { count: 35, spread: 0.05, life_decay: 0.04 };

    #[test]
    fn test_spawn_count_and_spread() {
        let mut bursts = BurstSystem::new(PARAMS, 11);
        bursts.spawn(Vec3::new(0.8, 0.0, 0.2), BurstTag::Correct);
        let burst = bursts.iter().next().unwrap();
        assert_eq!(burst.sparks.len(), 35);
        assert_eq!(burst.opacity(), 1.0);
        for s in &burst.sparks {
            assert!(s.velocity.x.abs() <= 0.05 && s.velocity.y.abs() <= 0.05 && s.velocity.z.abs() <= 0.05);
        }
    }

    #[test]
    fn test_bursts_always_terminate() {
        let mut bursts = BurstSystem::new(PARAMS, 11);
        bursts.spawn(Vec3::ZERO, BurstTag::Miss);
        let mut ticks = 0;
        while !bursts.is_empty() {
            bursts.advance(1.0);
            ticks += 1;
            assert!(ticks <= 30, "burst outlived its life budget");
        }
        // 1.0 / 0.04 = 25 ticks, give or take float rounding
        assert!((25..=26).contains(&ticks));
    }

    #[test]
    fn test_opacity_tracks_life_and_sparks_move() {
        let mut bursts = BurstSystem::new(PARAMS, 2);
        bursts.spawn(Vec3::ZERO, BurstTag::Incorrect);
        let before: Vec<Vec3> = bursts.iter().next().unwrap().sparks.iter().map(|s| s.position).collect();
        bursts.advance(1.0);
        let burst = bursts.iter().next().unwrap();
        assert!((burst.opacity() - 0.96).abs() < 1e-6);
        for (s, p0) in burst.sparks.iter().zip(before) {
            assert!((s.position - p0 - s.velocity).len() < 1e-6);
        }
    }

    #[test]
    fn test_tag_from_outcome() {
        assert_eq!(BurstTag::from(Outcome::Correct), BurstTag::Correct);
        assert_eq!(BurstTag::from(Outcome::Incorrect), BurstTag::Incorrect);
        assert_eq!(BurstTag::from(Outcome::Miss), BurstTag::Miss);
    }
}
