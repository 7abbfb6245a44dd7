//! Deterministic xorshift PRNG
//!
//! Used for the body cloud and burst velocities. Seeded, so the same seed
//! always yields the same silhouette, and usable on wasm32 without an
//! entropy source.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        // xorshift never leaves the all-zero state
        Self { state: if seed == 0 { 0x9E37_79B9 } else { seed } }
    }

    fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform float in [-half, half)
    pub fn centered(&mut self, half: f32) -> f32 {
        self.range(-half, half)
    }
}
