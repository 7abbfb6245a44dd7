//! Outcome boundary
//!
//! The engine's only output edge. Each resolved needle reports once, as
//! `(point id or "miss", is_correct)`, to whoever owns scoring.

/// Reported in place of a point id when a needle hit nothing
pub const MISS_ID: &str = "miss";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Miss,
}

/// Depends only on what was hit and the current required set.
/// Whether the point was already hit plays no part.
pub fn classify<F>(hit_id: Option<&str>, is_required: F) -> Outcome
where
    F: Fn(&str) -> bool,
{
    match hit_id {
        Some(id) if is_required(id) => Outcome::Correct,
        Some(_) => Outcome::Incorrect,
        None => Outcome::Miss,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitOutcome {
    pub point_id: Option<String>,
    pub outcome: Outcome,
}

impl HitOutcome {
    /// Id as reported across the boundary
    pub fn reported_id(&self) -> &str {
        self.point_id.as_deref().unwrap_or(MISS_ID)
    }

    pub fn is_correct(&self) -> bool {
        self.outcome == Outcome::Correct
    }
}

/// Receiver of resolved outcomes: `(point id or "miss", is_correct)`
pub type OutcomeSink = Box<dyn FnMut(&str, bool)>;
