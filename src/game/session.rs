//! Game session
//!
//! Owns score, level progression and the hit set. The engine reports needle
//! outcomes here; after every change the session republishes the live frame
//! inputs the engine reads on its next tick.

use std::collections::HashSet;
use macroquad::logging::info;
use crate::data::{Case, CaseBook};
use crate::engine::{FrameInputs, SharedInputs};

pub const STARTING_SCORE: i32 = 100;
/// Score change for each resolved needle
pub const HIT_DELTA: i32 = 10;

pub struct GameSession {
    cases: CaseBook,
    inputs: SharedInputs,
    score: i32,
    level: usize,
    /// Correct points hit in the current case, in hit order
    hits: Vec<String>,
    game_over: bool,
    level_changed: bool,
}

impl GameSession {
    pub fn new(cases: CaseBook, inputs: SharedInputs) -> Self {
        let session = Self {
            cases,
            inputs,
            score: STARTING_SCORE,
            level: 0,
            hits: Vec::new(),
            game_over: false,
            level_changed: true,
        };
        session.publish();
        session
    }

    /// Apply one resolved needle. `point_id` is "miss" when nothing was hit.
    pub fn on_hit(&mut self, point_id: &str, is_correct: bool) {
        if self.game_over {
            return;
        }

        self.score += if is_correct { HIT_DELTA } else { -HIT_DELTA };
        if self.score <= 0 {
            self.game_over = true;
            info!("Game over at level {} (score {})", self.level + 1, self.score);
        }

        // A needle classified before a level change can arrive for a point
        // the new case does not need; the hit set only holds required ids.
        let case = self.cases.get_clamped(self.level);
        let wanted = case.required_points.iter().any(|r| r == point_id);
        if is_correct && wanted && !self.hits.iter().any(|h| h == point_id) {
            self.hits.push(point_id.to_string());

            if self.hits.len() == case.required_points.len() {
                let reward = case.reward;
                let next = (self.level + 1).min(self.cases.last_index());
                self.score += reward;
                self.hits.clear();
                if next != self.level {
                    info!("Case {} complete (+{}), advancing to level {}", case.id, reward, next + 1);
                    self.level = next;
                    self.level_changed = true;
                } else {
                    info!("Final case complete (+{}), repeating", reward);
                }
            }
        }

        self.publish();
    }

    pub fn restart(&mut self) {
        self.score = STARTING_SCORE;
        self.level = 0;
        self.hits.clear();
        self.game_over = false;
        self.level_changed = true;
        self.publish();
    }

    /// Write the live inputs the engine reads each tick
    fn publish(&self) {
        let case = self.cases.get_clamped(self.level);
        *self.inputs.borrow_mut() = FrameInputs {
            current_level: self.level,
            required: case.required_points.clone(),
            hit: self.hits.iter().cloned().collect::<HashSet<_>>(),
        };
    }

    /// True once after each level change (and at start/restart)
    pub fn take_level_changed(&mut self) -> bool {
        std::mem::take(&mut self.level_changed)
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn case(&self) -> &Case {
        self.cases.get_clamped(self.level)
    }

    pub fn is_hit(&self, id: &str) -> bool {
        self.hits.iter().any(|h| h == id)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[cfg(test)]
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_builtin;
    use crate::engine::shared_inputs;

    fn session() -> (GameSession, SharedInputs) {
        let (_, cases) = load_builtin().unwrap();
        let inputs = shared_inputs(FrameInputs::default());
        (GameSession::new(cases, inputs.clone()), inputs)
    }

    #[test]
    fn test_initial_state_published() {
        let (mut s, inputs) = session();
        assert_eq!(s.score(), 100);
        assert_eq!(s.level(), 0);
        assert!(!s.is_game_over());
        assert!(s.take_level_changed());
        assert!(!s.take_level_changed());
        let live = inputs.borrow();
        assert_eq!(live.required, vec!["LI4".to_string(), "LU7".to_string()]);
        assert!(live.hit.is_empty());
    }

    #[test]
    fn test_correct_hit_scores_and_marks() {
        let (mut s, inputs) = session();
        s.on_hit("LI4", true);
        assert_eq!(s.score(), 110);
        assert!(s.is_hit("LI4"));
        assert!(inputs.borrow().is_hit("LI4"));
    }

    #[test]
    fn test_repeat_correct_hit_still_scores() {
        let (mut s, inputs) = session();
        s.on_hit("LI4", true);
        s.on_hit("LI4", true);
        assert_eq!(s.score(), 120);
        assert_eq!(inputs.borrow().hit.len(), 1);
        assert_eq!(s.level(), 0);
    }

    #[test]
    fn test_case_completion_advances() {
        let (mut s, inputs) = session();
        s.take_level_changed();
        s.on_hit("LI4", true);
        s.on_hit("LU7", true);
        // 100 + 10 + 10 + reward 10
        assert_eq!(s.score(), 130);
        assert_eq!(s.level(), 1);
        assert!(s.take_level_changed());
        let live = inputs.borrow();
        assert_eq!(live.current_level, 1);
        assert_eq!(live.required, vec!["HT7".to_string(), "SP6".to_string(), "PC6".to_string()]);
        assert!(live.hit.is_empty());
    }

    #[test]
    fn test_stale_correct_hit_not_added_to_next_case() {
        let (mut s, inputs) = session();
        s.on_hit("LI4", true);
        // Two needles at LU7 resolve in the same tick, both classified
        // against the first case
        s.on_hit("LU7", true);
        s.on_hit("LU7", true);
        assert_eq!(s.level(), 1);
        assert_eq!(s.score(), 100 + 10 + 10 + 10 + 10);
        assert!(!s.is_hit("LU7"));
        {
            let live = inputs.borrow();
            assert!(live.hit.is_empty());
            assert!(live.hit.iter().all(|id| live.is_required(id)));
        }

        // The second case still needs all three of its points
        s.on_hit("HT7", true);
        s.on_hit("SP6", true);
        assert_eq!(s.level(), 1);
        s.on_hit("PC6", true);
        assert_eq!(s.level(), 2);
    }

    #[test]
    fn test_wrong_and_miss_cost_points() {
        let (mut s, _) = session();
        s.on_hit("PC6", false);
        s.on_hit("miss", false);
        assert_eq!(s.score(), 80);
        assert!(!s.is_hit("PC6"));
    }

    #[test]
    fn test_game_over_freezes_session() {
        let (mut s, _) = session();
        for _ in 0..10 {
            s.on_hit("miss", false);
        }
        assert_eq!(s.score(), 0);
        assert!(s.is_game_over());
        s.on_hit("LI4", true);
        assert_eq!(s.score(), 0);
        assert!(!s.is_hit("LI4"));
    }

    #[test]
    fn test_last_case_repeats() {
        let (mut s, inputs) = session();
        let total = s.case_count();
        for _ in 0..total + 1 {
            let required = s.case().required_points.clone();
            for id in &required {
                s.on_hit(id, true);
            }
        }
        assert_eq!(s.level(), total - 1);
        assert!(inputs.borrow().hit.is_empty());
        assert!(!s.is_game_over());
    }

    #[test]
    fn test_restart_resets_everything() {
        let (mut s, inputs) = session();
        s.on_hit("LI4", true);
        s.on_hit("LU7", true);
        s.on_hit("miss", false);
        s.take_level_changed();
        s.restart();
        assert_eq!(s.score(), 100);
        assert_eq!(s.level(), 0);
        assert!(s.take_level_changed());
        assert_eq!(inputs.borrow().current_level, 0);
        assert!(inputs.borrow().hit.is_empty());
    }
}
