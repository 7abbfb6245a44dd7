//! Externally owned per-frame inputs
//!
//! The game session writes here; the engine only reads, once per tick,
//! through a shared handle. Nothing is copied at mount time.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInputs {
    pub current_level: usize,
    /// Required point ids for the current case, in display order
    pub required: Vec<String>,
    /// Required points already needled in the current case
    pub hit: HashSet<String>,
}

impl FrameInputs {
    pub fn is_required(&self, id: &str) -> bool {
        self.required.iter().any(|r| r == id)
    }

    pub fn is_hit(&self, id: &str) -> bool {
        self.hit.contains(id)
    }
}

/// Stable handle shared between the session (writer) and the engine (reader)
pub type SharedInputs = Rc<RefCell<FrameInputs>>;

pub fn shared_inputs(inputs: FrameInputs) -> SharedInputs {
    Rc::new(RefCell::new(inputs))
}
