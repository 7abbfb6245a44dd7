//! Needle-throwing core
//!
//! # Module Organization
//!
//! - `inputs` - Live required/hit sets shared with the game session
//! - `body` - Decorative particle silhouette
//! - `scene` - Rotating acupoint marker hierarchy
//! - `picking` - Pointer to acupoint resolution
//! - `needle` - In-flight needles and their one-shot resolution
//! - `burst` - Spark bursts on impact
//! - `visuals` - Per-tick marker color and glow
//! - `outcome` - Classification and the report boundary
//! - `render` - Frame composition into the framebuffer
//! - `present` - Framebuffer to window
//! - `driver` - Engine lifecycle and tick order

mod body;
mod burst;
mod driver;
mod inputs;
mod needle;
mod outcome;
mod picking;
mod present;
mod render;
mod rng;
mod scene;
mod transform;
mod visuals;

pub use driver::{Driver, DriverState, EngineSetup, TickStatus};
pub use inputs::{shared_inputs, FrameInputs, SharedInputs};
pub use present::MacroquadPresenter;
