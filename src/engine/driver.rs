//! Render/animation driver
//!
//! `Engine` owns everything that exists between mount and teardown: camera,
//! point group, body cloud, live needles and bursts, the animation clock,
//! the framebuffer and its presenter. `Driver` is the long-lived handle the
//! frame loop talks to; it is Idle until a mount succeeds and goes back to
//! Idle on teardown.
//!
//! Tick order: rotation and clock, needles (outcomes reported and bursts
//! spawned as they resolve), bursts, marker visuals, render and present.

use macroquad::logging::{info, warn};
use crate::config::Tuning;
use crate::data::PointRegistry;
use crate::rasterizer::{Camera, Framebuffer, Vec3};
use super::body::BodyField;
use super::burst::{BurstParams, BurstSystem};
use super::inputs::SharedInputs;
use super::needle::{NeedleParams, NeedleSystem};
use super::outcome::OutcomeSink;
use super::picking::{pick_screen, PickResult};
use super::present::{MountError, Presenter};
use super::render::SceneView;
use super::scene::PointGroup;
use super::visuals::{update_visuals, PointVisual, VisualStyle};

/// Seed offset so bursts and the body cloud draw from different streams
const BURST_SEED_SALT: u32 = 0x5EED_B057;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

/// Whether the frame loop should keep ticking the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Continue,
    Halted,
}

/// Everything the engine needs from the outside world at mount
pub struct EngineSetup<'a> {
    pub registry: &'a PointRegistry,
    pub tuning: &'a Tuning,
    pub inputs: SharedInputs,
    pub sink: OutcomeSink,
}

pub struct Engine {
    tuning: Tuning,
    style: VisualStyle,
    camera: Camera,
    viewport: (f32, f32),
    group: PointGroup,
    body: BodyField,
    needles: NeedleSystem,
    bursts: BurstSystem,
    visuals: Vec<PointVisual>,
    clock: f32,
    fb: Framebuffer,
    presenter: Box<dyn Presenter>,
    inputs: SharedInputs,
    sink: OutcomeSink,
}

fn framebuffer_size(width: f32, height: f32, scale: f32) -> (usize, usize) {
    (
        ((width * scale).round() as usize).max(1),
        ((height * scale).round() as usize).max(1),
    )
}

fn valid_viewport(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width >= 1.0 && height >= 1.0
}

impl Engine {
    pub fn new(
        setup: EngineSetup<'_>,
        mut presenter: Box<dyn Presenter>,
        width: f32,
        height: f32,
    ) -> Result<Self, MountError> {
        if !valid_viewport(width, height) {
            return Err(MountError::InvalidViewport { width, height });
        }
        let tuning = setup.tuning.clone();
        let (fb_w, fb_h) = framebuffer_size(width, height, tuning.render_scale);
        presenter.attach(fb_w, fb_h)?;

        let mut camera = Camera::perspective(tuning.camera_fov, width / height, tuning.camera_near, tuning.camera_far);
        camera.position = tuning.camera_position;
        camera.look_at(Vec3::ZERO);

        let style = VisualStyle {
            highlight: tuning.highlight_color,
            neutral: tuning.neutral_color,
            target_opacity: tuning.target_opacity,
            idle_opacity: tuning.idle_opacity,
            glow_frequency: tuning.glow_frequency,
            glow_scale_amplitude: tuning.glow_scale_amplitude,
            glow_opacity_base: tuning.glow_opacity_base,
            glow_opacity_amplitude: tuning.glow_opacity_amplitude,
        };
        let needles = NeedleSystem::new(NeedleParams {
            step: tuning.needle_step,
            shrink: tuning.needle_shrink,
            min_scale: tuning.needle_min_scale,
        });
        let bursts = BurstSystem::new(
            BurstParams {
                count: tuning.burst_count,
                spread: tuning.burst_spread,
                life_decay: tuning.burst_life_decay,
            },
            tuning.body_seed ^ BURST_SEED_SALT,
        );
        let body = BodyField::build(
            tuning.body_count,
            tuning.body_seed,
            tuning.body_primary_color,
            tuning.body_secondary_color,
        );
        let group = PointGroup::build(setup.registry, tuning.point_radius, tuning.glow_radius);

        Ok(Self {
            style,
            camera,
            viewport: (width, height),
            visuals: Vec::with_capacity(group.markers().len()),
            group,
            body,
            needles,
            bursts,
            clock: 0.0,
            fb: Framebuffer::new(fb_w, fb_h),
            presenter,
            inputs: setup.inputs,
            sink: setup.sink,
            tuning,
        })
    }

    pub fn tick(&mut self, dt_seconds: f32) {
        let ticks = self.tuning.timestep.ticks(dt_seconds);

        self.group.rotate(self.tuning.rotation_speed * ticks);
        self.clock += self.tuning.clock_step * ticks;

        // The borrow must end before the sink runs: the receiver writes back
        // into the same inputs.
        let resolutions = {
            let inputs = self.inputs.borrow();
            self.needles.advance(ticks, |id| inputs.is_required(id))
        };
        for resolution in resolutions {
            (self.sink)(resolution.outcome.reported_id(), resolution.outcome.is_correct());
            self.bursts.spawn(resolution.position, resolution.outcome.outcome.into());
        }

        self.bursts.advance(ticks);

        {
            let inputs = self.inputs.borrow();
            update_visuals(&mut self.group, &mut self.visuals, &inputs, self.clock, &self.style);
        }

        self.render();
    }

    fn render(&mut self) {
        let view = SceneView {
            tuning: &self.tuning,
            camera: &self.camera,
            body: &self.body,
            group: &self.group,
            visuals: &self.visuals,
            needles: &self.needles,
            bursts: &self.bursts,
        };
        view.render(&mut self.fb);
        self.presenter.present(&self.fb);
    }

    /// Cast the pointer and launch a needle at whatever it lands on
    pub fn pointer_down(&mut self, x: f32, y: f32) -> PickResult {
        let result = pick_screen(
            x,
            y,
            self.viewport.0,
            self.viewport.1,
            &self.camera,
            &self.group,
            self.tuning.whiff_distance,
        );
        let origin = self.camera.position + self.tuning.needle_origin_offset;
        self.needles.spawn(origin, result.impact, result.hit_id.clone());
        result
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if !valid_viewport(width, height) || (width, height) == self.viewport {
            return;
        }
        self.viewport = (width, height);
        self.camera.set_viewport(width, height);
        let (fb_w, fb_h) = framebuffer_size(width, height, self.tuning.render_scale);
        self.fb.resize(fb_w, fb_h);
        self.presenter.resize(fb_w, fb_h);
    }

    /// Release the render surface. In-flight needles and bursts go with it.
    pub fn dispose(mut self) {
        self.needles.clear();
        self.bursts.clear();
        self.presenter.dispose();
    }

    #[cfg(test)]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[cfg(test)]
    pub fn group(&self) -> &PointGroup {
        &self.group
    }

    #[cfg(test)]
    pub fn visuals(&self) -> &[PointVisual] {
        &self.visuals
    }

    #[cfg(test)]
    pub fn needles(&self) -> &NeedleSystem {
        &self.needles
    }

    #[cfg(test)]
    pub fn bursts(&self) -> &BurstSystem {
        &self.bursts
    }

    #[cfg(test)]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    #[cfg(test)]
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    #[cfg(test)]
    pub fn particle_count(&self) -> usize {
        self.body.len()
    }
}

pub struct Driver {
    state: DriverState,
    engine: Option<Engine>,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Idle,
            engine: None,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    #[cfg(test)]
    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    /// Build a fresh engine. Mounting while running tears the old one down
    /// first. On failure the driver stays Idle and nothing is scheduled.
    pub fn mount(
        &mut self,
        setup: EngineSetup<'_>,
        presenter: Box<dyn Presenter>,
        width: f32,
        height: f32,
    ) -> Result<(), MountError> {
        self.teardown();
        match Engine::new(setup, presenter, width, height) {
            Ok(engine) => {
                info!(
                    "Engine mounted: {}x{} viewport, {} points, {} particles",
                    width,
                    height,
                    engine.group.markers().len(),
                    engine.body.len()
                );
                self.engine = Some(engine);
                self.state = DriverState::Running;
                Ok(())
            }
            Err(e) => {
                warn!("Engine setup aborted: {}", e);
                Err(e)
            }
        }
    }

    pub fn tick(&mut self, dt_seconds: f32) -> TickStatus {
        match self.engine.as_mut() {
            Some(engine) => {
                engine.tick(dt_seconds);
                TickStatus::Continue
            }
            None => TickStatus::Halted,
        }
    }

    /// Returns the pick result when a needle was launched
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<PickResult> {
        self.engine.as_mut().map(|engine| engine.pointer_down(x, y))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(engine) = self.engine.as_mut() {
            engine.resize(width, height);
        }
    }

    /// Stop ticking and release render resources. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.dispose();
            info!("Engine torn down");
        }
        self.state = DriverState::Idle;
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.teardown();
    }
}
