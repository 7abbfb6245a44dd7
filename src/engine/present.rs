//! Presentation seam
//!
//! The engine renders into a CPU framebuffer and hands it to a `Presenter`.
//! The macroquad presenter uploads it to a GPU texture stretched over the
//! window; headless tests substitute their own.

use macroquad::prelude::*;
use macroquad::logging::warn;
use crate::rasterizer::Framebuffer;

/// Engine setup failure
#[derive(Debug, Clone, PartialEq)]
pub enum MountError {
    /// No render surface could be attached
    NoSurface(String),
    /// Viewport has no area (minimized window, zero-sized canvas)
    InvalidViewport { width: f32, height: f32 },
}

impl std::fmt::Display for MountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MountError::NoSurface(e) => write!(f, "No render surface: {}", e),
            MountError::InvalidViewport { width, height } => {
                write!(f, "Invalid viewport {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for MountError {}

pub trait Presenter {
    /// Acquire a surface for frames of the given size
    fn attach(&mut self, width: usize, height: usize) -> Result<(), MountError>;
    fn present(&mut self, fb: &Framebuffer);
    fn resize(&mut self, width: usize, height: usize);
    /// Release the surface. Safe to call more than once.
    fn dispose(&mut self);
}

/// Blits frames to the macroquad window
#[derive(Default)]
pub struct MacroquadPresenter {
    texture: Option<Texture2D>,
}

impl MacroquadPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn create_texture(width: usize, height: usize) -> Result<Texture2D, MountError> {
        if width == 0 || height == 0 || width > u16::MAX as usize || height > u16::MAX as usize {
            return Err(MountError::NoSurface(format!("unsupported texture size {}x{}", width, height)));
        }
        let texture = Texture2D::from_rgba8(width as u16, height as u16, &vec![0; width * height * 4]);
        texture.set_filter(FilterMode::Linear);
        Ok(texture)
    }
}

impl Presenter for MacroquadPresenter {
    fn attach(&mut self, width: usize, height: usize) -> Result<(), MountError> {
        self.texture = Some(Self::create_texture(width, height)?);
        Ok(())
    }

    fn present(&mut self, fb: &Framebuffer) {
        let Some(texture) = &self.texture else { return };
        if texture.width() as usize != fb.width || texture.height() as usize != fb.height {
            return;
        }
        texture.update_from_bytes(fb.width as u32, fb.height as u32, &fb.pixels);
        draw_texture_ex(
            texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );
    }

    fn resize(&mut self, width: usize, height: usize) {
        if self.texture.is_none() {
            return;
        }
        match Self::create_texture(width, height) {
            Ok(texture) => self.texture = Some(texture),
            Err(e) => warn!("Keeping old surface: {}", e),
        }
    }

    fn dispose(&mut self) {
        self.texture = None;
    }
}
