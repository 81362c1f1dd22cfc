use std::path::PathBuf;
use std::time::Duration;

use crate::core::{Color, PALETTE};
use crate::pipeline::Viewport;

/// Runtime constants for the viewer. Built once in `main` and only read after.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub width: usize,
    pub height: usize,
    pub title: String,
    pub target_fps: u32,
    /// Degrees of spin per tick while rotating
    pub rotation_speed: f32,
    /// Units of dolly per tick while a zoom key is held
    pub dolly_speed: f32,
    pub fov_degrees: f32,
    /// How long each mesh stays on screen before the next one is shown
    pub dwell: Duration,
    pub initial_distance: f32,
    pub models_dir: PathBuf,
    pub background: Color,
    pub palette: Vec<Color>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Wireframe Renderer".to_string(),
            target_fps: 90,
            rotation_speed: 1.0,
            dolly_speed: 0.4,
            fov_degrees: 75.0,
            dwell: Duration::from_millis(2000),
            initial_distance: 5.0,
            models_dir: PathBuf::from("models"),
            background: Color::BLACK,
            palette: PALETTE.to_vec(),
        }
    }
}

impl ViewerConfig {
    pub fn focal_length(&self) -> f32 {
        1.0 / (self.fov_degrees.to_radians() / 2.0).tan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.height as f32 / self.width as f32
    }

    /// Wall-clock budget of one tick, in whole milliseconds.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(1000 / self.target_fps.max(1) as u64)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}
