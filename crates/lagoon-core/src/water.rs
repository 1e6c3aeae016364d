//! Per-frame water and light parameters.

use glam::Vec3;

/// Water plane elevation and light position for one frame.
///
/// Overwritten by the host every frame from whatever drives it (UI, script,
/// animation); nothing here persists across frames.
#[derive(Debug, Clone, Copy)]
pub struct WaterState {
    /// Water plane elevation, normalized to the terrain's unit height range.
    pub height: f32,
    pub light_position: Vec3,
}

impl WaterState {
    pub fn new(height: f32, light_position: Vec3) -> Self {
        Self { height, light_position }
    }
}

impl Default for WaterState {
    fn default() -> Self {
        Self {
            height: 0.25,
            light_position: Vec3::new(10.0, 50.0, -30.0),
        }
    }
}
