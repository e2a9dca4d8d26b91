//! Simulation and rendering configuration
//!
//! Every tunable lives in an explicit config value handed to the component
//! that needs it, so independent simulations (the tests build many) never
//! interfere through shared state.

/// Gravitational constant in m³ kg⁻¹ s⁻²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// One day of simulated time in seconds
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// How many simulated days pass per physics tick
pub const TIME_WARP_DAYS: f64 = 1.0;

/// Physics configuration consumed by the integrator at construction.
/// The time step is fixed for the lifetime of a run; simulated time
/// advances by exactly this amount per tick regardless of frame rate.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub gravitational_constant: f64,
    /// Seconds of simulated time per `update()` call
    pub time_step: f64,
}

impl SimConfig {
    pub fn new(time_step: f64) -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            time_step,
        }
    }

    pub fn days_per_step(days: f64) -> Self {
        Self::new(days * SECONDS_PER_DAY)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::days_per_step(TIME_WARP_DAYS)
    }
}

/// Display-side configuration. Scaling is applied only when body state is
/// uploaded to the GPU; the stored SI state is never touched.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Render units per meter for positions (1 AU ≈ 15 units)
    pub position_scale: f64,
    /// Render units per meter for body radii (exaggerated, or nothing
    /// but the Sun would subtend a pixel)
    pub radius_scale: f64,
    /// Floor for tiny bodies so they stay visible
    pub min_display_radius: f32,
    /// Camera translation speed in render units per second
    pub camera_speed: f32,
    /// Radians of camera rotation per pixel of mouse travel
    pub mouse_sensitivity: f32,
    /// Segment count for the ring annulus mesh
    pub ring_segments: u32,
}

impl RenderConfig {
    /// Scale an SI body dimension (radius, ring extent) to render units
    pub fn scale_radius(&self, meters: f64) -> f32 {
        (meters * self.radius_scale) as f32
    }

    /// Display radius for a body of physical radius `radius_m`
    pub fn display_radius(&self, radius_m: f64) -> f32 {
        self.scale_radius(radius_m).max(self.min_display_radius)
    }

    /// Scale an SI length to render units
    pub fn scale_position(&self, meters: f64) -> f32 {
        (meters * self.position_scale) as f32
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1200,
            window_height: 800,
            position_scale: 1.0 / 1.0e10,
            radius_scale: 1.0 / 2.5e8,
            min_display_radius: 0.08,
            camera_speed: 20.0,
            mouse_sensitivity: 0.003,
            ring_segments: 128,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_time_step_is_one_day() {
        let config = SimConfig::default();
        assert_eq!(config.time_step, 86_400.0 * TIME_WARP_DAYS);
    }

    #[test]
    fn tiny_bodies_get_the_display_floor() {
        let config = RenderConfig::default();
        assert_eq!(config.display_radius(1.0), config.min_display_radius);
        // the Sun is comfortably above the floor
        assert!(config.display_radius(6.957e8) > 1.0);
    }
}
