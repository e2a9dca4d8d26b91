//! Celestial body data model and registry
//!
//! Physics state is f64 SI throughout: positions in meters, velocities in
//! m/s, masses in kg, all in one barycentric frame. The registry owns the
//! bodies in a single contiguous sequence with a stable order; the
//! integrator mutates them in place and the renderer only reads.

use glam::DVec3;
use std::fmt;

/// A body in the simulation.
///
/// `velocity` is the velocity at the last completed whole step;
/// `velocity_half_step` is `v(t + dt/2)`, the value actually carried
/// between Verlet steps. The color, display radius, and trail are
/// render-side only and never feed back into the physics.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub name: String,
    /// kg; zero means a massless tracer that exerts and feels no gravity
    pub mass: f64,
    /// m; used only for rendering scale
    pub radius: f64,
    /// m, barycentric frame
    pub position: DVec3,
    /// m/s, at the last completed whole step
    pub velocity: DVec3,
    /// m/s, v(t + dt/2) carried between steps
    pub velocity_half_step: DVec3,
    pub color: [f32; 4],
    pub display_radius: f32,
    pub trail: Vec<DVec3>,
    pub trail_max_length: usize,
}

impl CelestialBody {
    pub fn new(name: &str, mass: f64, radius: f64, position: DVec3, velocity: DVec3) -> Self {
        Self {
            name: name.to_string(),
            mass,
            radius,
            position,
            velocity,
            velocity_half_step: velocity,
            color: [0.8, 0.8, 0.8, 1.0],
            display_radius: 1.0,
            trail: Vec::new(),
            trail_max_length: 400,
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_display_radius(mut self, display_radius: f32) -> Self {
        self.display_radius = display_radius;
        self
    }

    pub fn with_trail_length(mut self, length: usize) -> Self {
        self.trail_max_length = length;
        self
    }

    /// Record the current position in the bounded trail history
    pub fn update_trail(&mut self) {
        self.trail.push(self.position);
        if self.trail.len() > self.trail_max_length {
            self.trail.remove(0);
        }
    }
}

/// Rejected body definition, raised before any simulation starts.
/// Fatal to startup; the integrator never sees invalid state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidBodyDefinition {
    NonFiniteMass { name: String },
    NegativeMass { name: String },
    NonFiniteRadius { name: String },
    NegativeRadius { name: String },
    NonFinitePosition { name: String },
    NonFiniteVelocity { name: String },
    DuplicateName { name: String },
}

impl fmt::Display for InvalidBodyDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteMass { name } => write!(f, "body '{name}' has a non-finite mass"),
            Self::NegativeMass { name } => write!(f, "body '{name}' has a negative mass"),
            Self::NonFiniteRadius { name } => write!(f, "body '{name}' has a non-finite radius"),
            Self::NegativeRadius { name } => write!(f, "body '{name}' has a negative radius"),
            Self::NonFinitePosition { name } => {
                write!(f, "body '{name}' has a non-finite initial position")
            }
            Self::NonFiniteVelocity { name } => {
                write!(f, "body '{name}' has a non-finite initial velocity")
            }
            Self::DuplicateName { name } => write!(f, "duplicate body name '{name}'"),
        }
    }
}

impl std::error::Error for InvalidBodyDefinition {}

/// Owns the canonical, fixed-size body list. Iteration order is the
/// construction order and is stable for the lifetime of the run.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
}

impl BodyRegistry {
    /// Validate and adopt the body definitions. Mass and radius must be
    /// finite and non-negative (zero mass is a legal tracer); positions
    /// and velocities must be finite; names must be unique.
    pub fn new(bodies: Vec<CelestialBody>) -> Result<Self, InvalidBodyDefinition> {
        for (index, body) in bodies.iter().enumerate() {
            let name = || body.name.clone();
            if !body.mass.is_finite() {
                return Err(InvalidBodyDefinition::NonFiniteMass { name: name() });
            }
            if body.mass < 0.0 {
                return Err(InvalidBodyDefinition::NegativeMass { name: name() });
            }
            if !body.radius.is_finite() {
                return Err(InvalidBodyDefinition::NonFiniteRadius { name: name() });
            }
            if body.radius < 0.0 {
                return Err(InvalidBodyDefinition::NegativeRadius { name: name() });
            }
            if !body.position.is_finite() {
                return Err(InvalidBodyDefinition::NonFinitePosition { name: name() });
            }
            if !body.velocity.is_finite() {
                return Err(InvalidBodyDefinition::NonFiniteVelocity { name: name() });
            }
            if bodies[..index].iter().any(|other| other.name == body.name) {
                return Err(InvalidBodyDefinition::DuplicateName { name: name() });
            }
        }
        Ok(Self { bodies })
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [CelestialBody] {
        &mut self.bodies
    }

    pub fn find(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str) -> CelestialBody {
        CelestialBody::new(name, 1.0e24, 1.0e6, DVec3::ZERO, DVec3::ZERO)
    }

    #[test]
    fn accepts_a_valid_list() {
        let registry = BodyRegistry::new(vec![body("a"), body("b")]).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.bodies()[0].name, "a");
    }

    #[test]
    fn zero_mass_is_a_legal_tracer() {
        let mut tracer = body("tracer");
        tracer.mass = 0.0;
        assert!(BodyRegistry::new(vec![tracer]).is_ok());
    }

    #[test]
    fn rejects_non_finite_mass() {
        let mut bad = body("bad");
        bad.mass = f64::NAN;
        let err = BodyRegistry::new(vec![bad]).unwrap_err();
        assert_eq!(
            err,
            InvalidBodyDefinition::NonFiniteMass {
                name: "bad".to_string()
            }
        );
    }

    #[test]
    fn rejects_negative_mass_and_radius() {
        let mut bad = body("bad");
        bad.mass = -1.0;
        assert!(matches!(
            BodyRegistry::new(vec![bad]),
            Err(InvalidBodyDefinition::NegativeMass { .. })
        ));

        let mut bad = body("bad");
        bad.radius = -1.0;
        assert!(matches!(
            BodyRegistry::new(vec![bad]),
            Err(InvalidBodyDefinition::NegativeRadius { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_state_vectors() {
        let mut bad = body("bad");
        bad.position.x = f64::INFINITY;
        assert!(matches!(
            BodyRegistry::new(vec![bad]),
            Err(InvalidBodyDefinition::NonFinitePosition { .. })
        ));

        let mut bad = body("bad");
        bad.velocity.y = f64::NAN;
        assert!(matches!(
            BodyRegistry::new(vec![bad]),
            Err(InvalidBodyDefinition::NonFiniteVelocity { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        assert!(matches!(
            BodyRegistry::new(vec![body("twin"), body("twin")]),
            Err(InvalidBodyDefinition::DuplicateName { .. })
        ));
    }

    #[test]
    fn trail_history_is_bounded() {
        let mut b = body("a").with_trail_length(3);
        for i in 0..10 {
            b.position.x = i as f64;
            b.update_trail();
        }
        assert_eq!(b.trail.len(), 3);
        assert_eq!(b.trail[2].x, 9.0);
    }

    #[test]
    fn error_messages_name_the_body() {
        let err = InvalidBodyDefinition::NonFiniteMass {
            name: "Ceres".to_string(),
        };
        assert!(err.to_string().contains("Ceres"));
    }
}
