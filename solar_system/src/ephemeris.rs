//! Startup scene data for the solar system
//!
//! Masses and radii come from the NASA planetary fact sheets. Starting
//! positions and velocities derive from J2000.0 mean longitudes under a
//! circular-orbit approximation: each planet sits at its mean distance at
//! its epoch longitude, moving at its mean orbital speed, with its orbit
//! tilted by the mean inclination to the ecliptic. The Moon is placed
//! relative to Earth the same way.

use glam::DVec3;

use crate::bodies::CelestialBody;
use crate::config::RenderConfig;

pub const SUN_MASS: f64 = 1.989e30;
pub const SUN_RADIUS: f64 = 6.957e8;

pub const MOON_MASS: f64 = 7.342e22;
pub const MOON_RADIUS: f64 = 1.7374e6;
/// Mean Earth-Moon distance, m
pub const MOON_DISTANCE: f64 = 3.844e8;
/// Mean lunar orbital speed relative to Earth, m/s
pub const MOON_SPEED: f64 = 1_022.0;

struct PlanetEntry {
    name: &'static str,
    /// kg
    mass: f64,
    /// m
    radius: f64,
    /// m, mean distance from the Sun
    orbit_radius: f64,
    /// m/s, mean orbital speed
    orbital_speed: f64,
    /// degrees, mean longitude at J2000.0
    mean_longitude: f64,
    /// degrees, mean inclination to the ecliptic
    inclination: f64,
    color: [f32; 4],
    trail_length: usize,
}

const PLANETS: [PlanetEntry; 8] = [
    PlanetEntry {
        name: "Mercury",
        mass: 3.3011e23,
        radius: 2.4397e6,
        orbit_radius: 5.7909e10,
        orbital_speed: 47_360.0,
        mean_longitude: 252.25,
        inclination: 7.005,
        color: [0.7, 0.7, 0.7, 1.0],
        trail_length: 120,
    },
    PlanetEntry {
        name: "Venus",
        mass: 4.8675e24,
        radius: 6.0518e6,
        orbit_radius: 1.0821e11,
        orbital_speed: 35_020.0,
        mean_longitude: 181.98,
        inclination: 3.395,
        color: [0.9, 0.7, 0.5, 1.0],
        trail_length: 250,
    },
    PlanetEntry {
        name: "Earth",
        mass: 5.9722e24,
        radius: 6.371e6,
        orbit_radius: 1.495_98e11,
        orbital_speed: 29_780.0,
        mean_longitude: 100.47,
        inclination: 0.0,
        color: [0.2, 0.4, 0.8, 1.0],
        trail_length: 365,
    },
    PlanetEntry {
        name: "Mars",
        mass: 6.4171e23,
        radius: 3.3895e6,
        orbit_radius: 2.279_56e11,
        orbital_speed: 24_070.0,
        mean_longitude: 355.45,
        inclination: 1.850,
        color: [0.8, 0.4, 0.2, 1.0],
        trail_length: 687,
    },
    PlanetEntry {
        name: "Jupiter",
        mass: 1.8982e27,
        radius: 7.1492e7,
        orbit_radius: 7.784_79e11,
        orbital_speed: 13_060.0,
        mean_longitude: 34.40,
        inclination: 1.303,
        color: [0.9, 0.8, 0.6, 1.0],
        trail_length: 800,
    },
    PlanetEntry {
        name: "Saturn",
        mass: 5.6834e26,
        radius: 6.0268e7,
        orbit_radius: 1.432_041e12,
        orbital_speed: 9_680.0,
        mean_longitude: 49.94,
        inclination: 2.486,
        color: [0.9, 0.85, 0.6, 1.0],
        trail_length: 1000,
    },
    PlanetEntry {
        name: "Uranus",
        mass: 8.6810e25,
        radius: 2.5559e7,
        orbit_radius: 2.867_043e12,
        orbital_speed: 6_790.0,
        mean_longitude: 313.23,
        inclination: 0.773,
        color: [0.6, 0.8, 0.9, 1.0],
        trail_length: 1200,
    },
    PlanetEntry {
        name: "Neptune",
        mass: 1.02413e26,
        radius: 2.4764e7,
        orbit_radius: 4.514_953e12,
        orbital_speed: 5_430.0,
        mean_longitude: 304.88,
        inclination: 1.770,
        color: [0.3, 0.4, 0.8, 1.0],
        trail_length: 1200,
    },
];

/// Position and velocity for a circular orbit at the given longitude.
/// Y is "up" (ecliptic north); the velocity is the in-plane tangent.
fn state_at_longitude(
    orbit_radius: f64,
    orbital_speed: f64,
    longitude_deg: f64,
    inclination_deg: f64,
) -> (DVec3, DVec3) {
    let longitude = longitude_deg.to_radians();
    let inclination = inclination_deg.to_radians();

    let position = DVec3::new(
        orbit_radius * longitude.cos() * inclination.cos(),
        orbit_radius * inclination.sin(),
        orbit_radius * longitude.sin() * inclination.cos(),
    );
    let velocity = DVec3::new(
        -longitude.sin() * orbital_speed,
        0.0,
        longitude.cos() * orbital_speed,
    );

    (position, velocity)
}

/// Build the fixed startup scene: Sun, eight planets, and the Moon.
/// Display radii are precomputed here so the physics layer never sees
/// render scaling.
pub fn solar_system_bodies(render: &RenderConfig) -> Vec<CelestialBody> {
    let mut bodies = Vec::with_capacity(PLANETS.len() + 2);

    bodies.push(
        CelestialBody::new("Sun", SUN_MASS, SUN_RADIUS, DVec3::ZERO, DVec3::ZERO)
            .with_color([1.0, 0.95, 0.8, 1.0])
            .with_display_radius(render.display_radius(SUN_RADIUS))
            .with_trail_length(0),
    );

    for entry in &PLANETS {
        let (position, velocity) = state_at_longitude(
            entry.orbit_radius,
            entry.orbital_speed,
            entry.mean_longitude,
            entry.inclination,
        );
        bodies.push(
            CelestialBody::new(entry.name, entry.mass, entry.radius, position, velocity)
                .with_color(entry.color)
                .with_display_radius(render.display_radius(entry.radius))
                .with_trail_length(entry.trail_length),
        );
    }

    // The Moon rides on Earth's state: displaced outward along Earth's
    // radial, moving with Earth plus its own tangential orbital speed.
    let earth = bodies
        .iter()
        .find(|b| b.name == "Earth")
        .expect("Earth is always seeded");
    let radial = earth.position.normalize();
    let tangent = earth.velocity.normalize();
    let moon_position = earth.position + radial * MOON_DISTANCE;
    let moon_velocity = earth.velocity + tangent * MOON_SPEED;

    bodies.push(
        CelestialBody::new("Moon", MOON_MASS, MOON_RADIUS, moon_position, moon_velocity)
            .with_color([0.75, 0.75, 0.75, 1.0])
            .with_display_radius(render.display_radius(MOON_RADIUS))
            .with_trail_length(90),
    );

    bodies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::BodyRegistry;

    #[test]
    fn seeds_eleven_valid_bodies() {
        let bodies = solar_system_bodies(&RenderConfig::default());
        assert_eq!(bodies.len(), 11);
        let registry = BodyRegistry::new(bodies).expect("seed data must validate");
        assert_eq!(registry.bodies()[0].name, "Sun");
    }

    #[test]
    fn earth_starts_one_au_out_at_orbital_speed() {
        let bodies = solar_system_bodies(&RenderConfig::default());
        let earth = bodies.iter().find(|b| b.name == "Earth").unwrap();
        assert!((earth.position.length() - 1.495_98e11).abs() < 1.0e6);
        assert!((earth.velocity.length() - 29_780.0).abs() < 1.0);
        // velocity is tangential for a circular start
        assert!(earth.position.dot(earth.velocity).abs() / earth.position.length() < 1.0e-6);
    }

    #[test]
    fn moon_rides_with_earth() {
        let bodies = solar_system_bodies(&RenderConfig::default());
        let earth = bodies.iter().find(|b| b.name == "Earth").unwrap();
        let moon = bodies.iter().find(|b| b.name == "Moon").unwrap();
        assert!(((moon.position - earth.position).length() - MOON_DISTANCE).abs() < 1.0);
        assert!(((moon.velocity - earth.velocity).length() - MOON_SPEED).abs() < 1.0);
    }
}
