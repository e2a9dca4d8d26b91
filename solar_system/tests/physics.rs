//! Physical-property tests for the gravity integrator

use glam::DVec3;
use solar_system::bodies::{BodyRegistry, CelestialBody};
use solar_system::config::{RenderConfig, SimConfig, GRAVITATIONAL_CONSTANT};
use solar_system::ephemeris;
use solar_system::physics::GravityIntegrator;

const SUN_MASS: f64 = 1.989e30;
const EARTH_MASS: f64 = 5.972e24;
const AU: f64 = 1.496e11;
const DAY: f64 = 86_400.0;

fn body(name: &str, mass: f64, position: DVec3, velocity: DVec3) -> CelestialBody {
    CelestialBody::new(name, mass, 1.0, position, velocity)
}

fn integrator(bodies: Vec<CelestialBody>, dt: f64) -> GravityIntegrator {
    GravityIntegrator::new(
        BodyRegistry::new(bodies).expect("test bodies must validate"),
        &SimConfig::new(dt),
    )
}

/// Sun at the origin plus a planet on a circular orbit in the XZ plane
fn circular_system(orbit_radius: f64, planet_mass: f64) -> Vec<CelestialBody> {
    let speed = (GRAVITATIONAL_CONSTANT * SUN_MASS / orbit_radius).sqrt();
    vec![
        body("Sun", SUN_MASS, DVec3::ZERO, DVec3::ZERO),
        body(
            "planet",
            planet_mass,
            DVec3::new(orbit_radius, 0.0, 0.0),
            DVec3::new(0.0, 0.0, speed),
        ),
    ]
}

// ==================================================================================
// Symmetry and degenerate-case policies
// ==================================================================================

#[test]
fn equal_masses_stay_mirror_symmetric() {
    let separation = 2.0e9;
    let mass = 1.0e26;
    let mut sim = integrator(
        vec![
            body("a", mass, DVec3::new(-separation / 2.0, 0.0, 0.0), DVec3::ZERO),
            body("b", mass, DVec3::new(separation / 2.0, 0.0, 0.0), DVec3::ZERO),
        ],
        100.0,
    );

    for _ in 0..10 {
        sim.update();
    }

    let a = &sim.bodies()[0];
    let b = &sim.bodies()[1];

    // positions mirror about the origin, velocities are opposite
    assert!((a.position + b.position).length() < 1.0e-3);
    assert!((a.velocity + b.velocity).length() < 1.0e-9);

    // and they attract: both moved inward
    assert!(a.position.x > -separation / 2.0);
    assert!(b.position.x < separation / 2.0);
}

#[test]
fn coincident_bodies_exert_no_force() {
    let position = DVec3::new(1.0e9, -2.0e9, 3.0e9);
    let mut sim = integrator(
        vec![
            body("a", 1.0e26, position, DVec3::ZERO),
            body("b", 1.0e26, position, DVec3::ZERO),
        ],
        100.0,
    );

    for _ in 0..5 {
        sim.update();
    }

    for b in sim.bodies() {
        assert!(b.position.is_finite());
        assert!(b.velocity.is_finite());
        // zero force and zero initial velocity: nothing moves
        assert_eq!(b.position, position);
        assert_eq!(b.velocity, DVec3::ZERO);
    }
}

#[test]
fn massless_tracer_feels_no_gravity() {
    let velocity = DVec3::new(1_000.0, 0.0, 0.0);
    let mut sim = integrator(
        circular_system(AU, EARTH_MASS)
            .into_iter()
            .chain(std::iter::once(body(
                "tracer",
                0.0,
                DVec3::new(0.0, 1.0e10, 0.0),
                velocity,
            )))
            .collect(),
        DAY,
    );

    for _ in 0..50 {
        sim.update();
    }

    let tracer = sim.find_body("tracer").unwrap();
    assert_eq!(tracer.velocity, velocity);
    assert!(tracer.position.y == 1.0e10);
}

#[test]
fn massless_tracer_exerts_no_gravity() {
    let dt = DAY;
    let steps = 50;

    let mut without = integrator(circular_system(AU, EARTH_MASS), dt);
    let mut with = integrator(
        circular_system(AU, EARTH_MASS)
            .into_iter()
            .chain(std::iter::once(body(
                "tracer",
                0.0,
                DVec3::new(1.0e10, 2.0e10, 3.0e10),
                DVec3::new(0.0, 500.0, 0.0),
            )))
            .collect(),
        dt,
    );

    for _ in 0..steps {
        without.update();
        with.update();
    }

    // the tracer's presence changes nothing, bit for bit
    for (a, b) in without.bodies().iter().zip(with.bodies()) {
        assert_eq!(a.position, b.position, "{} diverged", a.name);
        assert_eq!(a.velocity, b.velocity, "{} diverged", a.name);
    }
}

// ==================================================================================
// Trajectory accuracy
// ==================================================================================

#[test]
fn circular_orbit_returns_to_start() {
    let orbit_radius = 1.0e11;
    let speed = (GRAVITATIONAL_CONSTANT * SUN_MASS / orbit_radius).sqrt();
    let period = std::f64::consts::TAU * orbit_radius / speed;
    let steps = 2000;

    // planet light enough that the Sun barely moves
    let mut sim = integrator(circular_system(orbit_radius, 1.0e20), period / steps as f64);
    let start = sim.find_body("planet").unwrap().position;

    for _ in 0..steps {
        sim.update();
    }

    let end = sim.find_body("planet").unwrap().position;
    let miss = (end - start).length();
    assert!(
        miss < 1.0e-3 * orbit_radius,
        "orbit failed to close: miss = {:.3e} m",
        miss
    );
}

#[test]
fn earth_year_scenario() {
    // Sun at rest at the origin, Earth at 1 AU with the mean orbital
    // speed, one day per step, one year of steps.
    let mut sim = integrator(
        vec![
            body("Sun", 1.989e30, DVec3::ZERO, DVec3::ZERO),
            body(
                "Earth",
                EARTH_MASS,
                DVec3::new(1.496e11, 0.0, 0.0),
                DVec3::new(0.0, 29_780.0, 0.0),
            ),
        ],
        DAY,
    );

    let start = sim.find_body("Earth").unwrap().position;

    for _ in 0..365 {
        sim.update();
    }

    let sun = sim.find_body("Sun").unwrap().position;
    let earth = sim.find_body("Earth").unwrap().position;

    // radius from the Sun holds to within 1%
    let radius = (earth - sun).length();
    assert!(
        (radius - 1.496e11).abs() < 0.01 * 1.496e11,
        "orbital radius drifted to {:.4e} m",
        radius
    );

    // and the year nearly closes (365 days vs. the true 365.25)
    let miss = (earth - start).length();
    assert!(
        miss < 0.02 * 1.496e11,
        "Earth missed its starting point by {:.3e} m",
        miss
    );
}

#[test]
fn energy_drift_stays_bounded_over_an_orbit() {
    let orbit_radius = 1.0e11;
    let speed = (GRAVITATIONAL_CONSTANT * SUN_MASS / orbit_radius).sqrt();
    let period = std::f64::consts::TAU * orbit_radius / speed;
    let steps = 1000;

    let mut sim = integrator(circular_system(orbit_radius, 1.0e24), period / steps as f64);
    let initial_energy = sim.total_energy();

    for _ in 0..steps {
        sim.update();
    }

    let drift = (sim.total_energy() - initial_energy).abs() / initial_energy.abs();
    assert!(drift < 1.0e-3, "relative energy drift = {:.3e}", drift);
}

// ==================================================================================
// Determinism and the full seeded scene
// ==================================================================================

#[test]
fn runs_are_deterministic() {
    let seed = || ephemeris::solar_system_bodies(&RenderConfig::default());
    let config = SimConfig::default();

    let mut first = GravityIntegrator::new(BodyRegistry::new(seed()).unwrap(), &config);
    let mut second = GravityIntegrator::new(BodyRegistry::new(seed()).unwrap(), &config);

    for _ in 0..200 {
        first.update();
        second.update();
    }

    for (a, b) in first.bodies().iter().zip(second.bodies()) {
        assert_eq!(a.position, b.position, "{} diverged", a.name);
        assert_eq!(a.velocity, b.velocity, "{} diverged", a.name);
        assert_eq!(a.velocity_half_step, b.velocity_half_step, "{} diverged", a.name);
    }
}

#[test]
fn seeded_solar_system_survives_a_year() {
    let mut sim = GravityIntegrator::new(
        BodyRegistry::new(ephemeris::solar_system_bodies(&RenderConfig::default())).unwrap(),
        &SimConfig::default(),
    );

    let initial_radii: Vec<(String, f64)> = sim
        .bodies()
        .iter()
        .map(|b| (b.name.clone(), b.position.length()))
        .collect();

    for _ in 0..365 {
        sim.update();
    }

    for b in sim.bodies() {
        assert!(b.position.is_finite(), "{} went non-finite", b.name);
        assert!(b.velocity.is_finite(), "{} went non-finite", b.name);
    }

    // planets hold their nearly-circular heliocentric radii
    let sun = sim.find_body("Sun").unwrap().position;
    for (name, initial_radius) in &initial_radii {
        if name == "Sun" || name == "Moon" {
            continue;
        }
        let radius = (sim.find_body(name).unwrap().position - sun).length();
        assert!(
            (radius - initial_radius).abs() < 0.1 * initial_radius,
            "{name} drifted from {initial_radius:.3e} to {radius:.3e} m"
        );
    }

    // the Moon stays in Earth's neighborhood
    let earth = sim.find_body("Earth").unwrap().position;
    let moon = sim.find_body("Moon").unwrap().position;
    assert!((moon - earth).length() < 5.0e9);
}
