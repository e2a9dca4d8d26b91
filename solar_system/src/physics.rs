//! N-body gravitational dynamics
//!
//! Velocity-Verlet integration over direct pairwise Newtonian gravity.
//! Each body carries its half-step velocity `v(t + dt/2)` between calls,
//! so one force evaluation per step is enough: positions advance on the
//! carried half-step velocity, then accelerations at the new positions
//! finish the current velocity and pre-kick the next half step.

use glam::DVec3;

use crate::bodies::{BodyRegistry, CelestialBody};
use crate::config::SimConfig;

/// Advances the registry by a fixed time step per `update()` call.
///
/// Owns the body arena; the renderer gets a borrowed read view through
/// [`bodies`](Self::bodies). A step is atomic from the caller's
/// perspective: between calls every body is at the same whole-step time.
pub struct GravityIntegrator {
    registry: BodyRegistry,
    gravitational_constant: f64,
    time_step: f64,
    elapsed: f64,
    pub record_trails: bool,
}

impl GravityIntegrator {
    /// Consume the registry and prime each body's half-step velocity with
    /// the accelerations at the starting positions:
    /// `v(t0 + dt/2) = v(t0) + a(t0) * dt/2`.
    pub fn new(registry: BodyRegistry, config: &SimConfig) -> Self {
        let mut integrator = Self {
            registry,
            gravitational_constant: config.gravitational_constant,
            time_step: config.time_step,
            elapsed: 0.0,
            record_trails: true,
        };

        let accelerations = integrator.accelerations();
        let half_dt = 0.5 * integrator.time_step;
        for (body, accel) in integrator
            .registry
            .bodies_mut()
            .iter_mut()
            .zip(&accelerations)
        {
            body.velocity_half_step = body.velocity + *accel * half_dt;
        }

        log::info!(
            "integrator ready: {} bodies, dt = {:.0} s",
            integrator.registry.len(),
            integrator.time_step
        );

        integrator
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        self.registry.bodies()
    }

    pub fn find_body(&self, name: &str) -> Option<&CelestialBody> {
        self.registry.find(name)
    }

    /// Seconds of simulated time per `update()` call
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Total simulated seconds advanced so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance every body by one time step, in place.
    ///
    /// All positions move from the pre-call snapshot first; forces are
    /// then evaluated once at the new positions and that single
    /// evaluation serves both the velocity finalization and the next
    /// half-step pre-kick. No body ever observes a half-advanced peer.
    pub fn update(&mut self) {
        let dt = self.time_step;

        // x(t+dt) = x(t) + v(t+dt/2) * dt
        for body in self.registry.bodies_mut() {
            body.position += body.velocity_half_step * dt;
        }

        // a(t+dt), evaluated after every position has moved
        let accelerations = self.accelerations();

        let half_dt = 0.5 * dt;
        let record_trails = self.record_trails;
        for (body, accel) in self.registry.bodies_mut().iter_mut().zip(&accelerations) {
            // v(t+dt) = v(t+dt/2) + a(t+dt) * dt/2
            body.velocity = body.velocity_half_step + *accel * half_dt;
            // v(t+3dt/2) = v(t+dt) + a(t+dt) * dt/2, carried to the next call
            body.velocity_half_step = body.velocity + *accel * half_dt;

            if record_trails {
                body.update_trail();
            }
        }

        self.elapsed += dt;
    }

    /// Acceleration on every body from direct ordered-pair summation.
    /// Coincident pairs contribute zero force; massless bodies feel zero
    /// acceleration. Neither is an error.
    fn accelerations(&self) -> Vec<DVec3> {
        let bodies = self.registry.bodies();
        let mut accelerations = vec![DVec3::ZERO; bodies.len()];

        for (i, body_i) in bodies.iter().enumerate() {
            if body_i.mass <= 0.0 {
                continue;
            }

            let mut total_force = DVec3::ZERO;
            for (j, body_j) in bodies.iter().enumerate() {
                if i != j {
                    total_force += gravitational_force(self.gravitational_constant, body_i, body_j);
                }
            }

            accelerations[i] = total_force / body_i.mass;
        }

        accelerations
    }

    /// Total mechanical energy (kinetic + pairwise potential), J.
    /// Conserved only approximately under Verlet; drift stays bounded.
    pub fn total_energy(&self) -> f64 {
        let bodies = self.registry.bodies();
        let mut kinetic = 0.0;
        let mut potential = 0.0;

        for (i, body_i) in bodies.iter().enumerate() {
            kinetic += 0.5 * body_i.mass * body_i.velocity.length_squared();

            for body_j in bodies.iter().skip(i + 1) {
                let distance = (body_j.position - body_i.position).length();
                if distance > 0.0 {
                    potential -=
                        self.gravitational_constant * body_i.mass * body_j.mass / distance;
                }
            }
        }

        kinetic + potential
    }

    /// Mass-weighted mean position, m
    pub fn center_of_mass(&self) -> DVec3 {
        let mut total_mass = 0.0;
        let mut weighted = DVec3::ZERO;

        for body in self.registry.bodies() {
            weighted += body.position * body.mass;
            total_mass += body.mass;
        }

        if total_mass > 0.0 {
            weighted / total_mass
        } else {
            DVec3::ZERO
        }
    }
}

/// Force on `body_i` due to `body_j`: `G m_i m_j / d²` along the
/// separation. Exactly coincident bodies contribute the zero vector —
/// an explicit degenerate-case policy, not an epsilon softening.
fn gravitational_force(g: f64, body_i: &CelestialBody, body_j: &CelestialBody) -> DVec3 {
    let r = body_j.position - body_i.position;
    let distance = r.length();

    if distance == 0.0 {
        return DVec3::ZERO;
    }

    let magnitude = g * body_i.mass * body_j.mass / (distance * distance);
    magnitude * (r / distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GRAVITATIONAL_CONSTANT;

    fn two_body_registry(separation: f64, m1: f64, m2: f64) -> BodyRegistry {
        BodyRegistry::new(vec![
            CelestialBody::new(
                "a",
                m1,
                1.0,
                DVec3::new(-separation / 2.0, 0.0, 0.0),
                DVec3::ZERO,
            ),
            CelestialBody::new(
                "b",
                m2,
                1.0,
                DVec3::new(separation / 2.0, 0.0, 0.0),
                DVec3::ZERO,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn construction_primes_half_step_velocities() {
        let separation = 1.0e9;
        let mass = 1.0e24;
        let dt = 100.0;
        let integrator =
            GravityIntegrator::new(two_body_registry(separation, mass, mass), &SimConfig::new(dt));

        // a(t0) toward the other body, magnitude G m / d²
        let expected = GRAVITATIONAL_CONSTANT * mass / (separation * separation);
        let half_kick = integrator.bodies()[0].velocity_half_step;
        assert!((half_kick.x - expected * dt / 2.0).abs() / (expected * dt / 2.0) < 1e-12);
        assert_eq!(half_kick.y, 0.0);
        assert_eq!(half_kick.z, 0.0);
    }

    #[test]
    fn force_is_inverse_square() {
        let near = two_body_registry(1.0e9, 1.0e24, 1.0e24);
        let far = two_body_registry(2.0e9, 1.0e24, 1.0e24);

        let f_near =
            gravitational_force(GRAVITATIONAL_CONSTANT, &near.bodies()[0], &near.bodies()[1]);
        let f_far = gravitational_force(GRAVITATIONAL_CONSTANT, &far.bodies()[0], &far.bodies()[1]);

        let ratio = f_near.length() / f_far.length();
        assert!((ratio - 4.0).abs() < 1e-9, "expected ~4x, got {ratio}");
    }

    #[test]
    fn update_advances_elapsed_time_by_exactly_dt() {
        let mut integrator =
            GravityIntegrator::new(two_body_registry(1.0e9, 1.0e24, 1.0e24), &SimConfig::new(250.0));
        for _ in 0..4 {
            integrator.update();
        }
        assert_eq!(integrator.elapsed(), 1000.0);
    }

    #[test]
    fn center_of_mass_of_equal_pair_is_the_midpoint() {
        let mut integrator =
            GravityIntegrator::new(two_body_registry(1.0e9, 1.0e24, 1.0e24), &SimConfig::new(100.0));
        integrator.update();
        assert!(integrator.center_of_mass().length() < 1.0e-3);
    }
}
