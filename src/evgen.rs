//! This module provides event generation facilities
//!
//! The calorimeter pipeline consumes particle and track collections produced
//! upstream; for the demo binary, a toy gun stands in for that upstream
//! simulation. It fires a configurable number of final-state particles per
//! event, uniformly in energy, pseudorapidity and azimuth, and hands every
//! charged one a matching reconstructed track.

use crate::{
    event::{Event, Particle, Track},
    momentum::{from_pt_eta_phi_e, Position},
    numeric::{reals::consts::PI, Float},
    random::RandomGenerator,
};
use prefix_num_ops::real::*;
use serde::Deserialize;

/// Species fired by the toy gun, picked uniformly
///
/// Photons appear twice to dominate the mix, as they do downstream of
/// neutral pion decays in a real final state.
///
const SPECIES: [i32; 9] = [22, 22, 11, -11, 211, -211, 2112, 13, -13];

/// Species whose charge leaves a reconstructed track
const CHARGED: [i32; 3] = [11, 211, 13];

/// Toy event generator parameters
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GeneratorConfig {
    /// Number of particles fired per event
    pub particles_per_event: usize,

    /// Lower bound of the uniform particle energy draw
    pub energy_min: Float,

    /// Upper bound of the uniform particle energy draw
    pub energy_max: Float,

    /// Particles are fired with |eta| below this bound
    pub eta_max: Float,

    /// Fractional momentum resolution assigned to every track
    pub track_resolution: Float,
}
//
impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            particles_per_event: 50,
            energy_min: 1.,
            energy_max: 50.,
            eta_max: 2.4,
            track_resolution: 0.01,
        }
    }
}

/// Generator of toy calorimeter input events
pub struct EventGenerator {
    /// Number of particles fired per event
    particles_per_event: usize,

    /// Uniform energy draw bounds
    energy_range: [Float; 2],

    /// Pseudorapidity bound of the fired particles
    eta_max: Float,

    /// Fractional momentum resolution of the emitted tracks
    track_resolution: Float,
}
//
impl EventGenerator {
    /// Initialize event generation from the configured parameters
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            particles_per_event: config.particles_per_event,
            energy_range: [config.energy_min, config.energy_max],
            eta_max: config.eta_max,
            track_resolution: config.track_resolution,
        }
    }

    /// Generate one toy event
    ///
    /// Particle masses are neglected: every 4-momentum is massless and the
    /// track momentum equals the particle momentum, so any track/calorimeter
    /// energy disagreement downstream comes from the resolution model alone.
    ///
    pub fn generate(&self, rng: &mut RandomGenerator) -> Event {
        let mut event = Event::default();

        for _ in 0..self.particles_per_event {
            let pid = SPECIES[rng.index(SPECIES.len())];
            let energy = rng.uniform(self.energy_range[0], self.energy_range[1]);
            let eta = rng.uniform(-self.eta_max, self.eta_max);
            let phi = rng.uniform(-PI, PI);

            let momentum = from_pt_eta_phi_e(energy / cosh(eta), eta, phi, energy);
            event.particles.push(Particle {
                pid,
                momentum,
                position: Position::new(0., 0., 0., rng.uniform(0., 0.05)),
            });

            if CHARGED.contains(&pid.abs()) {
                // The track points where the particle flies; a unit-pt
                // direction vector is all the binning needs as a position
                event.tracks.push(Track {
                    pid,
                    momentum,
                    position: from_pt_eta_phi_e(1., eta, phi, 0.),
                    resolution: self.track_resolution,
                });
            }
        }

        event
    }
}
