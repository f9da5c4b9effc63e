//! This module defines the properties and storage of simulated events
//!
//! An event is a flat snapshot of one collision: the final-state particles
//! that reached the detector, and the charged-particle tracks that the
//! tracking system reconstructed from them. Both collections are ordered and
//! indexed; hit keys refer back to them by index.

use crate::{
    momentum::{Momentum, Position, E},
    numeric::Float,
};

/// Species identifier of a photon
pub const PHOTON_ID: i32 = 22;

/// Species identifier of an electron
pub const ELECTRON_ID: i32 = 11;

/// A final-state particle entering the calorimeter
#[derive(Clone, Debug)]
pub struct Particle {
    /// Species identifier (PDG numbering, signed)
    pub pid: i32,

    /// 4-momentum at production
    pub momentum: Momentum,

    /// Production 4-position (x, y, z, t)
    pub position: Position,
}
//
impl Particle {
    /// Particle energy
    pub fn energy(&self) -> Float {
        self.momentum[E]
    }

    /// Truth that the species leaves an electromagnetic-type signature
    pub fn is_electromagnetic(&self) -> bool {
        matches!(self.pid.abs(), ELECTRON_ID | PHOTON_ID)
    }
}

/// A reconstructed track pointing into the calorimeter
#[derive(Clone, Debug)]
pub struct Track {
    /// Species identifier of the matched particle
    pub pid: i32,

    /// Reconstructed 4-momentum
    pub momentum: Momentum,

    /// Extrapolated 4-position at the calorimeter front face
    pub position: Position,

    /// Fractional momentum resolution of the measurement
    pub resolution: Float,
}
//
impl Track {
    /// Track energy
    pub fn energy(&self) -> Float {
        self.momentum[E]
    }

    /// Truth that the matched species is electromagnetic-type
    pub fn is_electromagnetic(&self) -> bool {
        matches!(self.pid.abs(), ELECTRON_ID | PHOTON_ID)
    }
}

/// Storage for one collision event's calorimeter inputs
#[derive(Clone, Debug, Default)]
pub struct Event {
    /// Final-state particles, in production order
    pub particles: Vec<Particle>,

    /// Reconstructed tracks, in reconstruction order
    pub tracks: Vec<Track>,
}
