//! This module implements some domain-specific 4-vector handling logic.

use crate::numeric::Float;
use nalgebra::SVector;
use prefix_num_ops::real::*;

/// 4-vector dimension
pub const VECTOR_DIM: usize = 4;

/// Relativistic 4-momentum (px, py, pz, E)
pub type Momentum = SVector<Float, VECTOR_DIM>;

/// Space-time 4-position (x, y, z, t)
pub type Position = SVector<Float, VECTOR_DIM>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-momentum
pub const E: usize = 3;

/// Convenience const for accessing the T coordinate of a 4-position
pub const T: usize = 3;

/// Compute the transverse momentum of a 4-vector
pub fn transverse(p: &Momentum) -> Float {
    hypot(p[X], p[Y])
}

/// Compute the pseudorapidity of a 4-vector
///
/// Degenerates to an infinity of the appropriate sign for vectors aligned
/// with the beam axis, which the binning stage maps to "outside acceptance".
///
pub fn pseudorapidity(p: &Momentum) -> Float {
    let norm = hypot(transverse(p), p[Z]);
    atanh(p[Z] / norm)
}

/// Compute the azimuthal angle of a 4-vector, in (-pi, pi]
pub fn azimuth(p: &Momentum) -> Float {
    atan2(p[Y], p[X])
}

/// Build a 4-momentum from transverse momentum, pseudorapidity, azimuth and
/// energy
pub fn from_pt_eta_phi_e(pt: Float, eta: Float, phi: Float, e: Float) -> Momentum {
    Momentum::new(pt * cos(phi), pt * sin(phi), pt * sinh(eta), e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pt_eta_phi_round_trip() {
        let p = from_pt_eta_phi_e(10., 1.2, -0.7, 25.);
        assert_relative_eq!(transverse(&p), 10., max_relative = 1e-12);
        assert_relative_eq!(pseudorapidity(&p), 1.2, max_relative = 1e-12);
        assert_relative_eq!(azimuth(&p), -0.7, max_relative = 1e-12);
        assert_relative_eq!(p[E], 25.);
    }

    #[test]
    fn beam_axis_pseudorapidity_is_infinite() {
        let p = Momentum::new(0., 0., 5., 5.);
        assert!(pseudorapidity(&p).is_infinite());
    }
}
