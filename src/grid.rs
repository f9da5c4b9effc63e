//! Spatial indexing of the calorimeter cells
//!
//! The calorimeter is segmented in pseudorapidity slices, each of which
//! carries its own azimuthal segmentation. The resulting grid is built once
//! from the configuration, validated at that point, and shared read-only by
//! every event worker afterwards.

use crate::numeric::Float;
use thiserror::Error;

/// Discrete coordinate of one calorimeter tower
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TowerKey {
    /// Pseudorapidity bin index
    pub eta_bin: u16,

    /// Azimuth bin index within that pseudorapidity slice
    pub phi_bin: u16,
}

/// Geometric extent of one calorimeter tower
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Center of the cell in pseudorapidity
    pub eta: Float,

    /// Center of the cell in azimuth
    pub phi: Float,

    /// Lower and upper pseudorapidity edges
    pub eta_edges: [Float; 2],

    /// Lower and upper azimuth edges
    pub phi_edges: [Float; 2],
}

/// Error found while validating the configured grid edges
#[derive(Debug, Error)]
pub enum GridError {
    /// Fewer than 2 pseudorapidity edges were supplied
    #[error("at least 2 pseudorapidity edges are needed, got {0}")]
    TooFewEtaEdges(usize),

    /// The pseudorapidity edges are not strictly increasing
    #[error("pseudorapidity edges must be strictly increasing")]
    UnsortedEtaEdges,

    /// The number of azimuth edge lists does not match the number of slices
    #[error("expected one azimuth edge list per slice ({expected}), got {actual}")]
    SliceCountMismatch {
        /// Number of pseudorapidity slices
        expected: usize,
        /// Number of azimuth edge lists supplied
        actual: usize,
    },

    /// A slice has fewer than 2 azimuth edges
    #[error("slice {0} needs at least 2 azimuth edges, got {1}")]
    TooFewPhiEdges(usize, usize),

    /// A slice's azimuth edges are not strictly increasing
    #[error("azimuth edges of slice {0} must be strictly increasing")]
    UnsortedPhiEdges(usize),
}

/// Immutable (pseudorapidity, azimuth) bin index
///
/// Maps a continuous coordinate pair to the tower containing it. The
/// outermost half-open regions are excluded: a coordinate at or beyond the
/// first or last edge of either axis belongs to no tower.
///
pub struct EtaPhiGrid {
    /// Pseudorapidity edges, strictly increasing
    eta_edges: Vec<Float>,

    /// Azimuth edges per pseudorapidity slice, each strictly increasing
    phi_edges: Vec<Vec<Float>>,
}
//
impl EtaPhiGrid {
    /// Build and validate a grid from configured edge sequences
    pub fn new(eta_edges: Vec<Float>, phi_edges: Vec<Vec<Float>>) -> Result<Self, GridError> {
        if eta_edges.len() < 2 {
            return Err(GridError::TooFewEtaEdges(eta_edges.len()));
        }
        if !strictly_increasing(&eta_edges) {
            return Err(GridError::UnsortedEtaEdges);
        }
        let num_slices = eta_edges.len() - 1;
        if phi_edges.len() != num_slices {
            return Err(GridError::SliceCountMismatch {
                expected: num_slices,
                actual: phi_edges.len(),
            });
        }
        for (slice, edges) in phi_edges.iter().enumerate() {
            if edges.len() < 2 {
                return Err(GridError::TooFewPhiEdges(slice, edges.len()));
            }
            if !strictly_increasing(edges) {
                return Err(GridError::UnsortedPhiEdges(slice));
            }
        }
        Ok(Self {
            eta_edges,
            phi_edges,
        })
    }

    /// Locate the tower containing a continuous (eta, phi) coordinate
    ///
    /// Returns `None` for coordinates at or outside the outer edges, which
    /// is the expected steady-state outcome for particles escaping along the
    /// beam axis, not an error.
    ///
    pub fn locate(&self, eta: Float, phi: Float) -> Option<TowerKey> {
        let eta_bin = locate_in(&self.eta_edges, eta)?;
        let phi_bin = locate_in(&self.phi_edges[eta_bin], phi)?;
        Some(TowerKey {
            eta_bin: eta_bin as u16,
            phi_bin: phi_bin as u16,
        })
    }

    /// Compute the geometric center and edges of a tower
    ///
    /// The key must come from `locate`, so its bins are in range.
    ///
    pub fn cell(&self, key: TowerKey) -> Cell {
        let eta_bin = key.eta_bin as usize;
        let phi_bin = key.phi_bin as usize;
        let eta_edges = [self.eta_edges[eta_bin], self.eta_edges[eta_bin + 1]];
        let phis = &self.phi_edges[eta_bin];
        let phi_edges = [phis[phi_bin], phis[phi_bin + 1]];
        Cell {
            eta: (eta_edges[0] + eta_edges[1]) / 2.,
            phi: (phi_edges[0] + phi_edges[1]) / 2.,
            eta_edges,
            phi_edges,
        }
    }
}

/// Truth that a sequence of edges is strictly increasing
fn strictly_increasing(edges: &[Float]) -> bool {
    edges.windows(2).all(|pair| pair[0] < pair[1])
}

/// Binary search for the bin containing x, excluding the outer regions
fn locate_in(edges: &[Float], x: Float) -> Option<usize> {
    // Negated comparison so that NaN coordinates also land outside
    if !(x > edges[0] && x < edges[edges.len() - 1]) {
        return None;
    }
    // partition_point returns the count of edges at or below x, which is in
    // 1..len-1 here, so the enclosing bin is one less
    Some(edges.partition_point(|&edge| edge <= x) - 1)
}
