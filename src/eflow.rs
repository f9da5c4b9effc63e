//! Energy-flow reconciliation
//!
//! For each finalized tower, decides whether the calorimeter saw
//! significantly more energy than the tracks pointing at it can account for.
//! If so, the excess becomes a neutral particle-flow object and the tracks
//! are trusted as they are; if not, the track momenta are rescaled to the
//! precision-weighted combination of the two energy estimates.

use crate::{
    calorimeter::{CaloSettings, EventOutput},
    event::Event,
    momentum::{from_pt_eta_phi_e, Momentum},
    numeric::{functions::sqr, Float},
    towers::TowerAccumulator,
};
use prefix_num_ops::real::*;

/// Species hypothesis of a neutral flow object
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeutralKind {
    /// Electromagnetic excess: photon hypothesis
    Photon,

    /// Hadronic excess: neutral hadron hypothesis
    NeutralHadron,
}

/// A neutral particle-flow object, built from a tower's unmatched energy
#[derive(Clone, Debug)]
pub struct FlowNeutral {
    /// Species hypothesis
    pub kind: NeutralKind,

    /// 4-momentum carrying the neutral excess energy
    pub momentum: Momentum,

    /// Neutral excess energy
    pub energy: Float,

    /// Position in pseudorapidity (same as the host tower)
    pub eta: Float,

    /// Position in azimuth (same as the host tower)
    pub phi: Float,
}

/// Arbitrate between the tower's calorimeter and track energy estimates
///
/// `energy` and `sigma` are the reconstructed (smeared, floored) tower
/// energy and the resolution it was smeared with; `eta`/`phi` are the
/// emitted tower position. Terminal per tower: every calorimetric track
/// leaves through exactly one of the flow-track outputs, and at most one
/// neutral object is emitted.
///
pub(crate) fn reconcile(
    acc: &TowerAccumulator,
    energy: Float,
    sigma: Float,
    eta: Float,
    phi: Float,
    event: &Event,
    settings: &CaloSettings,
    output: &mut EventOutput,
) {
    let neutral_energy = (energy - acc.track_energy).max(0.);

    // Significance of the excess against both energy estimates' variances.
    // A positive excess with zero total variance is unambiguously real.
    let variance = acc.track_variance + sqr(sigma);
    let significant = neutral_energy > settings.energy_min
        && (variance <= 0. || neutral_energy / sqrt(variance) > settings.significance_min);

    if significant {
        // The calorimeter saw something the tracker did not: emit it as a
        // neutral and leave the charged tracks alone
        let kind = if acc.had_energy < settings.hcal_energy_min {
            NeutralKind::Photon
        } else {
            NeutralKind::NeutralHadron
        };
        output.flow_neutrals.push(FlowNeutral {
            kind,
            momentum: from_pt_eta_phi_e(neutral_energy / cosh(eta), eta, phi, neutral_energy),
            energy: neutral_energy,
            eta,
            phi,
        });
        for &index in &acc.tracks {
            output.flow_tracks.push(event.tracks[index].clone());
        }
    } else if acc.track_energy > 0. {
        // No significant neutral excess: pull the track energies toward the
        // precision-weighted combination of both estimates
        let track_weight = if acc.track_variance > 0. {
            1. / acc.track_variance
        } else {
            0.
        };
        let calo_weight = if sigma > 0. { 1. / sqr(sigma) } else { 0. };
        let best_energy = if track_weight + calo_weight > 0. {
            (track_weight * acc.track_energy + calo_weight * energy) / (track_weight + calo_weight)
        } else {
            acc.track_energy
        };
        let rescale = best_energy / acc.track_energy;
        for &index in &acc.tracks {
            let mut track = event.tracks[index].clone();
            track.momentum *= rescale;
            output.rescaled_tracks.push(track);
        }
    }
    // A tower with neither reconstructed energy nor track energy emits
    // nothing
}
