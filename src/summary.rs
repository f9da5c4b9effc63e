//! This module accumulates per-event pipeline outputs into run-level
//! statistics, and finalizes them for display and storage

use crate::{calorimeter::EventOutput, eflow::NeutralKind, numeric::Float};

/// Running totals over the events processed so far
///
/// One accumulator lives per worker; batches are merged pairwise before
/// finalization, so totals are independent of the batch schedule.
///
#[derive(Default)]
pub struct RunAccumulator {
    /// Number of integrated events
    events: usize,

    /// Number of towers with positive reconstructed energy
    towers: usize,

    /// Number of photon-compatible towers
    photons: usize,

    /// Number of unmodified pass-through flow tracks
    flow_tracks: usize,

    /// Number of rescaled flow tracks
    rescaled_tracks: usize,

    /// Number of photon flow objects
    flow_photons: usize,

    /// Number of neutral-hadron flow objects
    flow_neutral_hadrons: usize,

    /// Summed reconstructed tower energy
    tower_energy: Float,

    /// Summed neutral excess energy
    neutral_energy: Float,
}
//
impl RunAccumulator {
    /// Prepare for results integration
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate one event's outputs into the running totals
    pub fn integrate(&mut self, output: &EventOutput) {
        self.events += 1;
        self.towers += output.towers.len();
        self.photons += output.photons.len();
        self.flow_tracks += output.flow_tracks.len();
        self.rescaled_tracks += output.rescaled_tracks.len();
        for neutral in &output.flow_neutrals {
            match neutral.kind {
                NeutralKind::Photon => self.flow_photons += 1,
                NeutralKind::NeutralHadron => self.flow_neutral_hadrons += 1,
            }
            self.neutral_energy += neutral.energy;
        }
        self.tower_energy += output.towers.iter().map(|tower| tower.energy).sum::<Float>();
    }

    /// Integrate totals accumulated by another worker
    pub fn merge(&mut self, other: Self) {
        self.events += other.events;
        self.towers += other.towers;
        self.photons += other.photons;
        self.flow_tracks += other.flow_tracks;
        self.rescaled_tracks += other.rescaled_tracks;
        self.flow_photons += other.flow_photons;
        self.flow_neutral_hadrons += other.flow_neutral_hadrons;
        self.tower_energy += other.tower_energy;
        self.neutral_energy += other.neutral_energy;
    }

    /// Turn the accumulated totals into finalized results
    pub fn finalize(self) -> RunSummary {
        let per_event = 1. / (self.events.max(1) as Float);
        RunSummary {
            events: self.events,
            towers: self.towers,
            photons: self.photons,
            flow_tracks: self.flow_tracks,
            rescaled_tracks: self.rescaled_tracks,
            flow_photons: self.flow_photons,
            flow_neutral_hadrons: self.flow_neutral_hadrons,
            mean_towers: self.towers as Float * per_event,
            mean_tower_energy: self.tower_energy * per_event,
            mean_neutral_energy: self.neutral_energy * per_event,
        }
    }
}

/// Final results of a run
pub struct RunSummary {
    /// Number of integrated events
    pub events: usize,

    /// Number of towers with positive reconstructed energy
    pub towers: usize,

    /// Number of photon-compatible towers
    pub photons: usize,

    /// Number of unmodified pass-through flow tracks
    pub flow_tracks: usize,

    /// Number of rescaled flow tracks
    pub rescaled_tracks: usize,

    /// Number of photon flow objects
    pub flow_photons: usize,

    /// Number of neutral-hadron flow objects
    pub flow_neutral_hadrons: usize,

    /// Mean tower multiplicity per event
    pub mean_towers: Float,

    /// Mean reconstructed tower energy per event
    pub mean_tower_energy: Float,

    /// Mean neutral excess energy per event
    pub mean_neutral_energy: Float,
}
