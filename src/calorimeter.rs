//! Per-event calorimeter pipeline
//!
//! Wires the stages together: hit collection, the sort barrier, tower
//! aggregation, and (per finalized tower) smearing and energy-flow
//! reconciliation. One `Calorimeter` instance serves one worker; it owns its
//! scratch buffers exclusively and only shares the immutable grid, fraction
//! table and settings, so independent workers can process independent events
//! with zero coordination.

use crate::{
    eflow::FlowNeutral,
    event::{Event, Track},
    fractions::SpeciesFractionTable,
    grid::EtaPhiGrid,
    hits::{self, HitKey},
    numeric::Float,
    random::RandomGenerator,
    resolution::ResolutionFormula,
    towers::{self, Tower},
};

/// Calorimeter behaviour parameters, bundled from the configuration
pub struct CaloSettings {
    /// Electromagnetic compartment resolution
    pub ecal_resolution: ResolutionFormula,

    /// Hadronic compartment resolution
    pub hcal_resolution: ResolutionFormula,

    /// Absolute floor on the reconstructed electromagnetic energy
    pub ecal_energy_min: Float,

    /// Absolute floor on the reconstructed hadronic energy; also the
    /// threshold below which a tower counts as purely electromagnetic
    pub hcal_energy_min: Float,

    /// Absolute floor on the reconstructed total energy
    pub energy_min: Float,

    /// Significance floor on the reconstructed electromagnetic energy
    pub ecal_significance_min: Float,

    /// Significance floor on the reconstructed hadronic energy
    pub hcal_significance_min: Float,

    /// Significance floor on the total energy and the neutral excess
    pub significance_min: Float,

    /// Minimum electromagnetic deposit for timing eligibility
    pub timing_energy_min: Float,

    /// Whether tower positions are drawn uniformly within their cell
    pub smear_tower_center: bool,

    /// Threshold below which an energy fraction counts as zero
    pub fraction_epsilon: Float,
}

/// Output collections of one processed event
///
/// Append-only while the event is processed, then immutable. A fresh value
/// is produced for every event.
///
#[derive(Debug, Default)]
pub struct EventOutput {
    /// All towers with positive reconstructed energy
    pub towers: Vec<Tower>,

    /// Towers compatible with a single photon interpretation
    pub photons: Vec<Tower>,

    /// Tracks forwarded unchanged (outside acceptance, invisible to the
    /// calorimeter, or confirmed by a significant neutral excess)
    pub flow_tracks: Vec<Track>,

    /// Tracks rescaled to the combined track/calorimeter energy estimate
    pub rescaled_tracks: Vec<Track>,

    /// Photon and neutral-hadron flow objects
    pub flow_neutrals: Vec<FlowNeutral>,
}

/// One worker's calorimeter pipeline
pub struct Calorimeter<'cfg> {
    /// Spatial index of the calorimeter cells
    grid: &'cfg EtaPhiGrid,

    /// Per-species energy fractions
    fractions: &'cfg SpeciesFractionTable,

    /// Behaviour parameters
    settings: &'cfg CaloSettings,

    /// Per-event hit buffer, reused across events
    hits: Vec<HitKey>,
}
//
impl<'cfg> Calorimeter<'cfg> {
    /// Set up a pipeline over shared immutable detector state
    pub fn new(
        grid: &'cfg EtaPhiGrid,
        fractions: &'cfg SpeciesFractionTable,
        settings: &'cfg CaloSettings,
    ) -> Self {
        Self {
            grid,
            fractions,
            settings,
            hits: Vec::new(),
        }
    }

    /// Process one event into its output collections
    ///
    /// The stages run strictly in sequence: the sort is a global barrier
    /// over all of the event's hits, so no tower can be finalized before
    /// collection is complete.
    ///
    pub fn process(&mut self, event: &Event, rng: &mut RandomGenerator) -> EventOutput {
        let mut output = EventOutput::default();

        self.hits.clear();
        hits::collect(
            event,
            self.fractions,
            self.grid,
            self.settings.fraction_epsilon,
            &mut self.hits,
            &mut output.flow_tracks,
        );
        self.hits.sort_unstable();
        towers::aggregate(
            &self.hits,
            event,
            self.grid,
            self.fractions,
            self.settings,
            rng,
            &mut output,
        );

        output
    }
}
