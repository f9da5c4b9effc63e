//! Shared fixtures: a small uniform detector and transparent settings that
//! disable every stochastic effect, so tests observe the pipeline's
//! arithmetic directly.

#![allow(dead_code)]

use calflow::{
    calorimeter::{CaloSettings, Calorimeter, EventOutput},
    event::{Event, Particle, Track},
    fractions::{EnergyFractions, SpeciesFractionTable},
    grid::EtaPhiGrid,
    momentum::{from_pt_eta_phi_e, Position},
    numeric::Float,
    random::RandomGenerator,
    resolution::ResolutionFormula,
};

/// A 4 x 6 uniform grid: eta in [-2, 2] by 1, phi in [-3, 3] by 1
pub fn uniform_grid() -> EtaPhiGrid {
    let phi_edges: Vec<Float> = (-3..=3).map(|i| i as Float).collect();
    EtaPhiGrid::new(
        (-2..=2).map(|i| i as Float).collect(),
        vec![phi_edges; 4],
    )
    .expect("fixture edges are valid")
}

/// Settings with no smearing, no floors and no tower-center smearing
pub fn transparent_settings() -> CaloSettings {
    CaloSettings {
        ecal_resolution: ResolutionFormula::default(),
        hcal_resolution: ResolutionFormula::default(),
        ecal_energy_min: 0.,
        hcal_energy_min: 0.,
        energy_min: 0.,
        ecal_significance_min: 0.,
        hcal_significance_min: 0.,
        significance_min: 0.,
        timing_energy_min: 4.,
        smear_tower_center: false,
        fraction_epsilon: 1e-9,
    }
}

/// Fraction table: photons/electrons electromagnetic, muons invisible,
/// everything else fully hadronic via the wildcard
pub fn em_had_table() -> SpeciesFractionTable {
    SpeciesFractionTable::new([
        (22, EnergyFractions { em: 1., had: 0. }),
        (11, EnergyFractions { em: 1., had: 0. }),
        (13, EnergyFractions { em: 0., had: 0. }),
    ])
}

/// Build a massless particle flying in the (eta, phi) direction
pub fn particle(pid: i32, energy: Float, eta: Float, phi: Float) -> Particle {
    Particle {
        pid,
        momentum: from_pt_eta_phi_e(energy / eta.cosh(), eta, phi, energy),
        position: Position::new(0., 0., 0., 0.),
    }
}

/// Build a track whose calorimeter entry point is the (eta, phi) direction
pub fn track(pid: i32, energy: Float, eta: Float, phi: Float, resolution: Float) -> Track {
    Track {
        pid,
        momentum: from_pt_eta_phi_e(energy / eta.cosh(), eta, phi, energy),
        position: from_pt_eta_phi_e(1., eta, phi, 0.),
        resolution,
    }
}

/// Run one event through a pipeline built on the shared fixtures
pub fn process(event: &Event, settings: &CaloSettings) -> EventOutput {
    let grid = uniform_grid();
    let fractions = em_had_table();
    let mut calorimeter = Calorimeter::new(&grid, &fractions, settings);
    let mut rng = RandomGenerator::new(42);
    calorimeter.process(event, &mut rng)
}
