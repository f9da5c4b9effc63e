//! Mechanism for loading and sharing the simulation configuration

use crate::{
    calorimeter::CaloSettings,
    evgen::GeneratorConfig,
    fractions::{EnergyFractions, SpeciesFractionTable},
    grid::EtaPhiGrid,
    numeric::Float,
    resolution::ResolutionFormula,
    Result,
};

use anyhow::{ensure, Context};
use serde::Deserialize;
use std::fs;

/// Simulation configuration
///
/// Deserialized from a TOML file once at startup, validated, and read-only
/// afterwards. Every knob of the calorimeter pipeline lives here; the
/// pipeline structs themselves are built from it via the accessors below.
///
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Number of events to be simulated
    pub events: usize,

    /// Seed of the random number generator
    #[serde(default = "defaults::seed")]
    pub seed: u64,

    /// Calorimeter cell edges
    pub grid: GridConfig,

    /// Per-species electromagnetic/hadronic energy fractions
    #[serde(default)]
    pub energy_fractions: Vec<FractionEntry>,

    /// Electromagnetic compartment resolution terms
    #[serde(default)]
    pub ecal_resolution: ResolutionFormula,

    /// Hadronic compartment resolution terms
    #[serde(default)]
    pub hcal_resolution: ResolutionFormula,

    /// Absolute floor on the reconstructed electromagnetic energy
    #[serde(default)]
    pub ecal_energy_min: Float,

    /// Absolute floor on the reconstructed hadronic energy
    #[serde(default)]
    pub hcal_energy_min: Float,

    /// Absolute floor on the reconstructed total energy
    #[serde(default)]
    pub energy_min: Float,

    /// Significance floor on the reconstructed electromagnetic energy
    #[serde(default)]
    pub ecal_significance_min: Float,

    /// Significance floor on the reconstructed hadronic energy
    #[serde(default)]
    pub hcal_significance_min: Float,

    /// Significance floor on the total energy and the neutral excess
    #[serde(default)]
    pub significance_min: Float,

    /// Minimum electromagnetic deposit for timing eligibility
    #[serde(default = "defaults::timing_energy_min")]
    pub timing_energy_min: Float,

    /// Whether tower positions are drawn uniformly within their cell
    #[serde(default = "defaults::smear_tower_center")]
    pub smear_tower_center: bool,

    /// Threshold below which an energy fraction counts as zero
    #[serde(default = "defaults::fraction_epsilon")]
    pub fraction_epsilon: Float,

    /// Toy event generator parameters
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Calorimeter cell edge configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Pseudorapidity edges, strictly increasing
    pub eta_edges: Vec<Float>,

    /// Azimuth edges, one strictly increasing list per pseudorapidity slice
    pub phi_edges: Vec<Vec<Float>>,
}

/// One configured species -> energy fraction pair
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FractionEntry {
    /// Species identifier; 0 overrides the wildcard entry
    pub pid: i32,

    /// Electromagnetic fraction, in [0, 1]
    pub em: Float,

    /// Hadronic fraction, in [0, 1]
    pub had: Float,
}

/// Default values for optional configuration items
mod defaults {
    use crate::numeric::Float;

    pub fn seed() -> u64 {
        12345
    }

    pub fn timing_energy_min() -> Float {
        4.
    }

    pub fn smear_tower_center() -> bool {
        true
    }

    pub fn fraction_epsilon() -> Float {
        1e-9
    }
}
//
impl Configuration {
    /// Load the configuration from a file, check it, and print it out
    pub fn load(file_name: &str) -> Result<Self> {
        let config_str = fs::read_to_string(file_name)
            .with_context(|| format!("Could not read configuration file {file_name}"))?;
        let config: Configuration =
            toml::from_str(&config_str).context("Could not parse the configuration")?;

        // A sensible simulation must run for at least one event
        ensure!(config.events > 0, "Please simulate at least one event");

        // Fractions outside [0, 1] would silently create or destroy energy
        for entry in &config.energy_fractions {
            ensure!(
                (0. ..=1.).contains(&entry.em) && (0. ..=1.).contains(&entry.had),
                "Energy fractions of species {} must lie in [0, 1]",
                entry.pid
            );
        }

        ensure!(
            config.fraction_epsilon >= 0.,
            "The negligible-fraction threshold cannot be negative"
        );

        ensure!(
            config.generator.particles_per_event > 0
                && config.generator.energy_min > 0.
                && config.generator.energy_max > config.generator.energy_min,
            "The generator needs particles to fire and a non-empty energy range"
        );

        // The grid edges get their full validation in EtaPhiGrid::new; doing
        // it here too would duplicate the rules
        config.print();
        Ok(config)
    }

    /// Display the configuration's main knobs
    pub fn print(&self) {
        println!("events              : {}", self.events);
        println!("seed                : {}", self.seed);
        println!("eta slices          : {}", self.grid.eta_edges.len().saturating_sub(1));
        println!("species fractions   : {}", self.energy_fractions.len());
        println!("ecal/hcal/total Emin: {} / {} / {}",
            self.ecal_energy_min, self.hcal_energy_min, self.energy_min);
        println!("significance floors : {} / {} / {}",
            self.ecal_significance_min, self.hcal_significance_min, self.significance_min);
        println!("timing Emin         : {}", self.timing_energy_min);
        println!("smear tower center  : {}", self.smear_tower_center);
    }

    /// Build the bin index from the configured edges
    pub fn build_grid(&self) -> Result<EtaPhiGrid> {
        let grid = EtaPhiGrid::new(self.grid.eta_edges.clone(), self.grid.phi_edges.clone())
            .context("Invalid calorimeter grid")?;
        Ok(grid)
    }

    /// Build the species fraction table from the configured pairs
    pub fn build_fractions(&self) -> SpeciesFractionTable {
        SpeciesFractionTable::new(self.energy_fractions.iter().map(|entry| {
            (
                entry.pid,
                EnergyFractions {
                    em: entry.em,
                    had: entry.had,
                },
            )
        }))
    }

    /// Bundle the calorimeter behaviour parameters
    pub fn build_settings(&self) -> CaloSettings {
        CaloSettings {
            ecal_resolution: self.ecal_resolution.clone(),
            hcal_resolution: self.hcal_resolution.clone(),
            ecal_energy_min: self.ecal_energy_min,
            hcal_energy_min: self.hcal_energy_min,
            energy_min: self.energy_min,
            ecal_significance_min: self.ecal_significance_min,
            hcal_significance_min: self.hcal_significance_min,
            significance_min: self.significance_min,
            timing_energy_min: self.timing_energy_min,
            smear_tower_center: self.smear_tower_center,
            fraction_epsilon: self.fraction_epsilon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_configuration_fills_in_defaults() {
        let config: Configuration = toml::from_str(
            r#"
            events = 10
            [grid]
            eta_edges = [-1.0, 1.0]
            phi_edges = [[-3.2, 3.2]]
            "#,
        )
        .expect("configuration is well-formed");
        assert_eq!(config.seed, 12345);
        assert_eq!(config.timing_energy_min, 4.);
        assert!(config.smear_tower_center);
        assert_eq!(config.fraction_epsilon, 1e-9);
        assert!(config.build_grid().is_ok());
    }

    #[test]
    fn resolution_terms_parse_from_table_arrays() {
        let config: Configuration = toml::from_str(
            r#"
            events = 1
            [grid]
            eta_edges = [-1.0, 1.0]
            phi_edges = [[-3.2, 3.2]]
            [[ecal_resolution]]
            eta_max = 1.5
            stochastic = 0.1
            constant = 0.01
            "#,
        )
        .expect("configuration is well-formed");
        assert!(config.ecal_resolution.eval(0.5, 100.) > 0.);
        assert_eq!(config.hcal_resolution.eval(0.5, 100.), 0.);
    }
}
