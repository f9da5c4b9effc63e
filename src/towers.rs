//! Tower aggregation
//!
//! Consumes the sorted hit stream and reduces it tower by tower. Exactly one
//! accumulator is live at any point: because the hits are sorted, all
//! contributions to a tower form one contiguous run, and the accumulator can
//! be finalized the moment the run ends. This trades a hash map's random
//! access for one sort followed by a single linear pass, and bounds the
//! working state to one tower's worth.

use crate::{
    calorimeter::{CaloSettings, EventOutput},
    eflow,
    event::Event,
    fractions::SpeciesFractionTable,
    grid::{Cell, EtaPhiGrid, TowerKey},
    hits::HitKey,
    momentum::{from_pt_eta_phi_e, Momentum, T},
    numeric::{functions::sqr, Float},
    random::RandomGenerator,
    resolution::{apply_floors, log_normal},
};
use prefix_num_ops::real::*;

/// One reconstructed calorimeter tower
#[derive(Clone, Debug)]
pub struct Tower {
    /// Reconstructed 4-momentum, massless, pointing at the tower position
    pub momentum: Momentum,

    /// Tower position in pseudorapidity
    pub eta: Float,

    /// Tower position in azimuth
    pub phi: Float,

    /// Total reconstructed energy
    pub energy: Float,

    /// Reconstructed electromagnetic compartment energy
    pub em_energy: Float,

    /// Reconstructed hadronic compartment energy
    pub had_energy: Float,

    /// Summed energy of the tracks pointing at this tower
    pub track_energy: Float,

    /// Weighted mean arrival time of the electromagnetic deposits
    pub time: Float,

    /// Lower and upper pseudorapidity cell edges
    pub eta_edges: [Float; 2],

    /// Lower and upper azimuth cell edges
    pub phi_edges: [Float; 2],
}

/// Working state of the tower currently being accumulated
pub(crate) struct TowerAccumulator {
    /// Discrete coordinate of the tower
    key: TowerKey,

    /// Geometric extent of the tower
    pub(crate) cell: Cell,

    /// Summed true electromagnetic energy of the particle hits
    pub(crate) em_energy: Float,

    /// Summed true hadronic energy of the particle hits
    pub(crate) had_energy: Float,

    /// Summed energy of the track hits
    pub(crate) track_energy: Float,

    /// Summed squared absolute energy resolution of the calorimetric tracks
    pub(crate) track_variance: Float,

    /// Weighted arrival-time accumulator of the electromagnetic deposits
    time_sum: Float,

    /// Total weight matching `time_sum`
    time_weight: Float,

    /// Number of particle hits
    particle_hits: u32,

    /// Number of electromagnetic-type particle hits
    em_hits: u32,

    /// Number of track hits
    track_hits: u32,

    /// Calorimetric tracks retained for energy-flow reconciliation, as
    /// indices into the event's track collection
    pub(crate) tracks: Vec<usize>,
}
//
impl TowerAccumulator {
    /// Open a fresh accumulator for a newly observed tower
    fn new(key: TowerKey, cell: Cell) -> Self {
        Self {
            key,
            cell,
            em_energy: 0.,
            had_energy: 0.,
            track_energy: 0.,
            track_variance: 0.,
            time_sum: 0.,
            time_weight: 0.,
            particle_hits: 0,
            em_hits: 0,
            track_hits: 0,
            tracks: Vec::new(),
        }
    }
}

/// Reduce a sorted hit stream into finalized towers and flow objects
///
/// The hits must be sorted by raw key value; grouping relies on equal
/// (etaBin, phiBin) prefixes being contiguous.
///
pub(crate) fn aggregate(
    hits: &[HitKey],
    event: &Event,
    grid: &EtaPhiGrid,
    fractions: &SpeciesFractionTable,
    settings: &CaloSettings,
    rng: &mut RandomGenerator,
    output: &mut EventOutput,
) {
    let mut current: Option<TowerAccumulator> = None;

    for &hit in hits {
        let key = hit.tower();

        // A key prefix change ends the current tower's run
        if current.as_ref().map_or(true, |acc| acc.key != key) {
            if let Some(acc) = current.take() {
                finalize(acc, event, settings, rng, output);
            }
            current = Some(TowerAccumulator::new(key, grid.cell(key)));
        }
        let acc = current.as_mut().expect("an accumulator is always open here");

        if hit.is_track() {
            let index = hit.index();
            let track = &event.tracks[index];
            let f = fractions.lookup(track.pid);
            let energy = track.energy();
            acc.track_hits += 1;
            acc.track_energy += (f.em + f.had) * energy;
            if f.em > settings.fraction_epsilon || f.had > settings.fraction_epsilon {
                // Calorimetric track: its energy estimate competes with the
                // calorimeter's, so keep it around for reconciliation
                acc.track_variance += sqr(track.resolution * energy);
                acc.tracks.push(index);
            } else {
                // Muon-like track, invisible to the calorimeter
                output.flow_tracks.push(track.clone());
            }
        } else {
            let particle = &event.particles[hit.index()];
            let f = fractions.lookup(particle.pid);
            let energy = particle.energy();
            let em = f.em * energy;
            acc.em_energy += em;
            acc.had_energy += f.had * energy;
            if em > settings.timing_energy_min {
                let weight = sqrt(em);
                acc.time_sum += weight * particle.position[T];
                acc.time_weight += weight;
            }
            acc.particle_hits += 1;
            if hit.is_electromagnetic() {
                acc.em_hits += 1;
            }
        }
    }

    // The last tower's run ends with the stream
    if let Some(acc) = current.take() {
        finalize(acc, event, settings, rng, output);
    }
}

/// Turn a completed accumulator into output objects
///
/// Applies the resolution model to the accumulated true energies, emits the
/// tower (and, where applicable, its photon interpretation), then hands the
/// reconstructed energy over to energy-flow reconciliation.
///
fn finalize(
    acc: TowerAccumulator,
    event: &Event,
    settings: &CaloSettings,
    rng: &mut RandomGenerator,
    output: &mut EventOutput,
) {
    let true_energy = acc.em_energy + acc.had_energy;

    // A tower with no measurable hadronic deposit resolves like a purely
    // electromagnetic shower
    let formula = if acc.had_energy < settings.hcal_energy_min {
        &settings.ecal_resolution
    } else {
        &settings.hcal_resolution
    };
    let sigma = formula.eval(acc.cell.eta, true_energy);
    let energy = apply_floors(
        log_normal(true_energy, sigma, rng),
        sigma,
        settings.energy_min,
        settings.significance_min,
    );

    // Per-compartment energies, smeared with their own resolution
    let em_sigma = settings.ecal_resolution.eval(acc.cell.eta, acc.em_energy);
    let em_energy = apply_floors(
        log_normal(acc.em_energy, em_sigma, rng),
        em_sigma,
        settings.ecal_energy_min,
        settings.ecal_significance_min,
    );
    let had_sigma = settings.hcal_resolution.eval(acc.cell.eta, acc.had_energy);
    let had_energy = apply_floors(
        log_normal(acc.had_energy, had_sigma, rng),
        had_sigma,
        settings.hcal_energy_min,
        settings.hcal_significance_min,
    );

    // Tower position: cell center, or a uniform draw within the cell
    let (eta, phi) = if settings.smear_tower_center {
        (
            rng.uniform(acc.cell.eta_edges[0], acc.cell.eta_edges[1]),
            rng.uniform(acc.cell.phi_edges[0], acc.cell.phi_edges[1]),
        )
    } else {
        (acc.cell.eta, acc.cell.phi)
    };
    let time = if acc.time_weight > 0. {
        acc.time_sum / acc.time_weight
    } else {
        0.
    };

    if energy > 0. {
        let tower = Tower {
            momentum: from_pt_eta_phi_e(energy / cosh(eta), eta, phi, energy),
            eta,
            phi,
            energy,
            em_energy,
            had_energy,
            track_energy: acc.track_energy,
            time,
            eta_edges: acc.cell.eta_edges,
            phi_edges: acc.cell.phi_edges,
        };
        // A tower fed only by electromagnetic species, with no pointing
        // track, is a photon candidate
        if acc.track_hits == 0 && acc.em_hits > 0 && acc.em_hits == acc.particle_hits {
            output.photons.push(tower.clone());
        }
        output.towers.push(tower);
    }

    eflow::reconcile(&acc, energy, sigma, eta, phi, event, settings, output);
}
