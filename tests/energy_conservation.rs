//! With smearing and floors disabled, the summed tower energy must equal the
//! per-species-weighted energy of every particle that landed in the grid.

mod common;

use approx::assert_relative_eq;
use calflow::{event::Event, numeric::Float};

#[test]
fn towers_conserve_weighted_particle_energy() {
    let event = Event {
        particles: vec![
            common::particle(22, 12., 0.5, 0.5),    // em, in acceptance
            common::particle(211, 7., 0.5, 0.5),    // had, same tower
            common::particle(2112, 20., -1.5, 2.5), // had, another tower
            common::particle(22, 9., 1.5, -2.5),    // em, a third tower
            common::particle(22, 50., 3., 0.5),     // outside in eta: dropped
            common::particle(211, 50., 0.5, 3.5),   // outside in phi: dropped
            common::particle(13, 30., 0.5, 0.5),    // invisible species: skipped
        ],
        tracks: vec![],
    };

    let output = common::process(&event, &common::transparent_settings());

    let total: Float = output.towers.iter().map(|tower| tower.energy).sum();
    assert_relative_eq!(total, 12. + 7. + 20. + 9., max_relative = 1e-12);
    assert_eq!(output.towers.len(), 3);

    // The em/had split is conserved per tower as well
    let mixed = output
        .towers
        .iter()
        .find(|tower| tower.eta == 0.5 && tower.phi == 0.5)
        .expect("the mixed tower is reconstructed");
    assert_relative_eq!(mixed.em_energy, 12., max_relative = 1e-12);
    assert_relative_eq!(mixed.had_energy, 7., max_relative = 1e-12);
}
