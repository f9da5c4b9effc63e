//! The photon collection only receives towers fed exclusively by
//! electromagnetic species, with no pointing track.

mod common;

use calflow::{event::Event, momentum::T};

#[test]
fn pure_electromagnetic_towers_double_as_photons() {
    let event = Event {
        particles: vec![
            common::particle(22, 10., 0.5, 0.5),   // photon-only tower
            common::particle(22, 5., 0.5, 0.5),    // second photon, same tower
            common::particle(22, 8., -0.5, 0.5),   // photon + neutron tower
            common::particle(2112, 3., -0.5, 0.5), // taints the tower above
            common::particle(22, 7., 1.5, 0.5),    // photon + track tower
        ],
        tracks: vec![common::track(11, 7., 1.5, 0.5, 0.01)],
    };

    let output = common::process(&event, &common::transparent_settings());

    assert_eq!(output.towers.len(), 3);
    assert_eq!(output.photons.len(), 1);
    let photon = &output.photons[0];
    assert_eq!((photon.eta, photon.phi), (0.5, 0.5));
    approx::assert_relative_eq!(photon.energy, 15., max_relative = 1e-12);
}

#[test]
fn tower_timing_averages_over_eligible_deposits() {
    // Only deposits above the timing threshold contribute to the time; with
    // equal energies the weights cancel and the mean is arithmetic
    let mut early = common::particle(22, 16., 0.5, 0.5);
    early.position[T] = 1.;
    let mut late = common::particle(22, 16., 0.5, 0.5);
    late.position[T] = 3.;
    let mut faint = common::particle(22, 2., 0.5, 0.5);
    faint.position[T] = 1000.;

    let event = Event {
        particles: vec![early, late, faint],
        tracks: vec![],
    };
    let output = common::process(&event, &common::transparent_settings());

    assert_eq!(output.towers.len(), 1);
    approx::assert_relative_eq!(output.towers[0].time, 2., max_relative = 1e-12);
}
