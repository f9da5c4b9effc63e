//! Without a significant neutral excess, tower tracks are rescaled to the
//! precision-weighted combination of the track and calorimeter estimates.

mod common;

use approx::assert_relative_eq;
use calflow::{
    event::Event,
    resolution::{ResolutionFormula, ResolutionTerm},
};

#[test]
fn lone_track_is_rescaled_toward_the_combined_estimate() {
    // A single charged hadron whose deposit is not simulated (no particle),
    // measured by a noisy hadronic calorimeter: the calorimeter estimate is
    // 0 +- 2, the track estimate 10 +- 1
    let event = Event {
        particles: vec![],
        tracks: vec![common::track(211, 10., 0.5, 0.5, 0.1)],
    };
    let mut settings = common::transparent_settings();
    settings.hcal_resolution = ResolutionFormula::new(vec![ResolutionTerm {
        eta_min: 0.,
        eta_max: 5.,
        stochastic: 0.,
        constant: 0.,
        noise: 2.,
    }]);
    settings.significance_min = 3.;

    let output = common::process(&event, &settings);

    // No neutral excess to report
    assert_eq!(output.flow_neutrals.len(), 0);
    assert_eq!(output.flow_tracks.len(), 0);

    // weight_track = 1/(0.1*10)^2 = 1, weight_calo = 1/2^2 = 0.25, so the
    // combined estimate is (1*10 + 0.25*0) / 1.25 = 8
    assert_eq!(output.rescaled_tracks.len(), 1);
    let rescaled = &output.rescaled_tracks[0];
    assert_relative_eq!(rescaled.energy(), 8., max_relative = 1e-12);

    // Direction is preserved, only the magnitude changes
    let original = &event.tracks[0];
    for coord in 0..3 {
        assert_relative_eq!(
            rescaled.momentum[coord],
            0.8 * original.momentum[coord],
            max_relative = 1e-12
        );
    }
}

#[test]
fn degenerate_variances_leave_the_track_untouched() {
    // Perfect tracking and a perfect calorimeter: both variances are zero,
    // the combination degenerates to the track-sum energy
    let event = Event {
        particles: vec![],
        tracks: vec![common::track(211, 10., 0.5, 0.5, 0.)],
    };
    let mut settings = common::transparent_settings();
    settings.significance_min = 3.;

    let output = common::process(&event, &settings);

    assert_eq!(output.rescaled_tracks.len(), 1);
    assert_relative_eq!(
        output.rescaled_tracks[0].energy(),
        10.,
        max_relative = 1e-12
    );
}
