//! Every coordinate strictly inside the outer edges resolves to a tower;
//! everything at or beyond them resolves to none.

mod common;

use calflow::numeric::Float;

#[test]
fn interior_coordinates_always_resolve() {
    let grid = common::uniform_grid();
    let mut checked = 0;
    for eta_step in 1..40 {
        for phi_step in 1..60 {
            let eta = -2. + eta_step as Float * 0.1;
            let phi = -3. + phi_step as Float * 0.1;
            if eta <= -2. || eta >= 2. || phi <= -3. || phi >= 3. {
                continue;
            }
            let key = grid
                .locate(eta, phi)
                .unwrap_or_else(|| panic!("({eta}, {phi}) should resolve to a tower"));
            let cell = grid.cell(key);
            assert!(cell.eta_edges[0] <= eta && eta < cell.eta_edges[1]);
            assert!(cell.phi_edges[0] <= phi && phi < cell.phi_edges[1]);
            checked += 1;
        }
    }
    assert!(checked > 2000);
}

#[test]
fn outer_and_beyond_coordinates_resolve_to_none() {
    let grid = common::uniform_grid();
    for (eta, phi) in [
        (-2., 0.5),
        (2., 0.5),
        (-2.5, 0.5),
        (7., 0.5),
        (0.5, -3.),
        (0.5, 3.),
        (0.5, -9.),
        (Float::INFINITY, 0.5),
        (Float::NEG_INFINITY, 0.5),
        (Float::NAN, 0.5),
        (0.5, Float::NAN),
    ] {
        assert_eq!(grid.locate(eta, phi), None, "({eta}, {phi})");
    }
}
