//! This module takes care of scheduling the simulation work, encapsulating use
//! of multiple threads and anything else that will come in the future

#[cfg(feature = "multi-threading")]
mod multi_threading;
#[cfg(not(feature = "multi-threading"))]
mod sequential;

use crate::{
    random::RandomGenerator,
    summary::{RunAccumulator, RunSummary},
};

/// Size of the simulated event batches
///
/// Events are processed in batches so that each batch can be handed to a
/// worker with its own decorrelated random number stream, and so that
/// per-batch accumulators are merged pairwise instead of drifting in one
/// ever-larger accumulator.
///
const EVENT_BATCH_SIZE: usize = 1000;

/// Run the simulation in the manner that was configured at build time.
///
/// Takes as parameters the total number of events to be simulated, the seed
/// of the random number generator, and a simulation kernel that processes a
/// certain number of events given a random number generator.
///
/// Returns the finalized run results.
///
pub fn run_simulation(
    num_events: usize,
    seed: u64,
    process_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> RunAccumulator,
) -> RunSummary {
    // Check that the user is being reasonable (should have already been
    // checked at configuration time, but bugs can happen...)
    assert!(num_events > 0, "Must simulate at least one event");

    // Initialize the random number generator
    let rng = RandomGenerator::new(seed);

    // Accumulate simulation results...
    let accumulator = {
        // ...in sequential mode
        #[cfg(not(feature = "multi-threading"))]
        {
            sequential::run_simulation_impl(num_events, rng, process_events)
        }

        // ...in multi-threaded mode
        #[cfg(feature = "multi-threading")]
        {
            multi_threading::run_simulation_impl(num_events, rng, process_events)
        }
    };

    // Finalize the results
    accumulator.finalize()
}
