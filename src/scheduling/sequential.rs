//! Sequential back-end of the simulation

use crate::{random::RandomGenerator, scheduling::EVENT_BATCH_SIZE, summary::RunAccumulator};

/// Process events in sequential mode
///
/// Batched logic is used even in sequential mode: each batch starts from a
/// jumped random number stream, matching the stream schedule of the
/// multi-threaded back-end, and batch accumulators are merged pairwise.
///
pub fn run_simulation_impl(
    mut num_events: usize,
    mut rng: RandomGenerator,
    process_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> RunAccumulator,
) -> RunAccumulator {
    // Some double-checking cannot hurt...
    assert!(num_events > 0, "Must simulate at least one event");

    let mut accumulator = RunAccumulator::new();
    while num_events > 0 {
        let batch_size = num_events.min(EVENT_BATCH_SIZE);
        num_events -= batch_size;

        // Each batch owns its stream, the scheduler's rng only ever jumps
        let mut batch_rng = rng.clone();
        rng.jump();

        accumulator.merge(process_events(batch_size, &mut batch_rng));
    }
    accumulator
}
