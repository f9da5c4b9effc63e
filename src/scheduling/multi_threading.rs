//! Multi-threaded back-end of the simulation

use crate::{random::RandomGenerator, scheduling::EVENT_BATCH_SIZE, summary::RunAccumulator};

use std::sync::Mutex;

/// Process events in multi-threaded mode
///
/// Each batch of events is handed to a rayon task together with its own
/// jumped random number stream. Task results are stored per batch and merged
/// in batch order, so the final totals do not depend on task completion
/// order.
///
pub fn run_simulation_impl(
    mut num_events: usize,
    mut rng: RandomGenerator,
    process_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> RunAccumulator,
) -> RunAccumulator {
    // Some double-checking cannot hurt...
    assert!(num_events > 0, "Must simulate at least one event");

    // We know in advance how many batches of events we will process
    let num_batches =
        num_events / EVENT_BATCH_SIZE + usize::from(num_events % EVENT_BATCH_SIZE != 0);

    // Storage for the intermediary results of the parallel tasks
    let results: Box<[Mutex<Option<RunAccumulator>>]> =
        (0..num_batches).map(|_| Mutex::new(None)).collect();

    // This scope is a synchronization barrier: it only returns once all
    // inner tasks have been executed
    rayon::scope(|scope| {
        for batch_results in results.iter() {
            let batch_size = num_events.min(EVENT_BATCH_SIZE);
            num_events -= batch_size;

            // Hand the task its own decorrelated random number stream
            let mut task_rng = rng.clone();
            rng.jump();

            let process_events_ref = &process_events;
            scope.spawn(move |_| {
                let result = process_events_ref(batch_size, &mut task_rng);
                let mut lock = batch_results.lock().expect("Mutex data should be valid");
                assert!(lock.is_none(), "Tasks should not report results twice");
                *lock = Some(result);
            });
        }
    });

    // Merge the batch results in batch order
    let mut results_iter = results.into_vec().into_iter().map(|entry| {
        entry
            .into_inner()
            .expect("Mutex data should be valid")
            .expect("Result should be ready")
    });
    let first = results_iter
        .next()
        .expect("There should be at least one batch");
    results_iter.fold(first, |mut merged, result| {
        merged.merge(result);
        merged
    })
}
