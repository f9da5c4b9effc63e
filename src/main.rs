//! Demo driver of the calorimeter pipeline
//!
//! Loads a configuration file, builds the immutable detector state, then
//! fires toy events through the pipeline and accumulates run statistics:
//!
//! * read in parameters and initialise the bin index and fraction table
//! * loop over (random) events,
//!     * generating their particle and track content,
//!     * building their towers and flow objects,
//!     * summing the outputs up
//! * then display / store the result.

use anyhow::Context;

use calflow::{
    calorimeter::Calorimeter, config::Configuration, evgen::EventGenerator, output,
    random::RandomGenerator, scheduling, summary::RunAccumulator, Result,
};

use std::time::Instant;

fn main() -> Result<()> {
    // ### CONFIGURATION READOUT ###

    // The configuration file path may be overridden on the command line
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "calor.toml".to_owned());
    let cfg = Configuration::load(&config_path).context("Failed to load the configuration")?;

    // ### SIMULATION INITIALIZATION ###

    // NOTE: The clock starts after configuration I/O, to avoid IO-induced
    //       timing fluctuations
    let saved_time = Instant::now();

    // Build the immutable, event-independent detector state
    let grid = cfg.build_grid().context("Failed to build the bin index")?;
    let fractions = cfg.build_fractions();
    let settings = cfg.build_settings();

    // Initialize the toy event generator
    let evgen = EventGenerator::new(&cfg.generator);

    // ### SIMULATION EXECUTION ###

    // This kernel processes a number of events, given a random number
    // generator state, and returns the accumulated intermediary results
    let process_events = |num_events: usize, rng: &mut RandomGenerator| -> RunAccumulator {
        // Each worker owns its pipeline (and thus its scratch buffers)
        let mut calorimeter = Calorimeter::new(&grid, &fractions, &settings);

        // Process the requested number of events
        let mut accumulator = RunAccumulator::new();
        for _ in 0..num_events {
            let event = evgen.generate(rng);
            let event_output = calorimeter.process(&event, rng);
            accumulator.integrate(&event_output);
        }
        accumulator
    };

    // Run the simulation
    let summary = scheduling::run_simulation(cfg.events, cfg.seed, process_events);

    // ### RESULTS DISPLAY AND STORAGE ###

    // Measure how much time has elapsed
    let elapsed_time = saved_time.elapsed();

    // Send the results to the standard output and to disk and we're done
    output::dump_results(&cfg, &summary, elapsed_time).context("Failed to output the results")?;

    Ok(())
}
