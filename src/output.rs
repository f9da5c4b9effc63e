//! This module is in charge of outputting the final simulation results to the
//! standard output and a results file

use crate::{config::Configuration, numeric::Float, summary::RunSummary};

use std::{
    fs::File,
    io::{Result, Write},
    time::Duration,
};

/// Name of the results file written at the end of a run
const RESULTS_FILE: &str = "run.summary";

/// Output the simulation results to the console and to disk
pub fn dump_results(
    cfg: &Configuration,
    summary: &RunSummary,
    elapsed_time: Duration,
) -> Result<()> {
    // Print out the final results on stdout
    print_summary(summary);

    // Compute a timestamp of when the run ended
    let timestamp = chrono::Utc::now().format("%d-%b-%y %T").to_string();

    // Write the results file
    let mut file = File::create(RESULTS_FILE)?;
    let file = &mut file;
    writeln!(file, "{timestamp}")?;
    writeln!(file, "---------------------------------------------")?;
    write_row(file, "Events", summary.events)?;
    write_row(file, "Seed", cfg.seed as usize)?;
    write_row(file, "Towers", summary.towers)?;
    write_row(file, "Photon towers", summary.photons)?;
    write_row(file, "Pass-through flow tracks", summary.flow_tracks)?;
    write_row(file, "Rescaled flow tracks", summary.rescaled_tracks)?;
    write_row(file, "Flow photons", summary.flow_photons)?;
    write_row(file, "Flow neutral hadrons", summary.flow_neutral_hadrons)?;
    writeln!(file, "---------------------------------------------")?;
    write_row_f(file, "Mean towers / event", summary.mean_towers)?;
    write_row_f(file, "Mean tower energy / event", summary.mean_tower_energy)?;
    write_row_f(file, "Mean neutral energy / event", summary.mean_neutral_energy)?;
    let elapsed_secs =
        (elapsed_time.as_secs() as Float) + 1e-9 * (elapsed_time.subsec_nanos() as Float);
    write_row_f(file, "Elapsed time (s)", elapsed_secs)?;
    write_row_f(
        file,
        "Elapsed time / event (s)",
        elapsed_secs / (summary.events.max(1) as Float),
    )?;

    Ok(())
}

/// Print the run summary to standard output
fn print_summary(summary: &RunSummary) {
    println!();
    println!("Events processed    : {}", summary.events);
    println!("Towers              : {} ({:.2}/event)", summary.towers, summary.mean_towers);
    println!("Photon towers       : {}", summary.photons);
    println!("Flow tracks         : {} pass-through, {} rescaled",
        summary.flow_tracks, summary.rescaled_tracks);
    println!("Flow neutrals       : {} photons, {} neutral hadrons",
        summary.flow_photons, summary.flow_neutral_hadrons);
    println!("Mean tower energy   : {:.3}", summary.mean_tower_energy);
    println!("Mean neutral energy : {:.3}", summary.mean_neutral_energy);
}

/// Write an integer key-value row using the results file styling
fn write_row(file: &mut File, name: &str, value: usize) -> Result<()> {
    writeln!(file, " {name:<27}: {value}")
}

/// Write a floating-point key-value row using the results file styling
fn write_row_f(file: &mut File, name: &str, value: Float) -> Result<()> {
    writeln!(file, " {name:<27}: {value:.6}")
}
