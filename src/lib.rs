//! calflow: calorimeter tower construction and energy-flow reconciliation
//!
//!
//! # Introduction (for the physicist)
//!
//! This library implements one step of a fast detector simulation: per
//! collision event, it maps final-state particles and reconstructed tracks
//! onto a segmented calorimeter, smears the accumulated energies with
//! configurable electromagnetic and hadronic resolutions, and reconciles the
//! calorimeter and tracking measurements into particle-flow objects.
//!
//!
//! # Introduction (for the numerical guy)
//!
//! Each event reduces to a sort-then-scan: every in-acceptance contribution
//! becomes a packed sortable key, one sort brings all contributions to a
//! tower together, and one linear pass accumulates and finalizes the towers.
//! Smearing draws log-normal samples so reconstructed energies stay
//! non-negative for any configured resolution.
//!
//!
//! # Introduction (for the computer guy)
//!
//! The pipeline is built from immutable, event-independent state (bin index,
//! fraction table, settings) shared read-only across workers, plus per-worker
//! scratch buffers. Events are therefore embarrassingly parallel; the
//! `multi-threading` cargo feature fans event batches out to rayon tasks.

#![warn(missing_docs)]

pub mod calorimeter;
pub mod config;
pub mod eflow;
pub mod event;
pub mod evgen;
pub mod fractions;
pub mod grid;
pub mod hits;
pub mod momentum;
pub mod numeric;
pub mod output;
pub mod random;
pub mod resolution;
pub mod scheduling;
pub mod summary;
pub mod towers;

/// We'll use anyhow's type-erased result type throughout the application
pub type Result<T> = anyhow::Result<T>;
