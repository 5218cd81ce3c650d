//! Command-line front end for `odesim_core`: argument parsing, logging setup
//! and CSV persistence of trajectories.

pub mod app;
pub mod persistence;
