//! EEG condition comparison: trim-aligned recordings, zero-mean magnitude
//! spectra and an egui viewer to put conditions side by side.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
