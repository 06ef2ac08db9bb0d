//! MechLab CLI library.
//!
//! This crate provides the data discovery and output formatting used by the
//! `mechlab-cli` binary.

pub mod data;
pub mod output;
