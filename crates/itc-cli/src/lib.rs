//! itc CLI crate
//!
//! Purpose:
//! - Provide a command-line interface to the IT neuron runtime.
//! - Read experiment files (TOML) describing one neuron configuration, a population
//!   size and a stimulus schedule, and report the resulting firing rates.
//!
//! Major commands (see [commands]):
//! - init: write a commented template experiment.
//! - simulate: run the schedule and write a JSON report (rates, summary, optional spikes).
//! - inspect: print neuron properties and the preferred-stimulus response.
//! - latency: print a neuron's latency-versus-rate profile.
//!
//! Notes:
//! - The binary (src/main.rs) wires up logging and argument parsing, calling ItcCli::execute().
//! - Runtime `log` records reach the tracing subscriber through its log bridge.

pub mod commands;
pub mod config;
pub mod error;
pub mod experiment;

pub use commands::ItcCli;
