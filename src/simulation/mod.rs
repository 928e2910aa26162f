// src/simulation/mod.rs

pub mod framework;
pub mod load_parameters;
pub mod metrics;
pub mod output;
pub mod runner;

pub use framework::{ChainSimulation, ChainSummary, SingleSimulation, SingleSummary};
pub use output::{ChainRecord, MemorySink, OscillatorRecord, RecordSink, TextSink};
