// src/config/mod.rs

pub mod parameters;
pub mod scenario;

pub use parameters::{ChainParameters, OscillatorParameters};
pub use scenario::{ChainScenario, IntegratorKind, SimulationSettings, SingleScenario};
