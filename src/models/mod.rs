// src/models/mod.rs

pub mod chain;
pub mod oscillator;

pub use chain::CoupledChain;
pub use oscillator::Oscillator;
