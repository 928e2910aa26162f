// src/math/mod.rs

pub mod chain_integrator;
pub mod error;
pub mod integrator;

pub use chain_integrator::{ChainIntegrator, VerletChainIntegrator};
pub use error::SimError;
pub use integrator::{BeemanIntegrator, Gear5Integrator, Integrator, VerletIntegrator};
