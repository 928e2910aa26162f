// src/lib.rs

//! 減衰調和振動子および結合振動子チェーンの時間積分
//!
//! - 単一振動子: Verlet, Beeman, Gear 5次予測子・修正子法と解析解の比較
//! - チェーン: 一端を正弦駆動、他端を固定した N 個の結合振動子を Verlet 法で積分

pub mod config;
pub mod math;
pub mod models;
pub mod simulation;

pub use config::{
    ChainParameters, ChainScenario, IntegratorKind, OscillatorParameters, SimulationSettings,
    SingleScenario,
};
pub use math::{ChainIntegrator, Integrator, SimError};
pub use models::{CoupledChain, Oscillator};
pub use simulation::{ChainSimulation, MemorySink, RecordSink, SingleSimulation, TextSink};
