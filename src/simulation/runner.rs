// src/simulation/runner.rs

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::{ChainScenario, IntegratorKind, SingleScenario};
use crate::math::error::SimError;
use crate::models::Oscillator;
use crate::simulation::framework::{ChainSimulation, ChainSummary, SingleSimulation, SingleSummary};
use crate::simulation::load_parameters::dump_config;
use crate::simulation::output::TextSink;

/// 単一振動子の出力ディレクトリ <output_dir>/single/dt_<dt>
pub fn single_output_dir(output_dir: &str, dt: f64) -> PathBuf {
    Path::new(output_dir).join("single").join(format!("dt_{}", dt))
}

/// 単一振動子の出力ファイル名
pub fn single_output_file(kind: IntegratorKind) -> String {
    format!("output_{}.txt", kind)
}

/// チェーンの出力ディレクトリ <output_dir>/chain
pub fn chain_output_dir(output_dir: &str) -> PathBuf {
    Path::new(output_dir).join("chain")
}

/// チェーンの出力ファイル名
pub fn chain_output_file(omega: f64, k: f64) -> String {
    format!("coupled_omega_{}_k_{}.txt", omega, k)
}

/// シナリオに含まれる全積分器で単一振動子を実行し、結果をファイルに書き出す
pub fn run_single_scenario(scenario: &SingleScenario) -> Result<Vec<SingleSummary>, SimError> {
    let oscillator = Oscillator::from_parameters(&scenario.oscillator)?;
    let settings = &scenario.simulation;
    let dir = single_output_dir(&settings.output_dir, settings.dt);
    dump_config(&dir, scenario)?;

    if scenario.integrators.is_empty() {
        warn!("積分器が指定されていません");
    }

    let mut summaries = Vec::with_capacity(scenario.integrators.len());
    for &kind in &scenario.integrators {
        let simulation =
            SingleSimulation::new(oscillator.clone(), kind, settings.dt, settings.t_max)?;
        let path = dir.join(single_output_file(kind));
        let mut sink = TextSink::create(&path)?;
        summaries.push(simulation.run(&mut sink)?);
        info!("出力: {}", path.display());
    }
    Ok(summaries)
}

/// 駆動角周波数ごとにチェーンを実行し、結果をファイルに書き出す
pub fn run_chain_scenario(scenario: &ChainScenario) -> Result<Vec<ChainSummary>, SimError> {
    let settings = &scenario.simulation;
    let dir = chain_output_dir(&settings.output_dir);
    dump_config(&dir, scenario)?;

    let integrator = scenario.integrator.unwrap_or(IntegratorKind::Verlet);
    let mut summaries = Vec::new();
    for omega in scenario.drive_frequencies() {
        let mut params = scenario.chain.clone();
        params.omega = omega;
        let path = dir.join(chain_output_file(omega, params.k));
        let simulation = ChainSimulation::new(params, settings.dt, settings.t_max)?
            .with_integrator(integrator)
            .with_save_all(scenario.save_all)
            .with_stationary_time(scenario.stationary_time);
        let mut sink = TextSink::create(&path)?;
        summaries.push(simulation.run(&mut sink)?);
        info!("出力: {}", path.display());
    }
    Ok(summaries)
}
