// src/config/scenario.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::parameters::{ChainParameters, OscillatorParameters};

/// 積分器の種類
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorKind {
    Verlet,
    Beeman,
    Gear5,
}

impl IntegratorKind {
    pub const ALL: [IntegratorKind; 3] = [
        IntegratorKind::Verlet,
        IntegratorKind::Beeman,
        IntegratorKind::Gear5,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IntegratorKind::Verlet => "verlet",
            IntegratorKind::Beeman => "beeman",
            IntegratorKind::Gear5 => "gear5",
        }
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 時間積分の設定
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SimulationSettings {
    pub dt: f64,     // 時間刻み (s)
    pub t_max: f64,  // 終了時刻 (s)
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    "results".to_string()
}

fn all_integrators() -> Vec<IntegratorKind> {
    IntegratorKind::ALL.to_vec()
}

/// 単一振動子のシナリオ
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SingleScenario {
    pub oscillator: OscillatorParameters,
    pub simulation: SimulationSettings,
    #[serde(default = "all_integrators")]
    pub integrators: Vec<IntegratorKind>,
}

/// 結合振動子チェーンのシナリオ
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChainScenario {
    pub chain: ChainParameters,
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub integrator: Option<IntegratorKind>,
    #[serde(default)]
    pub omegas: Vec<f64>,              // 駆動角周波数の掃引（空なら chain.omega のみ）
    #[serde(default)]
    pub save_all: bool,                // 全粒子の位置を出力するか
    #[serde(default)]
    pub stationary_time: Option<f64>,  // 定常振幅の計測開始時刻 (s)
}

impl ChainScenario {
    /// 実行する駆動角周波数の一覧
    pub fn drive_frequencies(&self) -> Vec<f64> {
        if self.omegas.is_empty() {
            vec![self.chain.omega]
        } else {
            self.omegas.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_scenario_defaults() {
        let yaml = r#"
oscillator:
  m: 70.0
  k: 1.0e4
  gamma: 100.0
  x0: 1.0
simulation:
  dt: 0.01
  t_max: 5.0
"#;
        let scenario: SingleScenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.integrators, IntegratorKind::ALL.to_vec());
        assert_eq!(scenario.simulation.output_dir, "results");
        assert_eq!(scenario.oscillator.v0, None);
    }

    #[test]
    fn test_integrator_selection_from_yaml() {
        let yaml = r#"
oscillator: { m: 1.0, k: 1.0, gamma: 0.0, x0: 1.0, v0: 0.0 }
simulation: { dt: 0.01, t_max: 1.0, output_dir: out }
integrators: [gear5, verlet]
"#;
        let scenario: SingleScenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            scenario.integrators,
            vec![IntegratorKind::Gear5, IntegratorKind::Verlet]
        );
        assert_eq!(scenario.simulation.output_dir, "out");
    }

    #[test]
    fn test_chain_drive_frequencies() {
        let yaml = r#"
chain: { n: 10, m: 0.00021, k: 102.3, gamma: 0.0003, a: 0.01, omega: 6.0 }
simulation: { dt: 1.0e-4, t_max: 1.0 }
"#;
        let mut scenario: ChainScenario = serde_yaml::from_str(yaml).unwrap();
        assert!(!scenario.save_all);
        assert_eq!(scenario.drive_frequencies(), vec![6.0]);

        scenario.omegas = vec![1.0, 2.0];
        assert_eq!(scenario.drive_frequencies(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_integrator_kind_display() {
        assert_eq!(IntegratorKind::Gear5.to_string(), "gear5");
        assert_eq!(format!("{}", IntegratorKind::Beeman), "beeman");
    }
}
