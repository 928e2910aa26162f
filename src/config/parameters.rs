// src/config/parameters.rs

use serde::{Deserialize, Serialize};

/// 単一減衰振動子のパラメータ
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OscillatorParameters {
    pub m: f64,      // 質量 (kg)
    pub k: f64,      // ばね定数 (N/m)
    pub gamma: f64,  // 減衰係数 (kg/s)
    pub x0: f64,     // 初期位置 (m)
    #[serde(default)]
    pub v0: Option<f64>, // 初期速度 (m/s)、省略時は -x0·γ/(2m)
}

impl OscillatorParameters {
    /// 初期速度。省略されている場合は解析解と整合する -x0·γ/(2m) を用いる
    pub fn initial_velocity(&self) -> f64 {
        self.v0
            .unwrap_or_else(|| -self.x0 * self.gamma / (2.0 * self.m))
    }
}

/// 結合振動子チェーンのパラメータ
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChainParameters {
    pub n: usize,    // 粒子数
    pub m: f64,      // 質量 (kg)
    pub k: f64,      // ばね定数 (N/m)
    pub gamma: f64,  // 減衰係数 (kg/s)
    pub a: f64,      // 駆動振幅 (m)
    pub omega: f64,  // 駆動角周波数 (rad/s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_initial_velocity() {
        let params = OscillatorParameters {
            m: 70.0,
            k: 1e4,
            gamma: 100.0,
            x0: 1.0,
            v0: None,
        };
        assert!((params.initial_velocity() + 0.714285714285714).abs() < 1e-12);
    }

    #[test]
    fn test_explicit_initial_velocity() {
        let params = OscillatorParameters {
            m: 1.0,
            k: 1.0,
            gamma: 0.0,
            x0: 0.0,
            v0: Some(2.5),
        };
        assert_eq!(params.initial_velocity(), 2.5);
    }
}
