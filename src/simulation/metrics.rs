// src/simulation/metrics.rs

use crate::models::chain::CoupledChain;
use crate::simulation::output::OscillatorRecord;

/// 解析解に対する平均二乗誤差
///
/// # 戻り値
/// - レコードが空の場合は 0
pub fn mean_squared_error(records: &[OscillatorRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: f64 = records
        .iter()
        .map(|r| (r.x - r.analytical).powi(2))
        .sum();
    sum / records.len() as f64
}

/// 解析解に対する最大絶対誤差
pub fn max_abs_error(records: &[OscillatorRecord]) -> f64 {
    records
        .iter()
        .fold(0.0_f64, |acc, r| acc.max((r.x - r.analytical).abs()))
}

/// 定常状態での最大振幅を監視する
///
/// `stationary_time` 以降の各時刻で、全粒子の変位の絶対値の最大値を記録する。
#[derive(Debug, Clone)]
pub struct AmplitudeMonitor {
    stationary_time: f64,
    max_amplitude: Option<f64>,
}

impl AmplitudeMonitor {
    pub fn new(stationary_time: f64) -> Self {
        AmplitudeMonitor {
            stationary_time,
            max_amplitude: None,
        }
    }

    pub fn observe(&mut self, t: f64, chain: &CoupledChain) {
        if t < self.stationary_time {
            return;
        }
        let amplitude = chain.max_displacement();
        self.max_amplitude = Some(self.max_amplitude.map_or(amplitude, |m| m.max(amplitude)));
    }

    /// 観測した最大振幅（定常時刻に達していなければ None）
    pub fn max_amplitude(&self) -> Option<f64> {
        self.max_amplitude
    }
}
