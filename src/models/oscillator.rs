// src/models/oscillator.rs

use crate::config::OscillatorParameters;
use crate::math::error::SimError;

/// 単一減衰振動子 m·x'' = -k·x - γ·x'
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    pub m: f64,
    pub k: f64,
    pub gamma: f64,
    pub x0: f64,
    pub v0: f64,
}

impl Oscillator {
    /// パラメータを検証して振動子を生成する
    ///
    /// # 戻り値
    /// - `m <= 0` または非有限値を含む場合は `NonPhysicalParameters`
    pub fn new(m: f64, k: f64, gamma: f64, x0: f64, v0: f64) -> Result<Self, SimError> {
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::non_physical(format!("質量 m は正である必要があります (m = {})", m)));
        }
        if ![k, gamma, x0, v0].iter().all(|p| p.is_finite()) {
            return Err(SimError::non_physical("パラメータに非有限値が含まれています"));
        }
        Ok(Oscillator { m, k, gamma, x0, v0 })
    }

    pub fn from_parameters(params: &OscillatorParameters) -> Result<Self, SimError> {
        Self::new(
            params.m,
            params.k,
            params.gamma,
            params.x0,
            params.initial_velocity(),
        )
    }

    /// 加速度 a = -(k·x + γ·v) / m
    pub fn acceleration(&self, x: f64, v: f64) -> f64 {
        -(self.k * x + self.gamma * v) / self.m
    }

    /// 加速度の1階微分（躍度）
    pub fn jerk(&self, x: f64, v: f64) -> f64 {
        -(self.k * v + self.gamma * self.acceleration(x, v)) / self.m
    }

    /// 加速度の2階微分
    pub fn snap(&self, x: f64, v: f64) -> f64 {
        -(self.k * self.acceleration(x, v) + self.gamma * self.jerk(x, v)) / self.m
    }

    /// 加速度の3階微分
    pub fn crackle(&self, x: f64, v: f64) -> f64 {
        -(self.k * self.jerk(x, v) + self.gamma * self.snap(x, v)) / self.m
    }

    /// 減衰を除いた固有角振動数の2乗 ω0² = k/m と減衰率 γ/(2m) の組
    fn natural_and_decay(&self) -> (f64, f64) {
        (self.k / self.m, self.gamma / (2.0 * self.m))
    }

    /// 不足減衰（振動しながら減衰する）かどうか
    pub fn is_underdamped(&self) -> bool {
        let (omega0_sq, gamma_m) = self.natural_and_decay();
        omega0_sq > gamma_m * gamma_m
    }

    /// 不足減衰の場合の解析解
    ///
    /// x(t) = e^{-γm·t} [x0·cos(ωd·t) + (v0 + γm·x0)/ωd · sin(ωd·t)]
    ///
    /// # 引数
    /// - `t`: 時刻 (s)
    ///
    /// # 戻り値
    /// - 位置 x(t)。過減衰・臨界減衰の場合は `NonPhysicalParameters`
    pub fn analytical(&self, t: f64) -> Result<f64, SimError> {
        let (omega0_sq, gamma_m) = self.natural_and_decay();
        if omega0_sq <= gamma_m * gamma_m {
            return Err(SimError::non_physical(format!(
                "解析解は不足減衰の場合のみ定義されます (ω0² = {}, (γ/2m)² = {})",
                omega0_sq,
                gamma_m * gamma_m
            )));
        }
        let omega_d = (omega0_sq - gamma_m * gamma_m).sqrt();
        let envelope = (-gamma_m * t).exp();
        let amplitude_sin = (self.v0 + gamma_m * self.x0) / omega_d;
        Ok(envelope * (self.x0 * (omega_d * t).cos() + amplitude_sin * (omega_d * t).sin()))
    }

    /// 力学的エネルギー ½mv² + ½kx²
    pub fn energy(&self, x: f64, v: f64) -> f64 {
        0.5 * self.m * v * v + 0.5 * self.k * x * x
    }
}
