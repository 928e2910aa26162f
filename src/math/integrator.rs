// src/math/integrator.rs

use crate::config::IntegratorKind;
use crate::math::error::{validate_dt, SimError};
use crate::models::oscillator::Oscillator;

/// Verlet（リープフロッグ）法の積分器
///
/// 位置は x_{n+1} = 2x_n - x_{n-1} + a·dt² で進め、速度は中心差分で求める。
#[derive(Debug, Clone)]
pub struct VerletIntegrator {
    osc: Oscillator,
    dt: f64,
    x_prev: f64,
}

impl VerletIntegrator {
    /// 初期状態から1ステップ前の位置を逆外挿して積分器を生成する
    ///
    /// # 引数
    /// - `osc`: 振動子モデル
    /// - `x0`, `v0`: 初期位置・初期速度
    /// - `dt`: 時間刻み
    pub fn initialize(osc: &Oscillator, x0: f64, v0: f64, dt: f64) -> Result<Self, SimError> {
        validate_dt(dt)?;
        let a0 = osc.acceleration(x0, v0);
        Ok(VerletIntegrator {
            osc: osc.clone(),
            dt,
            x_prev: x0 - v0 * dt + 0.5 * a0 * dt * dt,
        })
    }

    pub fn step(&mut self, x: f64, v: f64, _t: f64) -> (f64, f64) {
        let dt = self.dt;
        let a = self.osc.acceleration(x, v);
        let x_next = 2.0 * x - self.x_prev + a * dt * dt;
        let v_next = (x_next - self.x_prev) / (2.0 * dt);
        self.x_prev = x;
        (x_next, v_next)
    }
}

/// Beeman 法の積分器（速度は予測子・修正子で求める）
#[derive(Debug, Clone)]
pub struct BeemanIntegrator {
    osc: Oscillator,
    dt: f64,
    a_prev: f64,
}

impl BeemanIntegrator {
    pub fn initialize(osc: &Oscillator, x0: f64, v0: f64, dt: f64) -> Result<Self, SimError> {
        validate_dt(dt)?;
        Ok(BeemanIntegrator {
            osc: osc.clone(),
            dt,
            a_prev: osc.acceleration(x0, v0),
        })
    }

    pub fn step(&mut self, x: f64, v: f64, _t: f64) -> (f64, f64) {
        let dt = self.dt;
        let a = self.osc.acceleration(x, v);
        let x_next = x + v * dt + (2.0 / 3.0 * a - 1.0 / 6.0 * self.a_prev) * dt * dt;

        // 減衰力は速度に依存するため、予測速度で次の加速度を評価する
        let v_pred = v + (1.5 * a - 0.5 * self.a_prev) * dt;
        let a_next = self.osc.acceleration(x_next, v_pred);
        let v_next = v + (1.0 / 3.0 * a_next + 5.0 / 6.0 * a - 1.0 / 6.0 * self.a_prev) * dt;

        self.a_prev = a;
        (x_next, v_next)
    }
}

/// Gear 5次予測子・修正子法の修正係数（2階常微分方程式用）
pub const GEAR5_ALPHA: [f64; 6] = [
    3.0 / 16.0,
    251.0 / 360.0,
    1.0,
    11.0 / 18.0,
    1.0 / 6.0,
    1.0 / 60.0,
];

const FACTORIALS: [f64; 6] = [1.0, 1.0, 2.0, 6.0, 24.0, 120.0];

/// Gear 5次予測子・修正子法の積分器
///
/// 状態ベクトル r = (x, v, a, jerk, snap, crackle) を保持し、
/// テイラー展開で予測した後、加速度の誤差で全次数を修正する。
#[derive(Debug, Clone)]
pub struct Gear5Integrator {
    osc: Oscillator,
    dt: f64,
    r: [f64; 6],
    // taylor[n] = dt^n / n!
    taylor: [f64; 6],
    // correction[i] = alpha[i] / dt^i
    correction: [f64; 6],
}

impl Gear5Integrator {
    pub fn initialize(osc: &Oscillator, x0: f64, v0: f64, dt: f64) -> Result<Self, SimError> {
        validate_dt(dt)?;
        let r = [
            x0,
            v0,
            osc.acceleration(x0, v0),
            osc.jerk(x0, v0),
            osc.snap(x0, v0),
            osc.crackle(x0, v0),
        ];
        let mut taylor = [0.0; 6];
        let mut correction = [0.0; 6];
        for n in 0..6 {
            let dt_n = dt.powi(n as i32);
            taylor[n] = dt_n / FACTORIALS[n];
            correction[n] = GEAR5_ALPHA[n] / dt_n;
        }
        Ok(Gear5Integrator {
            osc: osc.clone(),
            dt,
            r,
            taylor,
            correction,
        })
    }

    /// テイラー展開による予測 pred[i] = Σ_{j>=i} r[j]·dt^{j-i}/(j-i)!
    fn predict(&self) -> [f64; 6] {
        let mut pred = [0.0; 6];
        for (i, p) in pred.iter_mut().enumerate() {
            *p = (i..6).map(|j| self.r[j] * self.taylor[j - i]).sum();
        }
        pred
    }

    pub fn step(&mut self, _x: f64, _v: f64, _t: f64) -> (f64, f64) {
        let pred = self.predict();

        // 予測位置・速度での真の加速度との差から修正量を求める
        let a_real = self.osc.acceleration(pred[0], pred[1]);
        let delta_r2 = (a_real - pred[2]) * self.dt * self.dt / 2.0;

        for i in 0..6 {
            self.r[i] = pred[i] + self.correction[i] * delta_r2;
        }
        (self.r[0], self.r[1])
    }

    /// 現在保持している微分値ベクトル
    pub fn derivatives(&self) -> [f64; 6] {
        self.r
    }
}

/// 単一振動子用の積分器（種類ごとの列挙型ディスパッチ）
#[derive(Debug, Clone)]
pub enum Integrator {
    Verlet(VerletIntegrator),
    Beeman(BeemanIntegrator),
    Gear5(Gear5Integrator),
}

impl Integrator {
    /// 指定した種類の積分器を初期状態から生成する
    ///
    /// # 引数
    /// - `kind`: 積分器の種類
    /// - `osc`: 振動子モデル
    /// - `x0`, `v0`: 初期位置・初期速度
    /// - `dt`: 時間刻み（正の有限値）
    ///
    /// # 戻り値
    /// - 初期化済みの積分器
    pub fn initialize(
        kind: IntegratorKind,
        osc: &Oscillator,
        x0: f64,
        v0: f64,
        dt: f64,
    ) -> Result<Self, SimError> {
        let integrator = match kind {
            IntegratorKind::Verlet => {
                Integrator::Verlet(VerletIntegrator::initialize(osc, x0, v0, dt)?)
            }
            IntegratorKind::Beeman => {
                Integrator::Beeman(BeemanIntegrator::initialize(osc, x0, v0, dt)?)
            }
            IntegratorKind::Gear5 => {
                Integrator::Gear5(Gear5Integrator::initialize(osc, x0, v0, dt)?)
            }
        };
        Ok(integrator)
    }

    /// 時刻 t の状態 (x, v) から1ステップ進めた (x, v) を返す
    pub fn step(&mut self, x: f64, v: f64, t: f64) -> (f64, f64) {
        match self {
            Integrator::Verlet(integrator) => integrator.step(x, v, t),
            Integrator::Beeman(integrator) => integrator.step(x, v, t),
            Integrator::Gear5(integrator) => integrator.step(x, v, t),
        }
    }

    pub fn kind(&self) -> IntegratorKind {
        match self {
            Integrator::Verlet(_) => IntegratorKind::Verlet,
            Integrator::Beeman(_) => IntegratorKind::Beeman,
            Integrator::Gear5(_) => IntegratorKind::Gear5,
        }
    }
}
