// src/simulation/framework.rs

use log::{debug, info};

use crate::config::{ChainParameters, IntegratorKind};
use crate::math::error::{validate_dt, SimError};
use crate::math::{ChainIntegrator, Integrator};
use crate::models::{CoupledChain, Oscillator};
use crate::simulation::metrics::AmplitudeMonitor;
use crate::simulation::output::{ChainRecord, OscillatorRecord, RecordSink};

/// 単一振動子の実行結果
#[derive(Debug, Clone, PartialEq)]
pub struct SingleSummary {
    pub integrator: IntegratorKind,
    pub steps: usize,
    pub mse: f64,            // 解析解に対する平均二乗誤差
    pub max_abs_error: f64,  // 解析解に対する最大絶対誤差
}

/// チェーンの実行結果
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSummary {
    pub omega: f64,
    pub steps: usize,
    pub stationary_amplitude: Option<f64>,
}

// t += dt が必ず t を進めるステップ数の上限 (2^50)
const MAX_STEPS: f64 = 1_125_899_906_842_624.0;

/// 時間刻みと終了時刻を検証する
///
/// # 戻り値
/// - dt が正の有限値でない、t_max が負または非有限、あるいは
///   t_max / dt が `MAX_STEPS` を超える場合は `InvalidArgument`
fn validate_time_span(dt: f64, t_max: f64) -> Result<(), SimError> {
    validate_dt(dt)?;
    if !(t_max.is_finite() && t_max >= 0.0) {
        return Err(SimError::invalid_argument(format!(
            "t_max は 0 以上の有限値である必要があります (t_max = {})",
            t_max
        )));
    }
    if t_max / dt > MAX_STEPS {
        return Err(SimError::invalid_argument(format!(
            "ステップ数 t_max / dt = {:e} が上限 {:e} を超えています",
            t_max / dt,
            MAX_STEPS
        )));
    }
    Ok(())
}

/// 単一振動子のシミュレーション
#[derive(Debug, Clone)]
pub struct SingleSimulation {
    pub oscillator: Oscillator,
    pub integrator: IntegratorKind,
    pub dt: f64,
    pub t_max: f64,
}

impl SingleSimulation {
    pub fn new(
        oscillator: Oscillator,
        integrator: IntegratorKind,
        dt: f64,
        t_max: f64,
    ) -> Result<Self, SimError> {
        validate_time_span(dt, t_max)?;
        Ok(SingleSimulation {
            oscillator,
            integrator,
            dt,
            t_max,
        })
    }

    /// t = 0 から t_max まで (閉区間) 固定刻みで積分し、各時刻のレコードを出力する
    ///
    /// # 引数
    /// - `sink`: レコードの出力先
    ///
    /// # 戻り値
    /// - 実行結果。解析解が定義されない（不足減衰でない）場合は何も出力せずに失敗する
    pub fn run<S: RecordSink + ?Sized>(&self, sink: &mut S) -> Result<SingleSummary, SimError> {
        let osc = &self.oscillator;
        if !osc.is_underdamped() {
            // 解析解が定義されないため、出力前に失敗させる
            osc.analytical(0.0)?;
        }

        info!(
            "単一振動子: integrator = {}, dt = {}, t_max = {}",
            self.integrator, self.dt, self.t_max
        );
        let mut integrator = Integrator::initialize(self.integrator, osc, osc.x0, osc.v0, self.dt)?;

        let (mut x, mut v) = (osc.x0, osc.v0);
        let mut t = 0.0;
        let mut steps = 0;
        let mut squared_error = 0.0;
        let mut max_abs_error = 0.0_f64;

        // 浮動小数点の累積誤差により終端時刻のレコードが欠けることがある
        while t <= self.t_max {
            let record = OscillatorRecord {
                t,
                x,
                v,
                analytical: osc.analytical(t)?,
            };
            sink.append(&record.fields())?;

            let error = record.x - record.analytical;
            squared_error += error * error;
            max_abs_error = max_abs_error.max(error.abs());

            let (x_next, v_next) = integrator.step(x, v, t);
            x = x_next;
            v = v_next;
            t += self.dt;
            steps += 1;
        }
        sink.flush()?;

        let summary = SingleSummary {
            integrator: self.integrator,
            steps,
            mse: if steps > 0 { squared_error / steps as f64 } else { 0.0 },
            max_abs_error,
        };
        info!(
            "単一振動子 {} 完了: {} ステップ, MSE = {:e}, 最大誤差 = {:e}",
            summary.integrator, summary.steps, summary.mse, summary.max_abs_error
        );
        Ok(summary)
    }
}

/// 結合振動子チェーンのシミュレーション
#[derive(Debug, Clone)]
pub struct ChainSimulation {
    pub params: ChainParameters,
    pub integrator: IntegratorKind,
    pub dt: f64,
    pub t_max: f64,
    pub save_all: bool,
    pub stationary_time: Option<f64>,
}

impl ChainSimulation {
    pub fn new(params: ChainParameters, dt: f64, t_max: f64) -> Result<Self, SimError> {
        validate_time_span(dt, t_max)?;
        Ok(ChainSimulation {
            params,
            integrator: IntegratorKind::Verlet,
            dt,
            t_max,
            save_all: false,
            stationary_time: None,
        })
    }

    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_save_all(mut self, save_all: bool) -> Self {
        self.save_all = save_all;
        self
    }

    pub fn with_stationary_time(mut self, stationary_time: Option<f64>) -> Self {
        self.stationary_time = stationary_time;
        self
    }

    fn record(&self, t: f64, chain: &CoupledChain) -> ChainRecord {
        if self.save_all {
            ChainRecord::All {
                t,
                positions: chain.positions(),
            }
        } else {
            let (x, v) = chain.last_node();
            ChainRecord::Last { t, x, v }
        }
    }

    /// 静止状態から t_max まで積分し、各時刻のレコードを出力する
    pub fn run<S: RecordSink + ?Sized>(&self, sink: &mut S) -> Result<ChainSummary, SimError> {
        let mut chain = CoupledChain::new(&self.params)?;
        chain.initialize();
        let mut integrator = ChainIntegrator::initialize(self.integrator, &chain, self.dt)?;
        let mut monitor = self.stationary_time.map(AmplitudeMonitor::new);

        info!(
            "チェーン: N = {}, omega = {}, dt = {}, t_max = {}, save_all = {}",
            self.params.n, self.params.omega, self.dt, self.t_max, self.save_all
        );
        debug!("チェーン初期エネルギー = {:e}", chain.energy(0.0));

        let mut t = 0.0;
        let mut steps = 0;
        while t <= self.t_max {
            sink.append(&self.record(t, &chain).fields())?;
            if let Some(monitor) = monitor.as_mut() {
                monitor.observe(t, &chain);
            }
            integrator.step(&mut chain, t)?;
            t += self.dt;
            steps += 1;
        }
        sink.flush()?;

        let summary = ChainSummary {
            omega: self.params.omega,
            steps,
            stationary_amplitude: monitor.and_then(|m| m.max_amplitude()),
        };
        info!(
            "チェーン omega = {} 完了: {} ステップ, 定常振幅 = {:?}",
            summary.omega, summary.steps, summary.stationary_amplitude
        );
        Ok(summary)
    }
}
