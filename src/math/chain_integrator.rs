// src/math/chain_integrator.rs

use crate::config::IntegratorKind;
use crate::math::error::{validate_dt, SimError};
use crate::models::chain::CoupledChain;

/// 結合振動子チェーン用の Verlet 積分器
///
/// 1ステップ前の位置配列を独自に保持する。チェーンからは常に複製を受け取るため、
/// チェーンの状態更新が履歴に波及することはない。
#[derive(Debug, Clone)]
pub struct VerletChainIntegrator {
    dt: f64,
    prev_positions: Vec<f64>,
}

impl VerletChainIntegrator {
    /// チェーンの現在状態から1ステップ前の位置を逆外挿する
    pub fn initialize(chain: &CoupledChain, dt: f64) -> Result<Self, SimError> {
        validate_dt(dt)?;
        let prev_positions = chain
            .positions()
            .iter()
            .zip(chain.velocities().iter())
            .zip(chain.accelerations().iter())
            .map(|((x, v), a)| x - v * dt + 0.5 * a * dt * dt)
            .collect();
        Ok(VerletChainIntegrator { dt, prev_positions })
    }

    /// 時刻 t から t + dt へチェーンを進める
    ///
    /// 状態を更新した後、駆動境界が新しい時刻に依存するため加速度を t + dt で再計算する。
    pub fn step(&mut self, chain: &mut CoupledChain, t: f64) -> Result<(), SimError> {
        let dt = self.dt;
        if chain.len() != self.prev_positions.len() {
            return Err(SimError::invalid_argument(format!(
                "積分器の履歴長 {} とチェーンの粒子数 {} が一致しません",
                self.prev_positions.len(),
                chain.len()
            )));
        }
        let positions = chain.positions();
        let accelerations = chain.accelerations();

        let new_positions: Vec<f64> = positions
            .iter()
            .zip(self.prev_positions.iter())
            .zip(accelerations.iter())
            .map(|((x, x_prev), a)| 2.0 * x - x_prev + a * dt * dt)
            .collect();
        let new_velocities: Vec<f64> = new_positions
            .iter()
            .zip(self.prev_positions.iter())
            .map(|(x_next, x_prev)| (x_next - x_prev) / (2.0 * dt))
            .collect();

        self.prev_positions = positions;
        chain.update_state(&new_positions, &new_velocities)?;
        chain.compute_accelerations(t + dt);
        Ok(())
    }
}

/// チェーン用の積分器（現在は Verlet のみ）
#[derive(Debug, Clone)]
pub enum ChainIntegrator {
    Verlet(VerletChainIntegrator),
}

impl ChainIntegrator {
    /// 指定した種類の積分器を生成する
    ///
    /// Beeman・Gear5 はチェーンの力に高次導関数の閉形式がないため対応しない。
    pub fn initialize(
        kind: IntegratorKind,
        chain: &CoupledChain,
        dt: f64,
    ) -> Result<Self, SimError> {
        match kind {
            IntegratorKind::Verlet => Ok(ChainIntegrator::Verlet(
                VerletChainIntegrator::initialize(chain, dt)?,
            )),
            other => Err(SimError::invalid_argument(format!(
                "チェーンでは積分器 {} は使用できません",
                other
            ))),
        }
    }

    pub fn step(&mut self, chain: &mut CoupledChain, t: f64) -> Result<(), SimError> {
        match self {
            ChainIntegrator::Verlet(integrator) => integrator.step(chain, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChainParameters;

    fn single_node(a: f64) -> CoupledChain {
        let params = ChainParameters {
            n: 1,
            m: 2.0,
            k: 3.0,
            gamma: 0.0,
            a,
            omega: 1.5,
        };
        let mut chain = CoupledChain::new(&params).unwrap();
        chain.initialize();
        chain
    }

    #[test]
    fn test_rejects_unsupported_kinds() {
        let chain = single_node(1.0);
        assert!(ChainIntegrator::initialize(IntegratorKind::Beeman, &chain, 1e-3).is_err());
        assert!(ChainIntegrator::initialize(IntegratorKind::Gear5, &chain, 1e-3).is_err());
        assert!(ChainIntegrator::initialize(IntegratorKind::Verlet, &chain, 0.0).is_err());
        assert!(ChainIntegrator::initialize(IntegratorKind::Verlet, &chain, 1e-3).is_ok());
    }

    /// 静止状態から: 1ステップ目は変位なし、加速度は t = dt の駆動で k·A·sin(ω·dt)/m、
    /// 2ステップ目で x = a·dt² だけ動く
    #[test]
    fn test_driven_node_first_steps() {
        let mut chain = single_node(0.5);
        let dt = 0.01;
        let mut integrator =
            ChainIntegrator::initialize(IntegratorKind::Verlet, &chain, dt).unwrap();

        integrator.step(&mut chain, 0.0).unwrap();
        assert_eq!(chain.positions(), vec![0.0]);
        assert_eq!(chain.velocities(), vec![0.0]);
        let a1 = 3.0 * 0.5 * (1.5 * dt).sin() / 2.0;
        assert!((chain.accelerations()[0] - a1).abs() < 1e-15);

        integrator.step(&mut chain, dt).unwrap();
        assert!((chain.positions()[0] - a1 * dt * dt).abs() < 1e-18);
        assert!((chain.velocities()[0] - a1 * dt / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_undriven_chain_stays_at_rest() {
        let params = ChainParameters {
            n: 50,
            m: 0.00021,
            k: 102.3,
            gamma: 0.0,
            a: 0.0,
            omega: 2.0 * std::f64::consts::PI,
        };
        let mut chain = CoupledChain::new(&params).unwrap();
        chain.initialize();
        let dt = 1e-4;
        let mut integrator =
            ChainIntegrator::initialize(IntegratorKind::Verlet, &chain, dt).unwrap();
        let mut t = 0.0;
        for _ in 0..200 {
            integrator.step(&mut chain, t).unwrap();
            t += dt;
        }
        assert!(chain.positions().iter().all(|&x| x == 0.0));
        assert!(chain.velocities().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_step_rejects_chain_of_different_size() {
        let small = single_node(1.0);
        let mut integrator = VerletChainIntegrator::initialize(&small, 1e-3).unwrap();
        let params = ChainParameters {
            n: 4,
            m: 2.0,
            k: 3.0,
            gamma: 0.0,
            a: 1.0,
            omega: 1.5,
        };
        let mut other = CoupledChain::new(&params).unwrap();
        other.initialize();
        let result = integrator.step(&mut other, 0.0);
        assert!(matches!(result, Err(SimError::InvalidArgument { .. })));
        assert_eq!(other.positions(), vec![0.0; 4]);
    }

    #[test]
    fn test_prev_positions_are_pre_step_snapshot() {
        let params = ChainParameters {
            n: 3,
            m: 1.0,
            k: 1.0,
            gamma: 0.1,
            a: 0.2,
            omega: 3.0,
        };
        let mut chain = CoupledChain::new(&params).unwrap();
        chain.initialize();
        let dt = 0.05;
        let mut integrator = VerletChainIntegrator::initialize(&chain, dt).unwrap();
        let mut t = 0.0;
        for _ in 0..5 {
            let before = chain.positions();
            integrator.step(&mut chain, t).unwrap();
            assert_eq!(integrator.prev_positions, before);
            t += dt;
        }
    }
}
