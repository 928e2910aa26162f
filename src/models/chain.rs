// src/models/chain.rs

use crate::config::ChainParameters;
use crate::math::error::SimError;

/// 一端を正弦駆動、他端を固定した N 個の結合減衰振動子
///
/// 粒子 0 の左隣は駆動境界 A·sin(ωt)、粒子 N-1 の右隣は位置 0 の固定壁。
/// 状態配列は生成時に確保され、以後サイズは変わらない。
#[derive(Debug, Clone)]
pub struct CoupledChain {
    n: usize,
    m: f64,
    k: f64,
    gamma: f64,
    a: f64,
    omega: f64,
    positions: Vec<f64>,
    velocities: Vec<f64>,
    accelerations: Vec<f64>,
}

impl CoupledChain {
    /// パラメータを検証してチェーンを生成する
    pub fn new(params: &ChainParameters) -> Result<Self, SimError> {
        if params.n == 0 {
            return Err(SimError::invalid_argument("粒子数 N は 1 以上である必要があります"));
        }
        if !(params.m.is_finite() && params.m > 0.0) {
            return Err(SimError::non_physical(format!(
                "質量 m は正である必要があります (m = {})",
                params.m
            )));
        }
        if ![params.k, params.gamma, params.a, params.omega]
            .iter()
            .all(|p| p.is_finite())
        {
            return Err(SimError::non_physical("パラメータに非有限値が含まれています"));
        }
        Ok(CoupledChain {
            n: params.n,
            m: params.m,
            k: params.k,
            gamma: params.gamma,
            a: params.a,
            omega: params.omega,
            positions: vec![0.0; params.n],
            velocities: vec![0.0; params.n],
            accelerations: vec![0.0; params.n],
        })
    }

    /// 全粒子を静止・平衡位置に戻し、t = 0 の加速度を計算する
    pub fn initialize(&mut self) {
        self.positions.iter_mut().for_each(|x| *x = 0.0);
        self.velocities.iter_mut().for_each(|v| *v = 0.0);
        self.compute_accelerations(0.0);
    }

    /// 駆動境界の変位 A·sin(ωt)
    pub fn boundary(&self, t: f64) -> f64 {
        self.a * (self.omega * t).sin()
    }

    /// 時刻 t における全粒子の加速度を再計算する
    ///
    /// a_i = -(k·(2x_i - x_{i-1} - x_{i+1}) + γ·v_i) / m
    pub fn compute_accelerations(&mut self, t: f64) {
        let drive = self.boundary(t);
        let last = self.n - 1;
        for i in 0..self.n {
            let left = if i == 0 { drive } else { self.positions[i - 1] };
            let right = if i == last { 0.0 } else { self.positions[i + 1] };
            let spring = self.k * (2.0 * self.positions[i] - left - right);
            self.accelerations[i] = -(spring + self.gamma * self.velocities[i]) / self.m;
        }
    }

    /// 位置と速度を一括で置き換える
    ///
    /// # 引数
    /// - `new_positions`, `new_velocities`: 長さ N の配列
    ///
    /// # 戻り値
    /// - 長さが一致しない場合は `InvalidArgument`（状態は変更しない）
    pub fn update_state(
        &mut self,
        new_positions: &[f64],
        new_velocities: &[f64],
    ) -> Result<(), SimError> {
        if new_positions.len() != self.n || new_velocities.len() != self.n {
            return Err(SimError::invalid_argument(format!(
                "状態配列の長さが N = {} と一致しません (positions = {}, velocities = {})",
                self.n,
                new_positions.len(),
                new_velocities.len()
            )));
        }
        self.positions.copy_from_slice(new_positions);
        self.velocities.copy_from_slice(new_velocities);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    // 呼び出し側が保持する履歴がチェーンの更新に追従しないよう、常に複製を返す
    pub fn positions(&self) -> Vec<f64> {
        self.positions.clone()
    }

    pub fn velocities(&self) -> Vec<f64> {
        self.velocities.clone()
    }

    pub fn accelerations(&self) -> Vec<f64> {
        self.accelerations.clone()
    }

    /// 末端粒子（固定壁側）の位置と速度
    pub fn last_node(&self) -> (f64, f64) {
        let last = self.n - 1;
        (self.positions[last], self.velocities[last])
    }

    /// 全粒子のうち最大の変位の絶対値
    pub fn max_displacement(&self) -> f64 {
        self.positions.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
    }

    /// 時刻 t における力学的エネルギー（駆動境界・固定壁とのばねを含む）
    pub fn energy(&self, t: f64) -> f64 {
        let kinetic: f64 = self.velocities.iter().map(|v| 0.5 * self.m * v * v).sum();
        let mut stretch = self.positions[0] - self.boundary(t);
        let mut potential = 0.5 * self.k * stretch * stretch;
        for pair in self.positions.windows(2) {
            stretch = pair[1] - pair[0];
            potential += 0.5 * self.k * stretch * stretch;
        }
        let wall = self.positions[self.n - 1];
        potential += 0.5 * self.k * wall * wall;
        kinetic + potential
    }
}
