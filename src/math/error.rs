// src/math/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("物理的に不正なパラメータです: {reason}")]
    NonPhysicalParameters { reason: String },
    #[error("不正な引数です: {reason}")]
    InvalidArgument { reason: String },
    #[error("出力に失敗しました: {0}")]
    Io(#[from] std::io::Error),
    #[error("設定ファイルの解析に失敗しました: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SimError {
    pub fn non_physical(reason: impl Into<String>) -> Self {
        SimError::NonPhysicalParameters {
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        SimError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// 時間刻みが正の有限値であることを確認する
pub fn validate_dt(dt: f64) -> Result<(), SimError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_argument(format!(
            "dt は正の有限値である必要があります (dt = {})",
            dt
        )))
    }
}
