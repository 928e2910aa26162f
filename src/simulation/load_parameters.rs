// src/simulation/load_parameters.rs

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ChainScenario, SingleScenario};
use crate::math::error::SimError;

/// YAML ファイルを読み込んで任意の型に変換する
pub fn parse_yaml<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, SimError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let data: T = serde_yaml::from_str(&contents)?;
    Ok(data)
}

/// 単一振動子シナリオの読み込み
pub fn load_single_scenario<P: AsRef<Path>>(path: P) -> Result<SingleScenario, SimError> {
    parse_yaml(path)
}

/// チェーンシナリオの読み込み
pub fn load_chain_scenario<P: AsRef<Path>>(path: P) -> Result<ChainScenario, SimError> {
    parse_yaml(path)
}

/// 実行時の設定を出力ディレクトリに config.yaml として保存する
pub fn dump_config<T: Serialize, P: AsRef<Path>>(dir: P, config: &T) -> Result<(), SimError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let yaml = serde_yaml::to_string(config)?;
    fs::write(dir.join("config.yaml"), yaml)?;
    Ok(())
}
