// src/main.rs

use std::env;
use std::error::Error;

use log::{error, info};

use oscsim::simulation::load_parameters::{load_chain_scenario, load_single_scenario};
use oscsim::simulation::runner::{run_chain_scenario, run_single_scenario};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // 実行モードと設定ファイルのパス
    let args: Vec<String> = env::args().skip(1).collect();
    let mode = args.first().map(String::as_str).unwrap_or("single");
    let default_path = format!("config/{}.yaml", mode);
    let path = args.get(1).map(String::as_str).unwrap_or(&default_path);

    match mode {
        "single" => {
            let scenario = load_single_scenario(path)?;
            for summary in run_single_scenario(&scenario)? {
                println!(
                    "{}\tsteps = {}\tMSE = {:e}\tmax error = {:e}",
                    summary.integrator, summary.steps, summary.mse, summary.max_abs_error
                );
            }
        }
        "chain" => {
            let scenario = load_chain_scenario(path)?;
            for summary in run_chain_scenario(&scenario)? {
                match summary.stationary_amplitude {
                    Some(amplitude) => {
                        println!("omega = {}\tamplitude = {:e}", summary.omega, amplitude)
                    }
                    None => println!("omega = {}\tsteps = {}", summary.omega, summary.steps),
                }
            }
        }
        other => {
            error!("不明な実行モード: {} (single または chain を指定してください)", other);
            return Err(format!("unknown mode: {}", other).into());
        }
    }

    info!("シミュレーション終了");
    Ok(())
}
