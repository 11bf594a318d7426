// @file: oi_chart/src/main.rs
// @description: Fetches today's candles and open interest, writes the chart and opens it.
// @author: LAS.

use chrono::Utc;
use log::{error, info};
use oi_chart::app::run_current_day;
use oi_chart::chart::render;
use oi_chart::connectors::build_session;
use oi_chart::core::errors::AppError;
use oi_chart::utils::config::AppConfig;

fn main() {
    // 1. Pick up APP_* overrides from a local .env, if any
    dotenv::dotenv().ok();

    let config: AppConfig = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
            error!("{}", AppError::from(e));
            std::process::exit(1);
        }
    };

    // 2. Initialize Logger with the configured default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str())).init();

    if let Err(e) = run(&config) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    info!(">>> {} {}min chart starting <<<", config.symbol, config.interval_minutes);

    // 3. One shared session for every request
    let session = build_session(config)?;
    let day = run_current_day(&session, config, Utc::now())?;

    // 4. Output
    let path = render::write_html(&day.figure, &config.chart_output_path)?;
    if config.open_viewer {
        render::open_in_viewer(&path);
    }

    Ok(())
}
