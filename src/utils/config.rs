// @file: oi_chart/src/utils/config.rs
// @description: Layered configuration (defaults, optional config file, APP_* environment).
// @author: LAS.

use serde::Deserialize;
use config::{Config, ConfigError, File, Environment};
use crate::connectors::bybit_rest::BYBIT_REST_URL;

//
// TYPE DEFINITIONS
//

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,

    // Instrument
    pub symbol: String,
    pub interval_minutes: u32,

    // Exchange
    pub bybit_rest_url: String,

    // Chart Output
    pub chart_output_path: String,
    pub chart_title: Option<String>,
    pub open_viewer: bool,
}

impl AppConfig {
    //
    // PUBLIC INTERFACE
    //

    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("log_level", "info")?
            .set_default("symbol", "BTCUSD")?
            // 5min is the smallest period the open interest endpoint accepts
            .set_default("interval_minutes", 5)?
            .set_default("bybit_rest_url", BYBIT_REST_URL)?
            .set_default("chart_output_path", "oi_chart.html")?
            .set_default("open_viewer", true)?

            // File & Env Overrides
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP"));

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn title(&self) -> String {
        self.chart_title
            .clone()
            .unwrap_or_else(|| format!("{} today", self.symbol))
    }
}
