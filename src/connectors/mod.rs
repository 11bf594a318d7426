// @file: oi_chart/src/connectors/mod.rs
// @description: Exchange sessions implementing the market data capability.
// @author: LAS.

pub mod bybit_rest;

use crate::core::errors::AppError;
use crate::utils::config::AppConfig;
use bybit_rest::BybitRestClient;

//
// FACTORY FUNCTION
//

pub fn build_session(config: &AppConfig) -> Result<BybitRestClient, AppError> {
    BybitRestClient::new(&config.bybit_rest_url)
}
