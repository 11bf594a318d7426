// @file: oi_chart/src/connectors/bybit_rest.rs
// @description: Blocking HTTP session for Bybit inverse perpetual klines and open interest.
// @author: LAS.

use log::debug;
use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;
use crate::core::errors::AppError;
use crate::core::interfaces::MarketDataSession;
use crate::core::models::{CandleRow, OpenInterestRow};


//
// CONSTANTS
//

pub const BYBIT_REST_URL: &str = "https://api.bybit.com";

const KLINE_PATH: &str = "/v2/public/kline/list";
const OPEN_INTEREST_PATH: &str = "/v2/public/open-interest";


//
// CLIENT
//

/// One long-lived unauthenticated session, reused read-only for every request.
pub struct BybitRestClient {
    client: Client,
    base_url: Url,
}

impl BybitRestClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, AppError> {
        let mut url: Url = self.base_url.join(path)?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    // #1. Execute request and unwrap the {ret_code, ret_msg, result} envelope
    fn get_result(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<Value>, AppError> {
        let url: Url = self.endpoint(path, params)?;
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send()?;
        let status = response.status();

        if !status.is_success() {
            return Err(AppError::Transport(format!("HTTP {} from {}", status, url.path())));
        }

        let body: String = response.text()?;
        let json: Value = serde_json::from_str(&body)?;
        parse_envelope(json)
    }
}

impl MarketDataSession for BybitRestClient {
    fn query_kline(
        &self,
        symbol: &str,
        interval_minutes: u32,
        start_time: i64,
        limit: Option<u32>,
    ) -> Result<Vec<CandleRow>, AppError> {
        if limit == Some(0) {
            debug!("kline window at {} has no rows left, skipping request", start_time);
            return Ok(Vec::new());
        }

        let params: Vec<(&str, String)> = query_params(symbol, ("interval", interval_minutes.to_string()), start_time, limit);

        self.get_result(KLINE_PATH, &params)?
            .iter()
            .map(parse_candle)
            .collect()
    }

    fn query_open_interest(
        &self,
        symbol: &str,
        period: &str,
        start_time: i64,
        limit: Option<u32>,
    ) -> Result<Vec<OpenInterestRow>, AppError> {
        if limit == Some(0) {
            debug!("open interest window at {} has no rows left, skipping request", start_time);
            return Ok(Vec::new());
        }

        let params: Vec<(&str, String)> = query_params(symbol, ("period", period.to_string()), start_time, limit);

        self.get_result(OPEN_INTEREST_PATH, &params)?
            .iter()
            .map(parse_open_interest)
            .collect()
    }
}


//
// INTERNAL HELPERS
//

fn query_params(
    symbol: &str,
    granularity: (&'static str, String),
    start_time: i64,
    limit: Option<u32>,
) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = vec![
        ("symbol", symbol.to_uppercase()),
        granularity,
        ("from", start_time.to_string()),
    ];
    if let Some(limit) = limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

fn parse_envelope(json: Value) -> Result<Vec<Value>, AppError> {
    let code: i64 = json.get("ret_code")
        .and_then(Value::as_i64)
        .ok_or_else(|| AppError::MalformedResponse("missing ret_code".to_string()))?;

    if code != 0 {
        let message: String = json.get("ret_msg")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(AppError::Api { code, message });
    }

    match json.get("result") {
        Some(Value::Array(rows)) => Ok(rows.clone()),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(other) => Err(AppError::MalformedResponse(format!("result is not a list: {}", other))),
    }
}

// Only the OHLCV fields survive; symbol, interval, turnover etc. are dropped.
fn parse_candle(item: &Value) -> Result<CandleRow, AppError> {
    Ok(CandleRow {
        open_time: get_i64(item, "open_time")?,
        open: get_f64(item, "open")?,
        high: get_f64(item, "high")?,
        low: get_f64(item, "low")?,
        close: get_f64(item, "close")?,
        volume: get_f64(item, "volume")?,
    })
}

fn parse_open_interest(item: &Value) -> Result<OpenInterestRow, AppError> {
    Ok(OpenInterestRow {
        timestamp: get_i64(item, "timestamp")?,
        open_interest: get_f64(item, "open_interest")?,
    })
}

// Bybit sends prices as decimal strings and sizes as numbers, depending on the endpoint.
fn get_f64(item: &Value, field: &str) -> Result<f64, AppError> {
    let value: &Value = item.get(field)
        .ok_or_else(|| AppError::MalformedResponse(format!("missing field '{}'", field)))?;

    let parsed: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| AppError::MalformedResponse(format!("field '{}' is not numeric: {}", field, value)))
}

fn get_i64(item: &Value, field: &str) -> Result<i64, AppError> {
    let value: &Value = item.get(field)
        .ok_or_else(|| AppError::MalformedResponse(format!("missing field '{}'", field)))?;

    let parsed: Option<i64> = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| AppError::MalformedResponse(format!("field '{}' is not an integer: {}", field, value)))
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    // Answers exactly one HTTP request on a local port with a canned status and body.
    fn serve_once(status: &str, body: &str) -> String {
        let response: String = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status, body.len(), body
        );
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn candle_fields_accept_strings_and_numbers() {
        let item = json!({
            "symbol": "BTCUSD", "interval": "5", "open_time": 1_700_000_000,
            "open": "35000.5", "high": "35010", "low": 34990.0, "close": "35005",
            "volume": "1200", "turnover": "0.034"
        });

        let row = parse_candle(&item).unwrap();
        assert_eq!(row.open_time, 1_700_000_000);
        assert_eq!(row.open, 35000.5);
        assert_eq!(row.low, 34990.0);
        assert_eq!(row.volume, 1200.0);
    }

    #[test]
    fn missing_ohlc_field_is_malformed() {
        let item = json!({ "open_time": 1, "open": "1", "high": "1", "low": "1", "volume": "1" });
        match parse_candle(&item) {
            Err(AppError::MalformedResponse(msg)) => assert!(msg.contains("close")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn envelope_with_error_code_is_api_error() {
        let json = json!({ "ret_code": 10001, "ret_msg": "params error", "result": null });
        assert_eq!(
            parse_envelope(json),
            Err(AppError::Api { code: 10001, message: "params error".to_string() })
        );
    }

    #[test]
    fn envelope_with_null_result_is_empty() {
        let json = json!({ "ret_code": 0, "ret_msg": "OK", "result": null });
        assert!(parse_envelope(json).unwrap().is_empty());
    }

    #[test]
    fn envelope_without_ret_code_is_malformed() {
        let json = json!({ "ret_msg": "OK", "result": [] });
        assert_eq!(parse_envelope(json), Err(AppError::MalformedResponse("missing ret_code".to_string())));
    }

    #[test]
    fn envelope_with_object_result_is_malformed() {
        let json = json!({ "ret_code": 0, "ret_msg": "OK", "result": {} });
        assert!(matches!(parse_envelope(json), Err(AppError::MalformedResponse(_))));
    }

    #[test]
    fn server_error_status_is_transport_error() {
        let base = serve_once("500 Internal Server Error", "");
        let client = BybitRestClient::new(&base).unwrap();

        match client.query_kline("BTCUSD", 5, 0, Some(4)) {
            Err(AppError::Transport(msg)) => assert!(msg.contains("500"), "{}", msg),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn non_json_body_is_malformed() {
        let base = serve_once("200 OK", "not json!");
        let client = BybitRestClient::new(&base).unwrap();

        let result = client.query_open_interest("BTCUSD", "5min", 0, Some(4));
        assert!(matches!(result, Err(AppError::MalformedResponse(_))), "{:?}", result);
    }

    #[test]
    fn successful_response_decodes_rows() {
        let base = serve_once("200 OK", concat!(
            r#"{"ret_code":0,"ret_msg":"OK","result":[{"symbol":"BTCUSD","open_interest":1000,"timestamp":300},"#,
            r#"{"open_interest":"1001.5","timestamp":600}]}"#
        ));
        let client = BybitRestClient::new(&base).unwrap();

        let rows = client.query_open_interest("BTCUSD", "5min", 0, Some(2)).unwrap();
        assert_eq!(
            rows,
            vec![
                OpenInterestRow { timestamp: 300, open_interest: 1000.0 },
                OpenInterestRow { timestamp: 600, open_interest: 1001.5 },
            ]
        );
    }

    #[test]
    fn open_interest_row_decodes() {
        let item = json!({ "open_interest": 812_345_678, "timestamp": 1_700_000_300, "symbol": "BTCUSD" });
        let row = parse_open_interest(&item).unwrap();
        assert_eq!(row, OpenInterestRow { timestamp: 1_700_000_300, open_interest: 812_345_678.0 });
    }

    #[test]
    fn query_params_include_limit_only_when_given() {
        let full = query_params("btcusd", ("interval", "5".to_string()), 60, None);
        assert_eq!(full.len(), 3);
        assert_eq!(full[0], ("symbol", "BTCUSD".to_string()));

        let partial = query_params("BTCUSD", ("period", "5min".to_string()), 60, Some(4));
        assert_eq!(partial.last(), Some(&("limit", "4".to_string())));
    }

    #[test]
    fn endpoint_joins_path_and_query() {
        let client = BybitRestClient::new("https://api.bybit.com").unwrap();
        let url = client.endpoint(KLINE_PATH, &[("symbol", "BTCUSD".to_string()), ("from", "0".to_string())]).unwrap();
        assert_eq!(url.as_str(), "https://api.bybit.com/v2/public/kline/list?symbol=BTCUSD&from=0");
    }

    #[test]
    fn zero_limit_answers_without_network() {
        // Unroutable base URL: any real request would fail.
        let client = BybitRestClient::new("http://127.0.0.1:9").unwrap();
        assert!(client.query_kline("BTCUSD", 5, 0, Some(0)).unwrap().is_empty());
        assert!(client.query_open_interest("BTCUSD", "5min", 0, Some(0)).unwrap().is_empty());
    }
}
