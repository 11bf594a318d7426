// @file: oi_chart/src/core/errors.rs
// @description: Error taxonomy shared by the planner, the exchange session and the chart writer.
// @author: LAS.

use std::fmt;


//
// TYPE DEFINITIONS
//

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Exchange unreachable, non-success HTTP status or unreadable body.
    Transport(String),
    /// Exchange answered but rejected the request (`ret_code != 0`).
    Api { code: i64, message: String },
    /// A returned record lacks an expected field or holds a non-numeric value.
    MalformedResponse(String),
    /// Negative time span or zero interval.
    InvalidTimeRange { day_start: i64, now: i64, interval_minutes: u32 },
    Config(String),
    Io(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport_error: {msg}"),
            Self::Api { code, message } => write!(f, "api_error: ret_code={code} ret_msg={message}"),
            Self::MalformedResponse(msg) => write!(f, "malformed_response: {msg}"),
            Self::InvalidTimeRange { day_start, now, interval_minutes } => write!(
                f,
                "invalid_time_range: day_start={day_start} now={now} interval={interval_minutes}min"
            ),
            Self::Config(msg) => write!(f, "config_error: {msg}"),
            Self::Io(msg) => write!(f, "io_error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}


//
// CONVERSIONS
//

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedResponse(e.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(e: url::ParseError) -> Self {
        Self::Config(format!("invalid url: {e}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
