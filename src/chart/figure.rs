// @file: oi_chart/src/chart/figure.rs
// @description: Figure model serialized as a Plotly JSON figure (traces + layout).
// @author: LAS.

use chrono::{DateTime, Utc};
use serde::Serialize;


//
// FIGURE
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Value axes in layout order (`yaxis`, `yaxis2`).
    pub fn value_axes(&self) -> [&Axis; 2] {
        [&self.layout.yaxis, &self.layout.yaxis2]
    }
}


//
// TRACES
//

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Candlestick(CandlestickTrace),
    Scatter(LineTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickTrace {
    pub x: Vec<DateTime<Utc>>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub xaxis: String,
    pub yaxis: String,
    pub visible: bool,
    pub showlegend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub mode: String,
    pub x: Vec<DateTime<Utc>>,
    pub y: Vec<f64>,
    pub xaxis: String,
    pub yaxis: String,
    pub visible: bool,
    pub showlegend: bool,
}


//
// LAYOUT
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Self { text: text.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub side: String,
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangeslider: Option<RangeSlider>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub yaxis2: Axis,
}
