// @file: oi_chart/src/chart/composer.rs
// @description: Builds the dual-axis figure: candles on top, open interest underneath, one shared time axis.
// @author: LAS.

use chrono::{DateTime, Utc};
use log::warn;
use crate::chart::figure::{Axis, CandlestickTrace, Figure, Layout, LineTrace, RangeSlider, Title, Trace};
use crate::core::models::{CandleRow, OpenInterestRow, TimeKeyed, TimeTable};


//
// CONSTANTS
//

const OI_DOMAIN: [f64; 2] = [0.0, 0.3];
const PRICE_DOMAIN: [f64; 2] = [0.35, 1.0];


//
// PUBLIC INTERFACE
//

pub fn compose_figure(
    prices: &TimeTable<CandleRow>,
    open_interest: &TimeTable<OpenInterestRow>,
    title: &str,
) -> Figure {
    // #1. Candles on the upper axis (y2)
    let candles = CandlestickTrace {
        x: to_datetimes(prices),
        open: prices.rows().iter().map(|r| r.open).collect(),
        high: prices.rows().iter().map(|r| r.high).collect(),
        low: prices.rows().iter().map(|r| r.low).collect(),
        close: prices.rows().iter().map(|r| r.close).collect(),
        xaxis: "x".to_string(),
        yaxis: "y2".to_string(),
        visible: true,
        showlegend: false,
    };

    // #2. Open interest line on the lower axis (y)
    let oi_line = LineTrace {
        mode: "lines".to_string(),
        x: to_datetimes(open_interest),
        y: open_interest.rows().iter().map(|r| r.open_interest).collect(),
        xaxis: "x".to_string(),
        yaxis: "y".to_string(),
        visible: true,
        showlegend: false,
    };

    // #3. Layout
    let layout = Layout {
        title: Title::from(title),
        xaxis: Axis {
            side: "bottom".to_string(),
            title: Title::from("Date"),
            domain: None,
            anchor: None,
            rangeslider: Some(RangeSlider { visible: false }),
        },
        yaxis: value_axis("OI", OI_DOMAIN),
        yaxis2: value_axis("Price", PRICE_DOMAIN),
    };

    Figure {
        data: vec![Trace::Candlestick(candles), Trace::Scatter(oi_line)],
        layout,
    }
}


//
// INTERNAL HELPERS
//

fn value_axis(title: &str, domain: [f64; 2]) -> Axis {
    Axis {
        side: "right".to_string(),
        title: Title::from(title),
        domain: Some(domain),
        anchor: Some("x".to_string()),
        rangeslider: None,
    }
}

// Epoch seconds -> UTC datetimes. Keys outside chrono's range are pinned to the epoch.
fn to_datetimes<R: TimeKeyed>(table: &TimeTable<R>) -> Vec<DateTime<Utc>> {
    table.keys()
        .map(|ts| {
            DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_else(|| {
                warn!("timestamp {} out of range, pinned to epoch", ts);
                DateTime::<Utc>::default()
            })
        })
        .collect()
}
