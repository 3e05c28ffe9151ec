//! Projections of resampled quotes into chart- and table-ready shapes.
//!
//! Both projections are pure and never fail. An empty [`Resampled`] yields an
//! empty frame or view, which the consumer renders as "no data".

use chrono::SecondsFormat;
use chrono_tz::Tz;
use quoteplot_types::DisplayMode;
use serde::Serialize;

use crate::timeseries::resample::{AlignedSeries, Resampled};

/// Placeholder shown in the table for an absent value.
pub const MISSING: &str = "N/A";
/// Decimal places used for prices and spread in the table.
pub const DECIMALS: usize = 5;

const TABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which y-axis a dataset is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Left axis, used by series A.
    Primary,
    /// Right axis, used by series B.
    Secondary,
}

/// One line on the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    /// Legend label, e.g. `"Tradeview XAUUSD Ask"`.
    pub label: String,
    /// Values aligned with [`ChartFrame::labels`].
    pub values: Vec<Option<f64>>,
    /// Axis the line is plotted against.
    pub axis: Axis,
    /// Bid lines are drawn dashed.
    pub dashed: bool,
}

/// Everything a chart widget needs for one refresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartFrame {
    /// Timeline instants as RFC 3339 strings with millisecond precision.
    pub labels: Vec<String>,
    /// Price lines, series A first.
    pub datasets: Vec<ChartDataset>,
    /// `ask(A) - bid(B)` per label.
    pub spread: Vec<Option<f64>>,
}

impl ChartFrame {
    /// Returns `true` if there is nothing to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn series_datasets(s: &AlignedSeries, axis: Axis, mode: DisplayMode, out: &mut Vec<ChartDataset>) {
    let name = s.key.label();
    match mode {
        DisplayMode::Midline => out.push(ChartDataset {
            label: format!("{name} Midline"),
            values: s.midline.clone(),
            axis,
            dashed: false,
        }),
        _ => {
            out.push(ChartDataset {
                label: format!("{name} Ask"),
                values: s.ask.clone(),
                axis,
                dashed: false,
            });
            out.push(ChartDataset {
                label: format!("{name} Bid"),
                values: s.bid.clone(),
                axis,
                dashed: true,
            });
        }
    }
}

/// Build the chart frame for `data` in the given display mode.
///
/// `AskBid` yields four datasets (A ask, A bid, B ask, B bid); `Midline`
/// yields two. Series A is plotted on the primary axis, B on the secondary.
#[must_use]
pub fn chart_frame(data: &Resampled, mode: DisplayMode) -> ChartFrame {
    if data.is_empty() {
        return ChartFrame::default();
    }
    let labels = data
        .timeline
        .iter()
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .collect();
    let mut datasets = Vec::with_capacity(4);
    series_datasets(&data.a, Axis::Primary, mode, &mut datasets);
    series_datasets(&data.b, Axis::Secondary, mode, &mut datasets);
    ChartFrame {
        labels,
        datasets,
        spread: data.spread.clone(),
    }
}

/// One row of the spread table, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Local time of the row.
    pub timestamp: String,
    /// Series A ask.
    pub a_ask: String,
    /// Series A bid.
    pub a_bid: String,
    /// Series B ask.
    pub b_ask: String,
    /// Series B bid.
    pub b_bid: String,
    /// `ask(A) - bid(B)`.
    pub spread: String,
}

/// The spread table: newest rows first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    /// Column headers.
    pub columns: [String; 6],
    /// Formatted rows, newest first.
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Returns `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell(v: Option<f64>) -> String {
    v.map_or_else(|| MISSING.to_string(), |x| format!("{x:.DECIMALS$}"))
}

/// Build the spread table for `data`: at most `rows` rows, newest first,
/// timestamps rendered in `tz`.
#[must_use]
pub fn table_view(data: &Resampled, rows: usize, tz: Tz) -> TableView {
    let (a, b) = (data.a.key.label(), data.b.key.label());
    let columns = [
        "Timestamp".to_string(),
        format!("{a} Ask"),
        format!("{a} Bid"),
        format!("{b} Ask"),
        format!("{b} Bid"),
        "Spread (A-B)".to_string(),
    ];
    let at = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten();
    let rows = (0..data.len())
        .rev()
        .take(rows)
        .map(|i| TableRow {
            timestamp: data.timeline[i]
                .with_timezone(&tz)
                .format(TABLE_TIME_FORMAT)
                .to_string(),
            a_ask: cell(at(&data.a.ask, i)),
            a_bid: cell(at(&data.a.bid, i)),
            b_ask: cell(at(&data.b.ask, i)),
            b_bid: cell(at(&data.b.bid, i)),
            spread: cell(at(&data.spread, i)),
        })
        .collect();
    TableView { columns, rows }
}
