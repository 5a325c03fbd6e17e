// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-chart state and the poll-to-frame pipeline.

use chrono::{Datelike, Months, NaiveDate};
use peniko::Color;
use retviz_charts::{
    BarSeries, Chart, GaugeSpec, GroupedBarSpec, HeuristicTextMeasurer, PieSlice, PieSpec, Size,
    TrendPoint, TrendSeries, TrendSpec,
};
use retviz_scene::Frame;
use tracing::{debug, warn};

use crate::aggregate::{self, CategoryPoint};
use crate::fetch::PollOutcome;
use crate::model::{ReturnItem, TrendRecord};
use crate::sizer::ChartSizer;

/// Days of x-domain padding on each side of the trend data.
const TREND_DOMAIN_PAD: f64 = 5.0;
/// Months in the placeholder ramp shown before any stats arrive.
const PLACEHOLDER_MONTHS: u32 = 6;

/// Which monthly percentage the trend chart plots. Exactly one metric is
/// active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum TrendMetric {
    #[default]
    Donate,
    Resell,
    Recycle,
}

impl TrendMetric {
    /// Parses a metric name as supplied by configuration.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "donate" => Some(Self::Donate),
            "resell" => Some(Self::Resell),
            "recycle" => Some(Self::Recycle),
            _ => None,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Donate => "Donate",
            Self::Resell => "Resell",
            Self::Recycle => "Recycle",
        }
    }

    fn color(self) -> Color {
        match self {
            Self::Donate => Color::from_rgb8(0x4F, 0x46, 0xE5),
            Self::Resell => Color::from_rgb8(0x10, 0xB9, 0x81),
            Self::Recycle => Color::from_rgb8(0x8B, 0x5C, 0xF6),
        }
    }

    fn value(self, record: &TrendRecord) -> f64 {
        match self {
            Self::Donate => record.donate_percent,
            Self::Resell => record.resell_percent,
            Self::Recycle => record.recycle_percent,
        }
    }
}

/// Lifecycle of one chart slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    /// No data has arrived yet.
    Loading,
    /// A frame is available.
    Rendered,
    /// Data arrived but was empty.
    Empty,
    /// Fetching failed before any frame existed.
    Error,
}

/// One chart's owned state: its sizing rule, lifecycle phase, last frame,
/// and last fetch error if any.
#[derive(Debug)]
pub(crate) struct ChartSlot {
    pub(crate) name: &'static str,
    sizer: ChartSizer,
    pub(crate) phase: Phase,
    pub(crate) frame: Option<Frame>,
    /// Set when the latest poll failed; the frame, if any, is stale.
    pub(crate) error: Option<String>,
}

impl ChartSlot {
    fn new(name: &'static str, sizer: ChartSizer) -> Self {
        Self {
            name,
            sizer,
            phase: Phase::Loading,
            frame: None,
            error: None,
        }
    }

    fn render(&mut self, chart: &Chart, container: Size, measurer: &HeuristicTextMeasurer) {
        // Rendering alone does not clear a staleness flag: a resize redraws
        // from retained data, so the flag survives until fresh data arrives.
        let size = self.sizer.resolve(container);
        self.frame = Some(chart.draw(size, measurer));
        self.phase = Phase::Rendered;
    }

    fn clear(&mut self) {
        self.frame = None;
        self.phase = Phase::Empty;
        self.error = None;
    }

    fn fail(&mut self, message: String) {
        // Keep the last frame on screen; flag it as stale.
        self.error = Some(message);
        if self.frame.is_none() {
            self.phase = Phase::Error;
        }
    }
}

/// Owns the four dashboard charts and turns poll outcomes into frames.
///
/// Outcomes are applied at most once and only in order: anything with a
/// sequence number at or below the last applied one is dropped.
#[derive(Debug)]
pub(crate) struct DashboardHost {
    container: Size,
    measurer: HeuristicTextMeasurer,
    applied_seq: u64,
    last_items: Option<Vec<ReturnItem>>,
    last_records: Option<Vec<TrendRecord>>,
    trend_metric: TrendMetric,
    pub(crate) summary: Vec<CategoryPoint>,
    pub(crate) bars: ChartSlot,
    pub(crate) gauge: ChartSlot,
    pub(crate) pie: ChartSlot,
    pub(crate) trend: ChartSlot,
}

impl DashboardHost {
    pub(crate) fn new(container: Size) -> Self {
        Self {
            container,
            measurer: HeuristicTextMeasurer,
            applied_seq: 0,
            last_items: None,
            last_records: None,
            trend_metric: TrendMetric::default(),
            summary: Vec::new(),
            bars: ChartSlot::new("industry_comparison", ChartSizer::wide()),
            gauge: ChartSlot::new("score_gauge", ChartSizer::square()),
            pie: ChartSlot::new("category_breakdown", ChartSizer::donut()),
            trend: ChartSlot::new("monthly_trend", ChartSizer::wide()),
        }
    }

    /// Picks the trend metric to plot from the first refresh onwards.
    pub(crate) fn with_trend_metric(mut self, metric: TrendMetric) -> Self {
        self.trend_metric = metric;
        self
    }

    pub(crate) fn slots(&self) -> [&ChartSlot; 4] {
        [&self.bars, &self.gauge, &self.pie, &self.trend]
    }

    /// The most recently applied item list.
    pub(crate) fn items(&self) -> &[ReturnItem] {
        self.last_items.as_deref().unwrap_or_default()
    }

    /// Applies a poll outcome. Returns false if it was dropped as stale.
    pub(crate) fn apply(&mut self, outcome: &PollOutcome, today: NaiveDate) -> bool {
        if outcome.seq <= self.applied_seq {
            debug!(
                seq = outcome.seq,
                applied = self.applied_seq,
                "dropping out-of-order poll outcome"
            );
            return false;
        }
        self.applied_seq = outcome.seq;

        match &outcome.items {
            Ok(items) => {
                self.last_items = Some(items.clone());
                self.gauge.error = None;
                self.pie.error = None;
            }
            Err(err) => {
                warn!(error = %err, "item fetch failed, keeping previous items");
                self.gauge.fail(err.to_string());
                self.pie.fail(err.to_string());
            }
        }
        match &outcome.stats {
            Ok(stats) => {
                self.last_records = Some(stats.chart_data.clone());
                self.trend.error = None;
            }
            Err(err) => {
                warn!(error = %err, "stats fetch failed, keeping previous trend");
                self.trend.fail(err.to_string());
            }
        }

        self.redraw(today, outcome.items.is_ok(), outcome.stats.is_ok());
        true
    }

    /// Re-renders every chart whose data is current, e.g. after a resize.
    pub(crate) fn set_container(&mut self, container: Size, today: NaiveDate) {
        self.container = container;
        self.redraw(today, true, true);
    }

    /// Switches the active trend metric, rebuilding the trend frame from
    /// scratch so nothing of the previous series remains.
    pub(crate) fn set_trend_metric(&mut self, metric: TrendMetric, today: NaiveDate) {
        if self.trend_metric == metric {
            return;
        }
        self.trend_metric = metric;
        self.redraw(today, false, true);
    }

    fn redraw(&mut self, today: NaiveDate, items_fresh: bool, stats_fresh: bool) {
        // The industry comparison is a fixed reference series.
        let bars = industry_comparison();
        self.bars.render(&bars, self.container, &self.measurer);

        if items_fresh {
            if let Some(items) = self.last_items.as_deref() {
                self.summary = aggregate::category_points(&aggregate::CategoryCounts::tally(items));
                if items.is_empty() {
                    self.gauge.clear();
                    self.pie.clear();
                } else {
                    let gauge = Chart::Gauge(GaugeSpec::new(aggregate::mean_score(items)));
                    self.gauge.render(&gauge, self.container, &self.measurer);
                    let pie = Chart::Pie(category_pie(&self.summary));
                    self.pie.render(&pie, self.container, &self.measurer);
                }
            }
        }

        if stats_fresh {
            let records = match self.last_records.as_deref() {
                Some(records) if !records.is_empty() => records.to_vec(),
                _ => placeholder_records(today),
            };
            let chart = Chart::Trend(trend_chart(&records, self.trend_metric));
            self.trend.render(&chart, self.container, &self.measurer);
        }
    }
}

/// The static two-series industry comparison chart.
fn industry_comparison() -> Chart {
    Chart::GroupedBar(GroupedBarSpec::new(
        vec![
            "Recycled".to_string(),
            "Diverted".to_string(),
            "Emissions".to_string(),
            "Resold".to_string(),
        ],
        BarSeries::new(
            "Your Company",
            Color::from_rgb8(0x7C, 0xB3, 0x42),
            vec![71.0, 94.0, 79.0, 52.0],
        ),
        BarSeries::new(
            "Industry Avg",
            Color::from_rgb8(0xA9, 0xA9, 0xA9),
            vec![43.0, 69.0, 49.0, 21.0],
        ),
    ))
}

/// Builds the category share donut from the aggregated routing points.
fn category_pie(points: &[CategoryPoint]) -> PieSpec {
    PieSpec::new(
        points
            .iter()
            .map(|p| PieSlice::new(p.name, p.color, p.count as f64))
            .collect(),
    )
}

/// Parses a `YYYY-MM` month key to the first of that month.
fn parse_month(month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

/// Continuous day number used as the trend x unit.
fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn tooltip(date: NaiveDate, value: f64) -> String {
    format!("{}: {value:.1}%", date.format("%B %Y"))
}

/// Builds the monthly trend chart for the active metric from stats records.
/// Records with unparseable month keys are skipped.
fn trend_chart(records: &[TrendRecord], metric: TrendMetric) -> TrendSpec {
    let mut months: Vec<(NaiveDate, &TrendRecord)> = records
        .iter()
        .filter_map(|r| parse_month(&r.month).map(|d| (d, r)))
        .collect();
    months.sort_by_key(|(date, _)| *date);

    let xs: Vec<f64> = months.iter().map(|(date, _)| day_number(*date)).collect();
    let (lo, hi) = match (xs.first(), xs.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => (0.0, 1.0),
    };

    let series = TrendSeries::new(
        metric.name(),
        metric.color(),
        months
            .iter()
            .map(|&(date, record)| {
                TrendPoint::new(day_number(date), metric.value(record))
                    .with_label(tooltip(date, metric.value(record)))
            })
            .collect(),
    );

    TrendSpec::new(
        vec![series],
        (lo - TREND_DOMAIN_PAD, hi + TREND_DOMAIN_PAD),
    )
    .with_x_ticks(
        xs,
        months
            .iter()
            .map(|(date, _)| date.format("%b").to_string())
            .collect(),
    )
}

/// A gently rising six-month series ending at `today`'s month, shown until
/// real stats arrive. The same `today` always yields the same records.
fn placeholder_records(today: NaiveDate) -> Vec<TrendRecord> {
    let end = today.with_day(1).unwrap_or(today);
    (0..PLACEHOLDER_MONTHS)
        .rev()
        .filter_map(|back| end.checked_sub_months(Months::new(back)))
        .enumerate()
        .map(|(i, date)| {
            let i = i as f64;
            TrendRecord {
                month: date.format("%Y-%m").to_string(),
                recycle_percent: 30.0 + 5.0 * i,
                donate_percent: 20.0 + 3.0 * i,
                resell_percent: 10.0 + 4.0 * i,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::model::StatsResponse;

    fn container() -> Size {
        Size::new(500.0, 400.0)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn item(status: &str, score: f64) -> ReturnItem {
        serde_json::from_value(serde_json::json!({
            "id": "t",
            "status": status,
            "score": score,
        }))
        .unwrap()
    }

    fn record(month: &str, recycle: f64) -> TrendRecord {
        TrendRecord {
            month: month.to_string(),
            recycle_percent: recycle,
            donate_percent: 20.0,
            resell_percent: 10.0,
        }
    }

    fn ok_outcome(seq: u64, items: Vec<ReturnItem>, records: Vec<TrendRecord>) -> PollOutcome {
        PollOutcome {
            seq,
            items: Ok(items),
            stats: Ok(StatsResponse {
                chart_data: records,
            }),
        }
    }

    fn shape_error() -> FetchError {
        FetchError::Shape(serde_json::from_str::<u32>("[]").unwrap_err())
    }

    #[test]
    fn slots_start_out_loading() {
        let host = DashboardHost::new(container());
        for slot in host.slots() {
            assert_eq!(slot.phase, Phase::Loading);
            assert!(slot.frame.is_none());
        }
    }

    #[test]
    fn a_successful_poll_renders_every_chart() {
        let mut host = DashboardHost::new(container());
        let applied = host.apply(
            &ok_outcome(
                1,
                vec![item("Recycled", 80.0)],
                vec![record("2025-04", 40.0), record("2025-05", 50.0)],
            ),
            today(),
        );
        assert!(applied);
        for slot in host.slots() {
            assert_eq!(slot.phase, Phase::Rendered);
            assert!(slot.frame.as_ref().is_some_and(|f| !f.is_empty()));
            assert!(slot.error.is_none());
        }
    }

    #[test]
    fn stale_outcomes_are_dropped() {
        let mut host = DashboardHost::new(container());
        assert!(host.apply(&ok_outcome(2, vec![item("Resell", 90.0)], vec![]), today()));
        let gauge_before = host.gauge.frame.clone();

        let stale = ok_outcome(2, vec![item("Donated", 10.0)], vec![]);
        assert!(!host.apply(&stale, today()));
        assert_eq!(host.gauge.frame, gauge_before);
    }

    #[test]
    fn a_failed_poll_keeps_the_stale_frame_and_flags_it() {
        let mut host = DashboardHost::new(container());
        assert!(host.apply(&ok_outcome(1, vec![item("Recycled", 70.0)], vec![]), today()));
        let frame_before = host.gauge.frame.clone();

        let outcome = PollOutcome {
            seq: 2,
            items: Err(shape_error()),
            stats: Err(shape_error()),
        };
        assert!(host.apply(&outcome, today()));
        assert_eq!(host.gauge.phase, Phase::Rendered);
        assert_eq!(host.gauge.frame, frame_before);
        assert!(host.gauge.error.is_some());
        assert!(host.pie.error.is_some());
        assert!(host.trend.error.is_some());
    }

    #[test]
    fn a_resize_keeps_the_staleness_flag() {
        let mut host = DashboardHost::new(container());
        assert!(host.apply(&ok_outcome(1, vec![item("Recycled", 70.0)], vec![]), today()));
        let outcome = PollOutcome {
            seq: 2,
            items: Err(shape_error()),
            stats: Err(shape_error()),
        };
        assert!(host.apply(&outcome, today()));

        host.set_container(Size::new(900.0, 700.0), today());
        assert!(host.gauge.error.is_some());
        assert!(host.trend.error.is_some());
        assert_eq!(host.gauge.phase, Phase::Rendered);

        // Fresh data on the next poll clears the flags.
        assert!(host.apply(&ok_outcome(3, vec![item("Recycled", 70.0)], vec![]), today()));
        assert!(host.gauge.error.is_none());
        assert!(host.trend.error.is_none());
    }

    #[test]
    fn a_failure_before_any_frame_is_an_error_phase() {
        let mut host = DashboardHost::new(container());
        let outcome = PollOutcome {
            seq: 1,
            items: Err(shape_error()),
            stats: Err(shape_error()),
        };
        assert!(host.apply(&outcome, today()));
        assert_eq!(host.gauge.phase, Phase::Error);
        assert_eq!(host.pie.phase, Phase::Error);
        assert_eq!(host.trend.phase, Phase::Error);
        // The static comparison chart needs no data and still renders.
        assert_eq!(host.bars.phase, Phase::Rendered);
    }

    #[test]
    fn zero_items_empty_the_gauge_and_the_donut() {
        let mut host = DashboardHost::new(container());
        assert!(host.apply(&ok_outcome(1, vec![], vec![]), today()));
        assert_eq!(host.gauge.phase, Phase::Empty);
        assert!(host.gauge.frame.is_none());
        assert_eq!(host.pie.phase, Phase::Empty);
        assert!(host.pie.frame.is_none());
        assert!(host.summary.iter().all(|p| p.percent == 0));
    }

    #[test]
    fn the_donut_draws_one_slice_per_populated_category() {
        let mut host = DashboardHost::new(container());
        let items = vec![
            item("Recycled", 50.0),
            item("Recycled", 60.0),
            item("Donated", 50.0),
        ];
        assert!(host.apply(&ok_outcome(1, items, vec![]), today()));
        assert_eq!(host.pie.phase, Phase::Rendered);
        let frame = host.pie.frame.as_ref().unwrap();
        // Only Recycle and Donate have items, so two wedges are drawn.
        let wedges = frame
            .marks()
            .iter()
            .filter(|m| matches!(m.body, retviz_scene::MarkBody::Path(_)))
            .count();
        assert_eq!(wedges, 2);
        // Fixed-height donut sizing against the 500-wide container.
        assert_eq!(frame.view().width(), 440.0);
        assert_eq!(frame.view().height(), 240.0);
    }

    #[test]
    fn the_reference_series_is_labelled_industry_avg() {
        let Chart::GroupedBar(spec) = industry_comparison() else {
            panic!("expected grouped bars");
        };
        assert_eq!(spec.primary.name, "Your Company");
        assert_eq!(spec.secondary.name, "Industry Avg");
    }

    #[test]
    fn missing_stats_fall_back_to_the_placeholder_ramp() {
        let records = placeholder_records(today());
        assert_eq!(records.len(), PLACEHOLDER_MONTHS as usize);
        assert_eq!(records.first().map(|r| r.month.as_str()), Some("2025-01"));
        assert_eq!(records.last().map(|r| r.month.as_str()), Some("2025-06"));
        // Deterministic: the same day yields the same ramp.
        assert_eq!(placeholder_records(today()), placeholder_records(today()));

        let mut host = DashboardHost::new(container());
        assert!(host.apply(&ok_outcome(1, vec![], vec![]), today()));
        assert_eq!(host.trend.phase, Phase::Rendered);
    }

    #[test]
    fn summary_reflects_the_latest_items() {
        let mut host = DashboardHost::new(container());
        let items = vec![
            item("Recycled", 50.0),
            item("Donated", 50.0),
            item("Resell", 50.0),
            item("Broken", 50.0),
        ];
        assert!(host.apply(&ok_outcome(1, items, vec![]), today()));
        assert_eq!(host.summary.len(), 4);
        assert!(host.summary.iter().all(|p| p.percent == 25));
    }

    #[test]
    fn resize_redraws_at_the_new_size() {
        let mut host = DashboardHost::new(container());
        assert!(host.apply(
            &ok_outcome(1, vec![item("Recycled", 60.0)], vec![record("2025-05", 40.0)]),
            today(),
        ));
        host.set_container(Size::new(900.0, 700.0), today());
        let frame = host.bars.frame.as_ref().unwrap();
        // Wide sizing: width 900 - 60, height capped at 350.
        assert_eq!(frame.view().width(), 840.0);
        assert_eq!(frame.view().height(), 350.0);
    }

    #[test]
    fn month_keys_parse_and_order_the_trend() {
        let records = [record("2025-05", 50.0), record("2025-03", 30.0)];
        let spec = trend_chart(&records, TrendMetric::Recycle);
        assert_eq!(spec.x_ticks.len(), 2);
        assert!(spec.x_ticks[0] < spec.x_ticks[1]);
        assert_eq!(spec.x_tick_labels, vec!["Mar", "May"]);
        assert_eq!(spec.x_domain.0, spec.x_ticks[0] - 5.0);
        assert_eq!(spec.x_domain.1, spec.x_ticks[1] + 5.0);
        let label = spec.series[0].points[0].label.as_deref();
        assert_eq!(label, Some("March 2025: 30.0%"));
    }

    #[test]
    fn unparseable_month_keys_are_skipped() {
        let records = [record("not-a-month", 50.0), record("2025-05", 40.0)];
        let spec = trend_chart(&records, TrendMetric::Donate);
        assert_eq!(spec.x_ticks.len(), 1);
        assert_eq!(spec.series[0].points.len(), 1);
    }

    #[test]
    fn only_the_active_metric_is_plotted() {
        let spec = trend_chart(&[record("2025-05", 50.0)], TrendMetric::Donate);
        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.series[0].name, "Donate");
        assert_eq!(spec.series[0].points[0].value, 20.0);
    }

    #[test]
    fn switching_the_metric_replaces_the_trend_frame() {
        let mut host = DashboardHost::new(container());
        assert!(host.apply(
            &ok_outcome(
                1,
                vec![],
                vec![record("2025-04", 40.0), record("2025-05", 50.0)],
            ),
            today(),
        ));
        let donate_frame = host.trend.frame.clone();

        host.set_trend_metric(TrendMetric::Recycle, today());
        let recycle_frame = host.trend.frame.clone().unwrap();
        assert_ne!(Some(recycle_frame.clone()), donate_frame);
        // The rebuilt frame carries only the recycle tooltips.
        let tooltips: Vec<&str> = recycle_frame
            .marks()
            .iter()
            .filter_map(|m| match &m.body {
                retviz_scene::MarkBody::Path(path) => path.tooltip.as_deref(),
                _ => None,
            })
            .collect();
        assert_eq!(tooltips, vec!["April 2025: 40.0%", "May 2025: 50.0%"]);
    }
}
