use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use satparity_common::types::{ParityBand, ParityKind};

use crate::board::CurrencyParity;
use crate::curve::CurveStore;

/// A currency placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMarker {
    pub code: String,
    pub name: String,
    pub kind: ParityKind,
    pub band: ParityBand,
    pub sat_price: f64,
    /// Percent along the curve's date span (0 = first control point, 100 = last)
    pub position_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub year: i32,
    pub position_pct: f64,
}

/// Parity dates laid out across the curve's date span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub today_pct: f64,
    pub markers: Vec<TimelineMarker>,
    pub axis: Vec<AxisLabel>,
}

impl Timeline {
    pub fn build<'a>(
        curve: &CurveStore,
        currencies: impl IntoIterator<Item = &'a CurrencyParity>,
        now: DateTime<Utc>,
    ) -> Self {
        let start = curve.first().date;
        let end = curve.last().date;
        let position = |date: DateTime<Utc>| position_pct(date, start, end);

        let markers = currencies
            .into_iter()
            .map(|c| TimelineMarker {
                code: c.code.clone(),
                name: c.name.clone(),
                kind: c.parity.kind,
                band: c.band,
                sat_price: c.sat_price,
                position_pct: position(c.parity.date),
            })
            .collect();

        // Every other control point gets a year label
        let len = curve.len() as f64;
        let axis = curve
            .points()
            .iter()
            .enumerate()
            .filter(|(index, _)| index % 2 == 1)
            .map(|(index, point)| AxisLabel {
                year: point.date.year(),
                position_pct: index as f64 / len * 100.0,
            })
            .collect();

        Self {
            start,
            end,
            today_pct: position(now),
            markers,
            axis,
        }
    }
}

fn position_pct(date: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let span = (end - start).num_milliseconds() as f64;
    (date - start).num_milliseconds() as f64 / span * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::build_board;
    use crate::curve::utc_midnight;
    use crate::estimator::{ParityEstimator, ParityPolicy};
    use satparity_common::types::RateBatch;
    use std::collections::BTreeMap;

    #[test]
    fn test_positions_span_curve() {
        let curve = CurveStore::reference().unwrap();
        let start = curve.first().date;
        let end = curve.last().date;
        assert_eq!(position_pct(start, start, end), 0.0);
        assert_eq!(position_pct(end, start, end), 100.0);
    }

    #[test]
    fn test_axis_labels_every_other_point() {
        let curve = CurveStore::reference().unwrap();
        let timeline = Timeline::build(
            &curve,
            Vec::<&CurrencyParity>::new(),
            utc_midnight(2026, 10, 16).unwrap(),
        );

        let years: Vec<i32> = timeline.axis.iter().map(|a| a.year).collect();
        assert_eq!(years, vec![2013, 2021, 2025, 2034, 2042]);
        assert!((timeline.axis[0].position_pct - 100.0 / 11.0).abs() < 1e-9);
        assert!(timeline.markers.is_empty());
    }

    #[test]
    fn test_markers_follow_board() {
        let now = utc_midnight(2026, 10, 16).unwrap();
        let estimator = ParityEstimator::new(CurveStore::reference().unwrap(), ParityPolicy::canonical());
        let batch = RateBatch {
            fetched_at: now,
            btc_usd_rate: 68_000.0,
            rates: BTreeMap::from([
                ("ABC".to_string(), 110_000_000.0),
                ("EUR".to_string(), 63_000.0),
            ]),
        };
        let board = build_board(&estimator, &batch, now);
        let timeline = Timeline::build(estimator.curve(), &board.currencies, now);

        assert_eq!(timeline.markers.len(), 2);
        let abc = &timeline.markers[0];
        assert_eq!(abc.code, "ABC");
        assert_eq!(abc.kind, ParityKind::Now);
        assert_eq!(abc.position_pct, timeline.today_pct);
        assert!(timeline.today_pct > 0.0 && timeline.today_pct < 100.0);
        assert!(timeline.markers[1].position_pct > timeline.today_pct);
    }
}
