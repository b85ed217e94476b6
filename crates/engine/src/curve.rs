//! Reference curve of historical and projected BTC/USD prices.
//!
//! The curve is a short, hand-authored list of control points. Dates and
//! prices are both strictly increasing, so any target price is bracketed by
//! at most one adjacent pair and interpolation never divides by zero.

use chrono::{DateTime, NaiveDate, Utc};

use satparity_common::types::ControlPoint;

use crate::error::CurveError;

/// `(year, month, day, USD per BTC)`. Entries from 2025 onward are projections.
const REFERENCE_POINTS: [(i32, u32, u32, f64); 11] = [
    (2010, 1, 1, 0.09),
    (2013, 1, 1, 1_238.0),
    (2018, 1, 1, 20_000.0),
    (2021, 1, 1, 68_000.0),
    (2024, 11, 8, 75_000.0),
    (2025, 1, 1, 300_000.0),
    (2029, 1, 1, 3_000_000.0),
    (2034, 1, 1, 10_000_000.0),
    (2038, 1, 1, 100_000_000.0),
    (2042, 1, 1, 1_000_000_000.0),
    (2046, 1, 1, 10_000_000_000.0),
];

/// Immutable, validated sequence of control points.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveStore {
    points: Vec<ControlPoint>,
}

impl CurveStore {
    /// Validate and wrap a list of control points.
    ///
    /// Requires at least two points, strictly increasing dates, and strictly
    /// increasing finite positive prices.
    pub fn new(points: Vec<ControlPoint>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints(points.len()));
        }

        for (index, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(CurveError::InvalidPrice {
                    index,
                    price: point.price,
                });
            }
        }

        for (offset, pair) in points.windows(2).enumerate() {
            let index = offset + 1;
            if pair[1].date <= pair[0].date {
                return Err(CurveError::NonMonotoneDates { index });
            }
            if pair[1].price <= pair[0].price {
                return Err(CurveError::NonMonotonePrices {
                    index,
                    price: pair[1].price,
                });
            }
        }

        Ok(Self { points })
    }

    /// The built-in BTC/USD reference curve.
    pub fn reference() -> Result<Self, CurveError> {
        let points = REFERENCE_POINTS
            .iter()
            .map(|&(year, month, day, price)| {
                Ok(ControlPoint {
                    date: utc_midnight(year, month, day)?,
                    price,
                })
            })
            .collect::<Result<Vec<_>, CurveError>>()?;

        Self::new(points)
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed store.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest control point.
    pub fn first(&self) -> &ControlPoint {
        &self.points[0]
    }

    /// Latest control point.
    pub fn last(&self) -> &ControlPoint {
        &self.points[self.points.len() - 1]
    }

    /// Adjacent `(current, next)` pairs in time order.
    pub fn brackets(&self) -> impl Iterator<Item = (&ControlPoint, &ControlPoint)> {
        self.points.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

/// Midnight UTC on the given calendar day.
pub fn utc_midnight(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>, CurveError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CurveError::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, price: f64) -> ControlPoint {
        ControlPoint {
            date: utc_midnight(year, 1, 1).unwrap(),
            price,
        }
    }

    #[test]
    fn test_reference_curve_is_valid() {
        let curve = CurveStore::reference().unwrap();
        assert_eq!(curve.len(), 11);
        assert_eq!(curve.first().price, 0.09);
        assert_eq!(curve.first().date, utc_midnight(2010, 1, 1).unwrap());
        assert_eq!(curve.last().price, 10_000_000_000.0);
        assert_eq!(curve.last().date, utc_midnight(2046, 1, 1).unwrap());
        assert_eq!(curve.brackets().count(), 10);
    }

    #[test]
    fn test_single_point_rejected() {
        let result = CurveStore::new(vec![point(2010, 1.0)]);
        assert_eq!(result, Err(CurveError::TooFewPoints(1)));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(CurveStore::new(vec![]), Err(CurveError::TooFewPoints(0)));
    }

    #[test]
    fn test_non_monotone_dates_rejected() {
        let result = CurveStore::new(vec![point(2012, 1.0), point(2011, 2.0)]);
        assert_eq!(result, Err(CurveError::NonMonotoneDates { index: 1 }));

        let result = CurveStore::new(vec![point(2012, 1.0), point(2012, 2.0)]);
        assert_eq!(result, Err(CurveError::NonMonotoneDates { index: 1 }));
    }

    #[test]
    fn test_equal_adjacent_prices_rejected() {
        let result = CurveStore::new(vec![point(2010, 1.0), point(2011, 5.0), point(2012, 5.0)]);
        assert_eq!(
            result,
            Err(CurveError::NonMonotonePrices {
                index: 2,
                price: 5.0
            })
        );
    }

    #[test]
    fn test_invalid_price_rejected() {
        let result = CurveStore::new(vec![point(2010, 0.0), point(2011, 5.0)]);
        assert!(matches!(result, Err(CurveError::InvalidPrice { index: 0, .. })));

        let result = CurveStore::new(vec![point(2010, 1.0), point(2011, f64::NAN)]);
        assert!(matches!(result, Err(CurveError::InvalidPrice { index: 1, .. })));
    }

    #[test]
    fn test_invalid_date() {
        assert!(utc_midnight(2025, 2, 30).is_err());
    }
}
