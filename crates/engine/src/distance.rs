use chrono::{DateTime, Utc};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Human-scale distance between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDistance {
    Days(i64),
    /// 30-day months
    Months(i64),
    /// 365-day years
    Years(i64),
}

impl TimeDistance {
    /// Bucket `|target - now|` into rounded days (< 30), months (< 365) or years.
    pub fn between(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let days = (target - now).num_milliseconds().abs() as f64 / MS_PER_DAY;

        if days < 30.0 {
            TimeDistance::Days(days.round() as i64)
        } else if days < 365.0 {
            TimeDistance::Months((days / 30.0).round() as i64)
        } else {
            TimeDistance::Years((days / 365.0).round() as i64)
        }
    }
}

impl std::fmt::Display for TimeDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (value, unit) = match *self {
            TimeDistance::Days(n) => (n, "day"),
            TimeDistance::Months(n) => (n, "month"),
            TimeDistance::Years(n) => (n, "year"),
        };
        let plural = if value == 1 { "" } else { "s" };
        write!(f, "{} {}{}", value, unit, plural)
    }
}

/// Render the distance between `target` and `now`, e.g. `"10 days"` or `"1 year"`.
pub fn format_time_distance(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    TimeDistance::between(target, now).to_string()
}
