//! Time-to-geometry mapping for day and week columns.
//!
//! Converts a session's start/end into vertical fractions of a day column:
//! `top` is how far down the column the session starts, `height` how much of
//! the column it covers. Renderers multiply by whatever pixel or row count
//! they have. A session that runs past midnight is truncated at the column
//! boundary; the next day's column does not show it (day-bucket membership
//! is by start day).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Minutes in a rendering column.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Vertical placement of a session inside a day column, as fractions in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    /// Fraction of the column above the session's start
    pub top: f64,
    /// Fraction of the column the session covers
    pub height: f64,
}

impl SlotGeometry {
    /// Bottom edge of the slot.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Compute where to draw a session in the column for `day`.
///
/// - the start is clamped to the top of the column if it falls before `day`
/// - the end is clamped to midnight following `day`
/// - a degenerate (zero or inverted) clamped interval yields `height = 0`;
///   enforcing a minimum visual height is the renderer's job
///
/// Guarantees `0 <= top <= 1` and `top + height <= 1`.
pub fn slot_geometry(start: NaiveDateTime, end: NaiveDateTime, day: NaiveDate) -> SlotGeometry {
    let day_start = day.and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    let day_end = day_start + chrono::Duration::minutes(MINUTES_PER_DAY);

    let clamped_start = start.max(day_start);
    let clamped_end = end.min(day_end);

    let top_minutes = if start < day_start {
        0
    } else {
        (start.time().hour() * 60 + start.time().minute()) as i64
    };

    let height_minutes = (clamped_end - clamped_start).num_minutes().max(0);
    // Seconds are dropped from the top offset, so cap the height at the
    // remaining minutes of the column.
    let height_minutes = height_minutes.min(MINUTES_PER_DAY - top_minutes);

    SlotGeometry {
        top: top_minutes as f64 / MINUTES_PER_DAY as f64,
        height: height_minutes as f64 / MINUTES_PER_DAY as f64,
    }
}

/// Fraction of the day elapsed at `time`; drives the now-indicator line.
pub fn day_fraction(time: NaiveTime) -> f64 {
    (time.hour() * 60 + time.minute()) as f64 / MINUTES_PER_DAY as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(date: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
        date.and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn one_hour_afternoon_session() {
        // 16:00-17:00 -> top = 960/1440, height = 60/1440
        let d = day(2024, 11, 1);
        let geometry = slot_geometry(at(d, 16, 0), at(d, 17, 0), d);

        assert!((geometry.top - 960.0 / 1440.0).abs() < 1e-9);
        assert!((geometry.height - 60.0 / 1440.0).abs() < 1e-9);
    }

    #[test]
    fn same_day_identity() {
        // Unclamped: top + height == hour fraction of start + minutes/1440
        let d = day(2024, 10, 25);
        let geometry = slot_geometry(at(d, 9, 30), at(d, 11, 15), d);

        let expected = (9.0 * 60.0 + 30.0) / 1440.0 + 105.0 / 1440.0;
        assert!((geometry.bottom() - expected).abs() < 1e-9);
    }

    #[test]
    fn end_past_midnight_is_clamped() {
        // 22:00 on Nov 1 until 03:00 on Nov 2: the Nov 1 column shows only
        // the 120 minutes left in the day.
        let d = day(2024, 11, 1);
        let geometry = slot_geometry(at(d, 22, 0), at(day(2024, 11, 2), 3, 0), d);

        assert!((geometry.height - 120.0 / 1440.0).abs() < 1e-9);
        assert!(geometry.bottom() <= 1.0 + 1e-9);
    }

    #[test]
    fn start_before_column_is_clamped_to_top() {
        let d = day(2024, 11, 2);
        let geometry = slot_geometry(at(day(2024, 11, 1), 22, 0), at(d, 3, 0), d);

        assert_eq!(geometry.top, 0.0);
        assert!((geometry.height - 180.0 / 1440.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_yields_zero_height() {
        let d = day(2024, 11, 1);
        let geometry = slot_geometry(at(d, 9, 0), at(d, 9, 0), d);

        assert_eq!(geometry.height, 0.0);
        assert!((geometry.top - 540.0 / 1440.0).abs() < 1e-9);
    }

    #[test]
    fn full_day_session_fills_the_column() {
        let d = day(2024, 11, 5);
        let geometry = slot_geometry(at(d, 0, 0), day(2024, 11, 6).and_hms_opt(0, 0, 0).unwrap(), d);

        assert_eq!(geometry.top, 0.0);
        assert!((geometry.height - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_hold_for_late_starts() {
        let d = day(2024, 11, 1);
        let geometry = slot_geometry(
            d.and_hms_opt(23, 0, 30).unwrap(),
            day(2024, 11, 2).and_hms_opt(4, 0, 0).unwrap(),
            d,
        );

        assert!(geometry.top >= 0.0 && geometry.top <= 1.0);
        assert!(geometry.bottom() <= 1.0 + 1e-9);
    }

    #[test]
    fn day_fraction_matches_indicator_math() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!((day_fraction(noon) - 0.5).abs() < 1e-9);

        let evening = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
        assert!((day_fraction(evening) - 960.0 / 1440.0).abs() < 1e-9);
    }
}
