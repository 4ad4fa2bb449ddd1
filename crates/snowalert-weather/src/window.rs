//! The overnight accumulation window and its snowfall sum.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::HourlySample;

/// Half-open local-time interval `[start, end)` that overnight samples
/// must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvernightWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl OvernightWindow {
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.start <= time && time < self.end
    }
}

const WINDOW_START: NaiveTime = match NaiveTime::from_hms_opt(21, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};
const WINDOW_END: NaiveTime = match NaiveTime::from_hms_opt(22, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/// Window for a run on `today`: yesterday 21:00 up to (but excluding)
/// today 22:00, local time.
pub fn overnight_window(today: NaiveDate) -> OvernightWindow {
    OvernightWindow {
        start: today.pred_opt().unwrap_or(today).and_time(WINDOW_START),
        end: today.and_time(WINDOW_END),
    }
}

/// Total snowfall of the samples inside the window, in centimeters.
/// Samples without a reading count as zero.
pub fn sum_snowfall(samples: &[HourlySample], window: OvernightWindow) -> f64 {
    samples
        .iter()
        .filter(|s| window.contains(s.time))
        .map(|s| s.snowfall_cm.unwrap_or(0.0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(date: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
        date.and_hms_opt(h, min, 0).unwrap()
    }

    fn sample(time: NaiveDateTime, cm: Option<f64>) -> HourlySample {
        HourlySample {
            time,
            snowfall_cm: cm,
        }
    }

    #[test]
    fn test_window_spans_yesterday_evening_to_today_evening() {
        let w = overnight_window(date(2026, 1, 15));
        assert_eq!(w.start, at(date(2026, 1, 14), 21, 0));
        assert_eq!(w.end, at(date(2026, 1, 15), 22, 0));
    }

    #[test]
    fn test_window_start_is_inclusive_end_is_exclusive() {
        let w = overnight_window(date(2026, 1, 15));
        assert!(w.contains(at(date(2026, 1, 14), 21, 0)));
        assert!(!w.contains(at(date(2026, 1, 15), 22, 0)));
        assert!(w.contains(at(date(2026, 1, 15), 21, 59)));
        assert!(!w.contains(at(date(2026, 1, 14), 20, 59)));
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let w = overnight_window(date(2026, 3, 1));
        assert_eq!(w.start, at(date(2026, 2, 28), 21, 0));
    }

    #[test]
    fn test_sum_filters_to_window() {
        let yesterday = date(2026, 1, 14);
        let today = date(2026, 1, 15);
        let samples = vec![
            sample(at(yesterday, 20, 0), Some(100.0)), // before window
            sample(at(yesterday, 21, 0), Some(2.0)),
            sample(at(today, 3, 0), Some(1.5)),
            sample(at(today, 21, 0), Some(0.5)),
            sample(at(today, 22, 0), Some(100.0)), // at exclusive end
        ];

        let total = sum_snowfall(&samples, overnight_window(today));
        assert!((total - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_values_count_as_zero() {
        let today = date(2026, 1, 15);
        let samples = vec![
            sample(at(today, 1, 0), None),
            sample(at(today, 2, 0), Some(3.0)),
            sample(at(today, 3, 0), None),
        ];

        let total = sum_snowfall(&samples, overnight_window(today));
        assert!((total - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_samples_sum_to_zero() {
        let total = sum_snowfall(&[], overnight_window(date(2026, 1, 15)));
        assert_eq!(total, 0.0);
    }
}
