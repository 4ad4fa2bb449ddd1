//! Time-of-day threshold rules.
//!
//! The earlier it is, the more snow it takes to justify waking the
//! user: 40 cm is worth an 05:00 alarm, 5 cm can wait until 06:30.

use chrono::NaiveTime;

/// One alerting rule: from `from` onward, alert when the overnight
/// total strictly exceeds `min_snow_cm`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRule {
    pub from: NaiveTime,
    pub min_snow_cm: f64,
}

const fn rule(hour: u32, minute: u32, min_snow_cm: f64) -> ThresholdRule {
    let from = match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(t) => t,
        None => unreachable!(),
    };
    ThresholdRule { from, min_snow_cm }
}

/// Rules in evaluation order. Thresholds decrease as the morning
/// progresses, so the first match is also the strictest applicable one.
pub const RULES: [ThresholdRule; 3] = [
    rule(5, 0, 40.0),
    rule(6, 0, 20.0),
    rule(6, 30, 5.0),
];

/// First rule whose time has been reached and whose threshold the
/// total strictly exceeds, if any.
pub fn evaluate(total_cm: f64, now: NaiveTime) -> Option<&'static ThresholdRule> {
    RULES
        .iter()
        .find(|r| now >= r.from && total_cm > r.min_snow_cm)
}
