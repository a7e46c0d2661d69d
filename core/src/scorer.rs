//! Heuristic fraud score for rows already flagged as fraudulent.
//!
//! score = min(amount / 10, 40)
//!       + category weight (25 high-risk, 15 medium-risk, else 0)
//!       + hour weight     (15 late night, else 10 off-peak, else 0)
//!       + uniform perturbation in [0, 10)
//! rounded and clamped to [0, 100].
//!
//! The score is presentational. It is not a trained model output and is
//! not reproducible unless the caller supplies a seeded source.

use crate::{
    error::{ScanError, ScanResult},
    rng::RandomSource,
    types::RawTransaction,
};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};

// ── Constants ────────────────────────────────────────────────────────────────

pub const HIGH_RISK_CATEGORIES: [&str; 3] = ["shopping_net", "misc_net", "grocery_pos"];
pub const MEDIUM_RISK_CATEGORIES: [&str; 2] = ["gas_transport", "shopping_pos"];

const AMOUNT_DIVISOR: f64 = 10.0;
const AMOUNT_CAP: f64 = 40.0;
const HIGH_RISK_WEIGHT: f64 = 25.0;
const MEDIUM_RISK_WEIGHT: f64 = 15.0;
const UNUSUAL_HOUR_WEIGHT: f64 = 15.0;
const OFF_PEAK_HOUR_WEIGHT: f64 = 10.0;
const PERTURBATION_RANGE: f64 = 10.0;
const MAX_SCORE: f64 = 100.0;

const HIGH_AMOUNT_THRESHOLD: f64 = 500.0;
const UNUSUAL_AMOUNT_THRESHOLD: f64 = 1000.0;

const NAIVE_TIMESTAMP_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct FraudAssessment {
    /// Always within 0..=100.
    pub score: u8,
    pub analysis: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::High,
            60..=79 => Self::Medium,
            40..=59 => Self::Low,
            _ => Self::VeryLow,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low Risk",
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }
}

/// Whole-file verdict: `High` once fraud exceeds 1% of rows.
pub fn dataset_risk_label(fraud_rate_percent: f64) -> &'static str {
    if fraud_rate_percent > 1.0 {
        "High"
    } else {
        "Low"
    }
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Parse the `amt` column. Non-numeric and non-finite text is rejected.
pub fn parse_amount(value: &str) -> ScanResult<f64> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ScanError::InvalidAmount {
            value: value.to_string(),
        }),
    }
}

/// Local hour of the transaction timestamp, or `None` when it cannot be
/// read. Offset-carrying timestamps are converted to local time first.
/// A bare date is UTC midnight, read back in local time.
pub fn transaction_hour(timestamp: &str) -> Option<u32> {
    let timestamp = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Local).hour());
    }
    if let Some(dt) = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
    {
        return Some(dt.hour());
    }
    let date = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(midnight.with_timezone(&Local).hour())
}

pub fn is_high_risk_category(category: &str) -> bool {
    HIGH_RISK_CATEGORIES.contains(&category)
}

pub fn is_medium_risk_category(category: &str) -> bool {
    MEDIUM_RISK_CATEGORIES.contains(&category)
}

/// 22:00 through 05:59.
pub fn is_unusual_hour(hour: u32) -> bool {
    hour >= 22 || hour <= 5
}

/// 18:00 onward or up to 08:59. Overlaps `is_unusual_hour`; the weight
/// only applies when the unusual-hour branch did not fire.
pub fn is_off_peak_hour(hour: u32) -> bool {
    hour >= 18 || hour <= 8
}

/// Score a row known to be fraudulent.
pub fn score_transaction(
    txn: &RawTransaction,
    rng: &mut dyn RandomSource,
) -> ScanResult<FraudAssessment> {
    let amount = parse_amount(&txn.amt)?;
    let hour = transaction_hour(&txn.trans_date_trans_time);
    if hour.is_none() {
        log::warn!(
            "scorer: unreadable timestamp '{}' on {}, no time factor applied",
            txn.trans_date_trans_time,
            txn.trans_num
        );
    }
    Ok(score_factors(amount, &txn.category, hour, rng))
}

/// Score from already-extracted inputs. `hour == None` contributes nothing.
pub fn score_factors(
    amount: f64,
    category: &str,
    hour: Option<u32>,
    rng: &mut dyn RandomSource,
) -> FraudAssessment {
    let mut raw = (amount / AMOUNT_DIVISOR).min(AMOUNT_CAP);

    if is_high_risk_category(category) {
        raw += HIGH_RISK_WEIGHT;
    } else if is_medium_risk_category(category) {
        raw += MEDIUM_RISK_WEIGHT;
    }

    if let Some(hour) = hour {
        if is_unusual_hour(hour) {
            raw += UNUSUAL_HOUR_WEIGHT;
        } else if is_off_peak_hour(hour) {
            raw += OFF_PEAK_HOUR_WEIGHT;
        }
    }

    raw += rng.next_f64() * PERTURBATION_RANGE;

    let score = raw.round().clamp(0.0, MAX_SCORE) as u8;
    let analysis = describe(amount, category, hour, score);

    FraudAssessment { score, analysis }
}

/// Factor phrases are tested independently, so a late-night hour lists
/// both the unusual-time and the off-peak factor.
fn describe(amount: f64, category: &str, hour: Option<u32>, score: u8) -> String {
    let mut factors = Vec::new();

    if amount > HIGH_AMOUNT_THRESHOLD {
        factors.push("high transaction amount");
    }
    if amount > UNUSUAL_AMOUNT_THRESHOLD {
        factors.push("unusually high amount");
    }
    if is_high_risk_category(category) {
        factors.push("high-risk category");
    }
    if let Some(hour) = hour {
        if is_unusual_hour(hour) {
            factors.push("unusual transaction time");
        }
        if is_off_peak_hour(hour) {
            factors.push("off-peak hours");
        }
    }

    let mut text = if factors.is_empty() {
        "Detected through pattern analysis. ".to_string()
    } else {
        format!("Detected due to: {}. ", factors.join(", "))
    };
    text.push_str(&format!("Transaction flagged with {score}% fraud probability."));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn hour_from_dataset_timestamp() {
        assert_eq!(transaction_hour("2020-06-21 12:14:25"), Some(12));
        assert_eq!(transaction_hour("2019-01-01T23:05:00"), Some(23));
        assert_eq!(transaction_hour("2019-01-01 03:05"), Some(3));
        assert_eq!(transaction_hour("not a date"), None);
    }

    #[test]
    fn amount_parsing_rejects_garbage() {
        assert_eq!(parse_amount("41.28").unwrap(), 41.28);
        assert!(matches!(parse_amount("abc"), Err(ScanError::InvalidAmount { .. })));
        assert!(matches!(parse_amount("NaN"), Err(ScanError::InvalidAmount { .. })));
        assert!(matches!(parse_amount(""), Err(ScanError::InvalidAmount { .. })));
    }

    #[test]
    fn evening_hour_takes_off_peak_weight_only() {
        let a = score_factors(0.0, "home", Some(19), &mut Fixed(0.0));
        assert_eq!(a.score, 10);
        let a = score_factors(0.0, "home", Some(7), &mut Fixed(0.0));
        assert_eq!(a.score, 10);
        let a = score_factors(0.0, "home", Some(2), &mut Fixed(0.0));
        assert_eq!(a.score, 15);
    }

    #[test]
    fn medium_risk_category_weight() {
        let a = score_factors(0.0, "gas_transport", Some(12), &mut Fixed(0.0));
        assert_eq!(a.score, 15);
        assert_eq!(
            a.analysis,
            "Detected through pattern analysis. Transaction flagged with 15% fraud probability."
        );
    }

    #[test]
    fn negative_amount_clamps_to_zero() {
        let a = score_factors(-5000.0, "home", Some(12), &mut Fixed(0.0));
        assert_eq!(a.score, 0);
    }

    #[test]
    fn risk_level_bands() {
        assert_eq!(RiskLevel::from_score(95), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(39).label(), "Very Low Risk");
        assert_eq!(dataset_risk_label(0.39), "Low");
        assert_eq!(dataset_risk_label(1.5), "High");
    }
}
