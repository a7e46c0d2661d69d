//! Record types shared across the ingest pipeline.

use serde::{Deserialize, Serialize};

/// Fraud flag value marking a fraudulent row.
pub const FRAUD_FLAG: &str = "1";
/// Fraud flag value marking a legitimate row.
pub const LEGITIMATE_FLAG: &str = "0";

/// One CSV row as read from disk. Every field stays text; columns are
/// matched by header name and unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTransaction {
    pub trans_date_trans_time: String,
    pub cc_num: String,
    pub merchant: String,
    pub category: String,
    pub amt: String,
    pub first: String,
    pub last: String,
    pub gender: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub lat: String,
    pub long: String,
    pub city_pop: String,
    pub job: String,
    pub dob: String,
    pub trans_num: String,
    pub unix_time: String,
    pub merch_lat: String,
    pub merch_long: String,
    pub is_fraud: String,
}

impl RawTransaction {
    pub fn is_fraud(&self) -> bool {
        self.is_fraud == FRAUD_FLAG
    }

    pub fn is_legitimate(&self) -> bool {
        self.is_fraud == LEGITIMATE_FLAG
    }

    pub fn masked_card(&self) -> String {
        mask_card_number(&self.cc_num)
    }
}

/// A row as handed to the presentation layer. Scored rows carry
/// `fraud_score` and `fraud_analysis`; table rows omit both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedTransaction {
    pub trans_date_trans_time: String,
    pub cc_num: String,
    pub merchant: String,
    pub category: String,
    pub amt: f64,
    pub first: String,
    pub last: String,
    pub gender: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub job: String,
    pub is_fraud: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_analysis: Option<String>,
}

/// Fraud vs. legitimate counts over the whole file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_transactions: usize,
    pub fraud_transactions: usize,
    pub legitimate_transactions: usize,
    /// Two decimals with a trailing `%`, e.g. `"0.39%"`.
    pub fraud_percentage: String,
}

impl Statistics {
    /// Fraud share as a plain percentage; 0.0 for an empty dataset.
    pub fn fraud_rate_percent(&self) -> f64 {
        if self.total_transactions == 0 {
            return 0.0;
        }
        self.fraud_transactions as f64 / self.total_transactions as f64 * 100.0
    }
}

/// `****` followed by the last four digits of the card field. Shorter
/// inputs are left-padded with `0` so the shape never varies.
pub fn mask_card_number(card: &str) -> String {
    let digits: Vec<char> = card.chars().filter(|c| c.is_ascii_digit()).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("****{tail:0>4}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_to_last_four_digits() {
        assert_eq!(mask_card_number("2291163933867244"), "****7244");
        assert_eq!(mask_card_number("4613314721966"), "****1966");
    }

    #[test]
    fn short_card_is_padded_not_exposed() {
        assert_eq!(mask_card_number("42"), "****0042");
        assert_eq!(mask_card_number(""), "****0000");
    }

    #[test]
    fn fraud_rate_is_zero_for_empty_dataset() {
        let stats = Statistics {
            total_transactions: 0,
            fraud_transactions: 0,
            legitimate_transactions: 0,
            fraud_percentage: "0.00%".into(),
        };
        assert_eq!(stats.fraud_rate_percent(), 0.0);
    }
}
