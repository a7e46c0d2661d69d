//! One pass over the parsed file: fraud vs. legitimate counts.
//!
//! Rows whose flag is neither `"0"` nor `"1"` count toward the total
//! only. An empty file reports `0.00%` instead of dividing by zero.

use crate::types::{RawTransaction, Statistics};

pub fn aggregate(transactions: &[RawTransaction]) -> Statistics {
    let mut fraud = 0usize;
    let mut legitimate = 0usize;

    for txn in transactions {
        if txn.is_fraud() {
            fraud += 1;
        } else if txn.is_legitimate() {
            legitimate += 1;
        }
    }

    let total = transactions.len();
    let fraud_percentage = if total == 0 {
        0.0
    } else {
        fraud as f64 / total as f64 * 100.0
    };

    Statistics {
        total_transactions: total,
        fraud_transactions: fraud,
        legitimate_transactions: legitimate,
        fraud_percentage: format!("{:.2}%", round_half_up_2(fraud_percentage)),
    }
}

/// Two-decimal rounding with ties going up (3.125 -> 3.13). Plain `{:.2}`
/// sends exact ties to the even digit instead.
fn round_half_up_2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
