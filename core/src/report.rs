//! Response shaping: statistics plus the two bounded row views.

use crate::{
    aggregator::aggregate,
    error::ScanResult,
    rng::RandomSource,
    scorer::{parse_amount, score_transaction},
    types::{AnnotatedTransaction, RawTransaction, Statistics},
};
use serde::Serialize;

/// Rows carried in each view. Fixed policy, not configuration.
pub const VIEW_ROW_LIMIT: usize = 100;

pub const SUCCESS_MESSAGE: &str = "CSV data processed and logged successfully";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudReport {
    pub success: bool,
    pub message: String,
    pub statistics: Statistics,
    /// First rows of the file, any fraud status, unscored.
    pub transactions: Vec<AnnotatedTransaction>,
    /// First fraudulent rows, scored.
    pub fraud_transactions: Vec<AnnotatedTransaction>,
}

/// Build the full report. Any row in either view with an unreadable
/// amount fails the whole report; nothing partial is returned.
pub fn build_report(
    transactions: &[RawTransaction],
    rng: &mut dyn RandomSource,
) -> ScanResult<FraudReport> {
    let statistics = aggregate(transactions);

    let table_rows = transactions
        .iter()
        .take(VIEW_ROW_LIMIT)
        .map(annotate)
        .collect::<ScanResult<Vec<_>>>()?;

    let fraud_rows = transactions
        .iter()
        .filter(|txn| txn.is_fraud())
        .take(VIEW_ROW_LIMIT)
        .map(|txn| annotate_scored(txn, rng))
        .collect::<ScanResult<Vec<_>>>()?;

    Ok(FraudReport {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
        statistics,
        transactions: table_rows,
        fraud_transactions: fraud_rows,
    })
}

pub fn annotate(txn: &RawTransaction) -> ScanResult<AnnotatedTransaction> {
    Ok(AnnotatedTransaction {
        trans_date_trans_time: txn.trans_date_trans_time.clone(),
        cc_num: txn.masked_card(),
        merchant: txn.merchant.clone(),
        category: txn.category.clone(),
        amt: parse_amount(&txn.amt)?,
        first: txn.first.clone(),
        last: txn.last.clone(),
        gender: txn.gender.clone(),
        city: txn.city.clone(),
        state: txn.state.clone(),
        zip: txn.zip.clone(),
        job: txn.job.clone(),
        is_fraud: txn.is_fraud(),
        fraud_score: None,
        fraud_analysis: None,
    })
}

pub fn annotate_scored(
    txn: &RawTransaction,
    rng: &mut dyn RandomSource,
) -> ScanResult<AnnotatedTransaction> {
    let assessment = score_transaction(txn, rng)?;
    let mut row = annotate(txn)?;
    row.fraud_score = Some(assessment.score);
    row.fraud_analysis = Some(assessment.analysis);
    Ok(row)
}
