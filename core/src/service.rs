//! Request service: one call reads the configured file and answers with
//! the full JSON payload or a single error body.
//!
//! PIPELINE (fixed order, request-scoped, no state kept between calls):
//!   1. Parser:     whole file into memory
//!   2. Aggregator: fraud / legitimate counts
//!   3. Scorer:     first fraudulent rows, fresh random source
//!   4. Report:     statistics + two bounded views

use crate::{
    config::ScanConfig,
    error::{ScanError, ScanResult},
    parser::TransactionParser,
    report::{build_report, FraudReport},
    rng::{RandomSource, ScoreRng},
    types::RawTransaction,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process CSV data";
pub const STATUS_MESSAGE: &str = "Fraud Detection System API is running";

/// Transport-neutral reply: an HTTP-style status and a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: Value,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub struct FraudScanService {
    config: ScanConfig,
    parser: TransactionParser,
}

impl FraudScanService {
    pub fn new(config: ScanConfig) -> ScanResult<Self> {
        if config.csv_path.as_os_str().is_empty() {
            return Err(ScanError::Config {
                reason: "csv_path must not be empty".to_string(),
            });
        }
        let parser = TransactionParser::new(config.csv_path.clone());
        Ok(Self { config, parser })
    }

    /// Build from a JSON config file. Load failures surface as
    /// `ScanError::Other` carrying the offending path.
    pub fn from_config_file(path: impl AsRef<Path>) -> ScanResult<Self> {
        let config = ScanConfig::load(path)?;
        Self::new(config)
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Handle one processing request with a per-request random source.
    pub fn process(&self) -> ServiceResponse {
        let mut rng = ScoreRng::from_seed_option(self.config.rng_seed);
        self.process_with(&mut rng)
    }

    /// Handle one processing request with the caller's random source.
    pub fn process_with(&self, rng: &mut dyn RandomSource) -> ServiceResponse {
        let outcome = self
            .run(rng)
            .and_then(|report| serde_json::to_value(&report).map_err(ScanError::from));

        match outcome {
            Ok(body) => ServiceResponse { status: 200, body },
            Err(err) => self.failure(err),
        }
    }

    /// The pipeline without transport shaping.
    pub fn run(&self, rng: &mut dyn RandomSource) -> ScanResult<FraudReport> {
        let transactions = self.parser.parse_file()?;
        log::info!(
            "ingest: loaded {} transactions from {}",
            transactions.len(),
            self.parser.csv_path().display()
        );
        self.log_samples(&transactions);

        let report = build_report(&transactions, rng)?;
        let stats = &report.statistics;
        log::info!(
            "ingest: fraud={} legitimate={} fraud_percentage={}",
            stats.fraud_transactions,
            stats.legitimate_transactions,
            stats.fraud_percentage
        );
        log::debug!("ingest: scored {} fraud rows", report.fraud_transactions.len());

        Ok(report)
    }

    /// Static descriptor of the available operation.
    pub fn status(&self) -> ServiceResponse {
        ServiceResponse {
            status: 200,
            body: json!({
                "message": STATUS_MESSAGE,
                "endpoints": {
                    "process": "Process fraud test data",
                },
            }),
        }
    }

    fn failure(&self, err: ScanError) -> ServiceResponse {
        let status = err.status_code();
        let message = match &err {
            ScanError::FileNotFound { path } => {
                log::warn!("ingest: {err}");
                not_found_message(path)
            }
            _ => {
                log::error!("ingest: error processing CSV data: {err}");
                PROCESSING_FAILED_MESSAGE.to_string()
            }
        };
        ServiceResponse {
            status,
            body: json!({ "error": message }),
        }
    }

    fn log_samples(&self, transactions: &[RawTransaction]) {
        for (i, txn) in transactions
            .iter()
            .take(self.config.sample_log_count)
            .enumerate()
        {
            log::debug!(
                "sample #{}: time={} card={} merchant={} category={} amount=${} location={}, {} customer={} {} fraud={}",
                i + 1,
                txn.trans_date_trans_time,
                txn.masked_card(),
                txn.merchant,
                txn.category,
                txn.amt,
                txn.city,
                txn.state,
                txn.first,
                txn.last,
                if txn.is_fraud() { "YES" } else { "NO" },
            );
        }
    }
}

fn not_found_message(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => format!("{name} file not found in {}", dir.display()),
        None => format!("{name} file not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_file_and_directory() {
        assert_eq!(
            not_found_message(Path::new("public/fraudTest.csv")),
            "fraudTest.csv file not found in public"
        );
        assert_eq!(
            not_found_message(Path::new("fraudTest.csv")),
            "fraudTest.csv file not found"
        );
    }

    #[test]
    fn empty_path_is_a_config_error() {
        let err = FraudScanService::new(ScanConfig::for_path("")).err().unwrap();
        assert!(matches!(err, ScanError::Config { .. }));
    }

    #[test]
    fn status_descriptor_is_static() {
        let service = FraudScanService::new(ScanConfig::for_path("missing.csv")).unwrap();
        let status = service.status();
        assert_eq!(status.status, 200);
        assert_eq!(status.body["message"], STATUS_MESSAGE);
        assert!(status.body["endpoints"]["process"].is_string());
    }
}
