//! fraudscan: runs the fraud scan over a transaction CSV.
//!
//! Usage:
//!   fraudscan --csv public/fraudTest.csv
//!   fraudscan --config fraudscan.json --seed 42 --summary
//!   fraudscan --csv public/fraudTest.csv --ipc-mode
//!   fraudscan --status

use anyhow::Result;
use fraudscan_core::{
    config::ScanConfig,
    report::FraudReport,
    rng::ScoreRng,
    scorer::{dataset_risk_label, RiskLevel},
    service::{FraudScanService, ServiceResponse},
};
use std::env;
use std::io::{self, BufRead, Write};

const DEFAULT_CSV_PATH: &str = "public/fraudTest.csv";
const SUMMARY_TOP_ROWS: usize = 10;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Process,
    Status,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let service = build_service(&args)?;

    if has_flag(&args, "--ipc-mode") {
        return run_ipc_loop(&service);
    }

    if has_flag(&args, "--status") {
        print_response(&service.status())?;
        return Ok(());
    }

    if has_flag(&args, "--summary") {
        let mut rng = ScoreRng::from_seed_option(service.config().rng_seed);
        match service.run(&mut rng) {
            Ok(report) => print_summary(&service, &report),
            Err(e) => {
                log::error!("scan failed: {e}");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let response = service.process();
    print_response(&response)?;
    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn build_service(args: &[String]) -> Result<FraudScanService> {
    let mut config = match arg_value(args, "--config") {
        Some(path) => FraudScanService::from_config_file(path)?.config().clone(),
        None => ScanConfig::for_path(DEFAULT_CSV_PATH),
    };
    if let Some(csv) = arg_value(args, "--csv") {
        config.csv_path = csv.into();
    }
    if let Some(seed) = arg_value(args, "--seed") {
        let seed: u64 = seed
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid --seed '{seed}': {e}"))?;
        config = config.with_seed(seed);
    }
    Ok(FraudScanService::new(config)?)
}

fn run_ipc_loop(service: &FraudScanService) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let response = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Process => service.process(),
            IpcCommand::Status => service.status(),
        };
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_response(response: &ServiceResponse) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    Ok(())
}

fn print_summary(service: &FraudScanService, report: &FraudReport) {
    let stats = &report.statistics;

    println!("=== FRAUD SCAN SUMMARY ===");
    println!("  file:          {}", service.config().csv_path.display());
    println!("  transactions:  {}", stats.total_transactions);
    println!("  fraudulent:    {}", stats.fraud_transactions);
    println!("  legitimate:    {}", stats.legitimate_transactions);
    println!("  fraud rate:    {}", stats.fraud_percentage);
    println!("  risk level:    {}", dataset_risk_label(stats.fraud_rate_percent()));

    println!();
    println!("=== TOP SCORED FRAUD (of first {}) ===", report.fraud_transactions.len());
    if report.fraud_transactions.is_empty() {
        println!("  (No fraudulent transactions)");
        return;
    }

    let mut scored: Vec<_> = report.fraud_transactions.iter().collect();
    scored.sort_by(|a, b| b.fraud_score.cmp(&a.fraud_score));
    for row in scored.into_iter().take(SUMMARY_TOP_ROWS) {
        let score = row.fraud_score.unwrap_or_default();
        println!(
            "  {} | {} | {} | ${:.2} | {:>3}% {}",
            row.trans_date_trans_time,
            row.cc_num,
            row.category,
            row.amt,
            score,
            RiskLevel::from_score(score).label()
        );
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
