//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use fraudscan_core::{rng::RandomSource, types::RawTransaction};
use std::path::PathBuf;

pub const HEADER: &str = "trans_date_trans_time,cc_num,merchant,category,amt,first,last,gender,street,city,state,zip,lat,long,city_pop,job,dob,trans_num,unix_time,merch_lat,merch_long,is_fraud";

/// Always returns the same draw.
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// One CSV data line in `HEADER` column order.
pub fn csv_line(
    timestamp: &str,
    card: &str,
    category: &str,
    amount: &str,
    flag: &str,
    trans_num: &str,
) -> String {
    format!(
        "{timestamp},{card},fraud_Kirlin and Sons,{category},{amount},Jeff,Elliott,M,351 Darlene Green,Columbia,SC,29209,33.9659,-80.9355,333497,Mechanical engineer,1968-03-19,{trans_num},1371816865,33.986391,-81.200714,{flag}"
    )
}

pub fn csv_text(lines: &[String]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

pub fn raw(timestamp: &str, category: &str, amount: &str, flag: &str) -> RawTransaction {
    RawTransaction {
        trans_date_trans_time: timestamp.to_string(),
        cc_num: "2291163933867244".to_string(),
        merchant: "fraud_Kirlin and Sons".to_string(),
        category: category.to_string(),
        amt: amount.to_string(),
        first: "Jeff".to_string(),
        last: "Elliott".to_string(),
        gender: "M".to_string(),
        street: "351 Darlene Green".to_string(),
        city: "Columbia".to_string(),
        state: "SC".to_string(),
        zip: "29209".to_string(),
        lat: "33.9659".to_string(),
        long: "-80.9355".to_string(),
        city_pop: "333497".to_string(),
        job: "Mechanical engineer".to_string(),
        dob: "1968-03-19".to_string(),
        trans_num: "2da90c7d74bd46a0caf3777415b3ebd3".to_string(),
        unix_time: "1371816865".to_string(),
        merch_lat: "33.986391".to_string(),
        merch_long: "-81.200714".to_string(),
        is_fraud: flag.to_string(),
    }
}

/// Write `content` to a per-process file under the temp dir.
pub fn write_fixture(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fraudscan-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create fixture dir");
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

/// `****` followed by exactly four ASCII digits.
pub fn is_masked_card(value: &str) -> bool {
    value.len() == 8
        && value.starts_with("****")
        && value[4..].chars().all(|c| c.is_ascii_digit())
}
