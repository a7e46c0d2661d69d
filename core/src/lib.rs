//! fraudscan-core: CSV ingest, fraud statistics and heuristic scoring
//! for labelled credit-card transaction files.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod rng;
pub mod scorer;
pub mod service;
pub mod types;
