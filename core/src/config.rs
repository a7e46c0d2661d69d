use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_SAMPLE_LOG_COUNT: usize = 5;

fn default_sample_log_count() -> usize {
    DEFAULT_SAMPLE_LOG_COUNT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Transaction file handed to the parser.
    pub csv_path: PathBuf,
    /// Rows echoed to the debug log after each ingest.
    #[serde(default = "default_sample_log_count")]
    pub sample_log_count: usize,
    /// Fixed perturbation seed. `None` seeds from entropy per request.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl ScanConfig {
    /// Load from a JSON file, e.g. `{"csv_path": "public/fraudTest.csv"}`.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: ScanConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        if config.csv_path.as_os_str().is_empty() {
            anyhow::bail!("{}: csv_path must not be empty", path.display());
        }
        Ok(config)
    }

    /// Defaults for the given file: five sample rows, unseeded.
    pub fn for_path(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            sample_log_count: DEFAULT_SAMPLE_LOG_COUNT,
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}
