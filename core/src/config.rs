use serde::{Deserialize, Serialize};

/// Which validators, if any, gate the chains a service exposes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChainFilter {
    /// Accept source data as-is. Every record lands in exactly one chain.
    #[default]
    None,
    StatusTransitions,
    AmountConsistency,
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    #[serde(default)]
    pub chain_filter: ChainFilter,
    /// Record file, relative to the data directory.
    #[serde(default = "default_records_file")]
    pub records_file: String,
    /// Last-known-good copy used when `records_file` cannot be loaded.
    #[serde(default)]
    pub fallback_records_file: Option<String>,
}

fn default_records_file() -> String {
    "transactions.json".into()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            chain_filter: ChainFilter::None,
            records_file: default_records_file(),
            fallback_records_file: None,
        }
    }
}

impl ServiceConfig {
    /// Load from `<data_dir>/service.json`.
    /// In tests, use ServiceConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/service.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ServiceConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    pub fn records_path(&self, data_dir: &str) -> String {
        format!("{data_dir}/{}", self.records_file)
    }

    pub fn fallback_path(&self, data_dir: &str) -> Option<String> {
        self.fallback_records_file
            .as_ref()
            .map(|f| format!("{data_dir}/{f}"))
    }
}
