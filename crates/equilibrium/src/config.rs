//! Run configuration.
//!
//! Everything the batch runner needs is explicit per-run state: the data
//! directory, each company's workbook exports, the treasury file names, and
//! the output formatting options. Nothing is read from process-wide state.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use equilibrium_core::{Company, ModelError, Result};

/// Configuration for one batch run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    /// Root directory holding one subdirectory per company plus the
    /// treasury exports.
    pub data_dir: PathBuf,
    /// The companies to process.
    pub companies: Vec<CompanyConfig>,
    /// Treasury export file names under `data_dir`.
    pub treasury: TreasuryConfig,
    /// Output formatting, passed to the CSV writer.
    #[serde(default)]
    pub output: OutputOptions,
}

impl RunConfig {
    /// Loads a run configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] for unreadable or invalid JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| ModelError::Config(format!("{}: {e}", path.display())))
    }

    /// Directory holding one company's inputs and outputs.
    #[must_use]
    pub fn company_dir(&self, company: &Company) -> PathBuf {
        self.data_dir.join(company.as_str())
    }
}

/// One company's input workbooks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompanyConfig {
    /// Company identifier; names the data subdirectory.
    pub name: Company,
    /// Workbook exports covering the company's history, highest-priority
    /// first. When historical ranges overlap, the earlier-listed workbook's
    /// rows win.
    pub workbooks: Vec<String>,
}

/// Treasury export file names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreasuryConfig {
    /// The 3-month treasury bill export.
    pub three_month: String,
    /// The 10-year treasury export.
    pub ten_year: String,
}

/// Output formatting options.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Decimal places for float columns; `None` writes full precision.
    #[serde(default)]
    pub float_precision: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_from_json() {
        let json = r#"{
            "data_dir": "/data",
            "companies": [
                {"name": "apple", "workbooks": ["appl_09q2_18q3", "appl_90q1_99q1"]}
            ],
            "treasury": {"three_month": "3month_tbills", "ten_year": "10yr_tbills"}
        }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.companies.len(), 1);
        assert_eq!(config.companies[0].name.as_str(), "apple");
        assert_eq!(config.output.float_precision, None);
        assert_eq!(
            config.company_dir(&config.companies[0].name),
            PathBuf::from("/data/apple")
        );
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            RunConfig::from_json_file(&path),
            Err(ModelError::Config(_))
        ));
    }
}
