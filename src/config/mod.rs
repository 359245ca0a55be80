//! Configuration for the facility registry pipeline.
//!
//! A [`PipelineConfig`] is built once at process start and handed to every
//! stage by reference. It owns the working-directory layout, the per-stage
//! keyword tables and the fill-rule table used by row repair.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::algorithm::repair::fill_rules::{FillRule, default_fill_rules};
use crate::error::{PipelineError, Result};

/// Environment variable holding the base directory
pub const ENV_BASE_DIR: &str = "FACILITY_BASE_DIR";
/// Environment variable holding the working-directory name
pub const ENV_WORKDIR: &str = "FACILITY_WORKDIR";
/// Environment variable holding the data-month cohort key
pub const ENV_DATA_MONTH: &str = "FACILITY_DATA_MONTH";

/// Region layout of the raw registry submission
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// First region index to look for
    pub first_region: u32,
    /// Last region index to look for (inclusive)
    pub last_region: u32,
    /// Number of leading sheet rows to skip (titles and headers)
    pub header_rows: usize,
    /// Region indices that are aliases of a canonical region
    pub aliases: BTreeMap<u32, u32>,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            first_region: 1,
            last_region: 48,
            header_rows: 11,
            aliases: BTreeMap::from([(48, 1)]),
        }
    }
}

impl RegionConfig {
    /// Canonical region code for a source file index
    #[must_use]
    pub fn canonical_code(&self, region: u32) -> u32 {
        self.aliases.get(&region).copied().unwrap_or(region)
    }

    /// All region indices in processing order
    pub fn regions(&self) -> impl Iterator<Item = u32> {
        self.first_region..=self.last_region
    }
}

/// Settings for the row repair stage
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Ordered fill rules applied to every region table
    pub fill_rules: Vec<FillRule>,
    /// Rows whose `type` contains any of these keywords are dropped
    pub status_denylist: Vec<String>,
    /// Rows whose `tell` contains any of these keywords are dropped
    pub contact_denylist: Vec<String>,
    /// Substitutions applied to the `type` column before filling
    pub type_substitutions: Vec<(String, String)>,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            fill_rules: default_fill_rules(),
            status_denylist: vec!["現存".to_string(), "休止".to_string()],
            contact_denylist: vec!["常".to_string()],
            type_substitutions: vec![("総合病院".to_string(), "総合".to_string())],
        }
    }
}

/// Settings for the record consolidation stage
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsolidateConfig {
    /// Records whose `register` text contains any of these keywords are dropped
    pub register_denylist: Vec<String>,
}

impl Default for ConsolidateConfig {
    fn default() -> Self {
        Self {
            register_denylist: ["その他", "移動", "新規", "交代", "移転", "組織変更", "開設者変", "更新"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Settings for the taxonomy classifier
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Whether large inputs may be classified in parallel
    pub use_parallel: bool,
    /// Minimum number of records before the parallel path is used
    pub parallel_threshold: usize,
    /// Worker threads for the parallel path
    pub num_threads: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            use_parallel: true,
            parallel_threshold: 1000,
            num_threads: num_cpus::get(),
        }
    }
}

/// Column names of the inbound geocoding result file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    /// Longitude column
    pub lon_column: String,
    /// Latitude column
    pub lat_column: String,
    /// Facility id column; when present the join is keyed on it
    pub id_column: String,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            lon_column: "fX".to_string(),
            lat_column: "fY".to_string(),
            id_column: "id".to_string(),
        }
    }
}

/// Configuration for one pipeline run
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding all working directories
    pub base_dir: PathBuf,
    /// Name of this run's working directory under `base_dir`
    pub workdir_name: String,
    /// Cohort key of the submission (e.g. `r0512`)
    pub data_month: String,
    /// Region layout
    #[serde(default)]
    pub region: RegionConfig,
    /// Row repair settings
    #[serde(default)]
    pub repair: RepairConfig,
    /// Consolidation settings
    #[serde(default)]
    pub consolidate: ConsolidateConfig,
    /// Classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Geocoding exchange settings
    #[serde(default)]
    pub geo: GeoConfig,
}

impl PipelineConfig {
    /// Create a configuration with default stage settings
    #[must_use]
    pub fn new(
        base_dir: impl Into<PathBuf>,
        workdir_name: impl Into<String>,
        data_month: impl Into<String>,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            workdir_name: workdir_name.into(),
            data_month: data_month.into(),
            region: RegionConfig::default(),
            repair: RepairConfig::default(),
            consolidate: ConsolidateConfig::default(),
            classifier: ClassifierConfig::default(),
            geo: GeoConfig::default(),
        }
    }

    /// Load a configuration from a JSON file
    ///
    /// Stage sections may be omitted; they fall back to their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| PipelineError::Config(format!("{}: {e}", path.display())))
    }

    /// Build a configuration from the process environment
    ///
    /// # Errors
    /// Returns an error if any of the three variables is unset
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| PipelineError::Config(format!("environment variable {name} is not set")))
        };
        Ok(Self::new(var(ENV_BASE_DIR)?, var(ENV_WORKDIR)?, var(ENV_DATA_MONTH)?))
    }

    /// Working directory of this run
    #[must_use]
    pub fn work_dir(&self) -> PathBuf {
        self.base_dir.join(&self.workdir_name)
    }

    /// Directory of raw per-region spreadsheets
    #[must_use]
    pub fn raw_dir(&self) -> PathBuf {
        self.work_dir().join(format!("{}raw", self.data_month))
    }

    /// Directory of repaired per-region tables
    #[must_use]
    pub fn proc_dir(&self) -> PathBuf {
        self.work_dir().join(&self.data_month)
    }

    /// Directory of consolidated tables and geocoding exchange files
    #[must_use]
    pub fn merge_dir(&self) -> PathBuf {
        self.work_dir().join(format!("{}merge", self.data_month))
    }

    /// Raw spreadsheet for one region index
    #[must_use]
    pub fn region_raw_file(&self, region: u32) -> PathBuf {
        self.raw_dir().join(format!("{region}.xlsx"))
    }

    /// Repaired table for one region index
    #[must_use]
    pub fn region_output_file(&self, region: u32) -> PathBuf {
        self.proc_dir()
            .join(format!("{}_{region}.parquet", self.data_month))
    }

    /// Consolidated table (before classification)
    #[must_use]
    pub fn consolidated_file(&self) -> PathBuf {
        self.merge_dir().join("total.parquet")
    }

    /// Classified table
    #[must_use]
    pub fn classified_file(&self) -> PathBuf {
        self.merge_dir().join("total2.parquet")
    }

    /// Final table with coordinates
    #[must_use]
    pub fn final_file(&self) -> PathBuf {
        self.merge_dir().join("total3.parquet")
    }

    /// Outbound geocoding request
    #[must_use]
    pub fn address_export_file(&self) -> PathBuf {
        self.merge_dir().join("address.csv")
    }

    /// Inbound geocoding result
    #[must_use]
    pub fn geocoded_file(&self) -> PathBuf {
        self.merge_dir().join("address_out.csv")
    }
}
