use std::path::Path;

use facility_registry::algorithm::repair::Cell;
use facility_registry::config::PipelineConfig;
use facility_registry::utils::io::write_records;
use facility_registry::{RawTable, Result, repair_region};

/// Cohort key used by every test configuration
pub const DATA_MONTH: &str = "r0512";

/// Configuration rooted in `base` with its working directory created
#[must_use]
pub fn test_config(base: &Path) -> PipelineConfig {
    let mut config = PipelineConfig::new(base, "r512", DATA_MONTH);
    config.classifier.parallel_threshold = 2;
    config.classifier.num_threads = 2;
    std::fs::create_dir_all(config.work_dir()).expect("create work dir");
    config
}

fn row(values: [Option<&str>; 10]) -> Vec<Cell> {
    values.iter().map(|v| v.map(ToString::to_string)).collect()
}

/// One facility in the legacy layout: the facility row and its six staff rows
#[must_use]
pub fn facility_rows(id: &str, name: &str, address: &str, departments: [&str; 3]) -> Vec<Vec<Cell>> {
    vec![
        row([Some(id), Some("01"), Some(name), Some(address), Some("000-000-0000"), Some("法人"), Some("院長"), Some("令5.4.1"), Some(departments[0]), Some("病院")]),
        row([None, None, None, None, Some("常勤: 10"), None, None, Some("新規"), Some(departments[1]), Some("現存")]),
        row([None, None, None, None, Some("(医 4)"), None, None, Some("令5.5.1"), Some(departments[2]), None]),
        row([None, None, None, None, Some("(歯 0)"), None, None, None, None, None]),
        row([None, None, None, None, Some("非常勤: 2"), None, None, None, None, None]),
        row([None, None, None, None, Some("(医 1)"), None, None, None, None, None]),
        row([None, None, None, None, Some("(歯 0)"), None, None, None, None, None]),
    ]
}

/// Repair a region table and write it where the consolidation stage looks
pub fn write_region(config: &PipelineConfig, region: u32, rows: Vec<Vec<Cell>>) -> Result<()> {
    let records = repair_region(
        RawTable::from_sheet_rows(rows),
        region,
        &config.repair,
        &config.region,
    )?;
    write_records(&config.region_output_file(region), &records)
}
