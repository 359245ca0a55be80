//! Row repair
//!
//! Rebuilds one logical record per facility from a region sheet whose
//! auxiliary attributes are spread over the rows below each facility row.
//! The stage is a fixed sequence: add placeholder columns, forward-fill,
//! normalise the type text, apply the fill-rule table, then drop the
//! auxiliary rows by their status and contact text.

pub mod fill_rules;
pub mod raw_table;

use log::debug;

use crate::config::{RegionConfig, RepairConfig};
use crate::error::Result;
use crate::models::{PLACEHOLDER, RegionRecord};

pub use fill_rules::{FillRule, default_fill_rules};
pub use raw_table::{AUXILIARY_COLUMNS, Cell, RAW_COLUMNS, RawTable};

/// Repair one region table
///
/// # Arguments
/// * `table` - Raw sheet rows of one region
/// * `region` - Region index of the source file
/// * `repair` - Fill rules and exclusion keywords
/// * `regions` - Alias table used to stamp the canonical region code
///
/// # Returns
/// One record per facility row that survives the exclusion filters
///
/// # Errors
/// Returns an error if a fill rule names a column the table does not have
pub fn repair_region(
    mut table: RawTable,
    region: u32,
    repair: &RepairConfig,
    regions: &RegionConfig,
) -> Result<Vec<RegionRecord>> {
    let input_rows = table.len();

    for column in AUXILIARY_COLUMNS {
        table.add_column(column, PLACEHOLDER);
    }
    table.forward_fill();

    for (from, to) in &repair.type_substitutions {
        table.substitute("type", from, to)?;
    }

    for rule in &repair.fill_rules {
        let filled = table.apply_fill_rule(rule, PLACEHOLDER)?;
        debug!(
            "Region {region}: rule {} <- {}+{} filled {filled} cells",
            rule.target, rule.source, rule.offset
        );
    }

    let dropped_status = table.drop_rows_containing("type", &repair.status_denylist)?;
    let dropped_contact = table.drop_rows_containing("tell", &repair.contact_denylist)?;
    debug!(
        "Region {region}: {input_rows} rows, dropped {dropped_status} by status and {dropped_contact} by contact"
    );

    Ok(table.into_region_records(regions.canonical_code(region)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: [Option<&str>; 10]) -> Vec<Cell> {
        values.iter().map(|v| v.map(ToString::to_string)).collect()
    }

    /// Two facilities in the legacy layout: a facility row followed by its
    /// staff, reason and extra-department rows
    fn sample_table() -> RawTable {
        RawTable::from_sheet_rows(vec![
            row([Some("1"), Some("0101"), Some("札幌総合病院"), Some("〒060ー0001 札幌市中央区1"), Some("011-111-1111"), Some("法人"), Some("院長"), Some("令5.4.1"), Some("内科:20"), Some("総合病院")]),
            row([None, None, None, None, Some("常勤: 3"), None, None, Some("新規"), Some("外科"), Some("現存")]),
            row([None, None, None, None, Some("(医 2)"), None, None, Some("令5.5.1"), Some("眼科"), None]),
            row([None, None, None, None, Some("(歯 0)"), None, None, None, None, None]),
            row([None, None, None, None, Some("非常勤: 1"), None, None, None, None, None]),
            row([None, None, None, None, Some("(医 1)"), None, None, None, None, None]),
            row([None, None, None, None, Some("(歯 0)"), None, None, None, None, None]),
            row([Some("2"), Some("0102"), Some("旭川診療所"), Some("〒070ー0001 旭川市1"), Some("016-222-2222"), Some("個人"), Some("所長"), Some("平10.1.5"), Some("小児科"), Some("診療所")]),
            row([None, None, None, None, Some("常勤: 1"), None, None, None, None, Some("現存")]),
        ])
    }

    #[test]
    fn test_repair_rebuilds_facility_rows() {
        let records = repair_region(
            sample_table(),
            48,
            &RepairConfig::default(),
            &RegionConfig::default(),
        )
        .unwrap();

        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.pref, 1);
        assert_eq!(first.facility_type.as_deref(), Some("総合"));
        assert_eq!(first.n_tenu.as_deref(), Some("常勤: 3"));
        assert_eq!(first.n_tenu_dr.as_deref(), Some("(医 2)"));
        assert_eq!(first.n_tenu_den.as_deref(), Some("(歯 0)"));
        assert_eq!(first.n_ntenu.as_deref(), Some("非常勤: 1"));
        assert_eq!(first.n_ntenu_dr.as_deref(), Some("(医 1)"));
        assert_eq!(first.n_ntenu_den.as_deref(), Some("(歯 0)"));
        assert_eq!(first.reason.as_deref(), Some("新規"));
        assert_eq!(first.start.as_deref(), Some("令5.5.1"));
        assert_eq!(first.type1.as_deref(), Some("現存"));
        assert_eq!(first.c1.as_deref(), Some("内科:20"));
        assert_eq!(first.c2.as_deref(), Some("外科"));
        assert_eq!(first.c3.as_deref(), Some("眼科"));
        // Forward-filled from the row above
        assert_eq!(first.c7.as_deref(), Some("眼科"));

        let second = &records[1];
        assert_eq!(second.id.as_deref(), Some("2"));
        assert_eq!(second.n_tenu.as_deref(), Some("常勤: 1"));
        // No second auxiliary row for this facility
        assert_eq!(second.n_tenu_dr.as_deref(), Some(PLACEHOLDER));
        // Forward-filled department on the staff row
        assert_eq!(second.c2.as_deref(), Some("小児科"));
        assert_eq!(second.c3.as_deref(), Some(PLACEHOLDER));
    }

    #[test]
    fn test_empty_table() {
        let records = repair_region(
            RawTable::from_sheet_rows(Vec::new()),
            13,
            &RepairConfig::default(),
            &RegionConfig::default(),
        )
        .unwrap();
        assert!(records.is_empty());
    }
}
