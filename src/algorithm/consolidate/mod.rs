//! Record consolidation
//!
//! Merges the repaired rows of every region into one table of
//! [`FacilityRecord`]s: rows are ordered by region and address, non-current
//! registrations are dropped, composite and indicator fields are derived and
//! ids are assigned in final order.

pub mod era_date;
pub mod sanitize;

use log::{info, warn};

use crate::config::ConsolidateConfig;
use crate::models::{FacilityRecord, ReasonFlag, RegionRecord, StatusFlag};

pub use era_date::parse_era_date;
pub use sanitize::{department_composite, reason_text, split_address, staff_count, status_tokens};

/// Whether a record's registration text names an excluded reason
fn is_excluded(record: &RegionRecord, config: &ConsolidateConfig) -> bool {
    record
        .register
        .as_deref()
        .is_some_and(|register| config.register_denylist.iter().any(|k| register.contains(k.as_str())))
}

/// Number of a record's dates that carry an era year but no valid calendar date
fn off_calendar_dates(record: &FacilityRecord) -> usize {
    [record.registered(), record.started()]
        .into_iter()
        .filter(|date| date.year != 0 && date.to_naive_date().is_none())
        .count()
}

/// Build the consolidated record of one repaired row
///
/// The id is left at 0; [`consolidate`] assigns ids once the final order is
/// known.
#[must_use]
pub fn consolidate_record(record: &RegionRecord) -> FacilityRecord {
    let (post, address) = split_address(record.address.as_deref(), record.pref);
    let status = status_tokens(&record.status_cells());

    let mut consolidated = FacilityRecord {
        pref: record.pref,
        code: record.code.clone(),
        post,
        address,
        name: record.name.clone(),
        establisher: record.establisher.clone(),
        owner: record.owner.clone(),
        departments: department_composite(&record.department_cells()),
        ..Default::default()
    };

    consolidated.set_staff_counts(record.staff_cells().map(staff_count));

    let reason = reason_text(record.reason.as_deref());
    for flag in ReasonFlag::ALL {
        consolidated.set_reason(flag, flag.matches(reason));
    }

    consolidated.set_registered(parse_era_date(record.register.as_deref()));
    consolidated.set_started(parse_era_date(record.start.as_deref()));

    for flag in StatusFlag::ALL {
        consolidated.set_status(flag, flag.matches(status.as_slice()));
    }
    consolidated.status_tokens = status;

    consolidated
}

/// Merge repaired region rows into consolidated facility records
///
/// # Arguments
/// * `records` - Repaired rows of every region, in any order
/// * `config` - Registration-reason exclusion keywords
///
/// # Returns
/// Records ordered by region code then raw address, with ids `1..=N`
#[must_use]
pub fn consolidate(mut records: Vec<RegionRecord>, config: &ConsolidateConfig) -> Vec<FacilityRecord> {
    let input = records.len();

    records.sort_by(|a, b| {
        a.pref
            .cmp(&b.pref)
            .then_with(|| a.address.is_none().cmp(&b.address.is_none()))
            .then_with(|| a.address.cmp(&b.address))
    });
    records.retain(|r| !is_excluded(r, config));

    let consolidated: Vec<FacilityRecord> = records
        .iter()
        .zip(1_i64..)
        .map(|(record, id)| FacilityRecord {
            id,
            ..consolidate_record(record)
        })
        .collect();

    info!(
        "Consolidated {} of {} region rows ({} excluded by registration reason)",
        consolidated.len(),
        input,
        input - consolidated.len()
    );

    let off_calendar: usize = consolidated.iter().map(off_calendar_dates).sum();
    if off_calendar > 0 {
        warn!("{off_calendar} registration or opening dates are not valid calendar dates");
    }

    consolidated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EraDate;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn region_row(pref: u32, address: &str, register: &str) -> RegionRecord {
        RegionRecord {
            id: some("1"),
            code: some("0101"),
            name: some("テスト病院"),
            address: some(address),
            register: some(register),
            facility_type: some("病院"),
            type1: some("現存"),
            type2: some("総合"),
            type3: some("*"),
            type4: some("*"),
            n_tenu: some("常勤: 12"),
            n_tenu_dr: some("(医 3)"),
            n_tenu_den: some("*"),
            n_ntenu: some("非常勤: 2.5"),
            n_ntenu_dr: some("(医 1)"),
            n_ntenu_den: some("(歯 0)"),
            reason: some("開設者変更"),
            start: some("平元.4.1"),
            c1: some("内科:20"),
            c2: some("外科"),
            c3: some("外科"),
            c4: some("*"),
            c5: some("*"),
            c6: some("*"),
            c7: some("*"),
            pref,
            ..Default::default()
        }
    }

    #[test]
    fn test_consolidate_record_fields() {
        let record = consolidate_record(&region_row(13, "〒100ー0001 千代田区1", "令5.12.1"));

        assert_eq!(record.post, "100-0001");
        assert_eq!(record.address, "東京都千代田区1");
        assert_eq!(record.departments, "内科:20/外科");
        assert_eq!(record.status_tokens, vec!["病院", "現存", "総合"]);
        assert_eq!(
            [
                record.fulltime_staff,
                record.fulltime_doctors,
                record.fulltime_dentists,
                record.parttime_staff,
                record.parttime_doctors,
                record.parttime_dentists,
            ],
            [12, 3, 0, 2, 1, 0]
        );
        assert!(record.reason_establisher_changed);
        assert!(!record.reason_new);
        assert_eq!(record.registered(), EraDate { year: 2023, month: 12, day: 1 });
        assert_eq!(record.started(), EraDate { year: 1989, month: 4, day: 1 });
        assert!(record.hospital);
        assert!(record.general);
        assert!(!record.clinic);
        assert!(!record.defunct);
    }

    #[test]
    fn test_off_calendar_dates_are_counted() {
        let valid = consolidate_record(&region_row(13, "〒100ー0001 千代田区1", "令5.12.1"));
        assert_eq!(off_calendar_dates(&valid), 0);

        // February 30th and a date without month or day
        let mut row = region_row(13, "〒100ー0001 千代田区1", "令5.2.30");
        row.start = some("平10");
        assert_eq!(off_calendar_dates(&consolidate_record(&row)), 2);

        // Nothing read at all is not counted
        let mut row = region_row(13, "〒100ー0001 千代田区1", "不明");
        row.start = None;
        assert_eq!(off_calendar_dates(&consolidate_record(&row)), 0);
    }

    #[test]
    fn test_date_in_reason_sets_no_reason() {
        let mut row = region_row(1, "〒060ー0001 札幌市", "令5.1.1");
        row.reason = some("令5.2.1");
        let record = consolidate_record(&row);
        assert!(ReasonFlag::ALL.iter().all(|f| !record.reason(*f)));
    }

    #[test]
    fn test_consolidate_orders_filters_and_numbers() {
        let rows = vec![
            region_row(13, "〒100ー0002 千代田区2", "令5.12.1"),
            region_row(1, "〒060ー0001 札幌市", "令4.1.1"),
            region_row(13, "〒100ー0001 千代田区1", "新規"),
            region_row(13, "〒100ー0000 千代田区0", "令3.3.3"),
        ];
        let records = consolidate(rows, &ConsolidateConfig::default());

        assert_eq!(records.len(), 3);
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(records[0].pref, 1);
        assert_eq!(records[1].address, "東京都千代田区0");
        assert_eq!(records[2].address, "東京都千代田区2");
    }
}
