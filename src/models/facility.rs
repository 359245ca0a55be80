//! Consolidated facility record
//!
//! One row per medical facility after all regions have been merged. The
//! record shape is flat so it maps one-to-one onto Arrow columns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::indicators::{ReasonFlag, StatusFlag};

/// Gregorian date converted from an era-calendar cell
///
/// Each component is `0` when it could not be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EraDate {
    /// Gregorian year
    pub year: i32,
    /// Month (1-12)
    pub month: i32,
    /// Day of month
    pub day: i32,
}

impl EraDate {
    /// Calendar date, if all components form a valid date
    #[must_use]
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        let month = u32::try_from(self.month).ok()?;
        let day = u32::try_from(self.day).ok()?;
        NaiveDate::from_ymd_opt(self.year, month, day)
    }
}

/// Medical facility after consolidation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    /// Sequential id assigned after consolidation
    pub id: i64,
    /// Canonical region code
    pub pref: u32,
    /// Registry code
    pub code: Option<String>,
    /// Postal code fragment (`123-4567`)
    pub post: String,
    /// Address prefixed with the prefecture name
    pub address: String,
    pub name: Option<String>,
    pub establisher: Option<String>,
    pub owner: Option<String>,
    /// Facility type tokens (type plus carried-over type cells)
    pub status_tokens: Vec<String>,
    pub fulltime_staff: i64,
    pub fulltime_doctors: i64,
    pub fulltime_dentists: i64,
    pub parttime_staff: i64,
    pub parttime_doctors: i64,
    pub parttime_dentists: i64,
    pub reason_other: bool,
    pub reason_moved: bool,
    pub reason_new: bool,
    pub reason_succession: bool,
    pub reason_reorganised: bool,
    pub reason_establisher_changed: bool,
    pub reason_renewed: bool,
    pub registered_year: i32,
    pub registered_month: i32,
    pub registered_day: i32,
    pub started_year: i32,
    pub started_month: i32,
    pub started_day: i32,
    /// Raw department field: `/`-separated mentions with optional `:beds`
    pub departments: String,
    pub defunct: bool,
    pub long_term_care: bool,
    pub clinic: bool,
    pub hospital: bool,
    pub general: bool,
    pub regional_support: bool,
    pub advanced_function: bool,
}

impl FacilityRecord {
    /// Value of a reason indicator
    #[must_use]
    pub const fn reason(&self, flag: ReasonFlag) -> bool {
        match flag {
            ReasonFlag::Other => self.reason_other,
            ReasonFlag::Moved => self.reason_moved,
            ReasonFlag::New => self.reason_new,
            ReasonFlag::Succession => self.reason_succession,
            ReasonFlag::Reorganised => self.reason_reorganised,
            ReasonFlag::EstablisherChanged => self.reason_establisher_changed,
            ReasonFlag::Renewed => self.reason_renewed,
        }
    }

    /// Set a reason indicator
    pub const fn set_reason(&mut self, flag: ReasonFlag, value: bool) {
        let slot = match flag {
            ReasonFlag::Other => &mut self.reason_other,
            ReasonFlag::Moved => &mut self.reason_moved,
            ReasonFlag::New => &mut self.reason_new,
            ReasonFlag::Succession => &mut self.reason_succession,
            ReasonFlag::Reorganised => &mut self.reason_reorganised,
            ReasonFlag::EstablisherChanged => &mut self.reason_establisher_changed,
            ReasonFlag::Renewed => &mut self.reason_renewed,
        };
        *slot = value;
    }

    /// Value of a status indicator
    #[must_use]
    pub const fn status(&self, flag: StatusFlag) -> bool {
        match flag {
            StatusFlag::Defunct => self.defunct,
            StatusFlag::LongTermCare => self.long_term_care,
            StatusFlag::Clinic => self.clinic,
            StatusFlag::Hospital => self.hospital,
            StatusFlag::General => self.general,
            StatusFlag::RegionalSupport => self.regional_support,
            StatusFlag::AdvancedFunction => self.advanced_function,
        }
    }

    /// Set a status indicator
    pub const fn set_status(&mut self, flag: StatusFlag, value: bool) {
        let slot = match flag {
            StatusFlag::Defunct => &mut self.defunct,
            StatusFlag::LongTermCare => &mut self.long_term_care,
            StatusFlag::Clinic => &mut self.clinic,
            StatusFlag::Hospital => &mut self.hospital,
            StatusFlag::General => &mut self.general,
            StatusFlag::RegionalSupport => &mut self.regional_support,
            StatusFlag::AdvancedFunction => &mut self.advanced_function,
        };
        *slot = value;
    }

    /// Registration date
    #[must_use]
    pub const fn registered(&self) -> EraDate {
        EraDate {
            year: self.registered_year,
            month: self.registered_month,
            day: self.registered_day,
        }
    }

    /// Set the registration date
    pub const fn set_registered(&mut self, date: EraDate) {
        self.registered_year = date.year;
        self.registered_month = date.month;
        self.registered_day = date.day;
    }

    /// Opening date
    #[must_use]
    pub const fn started(&self) -> EraDate {
        EraDate {
            year: self.started_year,
            month: self.started_month,
            day: self.started_day,
        }
    }

    /// Set the opening date
    pub const fn set_started(&mut self, date: EraDate) {
        self.started_year = date.year;
        self.started_month = date.month;
        self.started_day = date.day;
    }

    /// Set the six staff counts in `RegionRecord::staff_cells` order
    pub const fn set_staff_counts(&mut self, counts: [i64; 6]) {
        self.fulltime_staff = counts[0];
        self.fulltime_doctors = counts[1];
        self.fulltime_dentists = counts[2];
        self.parttime_staff = counts[3];
        self.parttime_doctors = counts[4];
        self.parttime_dentists = counts[5];
    }
}
