//! Region-level models
//!
//! A [`RegionRecord`] is one facility row of a single region's table after
//! row repair. Every text field is kept as found in the spreadsheet; the
//! consolidator turns these rows into typed [`FacilityRecord`]s.
//!
//! [`FacilityRecord`]: crate::models::FacilityRecord

use serde::{Deserialize, Serialize};

/// Placeholder marking an auxiliary cell that has not been filled
pub const PLACEHOLDER: &str = "*";

/// Prefecture names indexed by region code
const PREFECTURES: [&str; 47] = [
    "北海道", "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県", "茨城県", "栃木県",
    "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県", "新潟県", "富山県", "石川県", "福井県",
    "山梨県", "長野県", "岐阜県", "静岡県", "愛知県", "三重県", "滋賀県", "京都府", "大阪府",
    "兵庫県", "奈良県", "和歌山県", "鳥取県", "島根県", "岡山県", "広島県", "山口県", "徳島県",
    "香川県", "愛媛県", "高知県", "福岡県", "佐賀県", "長崎県", "熊本県", "大分県", "宮崎県",
    "鹿児島県", "沖縄県",
];

/// Name of the prefecture with the given region code
///
/// Code 48 is the secondary Hokkaido submission and resolves to Hokkaido.
#[must_use]
pub fn prefecture_name(code: u32) -> Option<&'static str> {
    match code {
        48 => Some(PREFECTURES[0]),
        1..=47 => Some(PREFECTURES[code as usize - 1]),
        _ => None,
    }
}

/// One repaired row of a region table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Entity id shared by all sheet rows of one facility
    pub id: Option<String>,
    /// Registry code
    pub code: Option<String>,
    /// Facility name
    pub name: Option<String>,
    /// Postal code and address as one string
    pub address: Option<String>,
    /// Telephone cell (staff counts live on the rows below it)
    pub tell: Option<String>,
    /// Establisher
    pub establisher: Option<String>,
    /// Administrator
    pub owner: Option<String>,
    /// Registration date cell
    pub register: Option<String>,
    /// Department cell
    pub category: Option<String>,
    /// Facility type
    #[serde(rename = "type")]
    pub facility_type: Option<String>,
    pub type1: Option<String>,
    pub type2: Option<String>,
    pub type3: Option<String>,
    pub type4: Option<String>,
    /// Full-time staff
    pub n_tenu: Option<String>,
    /// Full-time doctors
    pub n_tenu_dr: Option<String>,
    /// Full-time dentists
    pub n_tenu_den: Option<String>,
    /// Part-time staff
    pub n_ntenu: Option<String>,
    /// Part-time doctors
    pub n_ntenu_dr: Option<String>,
    /// Part-time dentists
    pub n_ntenu_den: Option<String>,
    /// Registration reason
    pub reason: Option<String>,
    /// Opening date
    pub start: Option<String>,
    pub c1: Option<String>,
    pub c2: Option<String>,
    pub c3: Option<String>,
    pub c4: Option<String>,
    pub c5: Option<String>,
    pub c6: Option<String>,
    pub c7: Option<String>,
    /// Canonical region code
    pub pref: u32,
}

impl RegionRecord {
    /// Department cells in sheet order
    #[must_use]
    pub fn department_cells(&self) -> [Option<&str>; 7] {
        [
            self.c1.as_deref(),
            self.c2.as_deref(),
            self.c3.as_deref(),
            self.c4.as_deref(),
            self.c5.as_deref(),
            self.c6.as_deref(),
            self.c7.as_deref(),
        ]
    }

    /// Facility type followed by the four carried-over type cells
    #[must_use]
    pub fn status_cells(&self) -> [Option<&str>; 5] {
        [
            self.facility_type.as_deref(),
            self.type1.as_deref(),
            self.type2.as_deref(),
            self.type3.as_deref(),
            self.type4.as_deref(),
        ]
    }

    /// Staff count cells: full-time staff, doctors, dentists, then part-time
    #[must_use]
    pub fn staff_cells(&self) -> [Option<&str>; 6] {
        [
            self.n_tenu.as_deref(),
            self.n_tenu_dr.as_deref(),
            self.n_tenu_den.as_deref(),
            self.n_ntenu.as_deref(),
            self.n_ntenu_dr.as_deref(),
            self.n_ntenu_den.as_deref(),
        ]
    }
}
