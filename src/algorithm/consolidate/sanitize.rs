//! Cell sanitizers used by consolidation
//!
//! Each function reduces one group of region cells to the value stored on the
//! consolidated record. None of them fail; unreadable input becomes an empty
//! value or 0.

use itertools::Itertools;

use crate::models::{PLACEHOLDER, prefecture_name};

/// Separator of the department and status composites
pub const COMPOSITE_SEPARATOR: char = '/';

/// Noise removed from staff-count cells before parsing
const STAFF_NOISE: [&str; 11] = ["常勤", "非", "医", "歯", "(", ")", "（", "）", ":", "：", " "];

/// Characters of the postal-code prefix in an address cell (after the `〒` mark)
const POSTAL_RANGE: std::ops::Range<usize> = 1..9;

/// Whether a cell is empty or still holds the repair placeholder
fn is_blank(cell: Option<&str>) -> bool {
    cell.is_none_or(|c| c.trim().is_empty() || c.trim() == PLACEHOLDER)
}

/// Build the department composite from the seven department cells
///
/// Placeholders and half-width spaces are removed, a full-width space
/// separates two entries, and an entry that starts with a digit is a bed
/// count belonging to the entry before it (`一般　52` becomes `一般:52`).
/// Entries are de-duplicated keeping the first occurrence.
#[must_use]
pub fn department_composite(cells: &[Option<&str>]) -> String {
    let mut entries: Vec<String> = Vec::new();

    let parts = cells
        .iter()
        .filter(|c| !is_blank(**c))
        .flatten()
        .flat_map(|cell| {
            cell.replace(PLACEHOLDER, "")
                .replace(' ', "")
                .replace('　', "/")
                .split(COMPOSITE_SEPARATOR)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        });

    for part in parts {
        let is_bed_count = part.starts_with(|c: char| ('1'..='9').contains(&c));
        match entries.last_mut() {
            Some(previous) if is_bed_count => {
                previous.push(':');
                previous.push_str(&part);
            }
            _ => entries.push(part),
        }
    }

    entries.into_iter().unique().join(&COMPOSITE_SEPARATOR.to_string())
}

/// Distinct status tokens of the type cell and the four carried type cells
#[must_use]
pub fn status_tokens(cells: &[Option<&str>]) -> Vec<String> {
    cells
        .iter()
        .filter(|c| !is_blank(**c))
        .flatten()
        .flat_map(|cell| cell.split(COMPOSITE_SEPARATOR))
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != PLACEHOLDER)
        .map(ToString::to_string)
        .unique()
        .collect()
}

/// Staff count of one cell such as `常勤: 3` or `(医 1.5)`
///
/// The placeholder counts as 0 and fractional counts are truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn staff_count(cell: Option<&str>) -> i64 {
    let Some(cell) = cell else {
        return 0;
    };
    let mut text = cell.replace('　', "");
    for noise in STAFF_NOISE {
        text = text.replace(noise, "");
    }
    let text = text.replace(PLACEHOLDER, "0");

    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map_or(0, |v| v.trunc() as i64)
}

/// Reason text with dates that slid into the reason cell removed
///
/// A cell carrying an era marker is an opening date, not a reason.
#[must_use]
pub fn reason_text(cell: Option<&str>) -> &str {
    match cell {
        Some(text) if !text.contains(['昭', '平', '令']) => text,
        _ => "",
    }
}

/// Split an address cell into postal code and prefecture-qualified address
///
/// The cell starts with `〒` and an eight-character postal code; the rest is
/// the street address without the prefecture.
#[must_use]
pub fn split_address(cell: Option<&str>, pref: u32) -> (String, String) {
    let chars: Vec<char> = cell.unwrap_or_default().chars().collect();

    let post: String = chars
        .get(POSTAL_RANGE.start..POSTAL_RANGE.end.min(chars.len()))
        .unwrap_or_default()
        .iter()
        .map(|&c| if c == 'ー' { '-' } else { c })
        .collect();

    let rest: String = chars.iter().skip(POSTAL_RANGE.end).collect();
    let address = format!("{}{}", prefecture_name(pref).unwrap_or_default(), rest.trim());

    (post, address)
}
