//! Department field parsing
//!
//! A facility's department field is a delimited list of department
//! mentions, some annotated with a bed count (`内科:52,外科:10`). Parsing
//! yields the clean mentions, the annotations and the total bed count. The
//! parser never fails: anything it cannot read contributes nothing.

use crate::models::{BedAnnotation, DepartmentList};

/// Values that stand for a missing department field
const MISSING_PLACEHOLDERS: [&str; 6] = ["", "*", "nan", "NaN", "None", "set()"];

/// Characters dropped before splitting
const DROPPED_CHARS: [char; 5] = ['{', '}', ' ', '\'', '"'];

/// Characters treated as a mention delimiter
const DELIMITERS: [char; 4] = ['，', '、', '・', '/'];

/// Whether a raw department field carries no information
#[must_use]
pub fn is_missing(raw: &str) -> bool {
    MISSING_PLACEHOLDERS.contains(&raw.trim())
}

/// Map full-width digits and colons to their ASCII forms
fn to_ascii_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
        '：' => ':',
        _ => c,
    }
}

/// Normalize a raw field to ASCII digits, `,` delimiters and no spacing noise
#[must_use]
pub fn normalize_field(raw: &str) -> String {
    raw.chars()
        .filter(|c| !DROPPED_CHARS.contains(c))
        .map(|c| if DELIMITERS.contains(&c) { ',' } else { to_ascii_digit(c) })
        .collect()
}

/// The `label:beds` annotation of one segment, if any
///
/// The rightmost colon followed by a digit separates the label from the count.
fn segment_annotation(segment: &str) -> Option<BedAnnotation> {
    let (colon, _) = segment
        .char_indices()
        .filter(|(i, c)| {
            *c == ':'
                && *i > 0
                && segment[i + 1..].starts_with(|d: char| d.is_ascii_digit())
        })
        .last()?;

    let digits: String = segment[colon + 1..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    let beds = digits.parse::<u64>().ok()?;

    Some(BedAnnotation {
        label: segment[..colon].trim().to_string(),
        beds,
    })
}

/// Sum of every run of ASCII digits in the normalized field
fn sum_digit_runs(normalized: &str) -> u64 {
    normalized
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<u64>().unwrap_or(0))
        .fold(0, u64::saturating_add)
}

/// Split a normalized field into trimmed, non-empty mentions
///
/// A leading delimiter left over from composite-field construction is ignored.
fn split_mentions(normalized: &str) -> Vec<String> {
    let body = normalized.strip_prefix(',').unwrap_or(normalized);
    body.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parse one facility's department field
///
/// # Arguments
/// * `raw` - Department field as stored on the facility record
///
/// # Returns
/// Department mentions with bed counts removed, the bed annotations and the
/// sum of every number in the field. A missing field yields an empty list
/// and a total of 0.
#[must_use]
pub fn parse_departments(raw: &str) -> DepartmentList {
    if is_missing(raw) {
        return DepartmentList::default();
    }

    let normalized = normalize_field(raw);

    let bed_annotations = normalized
        .split(',')
        .filter_map(segment_annotation)
        .collect();
    let bed_total = sum_digit_runs(&normalized);

    let stripped: String = normalized
        .chars()
        .filter(|c| *c != ':' && !c.is_ascii_digit())
        .collect();
    let department_tokens = split_mentions(&stripped);

    DepartmentList {
        department_tokens,
        bed_annotations,
        bed_total,
    }
}
