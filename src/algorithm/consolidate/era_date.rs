//! Era-calendar dates
//!
//! Registry dates are written as `<era><year>.<month>.<day>` in the Japanese
//! era calendar, e.g. `令5.12.1` or `平元.4.1`. Conversion never fails: a
//! component that cannot be read is 0.

use crate::models::EraDate;

/// Eras in use in the registry with the Gregorian year before their first year
const ERAS: [(char, i32); 3] = [('昭', 1925), ('平', 1988), ('令', 2018)];

/// Written form of the first year of an era
const FIRST_YEAR: char = '元';

/// Gregorian offset of the first era marker in `text`
fn era_offset(text: &str) -> Option<(usize, i32)> {
    text.char_indices().find_map(|(i, c)| {
        ERAS.iter()
            .find(|(marker, _)| *marker == c)
            .map(|(marker, base)| (i + marker.len_utf8(), *base))
    })
}

/// Runs of digits in `text`, with full-width digits and `元` read as digits
fn digit_runs(text: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        let digit = match c {
            '0'..='9' => Some(c),
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32),
            FIRST_YEAR => Some('1'),
            _ => None,
        };
        match digit {
            Some(d) => current.push(d),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Convert an era-calendar cell to a Gregorian date
///
/// Whitespace is ignored and any non-digit separates components, so
/// `令 5.12. 1` and `令和5年12月1日` read the same. Text without an era
/// marker converts to all zeros.
#[must_use]
pub fn parse_era_date(text: Option<&str>) -> EraDate {
    let Some(text) = text else {
        return EraDate::default();
    };
    let Some((start, base)) = era_offset(text) else {
        return EraDate::default();
    };

    let runs = digit_runs(&text[start..]);
    let component = |k: usize| -> i32 {
        runs.get(k)
            .and_then(|run| run.parse::<i32>().ok())
            .unwrap_or(0)
    };

    let era_year = component(0);
    EraDate {
        year: if era_year > 0 { base + era_year } else { 0 },
        month: component(1),
        day: component(2),
    }
}
