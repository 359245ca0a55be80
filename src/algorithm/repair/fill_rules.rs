//! Fill rules for the legacy region layout
//!
//! In the raw layout the auxiliary attributes of a facility (staff counts,
//! registration reason, opening date, extra type cells, extra departments) sit
//! on the rows *below* the facility's own row. A [`FillRule`] copies one such
//! cell up onto the facility row.

use serde::{Deserialize, Serialize};

/// Copy `source` from `offset` rows below into `target`
///
/// The copy happens only when both rows belong to the same entity, the target
/// cell still holds the placeholder and the source cell contains `marker`.
/// An empty marker matches any present cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillRule {
    /// Column written on the facility row
    pub target: String,
    /// Column read on the row `offset` below
    pub source: String,
    /// Row distance between target and source
    pub offset: usize,
    /// Substring the source cell must contain
    #[serde(default)]
    pub marker: String,
}

impl FillRule {
    /// Create a fill rule
    #[must_use]
    pub fn new(target: &str, source: &str, offset: usize, marker: &str) -> Self {
        Self {
            target: target.to_string(),
            source: source.to_string(),
            offset,
            marker: marker.to_string(),
        }
    }

    /// Whether a source cell qualifies for copying
    #[must_use]
    pub fn accepts(&self, source: Option<&str>) -> bool {
        source.is_some_and(|s| s.contains(self.marker.as_str()))
    }
}

/// The rule table for the national registry layout, in application order
///
/// Order matters: `start` is read from the `reason` cell of the next row,
/// which an earlier rule has already filled.
#[must_use]
pub fn default_fill_rules() -> Vec<FillRule> {
    let mut rules = vec![
        FillRule::new("n_tenu", "tell", 1, "常"),
        FillRule::new("n_tenu_dr", "tell", 2, "医"),
        FillRule::new("n_tenu_den", "tell", 3, "歯"),
        FillRule::new("n_ntenu", "tell", 4, "非"),
        FillRule::new("n_ntenu_dr", "tell", 5, "医"),
        FillRule::new("n_ntenu_den", "tell", 6, "歯"),
        FillRule::new("reason", "register", 1, ""),
        FillRule::new("start", "reason", 1, ""),
    ];
    rules.extend((1..=4).map(|k| FillRule::new(&format!("type{k}"), "type", k, "")));
    rules.extend((1..=7).map(|k| FillRule::new(&format!("c{k}"), "category", k - 1, "")));
    rules
}
