//! Untyped region table
//!
//! A [`RawTable`] holds a region sheet as named columns of optional text
//! cells. Row repair works on this shape because the legacy layout is only
//! meaningful once neighbouring rows have been folded together.

use rustc_hash::FxHashMap;

use crate::algorithm::repair::fill_rules::FillRule;
use crate::error::{PipelineError, Result};
use crate::models::RegionRecord;

/// Columns of the raw region sheet, in sheet order
pub const RAW_COLUMNS: [&str; 10] = [
    "id",
    "code",
    "name",
    "address",
    "tell",
    "establisher",
    "owner",
    "register",
    "category",
    "type",
];

/// Columns filled from neighbouring rows during repair
pub const AUXILIARY_COLUMNS: [&str; 19] = [
    "type1",
    "type2",
    "type3",
    "type4",
    "n_tenu",
    "n_tenu_dr",
    "n_tenu_den",
    "n_ntenu",
    "n_ntenu_dr",
    "n_ntenu_den",
    "reason",
    "start",
    "c1",
    "c2",
    "c3",
    "c4",
    "c5",
    "c6",
    "c7",
];

/// One cell; `None` is an empty spreadsheet cell
pub type Cell = Option<String>;

/// Region sheet as named columns of text cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    index: FxHashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Create a table from column names and rows
    ///
    /// Rows shorter than the header are padded with empty cells and longer
    /// rows are truncated.
    #[must_use]
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>, rows: Vec<Vec<Cell>>) -> Self {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self {
            columns,
            index,
            rows,
        }
    }

    /// Create a table with the raw sheet columns
    #[must_use]
    pub fn from_sheet_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(RAW_COLUMNS, rows)
    }

    /// Column names in order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column
    ///
    /// # Errors
    /// Returns [`PipelineError::MissingColumn`] if the column does not exist
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }

    /// Cell at a row and named column
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = *self.index.get(column)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Append a column with every cell set to `value`
    pub fn add_column(&mut self, name: &str, value: &str) {
        if self.index.contains_key(name) {
            return;
        }
        self.index.insert(name.to_string(), self.columns.len());
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(Some(value.to_string()));
        }
    }

    /// Replace every empty cell with the nearest present value above it
    ///
    /// Empty cells at the top of a column stay empty.
    pub fn forward_fill(&mut self) {
        let mut last: Vec<Cell> = vec![None; self.columns.len()];
        for row in &mut self.rows {
            for (cell, previous) in row.iter_mut().zip(last.iter_mut()) {
                match cell {
                    Some(value) => *previous = Some(value.clone()),
                    None => cell.clone_from(previous),
                }
            }
        }
    }

    /// Replace every occurrence of `from` with `to` inside a column
    pub fn substitute(&mut self, column: &str, from: &str, to: &str) -> Result<()> {
        let col = self.column_index(column)?;
        for row in &mut self.rows {
            if let Some(value) = row[col].as_mut() {
                if value.contains(from) {
                    *value = value.replace(from, to);
                }
            }
        }
        Ok(())
    }

    /// Apply one fill rule in place
    ///
    /// Rows are visited top to bottom; a write is visible to later rows.
    ///
    /// # Returns
    /// Number of cells filled
    ///
    /// # Errors
    /// Returns an error if the rule names an unknown column or the table has
    /// no `id` column
    pub fn apply_fill_rule(&mut self, rule: &FillRule, placeholder: &str) -> Result<usize> {
        let id = self.column_index("id")?;
        let target = self.column_index(&rule.target)?;
        let source = self.column_index(&rule.source)?;

        let mut filled = 0;
        for i in 0..self.rows.len().saturating_sub(rule.offset) {
            let j = i + rule.offset;
            let same_entity = self.rows[i][id].is_some() && self.rows[i][id] == self.rows[j][id];
            if !same_entity || self.rows[i][target].as_deref() != Some(placeholder) {
                continue;
            }
            if rule.accepts(self.rows[j][source].as_deref()) {
                self.rows[i][target] = self.rows[j][source].clone();
                filled += 1;
            }
        }
        Ok(filled)
    }

    /// Drop rows whose cell in `column` contains any of `keywords`
    ///
    /// # Returns
    /// Number of rows dropped
    pub fn drop_rows_containing<S: AsRef<str>>(&mut self, column: &str, keywords: &[S]) -> Result<usize> {
        let col = self.column_index(column)?;
        let before = self.rows.len();
        self.rows.retain(|row| {
            row[col]
                .as_deref()
                .is_none_or(|value| !keywords.iter().any(|k| value.contains(k.as_ref())))
        });
        Ok(before - self.rows.len())
    }

    /// Convert every row into a [`RegionRecord`] stamped with `pref`
    #[must_use]
    pub fn into_region_records(self, pref: u32) -> Vec<RegionRecord> {
        let Self {
            columns, rows, ..
        } = self;

        rows.into_iter()
            .map(|row| {
                let mut record = RegionRecord {
                    pref,
                    ..Default::default()
                };
                for (name, cell) in columns.iter().zip(row) {
                    if let Some(slot) = record_slot(&mut record, name) {
                        *slot = cell;
                    }
                }
                record
            })
            .collect()
    }
}

/// Field of a region record that stores the named column
fn record_slot<'a>(record: &'a mut RegionRecord, column: &str) -> Option<&'a mut Cell> {
    let slot = match column {
        "id" => &mut record.id,
        "code" => &mut record.code,
        "name" => &mut record.name,
        "address" => &mut record.address,
        "tell" => &mut record.tell,
        "establisher" => &mut record.establisher,
        "owner" => &mut record.owner,
        "register" => &mut record.register,
        "category" => &mut record.category,
        "type" => &mut record.facility_type,
        "type1" => &mut record.type1,
        "type2" => &mut record.type2,
        "type3" => &mut record.type3,
        "type4" => &mut record.type4,
        "n_tenu" => &mut record.n_tenu,
        "n_tenu_dr" => &mut record.n_tenu_dr,
        "n_tenu_den" => &mut record.n_tenu_den,
        "n_ntenu" => &mut record.n_ntenu,
        "n_ntenu_dr" => &mut record.n_ntenu_dr,
        "n_ntenu_den" => &mut record.n_ntenu_den,
        "reason" => &mut record.reason,
        "start" => &mut record.start,
        "c1" => &mut record.c1,
        "c2" => &mut record.c2,
        "c3" => &mut record.c3,
        "c4" => &mut record.c4,
        "c5" => &mut record.c5,
        "c6" => &mut record.c6,
        "c7" => &mut record.c7,
        _ => return None,
    };
    Some(slot)
}
