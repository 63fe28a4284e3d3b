//! Paginated record table
//!
//! Backs the tag and document-type settings tables: named records each
//! carrying a list of chips, shown a fixed number of rows per page with
//! filler rows padding the last page.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::error::{RecordError, Result};
use crate::config::TableConfig;
use crate::names::DEFAULT_MAX_NAME_LEN;
use crate::select::{ChipInput, DEFAULT_MAX_CHIPS};

/// Chips rendered before the rest collapse into a counter
const SUMMARY_CHIPS: usize = 3;

/// One row of a record table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub chips: Vec<String>,
}

/// Direction of the name column sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The opposite direction
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Compact rendering of a chip list
///
/// Up to three chips are shown; a fourth is shown only when it is the last
/// one, otherwise the remainder collapses into `+N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChipSummary {
    pub shown: Vec<String>,
    pub more: usize,
}

impl ChipSummary {
    /// Summarize a chip list
    #[must_use]
    pub fn of(chips: &[String]) -> Self {
        if chips.len() <= SUMMARY_CHIPS + 1 {
            return Self {
                shown: chips.to_vec(),
                more: 0,
            };
        }
        Self {
            shown: chips[..SUMMARY_CHIPS].to_vec(),
            more: chips.len() - SUMMARY_CHIPS,
        }
    }
}

impl fmt::Display for ChipSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shown.is_empty() {
            return f.write_str("-");
        }
        f.write_str(&self.shown.join(", "))?;
        if self.more > 0 {
            write!(f, " +{}", self.more)?;
        }
        Ok(())
    }
}

/// Render-ready row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: u64,
    pub name: String,
    pub chips: ChipSummary,
}

/// One page of a record table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub rows: Vec<RowView>,
    /// Empty rows needed to pad the page to its full height
    pub filler_rows: usize,
    /// Current page, 1-based
    pub page: usize,
    /// Number of pages, at least 1
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Active sort, `None` for unsortable tables
    pub sort: Option<SortOrder>,
}

/// Named records with pagination and an optional name sort
#[derive(Debug, Clone)]
pub struct RecordTable {
    label: &'static str,
    records: Vec<Record>,
    next_id: u64,
    page: usize,
    page_size: usize,
    sort: Option<SortOrder>,
    max_chips: usize,
    max_len: usize,
}

impl RecordTable {
    /// Create an empty table
    ///
    /// `label` names the records in error messages (e.g. "tag").
    #[must_use]
    pub fn new(label: &'static str, layout: TableConfig) -> Self {
        Self {
            label,
            records: Vec::new(),
            next_id: 1,
            page: 1,
            page_size: layout.page_size.max(1),
            sort: layout.sortable.then_some(SortOrder::Asc),
            max_chips: DEFAULT_MAX_CHIPS,
            max_len: DEFAULT_MAX_NAME_LEN,
        }
    }

    /// Set the chip limits used to validate record chips
    #[must_use]
    pub const fn with_chip_limits(mut self, max_chips: usize, max_len: usize) -> Self {
        self.max_chips = max_chips;
        self.max_len = max_len;
        self
    }

    /// Label used in messages
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in display order
    #[must_use]
    pub fn records(&self) -> Vec<&Record> {
        let mut rows: Vec<&Record> = self.records.iter().collect();
        match self.sort {
            Some(SortOrder::Asc) => rows.sort_by(|a, b| a.name.cmp(&b.name)),
            Some(SortOrder::Desc) => rows.sort_by(|a, b| b.name.cmp(&a.name)),
            None => {}
        }
        rows
    }

    /// Look up a record
    ///
    /// # Errors
    /// Returns `RecordError::NotFound` for an unknown id.
    pub fn get(&self, id: u64) -> Result<&Record> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .ok_or(RecordError::NotFound {
                table: self.label,
                id,
            })
    }

    /// Add a record at the front and go back to the first page
    ///
    /// # Errors
    /// `Empty` or `Duplicate` for the name, or `Chip` for a refused chip.
    pub fn create(&mut self, name: &str, chips: &[String]) -> Result<Record> {
        let name = self.check_name(name, None)?;
        let chips = self.check_chips(chips)?;

        let record = Record {
            id: self.next_id,
            name,
            chips,
        };
        self.next_id += 1;
        self.records.insert(0, record.clone());
        self.page = 1;
        debug!(table = self.label, id = record.id, name = %record.name, "record created");
        Ok(record)
    }

    /// Replace a record's name and chips
    ///
    /// # Errors
    /// `NotFound` for an unknown id, otherwise the same failures as
    /// [`create`](Self::create). Keeping the current name is not a duplicate.
    pub fn update(&mut self, id: u64, name: &str, chips: &[String]) -> Result<Record> {
        let position = self.position(id)?;
        let name = self.check_name(name, Some(id))?;
        let chips = self.check_chips(chips)?;

        let record = &mut self.records[position];
        record.name = name;
        record.chips = chips;
        debug!(table = self.label, id, name = %record.name, "record updated");
        Ok(record.clone())
    }

    /// Remove a record
    ///
    /// # Errors
    /// Returns `RecordError::NotFound` for an unknown id.
    pub fn delete(&mut self, id: u64) -> Result<Record> {
        let position = self.position(id)?;
        let record = self.records.remove(position);
        self.clamp_page();
        debug!(table = self.label, id, "record deleted");
        Ok(record)
    }

    /// Number of pages, at least 1
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.records.len().div_ceil(self.page_size).max(1)
    }

    /// Current page, 1-based
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.page
    }

    /// Move to a page, clamped into range
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = page;
        self.clamp_page();
        self.page
    }

    /// Move forward one page; returns whether the page changed
    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Move back one page; returns whether the page changed
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Flip the name sort
    ///
    /// Returns the new order, or `None` when the table is not sortable.
    pub fn toggle_sort(&mut self) -> Option<SortOrder> {
        self.sort = self.sort.map(SortOrder::flipped);
        self.sort
    }

    /// Current sort, `None` for unsortable tables
    #[must_use]
    pub const fn sort(&self) -> Option<SortOrder> {
        self.sort
    }

    /// Render the current page
    #[must_use]
    pub fn page(&self) -> PageView {
        let total_pages = self.total_pages();
        let page = self.page.clamp(1, total_pages);
        let rows: Vec<RowView> = self
            .records()
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .map(|record| RowView {
                id: record.id,
                name: record.name.clone(),
                chips: ChipSummary::of(&record.chips),
            })
            .collect();

        PageView {
            filler_rows: self.page_size - rows.len(),
            rows,
            page,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
            sort: self.sort,
        }
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or(RecordError::NotFound {
                table: self.label,
                id,
            })
    }

    fn check_name(&self, raw: &str, own_id: Option<u64>) -> Result<String> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(RecordError::Empty { table: self.label });
        }
        let taken = self
            .records
            .iter()
            .any(|record| record.name == name && Some(record.id) != own_id);
        if taken {
            return Err(RecordError::Duplicate {
                table: self.label,
                name: name.to_string(),
            });
        }
        Ok(name.to_string())
    }

    fn check_chips(&self, chips: &[String]) -> Result<Vec<String>> {
        Ok(ChipInput::new(self.max_chips, self.max_len)
            .with_chips(chips)?
            .into_chips())
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }
}
