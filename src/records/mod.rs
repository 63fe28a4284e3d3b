//! Record tables of the settings screen
//!
//! The tag and document-type settings are plain lists of named records,
//! each with a chip list, paged and (for tags) sortable by name. They only
//! reuse the name and chip validation of the rest of the crate.
//!
//! # Example
//!
//! ```
//! use nameplate::config::EditorConfig;
//! use nameplate::records::seed;
//!
//! let mut tags = seed::tag_table(&EditorConfig::default());
//! tags.create("客户", &["华东".to_string()])?;
//! assert_eq!(tags.len(), 4);
//! assert_eq!(tags.page().total_pages, 1);
//! # Ok::<(), nameplate::records::RecordError>(())
//! ```

pub mod error;
pub mod seed;
pub mod table;

pub use error::{RecordError, Result};
pub use table::{ChipSummary, PageView, Record, RecordTable, RowView, SortOrder};
