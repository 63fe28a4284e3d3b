//! Selection controls
//!
//! This module provides backend-agnostic state machines for the controls a
//! cascade level uses to gather names, plus the chip editor of the record
//! dialogs.
//!
//! # Core Types
//!
//! - **`MultiSelect`** - searchable, multi-checkable option pool with inline add
//! - **`TextEntry`** - plain single-value text field
//! - **`ControlGroup`** - keeps at most one control of a region open
//! - **`ChipInput`** - bounded list of unique short labels
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Cascade editor                     │
//! └────────────────┬────────────────────────┘
//!                  │ Uses trait
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │      CandidateSource                    │
//! └────────────────┬────────────────────────┘
//!                  │ Implemented by
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ MultiSelect   │  │ TextEntry         │
//! └───────────────┘  └───────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use nameplate::select::MultiSelect;
//!
//! let mut pool = MultiSelect::new("Pick stations", ["成型工位", "剪边工位", "伺服电机"]);
//! pool.set_search("工位")?;
//! pool.select_all_visible(true)?;
//! assert_eq!(pool.get_selected(), vec!["成型工位", "剪边工位"]);
//! # Ok::<(), nameplate::select::SelectError>(())
//! ```

pub mod chips;
pub mod error;
pub mod group;
pub mod multi;
pub mod text;
pub mod traits;

pub use chips::{ChipInput, DEFAULT_MAX_CHIPS};
pub use error::{Result, SelectError};
pub use group::ControlGroup;
pub use multi::{MultiSelect, TriggerLabel};
pub use text::TextEntry;
pub use traits::{CandidateSource, GatherMode, Gathered, InputAction, InputView, OptionView};
