//! Three-level device catalog
//!
//! This module provides the `CatalogStore` type which manages:
//! - **Types**: device categories (e.g. "焊接机")
//! - **Devices**: concrete machines under a type (e.g. "33号焊接机")
//! - **Stations**: ordered work stations of a device (e.g. "伺服电机")
//!
//! plus the currently selected type and device. Deleting a node removes
//! everything beneath it and clears any selection pointer that referenced it.
//!
//! # Examples
//!
//! ```
//! use nameplate::catalog::CatalogStore;
//!
//! let mut store = CatalogStore::new();
//! store.add_type("焊接机")?;
//! assert_eq!(store.selected_type(), Some("焊接机"));
//!
//! store.add_device(Some("焊接机"), "33号焊接机")?;
//! store.add_station(Some("焊接机"), Some("33号焊接机"), "伺服电机")?;
//!
//! store.delete_device("焊接机", "33号焊接机")?;
//! assert!(store.list_devices("焊接机").is_empty());
//! assert_eq!(store.selected_type(), Some("焊接机"));
//! # Ok::<(), nameplate::catalog::CatalogError>(())
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{CatalogError, Result};
pub use store::CatalogStore;
pub use types::{
    BatchReport, CatalogSnapshot, DeviceMap, Level, NewTypePolicy, Rejection, TypeMap,
};
