//! Mutually exclusive controls sharing one screen region
//!
//! Only one control of a group may be open at a time: opening one closes
//! the others first, and an outside click closes them all.

use indexmap::IndexMap;
use std::fmt;
use std::hash::Hash;

use super::error::{Result, SelectError};
use super::traits::CandidateSource;

/// Controls keyed by `K`, at most one open
pub struct ControlGroup<K> {
    controls: IndexMap<K, Box<dyn CandidateSource>>,
}

impl<K: fmt::Debug> fmt::Debug for ControlGroup<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.controls.iter()).finish()
    }
}

impl<K> Default for ControlGroup<K> {
    fn default() -> Self {
        Self {
            controls: IndexMap::new(),
        }
    }
}

impl<K> ControlGroup<K>
where
    K: Copy + Eq + Hash + fmt::Display,
{
    /// Create an empty group
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control, replacing any previous one under the key
    pub fn insert(&mut self, key: K, control: Box<dyn CandidateSource>) {
        self.controls.insert(key, control);
    }

    /// Control registered under the key
    #[must_use]
    pub fn get(&self, key: K) -> Option<&dyn CandidateSource> {
        self.controls.get(&key).map(AsRef::as_ref)
    }

    /// Mutable control registered under the key
    ///
    /// # Errors
    /// Returns `SelectError::UnknownControl` for an unregistered key.
    pub fn get_mut(&mut self, key: K) -> Result<&mut dyn CandidateSource> {
        match self.controls.get_mut(&key) {
            Some(control) => Ok(control.as_mut()),
            None => Err(SelectError::UnknownControl(key.to_string())),
        }
    }

    /// Open one control, closing every other open control first
    ///
    /// A disabled control refuses to open and leaves the others untouched.
    ///
    /// # Errors
    /// `UnknownControl` or `Disabled`.
    pub fn open(&mut self, key: K) -> Result<bool> {
        let target = self.get_mut(key)?;
        if target.is_disabled() {
            return Err(SelectError::Disabled);
        }
        for (other, control) in &mut self.controls {
            if *other != key && control.is_open() {
                control.close();
            }
        }
        self.get_mut(key)?.open()
    }

    /// Close every control (outside click)
    pub fn close_all(&mut self) {
        for control in self.controls.values_mut() {
            if control.is_open() {
                control.close();
            }
        }
    }

    /// Key of the open control, if any
    #[must_use]
    pub fn open_key(&self) -> Option<K> {
        self.controls
            .iter()
            .find(|(_, control)| control.is_open())
            .map(|(key, _)| *key)
    }

    /// Registered keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.controls.keys().copied()
    }
}
