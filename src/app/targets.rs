//! Target registry with a single active selection.
//!
//! The set of targets is fixed when the registry is built. [`TargetRegistry::select`]
//! is the only mutator and keeps at most one entry active at any time.

use super::config::TargetConfig;
use super::error::ShellError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Identifier of a target entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One selectable target shown as an icon tile
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEntry {
    pub id: TargetId,
    pub label: String,
    /// Logical asset name resolved by the icon cache
    pub icon_ref: String,
    pub is_active: bool,
}

impl TargetEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>, icon_ref: impl Into<String>) -> Self {
        Self {
            id: TargetId::new(id),
            label: label.into(),
            icon_ref: icon_ref.into(),
            is_active: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    entries: Vec<TargetEntry>,
    /// Index of the entry holding the active flag
    active: Option<usize>,
}

impl TargetRegistry {
    /// Build a registry from entries in display order.
    ///
    /// Entries start inactive regardless of their `is_active` field.
    pub fn new(entries: Vec<TargetEntry>) -> Result<Self, ShellError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.clone()) {
                return Err(ShellError::DuplicateTarget(entry.id.clone()));
            }
        }

        let entries = entries
            .into_iter()
            .map(|mut entry| {
                entry.is_active = false;
                entry
            })
            .collect();

        Ok(Self {
            entries,
            active: None,
        })
    }

    pub fn from_config(targets: &[TargetConfig]) -> Result<Self, ShellError> {
        Self::new(
            targets
                .iter()
                .map(|t| TargetEntry::new(t.id.clone(), t.label.clone(), t.icon.clone()))
                .collect(),
        )
    }

    /// All entries in registration order
    pub fn list(&self) -> &[TargetEntry] {
        &self.entries
    }

    /// Make `id` the single active entry.
    ///
    /// Unknown ids fail with [`ShellError::NotFound`] and leave the selection untouched.
    pub fn select(&mut self, id: &TargetId) -> Result<(), ShellError> {
        let index = self
            .entries
            .iter()
            .position(|entry| &entry.id == id)
            .ok_or_else(|| ShellError::NotFound(id.clone()))?;

        if let Some(previous) = self.active.take() {
            self.entries[previous].is_active = false;
        }
        self.entries[index].is_active = true;
        self.active = Some(index);

        debug!("Target selected: {}", id);
        Ok(())
    }

    pub fn active_target(&self) -> Option<&TargetEntry> {
        self.active.map(|index| &self.entries[index])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
