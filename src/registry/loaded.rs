//! The list of drivers that completed bootstrap.

use std::sync::Arc;

use serde::Serialize;

/// Append-only record of drivers set up during bootstrap.
///
/// Once bootstrap finishes the list is turned into a [`FrozenDrivers`],
/// which has no way to append. Late registration therefore cannot compile,
/// instead of being silently dropped at runtime.
#[derive(Debug, Default)]
pub struct LoadedDrivers {
    names: Vec<String>,
}

impl LoadedDrivers {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a driver. Names already present are not added twice.
    pub fn record(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    /// Names recorded so far, in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Ends the mutable phase.
    #[must_use]
    pub fn freeze(self) -> FrozenDrivers {
        FrozenDrivers { names: self.names.into() }
    }
}

/// Read-only, cheaply cloneable view of the drivers loaded at bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrozenDrivers {
    names: Arc<[String]>,
}

impl FrozenDrivers {
    /// Names in load order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` completed bootstrap.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of loaded drivers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no driver was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
