//! Session-scoped snapshot cache with generation-validated lookups.
//!
//! Index-based addressing is only valid against the exact element
//! sequence it was derived from. The cache makes that invariant
//! explicit: every stored parse gets a monotonically increasing
//! generation number, and lookups carry the generation they were
//! captured in. A lookup against a superseded generation fails loudly
//! instead of silently addressing the wrong element on a screen that
//! has since changed.

use thiserror::Error;

use crate::element::UiElement;

/// Why an index lookup was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("snapshot generation {requested} is stale (current is {current})")]
    StaleGeneration { requested: u64, current: u64 },

    #[error("element index {index} out of range (snapshot has {len} elements)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no snapshot has been stored yet")]
    Empty,
}

/// Holds the most recent parsed sequence for index-based dispatch.
///
/// The cache keeps exactly one snapshot; storing a new one supersedes
/// the previous generation, and all references captured against it.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    generation: u64,
    elements: Vec<UiElement>,
}

impl SnapshotCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly parsed sequence, returning its generation.
    pub fn store(&mut self, elements: Vec<UiElement>) -> u64 {
        self.generation += 1;
        self.elements = elements;
        self.generation
    }

    /// Generation of the currently held snapshot; 0 before any store.
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    /// The elements of the given generation.
    pub fn elements(&self, generation: u64) -> Result<&[UiElement], SessionError> {
        if self.generation == 0 {
            return Err(SessionError::Empty);
        }
        if generation != self.generation {
            return Err(SessionError::StaleGeneration {
                requested: generation,
                current: self.generation,
            });
        }
        Ok(&self.elements)
    }

    /// Look up one element by the index it had in `generation`.
    pub fn element(&self, generation: u64, index: usize) -> Result<&UiElement, SessionError> {
        let elements = self.elements(generation)?;
        elements.get(index).ok_or(SessionError::IndexOutOfRange {
            index,
            len: elements.len(),
        })
    }
}
