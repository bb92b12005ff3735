//! Generational handles for per-level objects
//!
//! A handle is a slot index plus the generation the slot had when the
//! object was spawned. Once the object is despawned the slot's generation
//! moves on and the old handle stops resolving.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    /// Only `ComponentStorage` (and tests) mint handles
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Handle for the next occupant of the same slot
    pub(crate) fn next_generation(&self) -> Self {
        Self { index: self.index, generation: self.generation.wrapping_add(1) }
    }
}
