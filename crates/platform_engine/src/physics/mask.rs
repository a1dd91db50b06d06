//! Collision mask model
//!
//! A small closed set of category bit flags combined with bitwise OR
//! when building either a shape's own mask or a query's mask. A shape
//! matches a query iff the two masks share at least one bit.

use bitflags::bitflags;

bitflags! {
    /// Collision category flags
    ///
    /// `NONE` matches nothing and is used to deactivate a shape without
    /// removing it from its chunk: a destroyed breakable tile keeps its
    /// shape object alive in place so chunk lists never mutate mid-level.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CollisionMask: u32 {
        /// Static level geometry (ground, walls)
        const ENVIRONMENT = 1 << 0;
        /// One-way platforms, passable from below
        const PLATFORM = 1 << 1;
        /// The player character
        const PLAYER = 1 << 2;
        /// Enemy bodies
        const ENEMIES = 1 << 3;
        /// Damaging level geometry
        const SPIKES = 1 << 4;
    }
}

impl CollisionMask {
    /// The empty mask; participates in no query
    pub const NONE: Self = Self::empty();

    /// Whether this shape mask matches the given query mask
    #[must_use]
    pub fn matches(self, query: Self) -> bool {
        !(self & query).is_empty()
    }
}
