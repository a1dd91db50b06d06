//! Collidable shapes and movement results

use std::cell::RefCell;
use std::rc::Rc;

use crate::physics::geometry::Rect;
use crate::physics::mask::CollisionMask;

/// The atomic collidable unit: an axis-aligned rectangle tagged with a
/// collision category mask
///
/// A shape is owned by whichever entity or level-loading routine
/// constructed it and is mutated in place every tick (a moving
/// platform's shape tracks its position). The world holds references,
/// never copies.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Current world-space rectangle
    pub rect: Rect,
    /// Collision categories this shape belongs to; `NONE` makes the
    /// shape invisible to every query without removing it
    pub mask: CollisionMask,
}

impl Shape {
    /// Create a new shape
    #[must_use]
    pub fn new(rect: Rect, mask: CollisionMask) -> Self {
        Self { rect, mask }
    }

    /// Create a new shape already wrapped for registration
    #[must_use]
    pub fn shared(rect: Rect, mask: CollisionMask) -> ShapeRef {
        Rc::new(RefCell::new(Self::new(rect, mask)))
    }
}

/// Shared handle to a shape
///
/// The simulation is single-threaded and cooperative (entity updates
/// run to completion one after another within a tick), so
/// `Rc<RefCell<_>>` is the ownership model: the owning entity mutates,
/// the world and other entities read.
pub type ShapeRef = Rc<RefCell<Shape>>;

/// Result of a swept single-axis movement resolution
///
/// Constructed fresh per call and immediately consumed by the caller to
/// update its own position.
#[derive(Debug, Clone, Default)]
pub struct MoveResult {
    /// Movement was blocked on the negative side of the axis (left for
    /// x, up for y)
    pub blocked_negative: bool,
    /// Movement was blocked on the positive side of the axis (right for
    /// x, down for y)
    pub blocked_positive: bool,
    /// The clamped offset: never larger in magnitude than requested and
    /// never sign-flipped
    pub offset: f32,
    /// The shape that produced the final clamp, if any
    pub shape: Option<ShapeRef>,
}

impl MoveResult {
    /// An unobstructed result passing the requested offset through
    #[must_use]
    pub fn unobstructed(offset: f32) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mask_deactivation_in_place() {
        let shape = Shape::shared(Rect::new(0.0, 0.0, 16.0, 16.0), CollisionMask::ENVIRONMENT);
        shape.borrow_mut().mask = CollisionMask::NONE;
        assert!(!shape.borrow().mask.matches(CollisionMask::all()));
    }

    #[test]
    fn test_unobstructed_result() {
        let result = MoveResult::unobstructed(3.5);
        assert!(!result.blocked_negative);
        assert!(!result.blocked_positive);
        assert!(result.shape.is_none());
        assert!((result.offset - 3.5).abs() < f32::EPSILON);
    }
}
