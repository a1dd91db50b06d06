//! Chunked AABB collision world
//!
//! The world owns a collection of chunks, each wrapping a list of shape
//! handles plus a broadphase bound computed at registration time. It is
//! the sole entry point for spatial queries and the sole mutator of
//! query-relevant chunk state. All queries are two-tier: a cheap chunk
//! bound prune, then a mask gate and exact per-shape test.
//!
//! Chunk bounds are a pruning heuristic only. A chunk whose shapes move
//! after registration must be registered unbounded
//! ([`PhysicsWorld::add_chunk_unbounded`]); a cached bound is never
//! refreshed, and a shape that drifts outside it becomes invisible to
//! queries (pinned by test below).

use std::rc::Rc;

use log::debug;
use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::{Point2, EPSILON};
use crate::physics::geometry::{
    point_in_rect, rects_overlap_default, segment_intersects_rect, segment_rect_entry_point, Rect,
};
use crate::physics::mask::CollisionMask;
use crate::physics::shape::{MoveResult, Shape, ShapeRef};

new_key_type! {
    /// Handle to a registered chunk, returned by
    /// [`PhysicsWorld::add_chunk`] and consumed by
    /// [`PhysicsWorld::remove_chunk`]
    pub struct ChunkId;
}

/// Broadphase bound of a chunk
#[derive(Debug, Clone, Copy)]
enum ChunkBounds {
    /// Union of the member shapes at registration time, never refreshed.
    /// An empty shape list yields an inverted box that prunes everything.
    Cached {
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },
    /// No pruning; every query scans the full shape list. Used for
    /// chunks whose shapes move after registration.
    Unbounded,
}

impl ChunkBounds {
    fn from_shapes(shapes: &[ShapeRef]) -> Self {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for shape in shapes {
            let rect = shape.borrow().rect;
            min_x = min_x.min(rect.x);
            min_y = min_y.min(rect.y);
            max_x = max_x.max(rect.right());
            max_y = max_y.max(rect.bottom());
        }

        Self::Cached {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    fn contains_point(&self, p: Point2) -> bool {
        match *self {
            Self::Cached {
                min_x,
                min_y,
                max_x,
                max_y,
            } => p.x > min_x && p.x < max_x && p.y > min_y && p.y < max_y,
            Self::Unbounded => true,
        }
    }

    fn overlaps_span(&self, span: &Span) -> bool {
        match *self {
            Self::Cached {
                min_x,
                min_y,
                max_x,
                max_y,
            } => {
                span.min_x < max_x - EPSILON
                    && span.max_x - EPSILON > min_x
                    && span.min_y < max_y - EPSILON
                    && span.max_y - EPSILON > min_y
            }
            Self::Unbounded => true,
        }
    }
}

/// Axis-aligned extent used for broadphase tests
///
/// Unlike [`Rect`] a span may be degenerate (zero width or height), as
/// produced by an axis-aligned raycast.
#[derive(Debug, Clone, Copy)]
struct Span {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Span {
    fn from_rect(rect: &Rect) -> Self {
        Self {
            min_x: rect.x,
            min_y: rect.y,
            max_x: rect.right(),
            max_y: rect.bottom(),
        }
    }

    fn from_segment(p1: Point2, p2: Point2) -> Self {
        Self {
            min_x: p1.x.min(p2.x),
            min_y: p1.y.min(p2.y),
            max_x: p1.x.max(p2.x),
            max_y: p1.y.max(p2.y),
        }
    }

    fn overlaps_rect(&self, rect: &Rect) -> bool {
        self.min_x < rect.right() - EPSILON
            && self.max_x - EPSILON > rect.x
            && self.min_y < rect.bottom() - EPSILON
            && self.max_y - EPSILON > rect.y
    }
}

/// A registered group of shapes sharing one broadphase bound
#[derive(Debug)]
struct Chunk {
    shapes: Vec<ShapeRef>,
    bounds: ChunkBounds,
}

/// Closest raycast intersection
#[derive(Debug, Clone)]
pub struct RaycastHit {
    /// Point where the ray first enters the blocking shape
    pub point: Point2,
    /// Squared distance from the ray origin to [`RaycastHit::point`]
    pub distance_sq: f32,
    /// The blocking shape
    pub shape: ShapeRef,
}

/// The collision world: a registry of chunks plus the query and
/// movement primitives built on them
///
/// The world carries no temporal state. Chunk add/remove happens
/// between query passes (level streaming); everything is
/// single-threaded, so no locking is needed.
#[derive(Debug)]
pub struct PhysicsWorld {
    chunks: SlotMap<ChunkId, Chunk>,
    entity_chunk: ChunkId,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty world
    ///
    /// The world is born with one long-lived unbounded chunk, the
    /// entity shape registry, holding shapes for entities that persist
    /// across level boundaries.
    #[must_use]
    pub fn new() -> Self {
        let mut chunks = SlotMap::with_key();
        let entity_chunk = chunks.insert(Chunk {
            shapes: Vec::new(),
            bounds: ChunkBounds::Unbounded,
        });
        Self {
            chunks,
            entity_chunk,
        }
    }

    /// Register a group of static shapes as one chunk
    ///
    /// The broadphase bound is the union of the given shapes at call
    /// time and is never refreshed; use
    /// [`PhysicsWorld::add_chunk_unbounded`] for shapes that move. An
    /// empty list produces a chunk that no query ever visits.
    pub fn add_chunk(&mut self, shapes: Vec<ShapeRef>) -> ChunkId {
        let bounds = ChunkBounds::from_shapes(&shapes);
        let count = shapes.len();
        let id = self.chunks.insert(Chunk { shapes, bounds });
        debug!("registered chunk {id:?} with {count} shapes");
        id
    }

    /// Register a group of moving shapes as one chunk with no
    /// broadphase bound
    ///
    /// Every query scans the full shape list, trading pruning for
    /// correctness when member shapes travel.
    pub fn add_chunk_unbounded(&mut self, shapes: Vec<ShapeRef>) -> ChunkId {
        let count = shapes.len();
        let id = self.chunks.insert(Chunk {
            shapes,
            bounds: ChunkBounds::Unbounded,
        });
        debug!("registered unbounded chunk {id:?} with {count} shapes");
        id
    }

    /// Remove a chunk and drop its shape list
    ///
    /// Removing an already-removed chunk is a silent no-op, mirroring
    /// the tolerant unload-what's-loaded level lifecycle. The entity
    /// shape registry cannot be removed.
    pub fn remove_chunk(&mut self, id: ChunkId) {
        if id == self.entity_chunk {
            debug!("ignoring removal of the entity shape registry");
            return;
        }
        if self.chunks.remove(id).is_none() {
            debug!("ignoring removal of unknown chunk {id:?}");
        }
    }

    /// Number of registered chunks, including the entity registry
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Add a shape to the persistent entity registry
    ///
    /// Registry shapes survive level streaming; this is where the
    /// player and other cross-level movers live.
    pub fn register_entity_shape(&mut self, shape: ShapeRef) {
        if let Some(chunk) = self.chunks.get_mut(self.entity_chunk) {
            chunk.shapes.push(shape);
        }
    }

    /// Remove a shape from the persistent entity registry
    ///
    /// Matches by handle identity. Returns whether a shape was removed,
    /// so callers can keep their own bookkeeping honest.
    pub fn unregister_entity_shape(&mut self, shape: &ShapeRef) -> bool {
        let Some(chunk) = self.chunks.get_mut(self.entity_chunk) else {
            return false;
        };
        if let Some(index) = chunk.shapes.iter().position(|s| Rc::ptr_eq(s, shape)) {
            chunk.shapes.remove(index);
            true
        } else {
            false
        }
    }

    /// Number of shapes currently in the entity registry
    #[must_use]
    pub fn entity_shape_count(&self) -> usize {
        self.chunks
            .get(self.entity_chunk)
            .map_or(0, |chunk| chunk.shapes.len())
    }

    /// Invoke `callback` for every shape containing the point and
    /// matching the mask
    pub fn point_all<F: FnMut(&ShapeRef)>(&self, p: Point2, mask: CollisionMask, mut callback: F) {
        for chunk in self.chunks.values() {
            if !chunk.bounds.contains_point(p) {
                continue;
            }
            for shape in &chunk.shapes {
                let hit = {
                    let s = shape.borrow();
                    s.mask.matches(mask) && point_in_rect(&s.rect, p)
                };
                if hit {
                    callback(shape);
                }
            }
        }
    }

    /// First shape containing the point and matching the mask, if any
    #[must_use]
    pub fn point_any(&self, p: Point2, mask: CollisionMask) -> Option<ShapeRef> {
        for chunk in self.chunks.values() {
            if !chunk.bounds.contains_point(p) {
                continue;
            }
            for shape in &chunk.shapes {
                let s = shape.borrow();
                if s.mask.matches(mask) && point_in_rect(&s.rect, p) {
                    drop(s);
                    return Some(Rc::clone(shape));
                }
            }
        }
        None
    }

    /// Invoke `callback` for every shape overlapping the rectangle and
    /// matching the mask
    pub fn overlap_all<F: FnMut(&ShapeRef)>(
        &self,
        rect: &Rect,
        mask: CollisionMask,
        mut callback: F,
    ) {
        let span = Span::from_rect(rect);
        for chunk in self.chunks.values() {
            if !chunk.bounds.overlaps_span(&span) {
                continue;
            }
            for shape in &chunk.shapes {
                let hit = {
                    let s = shape.borrow();
                    s.mask.matches(mask) && rects_overlap_default(rect, &s.rect)
                };
                if hit {
                    callback(shape);
                }
            }
        }
    }

    /// First shape overlapping the rectangle and matching the mask, if
    /// any
    #[must_use]
    pub fn overlap_any(&self, rect: &Rect, mask: CollisionMask) -> Option<ShapeRef> {
        let span = Span::from_rect(rect);
        for chunk in self.chunks.values() {
            if !chunk.bounds.overlaps_span(&span) {
                continue;
            }
            for shape in &chunk.shapes {
                let s = shape.borrow();
                if s.mask.matches(mask) && rects_overlap_default(rect, &s.rect) {
                    drop(s);
                    return Some(Rc::clone(shape));
                }
            }
        }
        None
    }

    /// Invoke `callback` for every shape the segment crosses
    pub fn raycast_all<F: FnMut(&ShapeRef)>(
        &self,
        p1: Point2,
        p2: Point2,
        mask: CollisionMask,
        mut callback: F,
    ) {
        let span = Span::from_segment(p1, p2);
        for chunk in self.chunks.values() {
            if !chunk.bounds.overlaps_span(&span) {
                continue;
            }
            for shape in &chunk.shapes {
                let hit = {
                    let s = shape.borrow();
                    s.mask.matches(mask)
                        && span.overlaps_rect(&s.rect)
                        && segment_intersects_rect(p1, p2, &s.rect)
                };
                if hit {
                    callback(shape);
                }
            }
        }
    }

    /// First shape the segment crosses, if any
    ///
    /// "First" means first in scan order, not nearest; use
    /// [`PhysicsWorld::raycast_closest`] for line-of-sight endpoints.
    #[must_use]
    pub fn raycast_any(&self, p1: Point2, p2: Point2, mask: CollisionMask) -> Option<ShapeRef> {
        let span = Span::from_segment(p1, p2);
        for chunk in self.chunks.values() {
            if !chunk.bounds.overlaps_span(&span) {
                continue;
            }
            for shape in &chunk.shapes {
                let s = shape.borrow();
                if s.mask.matches(mask)
                    && span.overlaps_rect(&s.rect)
                    && segment_intersects_rect(p1, p2, &s.rect)
                {
                    drop(s);
                    return Some(Rc::clone(shape));
                }
            }
        }
        None
    }

    /// Nearest intersection of the segment with any matching shape
    ///
    /// Candidates are pruned like [`PhysicsWorld::raycast_all`], then
    /// ranked by squared distance from `p1` to their entry point.
    #[must_use]
    pub fn raycast_closest(
        &self,
        p1: Point2,
        p2: Point2,
        mask: CollisionMask,
    ) -> Option<RaycastHit> {
        let span = Span::from_segment(p1, p2);
        let mut closest: Option<RaycastHit> = None;

        for chunk in self.chunks.values() {
            if !chunk.bounds.overlaps_span(&span) {
                continue;
            }
            for shape in &chunk.shapes {
                let entry = {
                    let s = shape.borrow();
                    if s.mask.matches(mask) && span.overlaps_rect(&s.rect) {
                        segment_rect_entry_point(p1, p2, &s.rect)
                    } else {
                        None
                    }
                };
                if let Some((point, distance_sq)) = entry {
                    let nearer = closest
                        .as_ref()
                        .map_or(true, |best| distance_sq < best.distance_sq);
                    if nearer {
                        closest = Some(RaycastHit {
                            point,
                            distance_sq,
                            shape: Rc::clone(shape),
                        });
                    }
                }
            }
        }

        closest
    }

    /// Resolve a horizontal move for the given rectangle
    ///
    /// See [`PhysicsWorld::move_x_with`] for the filtered variant.
    #[must_use]
    pub fn move_x(&self, rect: Rect, mask: CollisionMask, offset: f32) -> MoveResult {
        self.resolve_move_x(rect, mask, offset, None)
    }

    /// Resolve a horizontal move with a shape filter
    ///
    /// The filter narrows which candidate shapes block this particular
    /// move; shapes it rejects are passed through as if unmatched.
    #[must_use]
    pub fn move_x_with<F: Fn(&Shape) -> bool>(
        &self,
        rect: Rect,
        mask: CollisionMask,
        offset: f32,
        filter: F,
    ) -> MoveResult {
        self.resolve_move_x(rect, mask, offset, Some(&filter))
    }

    /// Resolve a vertical move for the given rectangle
    #[must_use]
    pub fn move_y(&self, rect: Rect, mask: CollisionMask, offset: f32) -> MoveResult {
        self.resolve_move_y(rect, mask, offset, None)
    }

    /// Resolve a vertical move with a shape filter
    ///
    /// One-way platforms live entirely in this filter: a platform mask
    /// only blocks when the platform's top edge is at or below the
    /// mover's reference point, so a jump from below passes through.
    #[must_use]
    pub fn move_y_with<F: Fn(&Shape) -> bool>(
        &self,
        rect: Rect,
        mask: CollisionMask,
        offset: f32,
        filter: F,
    ) -> MoveResult {
        self.resolve_move_y(rect, mask, offset, Some(&filter))
    }

    fn resolve_move_x(
        &self,
        rect: Rect,
        mask: CollisionMask,
        offset: f32,
        filter: Option<&dyn Fn(&Shape) -> bool>,
    ) -> MoveResult {
        let mut result = MoveResult::unobstructed(offset);

        // Broadphase rect swept backward/forward over the full offset.
        let broad = Rect {
            x: rect.x - (-offset).max(0.0),
            y: rect.y,
            width: rect.width + offset.abs(),
            height: rect.height,
        };

        self.overlap_all(&broad, mask, |shape_ref| {
            // Re-test against the span tightened by earlier candidates,
            // so a farther shape can never loosen an existing clamp.
            let tightened = Rect {
                x: rect.x - (-result.offset).max(0.0),
                y: rect.y,
                width: rect.width + result.offset.abs(),
                height: rect.height,
            };
            let clamp = {
                let s = shape_ref.borrow();
                if rects_overlap_default(&tightened, &s.rect)
                    && filter.map_or(true, |f| f(&s))
                {
                    // Travel direction from which side of the obstacle
                    // the un-offset position falls on, not the offset
                    // sign: a mover already inside a sensor region
                    // still resolves consistently.
                    if rect.x < s.rect.x {
                        Some((false, true, s.rect.x - rect.right()))
                    } else {
                        Some((true, false, s.rect.right() - rect.x))
                    }
                } else {
                    None
                }
            };
            if let Some((negative, positive, clamped)) = clamp {
                result.blocked_negative = negative;
                result.blocked_positive = positive;
                result.offset = clamped;
                result.shape = Some(Rc::clone(shape_ref));
            }
        });

        result
    }

    fn resolve_move_y(
        &self,
        rect: Rect,
        mask: CollisionMask,
        offset: f32,
        filter: Option<&dyn Fn(&Shape) -> bool>,
    ) -> MoveResult {
        let mut result = MoveResult::unobstructed(offset);

        let broad = Rect {
            x: rect.x,
            y: rect.y - (-offset).max(0.0),
            width: rect.width,
            height: rect.height + offset.abs(),
        };

        self.overlap_all(&broad, mask, |shape_ref| {
            let tightened = Rect {
                x: rect.x,
                y: rect.y - (-result.offset).max(0.0),
                width: rect.width,
                height: rect.height + result.offset.abs(),
            };
            let clamp = {
                let s = shape_ref.borrow();
                if rects_overlap_default(&tightened, &s.rect)
                    && filter.map_or(true, |f| f(&s))
                {
                    if rect.y < s.rect.y {
                        Some((false, true, s.rect.y - rect.bottom()))
                    } else {
                        Some((true, false, s.rect.bottom() - rect.y))
                    }
                } else {
                    None
                }
            };
            if let Some((negative, positive, clamped)) = clamp {
                result.blocked_negative = negative;
                result.blocked_positive = positive;
                result.offset = clamped;
                result.shape = Some(Rc::clone(shape_ref));
            }
        });

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn env_shape(x: f32, y: f32, w: f32, h: f32) -> ShapeRef {
        Shape::shared(Rect::new(x, y, w, h), CollisionMask::ENVIRONMENT)
    }

    #[test]
    fn test_empty_world_matches_nothing() {
        let world = PhysicsWorld::new();
        assert!(world.point_any(Point2::new(0.0, 0.0), CollisionMask::all()).is_none());
        assert!(world
            .overlap_any(&Rect::new(0.0, 0.0, 10.0, 10.0), CollisionMask::all())
            .is_none());
        let result = world.move_x(Rect::new(0.0, 0.0, 10.0, 10.0), CollisionMask::all(), 5.0);
        assert_relative_eq!(result.offset, 5.0);
        assert!(!result.blocked_positive && !result.blocked_negative);
    }

    #[test]
    fn test_chunk_add_remove_visibility() {
        let mut world = PhysicsWorld::new();
        let chunk = world.add_chunk(vec![env_shape(0.0, 0.0, 10.0, 10.0)]);

        let probe = Point2::new(5.0, 5.0);
        assert!(world.point_any(probe, CollisionMask::ENVIRONMENT).is_some());

        world.remove_chunk(chunk);
        assert!(world.point_any(probe, CollisionMask::ENVIRONMENT).is_none());

        // Second removal of the same handle is a safe no-op.
        world.remove_chunk(chunk);
        assert_eq!(world.chunk_count(), 1); // entity registry remains
    }

    #[test]
    fn test_entity_registry_visible_from_birth() {
        let mut world = PhysicsWorld::new();
        let shape = env_shape(0.0, 0.0, 10.0, 10.0);
        world.register_entity_shape(Rc::clone(&shape));

        // No ChunkId for the registry is ever handed out; its shapes
        // are reachable through ordinary queries alone.
        assert!(world
            .point_any(Point2::new(5.0, 5.0), CollisionMask::ENVIRONMENT)
            .is_some());
        assert_eq!(world.entity_shape_count(), 1);
    }

    #[test]
    fn test_entity_registry_register_unregister() {
        let mut world = PhysicsWorld::new();
        let shape = env_shape(100.0, 100.0, 8.0, 8.0);
        world.register_entity_shape(Rc::clone(&shape));

        // Appended after world creation yet visible: the registry chunk
        // is unbounded.
        assert!(world
            .point_any(Point2::new(104.0, 104.0), CollisionMask::ENVIRONMENT)
            .is_some());

        assert!(world.unregister_entity_shape(&shape));
        assert!(!world.unregister_entity_shape(&shape));
        assert_eq!(world.entity_shape_count(), 0);
        assert!(world
            .point_any(Point2::new(104.0, 104.0), CollisionMask::ENVIRONMENT)
            .is_none());
    }

    #[test]
    fn test_mask_gating_through_queries() {
        let mut world = PhysicsWorld::new();
        let shape = Shape::shared(Rect::new(0.0, 0.0, 10.0, 10.0), CollisionMask::ENVIRONMENT);
        world.add_chunk(vec![shape]);

        let probe = Point2::new(5.0, 5.0);
        assert!(world
            .point_any(probe, CollisionMask::ENVIRONMENT | CollisionMask::PLATFORM)
            .is_some());
        assert!(world.point_any(probe, CollisionMask::PLATFORM).is_none());
        assert!(world.point_any(probe, CollisionMask::NONE).is_none());
    }

    #[test]
    fn test_none_masked_shape_invisible() {
        let mut world = PhysicsWorld::new();
        let shape = Shape::shared(Rect::new(0.0, 0.0, 10.0, 10.0), CollisionMask::ENVIRONMENT);
        world.add_chunk(vec![Rc::clone(&shape)]);

        // Deactivate in place, as a broken breakable tile would.
        shape.borrow_mut().mask = CollisionMask::NONE;
        assert!(world
            .point_any(Point2::new(5.0, 5.0), CollisionMask::all())
            .is_none());
    }

    #[test]
    fn test_empty_chunk_prunes_everything() {
        let mut world = PhysicsWorld::new();
        let chunk = world.add_chunk(Vec::new());
        assert!(world
            .point_any(Point2::new(0.0, 0.0), CollisionMask::all())
            .is_none());
        world.remove_chunk(chunk);
    }

    #[test]
    fn test_stale_cached_bounds_miss_moved_shape() {
        // Pins the documented approximation: a cached chunk bound is
        // computed once, so a shape that travels outside it is
        // invisible to queries.
        let mut world = PhysicsWorld::new();
        let wanderer = env_shape(0.0, 0.0, 10.0, 10.0);
        world.add_chunk(vec![Rc::clone(&wanderer)]);

        wanderer.borrow_mut().rect.x = 1000.0;
        assert!(world
            .point_any(Point2::new(1005.0, 5.0), CollisionMask::ENVIRONMENT)
            .is_none());
    }

    #[test]
    fn test_unbounded_chunk_tracks_moved_shape() {
        let mut world = PhysicsWorld::new();
        let wanderer = env_shape(0.0, 0.0, 10.0, 10.0);
        world.add_chunk_unbounded(vec![Rc::clone(&wanderer)]);

        wanderer.borrow_mut().rect.x = 1000.0;
        assert!(world
            .point_any(Point2::new(1005.0, 5.0), CollisionMask::ENVIRONMENT)
            .is_some());
    }

    #[test]
    fn test_overlap_all_collects_matches() {
        let mut world = PhysicsWorld::new();
        world.add_chunk(vec![
            env_shape(0.0, 0.0, 10.0, 10.0),
            env_shape(20.0, 0.0, 10.0, 10.0),
            Shape::shared(Rect::new(5.0, 0.0, 10.0, 10.0), CollisionMask::SPIKES),
        ]);

        let mut hits = 0;
        world.overlap_all(
            &Rect::new(-5.0, 0.0, 40.0, 10.0),
            CollisionMask::ENVIRONMENT,
            |_| hits += 1,
        );
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_raycast_any_line_of_sight() {
        let mut world = PhysicsWorld::new();
        world.add_chunk(vec![env_shape(40.0, -10.0, 10.0, 40.0)]);

        // Wall between origin and target.
        assert!(world
            .raycast_any(
                Point2::new(0.0, 5.0),
                Point2::new(100.0, 5.0),
                CollisionMask::ENVIRONMENT
            )
            .is_some());
        // Segment stopping short of the wall.
        assert!(world
            .raycast_any(
                Point2::new(0.0, 5.0),
                Point2::new(30.0, 5.0),
                CollisionMask::ENVIRONMENT
            )
            .is_none());
        // Wrong mask sees nothing.
        assert!(world
            .raycast_any(
                Point2::new(0.0, 5.0),
                Point2::new(100.0, 5.0),
                CollisionMask::ENEMIES
            )
            .is_none());
    }

    #[test]
    fn test_raycast_closest_picks_near_shape() {
        let mut world = PhysicsWorld::new();
        let near = env_shape(30.0, 0.0, 10.0, 10.0);
        let far = env_shape(60.0, 0.0, 10.0, 10.0);
        world.add_chunk(vec![Rc::clone(&far), Rc::clone(&near)]);

        let hit = world
            .raycast_closest(
                Point2::new(0.0, 5.0),
                Point2::new(100.0, 5.0),
                CollisionMask::ENVIRONMENT,
            )
            .unwrap();
        assert!(Rc::ptr_eq(&hit.shape, &near));
        assert_relative_eq!(hit.point.x, 30.0);
        assert_relative_eq!(hit.point.y, 5.0);
        assert_relative_eq!(hit.distance_sq, 900.0);
    }

    #[test]
    fn test_move_x_clamps_never_overshoots() {
        let mut world = PhysicsWorld::new();
        world.add_chunk(vec![env_shape(20.0, 0.0, 10.0, 16.0)]);

        let mover = Rect::new(0.0, 0.0, 12.0, 16.0);
        let result = world.move_x(mover, CollisionMask::ENVIRONMENT, 20.0);
        assert!(result.blocked_positive);
        assert!(!result.blocked_negative);
        // Clamped to exactly touch: 20 - (0 + 12) = 8.
        assert_relative_eq!(result.offset, 8.0);
        assert!(result.shape.is_some());

        // Translated mover touches the obstacle without penetrating.
        let moved = mover.translated(result.offset, 0.0);
        assert_relative_eq!(moved.right(), 20.0);
    }

    #[test]
    fn test_move_x_negative_direction() {
        let mut world = PhysicsWorld::new();
        world.add_chunk(vec![env_shape(-30.0, 0.0, 10.0, 16.0)]);

        let mover = Rect::new(0.0, 0.0, 12.0, 16.0);
        let result = world.move_x(mover, CollisionMask::ENVIRONMENT, -50.0);
        assert!(result.blocked_negative);
        assert!(!result.blocked_positive);
        // Clamped to the obstacle's far edge: -20 - 0 = -20.
        assert_relative_eq!(result.offset, -20.0);
    }

    #[test]
    fn test_move_x_unobstructed_passes_through() {
        let mut world = PhysicsWorld::new();
        world.add_chunk(vec![env_shape(100.0, 0.0, 10.0, 16.0)]);

        let result = world.move_x(Rect::new(0.0, 0.0, 12.0, 16.0), CollisionMask::ENVIRONMENT, 5.0);
        assert_relative_eq!(result.offset, 5.0);
        assert!(!result.blocked_positive && !result.blocked_negative);
        assert!(result.shape.is_none());
    }

    #[test]
    fn test_move_y_already_touching_ground() {
        // Mover resting flush on the ground, gravity step down.
        let mut world = PhysicsWorld::new();
        world.add_chunk(vec![env_shape(-100.0, 16.0, 200.0, 16.0)]);

        let mover = Rect::new(0.0, 0.0, 12.0, 16.0);
        let result = world.move_y(mover, CollisionMask::ENVIRONMENT, 50.0 / 60.0);
        assert!(result.blocked_positive);
        assert!(!result.blocked_negative);
        assert_relative_eq!(result.offset, 0.0);
    }

    #[test]
    fn test_move_y_tightens_to_nearest_of_two() {
        let mut world = PhysicsWorld::new();
        // Farther floor first in the list; the nearer one must win.
        world.add_chunk(vec![
            env_shape(0.0, 40.0, 12.0, 10.0),
            env_shape(0.0, 24.0, 12.0, 10.0),
        ]);

        let mover = Rect::new(0.0, 0.0, 12.0, 16.0);
        let result = world.move_y(mover, CollisionMask::ENVIRONMENT, 100.0);
        assert!(result.blocked_positive);
        assert_relative_eq!(result.offset, 8.0);
    }

    #[test]
    fn test_move_y_one_way_platform_filter() {
        let mut world = PhysicsWorld::new();
        let platform = Shape::shared(Rect::new(-10.0, 16.0, 40.0, 4.0), CollisionMask::PLATFORM);
        world.add_chunk(vec![platform]);

        let mover = Rect::new(0.0, 0.0, 12.0, 16.0);
        let mask = CollisionMask::ENVIRONMENT | CollisionMask::PLATFORM;
        let reference_y = mover.y;

        // Falling from above: the platform's top edge is below the
        // mover's reference point, so it blocks.
        let falling = world.move_y_with(mover, mask, 10.0, |shape| {
            if shape.mask.matches(CollisionMask::PLATFORM) {
                shape.rect.y > reference_y - EPSILON
            } else {
                true
            }
        });
        assert!(falling.blocked_positive);
        assert_relative_eq!(falling.offset, 0.0);

        // Jumping up through it from below passes.
        let below = Rect::new(0.0, 24.0, 12.0, 16.0);
        let below_reference_y = below.y;
        let jumping = world.move_y_with(below, mask, -20.0, |shape| {
            if shape.mask.matches(CollisionMask::PLATFORM) {
                shape.rect.y > below_reference_y - EPSILON
            } else {
                true
            }
        });
        assert!(!jumping.blocked_negative);
        assert_relative_eq!(jumping.offset, -20.0);
    }

    #[test]
    fn test_move_with_empty_mask_is_free() {
        let mut world = PhysicsWorld::new();
        world.add_chunk(vec![env_shape(0.0, 20.0, 100.0, 10.0)]);

        let result = world.move_y(Rect::new(0.0, 0.0, 12.0, 16.0), CollisionMask::NONE, 50.0);
        assert_relative_eq!(result.offset, 50.0);
        assert!(!result.blocked_positive);
    }
}
