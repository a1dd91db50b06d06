//! Geometric primitives for the collision core
//!
//! Pure, stateless tests over axis-aligned rectangles, points, segments
//! and circles. Every function is total over finite inputs; none of
//! them allocate.

use crate::foundation::math::{square_distance, Point2, EPSILON};

/// An axis-aligned rectangle in world-space float coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge (y grows downward, screen convention)
    pub y: f32,
    /// Horizontal extent, must be positive
    pub width: f32,
    /// Vertical extent, must be positive
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    ///
    /// Degenerate extents are a caller error; checked in debug builds
    /// only, the hot query path does not defend against them.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "degenerate rect {width}x{height}");
        Self { x, y, width, height }
    }

    /// Left edge coordinate
    #[must_use]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge coordinate
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge coordinate
    #[must_use]
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge coordinate
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Rectangle translated by the given offsets
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Exclusive-boundary point containment test
///
/// Points exactly on an edge are outside; a mover resting flush against
/// a wall must not register the wall under its own corner.
#[must_use]
pub fn point_in_rect(rect: &Rect, p: Point2) -> bool {
    p.x > rect.x && p.x < rect.right() && p.y > rect.y && p.y < rect.bottom()
}

/// Rectangle overlap test with an epsilon margin on the far edges
///
/// Rectangles whose edges touch exactly do not overlap, which keeps
/// movers resting on a surface from colliding with it every tick.
#[must_use]
pub fn rects_overlap(a: &Rect, b: &Rect, epsilon: f32) -> bool {
    a.x < b.right() - epsilon
        && a.right() - epsilon > b.x
        && a.y < b.bottom() - epsilon
        && a.bottom() - epsilon > b.y
}

/// [`rects_overlap`] with the engine-wide default epsilon
#[must_use]
pub fn rects_overlap_default(a: &Rect, b: &Rect) -> bool {
    rects_overlap(a, b, EPSILON)
}

/// Twice the signed area of the triangle (a, b, c)
///
/// Positive when c lies to the left of a->b.
fn signed_area(a: Point2, b: Point2, c: Point2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Closed-interval overlap of two 1D spans
///
/// Inclusive on both ends: an axis-aligned segment projects to a
/// degenerate span (a single value) on one axis, and that point value
/// still overlaps any interval containing it.
fn spans_overlap(mut a: f32, mut b: f32, mut c: f32, mut d: f32) -> bool {
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }
    if c > d {
        std::mem::swap(&mut c, &mut d);
    }
    a.max(c) <= b.min(d)
}

/// Segment-segment intersection test
///
/// Bounding-interval pre-check on both axes, then orientation signs:
/// the segments cross iff each straddles the line through the other.
#[must_use]
pub fn segments_intersect(p1: Point2, p2: Point2, p3: Point2, p4: Point2, epsilon: f32) -> bool {
    spans_overlap(p1.x, p2.x, p3.x, p4.x)
        && spans_overlap(p1.y, p2.y, p3.y, p4.y)
        && signed_area(p1, p2, p3) * signed_area(p1, p2, p4) < epsilon
        && signed_area(p3, p4, p1) * signed_area(p3, p4, p2) < epsilon
}

/// Segment-rectangle intersection test
///
/// Every chord of a rectangle separates one corner from the other
/// three, so it must cross one of the two diagonals; the remaining
/// case is a segment fully inside, caught by the endpoint tests.
#[must_use]
pub fn segment_intersects_rect(p1: Point2, p2: Point2, rect: &Rect) -> bool {
    let top_left = Point2::new(rect.x, rect.y);
    let top_right = Point2::new(rect.right(), rect.y);
    let bottom_left = Point2::new(rect.x, rect.bottom());
    let bottom_right = Point2::new(rect.right(), rect.bottom());

    segments_intersect(p1, p2, top_left, bottom_right, EPSILON)
        || segments_intersect(p1, p2, top_right, bottom_left, EPSILON)
        || point_in_rect(rect, p1)
        || point_in_rect(rect, p2)
}

/// Point where a segment first enters a rectangle, with the squared
/// distance from `p1`
///
/// Returns `None` when the segment misses the rectangle entirely. If
/// `p1` already lies inside, the entry point is `p1` itself at zero
/// distance. Otherwise each of the four bounding lines is intersected,
/// intersections outside the edge's extent are discarded, and the
/// survivor nearest to `p1` wins.
#[must_use]
pub fn segment_rect_entry_point(p1: Point2, p2: Point2, rect: &Rect) -> Option<(Point2, f32)> {
    if point_in_rect(rect, p1) {
        return Some((p1, 0.0));
    }

    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;

    let mut nearest: Option<(Point2, f32)> = None;
    let mut keep = |candidate: Point2| {
        let dist_sq = square_distance(p1, candidate);
        match nearest {
            Some((_, best)) if best <= dist_sq => {}
            _ => nearest = Some((candidate, dist_sq)),
        }
    };

    // Vertical bounding lines (left, right edges).
    if dx.abs() > 0.0 {
        for edge_x in [rect.x, rect.right()] {
            let t = (edge_x - p1.x) / dx;
            if (0.0..=1.0).contains(&t) {
                let y = p1.y + t * dy;
                if y >= rect.y && y <= rect.bottom() {
                    keep(Point2::new(edge_x, y));
                }
            }
        }
    }

    // Horizontal bounding lines (top, bottom edges).
    if dy.abs() > 0.0 {
        for edge_y in [rect.y, rect.bottom()] {
            let t = (edge_y - p1.y) / dy;
            if (0.0..=1.0).contains(&t) {
                let x = p1.x + t * dx;
                if x >= rect.x && x <= rect.right() {
                    keep(Point2::new(x, edge_y));
                }
            }
        }
    }

    nearest
}

/// Circle-rectangle intersection test
///
/// Clamps the circle center onto the rectangle and compares the squared
/// distance to the squared radius.
#[must_use]
pub fn circle_intersects_rect(center: Point2, radius: f32, rect: &Rect) -> bool {
    let nearest = Point2::new(
        center.x.max(rect.x).min(rect.right()),
        center.y.max(rect.y).min(rect.bottom()),
    );
    square_distance(center, nearest) <= radius * radius
}
