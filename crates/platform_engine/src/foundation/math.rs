//! Math utilities and types
//!
//! Provides the fundamental math types and scalar helpers for 2D
//! simulation code.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Default epsilon used by approximate comparisons and overlap margins
pub const EPSILON: f32 = 1e-8;

/// Linear interpolation
#[must_use]
pub fn lerp(from: f32, to: f32, factor: f32) -> f32 {
    from + (to - from) * factor
}

/// Clamp a value between min and max
#[must_use]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Magnitude of the vector (x, y)
#[must_use]
pub fn length(x: f32, y: f32) -> f32 {
    (x * x + y * y).sqrt()
}

/// Euclidean distance between two points
#[must_use]
pub fn distance(a: Point2, b: Point2) -> f32 {
    square_distance(a, b).sqrt()
}

/// Squared Euclidean distance between two points
///
/// Preferred on hot paths where only relative ordering matters.
#[must_use]
pub fn square_distance(a: Point2, b: Point2) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Approximate scalar equality with the engine-wide epsilon
#[must_use]
pub fn approx_eq(source: f32, target: f32) -> bool {
    (source - target).abs() < EPSILON
}

/// Signed minimal angular delta from `from` to `to`, in radians
///
/// Picks whichever of the clockwise/counterclockwise rotations is
/// shorter, so the result is always in `(-PI, PI]`.
#[must_use]
pub fn shortest_angle(from: f32, to: f32) -> f32 {
    use std::f32::consts::TAU;

    if to > from {
        let straight_way = to - from;
        let opposite_way = TAU - straight_way;
        if straight_way < opposite_way {
            straight_way
        } else {
            -opposite_way
        }
    } else {
        let straight_way = from - to;
        let opposite_way = TAU - straight_way;
        if straight_way < opposite_way {
            -straight_way
        } else {
            opposite_way
        }
    }
}
