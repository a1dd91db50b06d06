//! Physics and spatial query core
//!
//! The physics core is a registry of collidable shapes grouped into
//! chunks, plus the query and movement-resolution primitives every
//! entity behavior is built from. It holds no temporal state: all
//! velocities and timers live in the entities that call into it.

pub mod geometry;
pub mod mask;
pub mod shape;
pub mod world;

pub use geometry::Rect;
pub use mask::CollisionMask;
pub use shape::{MoveResult, Shape, ShapeRef};
pub use world::{ChunkId, PhysicsWorld, RaycastHit};
