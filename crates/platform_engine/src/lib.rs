//! # Platform Engine
//!
//! A 2D platformer simulation core built around a chunked AABB collision
//! world with swept-axis movement resolution.
//!
//! ## Features
//!
//! - **Chunked Broadphase**: shapes are registered in bulk as chunks that
//!   mirror level streaming granularity
//! - **Swept Movement**: per-axis move-and-clamp resolution with one-way
//!   platform filtering
//! - **Collision Masks**: bitmask categories gate every query
//! - **Point/Overlap/Raycast Queries**: the primitives every entity
//!   behavior is built from
//! - **Trigger Bus**: in-memory pub/sub for named gameplay triggers
//!
//! ## Quick Start
//!
//! ```rust
//! use platform_engine::prelude::*;
//!
//! let mut world = PhysicsWorld::new();
//!
//! // Register a level chunk with one ground shape.
//! let ground = Shape::shared(Rect::new(-100.0, 16.0, 200.0, 16.0), CollisionMask::ENVIRONMENT);
//! let chunk = world.add_chunk(vec![ground]);
//!
//! // Resolve a downward move for a 12x16 mover standing on the ground.
//! let mover = Rect::new(0.0, 0.0, 12.0, 16.0);
//! let result = world.move_y(mover, CollisionMask::ENVIRONMENT, 50.0 / 60.0);
//! assert!(result.blocked_positive);
//!
//! world.remove_chunk(chunk);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod entity;
pub mod events;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{Config, ConfigError, SimulationConfig},
        entity::{EntityKind, UpdateContext},
        events::TriggerBus,
        foundation::{
            math::{Point2, Vec2},
            time::{Stopwatch, Timer},
        },
        physics::{
            geometry::Rect,
            mask::CollisionMask,
            shape::{MoveResult, Shape, ShapeRef},
            world::{ChunkId, PhysicsWorld},
        },
    };
}
