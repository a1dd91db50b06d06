//! Entity kinds and the per-tick update contract
//!
//! The physics core never calls into entities; entities call into the
//! core. Each moving entity owns exactly one shape, keeps it registered
//! in a chunk for its whole lifetime, and every tick: computes a
//! velocity-based offset, resolves it with
//! [`PhysicsWorld::move_x`](crate::physics::world::PhysicsWorld::move_x)
//! then [`move_y`](crate::physics::world::PhysicsWorld::move_y)
//! (horizontal before vertical, by convention), applies the clamped
//! offsets, and re-derives its shape rectangle from its new position.

use crate::events::TriggerBus;
use crate::physics::world::PhysicsWorld;

/// Closed enumeration of gameplay entity kinds
///
/// Each kind carries fixed logic and render priorities assigned at
/// construction time, replacing any runtime type-name lookup into
/// priority tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The player character
    Player,
    /// Tile that crumbles shortly after being stood on
    BreakingTile,
    /// Invisible region that emits a named trigger on player contact
    TriggerZone,
    /// Platform patrolling between waypoints
    MovingPlatform,
    /// Platform that fades out on contact and respawns later
    DisappearingPlatform,
    /// Walking enemy
    Zombie,
    /// Flying enemy with a line-of-sight laser
    Drone,
    /// Static damaging geometry
    Spike,
    /// Generic damaging region
    Hazard,
    /// Collectible
    Coin,
    /// Respawn point
    Checkpoint,
}

impl EntityKind {
    /// Update-order priority; lower runs earlier within a tick
    ///
    /// The player resolves first so everything that reacts to the
    /// player's position sees this tick's position, not last tick's.
    #[must_use]
    pub fn logic_priority(self) -> i32 {
        match self {
            Self::Player => 0,
            Self::BreakingTile => 1,
            Self::TriggerZone => 2,
            _ => 10,
        }
    }

    /// Draw-order priority; lower draws earlier (farther back)
    #[must_use]
    pub fn render_priority(self) -> i32 {
        match self {
            Self::BreakingTile => 0,
            Self::Player => 1,
            _ => 5,
        }
    }
}

/// Sort entity indices by logic priority, preserving registration order
/// within a priority class
pub fn sort_by_logic_priority<T, F: Fn(&T) -> EntityKind>(entities: &mut [T], kind_of: F) {
    entities.sort_by_key(|entity| kind_of(entity).logic_priority());
}

/// Sort entity indices by render priority, preserving registration
/// order within a priority class
pub fn sort_by_render_priority<T, F: Fn(&T) -> EntityKind>(entities: &mut [T], kind_of: F) {
    entities.sort_by_key(|entity| kind_of(entity).render_priority());
}

/// Everything an entity needs for one update tick
///
/// Handed to entities explicitly at update time instead of letting them
/// reach through ambient global state.
pub struct UpdateContext<'a> {
    /// The collision world
    pub physics: &'a mut PhysicsWorld,
    /// The trigger bus
    pub triggers: &'a mut TriggerBus,
    /// Seconds since the previous tick, already clamped by the caller's
    /// [`Timer`](crate::foundation::time::Timer)
    pub elapsed_time: f32,
}
