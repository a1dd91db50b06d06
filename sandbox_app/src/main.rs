//! Headless sandbox exercising the platform engine
//!
//! Drops a player-sized mover onto a streamed-in level chunk with a
//! one-way platform above the ground, runs a few seconds of fixed
//! ticks, and logs what the collision world reports. No rendering, no
//! input; this is the movement contract end to end.

use log::info;
use platform_engine::foundation::math::EPSILON;
use platform_engine::prelude::*;
use std::rc::Rc;

/// A minimal mover following the per-tick movement contract
struct Player {
    x: f32,
    y: f32,
    velocity_y: f32,
    shape: ShapeRef,
    grounded: bool,
}

impl Player {
    const WIDTH: f32 = 12.0;
    const HEIGHT: f32 = 16.0;

    fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity_y: 0.0,
            shape: Shape::shared(Rect::new(x, y, Self::WIDTH, Self::HEIGHT), CollisionMask::PLAYER),
            grounded: false,
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>, config: &SimulationConfig) {
        self.velocity_y += config.gravity * ctx.elapsed_time;

        let rect = self.shape.borrow().rect;
        let mask = CollisionMask::ENVIRONMENT | CollisionMask::PLATFORM;

        // Horizontal before vertical, per convention.
        let dx = config.move_speed * ctx.elapsed_time;
        let horizontal = ctx.physics.move_x(rect, CollisionMask::ENVIRONMENT, dx);
        self.x += horizontal.offset;

        let rect = Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT);
        let reference_y = self.y;
        let vertical = ctx.physics.move_y_with(
            rect,
            mask,
            self.velocity_y * ctx.elapsed_time,
            |shape| {
                // One-way platforms only block from above.
                if shape.mask.matches(CollisionMask::PLATFORM) {
                    shape.rect.y > reference_y - EPSILON
                } else {
                    true
                }
            },
        );
        self.y += vertical.offset;

        let was_grounded = self.grounded;
        self.grounded = vertical.blocked_positive;
        if self.grounded {
            self.velocity_y = 0.0;
        }
        if self.grounded && !was_grounded {
            ctx.triggers.emit("landed");
        }

        // Re-derive the registered shape from the new position.
        self.shape.borrow_mut().rect = Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT);
    }
}

fn main() {
    env_logger::init();

    let config = SimulationConfig::load_from_file("sandbox.toml").unwrap_or_default();
    if let Err(error) = config.validate() {
        eprintln!("bad sandbox config: {error}");
        std::process::exit(1);
    }

    let mut world = PhysicsWorld::new();
    let mut triggers = TriggerBus::new();
    triggers.subscribe("landed", Box::new(|| info!("player landed")));

    // One streamed-in level chunk: ground plus a one-way platform.
    let level_shapes = vec![
        Shape::shared(Rect::new(-200.0, 96.0, 400.0, 16.0), CollisionMask::ENVIRONMENT),
        Shape::shared(Rect::new(40.0, 48.0, 64.0, 4.0), CollisionMask::PLATFORM),
    ];
    let level_chunk = world.add_chunk(level_shapes);

    let mut player = Player::new(0.0, -40.0);
    world.register_entity_shape(Rc::clone(&player.shape));

    let dt = 1.0 / 60.0;
    let stopwatch = Stopwatch::start_new();
    for tick in 0..240 {
        let mut ctx = UpdateContext {
            physics: &mut world,
            triggers: &mut triggers,
            elapsed_time: dt,
        };
        player.update(&mut ctx, &config);

        if tick % 60 == 0 {
            info!(
                "t={:.2}s pos=({:.1}, {:.1}) grounded={}",
                tick as f32 * dt,
                player.x,
                player.y,
                player.grounded
            );
        }
    }

    info!(
        "done in {:.2}ms: player at ({:.1}, {:.1}), {} entity shapes, {} chunks",
        stopwatch.elapsed_secs() * 1000.0,
        player.x,
        player.y,
        world.entity_shape_count(),
        world.chunk_count()
    );

    // Stream the level back out; the player's registry shape survives.
    world.remove_chunk(level_chunk);
    assert_eq!(world.entity_shape_count(), 1);
}
