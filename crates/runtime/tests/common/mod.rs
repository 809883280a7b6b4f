#![allow(dead_code)]

use magic_core::{
    Angle, BlueprintId, CastEvent, Component, Direction, DoorState, EntityCoordinates, EntityId,
    EntityStore, MagicConfig, MapId, SpellEffect, Vector2,
};
use runtime::{Blueprint, SandboxWorld, SpellRuntime};

pub const STATION: MapId = MapId(1);
pub const LAVALAND: MapId = MapId(2);

/// A 10x10 grid at the origin of the station map, a second empty map, and a
/// wizard standing on tile (4, 4) facing north.
pub struct Arena {
    pub world: SandboxWorld,
    pub station: EntityId,
    pub lavaland: EntityId,
    pub grid: EntityId,
    pub wizard: EntityId,
}

impl Arena {
    pub fn new() -> Self {
        let mut world = SandboxWorld::new();
        let station = world.add_map(STATION);
        let lavaland = world.add_map(LAVALAND);
        let grid = world.add_grid(STATION, Vector2::ZERO, 10, 10).unwrap();

        register_blueprints(&mut world);
        world.add_localization("spell-speech-knock", "AULIE OXIN FIERA!");
        world.add_localization("spell-speech-smite", "EI NATH!");

        let wizard = world
            .spawn(&BlueprintId::new("MobWizard"), on_grid(grid, 4.5, 4.5))
            .unwrap();
        world
            .set_rotation(wizard, Angle::from_direction(Direction::North))
            .unwrap();

        Self {
            world,
            station,
            lavaland,
            grid,
            wizard,
        }
    }

    pub fn spawn(&mut self, blueprint: &str, x: f32, y: f32) -> EntityId {
        self.world
            .spawn(&BlueprintId::new(blueprint), on_grid(self.grid, x, y))
            .unwrap()
    }

    pub fn at(&self, x: f32, y: f32) -> EntityCoordinates {
        on_grid(self.grid, x, y)
    }

    pub fn into_runtime(self) -> (SpellRuntime, ArenaIds) {
        let ids = ArenaIds {
            station: self.station,
            lavaland: self.lavaland,
            grid: self.grid,
            wizard: self.wizard,
        };
        (SpellRuntime::new(self.world, MagicConfig::default()), ids)
    }
}

#[derive(Clone, Copy)]
pub struct ArenaIds {
    pub station: EntityId,
    pub lavaland: EntityId,
    pub grid: EntityId,
    pub wizard: EntityId,
}

pub fn on_grid(grid: EntityId, x: f32, y: f32) -> EntityCoordinates {
    EntityCoordinates::new(grid, Vector2::new(x, y))
}

pub fn cast(performer: EntityId, effect: SpellEffect) -> CastEvent {
    CastEvent::new(performer, effect)
}

fn register_blueprints(world: &mut SandboxWorld) {
    world.register_blueprint("MobWizard", Blueprint::new());
    world.register_blueprint("WallForce", Blueprint::new());
    world.register_blueprint("BulletFireball", Blueprint::new());
    world.register_blueprint("MobBee", Blueprint::new());
    world.register_blueprint("MobAngryBee", Blueprint::new());
    world.register_blueprint("Spellbook", Blueprint::new());
    world.register_blueprint(
        "Crate",
        Blueprint::new().with(Component::Flammable { fire_stacks: 1.0 }),
    );

    world.register_blueprint(
        "Airlock",
        Blueprint::new()
            .with(Component::Door {
                state: DoorState::Closed,
            })
            .with(Component::DoorBolt { bolted: true }),
    );
    world.register_blueprint(
        "WoodenDoor",
        Blueprint::new().with(Component::Door {
            state: DoorState::Closed,
        }),
    );
    world.register_blueprint(
        "OpenDoor",
        Blueprint::new().with(Component::Door {
            state: DoorState::Open,
        }),
    );

    world.register_blueprint(
        "MobHuman",
        Blueprint::new().with(Component::Body).with_gib_parts([
            "OrganBrain",
            "OrganHeart",
            "LimbArm",
            "ClothingJumpsuit",
        ]),
    );
    world.register_blueprint(
        "OrganBrain",
        Blueprint::new().with(Component::BodyPart).with(Component::Brain),
    );
    world.register_blueprint("OrganHeart", Blueprint::new().with(Component::BodyPart));
    world.register_blueprint("LimbArm", Blueprint::new().with(Component::BodyPart));
    world.register_blueprint("ClothingJumpsuit", Blueprint::new().with(Component::Clothing));
}
