//! Sandbox arena the demo casts into.

use anyhow::Result;
use magic_content::SpellCatalog;
use magic_core::{
    Angle, BlueprintId, CastTarget, Component, Direction, DoorState, EntityCoordinates, EntityId,
    EntityStore, MapId, SpellTemplate, Vector2,
};
use runtime::{Blueprint, SandboxWorld};

const STATION: MapId = MapId(1);
const GRID_SIZE: i32 = 16;

/// A station grid with a wizard in the middle, a crate, a crew member and a
/// bolted airlock within knock range.
pub struct Arena {
    pub world: SandboxWorld,
    pub grid: EntityId,
    pub wizard: EntityId,
    pub crate_id: EntityId,
    pub crew: EntityId,
}

impl Arena {
    pub fn build(spells: &SpellCatalog) -> Result<Self> {
        let mut world = SandboxWorld::new();
        world.add_map(STATION);
        let grid = world.add_grid(STATION, Vector2::ZERO, GRID_SIZE, GRID_SIZE)?;

        register_fixtures(&mut world);
        for blueprint in referenced_blueprints(spells) {
            world.register_blueprint(blueprint.as_str(), Blueprint::new());
        }
        for (key, text) in SPEECH {
            world.add_localization(*key, *text);
        }

        let wizard = world.spawn(&BlueprintId::new("MobWizard"), tile(grid, 8, 8))?;
        world.set_rotation(wizard, Angle::from_direction(Direction::North))?;
        let crate_id = world.spawn(&BlueprintId::new("Crate"), tile(grid, 10, 8))?;
        let crew = world.spawn(&BlueprintId::new("MobHuman"), tile(grid, 6, 8))?;
        world.spawn(&BlueprintId::new("Airlock"), tile(grid, 8, 6))?;

        tracing::info!(%wizard, %grid, "arena ready");
        Ok(Self {
            world,
            grid,
            wizard,
            crate_id,
            crew,
        })
    }

    /// Picks a sensible target for `template` inside the arena.
    pub fn target_for(&self, template: &SpellTemplate) -> CastTarget {
        match template {
            SpellTemplate::InstantSpawn { .. } | SpellTemplate::Knock { .. } => CastTarget::None,
            SpellTemplate::ChangeComponents { .. } => CastTarget::Entity(self.crate_id),
            SpellTemplate::Smite { .. } => CastTarget::Entity(self.crew),
            SpellTemplate::Teleport { .. } => CastTarget::Coordinates(tile(self.grid, 12, 12)),
            SpellTemplate::Projectile { .. } | SpellTemplate::WorldSpawn { .. } => {
                CastTarget::Coordinates(tile(self.grid, 8, 14))
            }
        }
    }
}

const SPEECH: &[(&str, &str)] = &[
    ("spell-speech-forcewall", "TARCOL MINTI ZHERI!"),
    ("spell-speech-fireball", "ONI SOMA!"),
    ("spell-speech-knock", "AULIE OXIN FIERA!"),
    ("spell-speech-smite", "EI NATH!"),
    ("spell-speech-bees", "NEH'BEE!"),
];

fn tile(grid: EntityId, x: i32, y: i32) -> EntityCoordinates {
    EntityCoordinates::new(grid, Vector2::new(x as f32 + 0.5, y as f32 + 0.5))
}

fn register_fixtures(world: &mut SandboxWorld) {
    world.register_blueprint("MobWizard", Blueprint::new());
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
        "MobHuman",
        Blueprint::new()
            .with(Component::Body)
            .with_gib_parts(["OrganBrain", "OrganHeart", "LimbLeg", "ClothingJumpsuit"]),
    );
    world.register_blueprint(
        "OrganBrain",
        Blueprint::new().with(Component::BodyPart).with(Component::Brain),
    );
    world.register_blueprint("OrganHeart", Blueprint::new().with(Component::BodyPart));
    world.register_blueprint("LimbLeg", Blueprint::new().with(Component::BodyPart));
    world.register_blueprint("ClothingJumpsuit", Blueprint::new().with(Component::Clothing));
}

/// Every blueprint a catalog spell can spawn.
fn referenced_blueprints(spells: &SpellCatalog) -> Vec<BlueprintId> {
    let mut blueprints = Vec::new();
    for spell in spells.iter() {
        match &spell.effect {
            SpellTemplate::InstantSpawn { prototype, .. }
            | SpellTemplate::Projectile { prototype, .. } => blueprints.push(prototype.clone()),
            SpellTemplate::WorldSpawn { contents, .. } => blueprints.extend(
                contents
                    .iter()
                    .filter_map(|entry| entry.blueprint.clone()),
            ),
            _ => {}
        }
    }
    blueprints.sort();
    blueprints.dedup();
    blueprints
}
