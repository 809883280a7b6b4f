//! In-memory world that implements every magic-core collaborator.
//!
//! The sandbox models maps, rectangular grids with unit tiles, and free
//! entities parented to a grid or a map. Grids are axis aligned; a grid's
//! local frame is its origin on the map. Side effects that a real engine would
//! simulate (projectile flight, audio, chat) are recorded in [`SandboxLog`]
//! instead.

mod blueprint;
mod do_after;
mod services;
mod spatial;
mod store;

pub use blueprint::Blueprint;
pub use do_after::PendingDoAfter;

use std::collections::{BTreeMap, BTreeSet};

use magic_core::{
    Angle, BlueprintId, ChatChannel, Component, ComponentKind, DoAfterCompletion, DoorState,
    EntityCoordinates, EntityId, MapCoordinates, MapId, SoundSpecifier, SpellId, Tick,
    TileIndex, Transforms, Vector2, WorldError,
};

/// Seconds of simulated time per sandbox tick.
pub const SECONDS_PER_TICK: f32 = 1.0;

/// Speed given to launched projectiles, in world units per second.
pub const PROJECTILE_SPEED: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    Map(MapId),
    Grid(MapId),
    Object,
}

#[derive(Clone, Debug)]
pub(crate) struct EntityRecord {
    pub role: Role,
    pub blueprint: Option<BlueprintId>,
    pub coordinates: EntityCoordinates,
    pub rotation: Angle,
    pub velocity: Vector2,
    pub components: BTreeMap<ComponentKind, Component>,
    /// Seconds since spawn.
    pub age: f32,
}

impl EntityRecord {
    fn new(role: Role, coordinates: EntityCoordinates) -> Self {
        Self {
            role,
            blueprint: None,
            coordinates,
            rotation: Angle::default(),
            velocity: Vector2::ZERO,
            components: BTreeMap::new(),
            age: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatLine {
    pub speaker: EntityId,
    pub message: String,
    pub channel: ChatChannel,
    pub hide_in_log: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayedSound {
    pub sound: SoundSpecifier,
    pub source: EntityId,
    pub volume: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Launch {
    pub projectile: EntityId,
    pub direction: Vector2,
    pub inherited_velocity: Vector2,
    pub shooter: EntityId,
}

/// Side effects the sandbox does not simulate.
#[derive(Clone, Debug, Default)]
pub struct SandboxLog {
    pub chat: Vec<ChatLine>,
    pub sounds: Vec<PlayedSound>,
    pub impulses: Vec<(EntityId, Vector2)>,
    pub launches: Vec<Launch>,
}

#[derive(Clone, Debug, Default)]
pub struct SandboxWorld {
    next_entity: u32,
    maps: BTreeMap<MapId, EntityId>,
    grids: BTreeMap<EntityId, BTreeSet<TileIndex>>,
    pub(crate) entities: BTreeMap<EntityId, EntityRecord>,
    blueprints: BTreeMap<BlueprintId, Blueprint>,
    localization: BTreeMap<String, String>,
    hands_full: BTreeSet<EntityId>,
    pub(crate) do_afters: Vec<PendingDoAfter>,
    pub(crate) next_do_after: u64,
    pub(crate) finished: Vec<DoAfterCompletion>,
    known_spells: BTreeMap<EntityId, BTreeSet<SpellId>>,
    now: Tick,
    mutations: u64,
    log: SandboxLog,
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    pub(crate) fn touch(&mut self) {
        self.mutations += 1;
    }

    pub(crate) fn record(&self, entity: EntityId) -> Result<&EntityRecord, WorldError> {
        self.entities
            .get(&entity)
            .ok_or(WorldError::EntityNotFound(entity))
    }

    pub(crate) fn record_mut(&mut self, entity: EntityId) -> Result<&mut EntityRecord, WorldError> {
        self.entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))
    }

    // ------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------

    /// Creates a map and returns its map entity. Re-adding a map returns the
    /// existing entity.
    pub fn add_map(&mut self, map: MapId) -> EntityId {
        if let Some(entity) = self.maps.get(&map) {
            return *entity;
        }

        let entity = self.allocate();
        let coordinates = EntityCoordinates::new(EntityId::INVALID, Vector2::ZERO);
        self.entities
            .insert(entity, EntityRecord::new(Role::Map(map), coordinates));
        self.maps.insert(map, entity);
        entity
    }

    /// Creates a `width` x `height` grid whose tile (0, 0) starts at `origin`
    /// on `map`.
    pub fn add_grid(
        &mut self,
        map: MapId,
        origin: Vector2,
        width: i32,
        height: i32,
    ) -> Result<EntityId, WorldError> {
        let map_entity = *self.maps.get(&map).ok_or(WorldError::MapNotFound(map))?;

        let entity = self.allocate();
        let coordinates = EntityCoordinates::new(map_entity, origin);
        self.entities
            .insert(entity, EntityRecord::new(Role::Grid(map), coordinates));

        let tiles = (0..width)
            .flat_map(|x| (0..height).map(move |y| TileIndex::new(x, y)))
            .collect();
        self.grids.insert(entity, tiles);
        Ok(entity)
    }

    /// Knocks a hole in a grid.
    pub fn remove_tile(&mut self, grid: EntityId, tile: TileIndex) -> bool {
        self.grids
            .get_mut(&grid)
            .is_some_and(|tiles| tiles.remove(&tile))
    }

    pub fn register_blueprint(&mut self, id: impl Into<String>, blueprint: Blueprint) {
        self.blueprints.insert(BlueprintId::new(id), blueprint);
    }

    pub fn add_localization(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.localization.insert(key.into(), text.into());
    }

    pub fn set_rotation(&mut self, entity: EntityId, rotation: Angle) -> Result<(), WorldError> {
        self.record_mut(entity)?.rotation = rotation;
        Ok(())
    }

    pub fn set_velocity(&mut self, entity: EntityId, velocity: Vector2) -> Result<(), WorldError> {
        self.record_mut(entity)?.velocity = velocity;
        Ok(())
    }

    /// Marks `entity` as having no free hand.
    pub fn set_hands_full(&mut self, entity: EntityId, full: bool) {
        if full {
            self.hands_full.insert(entity);
        } else {
            self.hands_full.remove(&entity);
        }
    }

    pub(crate) fn has_free_hand(&self, entity: EntityId) -> bool {
        !self.hands_full.contains(&entity)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn now(&self) -> Tick {
        self.now
    }

    /// Number of world mutations performed so far.
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    pub fn log(&self) -> &SandboxLog {
        &self.log
    }

    pub(crate) fn log_mut(&mut self) -> &mut SandboxLog {
        &mut self.log
    }

    pub fn map_entity_of(&self, map: MapId) -> Option<EntityId> {
        self.maps.get(&map).copied()
    }

    pub(crate) fn grid_tiles(&self, grid: EntityId) -> Option<&BTreeSet<TileIndex>> {
        self.grids.get(&grid)
    }

    pub(crate) fn grids_on(&self, map: MapId) -> impl Iterator<Item = EntityId> + '_ {
        self.grids.keys().copied().filter(move |grid| {
            self.entities
                .get(grid)
                .is_some_and(|record| record.role == Role::Grid(map))
        })
    }

    pub(crate) fn blueprint(&self, id: &BlueprintId) -> Option<&Blueprint> {
        self.blueprints.get(id)
    }

    pub(crate) fn localized(&self, key: &str) -> Option<&str> {
        self.localization.get(key).map(String::as_str)
    }

    /// Absolute position of `entity`, if it exists and is placed.
    pub fn map_position(&self, entity: EntityId) -> Option<MapCoordinates> {
        let record = self.entities.get(&entity)?;
        self.to_map(record.coordinates).ok()
    }

    pub fn coordinates(&self, entity: EntityId) -> Option<EntityCoordinates> {
        self.entities.get(&entity).map(|record| record.coordinates)
    }

    pub fn velocity(&self, entity: EntityId) -> Option<Vector2> {
        self.entities.get(&entity).map(|record| record.velocity)
    }

    pub fn blueprint_of(&self, entity: EntityId) -> Option<&BlueprintId> {
        self.entities.get(&entity)?.blueprint.as_ref()
    }

    pub fn door_state(&self, entity: EntityId) -> Option<DoorState> {
        match self.entities.get(&entity)?.components.get(&ComponentKind::Door)? {
            Component::Door { state } => Some(*state),
            _ => None,
        }
    }

    /// Non-map, non-grid entities.
    pub fn objects(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .filter(|(_, record)| record.role == Role::Object)
            .map(|(id, _)| *id)
    }

    pub fn known_spells(&self, entity: EntityId) -> Vec<SpellId> {
        self.known_spells
            .get(&entity)
            .map(|spells| spells.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn known_spells_mut(&mut self, entity: EntityId) -> &mut BTreeSet<SpellId> {
        self.known_spells.entry(entity).or_default()
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Advances time by `ticks`.
    ///
    /// Doors that were opening finish opening, entities with an elapsed
    /// [`Component::TimedDespawn`] are deleted, and do-afters that ran their
    /// course complete. Returns the despawned entities.
    pub fn tick(&mut self, ticks: u64) -> Vec<EntityId> {
        self.now = self.now + ticks;
        let elapsed = ticks as f32 * SECONDS_PER_TICK;

        let mut expired = Vec::new();
        for (id, record) in self.entities.iter_mut() {
            record.age += elapsed;

            if let Some(Component::Door { state }) = record.components.get_mut(&ComponentKind::Door)
                && *state == DoorState::Opening
            {
                *state = DoorState::Open;
            }

            if let Some(Component::TimedDespawn { lifetime }) =
                record.components.get(&ComponentKind::TimedDespawn)
                && record.age >= *lifetime
            {
                expired.push(*id);
            }
        }

        expired.retain(|id| match self.remove_object(*id) {
            Ok(()) => {
                tracing::trace!(entity = %id, "timed despawn");
                true
            }
            Err(error) => {
                tracing::warn!(entity = %id, %error, "timed despawn failed");
                false
            }
        });

        self.finish_do_afters();
        expired
    }
}
