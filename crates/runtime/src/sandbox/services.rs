//! Side-effect collaborators for the sandbox.
//!
//! Nothing here simulates flight, sound propagation or chat radio; calls are
//! applied to entity state where that is trivial and recorded otherwise.

use magic_core::{
    Audio, AudioParams, Bodies, Chat, ChatChannel, Component, ComponentKind, DoorState, Doors,
    EntityId, EntityStore, Localization, Physics, Projectiles, SoundSpecifier, Vector2,
    WorldError,
};

use super::{ChatLine, Launch, PROJECTILE_SPEED, PlayedSound, SandboxWorld};

impl Physics for SandboxWorld {
    fn map_linear_velocity(&self, entity: EntityId) -> Vector2 {
        self.velocity(entity).unwrap_or(Vector2::ZERO)
    }

    /// Bodies have unit mass.
    fn apply_linear_impulse(
        &mut self,
        entity: EntityId,
        impulse: Vector2,
    ) -> Result<(), WorldError> {
        self.record_mut(entity)?.velocity += impulse;
        self.log_mut().impulses.push((entity, impulse));
        self.touch();
        Ok(())
    }
}

impl Projectiles for SandboxWorld {
    fn shoot(
        &mut self,
        projectile: EntityId,
        direction: Vector2,
        inherited_velocity: Vector2,
        shooter: EntityId,
    ) -> Result<(), WorldError> {
        let record = self.record_mut(projectile)?;
        record.velocity = inherited_velocity + direction.normalized() * PROJECTILE_SPEED;

        self.log_mut().launches.push(Launch {
            projectile,
            direction,
            inherited_velocity,
            shooter,
        });
        self.touch();
        Ok(())
    }
}

impl Doors for SandboxWorld {
    fn set_bolts_down(&mut self, door: EntityId, bolted: bool) {
        let Ok(record) = self.record_mut(door) else {
            return;
        };

        if let Some(Component::DoorBolt { bolted: current }) =
            record.components.get_mut(&ComponentKind::DoorBolt)
            && *current != bolted
        {
            *current = bolted;
            self.touch();
        }
    }

    fn start_opening(&mut self, door: EntityId) -> bool {
        let bolted = matches!(
            self.component(door, ComponentKind::DoorBolt),
            Some(Component::DoorBolt { bolted: true })
        );
        let Ok(record) = self.record_mut(door) else {
            return false;
        };

        let Some(Component::Door { state }) = record.components.get_mut(&ComponentKind::Door)
        else {
            return false;
        };

        match *state {
            DoorState::Closed | DoorState::Closing | DoorState::Denying if !bolted => {
                *state = DoorState::Opening;
                self.touch();
                true
            }
            _ => false,
        }
    }
}

impl Bodies for SandboxWorld {
    /// Spawns the body blueprint's gib parts where the body stood, then
    /// deletes the body.
    fn gib(&mut self, body: EntityId) -> Result<Vec<EntityId>, WorldError> {
        let record = self.record(body)?;
        let at = record.coordinates;
        let parts = record
            .blueprint
            .as_ref()
            .and_then(|blueprint| self.blueprint(blueprint))
            .map(|blueprint| blueprint.gib_parts.clone())
            .unwrap_or_default();

        let mut spawned = Vec::with_capacity(parts.len());
        for part in &parts {
            spawned.push(self.spawn(part, at)?);
        }

        self.delete(body)?;
        tracing::trace!(%body, parts = spawned.len(), "gibbed");
        Ok(spawned)
    }
}

impl Audio for SandboxWorld {
    fn play_pvs(&mut self, sound: &SoundSpecifier, source: EntityId, params: AudioParams) {
        self.log_mut().sounds.push(PlayedSound {
            sound: sound.clone(),
            source,
            volume: params.volume,
        });
    }
}

impl Chat for SandboxWorld {
    fn send_in_game_message(
        &mut self,
        speaker: EntityId,
        message: &str,
        channel: ChatChannel,
        hide_in_log: bool,
    ) {
        self.log_mut().chat.push(ChatLine {
            speaker,
            message: message.to_owned(),
            channel,
            hide_in_log,
        });
    }
}

impl Localization for SandboxWorld {
    fn get_string(&self, key: &str) -> String {
        self.localized(key).unwrap_or(key).to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::Blueprint;
    use magic_core::{BlueprintId, EntityCoordinates, MapId};

    fn door_world(bolted: bool) -> (SandboxWorld, EntityId) {
        let mut world = SandboxWorld::new();
        let map = world.add_map(MapId(1));
        world.register_blueprint(
            "Airlock",
            Blueprint::new()
                .with(Component::Door {
                    state: DoorState::Closed,
                })
                .with(Component::DoorBolt { bolted }),
        );
        let door = world
            .spawn(
                &BlueprintId::new("Airlock"),
                EntityCoordinates::new(map, Vector2::ZERO),
            )
            .unwrap();
        (world, door)
    }

    #[test]
    fn bolted_door_refuses_to_open() {
        let (mut world, door) = door_world(true);
        assert!(!world.start_opening(door));
        assert_eq!(world.door_state(door), Some(DoorState::Closed));

        world.set_bolts_down(door, false);
        assert!(world.start_opening(door));
        assert_eq!(world.door_state(door), Some(DoorState::Opening));
    }

    #[test]
    fn opening_door_finishes_on_tick() {
        let (mut world, door) = door_world(false);
        world.start_opening(door);
        world.tick(1);
        assert_eq!(world.door_state(door), Some(DoorState::Open));
    }

    #[test]
    fn unknown_localization_key_echoes() {
        let mut world = SandboxWorld::new();
        world.add_localization("spell-speech-knock", "AULIE OXIN FIERA!");
        assert_eq!(world.get_string("spell-speech-knock"), "AULIE OXIN FIERA!");
        assert_eq!(world.get_string("missing"), "missing");
    }
}
