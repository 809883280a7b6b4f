//! Unbolts and opens every door around the performer.

use crate::env::{AudioParams, World};
use crate::spell::KnockSpell;
use crate::state::{Component, ComponentKind, DoorState};
use crate::system::EffectError;

use super::EffectContext;

pub(crate) fn apply<W: World + ?Sized>(
    ctx: &mut EffectContext<'_, W>,
    spell: &KnockSpell,
) -> Result<(), EffectError> {
    ctx.speak();

    let performer = ctx.performer;
    let origin = ctx.world.transform(performer)?.coordinates;

    if let Some(sound) = &spell.sound {
        ctx.world
            .play_pvs(sound, performer, AudioParams::with_volume(spell.volume));
    }

    for entity in ctx.world.entities_in_range(origin, spell.range) {
        let mut touched = false;

        if ctx.world.has_component(entity, ComponentKind::DoorBolt) {
            ctx.world.set_bolts_down(entity, false);
            touched = true;
        }

        let door_state = match ctx.world.component(entity, ComponentKind::Door) {
            Some(Component::Door { state }) => Some(*state),
            _ => None,
        };
        if door_state.is_some_and(|state| state != DoorState::Open) {
            touched |= ctx.world.start_opening(entity);
        }

        if touched {
            ctx.report.affected.push(entity);
        }
    }

    Ok(())
}
