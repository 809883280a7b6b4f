//! Blinks the performer to a point on the same map.

use crate::env::{AudioParams, World};
use crate::spell::TeleportSpell;
use crate::system::EffectError;

use super::EffectContext;

pub(crate) fn apply<W: World + ?Sized>(
    ctx: &mut EffectContext<'_, W>,
    spell: &TeleportSpell,
) -> Result<(), EffectError> {
    let performer = ctx.performer;
    let transform = ctx.world.transform(performer)?;

    let target_map = ctx.world.map_id(spell.target)?;
    if target_map != transform.map {
        tracing::debug!(
            %performer,
            from = %transform.map,
            to = %target_map,
            "cross-map teleport rejected"
        );
        ctx.report.rejected = true;
        return Ok(());
    }

    ctx.world.set_coordinates(performer, spell.target)?;
    ctx.world.attach_to_grid_or_map(performer)?;

    if let Some(sound) = &spell.sound {
        ctx.world
            .play_pvs(sound, performer, AudioParams::with_volume(spell.volume));
    }

    ctx.report.affected.push(performer);
    ctx.speak();
    Ok(())
}
