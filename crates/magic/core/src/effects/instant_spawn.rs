//! Spawns a prototype on or in front of the caster.

use crate::env::World;
use crate::spatial::resolve_origins;
use crate::spell::InstantSpawnSpell;
use crate::state::Component;
use crate::system::EffectError;

use super::EffectContext;

pub(crate) fn apply<W: World + ?Sized>(
    ctx: &mut EffectContext<'_, W>,
    spell: &InstantSpawnSpell,
) -> Result<(), EffectError> {
    let caster = ctx.world.transform(ctx.performer)?;

    for origin in resolve_origins(&*ctx.world, &caster, spell.position) {
        let at = ctx.world.snap_to_grid(origin)?;
        let entity = ctx.world.spawn(&spell.prototype, at)?;

        if spell.prevent_collide_with_caster {
            ctx.world.add_component(
                entity,
                Component::PreventCollide {
                    ignored: ctx.performer,
                },
            )?;
        }

        ctx.report.spawned.push(entity);
    }

    ctx.speak();
    Ok(())
}
