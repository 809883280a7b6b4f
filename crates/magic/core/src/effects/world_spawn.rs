//! Spawns a resolved spawn table at the clicked coordinates.
//!
//! The first entity lands on the target; each following one is shifted by
//! the spell's offset. A zero offset stacks everything on one spot.

use crate::env::World;
use crate::spawn::resolve_spawns;
use crate::spell::WorldSpawnSpell;
use crate::state::Component;
use crate::system::EffectError;

use super::EffectContext;

pub(crate) fn apply<W: World + ?Sized>(
    ctx: &mut EffectContext<'_, W>,
    spell: &WorldSpawnSpell,
) -> Result<(), EffectError> {
    let blueprints = resolve_spawns(&spell.contents, &mut ctx.rng);

    let mut at = spell.target;
    for blueprint in &blueprints {
        let entity = ctx.world.spawn(blueprint, at)?;
        at = at.offset(spell.offset);

        if let Some(lifetime) = spell.lifetime {
            ctx.world
                .add_component(entity, Component::TimedDespawn { lifetime })?;
        }

        ctx.report.spawned.push(entity);
    }

    ctx.speak();
    Ok(())
}
