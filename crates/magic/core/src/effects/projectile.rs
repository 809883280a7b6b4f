//! Fires a projectile from each origin towards the clicked coordinates.

use crate::env::World;
use crate::spatial::resolve_origins;
use crate::spell::ProjectileSpell;
use crate::state::EntityCoordinates;
use crate::system::EffectError;

use super::EffectContext;

pub(crate) fn apply<W: World + ?Sized>(
    ctx: &mut EffectContext<'_, W>,
    spell: &ProjectileSpell,
) -> Result<(), EffectError> {
    ctx.speak();

    let caster = ctx.world.transform(ctx.performer)?;
    let inherited_velocity = ctx.world.map_linear_velocity(ctx.performer);
    let target = ctx.world.to_map(spell.target)?;

    for origin in resolve_origins(&*ctx.world, &caster, spell.position) {
        // Parent to the grid under the spawn point so the projectile moves
        // with it; open space parents to the map.
        let map_position = ctx.world.to_map(origin)?;
        let spawn_at = match ctx.world.find_grid_at(map_position) {
            Some(grid) => ctx.world.with_parent(origin, grid)?,
            None => EntityCoordinates::new(
                ctx.world.map_entity(map_position.map)?,
                map_position.position,
            ),
        };

        let projectile = ctx.world.spawn(&spell.prototype, spawn_at)?;
        let direction = target.position - ctx.world.to_map(spawn_at)?.position;
        ctx.world
            .shoot(projectile, direction, inherited_velocity, ctx.performer)?;

        ctx.report.spawned.push(projectile);
    }

    Ok(())
}
