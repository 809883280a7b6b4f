//! Flings the target away from the performer and tears its body apart.

use crate::env::World;
use crate::spell::SmiteSpell;
use crate::state::ComponentKind;
use crate::system::EffectError;

use super::EffectContext;

pub(crate) fn apply<W: World + ?Sized>(
    ctx: &mut EffectContext<'_, W>,
    spell: &SmiteSpell,
) -> Result<(), EffectError> {
    ctx.speak();

    let target = spell.target;
    let target_position = {
        let coordinates = ctx.world.transform(target)?.coordinates;
        ctx.world.to_map(coordinates)?.position
    };
    let performer_position = {
        let coordinates = ctx.world.transform(ctx.performer)?.coordinates;
        ctx.world.to_map(coordinates)?.position
    };

    let impulse = (target_position - performer_position) * ctx.config.smite_impulse_multiplier;
    ctx.world.apply_linear_impulse(target, impulse)?;
    ctx.report.affected.push(target);

    if !ctx.world.has_component(target, ComponentKind::Body) {
        tracing::debug!(%target, "smite target has no body, skipping dismemberment");
        return Ok(());
    }

    let parts = ctx.world.gib(target)?;

    if !spell.delete_non_brain_parts {
        return Ok(());
    }

    // Leaves the brain and anything that is not a body part (clothing, items).
    for part in parts {
        if ctx.world.has_component(part, ComponentKind::BodyPart)
            && !ctx.world.has_component(part, ComponentKind::Brain)
        {
            ctx.world.delete(part)?;
            ctx.report.deleted.push(part);
        }
    }

    Ok(())
}
