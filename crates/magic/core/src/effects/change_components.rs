//! Swaps components on a target.
//!
//! Removal is unconditional and ignores kinds the target lacks or that do
//! not exist. Addition never replaces a component the target already has.

use std::str::FromStr;

use crate::env::World;
use crate::spell::ChangeComponentsSpell;
use crate::state::ComponentKind;
use crate::system::EffectError;

use super::EffectContext;

pub(crate) fn apply<W: World + ?Sized>(
    ctx: &mut EffectContext<'_, W>,
    spell: &ChangeComponentsSpell,
) -> Result<(), EffectError> {
    ctx.speak();

    let target = spell.target;

    for name in &spell.to_remove {
        let Ok(kind) = ComponentKind::from_str(name) else {
            tracing::trace!(%name, "unknown component kind in removal list");
            continue;
        };

        if ctx.world.remove_component(target, kind)? {
            ctx.report.removed.push(kind);
        }
    }

    for (name, component) in &spell.to_add {
        let kind = component.kind();
        if ctx.world.has_component(target, kind) {
            tracing::trace!(%name, %target, "target already has component, not adding");
            continue;
        }

        ctx.world.add_component(target, component.clone())?;
        ctx.report.added.push(kind);
    }

    ctx.report.affected.push(target);
    Ok(())
}
