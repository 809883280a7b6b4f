//! Timed, interruptible interactions ("do-afters") and spell granting.

use crate::state::{EntityId, SpellId, Tick};

use super::WorldError;

bitflags::bitflags! {
    /// Conditions that cancel or gate a pending do-after.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DoAfterFlags: u8 {
        /// Cancel when the user takes damage.
        const BREAK_ON_DAMAGE = 1 << 0;
        /// Cancel when the user moves.
        const BREAK_ON_MOVE = 1 << 1;
        /// User must keep a hand occupied with the target for the whole duration.
        const NEED_HAND = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoAfterId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoAfterArgs {
    pub user: EntityId,
    pub target: EntityId,
    pub delay: Tick,
    pub flags: DoAfterFlags,
}

/// Final state of a do-after reported back by the collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoAfterCompletion {
    pub id: DoAfterId,
    pub user: EntityId,
    pub target: EntityId,
    pub cancelled: bool,
}

pub trait DoAfters {
    /// Starts a timer; `None` if the user cannot begin (e.g. no free hand).
    fn try_start_do_after(&mut self, args: DoAfterArgs) -> Option<DoAfterId>;

    /// True while an uncancelled do-after by `user` on `target` is running.
    fn has_pending(&self, user: EntityId, target: EntityId) -> bool;
}

/// Grants learned spells to an actor (action bar, mind, ...).
pub trait SpellGrant {
    /// Returns the number of spells that were newly granted.
    fn grant_spells(&mut self, user: EntityId, spells: &[SpellId]) -> Result<usize, WorldError>;
}
