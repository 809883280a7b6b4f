//! Do-after timers and spell granting for the sandbox.

use magic_core::{
    DoAfterArgs, DoAfterCompletion, DoAfterFlags, DoAfterId, DoAfters, EntityId, SpellGrant,
    SpellId, Tick, WorldError,
};

use super::SandboxWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingDoAfter {
    pub id: DoAfterId,
    pub args: DoAfterArgs,
    pub ends_at: Tick,
}

impl SandboxWorld {
    pub(crate) fn finish_do_afters(&mut self) {
        let now = self.now();
        let (done, running): (Vec<_>, Vec<_>) = self
            .do_afters
            .drain(..)
            .partition(|pending| pending.ends_at <= now);
        self.do_afters = running;

        self.finished
            .extend(done.into_iter().map(|pending| completion(pending, false)));
    }

    /// Cancels every do-after of `user` that carries any of `flags`.
    pub(crate) fn interrupt(&mut self, user: EntityId, flags: DoAfterFlags) {
        let (cancelled, kept): (Vec<_>, Vec<_>) = self
            .do_afters
            .drain(..)
            .partition(|pending| pending.args.user == user && pending.args.flags.intersects(flags));
        self.do_afters = kept;

        for pending in cancelled {
            tracing::debug!(%user, id = pending.id.0, "do-after interrupted");
            self.finished.push(completion(pending, true));
        }
    }

    /// Cancels every do-after that `entity` performs or is the target of.
    pub(crate) fn cancel_do_afters_of(&mut self, entity: EntityId) {
        let (cancelled, kept): (Vec<_>, Vec<_>) = self
            .do_afters
            .drain(..)
            .partition(|pending| pending.args.user == entity || pending.args.target == entity);
        self.do_afters = kept;

        self.finished
            .extend(cancelled.into_iter().map(|pending| completion(pending, true)));
    }

    pub fn notify_damage(&mut self, user: EntityId) {
        self.interrupt(user, DoAfterFlags::BREAK_ON_DAMAGE);
    }

    pub fn notify_move(&mut self, user: EntityId) {
        self.interrupt(user, DoAfterFlags::BREAK_ON_MOVE);
    }

    pub fn notify_hand_emptied(&mut self, user: EntityId) {
        self.interrupt(user, DoAfterFlags::NEED_HAND);
    }

    /// Completed and cancelled do-afters since the last call.
    pub fn take_completions(&mut self) -> Vec<DoAfterCompletion> {
        std::mem::take(&mut self.finished)
    }

    pub fn pending_do_afters(&self) -> &[PendingDoAfter] {
        &self.do_afters
    }
}

fn completion(pending: PendingDoAfter, cancelled: bool) -> DoAfterCompletion {
    DoAfterCompletion {
        id: pending.id,
        user: pending.args.user,
        target: pending.args.target,
        cancelled,
    }
}

impl DoAfters for SandboxWorld {
    fn try_start_do_after(&mut self, args: DoAfterArgs) -> Option<DoAfterId> {
        if args.flags.contains(DoAfterFlags::NEED_HAND) && !self.has_free_hand(args.user) {
            return None;
        }

        self.next_do_after += 1;
        let id = DoAfterId(self.next_do_after);
        let ends_at = self.now() + args.delay;
        self.do_afters.push(PendingDoAfter { id, args, ends_at });
        Some(id)
    }

    fn has_pending(&self, user: EntityId, target: EntityId) -> bool {
        self.do_afters
            .iter()
            .any(|pending| pending.args.user == user && pending.args.target == target)
    }
}

impl SpellGrant for SandboxWorld {
    fn grant_spells(&mut self, user: EntityId, spells: &[SpellId]) -> Result<usize, WorldError> {
        self.record(user)?;

        let known = self.known_spells_mut(user);
        let granted = spells
            .iter()
            .filter(|spell| known.insert((*spell).clone()))
            .count();
        Ok(granted)
    }
}
