use crate::config::MagicConfig;
use crate::env::{ChatChannel, RngStream, World};
use crate::state::EntityId;
use crate::system::EffectReport;

/// Everything a handler needs while resolving one cast.
pub(crate) struct EffectContext<'a, W: World + ?Sized> {
    pub world: &'a mut W,
    pub performer: EntityId,
    pub config: &'a MagicConfig,
    pub rng: RngStream<'a>,
    pub report: EffectReport,
    speech: Option<&'a str>,
}

impl<'a, W: World + ?Sized> EffectContext<'a, W> {
    pub fn new(
        world: &'a mut W,
        performer: EntityId,
        config: &'a MagicConfig,
        rng: RngStream<'a>,
        report: EffectReport,
        speech: Option<&'a str>,
    ) -> Self {
        Self {
            world,
            performer,
            config,
            rng,
            report,
            speech,
        }
    }

    /// Makes the performer say the cast's speech line, if it has one.
    pub fn speak(&mut self) {
        let Some(key) = self.speech else {
            return;
        };

        let message = self.world.get_string(key);
        self.world
            .send_in_game_message(self.performer, &message, ChatChannel::Speak, false);
        self.report.spoke = true;
    }
}
