//! Weighted spawn tables.
//!
//! A spawn table is an ordered list of [`SpawnTableEntry`] rows. Rows without
//! a group roll independently against `pick_probability`. Rows sharing a
//! group id form an exclusive "or-group": exactly one member is picked per
//! resolution, proportionally to `weight`. A picked row contributes `amount`
//! copies of its blueprint; a row with no blueprint is a valid "nothing" pick.

use crate::env::RngStream;
use crate::state::BlueprintId;

/// One candidate row of a spawn table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnTableEntry {
    /// Blueprint to spawn; `None` spawns nothing when picked.
    #[cfg_attr(feature = "serde", serde(default))]
    pub blueprint: Option<BlueprintId>,

    /// Relative weight inside the entry's or-group. Ignored without a group.
    #[cfg_attr(feature = "serde", serde(default = "SpawnTableEntry::default_weight"))]
    pub weight: f32,

    /// Independent inclusion chance for ungrouped rows.
    #[cfg_attr(
        feature = "serde",
        serde(default = "SpawnTableEntry::default_pick_probability")
    )]
    pub pick_probability: f32,

    /// Or-group this row belongs to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub group: Option<String>,

    /// Copies spawned when the row is picked.
    #[cfg_attr(feature = "serde", serde(default = "SpawnTableEntry::default_amount"))]
    pub amount: u32,
}

impl SpawnTableEntry {
    /// Upper bound on `amount`. Larger values are clamped when resolving.
    pub const MAX_AMOUNT: u32 = 64;

    /// Always-spawned row producing one `blueprint`.
    pub fn new(blueprint: impl Into<String>) -> Self {
        Self {
            blueprint: Some(BlueprintId::new(blueprint)),
            weight: Self::default_weight(),
            pick_probability: Self::default_pick_probability(),
            group: None,
            amount: Self::default_amount(),
        }
    }

    /// Row that spawns nothing when picked (useful inside or-groups).
    pub fn nothing() -> Self {
        Self {
            blueprint: None,
            ..Self::new("")
        }
    }

    pub fn with_probability(mut self, pick_probability: f32) -> Self {
        self.pick_probability = pick_probability;
        self
    }

    pub fn in_group(mut self, group: impl Into<String>, weight: f32) -> Self {
        self.group = Some(group.into());
        self.weight = weight;
        self
    }

    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    fn default_weight() -> f32 {
        1.0
    }

    fn default_pick_probability() -> f32 {
        1.0
    }

    fn default_amount() -> u32 {
        1
    }

    fn emit(&self, out: &mut Vec<BlueprintId>) {
        if let Some(blueprint) = &self.blueprint {
            let amount = self.amount.min(Self::MAX_AMOUNT) as usize;
            out.extend(std::iter::repeat_n(blueprint.clone(), amount));
        }
    }
}

/// Resolves `entries` to the ordered list of blueprints to spawn.
///
/// Ungrouped rows are emitted first, in table order; or-groups follow in the
/// order their first member appears. Rows with `pick_probability >= 1` never
/// consume a draw, so tables without randomness leave the stream untouched.
pub fn resolve_spawns(entries: &[SpawnTableEntry], rng: &mut RngStream<'_>) -> Vec<BlueprintId> {
    let mut spawned = Vec::new();
    let mut groups: Vec<(&str, Vec<&SpawnTableEntry>)> = Vec::new();

    for entry in entries {
        match entry.group.as_deref() {
            Some(group) => match groups.iter_mut().find(|(id, _)| *id == group) {
                Some((_, members)) => members.push(entry),
                None => groups.push((group, vec![entry])),
            },
            None => {
                if entry.pick_probability >= 1.0 || rng.prob(entry.pick_probability) {
                    entry.emit(&mut spawned);
                }
            }
        }
    }

    for (group, members) in &groups {
        let total: f64 = members.iter().map(|m| m.weight.max(0.0) as f64).sum();
        if total <= 0.0 {
            tracing::trace!(group, "or-group has no positive weight, skipping");
            continue;
        }

        let roll = rng.next_f64() * total;
        let mut cumulative = 0.0;
        for member in members {
            let weight = member.weight.max(0.0) as f64;
            if weight == 0.0 {
                continue;
            }
            cumulative += weight;
            if roll <= cumulative {
                member.emit(&mut spawned);
                break;
            }
        }
    }

    spawned
}
