//! Component data that spell effects read, attach, or detach.
//!
//! Components form a closed set. [`ComponentKind`] is derived from the
//! [`Component`] variants and doubles as the content-facing identifier: kinds
//! parse from their snake_case names (`"door_bolt"`, `"timed_despawn"`, ...).

use super::common::EntityId;

/// Open/closed lifecycle of a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    #[default]
    Closed,
    Closing,
    Opening,
    Open,
    Welded,
    Denying,
}

/// A single component instance attached to an entity.
#[derive(Clone, Debug, PartialEq, strum::EnumDiscriminants)]
#[strum_discriminants(
    name(ComponentKind),
    derive(Hash, PartialOrd, Ord, strum::Display, strum::EnumString, strum::AsRefStr),
    strum(serialize_all = "snake_case"),
    cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Component {
    /// Physics ignores collisions between the owner and `ignored`.
    PreventCollide { ignored: EntityId },

    /// Owner deletes itself once `lifetime` seconds have elapsed.
    TimedDespawn { lifetime: f32 },

    Door { state: DoorState },

    DoorBolt { bolted: bool },

    /// Owner is a body that can be dismembered into parts.
    Body,

    /// Owner is a detached or attached body part.
    BodyPart,

    /// Vital part; survives smite cleanup.
    Brain,

    Pacified,

    Slippery { paralyze_seconds: f32 },

    Stealth { visibility: f32 },

    Flammable { fire_stacks: f32 },

    Clothing,
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        ComponentKind::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kinds_parse_from_snake_case_names() {
        assert_eq!(
            ComponentKind::from_str("door_bolt").unwrap(),
            ComponentKind::DoorBolt
        );
        assert_eq!(
            ComponentKind::from_str("timed_despawn").unwrap(),
            ComponentKind::TimedDespawn
        );
        assert!(ComponentKind::from_str("not_a_component").is_err());
    }

    #[test]
    fn component_reports_its_kind() {
        let component = Component::Slippery {
            paralyze_seconds: 2.0,
        };
        assert_eq!(component.kind(), ComponentKind::Slippery);
        assert_eq!(ComponentKind::PreventCollide.to_string(), "prevent_collide");
    }
}
