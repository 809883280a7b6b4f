mod common;

use std::collections::BTreeMap;

use common::{Arena, cast};
use magic_core::{
    ChangeComponentsSpell, Component, ComponentKind, EntityId, EntityStore, SpellEffect,
};

fn change(target: EntityId, remove: &[&str], add: Vec<Component>) -> SpellEffect {
    SpellEffect::ChangeComponents(ChangeComponentsSpell {
        target,
        to_remove: remove.iter().map(|name| (*name).to_owned()).collect(),
        to_add: add
            .into_iter()
            .map(|component| (component.kind().to_string(), component))
            .collect::<BTreeMap<_, _>>(),
    })
}

#[test]
fn adding_a_present_kind_keeps_the_original() {
    let mut arena = Arena::new();
    let crate_id = arena.spawn("Crate", 6.5, 4.5);
    let (mut runtime, ids) = arena.into_runtime();
    let mut event = cast(
        ids.wizard,
        change(
            crate_id,
            &[],
            vec![Component::Flammable { fire_stacks: 9.0 }],
        ),
    );

    let outcome = runtime.cast(&mut event).unwrap();

    assert!(outcome.report().unwrap().added.is_empty());
    assert_eq!(
        runtime.world().component(crate_id, ComponentKind::Flammable),
        Some(&Component::Flammable { fire_stacks: 1.0 })
    );
}

#[test]
fn removing_an_absent_kind_is_silent() {
    let mut arena = Arena::new();
    let crate_id = arena.spawn("Crate", 6.5, 4.5);
    let (mut runtime, ids) = arena.into_runtime();
    let before = runtime.world().mutation_count();
    let mut event = cast(ids.wizard, change(crate_id, &["stealth", "door_bolt"], vec![]));

    let outcome = runtime.cast(&mut event).unwrap();

    assert!(outcome.report().unwrap().removed.is_empty());
    assert_eq!(runtime.world().mutation_count(), before);
    assert!(runtime.world().has_component(crate_id, ComponentKind::Flammable));
}

#[test]
fn unknown_kind_names_are_ignored() {
    let mut arena = Arena::new();
    let crate_id = arena.spawn("Crate", 6.5, 4.5);
    let (mut runtime, ids) = arena.into_runtime();
    let mut event = cast(
        ids.wizard,
        change(crate_id, &["ExplosionResistance", "flammable"], vec![]),
    );

    let outcome = runtime.cast(&mut event).unwrap();

    assert_eq!(
        outcome.report().unwrap().removed,
        vec![ComponentKind::Flammable]
    );
    assert!(!runtime.world().has_component(crate_id, ComponentKind::Flammable));
}

#[test]
fn swap_removes_then_adds() {
    let mut arena = Arena::new();
    let crate_id = arena.spawn("Crate", 6.5, 4.5);
    let (mut runtime, ids) = arena.into_runtime();
    let mut event = cast(
        ids.wizard,
        change(
            crate_id,
            &["flammable"],
            vec![
                Component::Pacified,
                Component::Slippery {
                    paralyze_seconds: 2.0,
                },
            ],
        ),
    );

    let outcome = runtime.cast(&mut event).unwrap();
    let report = outcome.report().unwrap();

    assert_eq!(report.removed, vec![ComponentKind::Flammable]);
    assert_eq!(report.added.len(), 2);
    assert_eq!(report.affected, vec![crate_id]);
    let world = runtime.world();
    assert!(!world.has_component(crate_id, ComponentKind::Flammable));
    assert!(world.has_component(crate_id, ComponentKind::Pacified));
    assert_eq!(
        world.component(crate_id, ComponentKind::Slippery),
        Some(&Component::Slippery {
            paralyze_seconds: 2.0
        })
    );
}

#[test]
fn removed_kind_can_be_readded_in_the_same_cast() {
    let mut arena = Arena::new();
    let crate_id = arena.spawn("Crate", 6.5, 4.5);
    let (mut runtime, ids) = arena.into_runtime();
    let mut event = cast(
        ids.wizard,
        change(
            crate_id,
            &["flammable"],
            vec![Component::Flammable { fire_stacks: 5.0 }],
        ),
    );

    runtime.cast(&mut event).unwrap();

    assert_eq!(
        runtime.world().component(crate_id, ComponentKind::Flammable),
        Some(&Component::Flammable { fire_stacks: 5.0 })
    );
}
