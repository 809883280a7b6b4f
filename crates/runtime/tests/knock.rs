mod common;

use common::{Arena, cast};
use magic_core::{
    Component, ComponentKind, DoorState, EntityStore, KnockSpell, SoundSpecifier, SpellEffect,
};

fn knock() -> SpellEffect {
    SpellEffect::Knock(KnockSpell {
        range: 4.0,
        sound: Some(SoundSpecifier::new("/Audio/Magic/knock.ogg")),
        volume: 2.0,
    })
}

#[test]
fn knock_unbolts_and_opens_doors_in_range() {
    let mut arena = Arena::new();
    let airlock = arena.spawn("Airlock", 5.5, 4.5);
    let wooden = arena.spawn("WoodenDoor", 4.5, 6.5);
    let open = arena.spawn("OpenDoor", 3.5, 4.5);
    let far = arena.spawn("Airlock", 9.5, 9.5);
    let (mut runtime, ids) = arena.into_runtime();
    let mut event = cast(ids.wizard, knock()).with_speech("spell-speech-knock");

    let outcome = runtime.cast(&mut event).unwrap();
    let report = outcome.report().unwrap();

    assert!(report.affected.contains(&airlock));
    assert!(report.affected.contains(&wooden));
    assert!(!report.affected.contains(&open));
    assert!(!report.affected.contains(&far));

    let world = runtime.world();
    assert_eq!(
        world.component(airlock, ComponentKind::DoorBolt),
        Some(&Component::DoorBolt { bolted: false })
    );
    assert_eq!(world.door_state(airlock), Some(DoorState::Opening));
    assert_eq!(world.door_state(wooden), Some(DoorState::Opening));
    assert_eq!(world.door_state(open), Some(DoorState::Open));
    assert_eq!(world.door_state(far), Some(DoorState::Closed));
    assert_eq!(
        world.component(far, ComponentKind::DoorBolt),
        Some(&Component::DoorBolt { bolted: true })
    );
}

#[test]
fn knock_plays_its_sound_and_speaks() {
    let arena = Arena::new();
    let (mut runtime, ids) = arena.into_runtime();
    let mut event = cast(ids.wizard, knock()).with_speech("spell-speech-knock");

    let outcome = runtime.cast(&mut event).unwrap();

    assert!(outcome.report().unwrap().spoke);
    let log = runtime.world().log();
    assert_eq!(log.sounds.len(), 1);
    assert_eq!(log.sounds[0].sound, SoundSpecifier::new("/Audio/Magic/knock.ogg"));
    assert_eq!(log.sounds[0].volume, 2.0);
    assert_eq!(log.chat[0].message, "AULIE OXIN FIERA!");
}

#[test]
fn opening_doors_finish_after_a_tick() {
    let mut arena = Arena::new();
    let wooden = arena.spawn("WoodenDoor", 4.5, 6.5);
    let (mut runtime, ids) = arena.into_runtime();
    let mut event = cast(ids.wizard, knock());

    runtime.cast(&mut event).unwrap();
    runtime.advance(1);

    assert_eq!(runtime.world().door_state(wooden), Some(DoorState::Open));
}
