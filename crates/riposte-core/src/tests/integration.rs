//! Integration tests for hit reactions and hit-stop through a full duel.
//!
//! These tests verify:
//! - Reaction selection and knockback delivery
//! - Hit-stop timing, replacement and dilation balance
//! - Attacker hit-landed window
//! - Locomotion, facing and ground events
//! - Teardown and stale timers

use glam::Vec2;

use riposte_input::{ButtonEvent, InputSymbol, SequenceId};

use crate::combatant::{CombatantEvent, CombatantFlags, CombatantParts, MAX_PENDING_EVENTS};
use crate::config::RiposteConfig;
use crate::entity::EntityId;
use crate::error::CoreError;
use crate::hit::HitDescriptor;
use crate::hitstop::HitStopPhase;
use crate::reaction::ReactionKind;
use crate::timer::{TimerManager, TimerTag};

use super::helpers::{init_tracing, knockback, setup_duel, MESH_BASELINE, P1, P2};

fn stop_hit(duration: f32, shake: bool) -> HitDescriptor {
    HitDescriptor::new(P1)
        .with_knockback(knockback(300.0, 1.0))
        .with_hit_stop(duration, shake)
}

// =============================================================================
// Reactions
// =============================================================================

#[test]
fn strong_cross_axis_hit_requests_ground_to_air() {
    init_tracing();
    let (mut duel, f) = setup_duel(RiposteConfig::default());

    let hit = HitDescriptor::new(P1).with_knockback(knockback(600.0, 0.5));
    assert!(duel.deliver_hit(P2, &hit).unwrap());

    assert_eq!(*f.states2.borrow(), vec!["ground-to-air".to_string()]);
    let (_, magnitude, ignore) = f.body2.borrow().knockbacks[0];
    assert!((magnitude - 600.0).abs() < 1e-3);
    assert!(!ignore);
}

#[test]
fn strong_aligned_hit_requests_grounded() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());

    let hit = HitDescriptor::new(P1).with_knockback(knockback(600.0, 0.95));
    duel.deliver_hit(P2, &hit).unwrap();

    assert_eq!(*f.states2.borrow(), vec!["grounded".to_string()]);
}

#[test]
fn unhittable_victim_ignores_hit() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    duel.combatant_mut(P2)
        .unwrap()
        .set_flags(CombatantFlags::HITTABLE, false);

    let hit = stop_hit(0.2, true).with_damage(10.0);
    assert!(!duel.deliver_hit(P2, &hit).unwrap());

    assert!(f.states2.borrow().is_empty());
    assert!(f.body2.borrow().knockbacks.is_empty());
    assert!(duel.timers().is_empty());
    assert!(!duel.combatant(P1).unwrap().has_just_landed_hit());
    assert!(duel.combatant(P2).unwrap().damage_percent().abs() < f32::EPSILON);
}

#[test]
fn forced_facing_turns_victim_instantly() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    f.body2.borrow_mut().facing_right = true;

    let hit = HitDescriptor::new(P1).facing_opponent().ignoring_multiplier();
    duel.deliver_hit(P2, &hit).unwrap();

    let body = f.body2.borrow();
    assert_eq!(body.facing_requests, vec![(false, true)]);
    assert!(body.knockbacks[0].2);
}

#[test]
fn damage_accrues_and_never_decreases() {
    let (mut duel, _f) = setup_duel(RiposteConfig::default());

    duel.deliver_hit(P2, &HitDescriptor::new(P1).with_damage(12.0))
        .unwrap();
    duel.deliver_hit(P2, &HitDescriptor::new(P1).with_damage(-5.0))
        .unwrap();

    let victim = duel.combatant_mut(P2).unwrap();
    assert!((victim.damage_percent() - 12.0).abs() < 1e-5);
    assert!((victim.knockback_multiplier() - 1.12).abs() < 1e-5);

    victim.set_damage_percent(-3.0);
    assert!(victim.damage_percent().abs() < f32::EPSILON);
}

// =============================================================================
// Hit-stop
// =============================================================================

#[test]
fn hit_stop_freezes_after_initial_delay() {
    init_tracing();
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    let min = duel.config().combat.min_time_dilation;
    assert!(duel.deliver_hit(P2, &stop_hit(0.2, true)).unwrap());

    duel.step(0.04);
    let victim = duel.combatant(P2).unwrap();
    assert_eq!(victim.hit_stop_phase(), HitStopPhase::PendingBegin);
    assert_eq!(victim.dilation().depth(), 1);
    assert!(!victim.is_shaking());

    duel.step(0.02);
    let victim = duel.combatant(P2).unwrap();
    assert_eq!(victim.hit_stop_phase(), HitStopPhase::Active);
    assert_eq!(victim.dilation().depth(), 2);
    assert!(victim.is_shaking());
    assert!((f.body2.borrow().time_dilation - min).abs() < f32::EPSILON);
    assert_ne!(f.body2.borrow().mesh_offset, MESH_BASELINE);

    // The attacker freezes too, without shaking.
    let attacker = duel.combatant(P1).unwrap();
    assert_eq!(attacker.dilation().depth(), 2);
    assert!(!attacker.is_shaking());
    assert_eq!(f.body1.borrow().mesh_offset, MESH_BASELINE);

    duel.step(0.2);
    let victim = duel.combatant(P2).unwrap();
    assert_eq!(victim.hit_stop_phase(), HitStopPhase::Idle);
    assert_eq!(victim.dilation().depth(), 1);
    assert!(!victim.is_shaking());
    let body = f.body2.borrow();
    assert!((body.time_dilation - 1.0).abs() < f32::EPSILON);
    assert_eq!(body.mesh_offset, MESH_BASELINE);
}

#[test]
fn pending_hit_stop_is_replaced_by_newer_request() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    let min = duel.config().combat.min_time_dilation;

    duel.deliver_hit(P2, &stop_hit(0.2, true)).unwrap();
    duel.step(0.03);
    duel.deliver_hit(P2, &stop_hit(0.1, false)).unwrap();

    duel.step(0.03);
    assert_eq!(duel.combatant(P2).unwrap().dilation().depth(), 1);

    duel.step(0.03);
    let victim = duel.combatant(P2).unwrap();
    assert_eq!(victim.dilation().depth(), 2);
    assert!(!victim.is_shaking());

    duel.step(0.1);
    assert_eq!(duel.combatant(P2).unwrap().dilation().depth(), 1);

    duel.step(0.5);
    assert_eq!(f.body2.borrow().dilation_history, vec![min, 1.0]);
    assert_eq!(f.body1.borrow().dilation_history, vec![min, 1.0]);
}

#[test]
fn frozen_combatant_input_does_not_slide() {
    let (mut duel, _f) = setup_duel(RiposteConfig::default());
    duel.deliver_hit(P2, &stop_hit(0.2, false)).unwrap();
    duel.step(0.06);

    let victim = duel.combatant_mut(P2).unwrap();
    assert_eq!(victim.hit_stop_phase(), HitStopPhase::Active);
    victim.input_mut().on_button(ButtonEvent::AttackPressed);
    let before = victim.input().raw_snapshot();

    for _ in 0..5 {
        duel.step(1.0 / 60.0);
    }
    assert_eq!(duel.combatant(P2).unwrap().input().raw_snapshot(), before);
}

#[test]
fn hit_events_are_raised_in_order() {
    let (mut duel, _f) = setup_duel(RiposteConfig::default());
    duel.deliver_hit(P2, &stop_hit(0.2, true)).unwrap();
    duel.step(0.04);
    duel.step(0.02);
    duel.step(0.2);

    let events = duel.combatant_mut(P2).unwrap().drain_events();
    assert_eq!(
        events,
        vec![
            CombatantEvent::ReactionRequested(ReactionKind::Grounded),
            CombatantEvent::HitTaken {
                attacker: P1,
                damage_percent: 0.0,
            },
            CombatantEvent::Landed,
            CombatantEvent::HitStopBegan,
            CombatantEvent::HitStopEnded,
        ]
    );
    assert!(duel.combatant_mut(P2).unwrap().drain_events().is_empty());
}

#[test]
fn undrained_events_keep_only_the_newest() {
    let (mut duel, _f) = setup_duel(RiposteConfig::default());
    let hit = HitDescriptor::new(P1).with_damage(1.0);
    for _ in 0..100 {
        duel.deliver_hit(P2, &hit).unwrap();
    }

    let victim = duel.combatant_mut(P2).unwrap();
    assert_eq!(victim.pending_events(), MAX_PENDING_EVENTS);
    let events = victim.drain_events();
    assert_eq!(events.len(), MAX_PENDING_EVENTS);
    assert_eq!(
        events.last(),
        Some(&CombatantEvent::HitTaken {
            attacker: P1,
            damage_percent: 100.0,
        })
    );
    assert_eq!(victim.pending_events(), 0);
    assert_eq!(duel.combatant(P1).unwrap().pending_events(), MAX_PENDING_EVENTS);
}

// =============================================================================
// Attacker
// =============================================================================

#[test]
fn hit_landed_window_restarts_on_each_hit() {
    let (mut duel, _f) = setup_duel(RiposteConfig::default());
    let hit = HitDescriptor::new(P1).with_damage(3.0);

    duel.deliver_hit(P2, &hit).unwrap();
    duel.step(0.2);
    assert!(duel.combatant(P1).unwrap().has_just_landed_hit());

    duel.deliver_hit(P2, &hit).unwrap();
    duel.step(0.25);
    assert!(duel.combatant(P1).unwrap().has_just_landed_hit());

    duel.step(0.1);
    let attacker = duel.combatant_mut(P1).unwrap();
    assert!(!attacker.has_just_landed_hit());

    let closed = attacker
        .drain_events()
        .into_iter()
        .filter(|e| *e == CombatantEvent::HitLandedWindowClosed)
        .count();
    assert_eq!(closed, 1);
}

// =============================================================================
// Locomotion and facing
// =============================================================================

#[test]
fn ground_events_fire_on_edges() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());

    duel.step(1.0 / 60.0);
    assert_eq!(
        duel.combatant_mut(P1).unwrap().drain_events(),
        vec![CombatantEvent::Landed]
    );

    f.body1.borrow_mut().airborne = true;
    duel.step(1.0 / 60.0);
    duel.step(1.0 / 60.0);
    assert_eq!(
        duel.combatant_mut(P1).unwrap().drain_events(),
        vec![CombatantEvent::BecameAirborne]
    );

    f.body1.borrow_mut().airborne = false;
    duel.step(1.0 / 60.0);
    assert_eq!(
        duel.combatant_mut(P1).unwrap().drain_events(),
        vec![CombatantEvent::Landed]
    );
}

#[test]
fn gravity_scale_follows_vertical_velocity() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    let locomotion = duel.config().locomotion.clone();

    f.body1.borrow_mut().vertical_velocity = -10.0;
    duel.step(1.0 / 60.0);
    assert!((f.body1.borrow().gravity_scale - locomotion.falling_gravity_scale).abs() < f32::EPSILON);

    f.body1.borrow_mut().vertical_velocity = 10.0;
    duel.step(1.0 / 60.0);
    assert!((f.body1.borrow().gravity_scale - locomotion.regular_gravity_scale).abs() < f32::EPSILON);
}

#[test]
fn walking_away_from_opponent_is_slower() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    let locomotion = duel.config().locomotion.clone();

    duel.combatant_mut(P1).unwrap().input_mut().update_axes(-0.9, 0.0);
    duel.step(1.0 / 60.0);
    assert!(duel.combatant(P1).unwrap().is_moving_backward());
    assert!((f.body1.borrow().max_walk_speed - locomotion.backward_walk_speed).abs() < f32::EPSILON);

    duel.combatant_mut(P1).unwrap().input_mut().update_axes(0.9, 0.0);
    duel.step(1.0 / 60.0);
    assert!(!duel.combatant(P1).unwrap().is_moving_backward());
    assert!((f.body1.borrow().max_walk_speed - locomotion.forward_walk_speed).abs() < f32::EPSILON);
}

#[test]
fn grounded_combatant_turns_toward_opponent() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    f.body1.borrow_mut().facing_right = false;

    duel.step(1.0 / 60.0);
    let body = f.body1.borrow();
    assert_eq!(body.facing_requests, vec![(true, false)]);
    assert!(body.facing_right);
}

#[test]
fn airborne_combatant_keeps_facing() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    {
        let mut body = f.body1.borrow_mut();
        body.facing_right = false;
        body.airborne = true;
    }

    duel.step(1.0 / 60.0);
    assert!(f.body1.borrow().facing_requests.is_empty());
}

#[test]
fn left_facing_motion_resolves_to_sequence() {
    let (mut duel, _f) = setup_duel(RiposteConfig::default());
    duel.step(1.0 / 60.0);

    // P2 faces left: toward the opponent is world -x.
    let input = duel.combatant_mut(P2).unwrap().input_mut();
    assert!(!input.is_facing_right());
    input.update_direction(Vec2::new(0.0, -1.0));
    input.update_direction(Vec2::new(-0.7, -0.7));
    input.update_direction(Vec2::new(-1.0, 0.0));
    input.on_button(ButtonEvent::AttackPressed);

    let symbols = input.raw_buffer().symbols();
    assert_eq!(symbols[symbols.len() - 3], InputSymbol::ForwardDown);
    assert!(input.contains_consumable_sequence(&SequenceId::new("fireball")));
}

#[test]
fn spawned_facing_left_mirrors_before_first_step() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    assert!(!f.body2.borrow().facing_right);

    let input = duel.combatant_mut(P2).unwrap().input_mut();
    assert!(!input.is_facing_right());
    input.insert_raw(InputSymbol::Forward);
    assert_eq!(input.raw_buffer().newest().unwrap().symbol, InputSymbol::Backward);

    let input = duel.combatant_mut(P1).unwrap().input_mut();
    assert!(input.is_facing_right());
    input.insert_raw(InputSymbol::Forward);
    assert_eq!(input.raw_buffer().newest().unwrap().symbol, InputSymbol::Forward);
}

// =============================================================================
// Roster, teardown and stale timers
// =============================================================================

#[test]
fn roster_errors() {
    let (mut duel, _f) = setup_duel(RiposteConfig::default());

    assert!(matches!(
        duel.spawn(P1, CombatantParts::new()),
        Err(CoreError::DuplicateCombatant(id)) if id == P1
    ));
    assert!(matches!(
        duel.spawn(EntityId::new(3), CombatantParts::new()),
        Err(CoreError::DuelFull(2))
    ));
    assert!(matches!(
        duel.deliver_hit(EntityId::new(9), &HitDescriptor::new(P1)),
        Err(CoreError::UnknownCombatant(_))
    ));
    assert!(matches!(
        duel.deliver_hit(P2, &HitDescriptor::new(EntityId::new(9))),
        Err(CoreError::UnknownCombatant(_))
    ));
    assert!(matches!(
        duel.despawn(EntityId::new(9)),
        Err(CoreError::UnknownCombatant(_))
    ));
}

#[test]
fn despawn_cancels_timers_and_releases_dilation() {
    init_tracing();
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    duel.deliver_hit(P2, &stop_hit(0.2, true)).unwrap();
    duel.step(0.1);
    assert_eq!(duel.combatant(P2).unwrap().dilation().depth(), 2);

    let removed = duel.despawn(P2).unwrap();
    assert!(removed.dilation().is_baseline());
    assert_eq!(removed.hit_stop_phase(), HitStopPhase::Idle);
    assert!(duel.timers().iter().all(|t| t.owner == P1));
    {
        let body = f.body2.borrow();
        assert!((body.time_dilation - 1.0).abs() < f32::EPSILON);
        assert_eq!(body.mesh_offset, MESH_BASELINE);
    }

    duel.step(0.5);
    let attacker = duel.combatant(P1).unwrap();
    assert_eq!(attacker.hit_stop_phase(), HitStopPhase::Idle);
    assert!(attacker.dilation().is_baseline());
    assert!(duel.timers().is_empty());
}

#[test]
fn despawn_before_begin_leaves_nothing_to_fire() {
    let (mut duel, f) = setup_duel(RiposteConfig::default());
    duel.deliver_hit(P2, &stop_hit(0.2, true)).unwrap();
    duel.despawn(P2).unwrap();

    duel.step(0.3);
    assert!(f.body2.borrow().dilation_history.is_empty());
    assert!(duel.combatant(P2).is_none());
}

#[test]
fn untracked_timer_is_ignored() {
    let (mut duel, _f) = setup_duel(RiposteConfig::default());
    let mut foreign = TimerManager::new();
    foreign.set(P2, TimerTag::HitStopEnd, 0.0);
    let stale = foreign.pop_due(0.0).unwrap();

    let victim = duel.combatant_mut(P2).unwrap();
    victim.on_timer(&stale, &mut foreign);

    assert!(victim.dilation().is_baseline());
    assert!(victim.drain_events().is_empty());
    assert!(foreign.is_empty());
}

#[test]
fn combatant_without_collaborators_still_runs_hit_stop() {
    let mut duel = crate::duel::Duel::new(RiposteConfig::default()).unwrap();
    duel.spawn(P1, CombatantParts::new()).unwrap();
    duel.spawn(P2, CombatantParts::new()).unwrap();

    duel.deliver_hit(P2, &stop_hit(0.2, true)).unwrap();
    duel.step(0.1);
    let victim = duel.combatant(P2).unwrap();
    assert_eq!(victim.dilation().depth(), 2);
    assert!(victim.location().is_none());

    duel.step(0.2);
    assert!(duel.combatant(P2).unwrap().dilation().is_baseline());
    assert_eq!(duel.combatant(P2).unwrap().flags(), CombatantFlags::HITTABLE);
}
