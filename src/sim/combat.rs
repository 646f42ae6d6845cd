//! Per-tick collision resolution
//!
//! Runs after movement, spawning and fire control, in this order:
//! 1. bullets move and expire
//! 2. pickups touching the player are consumed
//! 3. particles move, shrink and expire
//! 4. enemies home, then hit the player, then get hit by bullets
//!
//! Enemies are walked from the newest to the oldest. Player contact is
//! checked before bullets, so a minion touching the player dies to the
//! contact and never consumes a bullet that tick.

use super::events::{BOSS_ORANGE, ENEMY_RED, GameEvent, PLAYER_CYAN, SoundCue};
use super::state::{EnemyKind, GameState};
use crate::circles_overlap;

/// Particles in a boss death burst
const BOSS_BURST_PARTICLES: u32 = 24;

pub fn resolve(state: &mut GameState) {
    integrate_bullets(state);
    collect_pickups(state);
    integrate_particles(state);
    resolve_enemies(state);
}

/// Move bullets one tick and drop the ones that ran out of life
pub fn integrate_bullets(state: &mut GameState) {
    let amplitude = state.tuning.wobble_amplitude;
    let frequency = state.tuning.wobble_frequency;
    for bullet in &mut state.store.bullets {
        bullet.advance(amplitude, frequency);
    }
    state.store.bullets.retain(|b| !b.expired());
}

/// Consume every pickup overlapping the player
pub fn collect_pickups(state: &mut GameState) {
    let player = state.store.player;
    let mut i = state.store.pickups.len();
    while i > 0 {
        i -= 1;
        let pickup = &state.store.pickups[i];
        if !circles_overlap(player.pos, player.radius, pickup.pos, pickup.radius) {
            continue;
        }
        state.store.pickups.remove(i);

        state.add_energy(state.tuning.pickup_energy);
        state.score += state.tuning.pickup_score;
        state.emit(GameEvent::sound(SoundCue::Powerup));
        if state.add_super_charge(1) {
            log::info!("Super ready");
            state.emit(GameEvent::SuperAvailable);
        }
    }
}

/// Cosmetic particle motion
pub fn integrate_particles(state: &mut GameState) {
    for particle in &mut state.store.particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
        particle.size *= 0.9;
    }
    state.store.particles.retain(|p| p.life > 0);
}

/// Homing, player contact and bullet hits for every enemy
pub fn resolve_enemies(state: &mut GameState) {
    let hit_radius = state.tuning.bullet_hit_radius;
    let minion_damage = state.tuning.minion.contact_damage;
    let boss_damage = state.tuning.boss.contact_damage;
    let mut i = state.store.enemies.len();
    while i > 0 {
        i -= 1;
        let player = state.store.player;

        let enemy = &mut state.store.enemies[i];
        enemy.home_toward(player.pos);
        let (pos, radius, kind) = (enemy.pos, enemy.radius, enemy.kind);

        // Player contact
        if circles_overlap(player.pos, player.radius, pos, radius) {
            match kind {
                EnemyKind::Minion => {
                    state.store.enemies.remove(i);
                    hit_player(state, minion_damage);
                    if state.is_over() {
                        return;
                    }
                    continue;
                }
                EnemyKind::Boss => {
                    // Bosses shrug off the collision and keep hurting while they touch
                    hit_player(state, boss_damage);
                    if state.is_over() {
                        return;
                    }
                }
            }
        }

        // Bullet contact: first live bullet from the back, at most one per tick
        let Some(j) = state
            .store
            .bullets
            .iter()
            .rposition(|b| circles_overlap(b.pos, 0.0, pos, radius + hit_radius))
        else {
            continue;
        };
        state.store.bullets.remove(j);

        let enemy = &mut state.store.enemies[i];
        enemy.hp -= state.fire.damage;
        let dead = enemy.hp <= 0.0;

        let particles = state.tuning.explosion_particles;
        state.explode(pos, ENEMY_RED, particles);
        state.emit(GameEvent::sound(SoundCue::Hit));

        if dead {
            state.store.enemies.remove(i);
            award_kill(state, kind, pos);
        }
    }
}

/// Energy damage from an enemy touching the player
fn hit_player(state: &mut GameState, damage: f32) {
    state.add_energy(-damage);
    let at = state.store.player.pos;
    let particles = state.tuning.explosion_particles;
    state.explode(at, PLAYER_CYAN, particles);
    state.emit(GameEvent::sound(SoundCue::Hit));
    if state.energy <= 0.0 {
        state.end_game();
    }
}

/// Score and experience for a kill; clears the boss flag on a boss
fn award_kill(state: &mut GameState, kind: EnemyKind, pos: glam::Vec2) {
    let profile = match kind {
        EnemyKind::Minion => state.tuning.minion,
        EnemyKind::Boss => state.tuning.boss,
    };
    state.score += profile.score;
    state.progression.experience += profile.experience;

    if kind == EnemyKind::Boss {
        state.boss_active = false;
        state.explode(pos, BOSS_ORANGE, BOSS_BURST_PARTICLES);
        state.emit(GameEvent::BossDefeated { pos });
        log::info!("Boss defeated, score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_SUPER_CHARGE;
    use glam::Vec2;

    fn quiet_state() -> GameState {
        let mut state = GameState::new(21);
        state.store.player.pos = Vec2::new(400.0, 300.0);
        state
    }

    fn count<F: Fn(&GameEvent) -> bool>(events: &[GameEvent], f: F) -> usize {
        events.iter().filter(|e| f(e)).count()
    }

    #[test]
    fn test_bullets_expire() {
        let mut state = quiet_state();
        state.store.spawn_bullet(Vec2::ZERO, Vec2::X, 2, false);
        integrate_bullets(&mut state);
        assert_eq!(state.store.bullets.len(), 1);
        integrate_bullets(&mut state);
        assert!(state.store.bullets.is_empty());
    }

    #[test]
    fn test_pickup_consumed_once() {
        let mut state = quiet_state();
        state.energy = 90.0;
        state.store.spawn_pickup(Vec2::new(410.0, 300.0), 15.0);
        state.store.spawn_pickup(Vec2::new(100.0, 100.0), 15.0);

        collect_pickups(&mut state);
        collect_pickups(&mut state);

        assert_eq!(state.store.pickups.len(), 1);
        assert_eq!(state.energy, 100.0);
        assert_eq!(state.score, 50);
        assert_eq!(state.super_charge, 1);
        let events = state.drain_events();
        assert_eq!(
            count(&events, |e| *e == GameEvent::sound(SoundCue::Powerup)),
            1
        );
    }

    #[test]
    fn test_third_pickup_arms_super() {
        let mut state = quiet_state();
        state.super_charge = 2;
        state.store.spawn_pickup(Vec2::new(400.0, 300.0), 15.0);
        collect_pickups(&mut state);
        assert_eq!(state.super_charge, MAX_SUPER_CHARGE);
        assert!(state.drain_events().contains(&GameEvent::SuperAvailable));

        // Charge stays capped, no repeated notification
        state.store.spawn_pickup(Vec2::new(400.0, 300.0), 15.0);
        collect_pickups(&mut state);
        assert_eq!(state.super_charge, MAX_SUPER_CHARGE);
        assert!(!state.drain_events().contains(&GameEvent::SuperAvailable));
    }

    #[test]
    fn test_minion_homes_toward_player() {
        let mut state = quiet_state();
        state.store.player.pos = Vec2::new(100.0, 100.0);
        state
            .store
            .spawn_enemy(EnemyKind::Minion, Vec2::new(100.0, 0.0), 15.0, 2.0, 1.0);
        resolve_enemies(&mut state);
        assert!((state.store.enemies[0].pos - Vec2::new(100.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_minion_contact_damages_and_dies() {
        let mut state = quiet_state();
        state
            .store
            .spawn_enemy(EnemyKind::Minion, Vec2::new(430.0, 300.0), 15.0, 2.0, 1.0);
        // A bullet sitting on the minion must survive: contact wins
        state.store.spawn_bullet(Vec2::new(428.0, 300.0), Vec2::ZERO, 60, false);
        resolve_enemies(&mut state);

        assert!(state.store.enemies.is_empty());
        assert_eq!(state.store.bullets.len(), 1);
        assert_eq!(state.energy, 80.0);
        assert_eq!(state.score, 0);
        let events = state.drain_events();
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::Explosion { color, .. } if *color == PLAYER_CYAN)),
            1
        );
    }

    #[test]
    fn test_boss_survives_contact() {
        let mut state = quiet_state();
        state.boss_active = true;
        state
            .store
            .spawn_enemy(EnemyKind::Boss, Vec2::new(450.0, 300.0), 40.0, 1.0, 30.0);
        resolve_enemies(&mut state);
        assert_eq!(state.store.enemies.len(), 1);
        assert_eq!(state.energy, 50.0);
        assert!(state.boss_active);

    }

    #[test]
    fn test_boss_resting_on_player_drains_every_tick() {
        let mut state = quiet_state();
        state.boss_active = true;
        state
            .store
            .spawn_enemy(EnemyKind::Boss, Vec2::new(450.0, 300.0), 40.0, 1.0, 30.0);
        resolve_enemies(&mut state);
        assert_eq!(state.energy, 50.0);
        assert!(!state.is_over());

        resolve_enemies(&mut state);
        assert_eq!(state.energy, 0.0);
        assert!(state.is_over());
        assert_eq!(state.store.enemies.len(), 1);
        let events = state.drain_events();
        assert_eq!(count(&events, |e| matches!(e, GameEvent::GameOver { .. })), 1);
    }

    #[test]
    fn test_boss_contact_ends_game_once() {
        let mut state = quiet_state();
        state.energy = 5.0;
        state
            .store
            .spawn_enemy(EnemyKind::Boss, Vec2::new(450.0, 300.0), 40.0, 1.0, 30.0);
        resolve_enemies(&mut state);
        assert_eq!(state.energy, 0.0);
        assert!(state.is_over());
        let events = state.drain_events();
        assert_eq!(count(&events, |e| matches!(e, GameEvent::GameOver { .. })), 1);
    }

    #[test]
    fn test_bullet_kills_minion() {
        let mut state = quiet_state();
        state
            .store
            .spawn_enemy(EnemyKind::Minion, Vec2::new(200.0, 300.0), 15.0, 0.0, 1.0);
        state.store.spawn_bullet(Vec2::new(210.0, 300.0), Vec2::ZERO, 60, false);
        resolve_enemies(&mut state);
        assert!(state.store.enemies.is_empty());
        assert!(state.store.bullets.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.progression.experience, 10);
        let events = state.drain_events();
        assert_eq!(count(&events, |e| *e == GameEvent::sound(SoundCue::Hit)), 1);
    }

    #[test]
    fn test_one_bullet_one_kill() {
        let mut state = quiet_state();
        // Two stacked minions, one bullet
        state
            .store
            .spawn_enemy(EnemyKind::Minion, Vec2::new(200.0, 300.0), 15.0, 0.0, 1.0);
        state
            .store
            .spawn_enemy(EnemyKind::Minion, Vec2::new(200.0, 300.0), 15.0, 0.0, 1.0);
        state.store.spawn_bullet(Vec2::new(200.0, 300.0), Vec2::ZERO, 60, false);
        resolve_enemies(&mut state);
        assert_eq!(state.store.enemies.len(), 1);
        assert!(state.store.bullets.is_empty());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_one_bullet_per_enemy_per_tick() {
        let mut state = quiet_state();
        state.boss_active = true;
        state
            .store
            .spawn_enemy(EnemyKind::Boss, Vec2::new(100.0, 100.0), 40.0, 0.0, 30.0);
        for _ in 0..3 {
            state.store.spawn_bullet(Vec2::new(100.0, 100.0), Vec2::ZERO, 60, false);
        }
        resolve_enemies(&mut state);
        assert_eq!(state.store.bullets.len(), 2);
        assert_eq!(state.store.enemies[0].hp, 29.0);
    }

    #[test]
    fn test_boss_kill_pays_out_and_clears_flag() {
        let mut state = quiet_state();
        state.boss_active = true;
        state.fire.damage = 5.0;
        state
            .store
            .spawn_enemy(EnemyKind::Boss, Vec2::new(100.0, 100.0), 40.0, 0.0, 5.0);
        state.store.spawn_bullet(Vec2::new(100.0, 100.0), Vec2::ZERO, 60, false);
        resolve_enemies(&mut state);
        assert!(state.store.enemies.is_empty());
        assert!(!state.boss_active);
        assert_eq!(state.score, 500);
        assert_eq!(state.progression.experience, 100);
        let events = state.drain_events();
        assert_eq!(count(&events, |e| matches!(e, GameEvent::BossDefeated { .. })), 1);
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::Explosion { particles: 24, .. })),
            1
        );
    }

    #[test]
    fn test_particles_shrink_and_expire() {
        let mut state = quiet_state();
        state.explode(Vec2::ZERO, ENEMY_RED, 4);
        let before: f32 = state.store.particles[0].size;
        integrate_particles(&mut state);
        assert!((state.store.particles[0].size - before * 0.9).abs() < 1e-5);
        for _ in 0..29 {
            integrate_particles(&mut state);
        }
        assert!(state.store.particles.is_empty());
    }
}
