//! Entity collections
//!
//! Insertion order is id order. Systems that remove while iterating walk
//! indices from the back, so a removal never shifts an element that has not
//! been visited yet.

use glam::Vec2;

use super::state::{Bullet, Enemy, EnemyKind, Particle, Pickup, Player};

#[derive(Debug, Clone)]
pub struct EntityStore {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub pickups: Vec<Pickup>,
    /// Visual only, never affects gameplay
    pub particles: Vec<Particle>,
    next_id: u32,
}

impl EntityStore {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2, radius: f32, speed: f32, hp: f32) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            kind,
            pos,
            radius,
            speed,
            hp,
        });
        id
    }

    pub fn spawn_bullet(&mut self, pos: Vec2, vel: Vec2, ttl_ticks: u32, wobble: bool) -> u32 {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos,
            vel,
            ttl_ticks,
            age: 0,
            wobble,
        });
        id
    }

    pub fn spawn_pickup(&mut self, pos: Vec2, radius: f32) -> u32 {
        let id = self.next_entity_id();
        self.pickups.push(Pickup { id, pos, radius });
        id
    }

    /// Add a particle, dropping the oldest ones past `cap`
    pub fn push_particle(&mut self, particle: Particle, cap: usize) {
        if cap == 0 {
            return;
        }
        if self.particles.len() >= cap {
            let excess = self.particles.len() + 1 - cap;
            self.particles.drain(..excess);
        }
        self.particles.push(particle);
    }

    /// Remove every enemy at once, returning them in insertion order
    pub fn clear_enemies(&mut self) -> Vec<Enemy> {
        std::mem::take(&mut self.enemies)
    }

    pub fn has_boss(&self) -> bool {
        self.enemies.iter().any(Enemy::is_boss)
    }

    /// Closest enemy to `to`; ties go to the older enemy
    pub fn nearest_enemy(&self, to: Vec2) -> Option<&Enemy> {
        self.enemies.iter().min_by(|a, b| {
            a.pos
                .distance_squared(to)
                .partial_cmp(&b.pos.distance_squared(to))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EntityStore {
        EntityStore::new(Player::new(Vec2::new(400.0, 300.0), 20.0, 4.0))
    }

    #[test]
    fn test_ids_are_monotonic_across_kinds() {
        let mut store = store();
        let a = store.spawn_enemy(EnemyKind::Minion, Vec2::ZERO, 15.0, 2.0, 1.0);
        let b = store.spawn_bullet(Vec2::ZERO, Vec2::X, 60, false);
        let c = store.spawn_pickup(Vec2::ZERO, 15.0);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_nearest_enemy() {
        let mut store = store();
        assert!(store.nearest_enemy(Vec2::ZERO).is_none());
        store.spawn_enemy(EnemyKind::Minion, Vec2::new(100.0, 0.0), 15.0, 2.0, 1.0);
        let near = store.spawn_enemy(EnemyKind::Minion, Vec2::new(0.0, 50.0), 15.0, 2.0, 1.0);
        store.spawn_enemy(EnemyKind::Boss, Vec2::new(-80.0, -80.0), 40.0, 1.0, 30.0);
        assert_eq!(store.nearest_enemy(Vec2::ZERO).map(|e| e.id), Some(near));
    }

    #[test]
    fn test_nearest_enemy_tie_prefers_older() {
        let mut store = store();
        let first = store.spawn_enemy(EnemyKind::Minion, Vec2::new(10.0, 0.0), 15.0, 2.0, 1.0);
        store.spawn_enemy(EnemyKind::Minion, Vec2::new(-10.0, 0.0), 15.0, 2.0, 1.0);
        assert_eq!(store.nearest_enemy(Vec2::ZERO).map(|e| e.id), Some(first));
    }

    #[test]
    fn test_clear_enemies() {
        let mut store = store();
        store.spawn_enemy(EnemyKind::Minion, Vec2::ZERO, 15.0, 2.0, 1.0);
        store.spawn_enemy(EnemyKind::Boss, Vec2::ZERO, 40.0, 1.0, 30.0);
        assert!(store.has_boss());
        let cleared = store.clear_enemies();
        assert_eq!(cleared.len(), 2);
        assert!(store.enemies.is_empty());
        assert!(!store.has_boss());
    }

    #[test]
    fn test_particle_cap_drops_oldest() {
        let mut store = store();
        for i in 0..5 {
            store.push_particle(
                Particle {
                    pos: Vec2::new(i as f32, 0.0),
                    vel: Vec2::ZERO,
                    color: 0,
                    life: 30,
                    size: 3.0,
                },
                3,
            );
        }
        let xs: Vec<f32> = store.particles.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }
}
