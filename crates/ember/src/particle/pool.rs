//! Fixed-capacity particle arena with a free list.
//!
//! All storage is allocated up front. Spawning claims a free slot and
//! overwrites it in place; ticking returns dead particles to the free list.

use super::particle::{Particle, ParticleSpawn};

/// Index of a claimed slot in a [`ParticlePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u32);

impl SlotId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub struct ParticlePool {
    slots: Box<[Particle]>,
    live: Box<[bool]>,
    /// Free slot indices; popped from the back so slot 0 is claimed first.
    free: Vec<u32>,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(u32::MAX as usize);
        Self {
            slots: vec![Particle::default(); capacity].into_boxed_slice(),
            live: vec![false; capacity].into_boxed_slice(),
            free: (0..capacity as u32).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.capacity() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Claim a slot and initialize it. Returns `None` when the pool is full.
    pub fn spawn(&mut self, spawn: &ParticleSpawn) -> Option<SlotId> {
        let index = self.free.pop()?;
        let slot = index as usize;
        self.slots[slot].initialize(spawn);
        self.live[slot] = true;
        Some(SlotId(index))
    }

    /// Advance every live particle and recycle the ones that died.
    /// Returns how many slots were freed.
    pub fn tick(&mut self, delta_ticks: u32) -> usize {
        let mut recycled = 0;
        for (index, (particle, live)) in self.slots.iter_mut().zip(self.live.iter_mut()).enumerate() {
            if !*live {
                continue;
            }
            particle.update(delta_ticks);
            if particle.is_dead() {
                *live = false;
                self.free.push(index as u32);
                recycled += 1;
            }
        }
        recycled
    }

    pub fn get(&self, id: SlotId) -> Option<&Particle> {
        let slot = id.index();
        match self.live.get(slot) {
            Some(true) => Some(&self.slots[slot]),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Particle> {
        let slot = id.index();
        match self.live.get(slot) {
            Some(true) => Some(&mut self.slots[slot]),
            _ => None,
        }
    }

    /// Live particles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Particle)> {
        self.slots
            .iter()
            .zip(self.live.iter())
            .enumerate()
            .filter(|(_, (_, live))| **live)
            .map(|(index, (particle, _))| (SlotId(index as u32), particle))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut Particle)> {
        self.slots
            .iter_mut()
            .zip(self.live.iter())
            .enumerate()
            .filter(|(_, (_, live))| **live)
            .map(|(index, (particle, _))| (SlotId(index as u32), particle))
    }

    /// Release every slot without touching the storage allocation.
    pub fn clear(&mut self) {
        self.live.iter_mut().for_each(|live| *live = false);
        self.free.clear();
        self.free.extend((0..self.capacity() as u32).rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::particle::EmitterType;
    use glam::Vec2;

    fn spawn(lifespan: u32) -> ParticleSpawn {
        ParticleSpawn::new(EmitterType::Gravity, lifespan, 1.0, 0.0, Vec2::ZERO)
    }

    #[test]
    fn spawn_claims_lowest_slot_first() {
        let mut pool = ParticlePool::new(4);
        assert_eq!(pool.spawn(&spawn(10)), Some(SlotId(0)));
        assert_eq!(pool.spawn(&spawn(10)), Some(SlotId(1)));
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn spawn_fails_when_full() {
        let mut pool = ParticlePool::new(2);
        assert!(pool.spawn(&spawn(10)).is_some());
        assert!(pool.spawn(&spawn(10)).is_some());
        assert!(pool.is_full());
        assert!(pool.spawn(&spawn(10)).is_none());
    }

    #[test]
    fn zero_capacity_pool_never_spawns() {
        let mut pool = ParticlePool::new(0);
        assert!(pool.spawn(&spawn(10)).is_none());
        assert_eq!(pool.tick(1), 0);
    }

    #[test]
    fn tick_recycles_dead_particles() {
        let mut pool = ParticlePool::new(3);
        let short = pool.spawn(&spawn(5)).unwrap();
        let long = pool.spawn(&spawn(50)).unwrap();

        assert_eq!(pool.tick(5), 0, "age == lifespan keeps the slot");
        assert_eq!(pool.tick(1), 1);
        assert!(pool.get(short).is_none());
        assert!(pool.get(long).is_some());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn recycled_slot_is_reused_with_fresh_state() {
        let mut pool = ParticlePool::new(1);
        let first = pool.spawn(&spawn(1)).unwrap();
        pool.tick(2);
        assert!(pool.is_empty());

        let second = pool.spawn(&spawn(7)).unwrap();
        assert_eq!(first, second);
        let p = pool.get(second).unwrap();
        assert_eq!(p.age(), 0);
        assert_eq!(p.lifespan(), 7);
    }

    #[test]
    fn iter_yields_live_slots_in_order() {
        let mut pool = ParticlePool::new(4);
        pool.spawn(&spawn(1));
        pool.spawn(&spawn(100));
        pool.spawn(&spawn(100));
        pool.tick(2);

        let ids: Vec<SlotId> = pool.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![SlotId(1), SlotId(2)]);
        assert_eq!(pool.iter_mut().count(), 2);
    }

    #[test]
    fn clear_frees_everything() {
        let mut pool = ParticlePool::new(3);
        pool.spawn(&spawn(10));
        pool.spawn(&spawn(10));
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.free_count(), 3);
        assert_eq!(pool.spawn(&spawn(10)), Some(SlotId(0)));
    }
}
