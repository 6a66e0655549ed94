use glam::Vec2;

use crate::components::emitter::EmitterConfig;
use crate::particle::{ParticleColor, ParticlePool, ParticleSpawn};
use crate::systems::rng::Rng;

/// Spawns particles from an [`EmitterConfig`] into a fixed pool and steps them.
pub struct ParticleEmitter {
    config: EmitterConfig,
    pool: ParticlePool,
    rng: Rng,
    origin: Vec2,
    active: bool,
    /// Fractional particles carried between ticks.
    accumulator: f32,
    /// Set while emission is being dropped because the pool is full.
    saturated: bool,
    /// Set once a sampled value has been clamped under the current config.
    clamp_logged: bool,
}

impl ParticleEmitter {
    pub fn new(config: EmitterConfig, seed: u64) -> Self {
        log::debug!(
            "emitter: {:?}, capacity {}, {} particles/s",
            config.emitter_type,
            config.max_particles,
            config.emission_rate
        );
        Self {
            pool: ParticlePool::new(config.max_particles),
            config,
            rng: Rng::new(seed),
            origin: Vec2::ZERO,
            active: true,
            accumulator: 0.0,
            saturated: false,
            clamp_logged: false,
        }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Move the emitter. Particles already alive keep their spawn anchor.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pause or resume continuous emission. Live particles keep simulating.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.accumulator = 0.0;
        }
    }

    pub fn live_count(&self) -> usize {
        self.pool.len()
    }

    /// Swap in a new config. The pool is rebuilt only when its capacity
    /// changes; emission timing always restarts.
    pub fn reconfigure(&mut self, config: EmitterConfig) {
        if config.max_particles != self.pool.capacity() {
            log::debug!(
                "emitter: resizing pool {} -> {}",
                self.pool.capacity(),
                config.max_particles
            );
            self.pool = ParticlePool::new(config.max_particles);
        }
        self.config = config;
        self.accumulator = 0.0;
        self.saturated = false;
        self.clamp_logged = false;
    }

    /// Kill every live particle and reset emission timing.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.accumulator = 0.0;
        self.saturated = false;
    }

    /// Step live particles by `delta_ticks`, then emit according to the rate.
    /// Returns the number of particles spawned this tick.
    pub fn tick(&mut self, delta_ticks: u32) -> usize {
        self.pool.tick(delta_ticks);

        if !self.active || delta_ticks == 0 {
            return 0;
        }

        self.accumulator += self.config.particles_per_tick() * delta_ticks as f32;
        if !self.accumulator.is_finite() || self.accumulator < 0.0 {
            // Unvalidated rate (NaN, infinite or negative): emit nothing.
            self.accumulator = 0.0;
            return 0;
        }
        let count = self.accumulator as usize;
        self.accumulator -= count as f32;
        self.emit(count)
    }

    /// Spawn `count` particles immediately, bounded by free slots.
    pub fn burst(&mut self, count: usize) -> usize {
        self.emit(count)
    }

    fn emit(&mut self, count: usize) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            let spawn = self.sample_spawn();
            if self.pool.spawn(&spawn).is_none() {
                if !self.saturated {
                    log::debug!("emitter: pool full at {} particles", self.pool.capacity());
                    self.saturated = true;
                }
                break;
            }
            spawned += 1;
        }
        if spawned > 0 && !self.pool.is_full() {
            self.saturated = false;
        }
        spawned
    }

    /// Draw one particle's parameters from the config's base values and variances.
    fn sample_spawn(&mut self) -> ParticleSpawn {
        let c = &self.config;
        let rng = &mut self.rng;

        let mut clamped = false;
        let mut at_least = |value: f32, min: f32| {
            if value < min {
                clamped = true;
                min
            } else {
                value
            }
        };

        let raw_lifespan = rng
            .vary(c.lifespan as f32, c.lifespan_variance as f32)
            .round();
        let lifespan = at_least(raw_lifespan, 1.0) as u32;
        let emitter = self.origin
            + Vec2::new(
                rng.vary(0.0, c.source_position_variance[0]),
                rng.vary(0.0, c.source_position_variance[1]),
            );
        let speed = rng.vary(c.speed, c.speed_variance);
        let angle = rng.vary(c.angle, c.angle_variance);

        let start_size = at_least(rng.vary(c.start_size, c.start_size_variance), 0.0);
        let finish_size = at_least(rng.vary(c.finish_size, c.finish_size_variance), 0.0);
        let (start_color, start_clamped) = sample_color(rng, c.start_color, c.start_color_variance);
        let (finish_color, finish_clamped) = sample_color(rng, c.finish_color, c.finish_color_variance);

        let spawn = ParticleSpawn {
            emitter_type: c.emitter_type,
            lifespan,
            speed,
            angle,
            emitter,
            start_size,
            finish_size,
            start_color,
            finish_color,
            rotate_per_second: rng.vary(c.rotate_per_second, c.rotate_per_second_variance),
            radial_acceleration: rng.vary(c.radial_acceleration, c.radial_acceleration_variance),
            tangential_acceleration: rng.vary(
                c.tangential_acceleration,
                c.tangential_acceleration_variance,
            ),
            min_radius: rng.vary(c.min_radius, c.min_radius_variance),
            max_radius: rng.vary(c.max_radius, c.max_radius_variance),
            gravity: Vec2::from(c.gravity),
        };

        if (clamped || start_clamped || finish_clamped) && !self.clamp_logged {
            log::debug!("emitter: sampled lifespan, size or color clamped to its valid range");
            self.clamp_logged = true;
        }
        spawn
    }

    /// Whether a sampled value has been clamped since the last (re)configure.
    pub fn clamped_samples(&self) -> bool {
        self.clamp_logged
    }
}

/// Sample an `[a, r, g, b]` color, clamping each channel to 0-255 so the
/// packer never has to wrap it. The flag reports whether any channel clamped.
fn sample_color(rng: &mut Rng, base: [f32; 4], variance: [f32; 4]) -> (ParticleColor, bool) {
    let mut channels = [0i32; 4];
    let mut clamped = false;
    for (out, (b, v)) in channels.iter_mut().zip(base.iter().zip(variance.iter())) {
        let value = rng.vary(*b, *v);
        let bounded = value.clamp(0.0, 255.0);
        clamped |= bounded != value;
        *out = bounded as i32;
    }
    let [a, r, g, b] = channels;
    (ParticleColor::from_argb(a, r, g, b), clamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::EmitterType;

    fn exact_config() -> EmitterConfig {
        EmitterConfig::new()
            .without_variance()
            .with_max_particles(10)
            .with_emission_rate(100.0)
            .with_ticks_per_second(1000)
            .with_lifespan(100, 0)
    }

    #[test]
    fn continuous_emission_accumulates_fractions() {
        let mut e = ParticleEmitter::new(exact_config(), 1);
        // 0.1 particles per tick
        assert_eq!(e.tick(5), 0);
        assert_eq!(e.tick(5), 1);
        assert_eq!(e.tick(20), 2);
        assert_eq!(e.live_count(), 3);
    }

    #[test]
    fn emission_stops_at_capacity() {
        let mut e = ParticleEmitter::new(exact_config().with_max_particles(4), 1);
        assert_eq!(e.burst(10), 4);
        assert!(e.pool().is_full());
        assert_eq!(e.tick(50), 0);
    }

    #[test]
    fn dead_particles_free_slots_for_new_ones() {
        let mut e = ParticleEmitter::new(exact_config().with_max_particles(2).with_emission_rate(0.0), 1);
        e.burst(2);
        e.tick(100);
        assert_eq!(e.live_count(), 2, "age == lifespan still alive");
        e.tick(1);
        assert_eq!(e.live_count(), 0);
        assert_eq!(e.burst(2), 2);
    }

    #[test]
    fn inactive_emitter_only_simulates() {
        let mut e = ParticleEmitter::new(exact_config(), 1);
        e.burst(1);
        e.set_active(false);
        assert_eq!(e.tick(50), 0);
        let p = e.pool().iter().next().unwrap().1;
        assert_eq!(p.age(), 50);
    }

    #[test]
    fn spawn_without_variance_matches_config() {
        let config = exact_config()
            .with_speed(40.0, 0.0)
            .with_angle(0.0, 0.0)
            .with_sizes(12.0, 4.0)
            .with_colors([255.0, 10.0, 20.0, 30.0], [0.0, 0.0, 0.0, 0.0]);
        let mut e = ParticleEmitter::new(config, 3);
        e.set_origin(Vec2::new(50.0, 60.0));
        e.burst(1);

        let (_, p) = e.pool().iter().next().unwrap();
        assert_eq!(p.position(), Vec2::new(50.0, 60.0));
        assert_eq!(p.lifespan(), 100);
        assert_eq!(p.size(), 12.0);
        assert_eq!(p.color(), ParticleColor::from_argb(255, 10, 20, 30));
        assert!((p.velocity().x - 40.0).abs() < 1e-4);
    }

    #[test]
    fn variance_stays_in_bounds() {
        let config = exact_config()
            .with_max_particles(200)
            .with_lifespan(100, 20)
            .with_speed(50.0, 10.0);
        let mut e = ParticleEmitter::new(config, 11);
        e.burst(200);
        for (_, p) in e.pool().iter() {
            assert!((80..=120).contains(&p.lifespan()), "lifespan {}", p.lifespan());
            let speed = p.velocity().length();
            assert!((40.0..=60.0).contains(&speed), "speed {}", speed);
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let config = EmitterConfig::default().with_max_particles(20);
        let mut a = ParticleEmitter::new(config.clone(), 5);
        let mut b = ParticleEmitter::new(config, 5);
        a.burst(20);
        b.burst(20);
        for ((_, pa), (_, pb)) in a.pool().iter().zip(b.pool().iter()) {
            assert_eq!(pa.velocity(), pb.velocity());
            assert_eq!(pa.color(), pb.color());
        }
    }

    #[test]
    fn radius_emitter_spawns_on_max_radius() {
        let config = exact_config()
            .with_emitter_type(EmitterType::Radius)
            .with_radius(0.0, 100.0);
        let mut e = ParticleEmitter::new(config, 1);
        e.burst(1);
        e.tick(50);
        let (_, p) = e.pool().iter().next().unwrap();
        assert!((p.radius() - 50.0).abs() < 1e-3);
        assert!((p.position().length() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn reconfigure_keeps_pool_when_capacity_unchanged() {
        let mut e = ParticleEmitter::new(exact_config(), 1);
        e.burst(3);
        e.reconfigure(exact_config().with_speed(999.0, 0.0));
        assert_eq!(e.live_count(), 3);

        e.reconfigure(exact_config().with_max_particles(32));
        assert_eq!(e.live_count(), 0);
        assert_eq!(e.pool().capacity(), 32);
    }

    #[test]
    fn reconfigure_recovers_from_nan_rate() {
        let mut e = ParticleEmitter::new(exact_config().with_emission_rate(f32::NAN), 1);
        assert_eq!(e.tick(10), 0);

        e.reconfigure(exact_config().with_emission_rate(1000.0));
        assert_eq!(e.tick(10), 10);
    }

    #[test]
    fn non_finite_rate_emits_nothing_and_keeps_accumulator_clean() {
        let mut e = ParticleEmitter::new(exact_config().with_emission_rate(f32::INFINITY), 1);
        assert_eq!(e.tick(10), 0);
        assert_eq!(e.accumulator, 0.0);

        let mut negative = ParticleEmitter::new(exact_config().with_emission_rate(-50.0), 1);
        assert_eq!(negative.tick(10), 0);
        assert_eq!(negative.accumulator, 0.0);
    }

    #[test]
    fn clamped_samples_are_flagged_until_reconfigure() {
        let config = exact_config()
            .with_sizes(-5.0, 4.0)
            .with_colors([300.0, 0.0, 0.0, 0.0], [255.0, 0.0, 0.0, 0.0]);
        let mut e = ParticleEmitter::new(config, 1);
        assert!(!e.clamped_samples());
        e.burst(1);
        assert!(e.clamped_samples());

        let (_, p) = e.pool().iter().next().unwrap();
        assert_eq!(p.size(), 0.0);
        assert_eq!(p.color().alpha(), 255);

        e.reconfigure(exact_config());
        assert!(!e.clamped_samples());
        e.burst(1);
        assert!(!e.clamped_samples());
    }

    #[test]
    fn reset_clears_particles() {
        let mut e = ParticleEmitter::new(exact_config(), 1);
        e.burst(5);
        e.reset();
        assert_eq!(e.live_count(), 0);
    }
}
