use ember::{
    build_particle_buffer, ConfigError, EmitterConfig, ParticleBuffer, ParticleEmitter, TickClock,
};
use glam::Vec2;

/// Drives one emitter preview for the editor: frame time in, packed
/// instances out.
///
/// The browser build keeps a single runner in a `thread_local!` and exposes
/// free functions via `#[wasm_bindgen]`.
pub struct EditorRunner {
    emitter: ParticleEmitter,
    clock: TickClock,
    buffer: ParticleBuffer,
    sprite_extent: Vec2,
}

impl EditorRunner {
    pub const DEFAULT_SPRITE_EXTENT: f32 = 32.0;

    pub fn new(config: EmitterConfig, seed: u64) -> Self {
        let clock = TickClock::new(config.ticks_per_second);
        let buffer = ParticleBuffer::with_capacity(config.max_particles);
        Self {
            emitter: ParticleEmitter::new(config, seed),
            clock,
            buffer,
            sprite_extent: Vec2::splat(Self::DEFAULT_SPRITE_EXTENT),
        }
    }

    pub fn from_json(json: &str, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::new(EmitterConfig::from_json(json)?, seed))
    }

    /// Replace the emitter config. Live particles survive unless the
    /// capacity changed. On error the previous config stays in effect.
    pub fn load_config(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = EmitterConfig::from_json(json)?;
        if config.ticks_per_second != self.clock.ticks_per_second() {
            self.clock = TickClock::new(config.ticks_per_second);
        }
        log::info!(
            "editor: loaded {:?} emitter, {} particles max",
            config.emitter_type,
            config.max_particles
        );
        self.emitter.reconfigure(config);
        Ok(())
    }

    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.emitter.set_origin(Vec2::new(x, y));
    }

    pub fn set_active(&mut self, active: bool) {
        self.emitter.set_active(active);
    }

    pub fn set_sprite_extent(&mut self, width: f32, height: f32) {
        self.sprite_extent = Vec2::new(width, height);
    }

    pub fn burst(&mut self, count: u32) -> u32 {
        self.emitter.burst(count as usize) as u32
    }

    pub fn reset(&mut self) {
        self.emitter.reset();
        self.buffer.clear();
    }

    /// Run one frame: convert time to ticks, step the emitter, repack instances.
    pub fn tick(&mut self, frame_seconds: f32) {
        let ticks = self.clock.accumulate(frame_seconds);
        if ticks > 0 {
            self.emitter.tick(ticks);
        }
        build_particle_buffer(self.emitter.pool_mut(), self.sprite_extent, &mut self.buffer);
    }

    pub fn emitter(&self) -> &ParticleEmitter {
        &self.emitter
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.buffer.instance_count()
    }

    pub fn live_count(&self) -> u32 {
        self.emitter.live_count() as u32
    }
}
