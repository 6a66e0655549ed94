//! ember: the particle simulation kernel behind the ember effect editor.
//!
//! Particles live in a fixed [`ParticlePool`], are spawned by a
//! [`ParticleEmitter`] from an [`EmitterConfig`], and are packed into a
//! [`ParticleBuffer`] of transform + color instances for the sprite batch.

pub mod components;
pub mod core;
pub mod error;
pub mod particle;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use components::emitter::EmitterConfig;
pub use crate::core::time::{TickClock, MAX_FRAME_SECONDS};
pub use error::ConfigError;
pub use particle::{
    EmitterType, Particle, ParticleColor, ParticlePool, ParticleSpawn, ParticleTransform, SlotId,
};
pub use renderer::instance::{ParticleBuffer, ParticleInstance};
pub use systems::emitter::ParticleEmitter;
pub use systems::render::build_particle_buffer;
pub use systems::rng::Rng;
