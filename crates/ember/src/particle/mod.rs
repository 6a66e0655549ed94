//! Particle kernel: the per-particle integrator, its render-attribute
//! encoders, and the fixed-capacity pool that owns the particles.

pub mod color;
pub mod particle;
pub mod pool;
pub mod transform;

pub use color::ParticleColor;
pub use particle::{EmitterType, Particle, ParticleSpawn, MAX_LIFESPAN, MIN_RADIAL_DISTANCE};
pub use pool::{ParticlePool, SlotId};
pub use transform::ParticleTransform;
