use glam::Vec2;

use crate::particle::ParticlePool;
use crate::renderer::instance::{ParticleBuffer, ParticleInstance};

/// Rebuild `buffer` from every live particle in `pool`.
///
/// Each particle's transform is refreshed for a sprite of `sprite_extent`
/// pixels before packing, so the buffer always reflects the latest tick.
pub fn build_particle_buffer(pool: &mut ParticlePool, sprite_extent: Vec2, buffer: &mut ParticleBuffer) {
    buffer.clear();
    for (_, particle) in pool.iter_mut() {
        let transform = particle.refresh_transform(sprite_extent);
        buffer.push(ParticleInstance::new(&transform, particle.color()));
    }
}
