use bytemuck::{Pod, Zeroable};

use crate::particle::{ParticleColor, ParticleTransform};

/// Per-particle sprite-batch data read by the editor's WebGPU renderer.
/// Must match the TypeScript layout: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Scale times cosine of the rotation.
    pub scos: f32,
    /// Scale times sine of the rotation.
    pub ssin: f32,
    pub tx: f32,
    pub ty: f32,
    /// Color channels in 0.0-1.0.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ParticleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(transform: &ParticleTransform, color: ParticleColor) -> Self {
        let [r, g, b, a] = color.to_rgba_f32();
        Self {
            scos: transform.scos(),
            ssin: transform.ssin(),
            tx: transform.tx(),
            ty: transform.ty(),
            r,
            g,
            b,
            a,
        }
    }
}

/// Instances for one frame, in pool slot order.
pub struct ParticleBuffer {
    instances: Vec<ParticleInstance>,
}

impl ParticleBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: ParticleInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for ParticleBuffer {
    fn default() -> Self {
        Self::new()
    }
}
