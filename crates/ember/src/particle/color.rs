//! Packed 32-bit ARGB particle color.

use bytemuck::{Pod, Zeroable};

/// A color packed into a single 32-bit word.
///
/// Layout: alpha in bits 24-31, red 16-23, green 8-15, blue 0-7.
/// Each particle owns one and rewrites it every tick.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct ParticleColor(u32);

impl ParticleColor {
    pub const TRANSPARENT: Self = Self(0);
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Wrap an already packed ARGB word.
    pub const fn from_argb32(value: u32) -> Self {
        Self(value)
    }

    /// Pack four channels. Each input is masked to its low 8 bits.
    pub fn from_argb(a: i32, r: i32, g: i32, b: i32) -> Self {
        let mut color = Self::TRANSPARENT;
        color.update(a, r, g, b);
        color
    }

    /// The packed ARGB word.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Repack all four channels. Out-of-range inputs wrap mod 256.
    pub fn update(&mut self, a: i32, r: i32, g: i32, b: i32) {
        self.0 = ((a & 0xFF) as u32) << 24
            | ((r & 0xFF) as u32) << 16
            | ((g & 0xFF) as u32) << 8
            | (b & 0xFF) as u32;
    }

    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Interpolate each channel independently from `from` to `to`.
    ///
    /// Channels are truncated toward zero and clamped to [0, 255], so a
    /// `delta` outside [0, 1] saturates instead of wrapping.
    pub fn lerp(&mut self, from: ParticleColor, to: ParticleColor, delta: f32) {
        self.update(
            lerp_channel(from.alpha(), to.alpha(), delta),
            lerp_channel(from.red(), to.red(), delta),
            lerp_channel(from.green(), to.green(), delta),
            lerp_channel(from.blue(), to.blue(), delta),
        );
    }

    /// Channels normalised to 0.0-1.0, in `[r, g, b, a]` order for the GPU.
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            self.red() as f32 / 255.0,
            self.green() as f32 / 255.0,
            self.blue() as f32 / 255.0,
            self.alpha() as f32 / 255.0,
        ]
    }
}

impl From<u32> for ParticleColor {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[inline]
fn lerp_channel(from: u8, to: u8, delta: f32) -> i32 {
    let from = from as f32;
    let value = from + (to as f32 - from) * delta;
    (value as i32).clamp(0, 255)
}
