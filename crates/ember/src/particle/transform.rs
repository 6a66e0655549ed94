use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Rotation, scale and translation packed into the four-scalar form a
/// sprite batch consumes directly: `[scos, ssin, tx, ty]`.
///
/// A local sprite point `p` maps to
/// `(scos * p.x - ssin * p.y + tx, ssin * p.x + scos * p.y + ty)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleTransform {
    scos: f32,
    ssin: f32,
    tx: f32,
    ty: f32,
}

impl Default for ParticleTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ParticleTransform {
    pub const IDENTITY: Self = Self {
        scos: 1.0,
        ssin: 0.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Build a transform; see [`ParticleTransform::update`].
    pub fn new(
        rotation: f32,
        scale: f32,
        anchor_x: f32,
        anchor_y: f32,
        translate_x: f32,
        translate_y: f32,
    ) -> Self {
        let mut transform = Self::IDENTITY;
        transform.update(rotation, scale, anchor_x, anchor_y, translate_x, translate_y);
        transform
    }

    /// Recompute from a rotation (radians) and uniform scale about the
    /// anchor, followed by a translation. The anchor lands on the
    /// translation point.
    pub fn update(
        &mut self,
        rotation: f32,
        scale: f32,
        anchor_x: f32,
        anchor_y: f32,
        translate_x: f32,
        translate_y: f32,
    ) {
        let (sin, cos) = rotation.sin_cos();
        self.scos = cos * scale;
        self.ssin = sin * scale;
        self.tx = translate_x - self.scos * anchor_x + self.ssin * anchor_y;
        self.ty = translate_y - self.ssin * anchor_x - self.scos * anchor_y;
    }

    pub fn scos(&self) -> f32 {
        self.scos
    }

    pub fn ssin(&self) -> f32 {
        self.ssin
    }

    pub fn tx(&self) -> f32 {
        self.tx
    }

    pub fn ty(&self) -> f32 {
        self.ty
    }

    /// Map a point in sprite space into world space.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.scos * point.x - self.ssin * point.y + self.tx,
            self.ssin * point.x + self.scos * point.y + self.ty,
        )
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.scos, self.ssin, self.tx, self.ty]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    #[test]
    fn translation_only() {
        let t = ParticleTransform::new(0.0, 1.0, 0.0, 0.0, 5.0, 7.0);
        assert_eq!(t.to_array(), [1.0, 0.0, 5.0, 7.0]);
    }

    #[test]
    fn quarter_turn_scaled() {
        let t = ParticleTransform::new(FRAC_PI_2, 2.0, 0.0, 0.0, 0.0, 0.0);
        assert!(t.scos().abs() < EPS);
        assert!((t.ssin() - 2.0).abs() < EPS);

        let p = t.apply(Vec2::new(1.0, 0.0));
        assert!(p.x.abs() < EPS);
        assert!((p.y - 2.0).abs() < EPS);
    }

    #[test]
    fn anchor_maps_onto_translation() {
        let t = ParticleTransform::new(0.7, 1.5, 16.0, 8.0, 100.0, -40.0);
        let p = t.apply(Vec2::new(16.0, 8.0));
        assert!((p.x - 100.0).abs() < EPS, "x was {}", p.x);
        assert!((p.y + 40.0).abs() < EPS, "y was {}", p.y);
    }

    #[test]
    fn layout_is_four_floats() {
        assert_eq!(std::mem::size_of::<ParticleTransform>(), 16);
    }
}
