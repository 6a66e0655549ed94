//! Per-particle state and the tick integrator.
//!
//! Angles are degrees at this layer and only become radians for trig and
//! for the packed transform handed to the renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::ParticleColor;
use super::transform::ParticleTransform;

/// Lower bound on the emitter distance used to normalise the radial vector.
pub const MIN_RADIAL_DISTANCE: f32 = 0.01;

/// Longest lifespan a particle accepts, one below the saturating age ceiling.
pub const MAX_LIFESPAN: u32 = u32::MAX - 1;

/// Motion model a particle follows for its whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitterType {
    /// Velocity integrated from gravity plus radial and tangential acceleration.
    #[default]
    Gravity,
    /// Position derived from a shrinking/growing radius around the emitter.
    Radius,
}

/// Everything needed to (re)spawn a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpawn {
    pub emitter_type: EmitterType,
    /// Life length in ticks.
    pub lifespan: u32,
    pub speed: f32,
    /// Launch direction in degrees.
    pub angle: f32,
    /// Anchor the particle's motion is computed from.
    pub emitter: Vec2,
    pub start_size: f32,
    pub finish_size: f32,
    pub start_color: ParticleColor,
    pub finish_color: ParticleColor,
    /// Degrees per life, subtracted from the angle as the particle ages.
    pub rotate_per_second: f32,
    pub radial_acceleration: f32,
    pub tangential_acceleration: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub gravity: Vec2,
}

impl ParticleSpawn {
    pub fn new(emitter_type: EmitterType, lifespan: u32, speed: f32, angle: f32, emitter: Vec2) -> Self {
        Self {
            emitter_type,
            lifespan,
            speed,
            angle,
            emitter,
            start_size: 1.0,
            finish_size: 1.0,
            start_color: ParticleColor::WHITE,
            finish_color: ParticleColor::WHITE,
            rotate_per_second: 0.0,
            radial_acceleration: 0.0,
            tangential_acceleration: 0.0,
            min_radius: 0.0,
            max_radius: 0.0,
            gravity: Vec2::ZERO,
        }
    }

    // -- Builder pattern --

    pub fn with_size(mut self, start: f32, finish: f32) -> Self {
        self.start_size = start;
        self.finish_size = finish;
        self
    }

    pub fn with_color(mut self, start: ParticleColor, finish: ParticleColor) -> Self {
        self.start_color = start;
        self.finish_color = finish;
        self
    }

    pub fn with_rotation(mut self, rotate_per_second: f32) -> Self {
        self.rotate_per_second = rotate_per_second;
        self
    }

    pub fn with_acceleration(mut self, radial: f32, tangential: f32) -> Self {
        self.radial_acceleration = radial;
        self.tangential_acceleration = tangential;
        self
    }

    pub fn with_radius(mut self, min: f32, max: f32) -> Self {
        self.min_radius = min;
        self.max_radius = max;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }
}

/// A pooled simulation record. Slots are claimed with [`Particle::initialize`]
/// and stepped with [`Particle::update`] until [`Particle::is_dead`].
#[derive(Debug, Clone)]
pub struct Particle {
    emitter_type: EmitterType,
    age: u32,
    lifespan: u32,

    position: Vec2,
    velocity: Vec2,
    angle: f32,
    radius: f32,
    radius_delta: f32,
    emitter: Vec2,

    gravity: Vec2,
    radial_acceleration: f32,
    tangential_acceleration: f32,
    rotate_per_second: f32,

    start_size: f32,
    finish_size: f32,
    size: f32,
    start_color: ParticleColor,
    finish_color: ParticleColor,
    color: ParticleColor,
    transform: ParticleTransform,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            emitter_type: EmitterType::Gravity,
            age: 0,
            lifespan: 1,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            radius: 0.0,
            radius_delta: 0.0,
            emitter: Vec2::ZERO,
            gravity: Vec2::ZERO,
            radial_acceleration: 0.0,
            tangential_acceleration: 0.0,
            rotate_per_second: 0.0,
            start_size: 0.0,
            finish_size: 0.0,
            size: 0.0,
            start_color: ParticleColor::TRANSPARENT,
            finish_color: ParticleColor::TRANSPARENT,
            color: ParticleColor::TRANSPARENT,
            transform: ParticleTransform::IDENTITY,
        }
    }
}

impl Particle {
    pub fn new(spawn: &ParticleSpawn) -> Self {
        let mut particle = Self::default();
        particle.initialize(spawn);
        particle
    }

    /// Overwrite every field for a fresh life. Age always restarts at 0 and the
    /// lifespan is kept in `1..=MAX_LIFESPAN` so a saturating age can still exceed it.
    pub fn initialize(&mut self, spawn: &ParticleSpawn) {
        let (sin, cos) = spawn.angle.to_radians().sin_cos();
        *self = Self {
            emitter_type: spawn.emitter_type,
            age: 0,
            lifespan: spawn.lifespan.clamp(1, MAX_LIFESPAN),
            position: spawn.emitter,
            velocity: Vec2::new(cos, sin) * spawn.speed,
            angle: spawn.angle,
            radius: spawn.max_radius,
            radius_delta: spawn.min_radius - spawn.max_radius,
            emitter: spawn.emitter,
            gravity: spawn.gravity,
            radial_acceleration: spawn.radial_acceleration,
            tangential_acceleration: spawn.tangential_acceleration,
            rotate_per_second: spawn.rotate_per_second,
            start_size: spawn.start_size,
            finish_size: spawn.finish_size,
            size: spawn.start_size,
            start_color: spawn.start_color,
            finish_color: spawn.finish_color,
            color: spawn.start_color,
            transform: ParticleTransform::IDENTITY,
        };
    }

    /// Advance by `delta_ticks`. Does nothing once the particle is dead.
    pub fn update(&mut self, delta_ticks: u32) {
        if self.is_dead() {
            return;
        }

        self.age = self.age.saturating_add(delta_ticks);

        let lifespan = self.lifespan as f32;
        let ratio = self.age as f32 / lifespan;
        let rate = delta_ticks as f32 / lifespan;

        self.angle -= self.rotate_per_second * rate;

        match self.emitter_type {
            EmitterType::Radius => {
                self.radius += self.radius_delta * rate;
                let (sin, cos) = self.angle.to_radians().sin_cos();
                self.position = self.emitter - Vec2::new(cos, sin) * self.radius;
            }
            EmitterType::Gravity => {
                let offset = self.position - self.emitter;
                let distance = offset.length().max(MIN_RADIAL_DISTANCE);
                let radial = offset / distance;
                let tangential = Vec2::new(-radial.y, radial.x);

                let acceleration = self.gravity
                    + radial * self.radial_acceleration
                    + tangential * self.tangential_acceleration;

                self.velocity += acceleration * rate;
                self.position += self.velocity * rate;
            }
        }

        self.color.lerp(self.start_color, self.finish_color, ratio);
        self.size = self.start_size + (self.finish_size - self.start_size) * ratio;
    }

    /// Dead strictly after the lifespan; `age == lifespan` is still alive.
    pub fn is_dead(&self) -> bool {
        self.age > self.lifespan
    }

    /// Refresh the packed transform for a sprite of `sprite_extent` pixels,
    /// rotated about its centre and scaled so its width equals `size`.
    pub fn refresh_transform(&mut self, sprite_extent: Vec2) -> ParticleTransform {
        let scale = if sprite_extent.x > 0.0 {
            self.size / sprite_extent.x
        } else {
            self.size
        };
        let anchor = sprite_extent * 0.5;
        self.transform.update(
            self.angle.to_radians(),
            scale,
            anchor.x,
            anchor.y,
            self.position.x,
            self.position.y,
        );
        self.transform
    }

    // -- Accessors --

    pub fn emitter_type(&self) -> EmitterType {
        self.emitter_type
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }

    /// Fraction of life elapsed.
    pub fn ratio(&self) -> f32 {
        self.age as f32 / self.lifespan as f32
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn emitter(&self) -> Vec2 {
        self.emitter
    }

    /// Current angle in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> ParticleColor {
        self.color
    }

    /// Transform as of the last [`Particle::refresh_transform`].
    pub fn transform(&self) -> ParticleTransform {
        self.transform
    }
}
