use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::particle::EmitterType;

/// Emitter description edited in the designer and loaded from JSON.
///
/// Every `*_variance` field is a symmetric spread: a spawned value is
/// `base + variance * u` with `u` uniform in [-1, 1). Times are in ticks,
/// angles in degrees, colors as `[a, r, g, b]` in 0-255.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub emitter_type: EmitterType,
    /// Pool capacity; emission pauses while the pool is full.
    pub max_particles: usize,
    /// Particles per second.
    pub emission_rate: f32,
    /// How many simulation ticks make up one second.
    pub ticks_per_second: u32,

    pub lifespan: u32,
    pub lifespan_variance: u32,

    pub speed: f32,
    pub speed_variance: f32,
    pub angle: f32,
    pub angle_variance: f32,
    /// Spawn offset spread around the emitter origin.
    pub source_position_variance: [f32; 2],

    pub start_size: f32,
    pub start_size_variance: f32,
    pub finish_size: f32,
    pub finish_size_variance: f32,

    pub start_color: [f32; 4],
    pub start_color_variance: [f32; 4],
    pub finish_color: [f32; 4],
    pub finish_color_variance: [f32; 4],

    pub rotate_per_second: f32,
    pub rotate_per_second_variance: f32,

    // Gravity emitters
    pub gravity: [f32; 2],
    pub radial_acceleration: f32,
    pub radial_acceleration_variance: f32,
    pub tangential_acceleration: f32,
    pub tangential_acceleration_variance: f32,

    // Radius emitters
    pub min_radius: f32,
    pub min_radius_variance: f32,
    pub max_radius: f32,
    pub max_radius_variance: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            emitter_type: EmitterType::Gravity,
            max_particles: 500,
            emission_rate: 50.0,
            ticks_per_second: 1000,
            lifespan: 1000,
            lifespan_variance: 250,
            speed: 120.0,
            speed_variance: 30.0,
            angle: 270.0,
            angle_variance: 15.0,
            source_position_variance: [0.0, 0.0],
            start_size: 32.0,
            start_size_variance: 8.0,
            finish_size: 8.0,
            finish_size_variance: 0.0,
            start_color: [255.0, 255.0, 180.0, 60.0],
            start_color_variance: [0.0, 0.0, 20.0, 20.0],
            finish_color: [0.0, 255.0, 40.0, 0.0],
            finish_color_variance: [0.0; 4],
            rotate_per_second: 0.0,
            rotate_per_second_variance: 0.0,
            gravity: [0.0, 0.0],
            radial_acceleration: 0.0,
            radial_acceleration_variance: 0.0,
            tangential_acceleration: 0.0,
            tangential_acceleration_variance: 0.0,
            min_radius: 0.0,
            min_radius_variance: 0.0,
            max_radius: 100.0,
            max_radius_variance: 0.0,
        }
    }
}

impl EmitterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_particles == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.lifespan == 0 {
            return Err(ConfigError::ZeroLifespan);
        }
        if !self.emission_rate.is_finite() || self.emission_rate < 0.0 {
            return Err(ConfigError::InvalidEmissionRate(self.emission_rate));
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::InvalidTickRate);
        }
        Ok(())
    }

    /// Particles emitted per simulation tick.
    pub fn particles_per_tick(&self) -> f32 {
        self.emission_rate / self.ticks_per_second.max(1) as f32
    }

    // -- Builder pattern --

    pub fn with_emitter_type(mut self, emitter_type: EmitterType) -> Self {
        self.emitter_type = emitter_type;
        self
    }

    pub fn with_max_particles(mut self, max: usize) -> Self {
        self.max_particles = max;
        self
    }

    pub fn with_emission_rate(mut self, rate: f32) -> Self {
        self.emission_rate = rate;
        self
    }

    pub fn with_ticks_per_second(mut self, ticks: u32) -> Self {
        self.ticks_per_second = ticks;
        self
    }

    pub fn with_lifespan(mut self, lifespan: u32, variance: u32) -> Self {
        self.lifespan = lifespan;
        self.lifespan_variance = variance;
        self
    }

    pub fn with_speed(mut self, speed: f32, variance: f32) -> Self {
        self.speed = speed;
        self.speed_variance = variance;
        self
    }

    pub fn with_angle(mut self, angle: f32, variance: f32) -> Self {
        self.angle = angle;
        self.angle_variance = variance;
        self
    }

    pub fn with_sizes(mut self, start: f32, finish: f32) -> Self {
        self.start_size = start;
        self.finish_size = finish;
        self.start_size_variance = 0.0;
        self.finish_size_variance = 0.0;
        self
    }

    pub fn with_colors(mut self, start: [f32; 4], finish: [f32; 4]) -> Self {
        self.start_color = start;
        self.finish_color = finish;
        self.start_color_variance = [0.0; 4];
        self.finish_color_variance = [0.0; 4];
        self
    }

    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.gravity = [x, y];
        self
    }

    pub fn with_radius(mut self, min: f32, max: f32) -> Self {
        self.min_radius = min;
        self.max_radius = max;
        self
    }

    pub fn with_rotate_per_second(mut self, degrees: f32) -> Self {
        self.rotate_per_second = degrees;
        self
    }

    /// Zero every variance so spawns are exact copies of the base values.
    pub fn without_variance(mut self) -> Self {
        self.lifespan_variance = 0;
        self.speed_variance = 0.0;
        self.angle_variance = 0.0;
        self.source_position_variance = [0.0, 0.0];
        self.start_size_variance = 0.0;
        self.finish_size_variance = 0.0;
        self.start_color_variance = [0.0; 4];
        self.finish_color_variance = [0.0; 4];
        self.rotate_per_second_variance = 0.0;
        self.radial_acceleration_variance = 0.0;
        self.tangential_acceleration_variance = 0.0;
        self.min_radius_variance = 0.0;
        self.max_radius_variance = 0.0;
        self
    }
}
