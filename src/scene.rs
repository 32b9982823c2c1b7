use std::path::Path;

use bincode::{Decode, Encode};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::codec::{self, DecodeError, EncodeError, Record, SectionKind};

const F32_SIZE: usize = size_of::<f32>();
const VEC3_SIZE: usize = 3 * F32_SIZE;

/// Sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Sphere {
    #[bincode(with_serde)]
    pub center: Vec3,
    pub radius: f32,
    #[bincode(with_serde)]
    pub color: Vec3,
    /// Fraction of light reflected, in [0, 1].
    #[serde(default)]
    pub reflection: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, color: Vec3) -> Self {
        Self {
            center,
            radius,
            color,
            reflection: 0.0,
        }
    }

    pub fn with_reflection(mut self, reflection: f32) -> Self {
        self.reflection = reflection;
        self
    }
}

impl Record for Sphere {
    const KIND: SectionKind = SectionKind::Sphere;
    const SIZE: usize = VEC3_SIZE + F32_SIZE + VEC3_SIZE + F32_SIZE;
}

/// Infinite plane going through `point`, facing `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Plane {
    #[bincode(with_serde)]
    pub point: Vec3,
    #[bincode(with_serde)]
    pub normal: Vec3,
    #[bincode(with_serde)]
    pub color: Vec3,
    #[serde(default)]
    pub reflection: f32,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3, color: Vec3) -> Self {
        Self {
            point,
            normal,
            color,
            reflection: 0.0,
        }
    }

    pub fn with_reflection(mut self, reflection: f32) -> Self {
        self.reflection = reflection;
        self
    }
}

impl Record for Plane {
    const KIND: SectionKind = SectionKind::Plane;
    const SIZE: usize = VEC3_SIZE + VEC3_SIZE + VEC3_SIZE + F32_SIZE;
}

/// Point light.
#[derive(Debug, Clone, Copy, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Light {
    #[bincode(with_serde)]
    pub position: Vec3,
    #[bincode(with_serde)]
    pub color: Vec3,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

fn default_intensity() -> f32 {
    1.0
}

impl Light {
    pub fn new(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }
}

impl Record for Light {
    const KIND: SectionKind = SectionKind::Light;
    const SIZE: usize = VEC3_SIZE + VEC3_SIZE + F32_SIZE;
}

/// Everything a `.robj` file stores: one collection per record kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spheres: Vec<Sphere>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub planes: Vec<Plane>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, planes: Vec<Plane>, lights: Vec<Light>) -> Self {
        Self {
            spheres,
            planes,
            lights,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty() && self.planes.is_empty() && self.lights.is_empty()
    }

    /// Encode this scene into a `.robj` file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), EncodeError> {
        codec::encode(path, &self.spheres, &self.planes, &self.lights)
    }

    /// Decode a `.robj` file leniently. Short sections come back with the
    /// records that were available; use [`codec::decode_with`] to inspect or
    /// reject them.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        Ok(codec::decode(path)?.into_scene())
    }
}
