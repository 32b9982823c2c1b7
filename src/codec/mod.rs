//! `.robj` file codec.
//!
//! A file is three sections in a fixed order (spheres, planes, lights). Each
//! section is a single count byte followed by that many fixed-size records:
//!
//! ```text
//! u8 sphere_count | sphere_count * Sphere::SIZE
//! u8 plane_count  | plane_count  * Plane::SIZE
//! u8 light_count  | light_count  * Light::SIZE
//! ```
//!
//! There is no header, magic number, version or checksum.

pub mod decoder;
pub mod encoder;
pub mod task;

pub use decoder::*;
pub use encoder::*;

use std::fmt::Display;

use bincode::config::{self, Configuration, Fixint, LittleEndian, NoLimit};
use bincode::{Decode, Encode};

/// Largest number of records a single section can hold.
pub const MAX_SECTION_RECORDS: usize = u8::MAX as usize;

/// Record field encoding: fixed width, little endian, no length prefixes.
pub(crate) const RECORD_CONFIG: Configuration<LittleEndian, Fixint, NoLimit> = config::standard()
    .with_little_endian()
    .with_fixed_int_encoding();

/// The three sections of a file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Sphere,
    Plane,
    Light,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [Self::Sphere, Self::Plane, Self::Light];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Plane => "plane",
            Self::Light => "light",
        }
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-size value stored back to back inside a section.
///
/// `SIZE` must equal the number of bytes `RECORD_CONFIG` produces for every
/// value of the type, both sides of the codec rely on it.
pub trait Record: Encode + Decode<()> {
    const KIND: SectionKind;
    const SIZE: usize;
}
