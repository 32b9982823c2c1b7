use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::codec::{RECORD_CONFIG, Record, SectionKind};
use crate::scene::{Light, Plane, Scene, Sphere};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("cannot open '{}' for reading: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{kind} section is missing")]
    MissingSection { kind: SectionKind },
    #[error("{kind} section declares {declared} records but only {decoded} are present")]
    ShortSection {
        kind: SectionKind,
        declared: u8,
        decoded: usize,
    },
    #[error("unexpected bytes after the light section")]
    TrailingBytes,
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Record(#[from] bincode::error::DecodeError),
}

/// How the decoder reacts to input that ends early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Keep whatever complete records are available and carry on with the
    /// next section. A section whose count byte is missing is empty.
    #[default]
    Lenient,
    /// Fail on a missing section, a short section or trailing bytes.
    Strict,
}

/// One decoded section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    /// Count byte as read from the file, `None` if the input ended before it.
    pub declared: Option<u8>,
    /// Records actually decoded, in file order.
    pub records: Vec<T>,
}

impl<T> Section<T> {
    /// Declared count, or 0 when the count byte was missing.
    pub fn declared_count(&self) -> u8 {
        self.declared.unwrap_or(0)
    }

    /// Whether fewer records were decoded than the count byte announced.
    pub fn is_short(&self) -> bool {
        self.records.len() < self.declared_count() as usize
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Freshly decoded collections, owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedScene {
    pub spheres: Section<Sphere>,
    pub planes: Section<Plane>,
    pub lights: Section<Light>,
}

impl DecodedScene {
    /// True if any section came back with fewer records than declared, or
    /// without its count byte.
    pub fn is_truncated(&self) -> bool {
        self.spheres.is_short()
            || self.planes.is_short()
            || self.lights.is_short()
            || self.spheres.declared.is_none()
            || self.planes.declared.is_none()
            || self.lights.declared.is_none()
    }

    pub fn into_scene(self) -> Scene {
        Scene::new(
            self.spheres.records,
            self.planes.records,
            self.lights.records,
        )
    }
}

/// Decode the `.robj` file at `path` in [`DecodeMode::Lenient`] mode.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<DecodedScene, DecodeError> {
    decode_with(path, DecodeMode::Lenient)
}

/// Decode the `.robj` file at `path`.
pub fn decode_with<P: AsRef<Path>>(path: P, mode: DecodeMode) -> Result<DecodedScene, DecodeError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let scene = decode_from(BufReader::new(file), mode)?;

    debug!(
        "Decoded {} spheres, {} planes, {} lights from '{}'",
        scene.spheres.len(),
        scene.planes.len(),
        scene.lights.len(),
        path.display()
    );
    Ok(scene)
}

/// Decode a `.robj` byte stream from `reader`.
pub fn decode_from<R: Read>(mut reader: R, mode: DecodeMode) -> Result<DecodedScene, DecodeError> {
    let spheres = read_section(&mut reader, mode)?;
    let planes = read_section(&mut reader, mode)?;
    let lights = read_section(&mut reader, mode)?;

    if mode == DecodeMode::Strict && read_count(&mut reader)?.is_some() {
        return Err(DecodeError::TrailingBytes);
    }

    Ok(DecodedScene {
        spheres,
        planes,
        lights,
    })
}

fn read_count<R: Read>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut count = [0u8; 1];
    match reader.read_exact(&mut count) {
        Ok(()) => Ok(Some(count[0])),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(err) => Err(err),
    }
}

fn read_section<R: Read, T: Record>(
    reader: &mut R,
    mode: DecodeMode,
) -> Result<Section<T>, DecodeError> {
    let Some(declared) = read_count(reader)? else {
        if mode == DecodeMode::Strict {
            return Err(DecodeError::MissingSection { kind: T::KIND });
        }
        warn!("Input ended before the {} section", T::KIND);
        return Ok(Section {
            declared: None,
            records: Vec::new(),
        });
    };

    let wanted = declared as usize * T::SIZE;
    let mut block = Vec::with_capacity(wanted);
    // Reads up to `wanted` bytes. A trailing partial record is consumed and
    // dropped by `chunks_exact` below.
    reader.by_ref().take(wanted as u64).read_to_end(&mut block)?;

    let records = block
        .chunks_exact(T::SIZE)
        .map(|chunk| bincode::decode_from_slice(chunk, RECORD_CONFIG).map(|(record, _)| record))
        .collect::<Result<Vec<T>, _>>()?;

    if records.len() < declared as usize {
        if mode == DecodeMode::Strict {
            return Err(DecodeError::ShortSection {
                kind: T::KIND,
                declared,
                decoded: records.len(),
            });
        }
        warn!(
            "Short {} section: declared {} records, decoded {}",
            T::KIND,
            declared,
            records.len()
        );
    } else {
        trace!("Read {} section: {} records", T::KIND, declared);
    }

    Ok(Section {
        declared: Some(declared),
        records,
    })
}
