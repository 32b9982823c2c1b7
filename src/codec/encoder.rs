use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

use crate::codec::{RECORD_CONFIG, Record, SectionKind};
use crate::scene::{Light, Plane, Sphere};

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cannot open '{}' for writing: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{count} {kind} records do not fit in a section (max 255)")]
    TooManyRecords { kind: SectionKind, count: usize },
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Record(#[from] bincode::error::EncodeError),
}

/// Encode the three collections into a `.robj` file at `path`, creating or
/// truncating it.
///
/// Collections are checked against the section limit before the file is
/// touched. A failure after the file was opened leaves whatever was already
/// written on disk.
pub fn encode<P: AsRef<Path>>(
    path: P,
    spheres: &[Sphere],
    planes: &[Plane],
    lights: &[Light],
) -> Result<(), EncodeError> {
    let path = path.as_ref();
    check_len(spheres)?;
    check_len(planes)?;
    check_len(lights)?;

    let file = File::create(path).map_err(|source| EncodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    encode_to(BufWriter::new(file), spheres, planes, lights)?;

    debug!(
        "Encoded {} spheres, {} planes, {} lights into '{}'",
        spheres.len(),
        planes.len(),
        lights.len(),
        path.display()
    );
    Ok(())
}

/// Write the `.robj` byte stream for the three collections to `writer`.
pub fn encode_to<W: Write>(
    mut writer: W,
    spheres: &[Sphere],
    planes: &[Plane],
    lights: &[Light],
) -> Result<(), EncodeError> {
    write_section(&mut writer, spheres)?;
    write_section(&mut writer, planes)?;
    write_section(&mut writer, lights)?;
    writer.flush()?;
    Ok(())
}

fn check_len<T: Record>(records: &[T]) -> Result<u8, EncodeError> {
    u8::try_from(records.len()).map_err(|_| EncodeError::TooManyRecords {
        kind: T::KIND,
        count: records.len(),
    })
}

fn write_section<W: Write, T: Record>(writer: &mut W, records: &[T]) -> Result<(), EncodeError> {
    let count = check_len(records)?;
    writer.write_all(&[count])?;
    for record in records {
        bincode::encode_into_std_write(record, writer, RECORD_CONFIG)?;
    }
    trace!("Wrote {} section: {} records", T::KIND, count);
    Ok(())
}
