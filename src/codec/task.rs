//! Run the blocking codec from async code.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::{self, JoinError};

use crate::codec::{self, DecodeError, DecodeMode, DecodedScene, EncodeError};
use crate::scene::Scene;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{0}")]
    Encode(#[from] EncodeError),
    #[error("{0}")]
    Decode(#[from] DecodeError),
    #[error("codec task failed: {0}")]
    Join(#[from] JoinError),
}

/// Encode `scene` into `path` on tokio's blocking pool.
pub async fn save_scene(path: impl Into<PathBuf>, scene: Arc<Scene>) -> Result<(), TaskError> {
    let path = path.into();
    task::spawn_blocking(move || scene.save(path)).await??;
    Ok(())
}

/// Decode `path` on tokio's blocking pool.
pub async fn load_scene(
    path: impl Into<PathBuf>,
    mode: DecodeMode,
) -> Result<DecodedScene, TaskError> {
    let path = path.into();
    let scene = task::spawn_blocking(move || codec::decode_with(path, mode)).await??;
    Ok(scene)
}
