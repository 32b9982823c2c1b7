//! Human editable scene descriptions.
//!
//! A description is a TOML document with optional `[[spheres]]`, `[[planes]]`
//! and `[[lights]]` arrays of tables. Vectors are written as `[x, y, z]`.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::scene::Scene;

#[derive(Debug, Error)]
pub enum SceneFileError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Format(#[from] toml::ser::Error),
}

type SceneFileResult<T> = Result<T, SceneFileError>;

impl Scene {
    pub fn from_toml_str(content: &str) -> SceneFileResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub async fn from_toml_file<P: AsRef<Path>>(path: P) -> SceneFileResult<Self> {
        let content = tokio::fs::read_to_string(&path).await?;
        let scene = Self::from_toml_str(&content)?;
        debug!(
            "Loaded scene description '{}' ({} spheres, {} planes, {} lights)",
            path.as_ref().display(),
            scene.spheres.len(),
            scene.planes.len(),
            scene.lights.len()
        );
        Ok(scene)
    }

    pub fn to_toml_string(&self) -> SceneFileResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
