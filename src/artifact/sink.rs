use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{WarmingError, WarmingResult};

/// Where a stored artifact can be fetched from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArtifactRef {
    pub container: String,
    pub blob: String,
    pub uri: String,
}

/// Storage contract for finished artifacts.
///
/// Each call is independent; a sink holds no per-request state beyond the objects it stores.
pub trait ArtifactSink: Send {
    /// Store `bytes` under `container/blob`, replacing any previous object.
    fn put(&mut self, container: &str, blob: &str, bytes: &[u8]) -> WarmingResult<ArtifactRef>;
    /// Delete `container/blob`. Missing objects are not an error.
    fn remove(&mut self, container: &str, blob: &str) -> WarmingResult<()>;
}

/// Sink writing objects to `<root>/<container>/<blob>`.
#[derive(Debug, Clone)]
pub struct FileSink {
    root: PathBuf,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, container: &str, blob: &str) -> WarmingResult<PathBuf> {
        validate_object_name(container, "container")?;
        validate_object_name(blob, "blob")?;
        Ok(self.root.join(container).join(blob))
    }
}

impl ArtifactSink for FileSink {
    fn put(&mut self, container: &str, blob: &str, bytes: &[u8]) -> WarmingResult<ArtifactRef> {
        let path = self.path_for(container, blob)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create container dir '{}'", parent.display()))?;
        }
        std::fs::write(&path, bytes)
            .with_context(|| format!("write artifact '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "stored artifact");
        Ok(ArtifactRef {
            container: container.to_owned(),
            blob: blob.to_owned(),
            uri: format!("file://{}", path.display()),
        })
    }

    fn remove(&mut self, container: &str, blob: &str) -> WarmingResult<()> {
        let path = self.path_for(container, blob)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove artifact '{}'", path.display()))
                .into()),
        }
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    objects: BTreeMap<(String, String), Vec<u8>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, container: &str, blob: &str) -> Option<&[u8]> {
        self.objects
            .get(&(container.to_owned(), blob.to_owned()))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ArtifactSink for InMemorySink {
    fn put(&mut self, container: &str, blob: &str, bytes: &[u8]) -> WarmingResult<ArtifactRef> {
        validate_object_name(container, "container")?;
        validate_object_name(blob, "blob")?;
        self.objects
            .insert((container.to_owned(), blob.to_owned()), bytes.to_vec());
        Ok(ArtifactRef {
            container: container.to_owned(),
            blob: blob.to_owned(),
            uri: format!("memory://{container}/{blob}"),
        })
    }

    fn remove(&mut self, container: &str, blob: &str) -> WarmingResult<()> {
        self.objects.remove(&(container.to_owned(), blob.to_owned()));
        Ok(())
    }
}

fn validate_object_name(name: &str, field: &str) -> WarmingResult<()> {
    if name.trim().is_empty() {
        return Err(WarmingError::validation(format!("{field} must be non-empty")));
    }
    let s = name.replace('\\', "/");
    if s.starts_with('/') {
        return Err(WarmingError::validation(format!(
            "{field} must be a relative name"
        )));
    }
    for part in s.split('/') {
        if part == ".." {
            return Err(WarmingError::validation(format!(
                "{field} must not contain '..'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/artifact/sink.rs"]
mod tests;
