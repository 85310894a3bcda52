//! Filesystem-based resource provider for local image references.
//!
//! # Security
//!
//! The provider validates that all resolved paths remain within the base path
//! to prevent directory traversal attacks (e.g., `../../../etc/passwd`).

use async_trait::async_trait;
use inspecta_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A resource provider that loads resources relative to a base directory.
///
/// Leading slashes are stripped so portal-style references such as
/// `/branding/logo.png` resolve inside the base directory.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for security checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolves and validates a resource path relative to the base path.
    ///
    /// Returns `None` if the path would escape the base directory.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() || Path::new(relative).is_absolute() {
            return None;
        }

        for component in Path::new(relative).components() {
            if let std::path::Component::ParentDir = component {
                return None;
            }
        }

        let full_path = self.base_path.join(relative);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            // Symlinks may still point outside the base.
            return canonical.starts_with(base).then_some(canonical);
        }

        Some(full_path)
    }
}

#[async_trait]
impl ResourceProvider for FilesystemResourceProvider {
    async fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve_path_safe(path).ok_or_else(|| {
            ResourceError::NotFound(format!("{} (path traversal blocked)", path))
        })?;

        tokio::fs::read(&full_path)
            .await
            .map(Arc::new)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ResourceError::NotFound(path.to_string())
                } else {
                    ResourceError::LoadFailed {
                        path: path.to_string(),
                        message: e.to_string(),
                    }
                }
            })
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_filesystem_provider_load_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), b"Hello, World!").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        let data = provider.load("logo.png").await.unwrap();
        assert_eq!(&*data, b"Hello, World!");
    }

    #[tokio::test]
    async fn test_filesystem_provider_strips_leading_slash() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("branding")).unwrap();
        fs::write(dir.path().join("branding").join("footer.png"), b"band").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        let data = provider.load("/branding/footer.png").await.unwrap();
        assert_eq!(&*data, b"band");
    }

    #[tokio::test]
    async fn test_filesystem_provider_not_found() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());

        let result = provider.load("nonexistent.png").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_filesystem_provider_blocks_path_traversal() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());

        assert!(provider.load("../../../etc/passwd").await.is_err());
        assert!(provider.load("foo/../../../bar").await.is_err());
        assert!(provider.load("./../../secret").await.is_err());
    }

    #[test]
    fn test_filesystem_provider_base_path() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        assert_eq!(provider.base(), dir.path());
    }
}
