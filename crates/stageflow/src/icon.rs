//! Icon loading with placeholder fallback.
//!
//! Node icons are resolved through an [`IconProvider`]. A provider may fail
//! (empty reference, missing file), but failures never reach layout or
//! timeline code: [`resolve_icon`] logs the failure and substitutes
//! [`IconImage::Placeholder`].

use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::topology::IconRef;

/// Errors an icon provider can report.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("icon reference is empty")]
    Empty,

    #[error("icon file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Something the renderer can draw in place of a node icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconImage {
    /// An image loaded from the given `href`
    Href(String),
    /// Fallback box drawn when the icon could not be loaded
    Placeholder,
}

/// Turns icon references into renderable images.
pub trait IconProvider {
    /// Loads the image behind `icon`.
    ///
    /// # Errors
    ///
    /// Returns [`IconError`] if the icon cannot be provided.
    fn load(&self, icon: &IconRef) -> Result<IconImage, IconError>;
}

/// Provider that emits references verbatim as image links.
///
/// Nothing is checked except that the reference is non-empty; the viewer
/// resolves the link.
#[derive(Debug, Default, Clone, Copy)]
pub struct HrefIconProvider;

impl IconProvider for HrefIconProvider {
    fn load(&self, icon: &IconRef) -> Result<IconImage, IconError> {
        if icon.as_str().trim().is_empty() {
            return Err(IconError::Empty);
        }
        Ok(IconImage::Href(icon.as_str().to_string()))
    }
}

/// Provider that resolves references as files under a base directory.
#[derive(Debug, Clone)]
pub struct FileIconProvider {
    base_dir: PathBuf,
}

impl FileIconProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl IconProvider for FileIconProvider {
    fn load(&self, icon: &IconRef) -> Result<IconImage, IconError> {
        if icon.as_str().trim().is_empty() {
            return Err(IconError::Empty);
        }

        let path = self.base_dir.join(icon.as_str());
        if !path.is_file() {
            return Err(IconError::NotFound(path));
        }
        Ok(IconImage::Href(path.display().to_string()))
    }
}

/// Loads `icon`, falling back to a placeholder on any failure.
pub fn resolve_icon(provider: &dyn IconProvider, icon: &IconRef) -> IconImage {
    match provider.load(icon) {
        Ok(image) => image,
        Err(err) => {
            warn!(icon = icon.as_str(), err:err; "Icon unavailable, rendering placeholder");
            IconImage::Placeholder
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_href_provider_passes_reference_through() {
        let image = HrefIconProvider
            .load(&IconRef::from("icons/agent.svg"))
            .unwrap();
        assert_eq!(image, IconImage::Href("icons/agent.svg".to_string()));
    }

    #[test]
    fn test_href_provider_rejects_empty() {
        let err = HrefIconProvider.load(&IconRef::from("  ")).unwrap_err();
        assert!(matches!(err, IconError::Empty));
    }

    #[test]
    fn test_file_provider_finds_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("agent.svg"), "<svg/>").unwrap();

        let provider = FileIconProvider::new(dir.path());
        let image = provider.load(&IconRef::from("agent.svg")).unwrap();

        let expected = dir.path().join("agent.svg").display().to_string();
        assert_eq!(image, IconImage::Href(expected));
    }

    #[test]
    fn test_file_provider_reports_missing_file() {
        let dir = tempdir().unwrap();
        let provider = FileIconProvider::new(dir.path());

        let err = provider.load(&IconRef::from("missing.svg")).unwrap_err();
        assert!(matches!(err, IconError::NotFound(_)));
        assert!(err.to_string().contains("missing.svg"));
    }

    #[test]
    fn test_resolve_icon_falls_back_to_placeholder() {
        let dir = tempdir().unwrap();
        let provider = FileIconProvider::new(dir.path());

        assert_eq!(
            resolve_icon(&provider, &IconRef::from("missing.svg")),
            IconImage::Placeholder
        );
        assert_eq!(
            resolve_icon(&HrefIconProvider, &IconRef::from("ok.svg")),
            IconImage::Href("ok.svg".to_string())
        );
    }
}
