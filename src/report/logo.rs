//! Logo resolution
//!
//! A logo is optional decoration. Anything that prevents reading its
//! dimensions (missing file, unknown format, corrupt header) drops the logo
//! with a log line instead of failing the report.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// A logo whose on-page size is known
#[derive(Debug, Clone, PartialEq)]
pub struct LogoRef {
    pub path: PathBuf,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// Resolve a logo at a fixed width, keeping its aspect ratio
pub fn resolve_logo(path: &Path, width_mm: f32) -> Option<LogoRef> {
    if !path.exists() {
        debug!("Logo not found at {}, skipping", path.display());
        return None;
    }

    let (width_px, height_px) = match image::image_dimensions(path) {
        Ok(dims) => dims,
        Err(e) => {
            warn!("Cannot read logo {}: {}", path.display(), e);
            return None;
        }
    };

    if width_px == 0 {
        warn!("Logo {} has zero width, skipping", path.display());
        return None;
    }

    let ratio = height_px as f32 / width_px as f32;
    Some(LogoRef {
        path: path.to_path_buf(),
        width_mm,
        height_mm: width_mm * ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgba};
    use tempfile::TempDir;

    #[test]
    fn test_aspect_ratio_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        ImageBuffer::from_pixel(200, 50, Rgba([10u8, 20, 30, 255]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let logo = resolve_logo(&path, 40.0).unwrap();
        assert_eq!(logo.width_mm, 40.0);
        assert!((logo.height_mm - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_logo_is_omitted() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_logo(&dir.path().join("absent.png"), 40.0).is_none());
    }

    #[test]
    fn test_undecodable_logo_is_omitted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(resolve_logo(&path, 40.0).is_none());
    }
}
