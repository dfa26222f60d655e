use std::fmt;
use std::path::Path;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::error::{Result, StainError};

/// Content type reported for files whose extension is not a known image format.
const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// Read access to the pixels of a decoded image.
///
/// `sample_color` returns `None` when the surface cannot be read (not yet
/// rendered, released, ...). Callers treat that as "no stain here".
pub trait PixelSource: Send + Sync {
    /// Surface size as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// RGBA sample at `(x, y)`, clamped to the surface bounds.
    fn sample_color(&self, x: u32, y: u32) -> Option<[u8; 4]>;
}

/// A decoded RGBA raster.
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl RasterSurface {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}

impl PixelSource for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn sample_color(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let (w, h) = self.pixels.dimensions();
        if w == 0 || h == 0 {
            return None;
        }
        Some(self.pixels.get_pixel(x.min(w - 1), y.min(h - 1)).0)
    }
}

/// The image a session is working on: name, size and a sampleable surface.
///
/// Handles are immutable; loading another image replaces the handle.
#[derive(Clone)]
pub struct ImageHandle {
    name: String,
    width: u32,
    height: u32,
    surface: Arc<dyn PixelSource>,
}

impl ImageHandle {
    /// Wrap an existing surface. Width and height must both be positive.
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        surface: Arc<dyn PixelSource>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StainError::DecodeFailed(format!(
                "invalid image dimensions: {width}x{height}"
            )));
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
            surface,
        })
    }

    /// Build a handle over an in-memory RGBA raster.
    pub fn from_rgba(name: impl Into<String>, pixels: RgbaImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        Self::new(name, width, height, Arc::new(RasterSurface::new(pixels)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel area, `width * height`.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn surface(&self) -> &dyn PixelSource {
        self.surface.as_ref()
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Whether `content_type` names an image (`image/...`).
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// Guess a content type from the file extension.
pub fn content_type_for_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_CONTENT_TYPE)
}

/// Decode raw bytes into an image handle.
///
/// The content type is checked before any decoding is attempted.
pub fn decode(name: &str, bytes: &[u8], content_type: &str) -> Result<ImageHandle> {
    if !is_image_content_type(content_type) {
        return Err(StainError::NotAnImage {
            content_type: content_type.to_string(),
        });
    }

    let img = image::load_from_memory(bytes).map_err(|e| StainError::DecodeFailed(e.to_string()))?;
    let rgba = img.to_rgba8();
    debug!(
        name,
        width = rgba.width(),
        height = rgba.height(),
        "Image decoded"
    );
    ImageHandle::from_rgba(name, rgba)
}

/// Read and decode an image file. The handle is named after the file name.
pub fn load_image_file(path: &Path) -> Result<ImageHandle> {
    let content_type = content_type_for_path(path);
    if !is_image_content_type(content_type) {
        return Err(StainError::NotAnImage {
            content_type: content_type.to_string(),
        });
    }
    let bytes = std::fs::read(path)
        .map_err(|e| StainError::DecodeFailed(format!("{}: {e}", path.display())))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    decode(&name, &bytes, content_type)
}
