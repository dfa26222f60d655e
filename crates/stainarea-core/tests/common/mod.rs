#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, Rgba, RgbaImage};

use stainarea_core::error::{Result, StainError};
use stainarea_core::history::KeyValueStore;
use stainarea_core::io::{ImageHandle, PixelSource};

pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// A `width` x `height` raster filled with one color.
pub fn solid_raster(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// A raster whose left `white_cols` columns are white and the rest black.
pub fn split_raster(width: u32, height: u32, white_cols: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < white_cols {
            Rgba(WHITE)
        } else {
            Rgba(BLACK)
        }
    })
}

pub fn solid_image(name: &str, width: u32, height: u32, color: [u8; 4]) -> ImageHandle {
    ImageHandle::from_rgba(name, solid_raster(width, height, color)).expect("valid raster")
}

/// Encode a raster as PNG bytes.
pub fn png_bytes(raster: &RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    raster
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

/// A pixel source whose surface can never be read.
pub struct UnavailableSurface {
    pub width: u32,
    pub height: u32,
}

impl PixelSource for UnavailableSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn sample_color(&self, _x: u32, _y: u32) -> Option<[u8; 4]> {
        None
    }
}

pub fn unavailable_image(width: u32, height: u32) -> ImageHandle {
    ImageHandle::new(
        "unavailable.png",
        width,
        height,
        Arc::new(UnavailableSurface { width, height }),
    )
    .expect("valid dimensions")
}

/// A sink that refuses every write.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn load(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<()> {
        Err(StainError::PersistenceWriteFailed("disk full".into()))
    }
}
