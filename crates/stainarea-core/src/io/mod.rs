pub mod image_io;

pub use image_io::{decode, load_image_file, ImageHandle, PixelSource, RasterSurface};
