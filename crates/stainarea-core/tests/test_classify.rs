mod common;

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use stainarea_core::classify::{is_inside, is_stain_color};
use stainarea_core::io::RasterSurface;
use stainarea_core::point::Point;

use common::{solid_raster, UnavailableSurface, BLACK, WHITE};

#[test]
fn test_threshold_is_strict() {
    assert!(!is_stain_color(128, 255, 255));
    assert!(!is_stain_color(255, 128, 255));
    assert!(!is_stain_color(255, 255, 128));
    assert!(is_stain_color(129, 129, 129));
}

#[test]
fn test_all_channels_required() {
    assert!(!is_stain_color(255, 255, 0));
    assert!(!is_stain_color(0, 255, 255));
    assert!(is_stain_color(255, 255, 255));
}

#[test]
fn test_white_and_black_pixels() {
    let white = RasterSurface::new(solid_raster(4, 4, WHITE));
    let black = RasterSurface::new(solid_raster(4, 4, BLACK));
    let p = Point::new(1.5, 2.5);
    assert!(is_inside(&white, &p));
    assert!(!is_inside(&black, &p));
}

#[test]
fn test_alpha_is_ignored() {
    let transparent_white = RasterSurface::new(solid_raster(2, 2, [255, 255, 255, 0]));
    assert!(is_inside(&transparent_white, &Point::new(0.5, 0.5)));
}

#[test]
fn test_fractional_coordinates_truncate() {
    // Only pixel (1, 0) is white.
    let mut raster = solid_raster(3, 1, BLACK);
    raster.put_pixel(1, 0, Rgba(WHITE));
    let surface = RasterSurface::new(raster);

    assert!(!is_inside(&surface, &Point::new(0.99, 0.0)));
    assert!(is_inside(&surface, &Point::new(1.0, 0.0)));
    assert!(is_inside(&surface, &Point::new(1.99, 0.5)));
    assert!(!is_inside(&surface, &Point::new(2.0, 0.5)));
}

#[test]
fn test_edge_coordinates_clamp() {
    // Bottom-right pixel white, everything else black.
    let raster = RgbaImage::from_fn(5, 4, |x, y| {
        if x == 4 && y == 3 {
            Rgba(WHITE)
        } else {
            Rgba(BLACK)
        }
    });
    let surface = RasterSurface::new(raster);
    assert!(is_inside(&surface, &Point::new(5.0, 4.0)));
    assert!(!is_inside(&surface, &Point::new(-1.0, -1.0)));
    assert!(!is_inside(&surface, &Point::new(f64::NAN, 0.0)));
}

#[test]
fn test_unavailable_surface_is_outside() {
    let surface = UnavailableSurface {
        width: 10,
        height: 10,
    };
    assert!(!is_inside(&surface, &Point::new(5.0, 5.0)));
}

#[test]
fn test_empty_surface_is_outside() {
    let surface = Arc::new(RasterSurface::new(RgbaImage::new(0, 0)));
    assert!(!is_inside(surface.as_ref(), &Point::new(0.0, 0.0)));
}
