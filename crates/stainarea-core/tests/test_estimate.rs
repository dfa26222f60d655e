mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use stainarea_core::error::StainError;
use stainarea_core::estimate::{estimate, estimate_with, NoOpReporter, ProgressReporter};
use stainarea_core::io::ImageHandle;
use stainarea_core::result::CalculationResult;

use common::{solid_image, split_raster, unavailable_image, BLACK, WHITE};

fn assert_consistent(r: &CalculationResult) {
    assert!(r.total_random_points > 0);
    assert_eq!(r.random_points.len(), r.total_random_points);
    assert_eq!(r.points_inside_stain, r.points_inside_stain_list.len());
    assert!(r.points_inside_stain <= r.total_random_points);
    assert_eq!(
        r.total_image_area,
        r.image_width as u64 * r.image_height as u64
    );
    assert_relative_eq!(
        r.estimated_stain_area,
        r.total_image_area as f64 * r.points_inside_stain as f64 / r.total_random_points as f64,
        max_relative = 1e-12
    );
    assert!(r.estimated_stain_area >= 0.0);
    assert!(r.estimated_stain_area <= r.total_image_area as f64);

    // Inside list is an order-preserving subsequence of the draws.
    let mut draws = r.random_points.iter();
    for p in &r.points_inside_stain_list {
        assert!(draws.any(|q| q == p), "{p:?} not found in draw order");
    }
}

#[test]
fn test_all_white_image_is_fully_covered() {
    let image = solid_image("white.png", 64, 48, WHITE);
    let mut rng = StdRng::seed_from_u64(1);
    let r = estimate(Some(&image), 500, &mut rng).unwrap();
    assert_consistent(&r);
    assert_eq!(r.points_inside_stain, 500);
    assert_relative_eq!(r.estimated_stain_area, (64 * 48) as f64);
}

#[test]
fn test_all_black_image_has_no_stain() {
    let image = solid_image("black.png", 64, 48, BLACK);
    let mut rng = StdRng::seed_from_u64(2);
    let r = estimate(Some(&image), 500, &mut rng).unwrap();
    assert_consistent(&r);
    assert_eq!(r.points_inside_stain, 0);
    assert!(r.points_inside_stain_list.is_empty());
    assert_eq!(r.estimated_stain_area, 0.0);
}

#[test]
fn test_stubbed_classifier_gives_exact_area() {
    let image = solid_image("stub.png", 200, 150, BLACK);
    let hits = AtomicUsize::new(0);
    let mut rng = StdRng::seed_from_u64(3);
    let r = estimate_with(
        Some(&image),
        1000,
        &mut rng,
        |_| hits.fetch_add(1, Ordering::SeqCst) < 300,
        &NoOpReporter,
    )
    .unwrap();

    assert_consistent(&r);
    assert_eq!(r.total_image_area, 30_000);
    assert_eq!(r.points_inside_stain, 300);
    assert_relative_eq!(r.estimated_stain_area, 9000.0);
}

#[test]
fn test_half_white_image_is_about_half() {
    let image = ImageHandle::from_rgba("half.png", split_raster(100, 100, 50)).unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    let r = estimate(Some(&image), 10_000, &mut rng).unwrap();
    assert_consistent(&r);
    assert!(
        (4000.0..6000.0).contains(&r.estimated_stain_area),
        "area: {}",
        r.estimated_stain_area
    );
}

#[test]
fn test_parallel_run_keeps_draw_order() {
    // Large enough to take the parallel path.
    let image = ImageHandle::from_rgba("split.png", split_raster(300, 200, 120)).unwrap();
    let r = estimate(Some(&image), 10_000, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_consistent(&r);
    for p in &r.points_inside_stain_list {
        assert!(p.x < 120.0, "{p:?} classified inside but lies in the black half");
    }
}

#[test]
fn test_same_seed_same_result() {
    let image = ImageHandle::from_rgba("split.png", split_raster(80, 60, 30)).unwrap();
    let a = estimate(Some(&image), 1000, &mut StdRng::seed_from_u64(6)).unwrap();
    let b = estimate(Some(&image), 1000, &mut StdRng::seed_from_u64(6)).unwrap();
    assert_eq!(a.random_points, b.random_points);
    assert_eq!(a.points_inside_stain, b.points_inside_stain);
}

#[test]
fn test_ids_are_unique() {
    let image = solid_image("white.png", 10, 10, WHITE);
    let mut rng = StdRng::seed_from_u64(7);
    let a = estimate(Some(&image), 100, &mut rng).unwrap();
    let b = estimate(Some(&image), 100, &mut rng).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_no_image_fails() {
    let mut rng = StdRng::seed_from_u64(8);
    let err = estimate(None, 100, &mut rng).unwrap_err();
    assert!(matches!(err, StainError::NoImageLoaded), "got: {err}");
}

#[test]
fn test_zero_samples_fails() {
    let image = solid_image("white.png", 10, 10, WHITE);
    let mut rng = StdRng::seed_from_u64(9);
    assert!(matches!(
        estimate(Some(&image), 0, &mut rng),
        Err(StainError::InvalidArgument(_))
    ));
}

#[test]
fn test_unreadable_surface_counts_nothing() {
    let image = unavailable_image(40, 30);
    let r = estimate(Some(&image), 200, &mut StdRng::seed_from_u64(10)).unwrap();
    assert_consistent(&r);
    assert_eq!(r.points_inside_stain, 0);
}

#[test]
fn test_metadata_copied_from_image() {
    let image = solid_image("sample-42.png", 30, 20, WHITE);
    let r = estimate(Some(&image), 100, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(r.image_name, "sample-42.png");
    assert_eq!(r.image_width, 30);
    assert_eq!(r.image_height, 20);
    assert_eq!(r.total_random_points, 100);
}

#[derive(Default)]
struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin(&self, total_points: usize) {
        self.events.lock().unwrap().push(format!("begin {total_points}"));
    }

    fn advance(&self, points_done: usize) {
        self.events.lock().unwrap().push(format!("advance {points_done}"));
    }

    fn finish(&self) {
        self.events.lock().unwrap().push("finish".into());
    }
}

#[test]
fn test_progress_is_reported_per_chunk() {
    let image = solid_image("white.png", 10, 10, WHITE);
    let reporter = RecordingReporter::default();
    estimate_with(
        Some(&image),
        2500,
        &mut StdRng::seed_from_u64(12),
        |_| true,
        &reporter,
    )
    .unwrap();

    let events = reporter.events.into_inner().unwrap();
    assert_eq!(
        events,
        vec![
            "begin 2500",
            "advance 1000",
            "advance 2000",
            "advance 2500",
            "finish"
        ]
    );
}

#[test]
fn test_coverage_percent_and_band() {
    let image = solid_image("stub.png", 10, 10, BLACK);
    let hits = AtomicUsize::new(0);
    let r = estimate_with(
        Some(&image),
        200,
        &mut StdRng::seed_from_u64(13),
        |_| hits.fetch_add(1, Ordering::SeqCst) < 30,
        &NoOpReporter,
    )
    .unwrap();
    assert_relative_eq!(r.coverage_percent(), 15.0);
    assert_eq!(format!("{}", r.coverage_band()), "Moderate");
}
