//! Capture planning tests against a scripted imagery service.
//!
//! Covers panorama de-duplication, heading derivation, idempotent re-runs
//! and the skip-and-continue failure policy.

mod common;

use std::collections::HashSet;

use approx::assert_relative_eq;
use common::{MemoryStore, MockImagery, northbound, snapped_panorama};
use marga::core::math::heading_diff;
use marga::{
    CaptureConfig, CapturePlanner, FailureStage, GeodeticPoint, ImageSize, ImageryError,
    LocalFrame, LocalPoint, Panorama, RetryPolicy, Route, RouteProcessor,
};

fn planner() -> CapturePlanner {
    CapturePlanner::new(CaptureConfig {
        retry: RetryPolicy::immediate(3),
        ..Default::default()
    })
}

fn route(raw: &[GeodeticPoint]) -> Route {
    RouteProcessor::with_defaults().process(raw).unwrap()
}

/// Five points ~111m apart heading due north from Zurich HB.
fn zurich_route() -> Route {
    route(&northbound(GeodeticPoint::new(8.5402, 47.3782), 5, 0.001))
}

#[test]
fn test_three_views_per_panorama() {
    let route = zurich_route();
    let mut service = MockImagery::new();
    let mut store = MemoryStore::new();

    let capture = planner().run(&route, &mut service, &mut store);

    assert_eq!(capture.panoramas.len(), 5);
    assert_eq!(capture.rows.len(), 15);
    assert_eq!(capture.rendered, 15);
    assert_eq!(capture.reused, 0);
    assert!(capture.failures.is_empty());
    assert_eq!(service.resolve_calls, 5);
    assert_eq!(service.render_calls.len(), 15);
    assert_eq!(store.images.len(), 15);

    for (i, chunk) in capture.rows.chunks(3).enumerate() {
        let pano = &capture.panoramas[i];
        for (j, row) in chunk.iter().enumerate() {
            assert_eq!(row.filename, format!("gsv_{}_{}.jpg", i, j));
            assert_eq!(row.location, pano.location);
            assert_eq!(row.pitch, 0.0);
        }
        assert_relative_eq!(chunk[0].heading, 0.0, epsilon = 1e-6);
        assert_relative_eq!(chunk[1].heading, 90.0, epsilon = 1e-6);
        assert_relative_eq!(chunk[2].heading, 180.0, epsilon = 1e-6);
    }

    for request in &service.render_calls {
        assert_eq!(request.fov(), 90.0);
        assert_eq!(request.pitch(), 0.0);
        assert_eq!(request.size(), None);
    }
}

#[test]
fn test_manifest_uses_panorama_location() {
    let route = zurich_route();
    let mut service = MockImagery::new();
    let capture = planner().run(&route, &mut service, &mut MemoryStore::new());

    let expected = snapped_panorama(route.points()[0].geodetic).location;
    assert_eq!(capture.rows[0].location, expected);
    assert_eq!(
        capture.rows[0].to_string(),
        format!("gsv_0_0.jpg,{},{},0,0,0,0", expected.lon, expected.lat)
    );
}

#[test]
fn test_bearing_350_headings() {
    let origin = GeodeticPoint::new(-122.4194, 37.7749);
    let frame = LocalFrame::new(origin);
    let dir = 350f64.to_radians();
    let raw: Vec<GeodeticPoint> = (0..3)
        .map(|i| {
            let d = 50.0 * i as f64;
            frame.to_geodetic(LocalPoint::new(d * dir.sin(), d * dir.cos()))
        })
        .collect();

    let mut service = MockImagery::new();
    let capture = planner().run(&route(&raw), &mut service, &mut MemoryStore::new());

    assert_eq!(capture.panoramas.len(), 3);
    let headings: Vec<f64> = capture.rows[..3].iter().map(|r| r.heading).collect();
    assert_relative_eq!(headings[0], 350.0, epsilon = 1e-6);
    assert_relative_eq!(headings[1], 80.0, epsilon = 1e-6);
    assert_relative_eq!(headings[2], 170.0, epsilon = 1e-6);
}

#[test]
fn test_heading_relations_hold_for_every_panorama() {
    // A loop with turns in every quadrant
    let origin = GeodeticPoint::new(13.405, 52.52);
    let frame = LocalFrame::new(origin);
    let corners = [
        (0.0, 0.0),
        (40.0, 30.0),
        (80.0, -10.0),
        (30.0, -60.0),
        (-40.0, -50.0),
        (-70.0, 20.0),
        (-10.0, 60.0),
    ];
    let raw: Vec<GeodeticPoint> = corners
        .iter()
        .map(|&(x, y)| frame.to_geodetic(LocalPoint::new(x, y)))
        .collect();

    let mut service = MockImagery::new();
    let capture = planner().run(&route(&raw), &mut service, &mut MemoryStore::new());
    assert_eq!(capture.rows.len(), 3 * capture.panoramas.len());

    for chunk in capture.rows.chunks(3) {
        let (base, right, back) = (chunk[0].heading, chunk[1].heading, chunk[2].heading);
        for h in [base, right, back] {
            assert!((0.0..360.0).contains(&h), "heading {h}");
        }
        assert_relative_eq!(heading_diff(base, right), 90.0, epsilon = 1e-9);
        assert_relative_eq!(heading_diff(base, back).abs(), 180.0, epsilon = 1e-9);
    }
}

#[test]
fn test_doubling_back_records_panorama_once() {
    // Out and back along the same street; the return leg hits the same cells
    let start = GeodeticPoint::new(-0.1276, 51.5072);
    let mut raw = northbound(start, 4, 0.001);
    let mut back = raw.clone();
    back.reverse();
    raw.extend(back.into_iter().skip(1).map(|p| GeodeticPoint::new(p.lon + 0.000_001, p.lat)));

    let route = route(&raw);
    assert_eq!(route.len(), 7);

    let mut service = MockImagery::new();
    let capture = planner().run(&route, &mut service, &mut MemoryStore::new());

    assert_eq!(service.resolve_calls, 7);
    assert_eq!(capture.panoramas.len(), 4);
    assert_eq!(capture.duplicates, 3);
    assert_eq!(capture.rows.len(), 12);

    let ids: HashSet<&str> = capture.panoramas.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), capture.panoramas.len());
    let names: HashSet<&str> = capture.rows.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names.len(), capture.rows.len());
}

#[test]
fn test_rerun_is_idempotent() {
    let route = zurich_route();
    let planner = planner();
    let mut store = MemoryStore::new();

    let mut first_service = MockImagery::new();
    let first = planner.run(&route, &mut first_service, &mut store);
    assert_eq!(first_service.render_calls.len(), 15);

    let mut second_service = MockImagery::new();
    let second = planner.run(&route, &mut second_service, &mut store);

    assert!(second_service.render_calls.is_empty());
    assert_eq!(second.rendered, 0);
    assert_eq!(second.reused, 15);
    assert_eq!(second.rows, first.rows);
}

#[test]
fn test_partial_output_is_completed() {
    let route = zurich_route();
    let mut store = MemoryStore::new();
    store.images.insert("gsv_1_2.jpg".to_string(), b"old".to_vec());
    store.images.insert("gsv_4_0.jpg".to_string(), b"old".to_vec());

    let mut service = MockImagery::new();
    let capture = planner().run(&route, &mut service, &mut store);

    assert_eq!(service.render_calls.len(), 13);
    assert_eq!(capture.reused, 2);
    assert_eq!(capture.rows.len(), 15);
    // Existing files are left alone
    assert_eq!(store.images["gsv_1_2.jpg"], b"old".to_vec());
}

#[test]
fn test_transient_metadata_failure_is_retried() {
    let route = zurich_route();
    let mut service = MockImagery::new()
        .with_resolve(Err(ImageryError::Transport("connection reset".into())))
        .with_resolve(Err(ImageryError::Status(503)));

    let capture = planner().run(&route, &mut service, &mut MemoryStore::new());

    // Two failures then success on the third attempt for the first point
    assert_eq!(service.resolve_calls, 7);
    assert_eq!(capture.panoramas.len(), 5);
    assert!(capture.failures.is_empty());
}

#[test]
fn test_exhausted_metadata_skips_only_that_point() {
    let route = zurich_route();
    let mut service = MockImagery::new()
        .with_resolve(Err(ImageryError::Transport("timeout".into())))
        .with_resolve(Err(ImageryError::Transport("timeout".into())))
        .with_resolve(Err(ImageryError::Transport("timeout".into())));

    let capture = planner().run(&route, &mut service, &mut MemoryStore::new());

    assert_eq!(capture.panoramas.len(), 4);
    assert_eq!(capture.rows.len(), 12);
    assert_eq!(capture.failures.len(), 1);
    assert_eq!(
        capture.failures[0].stage,
        FailureStage::Metadata { point_index: 0 }
    );
    assert_eq!(capture.failures[0].attempts, 3);
    // Files are named after the route point, so point 0 leaves a gap
    assert_eq!(capture.panoramas[0].point_index, 1);
    assert_eq!(capture.rows[0].filename, "gsv_1_0.jpg");
}

#[test]
fn test_rerun_after_skipped_point_keeps_images_matched() {
    let route = zurich_route();
    let planner = planner();
    let mut store = MemoryStore::new();

    let mut flaky = MockImagery::new()
        .with_resolve(Err(ImageryError::Transport("timeout".into())))
        .with_resolve(Err(ImageryError::Transport("timeout".into())))
        .with_resolve(Err(ImageryError::Transport("timeout".into())));
    let first = planner.run(&route, &mut flaky, &mut store);
    assert_eq!(first.panoramas.len(), 4);

    let mut healthy = MockImagery::new();
    let second = planner.run(&route, &mut healthy, &mut store);

    // Only point 0's views are new
    assert_eq!(healthy.render_calls.len(), 3);
    assert_eq!(second.reused, 12);
    assert_eq!(second.rows.len(), 15);

    for (pano, rows) in second.panoramas.iter().zip(second.rows.chunks(3)) {
        for row in rows {
            let expected = format!("{}@{}", pano.id, row.heading);
            assert_eq!(
                store.images[&row.filename],
                expected.into_bytes(),
                "{} holds another panorama's image",
                row.filename
            );
        }
    }
}

#[test]
fn test_missing_panorama_is_not_retried() {
    let route = zurich_route();
    let first = route.points()[0].geodetic;
    let mut service = MockImagery::new().with_resolve(Err(ImageryError::NoPanorama(first)));

    let capture = planner().run(&route, &mut service, &mut MemoryStore::new());

    assert_eq!(service.resolve_calls, 5);
    assert_eq!(capture.failures.len(), 1);
    assert_eq!(capture.failures[0].attempts, 1);
    assert_eq!(capture.panoramas.len(), 4);
}

#[test]
fn test_duplicate_after_retry_is_dropped() {
    let route = zurich_route();
    let first = snapped_panorama(route.points()[0].geodetic);
    // Point 1 fails once, then resolves to point 0's panorama
    let mut service = MockImagery::new()
        .with_resolve(Ok(first.clone()))
        .with_resolve(Err(ImageryError::Transport("reset".into())))
        .with_resolve(Ok(Panorama {
            id: first.id.clone(),
            location: first.location,
        }));

    let capture = planner().run(&route, &mut service, &mut MemoryStore::new());

    assert_eq!(capture.duplicates, 1);
    assert_eq!(capture.panoramas.len(), 4);
    assert!(capture.failures.is_empty());
}

#[test]
fn test_render_failure_omits_row_and_continues() {
    let route = zurich_route();
    let mut service = MockImagery::new()
        .with_render_failure(ImageryError::Status(500))
        .with_render_failure(ImageryError::Status(500))
        .with_render_failure(ImageryError::Status(500));
    let mut store = MemoryStore::new();

    let capture = planner().run(&route, &mut service, &mut store);

    assert_eq!(capture.rows.len(), 14);
    assert_eq!(capture.failures.len(), 1);
    assert_eq!(
        capture.failures[0].stage,
        FailureStage::Render {
            filename: "gsv_0_0.jpg".to_string()
        }
    );
    assert!(!store.images.contains_key("gsv_0_0.jpg"));
    assert_eq!(capture.rows[0].filename, "gsv_0_1.jpg");
}

#[test]
fn test_oversized_render_fails_before_service_call() {
    let route = zurich_route();
    let planner = CapturePlanner::new(CaptureConfig {
        image_size: Some(ImageSize {
            width: 700,
            height: 700,
        }),
        retry: RetryPolicy::immediate(3),
        ..Default::default()
    });
    let mut service = MockImagery::new();

    let capture = planner.run(&route, &mut service, &mut MemoryStore::new());

    assert!(service.render_calls.is_empty());
    assert!(capture.rows.is_empty());
    assert_eq!(capture.failures.len(), 15);
    assert!(capture.failures.iter().all(|f| f.attempts == 0));
    assert!(capture.failures[0].error.contains("700x700"));
}

#[test]
fn test_custom_size_is_forwarded() {
    let route = zurich_route();
    let planner = CapturePlanner::new(CaptureConfig {
        image_size: Some(ImageSize::new(400, 300).unwrap()),
        pitch: 10.0,
        fov: 120.0,
        retry: RetryPolicy::immediate(3),
        ..Default::default()
    });
    let mut service = MockImagery::new();

    let capture = planner.run(&route, &mut service, &mut MemoryStore::new());

    assert_eq!(capture.rows.len(), 15);
    let request = &service.render_calls[0];
    assert_eq!(request.size(), Some(ImageSize::new(400, 300).unwrap()));
    assert_eq!(request.pitch(), 10.0);
    assert_eq!(request.fov(), 120.0);
    assert_eq!(capture.rows[0].pitch, 10.0);
}

#[test]
fn test_store_failure_is_reported() {
    let route = zurich_route();
    let mut store = MemoryStore {
        fail_saves: true,
        ..Default::default()
    };
    let mut service = MockImagery::new();

    let capture = planner().run(&route, &mut service, &mut store);

    assert!(capture.rows.is_empty());
    assert_eq!(capture.failures.len(), 15);
    assert!(matches!(
        capture.failures[0].stage,
        FailureStage::Store { .. }
    ));
}
