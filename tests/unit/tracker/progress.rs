use super::*;

fn cfg() -> TrackerConfig {
    TrackerConfig::default()
}

#[test]
fn progress_matches_worked_example() {
    let vp = Viewport::new(800.0, 500.0, 2000.0);
    let span = scroll_span(100.0, 1800.0, &vp, &cfg());
    assert_eq!(span.start, 0.0);
    assert_eq!(span.end, 960.0);
    let p = compute_progress(Some(100.0), Some(1800.0), &vp, &cfg());
    let expected = 0.05 + 0.95 * (500.0 / 960.0);
    assert!((p - expected).abs() < 1e-12);
    assert!((p - 0.5448).abs() < 1e-4);
}

#[test]
fn progress_is_offset_and_clamped() {
    let c = cfg();
    let top = Viewport::new(800.0, 0.0, 2000.0);
    assert_eq!(compute_progress(Some(100.0), Some(1800.0), &top, &c), 0.05);
    let bottom = Viewport::new(800.0, 1200.0, 2000.0);
    let end = compute_progress(Some(100.0), Some(1800.0), &bottom, &c);
    assert!((end - 1.0).abs() < 1e-12);
    for scroll in (0..=1200).step_by(37) {
        let vp = Viewport::new(800.0, scroll as f64, 2000.0);
        let p = compute_progress(Some(900.0), Some(1800.0), &vp, &c);
        assert!(p >= 0.05 && p <= 1.0 + 1e-12);
    }
}

#[test]
fn start_offset_waits_for_first_zone() {
    let vp = Viewport::new(800.0, 500.0, 4000.0);
    let span = scroll_span(1000.0, 3500.0, &vp, &cfg());
    assert_eq!(span.start, 600.0);
    assert_eq!(compute_progress(Some(1000.0), Some(3500.0), &vp, &cfg()), 0.05);
}

#[test]
fn degenerate_or_missing_span_yields_zero() {
    // Document no taller than the viewport: end offset collapses to 0.
    let short = Viewport::new(800.0, 0.0, 800.0);
    assert_eq!(compute_progress(Some(0.0), Some(800.0), &short, &cfg()), 0.0);
    // Last zone ends before progress would start.
    let vp = Viewport::new(800.0, 300.0, 3000.0);
    assert_eq!(compute_progress(Some(1500.0), Some(1000.0), &vp, &cfg()), 0.0);
    assert_eq!(compute_progress(None, Some(1000.0), &vp, &cfg()), 0.0);
    assert_eq!(compute_progress(Some(0.0), None, &vp, &cfg()), 0.0);
}

#[test]
fn first_straddling_zone_wins() {
    let rects = [
        Some(ZoneRect::new(-900.0, -100.0)),
        Some(ZoneRect::new(300.0, 500.0)),
        Some(ZoneRect::new(350.0, 900.0)),
    ];
    assert_eq!(active_zone(&rects, 800.0, 0.5, None), Some(1));
    // Edges are inclusive.
    let edge = [Some(ZoneRect::new(400.0, 1200.0))];
    assert_eq!(active_zone(&edge, 800.0, 0.5, None), Some(0));
}

#[test]
fn unmeasured_zones_are_skipped() {
    let rects = [None, Some(ZoneRect::new(0.0, 800.0))];
    assert_eq!(active_zone(&rects, 800.0, 0.5, None), Some(1));
}

#[test]
fn no_match_keeps_previous_index() {
    let rects = [Some(ZoneRect::new(500.0, 700.0)), None];
    assert_eq!(active_zone(&rects, 800.0, 0.5, Some(1)), Some(1));
    assert_eq!(active_zone(&rects, 800.0, 0.5, None), None);
}

#[test]
fn scan_is_idempotent() {
    let rects = [
        Some(ZoneRect::new(-50.0, 450.0)),
        Some(ZoneRect::new(450.0, 1250.0)),
    ];
    let a = active_zone(&rects, 800.0, 0.5, Some(1));
    let b = active_zone(&rects, 800.0, 0.5, a);
    assert_eq!(a, b);
    assert_eq!(a, Some(0));
}

#[test]
fn active_index_uses_minus_one_for_none() {
    assert_eq!(ProgressState::default().active_index(), -1);
    let s = ProgressState {
        active_zone: Some(2),
        progress: 0.5,
    };
    assert_eq!(s.active_index(), 2);
}
