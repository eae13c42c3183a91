use super::*;
use crate::foundation::core::Rgba8;
use crate::foundation::rng::ScriptedSource;

fn logical_host() -> Size {
    Size::new(300.0, 200.0)
}

fn active_field(seed: u64) -> RouteField {
    let mut f = RouteField::seeded(RouteFieldConfig::default(), seed).unwrap();
    f.set_active(Millis(0), true);
    f
}

#[test]
fn spawn_creates_burst_and_retires_previous_routes() {
    let cfg = RouteFieldConfig {
        palette: vec![
            Rgba8::rgb(255, 0, 0),
            Rgba8::rgb(0, 255, 0),
            Rgba8::rgb(0, 0, 255),
            Rgba8::rgb(255, 255, 0),
        ],
        routes_per_spawn: 3,
        ..RouteFieldConfig::default()
    };
    let mut f = RouteField::seeded(cfg, 1).unwrap();
    f.set_active(Millis(0), true);

    assert!(f.pointer_moved(Millis(0), Point::new(50.0, 50.0), logical_host()));
    let s = f.snapshot();
    assert_eq!(s.routes.len(), 3);
    for r in &s.routes {
        assert_eq!(r.points.len(), 1);
        assert!(r.points[0].distance(Point::new(50.0, 50.0)) <= 6.0 + 1e-9);
        assert!(!r.retiring);
        assert!(r.is_revealing());
    }
    let first_ids: Vec<_> = s.routes.iter().map(|r| r.id).collect();

    assert!(f.pointer_moved(Millis(150), Point::new(150.0, 100.0), logical_host()));
    let s = f.snapshot();
    assert_eq!(s.routes.len(), 6);
    for r in &s.routes {
        assert_eq!(r.retiring, first_ids.contains(&r.id));
    }
}

#[test]
fn simultaneous_routes_get_offset_colors() {
    let mut f = RouteField::new(RouteFieldConfig::default(), ScriptedSource::constant(0.0)).unwrap();
    f.spawn_at(Point::new(100.0, 100.0));
    let colors: Vec<_> = f.snapshot().routes.iter().map(|r| r.color).collect();
    let palette = &f.config().palette;
    assert_eq!(colors, vec![palette[0], palette[1], palette[2]]);
}

#[test]
fn pointer_throttle_requires_time_and_distance() {
    let mut f = active_field(3);
    assert!(f.pointer_moved(Millis(0), Point::new(100.0, 100.0), logical_host()));
    assert!(!f.pointer_moved(Millis(50), Point::new(200.0, 150.0), logical_host()));
    assert!(!f.pointer_moved(Millis(200), Point::new(104.0, 100.0), logical_host()));
    assert!(f.pointer_moved(Millis(200), Point::new(120.0, 100.0), logical_host()));
}

#[test]
fn inactive_field_ignores_pointer() {
    let mut f = RouteField::seeded(RouteFieldConfig::default(), 3).unwrap();
    assert!(!f.pointer_moved(Millis(0), Point::new(100.0, 100.0), logical_host()));
    f.set_active(Millis(0), true);
    assert!(!f.pointer_moved(Millis(0), Point::new(100.0, 100.0), Size::ZERO));
    assert!(f.snapshot().routes.is_empty());
}

#[test]
fn non_finite_pointer_is_treated_as_absent() {
    let mut f = active_field(3);
    assert!(!f.pointer_moved(Millis(0), Point::new(f64::NAN, 10.0), logical_host()));
    assert!(!f.pointer_moved(Millis(0), Point::new(10.0, f64::NEG_INFINITY), logical_host()));
    assert!(f.snapshot().routes.is_empty());
    // The throttle is untouched, so the next real move still spawns.
    assert!(f.pointer_moved(Millis(0), Point::new(100.0, 100.0), logical_host()));
    let space = f.config().space;
    for r in &f.snapshot().routes {
        assert!(r.points.iter().all(|p| space.contains(*p)));
    }
}

#[test]
fn reveal_commits_then_growth_extends() {
    let mut f = active_field(11);
    f.pointer_moved(Millis(0), Point::new(150.0, 100.0), logical_host());

    // Tick at 240 finds every route still revealing.
    f.advance_to(Millis(299));
    assert!(f.snapshot().routes.iter().all(|r| r.points.len() == 1 && r.is_revealing()));

    f.advance_to(Millis(300));
    assert!(f.snapshot().routes.iter().all(|r| r.points.len() == 2 && !r.is_revealing()));

    f.advance_to(Millis(480));
    assert!(f.snapshot().routes.iter().all(|r| r.is_revealing()));
    let tween = f.reveal_of(f.snapshot().routes[0].id).unwrap();
    assert_eq!(tween.start, Millis(480));

    f.advance_to(Millis(780));
    assert!(f.snapshot().routes.iter().all(|r| r.points.len() == 3));
}

#[test]
fn retiring_route_commits_in_flight_segment_then_archives() {
    let mut f = active_field(5);
    f.pointer_moved(Millis(0), Point::new(60.0, 60.0), logical_host());
    let old: Vec<_> = f.snapshot().routes.iter().map(|r| r.id).collect();

    f.pointer_moved(Millis(200), Point::new(200.0, 150.0), logical_host());
    f.advance_to(Millis(299));
    for id in &old {
        let r = f.snapshot().route(*id).unwrap();
        assert!(r.retiring);
        assert_eq!(r.points.len(), 1);
        assert!(r.is_revealing());
    }

    f.advance_to(Millis(300));
    let s = f.snapshot();
    for id in &old {
        assert!(s.route(*id).is_none());
        assert_eq!(s.history_entry(*id).unwrap().points.len(), 2);
    }
    assert_eq!(s.routes.len(), 3);
}

#[test]
fn idle_retired_routes_archive_on_spawn() {
    let mut f = active_field(8);
    f.pointer_moved(Millis(0), Point::new(60.0, 60.0), logical_host());
    f.advance_to(Millis(350));
    assert!(f.snapshot().routes.iter().all(|r| !r.is_revealing()));

    f.pointer_moved(Millis(350), Point::new(200.0, 150.0), logical_host());
    let s = f.snapshot();
    assert_eq!(s.history.len(), 3);
    assert_eq!(s.routes.len(), 3);
    assert!(s.history.iter().all(|h| h.archived_at == Millis(350)));
}

#[test]
fn history_is_capped_fifo_and_evicted_timers_are_cancelled() {
    let cfg = RouteFieldConfig {
        routes_per_spawn: 1,
        history_capacity: 4,
        ..RouteFieldConfig::default()
    };
    let mut f = RouteField::seeded(cfg, 21).unwrap();
    let mut ids = Vec::new();
    for i in 0..6u64 {
        f.advance_to(Millis(400 * i));
        f.spawn_at(Point::new(40.0 + 30.0 * i as f64, 100.0));
        ids.push(f.snapshot().routes.last().unwrap().id);
    }
    let history: Vec<_> = f.snapshot().history.iter().map(|h| h.id).collect();
    assert_eq!(history, ids[1..5].to_vec());
    // Four expiries plus the live route's reveal.
    assert_eq!(f.pending_timers(), 5);
}

#[test]
fn history_entries_expire_after_fade_and_margin() {
    let mut f = active_field(2);
    f.pointer_moved(Millis(0), Point::new(60.0, 60.0), logical_host());
    f.advance_to(Millis(350));
    f.pointer_moved(Millis(350), Point::new(200.0, 150.0), logical_host());
    assert_eq!(f.snapshot().history.len(), 3);

    f.advance_to(Millis(350 + 8000 + 249));
    assert_eq!(f.snapshot().history.len(), 3);
    f.advance_to(Millis(350 + 8000 + 250));
    assert!(f.snapshot().history.is_empty());
}

#[test]
fn pointer_exit_freezes_routes_until_next_spawn() {
    let mut f = active_field(4);
    f.pointer_moved(Millis(0), Point::new(100.0, 100.0), logical_host());
    f.set_active(Millis(100), false);

    // In-flight reveals still commit, no further growth.
    f.advance_to(Millis(5_000));
    let s = f.snapshot().clone();
    assert_eq!(s.routes.len(), 3);
    assert!(s.routes.iter().all(|r| r.points.len() == 2 && !r.is_revealing() && !r.retiring));
    assert_eq!(f.pending_timers(), 0);

    // Re-entry at the same spot still spawns: the last position was reset on exit.
    f.set_active(Millis(5_000), true);
    assert!(f.pointer_moved(Millis(5_000), Point::new(100.0, 100.0), logical_host()));
    let s = f.snapshot();
    assert_eq!(s.history.len(), 3);
    assert_eq!(s.routes.len(), 3);
}

#[test]
fn retiring_routes_never_grow() {
    let mut f = active_field(13);
    for step in 0..40u64 {
        let t = step * 130;
        let x = 30.0 + (step * 37 % 240) as f64;
        let y = 30.0 + (step * 53 % 140) as f64;
        let before = f.snapshot().clone();
        f.pointer_moved(Millis(t), Point::new(x, y), logical_host());
        let after = f.snapshot();
        for r in before.routes.iter().filter(|r| r.retiring) {
            if let Some(now) = after.route(r.id) {
                assert_eq!(now.points.len(), r.points.len() + usize::from(r.is_revealing() && !now.is_revealing()));
                assert!(now.pending.is_none() || now.pending == r.pending);
            } else if let Some(h) = after.history_entry(r.id) {
                let expected = r.points.len() + usize::from(r.is_revealing());
                assert_eq!(h.points.len(), expected);
            }
        }
    }
}

#[test]
fn all_generated_points_stay_in_bounds() {
    let mut f = active_field(77);
    let space = f.config().space;
    for step in 0..200u64 {
        let t = step * 97;
        let x = (step * 131 % 300) as f64;
        let y = (step * 71 % 200) as f64;
        f.pointer_moved(Millis(t), Point::new(x, y), logical_host());
        for p in f.snapshot().all_points() {
            assert!(space.contains(p), "{p:?} escaped the margin box");
        }
        for r in &f.snapshot().routes {
            assert!(space.contains(r.target));
        }
    }
}

#[test]
fn teardown_cancels_every_timer() {
    let mut f = active_field(9);
    f.pointer_moved(Millis(0), Point::new(100.0, 100.0), logical_host());
    f.advance_to(Millis(350));
    f.pointer_moved(Millis(350), Point::new(200.0, 150.0), logical_host());
    assert!(f.pending_timers() > 0);

    let cancelled = f.teardown();
    assert!(cancelled > 0);
    assert_eq!(f.pending_timers(), 0);
    assert!(!f.is_active());

    let frozen = f.snapshot().clone();
    f.advance_to(Millis(60_000));
    assert_eq!(f.snapshot(), &frozen);
}

#[test]
fn same_seed_same_session() {
    let run = |seed| {
        let mut f = active_field(seed);
        for step in 0..30u64 {
            f.pointer_moved(
                Millis(step * 150),
                Point::new(20.0 + step as f64 * 9.0, 50.0 + (step % 5) as f64 * 20.0),
                logical_host(),
            );
        }
        f.advance_to(Millis(10_000));
        f.snapshot().clone()
    };
    assert_eq!(run(42), run(42));
}
