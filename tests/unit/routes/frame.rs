use super::*;
use crate::routes::model::{HistoryEntry, PendingSegment, Route};

fn pts(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(10.0 + i as f64, 20.0)).collect()
}

#[test]
fn markers_take_even_vertices_and_the_last() {
    assert_eq!(marker_points(&pts(1)).len(), 1);
    assert_eq!(marker_points(&pts(2)), vec![pts(2)[0], pts(2)[1]]);
    let five = pts(5);
    assert_eq!(marker_points(&five), vec![five[0], five[2], five[4]]);
    let four = pts(4);
    assert_eq!(marker_points(&four), vec![four[0], four[2], four[3]]);
    assert!(marker_points(&[]).is_empty());
}

#[test]
fn polyline_needs_two_points() {
    assert!(polyline_path(&pts(1)).is_none());
    let path = polyline_path(&pts(3)).unwrap();
    assert_eq!(path.elements().len(), 3);
}

#[test]
fn frame_reports_reveal_fraction_and_history_fade() {
    let cfg = RouteFieldConfig::default();
    let state = FieldState {
        routes: vec![Route {
            id: RouteId(1),
            color: cfg.palette[0],
            points: vec![Point::new(50.0, 50.0)],
            pending: Some(PendingSegment {
                end: Point::new(100.0, 50.0),
                started: Millis(1000),
            }),
            last_direction: None,
            target: Point::new(200.0, 50.0),
            retiring: false,
        }],
        history: [HistoryEntry {
            id: RouteId(0),
            color: cfg.palette[1],
            points: pts(3),
            archived_at: Millis(0),
        }]
        .into_iter()
        .collect(),
    };

    let start = FieldFrame::build(&state, &cfg, Millis(1000));
    let partial = start.routes[0].partial.unwrap();
    assert_eq!(partial.fraction, 0.0);
    assert_eq!(partial.tip(), Point::new(50.0, 50.0));
    assert!(start.history[0].opacity < 1.0);

    let done = FieldFrame::build(&state, &cfg, Millis(1300));
    assert_eq!(done.routes[0].partial.unwrap().fraction, 1.0);
    assert_eq!(done.routes[0].partial.unwrap().tip(), Point::new(100.0, 50.0));

    let mid = FieldFrame::build(&state, &cfg, Millis(4000));
    let late = FieldFrame::build(&state, &cfg, Millis(7000));
    assert!(mid.history[0].opacity > late.history[0].opacity);
    let gone = FieldFrame::build(&state, &cfg, Millis(8000));
    assert_eq!(gone.history[0].opacity, 0.0);

    let at_archive = FieldFrame::build(&state, &cfg, Millis(0));
    assert_eq!(at_archive.history[0].opacity, 1.0);
}
