use crate::{
    animation::tween::Tween,
    config::RouteFieldConfig,
    foundation::core::{BezPath, Millis, Point, Rgba8},
    routes::model::{FieldState, RouteId},
};

/// Segment from the last committed vertex toward the pending one, revealed up to `fraction`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PartialSegment {
    pub from: Point,
    pub to: Point,
    /// Eased reveal completion in `[0, 1]`.
    pub fraction: f64,
}

impl PartialSegment {
    /// Currently visible end of the segment.
    pub fn tip(&self) -> Point {
        self.from.lerp(self.to, self.fraction)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RouteDraw {
    pub id: RouteId,
    pub color: Rgba8,
    pub polyline: Vec<Point>,
    pub partial: Option<PartialSegment>,
    pub markers: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HistoryDraw {
    pub id: RouteId,
    pub color: Rgba8,
    pub polyline: Vec<Point>,
    pub markers: Vec<Point>,
    /// Fades from 1 at archival to 0 at the end of the fade duration.
    pub opacity: f64,
}

/// What the host draws for the route field at one instant.
///
/// History is listed first so active routes paint over fading ones.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FieldFrame {
    pub history: Vec<HistoryDraw>,
    pub routes: Vec<RouteDraw>,
}

impl FieldFrame {
    pub fn build(state: &FieldState, cfg: &RouteFieldConfig, now: Millis) -> Self {
        let history = state
            .history
            .iter()
            .map(|h| HistoryDraw {
                id: h.id,
                color: h.color,
                polyline: h.points.clone(),
                markers: marker_points(&h.points),
                opacity: Tween::new(h.archived_at, cfg.history_fade, cfg.history_ease)
                    .fade_out(now),
            })
            .collect();

        let routes = state
            .routes
            .iter()
            .map(|r| {
                let partial = r.pending.map(|seg| PartialSegment {
                    from: r.last_point(),
                    to: seg.end,
                    fraction: Tween::new(seg.started, cfg.reveal_duration, cfg.reveal_ease)
                        .value(now),
                });
                RouteDraw {
                    id: r.id,
                    color: r.color,
                    polyline: r.points.clone(),
                    partial,
                    markers: marker_points(&r.points),
                }
            })
            .collect();

        Self { history, routes }
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.routes.is_empty()
    }
}

/// Vertices that carry a stop marker: every second one, plus always the last.
pub fn marker_points(points: &[Point]) -> Vec<Point> {
    let last = points.len().saturating_sub(1);
    points
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == 0 || *i == last)
        .map(|(_, p)| *p)
        .collect()
}

/// Open polyline as move/line elements; `None` for fewer than two points.
pub fn polyline_path(points: &[Point]) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    Some(path)
}

#[cfg(test)]
#[path = "../../tests/unit/routes/frame.rs"]
mod tests;
