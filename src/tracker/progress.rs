use crate::{
    config::TrackerConfig,
    tracker::zone::{Viewport, ZoneRect},
};

/// Output of one tracking pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ProgressState {
    /// First zone straddling the viewport center; sticky across passes with no match.
    pub active_zone: Option<usize>,
    /// Marker position along the track; `progress_base..=progress_base + progress_span`,
    /// or exactly 0 when the scroll range is degenerate or unmeasurable.
    pub progress: f64,
}

impl ProgressState {
    /// Active index with `-1` standing for "none".
    pub fn active_index(&self) -> i64 {
        self.active_zone.map_or(-1, |i| i as i64)
    }
}

/// Index of the first zone straddling `center_fraction` of the viewport height.
///
/// Unmeasured zones are skipped. Without a match the previous index is kept.
pub fn active_zone(
    rects: &[Option<ZoneRect>],
    viewport_height: f64,
    center_fraction: f64,
    previous: Option<usize>,
) -> Option<usize> {
    let center = viewport_height * center_fraction;
    rects
        .iter()
        .position(|r| r.is_some_and(|r| r.straddles(center)))
        .or(previous)
}

/// Scroll range over which progress advances.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollSpan {
    pub start: f64,
    pub end: f64,
}

/// Start begins before the first zone reaches the center; end is capped at a
/// fraction of the maximum scroll regardless of where the last zone ends.
pub fn scroll_span(
    first_top: f64,
    last_bottom: f64,
    viewport: &Viewport,
    cfg: &TrackerConfig,
) -> ScrollSpan {
    let max_scroll = viewport.document_height - viewport.height;
    ScrollSpan {
        start: (first_top - cfg.center_fraction * viewport.height).max(0.0),
        end: last_bottom.min(cfg.max_scroll_cap * max_scroll),
    }
}

/// Normalized progress through the zones.
///
/// `first_top` and `last_bottom` are absolute page coordinates; if either is missing
/// or the span is empty the result is 0.
pub fn compute_progress(
    first_top: Option<f64>,
    last_bottom: Option<f64>,
    viewport: &Viewport,
    cfg: &TrackerConfig,
) -> f64 {
    let (Some(first_top), Some(last_bottom)) = (first_top, last_bottom) else {
        return 0.0;
    };
    let span = scroll_span(first_top, last_bottom, viewport, cfg);
    if !(span.end > span.start) {
        return 0.0;
    }
    let raw = ((viewport.scroll_y - span.start) / (span.end - span.start)).clamp(0.0, 1.0);
    cfg.progress_base + cfg.progress_span * raw
}

#[cfg(test)]
#[path = "../../tests/unit/tracker/progress.rs"]
mod tests;
