use crate::{
    config::TrackerConfig,
    foundation::core::Rgba8,
    foundation::error::{CircuitError, CircuitResult},
    tracker::progress::{ProgressState, active_zone, compute_progress},
    tracker::zone::{ScrollRequest, Viewport, Zone, ZoneRect},
};

/// One station marker on the track.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StationView {
    pub label: String,
    pub color: Rgba8,
    /// Relative position along the track.
    pub position: f64,
    /// Position in track pixels for the last laid-out width.
    pub x_px: f64,
    pub is_active: bool,
}

/// What the host draws for the tracker overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TrackFrame {
    pub stations: Vec<StationView>,
    /// Relative position of the moving marker; may run past the track end.
    pub progress: f64,
    pub marker_x_px: f64,
}

/// Scroll-synchronized zone tracker.
///
/// Holds the ordered zones of a page and the last [`ProgressState`]. Each scroll or
/// resize signal re-measures every zone once and overwrites the state.
#[derive(Debug)]
pub struct ProgressTracker {
    cfg: TrackerConfig,
    zones: Vec<Zone>,
    positions: Vec<f64>,
    track_width: f64,
    state: ProgressState,
}

impl ProgressTracker {
    pub fn new(cfg: TrackerConfig, zones: Vec<Zone>) -> CircuitResult<Self> {
        cfg.validate()?;
        let positions = match &cfg.track_positions {
            Some(p) if p.len() != zones.len() => {
                return Err(CircuitError::validation(format!(
                    "track_positions has {} entries for {} zones",
                    p.len(),
                    zones.len()
                )));
            }
            Some(p) => p.clone(),
            None => even_positions(zones.len()),
        };
        Ok(Self {
            cfg,
            zones,
            positions,
            track_width: 0.0,
            state: ProgressState::default(),
        })
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    /// Lowest measured zone bottom in document coordinates, `None` when nothing is mounted.
    pub fn content_bottom(&self, viewport: &Viewport) -> Option<f64> {
        self.zones
            .iter()
            .filter_map(|z| z.bounds.bounds(viewport))
            .map(|r| r.bottom + viewport.scroll_y)
            .filter(|b| b.is_finite())
            .reduce(f64::max)
    }

    /// Scroll signal: recompute the active zone and progress.
    pub fn remeasure(&mut self, viewport: &Viewport) -> ProgressState {
        let rects: Vec<Option<ZoneRect>> =
            self.zones.iter().map(|z| z.bounds.bounds(viewport)).collect();
        let active = active_zone(
            &rects,
            viewport.height,
            self.cfg.center_fraction,
            self.state.active_zone,
        );
        let first_top = rects.first().copied().flatten().map(|r| r.top + viewport.scroll_y);
        let last_bottom = rects
            .last()
            .copied()
            .flatten()
            .map(|r| r.bottom + viewport.scroll_y);
        let progress = compute_progress(first_top, last_bottom, viewport, &self.cfg);

        let next = ProgressState {
            active_zone: active,
            progress,
        };
        if next.active_zone != self.state.active_zone {
            tracing::debug!(
                from = self.state.active_index(),
                to = next.active_index(),
                "active zone changed"
            );
        }
        self.state = next;
        next
    }

    /// Resize signal: lay the stations out on a track `track_width` pixels wide, then re-measure.
    pub fn resize(&mut self, viewport: &Viewport, track_width: f64) -> ProgressState {
        self.track_width = track_width.max(0.0);
        self.remeasure(viewport)
    }

    /// Direct interaction with a station label.
    pub fn activate(&self, index: usize, viewport: &Viewport) -> Option<ScrollRequest> {
        self.zones.get(index)?.bounds.scroll_into_view(viewport)
    }

    pub fn frame(&self) -> TrackFrame {
        let stations = self
            .zones
            .iter()
            .zip(&self.positions)
            .enumerate()
            .map(|(i, (z, &position))| StationView {
                label: z.label.clone(),
                color: z.color,
                position,
                x_px: position * self.track_width,
                is_active: self.state.active_zone == Some(i),
            })
            .collect();
        TrackFrame {
            stations,
            progress: self.state.progress,
            marker_x_px: self.state.progress * self.track_width,
        }
    }
}

/// `i / (n - 1)` for each zone; a lone zone sits in the middle.
pub fn even_positions(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.5],
        _ => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracker/track.rs"]
mod tests;
