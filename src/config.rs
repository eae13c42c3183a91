use crate::{
    animation::ease::Ease,
    foundation::core::{LogicalSpace, Millis, Rgba8, Vec2},
    foundation::error::{CircuitError, CircuitResult},
};

/// Default subway palette: red, green, blue, yellow.
pub const DEFAULT_PALETTE: [Rgba8; 4] = [
    Rgba8::rgb(0xEE, 0x35, 0x2E),
    Rgba8::rgb(0x00, 0x93, 0x3C),
    Rgba8::rgb(0x00, 0x39, 0xA6),
    Rgba8::rgb(0xFC, 0xCC, 0x0A),
];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tuning for the pointer-driven route generator.
///
/// Every field has a default, so a JSON config only needs to name what it changes.
pub struct RouteFieldConfig {
    /// Ordered route colors.
    pub palette: Vec<Rgba8>,
    /// Logical coordinate space and clamping margin.
    pub space: LogicalSpace,
    /// Minimum time between two spawns.
    pub spawn_min_interval: Millis,
    /// Minimum logical distance the pointer must travel between spawns.
    pub spawn_min_distance: f64,
    /// Routes created per spawn.
    pub routes_per_spawn: usize,
    /// Radius of the ring the new routes start on.
    pub spawn_radius: f64,
    /// Growth tick interval.
    pub grow_interval: Millis,
    /// Shortest candidate segment.
    pub segment_len_min: f64,
    /// Longest candidate segment.
    pub segment_len_max: f64,
    /// Probability that a diagonal candidate is generated.
    pub diagonal_probability: f64,
    /// Probability that a growing route picks a new target on a tick.
    pub retarget_probability: f64,
    /// Probability that the previous direction is pushed to the back of the candidates.
    pub variety_probability: f64,
    /// Per-axis probability that a target coordinate is a local offset instead of an edge.
    pub local_target_probability: f64,
    /// Half-extent of local target offsets at spawn time.
    pub spawn_target_spread: Vec2,
    /// Half-extent of local target offsets when re-targeting.
    pub retarget_spread: Vec2,
    /// Distance from the space edge at which edge targets are placed.
    pub edge_inset: f64,
    /// Duration of a segment reveal.
    pub reveal_duration: Millis,
    /// Easing of the segment reveal.
    pub reveal_ease: Ease,
    /// Fade-out duration of archived routes.
    pub history_fade: Millis,
    /// Extra time before a faded entry is deleted.
    pub history_fade_margin: Millis,
    /// Maximum archived routes kept for fading.
    pub history_capacity: usize,
    /// Easing of the history fade.
    pub history_ease: Ease,
    /// Stroke and marker styling.
    pub style: RouteStyle,
}

impl Default for RouteFieldConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            space: LogicalSpace::default(),
            spawn_min_interval: Millis(120),
            spawn_min_distance: 8.0,
            routes_per_spawn: 3,
            spawn_radius: 6.0,
            grow_interval: Millis(240),
            segment_len_min: 24.0,
            segment_len_max: 80.0,
            diagonal_probability: 0.25,
            retarget_probability: 0.18,
            variety_probability: 0.5,
            local_target_probability: 0.5,
            spawn_target_spread: Vec2::new(70.0, 50.0),
            retarget_spread: Vec2::new(60.0, 45.0),
            edge_inset: 20.0,
            reveal_duration: Millis(300),
            reveal_ease: Ease::EaseOut,
            history_fade: Millis(8000),
            history_fade_margin: Millis(250),
            history_capacity: 4,
            history_ease: Ease::EaseOut,
            style: RouteStyle::default(),
        }
    }
}

impl RouteFieldConfig {
    pub fn validate(&self) -> CircuitResult<()> {
        if self.palette.is_empty() {
            return Err(CircuitError::validation("palette must not be empty"));
        }
        self.space.validate()?;
        if self.routes_per_spawn == 0 {
            return Err(CircuitError::validation("routes_per_spawn must be > 0"));
        }
        if !(self.segment_len_min > 0.0 && self.segment_len_min <= self.segment_len_max) {
            return Err(CircuitError::validation(
                "segment length range must satisfy 0 < min <= max",
            ));
        }
        for (name, p) in [
            ("diagonal_probability", self.diagonal_probability),
            ("retarget_probability", self.retarget_probability),
            ("variety_probability", self.variety_probability),
            ("local_target_probability", self.local_target_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CircuitError::validation(format!(
                    "{name} must be in [0, 1]"
                )));
            }
        }
        for (name, v) in [
            ("spawn_min_distance", self.spawn_min_distance),
            ("spawn_radius", self.spawn_radius),
            ("edge_inset", self.edge_inset),
            ("spawn_target_spread.x", self.spawn_target_spread.x),
            ("spawn_target_spread.y", self.spawn_target_spread.y),
            ("retarget_spread.x", self.retarget_spread.x),
            ("retarget_spread.y", self.retarget_spread.y),
        ] {
            if !(v >= 0.0) {
                return Err(CircuitError::validation(format!("{name} must be >= 0")));
            }
        }
        if self.grow_interval.0 == 0 {
            return Err(CircuitError::validation("grow_interval must be > 0"));
        }
        if self.reveal_duration.0 == 0 {
            return Err(CircuitError::validation("reveal_duration must be > 0"));
        }
        if self.history_fade.0 == 0 {
            return Err(CircuitError::validation("history_fade must be > 0"));
        }
        if self.history_capacity == 0 {
            return Err(CircuitError::validation("history_capacity must be > 0"));
        }
        self.style.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Drawing parameters for routes, in logical units.
pub struct RouteStyle {
    pub stroke_width: f64,
    pub marker_radius: f64,
    pub marker_outline_width: f64,
    pub marker_outline: Rgba8,
    /// Opacity of the whole route layer over the page.
    pub layer_opacity: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            stroke_width: 0.8,
            marker_radius: 1.8,
            marker_outline_width: 0.7,
            marker_outline: Rgba8::WHITE,
            layer_opacity: 0.2,
        }
    }
}

impl RouteStyle {
    pub fn validate(&self) -> CircuitResult<()> {
        if !(self.stroke_width > 0.0) || !(self.marker_radius >= 0.0) {
            return Err(CircuitError::validation(
                "stroke_width must be > 0 and marker_radius >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.layer_opacity) {
            return Err(CircuitError::validation("layer_opacity must be in [0, 1]"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tuning for the scroll-synchronized zone tracker.
pub struct TrackerConfig {
    /// Viewport fraction a zone must straddle to become active.
    pub center_fraction: f64,
    /// Progress value at the very start of the track.
    pub progress_base: f64,
    /// Progress added over the full scroll range.
    pub progress_span: f64,
    /// Fraction of the maximum scroll by which progress completes.
    pub max_scroll_cap: f64,
    /// Explicit relative track positions per zone; evenly spaced when absent.
    pub track_positions: Option<Vec<f64>>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            center_fraction: 0.5,
            progress_base: 0.05,
            progress_span: 0.95,
            max_scroll_cap: 0.8,
            track_positions: None,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> CircuitResult<()> {
        for (name, v) in [
            ("center_fraction", self.center_fraction),
            ("progress_base", self.progress_base),
            ("max_scroll_cap", self.max_scroll_cap),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(CircuitError::validation(format!("{name} must be in [0, 1]")));
            }
        }
        if !(self.progress_span >= 0.0) {
            return Err(CircuitError::validation("progress_span must be >= 0"));
        }
        if let Some(positions) = &self.track_positions
            && positions.iter().any(|p| !p.is_finite())
        {
            return Err(CircuitError::validation("track_positions must be finite"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Pixel size of the raster surface and of each corner sketch.
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    /// Background the frame is cleared to; transparent when absent.
    pub background: Option<Rgba8>,
    /// Edge length of a corner sketch box in pixels.
    pub corner_size: f64,
    /// Inset of corner boxes from the surface edges in pixels.
    pub corner_inset: f64,
    pub corners_enabled: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            background: Some(Rgba8::rgb(0, 0, 0)),
            corner_size: 140.0,
            corner_inset: 24.0,
            corners_enabled: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Everything a [`crate::Stage`] needs, loadable from one JSON document.
pub struct StageConfig {
    pub routes: RouteFieldConfig,
    pub tracker: TrackerConfig,
    pub surface: SurfaceConfig,
}

impl StageConfig {
    pub fn validate(&self) -> CircuitResult<()> {
        self.routes.validate()?;
        self.tracker.validate()?;
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(CircuitError::validation("surface size must be > 0"));
        }
        Ok(())
    }

    pub fn from_json(s: &str) -> CircuitResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
