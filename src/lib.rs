//! Circuit draws an ambient transit map behind a page and keeps a station track in sync
//! with scrolling.
//!
//! Two independent components make up a page:
//!
//! - [`RouteField`]: pointer activity spawns bursts of orthogonal-biased routes in a fixed
//!   logical space. Routes grow on a timer, reveal each segment with an eased tween, and
//!   fade out of a bounded history once they retire.
//! - [`ProgressTracker`]: each scroll or resize re-measures a list of page [`Zone`]s,
//!   picks the one straddling the viewport's reference line and maps scroll position to
//!   a marker position on the track.
//!
//! [`Stage`] wires both to host signals together with the corner sketches and renders
//! frames on a CPU surface. Scripts ([`Script`]) replay recorded sessions deterministically.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Injectable time and randomness**: every operation takes the host time; random
//!   draws go through [`RandomSource`].
//! - **Snapshots**: route state is replaced, never mutated in place, on every step.
#![forbid(unsafe_code)]

mod animation;
mod config;
mod decor;
mod foundation;
mod render;
mod routes;
mod runtime;
mod stage;
mod tracker;

pub use animation::ease::Ease;
pub use animation::tween::Tween;
pub use config::{
    DEFAULT_PALETTE, RouteFieldConfig, RouteStyle, StageConfig, SurfaceConfig, TrackerConfig,
};
pub use decor::corner::{Corner, CornerSet, CornerSketch, Decoration};
pub use foundation::core::{BezPath, LogicalSpace, Millis, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{CircuitError, CircuitResult};
pub use foundation::rng::{RandomSource, Rng64, ScriptedSource};
pub use render::cpu::CpuSurface;
pub use render::draw::{DrawCmd, DrawList, draw_field, draw_track, slice_fit};
pub use render::surface::{FrameRGBA, Surface, SurfaceKind, create_surface};
pub use routes::field::RouteField;
pub use routes::frame::{
    FieldFrame, HistoryDraw, PartialSegment, RouteDraw, marker_points, polyline_path,
};
pub use routes::model::{Direction, FieldState, HistoryEntry, PendingSegment, Route, RouteId};
pub use routes::segment::{Candidate, burst_ring, candidates, next_segment, pick_target};
pub use runtime::signals::{SignalHub, SignalKind, SubscriptionId};
pub use runtime::timers::{TimerId, TimerRegistry};
pub use stage::Stage;
pub use stage::script::{Script, StageEvent, TimedEvent, ZoneSpec, default_zones};
pub use tracker::progress::{
    ProgressState, ScrollSpan, active_zone, compute_progress, scroll_span,
};
pub use tracker::track::{ProgressTracker, StationView, TrackFrame, even_positions};
pub use tracker::zone::{BoundsProvider, PageRegion, ScrollRequest, Viewport, Zone, ZoneRect};
