pub(crate) mod script;

use crate::{
    config::StageConfig,
    decor::corner::{Corner, CornerSet},
    foundation::core::{Millis, Point, Rect, Size},
    foundation::error::CircuitResult,
    foundation::rng::{RandomSource, Rng64},
    render::draw::{DrawList, draw_field, draw_track, slice_fit},
    render::surface::{FrameRGBA, Surface, SurfaceKind, create_surface},
    routes::field::RouteField,
    runtime::signals::{SignalHub, SignalKind},
    stage::script::{Script, StageEvent},
    tracker::progress::ProgressState,
    tracker::track::ProgressTracker,
    tracker::zone::{ScrollRequest, Viewport, Zone},
};

/// Fraction of the surface width the station track spans.
const TRACK_SPAN: f64 = 0.8;
/// Distance of the track's center line from the bottom edge, in pixels.
const TRACK_BOTTOM: f64 = 32.0;

/// One page's worth of ambient decoration: route field backdrop, station tracker,
/// corner sketches and the surface they are rendered to.
///
/// The stage forwards host signals to its parts while subscribed. After
/// [`Stage::teardown`] (or drop) every timer is cancelled and further signals are ignored.
pub struct Stage<R: RandomSource = Rng64> {
    cfg: StageConfig,
    field: RouteField<R>,
    tracker: ProgressTracker,
    corners: CornerSet,
    surface: Option<Box<dyn Surface>>,
    signals: SignalHub,
    host: Size,
    viewport: Viewport,
    track_width: f64,
    torn_down: bool,
}

impl Stage<Rng64> {
    pub fn new(cfg: StageConfig, zones: Vec<Zone>, seed: u64) -> CircuitResult<Self> {
        Self::with_rng(cfg, zones, Rng64::new(seed))
    }
}

impl<R: RandomSource> Stage<R> {
    /// Build a stage; a surface that cannot be created leaves the stage running headless.
    pub fn with_rng(cfg: StageConfig, zones: Vec<Zone>, rng: R) -> CircuitResult<Self> {
        cfg.validate()?;
        let field = RouteField::new(cfg.routes.clone(), rng)?;
        let tracker = ProgressTracker::new(cfg.tracker.clone(), zones)?;
        let surf = &cfg.surface;
        let corners = if surf.corners_enabled {
            CornerSet::standard(surf.corner_size, surf.corner_inset)
        } else {
            CornerSet::empty(surf.corner_size, surf.corner_inset)
        };
        let surface = create_surface(SurfaceKind::Cpu, surf.width, surf.height, surf.background)
            .inspect_err(|err| tracing::warn!(%err, "surface unavailable; rendering disabled"))
            .ok();
        let host = Size::new(f64::from(surf.width), f64::from(surf.height));
        let mut signals = SignalHub::new();
        for kind in [
            SignalKind::Pointer,
            SignalKind::Scroll,
            SignalKind::Resize,
            SignalKind::CornerHover,
        ] {
            signals.subscribe(kind);
        }

        // Until the host reports a document height, the page is assumed to end at the last zone.
        let mut viewport = Viewport::new(host.height, 0.0, host.height);
        if let Some(bottom) = tracker.content_bottom(&viewport) {
            viewport.document_height = viewport.document_height.max(bottom);
        }

        let mut stage = Self {
            field,
            tracker,
            corners,
            surface,
            signals,
            host,
            viewport,
            track_width: host.width * TRACK_SPAN,
            torn_down: false,
            cfg,
        };
        let (viewport, width) = (stage.viewport, stage.track_width);
        stage.tracker.resize(&viewport, width);
        Ok(stage)
    }

    /// Replace the render target, or run headless with `None`.
    pub fn set_surface(&mut self, surface: Option<Box<dyn Surface>>) {
        self.surface = surface;
    }

    pub fn config(&self) -> &StageConfig {
        &self.cfg
    }

    pub fn field(&self) -> &RouteField<R> {
        &self.field
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn corners(&self) -> &CornerSet {
        &self.corners
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn host_size(&self) -> Size {
        self.host
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn pointer_enter(&mut self, now: Millis) {
        if self.signals.is_listening(SignalKind::Pointer) {
            self.field.set_active(now, true);
        }
    }

    /// Returns whether the move spawned a burst.
    pub fn pointer_move(&mut self, now: Millis, host_px: Point) -> bool {
        if !self.signals.is_listening(SignalKind::Pointer) {
            return false;
        }
        self.field.pointer_moved(now, host_px, self.host)
    }

    pub fn pointer_leave(&mut self, now: Millis) {
        if self.signals.is_listening(SignalKind::Pointer) {
            self.field.set_active(now, false);
        }
    }

    pub fn scroll(&mut self, now: Millis, scroll_y: f64) -> ProgressState {
        if !self.signals.is_listening(SignalKind::Scroll) {
            return self.tracker.state();
        }
        self.advance(now);
        self.viewport.scroll_y = scroll_y.clamp(0.0, self.viewport.max_scroll());
        self.tracker.remeasure(&self.viewport)
    }

    /// Host resize: new window size and, when known, new document height.
    pub fn resize(&mut self, now: Millis, host: Size, document_height: Option<f64>) -> ProgressState {
        if !self.signals.is_listening(SignalKind::Resize) {
            return self.tracker.state();
        }
        self.advance(now);
        self.host = host;
        self.viewport.height = host.height;
        if let Some(h) = document_height {
            self.viewport.document_height = h;
        }
        self.viewport.scroll_y = self.viewport.scroll_y.clamp(0.0, self.viewport.max_scroll());
        self.track_width = host.width * TRACK_SPAN;
        self.tracker.resize(&self.viewport, self.track_width)
    }

    /// Returns whether a decoration received the hover change.
    pub fn corner_hover(&mut self, corner: Corner, hover: bool) -> bool {
        if !self.signals.is_listening(SignalKind::CornerHover) {
            return false;
        }
        self.corners.set_hover(corner, hover)
    }

    /// Station label clicked: where the host should scroll to.
    pub fn activate_station(&self, index: usize) -> Option<ScrollRequest> {
        self.tracker.activate(index, &self.viewport)
    }

    /// Let route timers fire up to `now`.
    pub fn advance(&mut self, now: Millis) {
        if !self.torn_down {
            self.field.advance_to(now);
        }
    }

    /// Everything drawn for a frame at `now`, in surface pixels.
    ///
    /// Advances corner animations by one frame.
    pub fn draw_list(&mut self, now: Millis) -> DrawList {
        let (w, h) = match &self.surface {
            Some(s) => {
                let (w, h) = s.size();
                (f64::from(w), f64::from(h))
            }
            None => (self.host.width, self.host.height),
        };
        let mut out = DrawList::new();
        let to_surface = slice_fit(&self.cfg.routes.space, w, h);
        draw_field(&mut out, &self.field.frame(now), &self.cfg.routes.style, to_surface);

        let track = self.tracker.frame();
        if !track.stations.is_empty() {
            let x0 = (w - w * TRACK_SPAN) * 0.5;
            let y = h - TRACK_BOTTOM;
            draw_track(&mut out, &track, Rect::new(x0, y - 10.0, x0 + w * TRACK_SPAN, y + 10.0));
        }
        self.corners.draw(now.as_f64() / 1000.0, Size::new(w, h), &mut out);
        out
    }

    /// Advance to `now` and rasterize one frame.
    ///
    /// `None` when running headless or when the surface fails; the stage keeps running
    /// either way.
    #[tracing::instrument(skip(self))]
    pub fn render(&mut self, now: Millis) -> Option<FrameRGBA> {
        self.advance(now);
        let list = self.draw_list(now);
        let surface = self.surface.as_mut()?;
        surface.execute(&list);
        match surface.finish() {
            Ok(frame) => Some(frame),
            Err(err) => {
                tracing::warn!(%err, "frame dropped");
                None
            }
        }
    }

    pub fn apply(&mut self, now: Millis, event: &StageEvent) {
        match event {
            StageEvent::PointerEnter => self.pointer_enter(now),
            StageEvent::PointerMove { x, y } => {
                self.pointer_move(now, Point::new(*x, *y));
            }
            StageEvent::PointerLeave => self.pointer_leave(now),
            StageEvent::Scroll { scroll_y } => {
                self.scroll(now, *scroll_y);
            }
            StageEvent::Resize {
                width,
                height,
                document_height,
            } => {
                self.resize(now, Size::new(*width, *height), *document_height);
            }
            StageEvent::CornerHover { corner, hover } => {
                self.corner_hover(*corner, *hover);
            }
        }
    }

    /// Replay `script` in order and return the time of its last event.
    ///
    /// Event times earlier than the stage clock are treated as "now".
    #[tracing::instrument(skip(self, script), fields(events = script.events.len()))]
    pub fn run_script(&mut self, script: &Script) -> Millis {
        let mut now = self.field.now();
        for timed in &script.events {
            now = now.max(timed.at);
            self.apply(now, &timed.event);
        }
        self.advance(now);
        now
    }

    /// Cancel timers and drop every subscription. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let timers = self.field.teardown();
        let subs = self.signals.unsubscribe_all();
        self.torn_down = true;
        tracing::debug!(timers, subs, "stage torn down");
    }
}

impl<R: RandomSource> Drop for Stage<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/stage.rs"]
mod tests;
