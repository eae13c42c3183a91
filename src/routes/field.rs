use std::collections::HashMap;

use crate::{
    animation::tween::Tween,
    config::RouteFieldConfig,
    foundation::core::{Millis, Point, Size},
    foundation::error::CircuitResult,
    foundation::rng::{RandomSource, Rng64},
    routes::frame::FieldFrame,
    routes::model::{FieldState, HistoryEntry, PendingSegment, Route, RouteId},
    routes::segment::{burst_ring, next_segment, pick_target},
    runtime::timers::{TimerId, TimerRegistry},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldTimer {
    Grow,
    RevealDone(RouteId),
    Expire(RouteId),
}

/// Result of a pure state transition plus the timer work it implies.
#[derive(Default)]
struct Transition {
    state: FieldState,
    started: Vec<RouteId>,
    archived: Vec<RouteId>,
    evicted: Vec<RouteId>,
}

/// Pointer-driven generator of branching, orthogonal-biased routes.
///
/// The field is event and timer driven but owns its clock: the host reports pointer
/// activity with a timestamp and calls [`RouteField::advance_to`] to let growth ticks,
/// reveal completions and history expiries fire in deadline order. Every step replaces
/// the published [`FieldState`] snapshot.
///
/// Leaving the host (`set_active(false)`) stops spawning and growth. Segments already
/// revealing still commit, so routes freeze in place until the next spawn after
/// re-entry retires them.
pub struct RouteField<R: RandomSource = Rng64> {
    cfg: RouteFieldConfig,
    rng: R,
    state: FieldState,
    timers: TimerRegistry<FieldTimer>,
    grow_timer: Option<TimerId>,
    expiry_timers: HashMap<RouteId, TimerId>,
    active: bool,
    last_spawn_pos: Option<Point>,
    last_spawn_at: Option<Millis>,
    now: Millis,
    next_id: u64,
}

impl RouteField<Rng64> {
    /// Field with a seeded SplitMix64 source.
    pub fn seeded(cfg: RouteFieldConfig, seed: u64) -> CircuitResult<Self> {
        Self::new(cfg, Rng64::new(seed))
    }
}

impl<R: RandomSource> RouteField<R> {
    pub fn new(cfg: RouteFieldConfig, rng: R) -> CircuitResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            rng,
            state: FieldState::default(),
            timers: TimerRegistry::new(),
            grow_timer: None,
            expiry_timers: HashMap::new(),
            active: false,
            last_spawn_pos: None,
            last_spawn_at: None,
            now: Millis::ZERO,
            next_id: 1,
        })
    }

    pub fn config(&self) -> &RouteFieldConfig {
        &self.cfg
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> &FieldState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Latest time the field has been advanced to.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of armed timers (growth, reveals, expiries).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Enable or disable pointer-driven growth.
    pub fn set_active(&mut self, now: Millis, active: bool) {
        self.advance_to(now);
        if active == self.active {
            return;
        }
        self.active = active;
        if active {
            let first = self.now + self.cfg.grow_interval;
            self.grow_timer = Some(self.timers.schedule_every(
                first,
                self.cfg.grow_interval,
                FieldTimer::Grow,
            ));
        } else {
            if let Some(id) = self.grow_timer.take() {
                self.timers.cancel(id);
            }
            self.last_spawn_pos = None;
        }
        tracing::debug!(active, now = now.0, "route field activity changed");
    }

    /// Report the pointer at `host_px` inside a host of size `host`.
    ///
    /// Returns whether a new burst was spawned. Ignored while inactive, when the host
    /// has no measurable size, when the position is not finite, or when the throttle
    /// (time and distance) rejects it.
    pub fn pointer_moved(&mut self, now: Millis, host_px: Point, host: Size) -> bool {
        self.advance_to(now);
        if !self.active {
            return false;
        }
        let Some(pos) = self.cfg.space.map_from_host(host_px, host) else {
            tracing::debug!(x = host_px.x, y = host_px.y, "pointer ignored: unmappable position");
            return false;
        };
        if let Some(at) = self.last_spawn_at
            && self.now.since(at) < self.cfg.spawn_min_interval
        {
            return false;
        }
        if let Some(prev) = self.last_spawn_pos
            && prev.distance(pos) < self.cfg.spawn_min_distance
        {
            return false;
        }
        self.spawn_at(pos);
        true
    }

    /// Spawn a burst at a logical position, bypassing the pointer throttle.
    pub fn spawn_at(&mut self, pos: Point) {
        let now = self.now;
        self.last_spawn_at = Some(now);
        self.last_spawn_pos = Some(pos);

        let mut next = FieldState {
            routes: self
                .state
                .routes
                .iter()
                .cloned()
                .map(|mut r| {
                    r.retiring = true;
                    r
                })
                .collect(),
            history: self.state.history.clone(),
        };

        let mut started = Vec::with_capacity(self.cfg.routes_per_spawn);
        let palette_len = self.cfg.palette.len();
        let starts = burst_ring(
            pos,
            self.cfg.routes_per_spawn,
            self.cfg.spawn_radius,
            &self.cfg.space,
        );
        for (i, start) in starts.into_iter().enumerate() {
            let color = self.cfg.palette[(self.rng.index(palette_len) + i) % palette_len];
            let target = pick_target(start, self.cfg.spawn_target_spread, &self.cfg, &mut self.rng);
            let first = next_segment(start, target, None, &self.cfg, &mut self.rng);
            let id = RouteId(self.next_id);
            self.next_id += 1;
            next.routes.push(Route {
                id,
                color,
                points: vec![start],
                pending: Some(PendingSegment {
                    end: first.point,
                    started: now,
                }),
                last_direction: Some(first.direction),
                target,
                retiring: false,
            });
            started.push(id);
        }
        tracing::debug!(
            x = pos.x,
            y = pos.y,
            spawned = started.len(),
            now = now.0,
            "route burst spawned"
        );

        let swept = sweep_retired(next, now, self.cfg.history_capacity);
        self.apply(Transition { started, ..swept });
    }

    /// Fire every timer due at or before `now`, in deadline order.
    pub fn advance_to(&mut self, now: Millis) {
        while let Some((_, at, event)) = self.timers.pop_due(now) {
            self.now = self.now.max(at);
            match event {
                FieldTimer::Grow => self.grow(),
                FieldTimer::RevealDone(id) => self.commit(id),
                FieldTimer::Expire(id) => self.expire(id),
            }
        }
        self.now = self.now.max(now);
    }

    /// Cancel every timer and stop growth; the snapshot stays readable.
    ///
    /// Returns how many timers were cancelled.
    pub fn teardown(&mut self) -> usize {
        let n = self.timers.cancel_all();
        self.grow_timer = None;
        self.expiry_timers.clear();
        self.active = false;
        tracing::debug!(cancelled = n, "route field torn down");
        n
    }

    /// Render view of the current snapshot at `now`.
    pub fn frame(&self, now: Millis) -> FieldFrame {
        FieldFrame::build(&self.state, &self.cfg, now)
    }

    fn grow(&mut self) {
        let now = self.now;
        let mut started = Vec::new();
        let routes = self
            .state
            .routes
            .iter()
            .map(|r| {
                if !r.can_grow() {
                    return r.clone();
                }
                let last = r.last_point();
                let target = if self.rng.chance(self.cfg.retarget_probability) {
                    pick_target(last, self.cfg.retarget_spread, &self.cfg, &mut self.rng)
                } else {
                    r.target
                };
                let seg = next_segment(last, target, r.last_direction, &self.cfg, &mut self.rng);
                started.push(r.id);
                Route {
                    pending: Some(PendingSegment {
                        end: seg.point,
                        started: now,
                    }),
                    last_direction: Some(seg.direction),
                    target,
                    ..r.clone()
                }
            })
            .collect();
        tracing::trace!(grown = started.len(), now = now.0, "growth tick");
        self.apply(Transition {
            state: FieldState {
                routes,
                history: self.state.history.clone(),
            },
            started,
            ..Transition::default()
        });
    }

    fn commit(&mut self, id: RouteId) {
        let routes = self
            .state
            .routes
            .iter()
            .map(|r| match r.pending {
                Some(seg) if r.id == id => {
                    let mut points = r.points.clone();
                    points.push(seg.end);
                    Route {
                        points,
                        pending: None,
                        ..r.clone()
                    }
                }
                _ => r.clone(),
            })
            .collect();
        let next = FieldState {
            routes,
            history: self.state.history.clone(),
        };
        let swept = sweep_retired(next, self.now, self.cfg.history_capacity);
        self.apply(swept);
    }

    fn expire(&mut self, id: RouteId) {
        self.expiry_timers.remove(&id);
        let mut history = self.state.history.clone();
        history.retain(|h| h.id != id);
        tracing::debug!(id = id.0, "history entry expired");
        self.state = FieldState {
            routes: self.state.routes.clone(),
            history,
        };
    }

    fn apply(&mut self, t: Transition) {
        let now = self.now;
        for id in t.started {
            self.timers
                .schedule_at(now + self.cfg.reveal_duration, FieldTimer::RevealDone(id));
        }
        for id in t.evicted {
            if let Some(timer) = self.expiry_timers.remove(&id) {
                self.timers.cancel(timer);
            }
        }
        let expire_at = now + self.cfg.history_fade + self.cfg.history_fade_margin;
        for id in t.archived {
            // The entry may have been evicted by later archivals in the same sweep.
            if t.state.history_entry(id).is_some() {
                let timer = self.timers.schedule_at(expire_at, FieldTimer::Expire(id));
                self.expiry_timers.insert(id, timer);
            }
        }
        self.state = t.state;
    }

    /// Reveal tween of the route's in-flight segment, if any.
    pub fn reveal_of(&self, id: RouteId) -> Option<Tween> {
        let r = self.state.route(id)?;
        let seg = r.pending?;
        Some(Tween::new(
            seg.started,
            self.cfg.reveal_duration,
            self.cfg.reveal_ease,
        ))
    }
}

/// Move archivable routes to history (oldest first) and enforce the history cap.
///
/// Retiring idle routes with a single point can never become history and are dropped.
fn sweep_retired(state: FieldState, now: Millis, capacity: usize) -> Transition {
    let FieldState {
        routes,
        mut history,
    } = state;
    let mut kept = Vec::with_capacity(routes.len());
    let mut archived = Vec::new();
    for r in routes {
        if r.is_archivable() {
            tracing::debug!(id = r.id.0, points = r.points.len(), "route archived");
            archived.push(r.id);
            history.push_back(HistoryEntry {
                id: r.id,
                color: r.color,
                points: r.points,
                archived_at: now,
            });
        } else if r.retiring && r.pending.is_none() {
            tracing::debug!(id = r.id.0, "retired route too short to archive");
        } else {
            kept.push(r);
        }
    }
    let mut evicted = Vec::new();
    while history.len() > capacity {
        if let Some(old) = history.pop_front() {
            evicted.push(old.id);
        }
    }
    Transition {
        state: FieldState {
            routes: kept,
            history,
        },
        started: Vec::new(),
        archived,
        evicted,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/routes/field.rs"]
mod tests;
