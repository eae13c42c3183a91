use std::collections::VecDeque;

use crate::foundation::core::{Millis, Point, Rgba8};

/// Opaque identifier of a route, stable from spawn through archival.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RouteId(pub u64);

/// Orientation of a committed segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Horizontal,
    Vertical,
    Diagonal,
}

/// The segment currently being revealed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PendingSegment {
    pub end: Point,
    /// Time the reveal started.
    pub started: Millis,
}

/// An active, still-growing route.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Route {
    pub id: RouteId,
    pub color: Rgba8,
    /// Committed vertices in draw order, seeded with the start position.
    pub points: Vec<Point>,
    /// At most one segment is in flight per route.
    pub pending: Option<PendingSegment>,
    pub last_direction: Option<Direction>,
    pub target: Point,
    /// Superseded by a newer spawn; finishes its reveal then archives.
    pub retiring: bool,
}

impl Route {
    /// Newest committed vertex; falls back to `target` for a route with no points.
    pub fn last_point(&self) -> Point {
        self.points.last().copied().unwrap_or(self.target)
    }

    pub fn pending_endpoint(&self) -> Option<Point> {
        self.pending.map(|p| p.end)
    }

    pub fn is_revealing(&self) -> bool {
        self.pending.is_some()
    }

    /// Idle and not retiring.
    pub fn can_grow(&self) -> bool {
        !self.retiring && self.pending.is_none()
    }

    /// Retiring, idle and long enough to be kept as history.
    pub fn is_archivable(&self) -> bool {
        self.retiring && self.pending.is_none() && self.points.len() >= 2
    }
}

/// An archived route rendered with a fade until it expires.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HistoryEntry {
    pub id: RouteId,
    pub color: Rgba8,
    /// At least two points.
    pub points: Vec<Point>,
    pub archived_at: Millis,
}

/// Immutable snapshot of the route field.
///
/// Every event or timer produces a new snapshot; nothing mutates a published one.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FieldState {
    pub routes: Vec<Route>,
    /// Oldest first.
    pub history: VecDeque<HistoryEntry>,
}

impl FieldState {
    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn history_entry(&self, id: RouteId) -> Option<&HistoryEntry> {
        self.history.iter().find(|h| h.id == id)
    }

    pub fn growing(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|r| !r.retiring)
    }

    /// Every committed and pending point of every active route and history entry.
    pub fn all_points(&self) -> impl Iterator<Item = Point> + '_ {
        let active = self
            .routes
            .iter()
            .flat_map(|r| r.points.iter().copied().chain(r.pending_endpoint()));
        let archived = self.history.iter().flat_map(|h| h.points.iter().copied());
        active.chain(archived)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/routes/model.rs"]
mod tests;
