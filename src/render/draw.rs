use kurbo::Affine;

use crate::{
    config::RouteStyle,
    foundation::core::{LogicalSpace, Point, Rect, Rgba8},
    routes::frame::FieldFrame,
    tracker::track::TrackFrame,
};

/// A single drawing instruction for a [`crate::Surface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Replace the current transform (applies to all geometry that follows).
    SetTransform(Affine),
    /// Open polyline with round caps and joins.
    Polyline {
        points: Vec<Point>,
        color: Rgba8,
        width: f64,
    },
    /// Line from `from` toward `to`, drawn up to `fraction` of its length.
    PartialSegment {
        from: Point,
        to: Point,
        fraction: f64,
        color: Rgba8,
        width: f64,
    },
    /// Filled circle with an optional outline ring.
    Marker {
        center: Point,
        radius: f64,
        fill: Rgba8,
        outline: Option<(Rgba8, f64)>,
    },
    /// Filled axis-aligned rectangle.
    Rect { rect: Rect, color: Rgba8 },
    /// Multiply everything until the matching pop by `opacity`.
    PushOpacity(f32),
    PopOpacity,
    /// Discard everything outside `Rect` (under the current transform) until the matching pop.
    PushClip(Rect),
    PopClip,
}

/// Ordered draw instructions; later commands paint over earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Run `body` inside an opacity layer; fully opaque layers are elided.
    pub fn with_opacity(&mut self, opacity: f64, body: impl FnOnce(&mut Self)) {
        let opacity = opacity.clamp(0.0, 1.0) as f32;
        if opacity >= 1.0 {
            body(self);
            return;
        }
        self.push(DrawCmd::PushOpacity(opacity));
        body(self);
        self.push(DrawCmd::PopOpacity);
    }

    /// Run `body` clipped to `rect`.
    pub fn with_clip(&mut self, rect: Rect, body: impl FnOnce(&mut Self)) {
        self.push(DrawCmd::PushClip(rect));
        body(self);
        self.push(DrawCmd::PopClip);
    }
}

/// Map logical space onto a `width x height` surface, covering it and centering the overflow.
pub fn slice_fit(space: &LogicalSpace, width: f64, height: f64) -> Affine {
    let scale = (width / space.width).max(height / space.height);
    let dx = (width - space.width * scale) * 0.5;
    let dy = (height - space.height * scale) * 0.5;
    Affine::translate((dx, dy)) * Affine::scale(scale)
}

fn route_geometry(
    out: &mut DrawList,
    polyline: &[Point],
    markers: &[Point],
    color: Rgba8,
    style: &RouteStyle,
) {
    if polyline.len() > 1 {
        out.push(DrawCmd::Polyline {
            points: polyline.to_vec(),
            color,
            width: style.stroke_width,
        });
    }
    for &center in markers {
        out.push(DrawCmd::Marker {
            center,
            radius: style.marker_radius,
            fill: color,
            outline: Some((style.marker_outline, style.marker_outline_width)),
        });
    }
}

/// Append the route layer: fading history first, then active routes with their reveals.
pub fn draw_field(out: &mut DrawList, frame: &FieldFrame, style: &RouteStyle, to_surface: Affine) {
    if frame.is_empty() {
        return;
    }
    out.push(DrawCmd::SetTransform(to_surface));
    out.with_opacity(style.layer_opacity, |out| {
        for h in &frame.history {
            if h.opacity <= 0.0 {
                continue;
            }
            out.with_opacity(h.opacity, |out| {
                route_geometry(out, &h.polyline, &h.markers, h.color, style);
            });
        }
        for r in &frame.routes {
            route_geometry(out, &r.polyline, &r.markers, r.color, style);
            if let Some(seg) = r.partial {
                out.push(DrawCmd::PartialSegment {
                    from: seg.from,
                    to: seg.to,
                    fraction: seg.fraction,
                    color: r.color,
                    width: style.stroke_width,
                });
            }
        }
    });
}

/// Append a horizontal station track inside `bounds` (surface pixels).
pub fn draw_track(out: &mut DrawList, frame: &TrackFrame, bounds: Rect) {
    let y = bounds.center().y;
    let x_at = |position: f64| bounds.x0 + position * bounds.width();
    out.push(DrawCmd::SetTransform(Affine::IDENTITY));
    out.push(DrawCmd::Rect {
        rect: Rect::new(bounds.x0, y - 2.0, bounds.x1, y + 2.0),
        color: Rgba8::rgba(255, 255, 255, 26),
    });
    for s in &frame.stations {
        let center = Point::new(x_at(s.position), y);
        let (fill, radius) = if s.is_active {
            (s.color, 8.75)
        } else {
            (Rgba8::rgba(255, 255, 255, 46), 7.0)
        };
        out.push(DrawCmd::Marker {
            center,
            radius,
            fill,
            outline: None,
        });
    }
    out.push(DrawCmd::Marker {
        center: Point::new(x_at(frame.progress), y),
        radius: 5.0,
        fill: Rgba8::rgb(0x00, 0x4B, 0x87),
        outline: Some((Rgba8::WHITE, 2.0)),
    });
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
