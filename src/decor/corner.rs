use kurbo::Affine;

use crate::{
    foundation::core::{Point, Rect, Rgba8, Size},
    render::draw::{DrawCmd, DrawList},
};

/// Per-frame smoothing factor of the hover pulse.
const PULSE_LERP: f64 = 0.08;
const STOPS: usize = 3;
const WAVE_STEPS: usize = 20;

/// Corner of the host surface a decoration is pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    #[serde(alias = "tl")]
    TopLeft,
    #[serde(alias = "tr")]
    TopRight,
    #[serde(alias = "bl")]
    BottomLeft,
    #[serde(alias = "br")]
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// Top-left of a `size` box inset from this corner of `host`.
    pub fn origin(self, host: Size, size: f64, inset: f64) -> Point {
        let x = if self.is_left() {
            inset
        } else {
            host.width - inset - size
        };
        let y = if self.is_top() {
            inset
        } else {
            host.height - inset - size
        };
        Point::new(x, y)
    }
}

/// Small animated ornament drawn in its own local box.
///
/// `draw` is called once per rendered frame with the host clock in seconds and emits
/// geometry in box-local coordinates; the caller positions the box.
pub trait Decoration {
    fn set_hover(&mut self, hover: bool);

    fn draw(&mut self, t: f64, out: &mut DrawList);
}

/// Transit-themed corner sketch: a tinted blob, three bobbing stops, a wave line and a
/// train dot that only shows while hovered.
#[derive(Clone, Debug)]
pub struct CornerSketch {
    corner: Corner,
    size: f64,
    hover: bool,
    pulse: f64,
}

impl CornerSketch {
    pub fn new(corner: Corner, size: f64) -> Self {
        Self {
            corner,
            size,
            hover: false,
            pulse: 0.0,
        }
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    /// Hover intensity in `[0, 1]`, eased toward the hover target each frame.
    pub fn pulse(&self) -> f64 {
        self.pulse
    }

    fn tint(&self) -> (u8, u8, u8) {
        if self.corner.is_left() {
            (0, 80, 160)
        } else {
            (220, 30, 40)
        }
    }

    fn wave_y(&self, i: f64, t: f64) -> f64 {
        self.size * (0.45 + 0.06 * (i * 0.6 + t * 3.0).sin() * (0.3 + self.pulse))
    }
}

fn alpha(a: f64) -> u8 {
    a.round().clamp(0.0, 255.0) as u8
}

fn disc(out: &mut DrawList, center: Point, diameter: f64, fill: Rgba8) {
    out.push(DrawCmd::Marker {
        center,
        radius: diameter * 0.5,
        fill,
        outline: None,
    });
}

impl Decoration for CornerSketch {
    fn set_hover(&mut self, hover: bool) {
        self.hover = hover;
    }

    fn draw(&mut self, t: f64, out: &mut DrawList) {
        let target = if self.hover { 1.0 } else { 0.0 };
        self.pulse += (target - self.pulse) * PULSE_LERP;
        let (p, s) = (self.pulse, self.size);

        let (r, g, b) = self.tint();
        let base_alpha = 120.0 * (0.4 + 0.6 * p);
        disc(
            out,
            Point::new(s * 0.25, s * 0.25),
            90.0 + 30.0 * p,
            Rgba8::rgba(r, g, b, alpha(base_alpha * 0.6)),
        );

        for i in 0..STOPS {
            let fi = i as f64;
            let center = Point::new(
                s * (0.2 + fi / (STOPS - 1) as f64 * 0.6),
                s * (0.7 + 0.04 * (t * 2.0 + fi).sin()),
            );
            let d = 8.0 + 6.0 * (t * 3.0 + fi * 1.3).sin() * p;
            disc(out, center, d + 2.0, Rgba8::rgba(255, 255, 255, 230));
            disc(out, center, d - 2.0, Rgba8::rgba(0, 0, 0, 200));
        }

        let points = (0..=WAVE_STEPS)
            .map(|i| {
                let fi = i as f64;
                Point::new(fi / WAVE_STEPS as f64 * s * 0.9 + s * 0.05, self.wave_y(fi, t))
            })
            .collect();
        out.push(DrawCmd::Polyline {
            points,
            color: Rgba8::rgba(255, 255, 255, alpha(160.0 + 95.0 * p)),
            width: 2.0 + 2.0 * p,
        });

        let progress = (t * (0.2 + 0.8 * p)).rem_euclid(1.0);
        let train = Point::new(
            s * (0.05 + progress * 0.9),
            s * (0.45 + 0.06 * (progress * 20.0 + t * 3.0).sin()),
        );
        disc(out, train, 12.0 + 6.0 * p, Rgba8::rgba(250, 220, 0, alpha(230.0 * p)));
    }
}

/// Decorations keyed by corner; hover for a corner without one is ignored.
pub struct CornerSet {
    size: f64,
    inset: f64,
    entries: Vec<(Corner, Box<dyn Decoration>)>,
}

impl std::fmt::Debug for CornerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CornerSet")
            .field("size", &self.size)
            .field("inset", &self.inset)
            .field(
                "corners",
                &self.entries.iter().map(|(c, _)| *c).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl CornerSet {
    pub fn empty(size: f64, inset: f64) -> Self {
        Self {
            size,
            inset,
            entries: Vec::new(),
        }
    }

    /// One [`CornerSketch`] in every corner.
    pub fn standard(size: f64, inset: f64) -> Self {
        let mut set = Self::empty(size, inset);
        for corner in Corner::ALL {
            set.insert(corner, Box::new(CornerSketch::new(corner, size)));
        }
        set
    }

    /// Install or replace the decoration for `corner`.
    pub fn insert(&mut self, corner: Corner, decoration: Box<dyn Decoration>) {
        match self.entries.iter_mut().find(|(c, _)| *c == corner) {
            Some(slot) => slot.1 = decoration,
            None => self.entries.push((corner, decoration)),
        }
    }

    pub fn contains(&self, corner: Corner) -> bool {
        self.entries.iter().any(|(c, _)| *c == corner)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forward a hover change; returns whether a decoration received it.
    pub fn set_hover(&mut self, corner: Corner, hover: bool) -> bool {
        match self.entries.iter_mut().find(|(c, _)| *c == corner) {
            Some((_, d)) => {
                d.set_hover(hover);
                true
            }
            None => false,
        }
    }

    /// Draw every decoration at its corner of a `host`-sized surface, clipped to its box.
    pub fn draw(&mut self, t: f64, host: Size, out: &mut DrawList) {
        let bounds = Rect::new(0.0, 0.0, self.size, self.size);
        for (corner, decoration) in &mut self.entries {
            let origin = corner.origin(host, self.size, self.inset);
            out.push(DrawCmd::SetTransform(Affine::translate(origin.to_vec2())));
            out.with_clip(bounds, |out| decoration.draw(t, out));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decor/corner.rs"]
mod tests;
