use crate::foundation::error::{CircuitError, CircuitResult};

pub use kurbo::{BezPath, Point, Rect, Size, Vec2};

/// Host clock time or duration in whole milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Zero duration / clock origin.
    pub const ZERO: Millis = Millis(0);

    /// Elapsed time since `earlier`, saturating at zero.
    pub fn since(self, earlier: Millis) -> Millis {
        Millis(self.0.saturating_sub(earlier.0))
    }

    /// Value as `f64` milliseconds.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Fraction of `span` covered by `self`, clamped to `[0, 1]`.
    ///
    /// A zero span counts as already complete.
    pub fn fraction_of(self, span: Millis) -> f64 {
        if span.0 == 0 {
            return 1.0;
        }
        (self.as_f64() / span.as_f64()).clamp(0.0, 1.0)
    }
}

impl std::ops::Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0.saturating_add(rhs.0))
    }
}

/// Fixed logical coordinate space all route geometry is generated in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalSpace {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Inset applied on every edge when clamping generated points.
    pub margin: f64,
}

impl Default for LogicalSpace {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 200.0,
            margin: 10.0,
        }
    }
}

impl LogicalSpace {
    /// Check that the clamping box `[margin, dim - margin]` is non-empty on both axes.
    pub fn validate(&self) -> CircuitResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(CircuitError::validation(
                "logical space width and height must be > 0",
            ));
        }
        if !(self.margin >= 0.0) || self.margin * 2.0 > self.width.min(self.height) {
            return Err(CircuitError::validation(
                "logical space margin must be in [0, min(width, height) / 2]",
            ));
        }
        Ok(())
    }

    pub fn min_x(&self) -> f64 {
        self.margin
    }

    pub fn max_x(&self) -> f64 {
        self.width - self.margin
    }

    pub fn min_y(&self) -> f64 {
        self.margin
    }

    pub fn max_y(&self) -> f64 {
        self.height - self.margin
    }

    pub fn clamp_x(&self, x: f64) -> f64 {
        x.clamp(self.min_x(), self.max_x())
    }

    pub fn clamp_y(&self, y: f64) -> f64 {
        y.clamp(self.min_y(), self.max_y())
    }

    /// Clamp a point into the margin box.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(self.clamp_x(p.x), self.clamp_y(p.y))
    }

    /// Whether `p` lies inside the margin box (inclusive).
    pub fn contains(&self, p: Point) -> bool {
        (self.min_x()..=self.max_x()).contains(&p.x) && (self.min_y()..=self.max_y()).contains(&p.y)
    }

    /// Map a host-pixel position into logical space by linear scaling.
    ///
    /// Returns `None` for a host without measurable size or a non-finite position.
    /// The result is not clamped.
    pub fn map_from_host(&self, host_px: Point, host: Size) -> Option<Point> {
        if !(host.width > 0.0 && host.height > 0.0) {
            return None;
        }
        if !(host_px.x.is_finite() && host_px.y.is_finite()) {
            return None;
        }
        Some(Point::new(
            host_px.x / host.width * self.width,
            host_px.y / host.height * self.height,
        ))
    }
}

/// Straight (non-premultiplied) RGBA8 color, written as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` / `#RRGGBBAA` (leading `#` optional).
    pub fn parse_hex(s: &str) -> CircuitResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(CircuitError::validation(format!(
                "color '{s}' must be #RRGGBB or #RRGGBBAA"
            )));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| CircuitError::validation(format!("color '{s}' is not valid hex")))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a,
        })
    }

    /// Same color with alpha scaled by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (f64::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = CircuitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
