use kurbo::Affine;

use crate::{
    foundation::core::{Point, Rect, Rgba8},
    foundation::error::{CircuitError, CircuitResult},
    render::draw::{DrawCmd, DrawList},
};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, as image encoders expect.
    pub fn to_straight(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Straight-alpha RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        let a = u16::from(px[3]);
        if !self.premultiplied || a == 0 || a == 255 {
            return Some([px[0], px[1], px[2], px[3]]);
        }
        let un = |c: u8| ((u16::from(c) * 255 + a / 2) / a).min(255) as u8;
        Some([un(px[0]), un(px[1]), un(px[2]), px[3]])
    }
}

/// Raster target for draw lists.
///
/// Geometry is buffered until [`Surface::finish`], which rasterizes one frame and resets the
/// surface for the next.
pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn set_transform(&mut self, transform: Affine);

    fn polyline(&mut self, points: &[Point], color: Rgba8, width: f64);

    fn marker(&mut self, center: Point, radius: f64, fill: Rgba8, outline: Option<(Rgba8, f64)>);

    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    fn push_opacity(&mut self, opacity: f32);

    fn pop_opacity(&mut self);

    /// Clip to `rect` under the current transform.
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    fn finish(&mut self) -> CircuitResult<FrameRGBA>;

    fn execute(&mut self, list: &DrawList) {
        for cmd in &list.cmds {
            match cmd {
                DrawCmd::SetTransform(t) => self.set_transform(*t),
                DrawCmd::Polyline {
                    points,
                    color,
                    width,
                } => self.polyline(points, *color, *width),
                DrawCmd::PartialSegment {
                    from,
                    to,
                    fraction,
                    color,
                    width,
                } => {
                    if *fraction > 0.0 {
                        let tip = from.lerp(*to, fraction.min(1.0));
                        self.polyline(&[*from, tip], *color, *width);
                    }
                }
                DrawCmd::Marker {
                    center,
                    radius,
                    fill,
                    outline,
                } => self.marker(*center, *radius, *fill, *outline),
                DrawCmd::Rect { rect, color } => self.fill_rect(*rect, *color),
                DrawCmd::PushOpacity(o) => self.push_opacity(*o),
                DrawCmd::PopOpacity => self.pop_opacity(),
                DrawCmd::PushClip(rect) => self.push_clip(*rect),
                DrawCmd::PopClip => self.pop_clip(),
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    #[default]
    Cpu,
}

pub fn create_surface(
    kind: SurfaceKind,
    width: u32,
    height: u32,
    background: Option<Rgba8>,
) -> CircuitResult<Box<dyn Surface>> {
    if width == 0 || height == 0 {
        return Err(CircuitError::render(format!(
            "surface size {width}x{height} must be non-zero"
        )));
    }
    match kind {
        SurfaceKind::Cpu => Ok(Box::new(crate::render::cpu::CpuSurface::new(
            width, height, background,
        )?)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
