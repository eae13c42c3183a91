use kurbo::{Affine, BezPath, Cap, Circle, Join, Shape, Stroke, StrokeOpts};

use crate::{
    foundation::core::{Point, Rect, Rgba8},
    foundation::error::{CircuitError, CircuitResult},
    render::surface::{FrameRGBA, Surface},
};

const TOLERANCE: f64 = 0.01;

/// Software surface backed by `vello_cpu`.
pub struct CpuSurface {
    width: u16,
    height: u16,
    background: Option<Rgba8>,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    transform: Affine,
    layers: usize,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32, background: Option<Rgba8>) -> CircuitResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| CircuitError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| CircuitError::render("surface height exceeds u16"))?;
        let mut surface = Self {
            width: width_u16,
            height: height_u16,
            background,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            transform: Affine::IDENTITY,
            layers: 0,
        };
        surface.begin();
        Ok(surface)
    }

    fn begin(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.transform = Affine::IDENTITY;
        self.layers = 0;
        if let Some(bg) = self.background {
            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            set_color(&mut self.ctx, bg);
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    fn pop_layer(&mut self, kind: &str) {
        if self.layers == 0 {
            tracing::warn!(kind, "unbalanced layer pop ignored");
            return;
        }
        self.ctx.pop_layer();
        self.layers -= 1;
    }

    fn fill(&mut self, path: &BezPath, color: Rgba8) {
        if color.a == 0 || path.elements().is_empty() {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(self.transform));
        set_color(&mut self.ctx, color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn polyline(&mut self, points: &[Point], color: Rgba8, width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        let outline = kurbo::stroke(path, &round_stroke(width), &StrokeOpts::default(), TOLERANCE);
        self.fill(&outline, color);
    }

    fn marker(&mut self, center: Point, radius: f64, fill: Rgba8, outline: Option<(Rgba8, f64)>) {
        if !(radius > 0.0) {
            return;
        }
        let circle = Circle::new(center, radius);
        self.fill(&circle.to_path(TOLERANCE), fill);
        if let Some((color, width)) = outline
            && width > 0.0
        {
            let ring = kurbo::stroke(
                circle.path_elements(TOLERANCE),
                &round_stroke(width),
                &StrokeOpts::default(),
                TOLERANCE,
            );
            self.fill(&ring, color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.fill(&rect.to_path(TOLERANCE), color);
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.ctx.push_opacity_layer(opacity.clamp(0.0, 1.0));
        self.layers += 1;
    }

    fn pop_opacity(&mut self) {
        self.pop_layer("opacity");
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.push_clip_layer(&bezpath_to_cpu(&rect.to_path(TOLERANCE)));
        self.layers += 1;
    }

    fn pop_clip(&mut self) {
        self.pop_layer("clip");
    }

    fn finish(&mut self) -> CircuitResult<FrameRGBA> {
        while self.layers > 0 {
            self.ctx.pop_layer();
            self.layers -= 1;
        }
        self.ctx.flush();
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        self.ctx.render_to_pixmap(&mut self.pixmap);
        let frame = FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        };
        self.begin();
        Ok(frame)
    }
}

fn round_stroke(width: f64) -> Stroke {
    Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
