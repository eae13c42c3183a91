use crate::{
    config::RouteFieldConfig,
    foundation::core::{LogicalSpace, Point, Vec2},
    foundation::rng::RandomSource,
    routes::model::Direction,
};

/// A possible next vertex together with the direction of the segment leading to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub point: Point,
    pub direction: Direction,
}

fn toward(delta: f64) -> f64 {
    if delta >= 0.0 { 1.0 } else { -1.0 }
}

/// Ordered candidate list for the segment leaving `last`.
///
/// Draws, in order: the segment length, the diagonal coin and (only when
/// `prev` is set) the variety coin. The first entry is the chosen segment.
pub fn candidates(
    last: Point,
    target: Point,
    prev: Option<Direction>,
    cfg: &RouteFieldConfig,
    rng: &mut impl RandomSource,
) -> Vec<Candidate> {
    let space = &cfg.space;
    let length = rng.range(cfg.segment_len_min, cfg.segment_len_max);
    let d = target - last;
    let prefer_horizontal = d.x.abs() >= d.y.abs();
    let want_diagonal = rng.chance(cfg.diagonal_probability);

    let horizontal = Candidate {
        point: Point::new(space.clamp_x(last.x + toward(d.x) * length), last.y),
        direction: Direction::Horizontal,
    };
    let vertical = Candidate {
        point: Point::new(last.x, space.clamp_y(last.y + toward(d.y) * length)),
        direction: Direction::Vertical,
    };

    let mut out = Vec::with_capacity(3);
    if want_diagonal {
        let step = length / std::f64::consts::SQRT_2;
        out.push(Candidate {
            point: space.clamp(last + Vec2::new(toward(d.x) * step, toward(d.y) * step)),
            direction: Direction::Diagonal,
        });
    }
    if prefer_horizontal {
        out.extend([horizontal, vertical]);
    } else {
        out.extend([vertical, horizontal]);
    }

    if let Some(prev) = prev
        && rng.chance(cfg.variety_probability)
    {
        // Stable partition: repeated direction goes last, relative order kept.
        let (fresh, repeated): (Vec<_>, Vec<_>) =
            out.into_iter().partition(|c| c.direction != prev);
        out = fresh;
        out.extend(repeated);
    }
    out
}

/// Choose the next vertex for a route ending at `last`.
pub fn next_segment(
    last: Point,
    target: Point,
    prev: Option<Direction>,
    cfg: &RouteFieldConfig,
    rng: &mut impl RandomSource,
) -> Candidate {
    // `candidates` always yields the horizontal and vertical options.
    candidates(last, target, prev, cfg, rng)[0]
}

/// Pick a steering target around `anchor`.
///
/// Each axis independently is either a local offset within `±spread` or snapped to one
/// of the two edges at `edge_inset`, which sends some routes out of frame.
pub fn pick_target(
    anchor: Point,
    spread: Vec2,
    cfg: &RouteFieldConfig,
    rng: &mut impl RandomSource,
) -> Point {
    let space = &cfg.space;
    let x = pick_axis(anchor.x, spread.x, space.width, cfg, rng);
    let y = pick_axis(anchor.y, spread.y, space.height, cfg, rng);
    space.clamp(Point::new(x, y))
}

fn pick_axis(
    anchor: f64,
    spread: f64,
    extent: f64,
    cfg: &RouteFieldConfig,
    rng: &mut impl RandomSource,
) -> f64 {
    if rng.chance(cfg.local_target_probability) {
        anchor + rng.range(-spread, spread)
    } else if rng.chance(0.5) {
        cfg.edge_inset
    } else {
        extent - cfg.edge_inset
    }
}

/// Start positions of a burst: `count` points evenly spaced on a ring around `center`.
pub fn burst_ring(center: Point, count: usize, radius: f64, space: &LogicalSpace) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * std::f64::consts::TAU;
            space.clamp(center + Vec2::new(angle.cos(), angle.sin()) * radius)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/routes/segment.rs"]
mod tests;
