//! Clipping against the layer query extent.

use kurbo::{Point, Rect};

use super::Polyline;

/// Clips open paths. A path leaving and re-entering the extent is split into
/// separate subpaths. Closed paths are treated as polylines back to their
/// start, unless they lie entirely inside.
pub(crate) fn clip_lines(lines: &[Polyline], extent: Rect) -> Vec<Polyline> {
    let mut out = Vec::new();
    for line in lines {
        let mut points = line.points.clone();
        if line.closed && points.len() > 1 {
            points.push(points[0]);
        }

        let mut pieces: Vec<Polyline> = Vec::new();
        let mut current: Option<Polyline> = None;
        let mut clipped = false;

        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match clip_segment(a, b, extent) {
                Some((start, end)) => {
                    if start != a || end != b {
                        clipped = true;
                    }
                    match current.as_mut() {
                        Some(piece) if piece.points.last() == Some(&start) => {
                            piece.points.push(end)
                        }
                        _ => {
                            pieces.extend(current.take());
                            current = Some(Polyline { points: vec![start, end], closed: false });
                        }
                    }
                }
                None => {
                    clipped = true;
                    pieces.extend(current.take());
                }
            }
        }
        pieces.extend(current);

        // A ring cut open elsewhere is still continuous through its start vertex.
        if line.closed && pieces.len() > 1 {
            let origin = points[0];
            let head_starts = pieces[0].points.first() == Some(&origin);
            let tail_ends = pieces.last().and_then(|p| p.points.last()) == Some(&origin);
            if head_starts && tail_ends {
                let head = pieces.remove(0);
                if let Some(tail) = pieces.last_mut() {
                    tail.points.extend_from_slice(&head.points[1..]);
                }
            }
        }

        if line.closed && !clipped {
            out.push(line.clone());
        } else {
            out.extend(pieces);
        }
    }
    out
}

/// Clips rings edge by edge. Surviving rings are always closed; rings that
/// collapse below three points are dropped.
pub(crate) fn clip_rings(rings: &[Polyline], extent: Rect) -> Vec<Polyline> {
    rings
        .iter()
        .filter_map(|ring| {
            let points = clip_ring(&ring.points, extent);
            (points.len() >= 3).then_some(Polyline { points, closed: true })
        })
        .collect()
}

/// Liang-Barsky segment clip. Unclipped endpoints are returned bit-identical;
/// clipped ones land exactly on the boundary they were cut at.
fn clip_segment(a: Point, b: Point, r: Rect) -> Option<(Point, Point)> {
    let d = b - a;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    let mut edge0 = None;
    let mut edge1 = None;

    let checks = [
        (-d.x, a.x - r.x0, Edge::Left),
        (d.x, r.x1 - a.x, Edge::Right),
        (-d.y, a.y - r.y0, Edge::Bottom),
        (d.y, r.y1 - a.y, Edge::Top),
    ];
    for (p, q, edge) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            if t > t0 {
                t0 = t;
                edge0 = Some(edge);
            }
        } else {
            if t < t0 {
                return None;
            }
            if t < t1 {
                t1 = t;
                edge1 = Some(edge);
            }
        }
    }

    let start = match edge0 {
        Some(edge) => edge.snap(a + d * t0, r),
        None => a,
    };
    let end = match edge1 {
        Some(edge) => edge.snap(a + d * t1, r),
        None => b,
    };
    Some((start, end))
}

#[derive(Clone, Copy)]
enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

impl Edge {
    fn inside(self, p: Point, r: Rect) -> bool {
        match self {
            Edge::Left => p.x >= r.x0,
            Edge::Right => p.x <= r.x1,
            Edge::Bottom => p.y >= r.y0,
            Edge::Top => p.y <= r.y1,
        }
    }

    fn snap(self, p: Point, r: Rect) -> Point {
        match self {
            Edge::Left => Point::new(r.x0, p.y),
            Edge::Right => Point::new(r.x1, p.y),
            Edge::Bottom => Point::new(p.x, r.y0),
            Edge::Top => Point::new(p.x, r.y1),
        }
    }

    fn intersect(self, a: Point, b: Point, r: Rect) -> Point {
        match self {
            Edge::Left | Edge::Right => {
                let x = if matches!(self, Edge::Left) { r.x0 } else { r.x1 };
                let t = (x - a.x) / (b.x - a.x);
                Point::new(x, a.y + t * (b.y - a.y))
            }
            Edge::Bottom | Edge::Top => {
                let y = if matches!(self, Edge::Bottom) { r.y0 } else { r.y1 };
                let t = (y - a.y) / (b.y - a.y);
                Point::new(a.x + t * (b.x - a.x), y)
            }
        }
    }
}

/// Sutherland-Hodgman against the four extent edges.
fn clip_ring(points: &[Point], r: Rect) -> Vec<Point> {
    let mut output = points.to_vec();
    for edge in [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top] {
        let input = std::mem::take(&mut output);
        let Some(&last) = input.last() else {
            break;
        };
        let mut prev = last;
        for &cur in &input {
            let cur_in = edge.inside(cur, r);
            if cur_in != edge.inside(prev, r) {
                output.push(edge.intersect(prev, cur, r));
            }
            if cur_in {
                output.push(cur);
            }
            prev = cur;
        }
    }
    output
}
