//! Point reduction with a bounded deviation.

use kurbo::Point;

use super::Polyline;
use crate::style::SimplifyAlgorithm;

pub(crate) fn simplify(
    lines: Vec<Polyline>,
    tolerance: f64,
    algorithm: SimplifyAlgorithm,
) -> Vec<Polyline> {
    lines
        .into_iter()
        .map(|line| {
            let points = match algorithm {
                SimplifyAlgorithm::RadialDistance => radial_distance(&line.points, tolerance),
                SimplifyAlgorithm::DouglasPeucker => douglas_peucker(&line.points, tolerance),
            };
            // a ring must stay a ring
            if line.closed && points.len() < 3 {
                line
            } else {
                Polyline { points, closed: line.closed }
            }
        })
        .collect()
}

/// Drops every point closer than `tolerance` to the last kept point.
/// Endpoints are always kept.
fn radial_distance(points: &[Point], tolerance: f64) -> Vec<Point> {
    let [first, middle @ .., last] = points else {
        return points.to_vec();
    };
    let mut kept = vec![*first];
    let mut anchor = *first;
    for p in middle {
        if p.distance(anchor) >= tolerance {
            kept.push(*p);
            anchor = *p;
        }
    }
    kept.push(*last);
    kept
}

fn douglas_peucker(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0, points.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        let mut farthest = None;
        let mut max_dist = tolerance;
        for i in start + 1..end {
            let d = segment_distance(points[i], points[start], points[end]);
            if d > max_dist {
                max_dist = d;
                farthest = Some(i);
            }
        }
        if let Some(i) = farthest {
            keep[i] = true;
            stack.push((start, i));
            stack.push((i, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(f64, f64)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn radial_keeps_endpoints() {
        let line = pts(&[(0.0, 0.0), (0.1, 0.0), (0.2, 0.0), (5.0, 0.0), (5.1, 0.0)]);
        assert_eq!(radial_distance(&line, 1.0), pts(&[(0.0, 0.0), (5.0, 0.0), (5.1, 0.0)]));
    }

    #[test]
    fn douglas_peucker_drops_near_collinear_points() {
        let line = pts(&[(0.0, 0.0), (1.0, 0.1), (2.0, -0.1), (3.0, 5.0), (4.0, 0.0)]);
        assert_eq!(
            douglas_peucker(&line, 0.5),
            pts(&[(0.0, 0.0), (2.0, -0.1), (3.0, 5.0), (4.0, 0.0)])
        );
    }

    #[test]
    fn collapsing_ring_is_left_alone() {
        let ring = Polyline {
            points: pts(&[(0.0, 0.0), (0.1, 0.0), (0.1, 0.1)]),
            closed: true,
        };
        let out = simplify(vec![ring.clone()], 10.0, SimplifyAlgorithm::RadialDistance);
        assert_eq!(out, vec![ring]);
    }
}
