//! Curve substitution for polylines.
//!
//! Each segment v1->v2 becomes a cubic whose control points lean towards the
//! neighbors v0 and v3, weighted by the relative segment lengths.

use kurbo::{BezPath, Point};

use super::Polyline;

pub(crate) fn smooth(lines: &[Polyline], value: f64) -> BezPath {
    let k = value.clamp(0.0, 1.0) * 0.5;
    let mut path = BezPath::new();

    for line in lines {
        let p = &line.points;
        let n = p.len();
        let Some(&first) = p.first() else {
            continue;
        };
        path.move_to(first);

        if n < 3 {
            for q in &p[1..] {
                path.line_to(*q);
            }
        } else {
            let segments = if line.closed { n } else { n - 1 };
            for i in 0..segments {
                let v1 = p[i];
                let v2 = p[(i + 1) % n];
                let v0 = match (line.closed, i) {
                    (true, _) => p[(i + n - 1) % n],
                    (false, 0) => v1,
                    (false, _) => p[i - 1],
                };
                let v3 = if line.closed {
                    p[(i + 2) % n]
                } else if i + 2 < n {
                    p[i + 2]
                } else {
                    v2
                };
                let (c1, c2) = control_points(v0, v1, v2, v3, k);
                path.curve_to(c1, c2, v2);
            }
        }

        if line.closed {
            path.close_path();
        }
    }
    path
}

fn control_points(v0: Point, v1: Point, v2: Point, v3: Point, k: f64) -> (Point, Point) {
    fn ratio(a: f64, b: f64) -> f64 {
        if b > 0.0 {
            a / b
        } else {
            0.0
        }
    }

    let d01 = v0.distance(v1);
    let d12 = v1.distance(v2);
    let d23 = v2.distance(v3);

    let k1 = ratio(d01, d01 + d12);
    let k2 = ratio(d12, d12 + d23);

    let m1 = v0 + (v2 - v0) * k1;
    let m2 = v1 + (v3 - v1) * k2;

    (v1 + (v2 - m1) * k, v2 + (v1 - m2) * k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn open_polyline_becomes_curves_through_the_same_points() {
        let line = Polyline {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(20.0, 0.0)],
            closed: false,
        };
        let path = smooth(&[line], 1.0);
        let ends: Vec<Point> = path
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::CurveTo(_, _, p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(ends, vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(20.0, 0.0)]);
        assert_eq!(path.elements().len(), 3);
    }

    #[test]
    fn closed_ring_wraps_around() {
        let ring = Polyline {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            closed: true,
        };
        let path = smooth(&[ring], 0.5);
        // move + 4 curves + close
        assert_eq!(path.elements().len(), 6);
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn two_point_lines_stay_straight() {
        let line = Polyline {
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            closed: false,
        };
        let path = smooth(&[line], 1.0);
        assert_eq!(
            path.elements(),
            &[PathEl::MoveTo(Point::new(0.0, 0.0)), PathEl::LineTo(Point::new(1.0, 0.0))]
        );
    }
}
