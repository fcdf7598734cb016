//! Coordinate transforms consumed by the vertex pipeline.
//!
//! A [`Projection`] maps layer coordinates into map coordinates. It is
//! supplied by the caller; the renderer only asks whether it is the identity
//! and pushes points through it. A [`ViewTransform`] then maps map
//! coordinates onto device pixels.

use kurbo::{Affine, Point, Rect};

/// Layer-to-map coordinate transform.
pub trait Projection {
    /// True when source and destination coordinate systems are the same.
    fn is_identity(&self) -> bool;

    /// Maps a layer point into map coordinates, `None` if it has no image.
    fn forward(&self, p: Point) -> Option<Point>;

    /// Maps a map point back into layer coordinates.
    fn backward(&self, p: Point) -> Option<Point>;

    /// Maps a map-space box back into layer space as the bounding box of its
    /// corners and edge midpoints.
    fn backward_box(&self, r: Rect) -> Option<Rect> {
        let (cx, cy) = (r.center().x, r.center().y);
        let samples = [
            Point::new(r.x0, r.y0),
            Point::new(cx, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, cy),
            Point::new(r.x1, r.y1),
            Point::new(cx, r.y1),
            Point::new(r.x0, r.y1),
            Point::new(r.x0, cy),
        ];
        let mut out: Option<Rect> = None;
        for p in samples {
            let q = self.backward(p)?;
            out = Some(match out {
                Some(acc) => acc.union_pt(q),
                None => Rect::from_points(q, q),
            });
        }
        out
    }
}

/// Projection between identical coordinate systems.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProjection;

impl Projection for IdentityProjection {
    fn is_identity(&self) -> bool {
        true
    }

    fn forward(&self, p: Point) -> Option<Point> {
        Some(p)
    }

    fn backward(&self, p: Point) -> Option<Point> {
        Some(p)
    }
}

/// Projection expressed as an affine map, e.g. a unit change or a local grid.
#[derive(Debug, Clone, Copy)]
pub struct LinearProjection {
    forward: Affine,
    inverse: Affine,
}

impl LinearProjection {
    /// Returns `None` for a singular matrix.
    pub fn new(forward: Affine) -> Option<Self> {
        let det = forward.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self {
            forward,
            inverse: forward.inverse(),
        })
    }
}

impl Projection for LinearProjection {
    fn is_identity(&self) -> bool {
        self.forward == Affine::IDENTITY
    }

    fn forward(&self, p: Point) -> Option<Point> {
        Some(self.forward * p)
    }

    fn backward(&self, p: Point) -> Option<Point> {
        Some(self.inverse * p)
    }
}

/// Maps map coordinates onto a `width` x `height` pixel grid showing `extent`.
/// The y axis is flipped: map north is device up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    width: u32,
    height: u32,
    extent: Rect,
    sx: f64,
    sy: f64,
}

impl ViewTransform {
    pub fn new(width: u32, height: u32, extent: Rect) -> Self {
        let extent = extent.abs();
        let sx = if extent.width() > 0.0 { width as f64 / extent.width() } else { 1.0 };
        let sy = if extent.height() > 0.0 { height as f64 / extent.height() } else { 1.0 };
        Self {
            width,
            height,
            extent,
            sx,
            sy,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Map units per pixel along x.
    pub fn resolution(&self) -> f64 {
        1.0 / self.sx
    }

    pub fn forward(&self, p: Point) -> Point {
        Point::new((p.x - self.extent.x0) * self.sx, (self.extent.y1 - p.y) * self.sy)
    }

    pub fn backward(&self, p: Point) -> Point {
        Point::new(p.x / self.sx + self.extent.x0, self.extent.y1 - p.y / self.sy)
    }

    pub fn as_affine(&self) -> Affine {
        Affine::new([
            self.sx,
            0.0,
            0.0,
            -self.sy,
            -self.extent.x0 * self.sx,
            self.extent.y1 * self.sy,
        ])
    }
}
