//! Vertex conversion pipeline.
//!
//! A feature path goes through an ordered chain of optional stages before it
//! reaches a backend path builder:
//!
//! ```text
//! clip -> transform -> affine -> simplify -> smooth -> PathSink
//! ```
//!
//! Which stages run is decided per symbolizer when the converter is built.
//! The order never changes, and no stage reorders points: stages only drop
//! points, move them, or (smoothing) replace line segments by curves.

mod clip;
mod simplify;
mod smooth;

use kurbo::{Affine, BezPath, PathEl, Point, Rect};

use crate::feature::{Command, Geometry};
use crate::projection::{Projection, ViewTransform};
use crate::style::{LineSymbolizer, PolygonSymbolizer, SimplifyAlgorithm};

/// Receiver of path-builder calls. Implemented by every backend path type.
pub trait PathSink {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quad_to(&mut self, ctrl: Point, p: Point);
    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point);
    fn close(&mut self);
}

impl PathSink for BezPath {
    fn move_to(&mut self, p: Point) {
        BezPath::move_to(self, p);
    }

    fn line_to(&mut self, p: Point) {
        BezPath::line_to(self, p);
    }

    fn quad_to(&mut self, ctrl: Point, p: Point) {
        BezPath::quad_to(self, ctrl, p);
    }

    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point) {
        BezPath::curve_to(self, ctrl1, ctrl2, p);
    }

    fn close(&mut self) {
        self.close_path();
    }
}

/// Geometry class a converter is built for. Decides the clip variant and the
/// minimum number of points worth drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryClass {
    Line,
    Polygon,
}

impl GeometryClass {
    pub fn min_points(self) -> usize {
        match self {
            GeometryClass::Line => 2,
            GeometryClass::Polygon => 3,
        }
    }

    fn stages(self) -> [Stage; 5] {
        let clip = match self {
            GeometryClass::Line => Stage::ClipLine,
            GeometryClass::Polygon => Stage::ClipPolygon,
        };
        [clip, Stage::Transform, Stage::AffineTransform, Stage::Simplify, Stage::Smooth]
    }
}

/// Per-symbolizer knobs that enable or parameterize stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOptions {
    pub clip: bool,
    pub simplify_tolerance: f64,
    pub simplify_algorithm: SimplifyAlgorithm,
    pub smooth: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            clip: true,
            simplify_tolerance: 0.0,
            simplify_algorithm: SimplifyAlgorithm::default(),
            smooth: 0.0,
        }
    }
}

impl From<&LineSymbolizer> for PipelineOptions {
    fn from(sym: &LineSymbolizer) -> Self {
        Self {
            clip: sym.clip,
            simplify_tolerance: sym.simplify_tolerance,
            simplify_algorithm: sym.simplify_algorithm,
            smooth: sym.smooth,
        }
    }
}

impl From<&PolygonSymbolizer> for PipelineOptions {
    fn from(sym: &PolygonSymbolizer) -> Self {
        Self {
            clip: sym.clip,
            simplify_tolerance: sym.simplify_tolerance,
            simplify_algorithm: sym.simplify_algorithm,
            smooth: sym.smooth,
        }
    }
}

/// Render state the stages read.
pub struct ConverterContext<'a> {
    /// Query extent in layer coordinates
    pub clip_extent: Rect,
    pub projection: &'a dyn Projection,
    pub view: &'a ViewTransform,
    /// Symbolizer transform, evaluated against the feature
    pub affine: Affine,
    pub scale_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ClipLine,
    ClipPolygon,
    Transform,
    AffineTransform,
    Simplify,
    Smooth,
}

impl Stage {
    pub fn enabled(self, options: &PipelineOptions, ctx: &ConverterContext<'_>) -> bool {
        match self {
            // Clipping may only be turned off when no reprojection happens.
            Stage::ClipLine | Stage::ClipPolygon => options.clip || !ctx.projection.is_identity(),
            Stage::Transform | Stage::AffineTransform => true,
            Stage::Simplify => options.simplify_tolerance > 0.0,
            Stage::Smooth => options.smooth > 0.0,
        }
    }

    pub fn apply(
        self,
        path: BezPath,
        options: &PipelineOptions,
        ctx: &ConverterContext<'_>,
    ) -> BezPath {
        match self {
            Stage::ClipLine => {
                from_polylines(&clip::clip_lines(&polylines(&path), ctx.clip_extent))
            }
            Stage::ClipPolygon => {
                from_polylines(&clip::clip_rings(&polylines(&path), ctx.clip_extent))
            }
            Stage::Transform => {
                let projected: Vec<Polyline> = polylines(&path)
                    .into_iter()
                    .map(|line| Polyline {
                        points: line
                            .points
                            .into_iter()
                            .filter_map(|p| ctx.projection.forward(p))
                            .map(|p| ctx.view.forward(p))
                            .collect(),
                        closed: line.closed,
                    })
                    .collect();
                from_polylines(&projected)
            }
            Stage::AffineTransform => {
                let mut path = path;
                if ctx.affine != Affine::IDENTITY {
                    path.apply_affine(ctx.affine);
                }
                path
            }
            Stage::Simplify => from_polylines(&simplify::simplify(
                polylines(&path),
                options.simplify_tolerance * ctx.scale_factor,
                options.simplify_algorithm,
            )),
            Stage::Smooth => smooth::smooth(&polylines(&path), options.smooth),
        }
    }
}

/// Runs geometry paths through the enabled stages into a [`PathSink`].
pub struct VertexConverter<'a> {
    class: GeometryClass,
    options: PipelineOptions,
    ctx: ConverterContext<'a>,
    stages: Vec<Stage>,
}

impl<'a> VertexConverter<'a> {
    pub fn new(class: GeometryClass, options: PipelineOptions, ctx: ConverterContext<'a>) -> Self {
        let stages = class
            .stages()
            .into_iter()
            .filter(|stage| stage.enabled(&options, &ctx))
            .collect();

        Self {
            class,
            options,
            ctx,
            stages,
        }
    }

    /// Enabled stages in the order they run.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Converts one geometry path and feeds the result to `sink`.
    ///
    /// Returns false when nothing was emitted: the geometry had too few
    /// points for its class, or every segment was clipped away.
    pub fn apply<S: PathSink + ?Sized>(&self, geom: &Geometry, sink: &mut S) -> bool {
        if geom.num_points() < self.class.min_points() {
            log::trace!(
                "skipping {:?} path with {} points",
                self.class,
                geom.num_points()
            );
            return false;
        }

        let path = self
            .stages
            .iter()
            .fold(ingest(geom), |path, stage| stage.apply(path, &self.options, &self.ctx));

        if path.elements().is_empty() {
            return false;
        }
        emit(&path, sink);
        true
    }
}

/// Builds a path from vertex commands. Unknown commands are skipped, `End`
/// stops reading, and a line-to without a current point starts a subpath.
pub fn ingest(geom: &Geometry) -> BezPath {
    let mut path = BezPath::new();
    let mut open = false;
    for v in geom.vertices() {
        match v.cmd {
            Command::MoveTo => {
                path.move_to(v.point());
                open = true;
            }
            Command::LineTo if open => path.line_to(v.point()),
            Command::LineTo => {
                path.move_to(v.point());
                open = true;
            }
            Command::Close => {
                if open {
                    path.close_path();
                    open = false;
                }
            }
            Command::End => break,
            Command::Unknown(_) => {}
        }
    }
    path
}

/// Replays a path into a sink, one builder call per element.
pub fn emit<S: PathSink + ?Sized>(path: &BezPath, sink: &mut S) {
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => sink.move_to(p),
            PathEl::LineTo(p) => sink.line_to(p),
            PathEl::QuadTo(c, p) => sink.quad_to(c, p),
            PathEl::CurveTo(c1, c2, p) => sink.curve_to(c1, c2, p),
            PathEl::ClosePath => sink.close(),
        }
    }
}

/// A subpath flattened to its on-curve points.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

pub(crate) fn polylines(path: &BezPath) -> Vec<Polyline> {
    let mut out: Vec<Polyline> = Vec::new();
    let mut current: Option<Polyline> = None;
    for el in path.elements() {
        let end = match *el {
            PathEl::MoveTo(p) => {
                out.extend(current.take());
                current = Some(Polyline { points: vec![p], closed: false });
                continue;
            }
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => p,
            PathEl::ClosePath => {
                if let Some(line) = current.as_mut() {
                    line.closed = true;
                }
                out.extend(current.take());
                continue;
            }
        };
        current
            .get_or_insert_with(|| Polyline { points: Vec::new(), closed: false })
            .points
            .push(end);
    }
    out.extend(current);
    out.retain(|line| !line.points.is_empty());
    out
}

pub(crate) fn from_polylines(lines: &[Polyline]) -> BezPath {
    let mut path = BezPath::new();
    for line in lines {
        let Some((first, rest)) = line.points.split_first() else {
            continue;
        };
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        if line.closed {
            path.close_path();
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{GeometryKind, Vertex};
    use crate::projection::{IdentityProjection, LinearProjection};

    fn view() -> ViewTransform {
        // map units == pixels, y flipped over a 100 unit tall map
        ViewTransform::new(100, 100, Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    fn converter<'a>(
        class: GeometryClass,
        options: PipelineOptions,
        projection: &'a dyn Projection,
        view: &'a ViewTransform,
    ) -> VertexConverter<'a> {
        VertexConverter::new(
            class,
            options,
            ConverterContext {
                clip_extent: Rect::new(0.0, 0.0, 100.0, 100.0),
                projection,
                view,
                affine: Affine::IDENTITY,
                scale_factor: 1.0,
            },
        )
    }

    #[test]
    fn stage_order_is_fixed() {
        let view = view();
        let options = PipelineOptions {
            clip: true,
            simplify_tolerance: 1.0,
            simplify_algorithm: SimplifyAlgorithm::DouglasPeucker,
            smooth: 0.5,
        };
        let conv = converter(GeometryClass::Line, options, &IdentityProjection, &view);
        assert_eq!(
            conv.stages(),
            &[
                Stage::ClipLine,
                Stage::Transform,
                Stage::AffineTransform,
                Stage::Simplify,
                Stage::Smooth,
            ]
        );

        let options = PipelineOptions::default();
        let conv = converter(GeometryClass::Polygon, options, &IdentityProjection, &view);
        assert_eq!(conv.stages(), &[Stage::ClipPolygon, Stage::Transform, Stage::AffineTransform]);
    }

    #[test]
    fn clip_skipped_only_for_identity_without_flag() {
        let view = view();
        let no_clip = PipelineOptions { clip: false, ..Default::default() };

        let conv = converter(GeometryClass::Line, no_clip, &IdentityProjection, &view);
        assert_eq!(conv.stages(), &[Stage::Transform, Stage::AffineTransform]);

        let reproject = LinearProjection::new(Affine::scale(2.0)).unwrap();
        let conv = converter(GeometryClass::Line, no_clip, &reproject, &view);
        assert_eq!(conv.stages()[0], Stage::ClipLine);
    }

    #[test]
    fn short_paths_emit_nothing() {
        let view = view();
        let options = PipelineOptions::default();
        let line = converter(GeometryClass::Line, options, &IdentityProjection, &view);
        let poly = converter(GeometryClass::Polygon, options, &IdentityProjection, &view);

        let mut sink = BezPath::new();
        assert!(!line.apply(&Geometry::line_string(&[(1.0, 1.0)]), &mut sink));
        assert!(!poly.apply(&Geometry::polygon(&[(1.0, 1.0), (2.0, 2.0)]), &mut sink));
        assert!(sink.elements().is_empty());

        assert!(line.apply(&Geometry::line_string(&[(1.0, 1.0), (2.0, 2.0)]), &mut sink));
    }

    #[test]
    fn transform_maps_to_device_space() {
        let view = view();
        let options = PipelineOptions::default();
        let conv = converter(GeometryClass::Line, options, &IdentityProjection, &view);
        let mut sink = BezPath::new();
        conv.apply(&Geometry::line_string(&[(10.0, 10.0), (20.0, 90.0)]), &mut sink);
        assert_eq!(
            sink.elements(),
            &[PathEl::MoveTo(Point::new(10.0, 90.0)), PathEl::LineTo(Point::new(20.0, 10.0))]
        );
    }

    #[test]
    fn affine_applies_after_view() {
        let view = view();
        let conv = VertexConverter::new(
            GeometryClass::Line,
            PipelineOptions::default(),
            ConverterContext {
                clip_extent: Rect::new(0.0, 0.0, 100.0, 100.0),
                projection: &IdentityProjection,
                view: &view,
                affine: Affine::translate((5.0, 0.0)),
                scale_factor: 1.0,
            },
        );
        let mut sink = BezPath::new();
        conv.apply(&Geometry::line_string(&[(0.0, 100.0), (10.0, 100.0)]), &mut sink);
        assert_eq!(
            sink.elements(),
            &[PathEl::MoveTo(Point::new(5.0, 0.0)), PathEl::LineTo(Point::new(15.0, 0.0))]
        );
    }

    #[test]
    fn unknown_commands_are_ignored() {
        let mut geom = Geometry::new(GeometryKind::LineString);
        geom.move_to(0.0, 100.0);
        geom.push(Vertex::new(50.0, 50.0, Command::Unknown(9)));
        geom.line_to(10.0, 100.0);
        geom.push(Vertex::new(0.0, 0.0, Command::End));
        geom.line_to(99.0, 99.0);

        let path = ingest(&geom);
        assert_eq!(
            path.elements(),
            &[PathEl::MoveTo(Point::new(0.0, 100.0)), PathEl::LineTo(Point::new(10.0, 100.0))]
        );
    }

    #[test]
    fn line_to_without_move_starts_subpath() {
        let geom = Geometry::from_vertices(
            GeometryKind::LineString,
            vec![Vertex::new(1.0, 1.0, Command::LineTo), Vertex::new(2.0, 2.0, Command::LineTo)],
        );
        let path = ingest(&geom);
        assert_eq!(
            path.elements(),
            &[PathEl::MoveTo(Point::new(1.0, 1.0)), PathEl::LineTo(Point::new(2.0, 2.0))]
        );
    }

    #[test]
    fn polylines_keep_closure() {
        let geom = Geometry::polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let lines = polylines(&ingest(&geom));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].closed);
        assert_eq!(from_polylines(&lines), ingest(&geom));
    }

    fn scaled_converter<'a>(
        options: PipelineOptions,
        view: &'a ViewTransform,
        scale_factor: f64,
    ) -> VertexConverter<'a> {
        VertexConverter::new(
            GeometryClass::Line,
            options,
            ConverterContext {
                clip_extent: Rect::new(0.0, 0.0, 100.0, 100.0),
                projection: &IdentityProjection,
                view,
                affine: Affine::IDENTITY,
                scale_factor,
            },
        )
    }

    fn horizontal_line(n: usize) -> Geometry {
        let points: Vec<(f64, f64)> = (0..=n).map(|i| (i as f64, 50.0)).collect();
        Geometry::line_string(&points)
    }

    #[test]
    fn simplify_tolerance_scales_with_scale_factor() {
        let view = view();
        let options = PipelineOptions {
            simplify_tolerance: 2.0,
            ..Default::default()
        };
        let geom = horizontal_line(10);

        let mut at_one = BezPath::new();
        assert!(scaled_converter(options, &view, 1.0).apply(&geom, &mut at_one));
        let xs: Vec<f64> =
            at_one.elements().iter().filter_map(|el| el.end_point()).map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        // tolerance 2 px becomes 6 px
        let mut at_three = BezPath::new();
        assert!(scaled_converter(options, &view, 3.0).apply(&geom, &mut at_three));
        let xs: Vec<f64> =
            at_three.elements().iter().filter_map(|el| el.end_point()).map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 6.0, 10.0]);
    }

    #[test]
    fn douglas_peucker_drops_small_zigzags() {
        let view = view();
        let options = PipelineOptions {
            simplify_tolerance: 2.0,
            simplify_algorithm: SimplifyAlgorithm::DouglasPeucker,
            ..Default::default()
        };
        let points: Vec<(f64, f64)> = (0..=10).map(|i| (i as f64, 50.0 + (i % 2) as f64)).collect();
        let mut sink = BezPath::new();
        let conv = scaled_converter(options, &view, 1.0);
        assert!(conv.apply(&Geometry::line_string(&points), &mut sink));
        assert_eq!(
            sink.elements(),
            &[PathEl::MoveTo(Point::new(0.0, 50.0)), PathEl::LineTo(Point::new(10.0, 50.0))]
        );

        // a finer tolerance keeps the zigzag
        let mut fine = BezPath::new();
        scaled_converter(options, &view, 0.25).apply(&Geometry::line_string(&points), &mut fine);
        assert_eq!(fine.elements().len(), 11);
    }

    #[test]
    fn smoothing_replaces_segments_with_curves() {
        let view = view();
        let options = PipelineOptions {
            smooth: 0.5,
            ..Default::default()
        };
        let geom = Geometry::line_string(&[(0.0, 50.0), (10.0, 60.0), (20.0, 50.0)]);
        let mut sink = BezPath::new();
        assert!(scaled_converter(options, &view, 1.0).apply(&geom, &mut sink));

        let els = sink.elements();
        assert_eq!(els.len(), 3);
        assert_eq!(els[0], PathEl::MoveTo(Point::new(0.0, 50.0)));
        assert!(matches!(els[1], PathEl::CurveTo(_, _, p) if p == Point::new(10.0, 40.0)));
        assert!(matches!(els[2], PathEl::CurveTo(_, _, p) if p == Point::new(20.0, 50.0)));
    }
}
