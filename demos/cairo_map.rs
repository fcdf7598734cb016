//! Renders a small hand-built map with the cairo backend and reports how
//! many pixels were painted.
//!
//! Run with `cargo run --example cairo_map --features backend_cairo`.

use std::sync::Arc;

use anyhow::Result;
use kurbo::{Rect, Vec2};

use gosub_map_renderer::feature::{Feature, Geometry, GeometryKind};
use gosub_map_renderer::logging::{init_logging, LoggingConfig};
use gosub_map_renderer::map::{Layer, Map, Style};
use gosub_map_renderer::render::backends::cairo::CairoSurface;
use gosub_map_renderer::render::{render_map, MapRenderer, SurfaceSize};
use gosub_map_renderer::style::{
    CharFormat, Color, LabelPlacement, LineSymbolizer, PolygonSymbolizer, Stroke, TextSymbolizer,
};
use gosub_map_renderer::text::{
    CollisionDetector, GlyphNode, LabelCollisionDetector, LabelRequest, LayoutEngine, Placement,
    PlacementFinder,
};
use gosub_map_renderer::RendererConfig;

/// Lays a label out as a straight row of glyphs. Point labels sit on the
/// first vertex, line and interior labels on the center of the envelope.
/// Fixed advance, no shaping.
struct RowLayout;

struct RowFinder {
    placement: Option<Placement>,
    current: Vec<Placement>,
}

impl LayoutEngine for RowLayout {
    fn placement_finder<'r>(
        &'r mut self,
        request: LabelRequest<'r>,
        detector: &'r mut dyn CollisionDetector,
    ) -> Box<dyn PlacementFinder + 'r> {
        Box::new(RowFinder {
            placement: place_row(&request, detector),
            current: Vec::new(),
        })
    }
}

fn place_row(
    request: &LabelRequest<'_>,
    detector: &mut dyn CollisionDetector,
) -> Option<Placement> {
    let text = request.text();
    if text.is_empty() {
        return None;
    }

    let symbolizer = request.symbolizer;
    let anchor = match symbolizer.placement {
        LabelPlacement::Point => request.feature.paths().first()?.vertices().first()?.point(),
        LabelPlacement::Line | LabelPlacement::Interior => request.feature.envelope()?.center(),
    };
    let projected = request.projection.forward(anchor)?;
    let center = request.view.forward(projected) + symbolizer.displacement;

    let format = symbolizer.format.clone();
    let size = format.text_size * request.scale_factor;
    let advance = size * 0.6;
    let width = advance * text.chars().count() as f64;

    let bbox = Rect::new(center.x - width / 2.0, center.y - size, center.x + width / 2.0, center.y);
    if symbolizer.avoid_edges {
        let bounds = Rect::new(0.0, 0.0, request.view.width() as f64, request.view.height() as f64);
        if bbox.intersect(bounds) != bbox {
            return None;
        }
    }

    let padded = bbox.inflate(symbolizer.min_distance, symbolizer.min_distance);
    if !symbolizer.allow_overlap && !detector.has_placement(padded) {
        return None;
    }
    detector.insert(padded);

    let mut placement = Placement::new(center);
    for (i, glyph) in text.chars().enumerate() {
        let offset = Vec2::new(i as f64 * advance - width / 2.0, 0.0);
        placement.push(GlyphNode::new(glyph, offset, 0.0, Arc::clone(&format)));
    }
    Some(placement)
}

impl PlacementFinder for RowFinder {
    fn next(&mut self) -> bool {
        match self.placement.take() {
            Some(placement) => {
                self.current = vec![placement];
                true
            }
            None => false,
        }
    }

    fn placements(&self) -> &[Placement] {
        &self.current
    }
}

fn build_layers() -> Vec<Layer> {
    let land = Feature::new(1).with_path(Geometry::polygon(&[
        (20.0, 20.0),
        (220.0, 30.0),
        (240.0, 180.0),
        (40.0, 200.0),
    ]));

    let mut land_sym = PolygonSymbolizer::new(Color::rgb(170, 200, 160));
    land_sym.opacity = 0.8;

    let mut road = Stroke::new(Color::rgb(200, 80, 40), 3.0);
    road.add_dash(10.0, 4.0);
    let mut road_sym = LineSymbolizer::new(road);
    road_sym.smooth = 0.5;

    let roads = Feature::new(2).with_path(Geometry::line_string(&[
        (0.0, 120.0),
        (80.0, 100.0),
        (160.0, 140.0),
        (256.0, 110.0),
    ]))
    .with_attribute("ref", "A1");

    let mut town = Geometry::new(GeometryKind::Point);
    town.move_to(128.0, 150.0);
    let town = Feature::new(3).with_path(town).with_attribute("name", "Gosub");

    let format = CharFormat {
        text_size: 14.0,
        halo_radius: 1.5,
        ..Default::default()
    };

    let mut town_label = TextSymbolizer::new("name", format);
    town_label.min_distance = 4.0;
    town_label.avoid_edges = true;

    let mut road_label = TextSymbolizer::new("ref", CharFormat::default());
    road_label.placement = LabelPlacement::Line;

    vec![
        Layer::new("land")
            .with_feature(land)
            .with_style(Style::new("land").with_symbolizer(land_sym)),
        Layer::new("roads")
            .with_feature(roads)
            .with_style(Style::new("roads").with_symbolizer(road_sym))
            .with_style(Style::new("road labels").with_symbolizer(road_label)),
        Layer::new("places")
            .with_feature(town)
            .with_style(Style::new("labels").with_symbolizer(town_label)),
    ]
}

fn main() -> Result<()> {
    init_logging(LoggingConfig {
        verbose: true,
        ..Default::default()
    });

    let map = Map::new(256, 256, Rect::new(0.0, 0.0, 256.0, 256.0))
        .with_background(Color::rgb(235, 240, 250))
        .with_buffer_size(16.0);

    let mut surface = CairoSurface::new(SurfaceSize::new(map.width, map.height))?;
    let mut layout = RowLayout;
    let mut detector = LabelCollisionDetector::for_map(map.width, map.height, map.buffer_size);
    let layers = build_layers();

    {
        let config = RendererConfig::default();
        let mut renderer = MapRenderer::new(&mut surface, &mut layout, &mut detector, config)?;
        render_map(&map, &layers, &mut renderer)?;
    }

    let (pixels, _stride) = surface.snapshot()?;
    let painted = pixels.chunks_exact(4).filter(|px| px[3] != 0).count();
    println!(
        "rendered {}x{} map, {} painted pixels, {} labels placed",
        map.width,
        map.height,
        painted,
        detector.len()
    );
    Ok(())
}
