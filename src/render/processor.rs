use anyhow::Result;
use kurbo::Rect;
use log::{debug, trace};

use crate::feature::Feature;
use crate::map::{Layer, Map};
use crate::projection::Projection;
use crate::render::{MapRenderer, Surface};

/// Renders `layers` in order: map, then for each layer each style, each
/// feature and each symbolizer of the style.
///
/// Rendering order is observable: labels placed earlier block later ones.
pub fn render_map<S: Surface>(
    map: &Map,
    layers: &[Layer],
    renderer: &mut MapRenderer<'_, S>,
) -> Result<()> {
    renderer.start_map(map)?;
    let buffer_size = renderer.buffer_size(map);
    for layer in layers {
        render_layer(map, layer, buffer_size, renderer)?;
    }
    renderer.end_map(map);
    Ok(())
}

fn render_layer<S: Surface>(
    map: &Map,
    layer: &Layer,
    buffer_size: f64,
    renderer: &mut MapRenderer<'_, S>,
) -> Result<()> {
    let projection = layer.projection.as_ref();
    let Some(query_extent) = layer_query_extent(map, projection, buffer_size) else {
        debug!("layer {} has no image in the map extent, skipping", layer.name);
        return Ok(());
    };

    renderer.start_layer(layer, query_extent);
    for style in &layer.styles {
        renderer.start_style(style);
        for feature in &layer.features {
            if !intersects(feature, query_extent) {
                trace!("feature {} outside query extent", feature.id);
                continue;
            }
            for sym in &style.symbolizers {
                renderer.process(sym, feature, projection)?;
            }
        }
        renderer.end_style(style);
    }
    renderer.end_layer(layer);
    Ok(())
}

/// Map extent grown by `buffer_size` pixels, mapped back into layer
/// coordinates through `projection`.
pub fn layer_query_extent(
    map: &Map,
    projection: &dyn Projection,
    buffer_size: f64,
) -> Option<Rect> {
    let extent = map.extent.abs();
    let resolution = extent.width() / map.width.max(1) as f64;
    let pad = buffer_size * resolution;
    projection.backward_box(extent.inflate(pad, pad))
}

fn intersects(feature: &Feature, extent: Rect) -> bool {
    match feature.envelope() {
        Some(e) => e.x0 <= extent.x1 && extent.x0 <= e.x1 && e.y0 <= extent.y1 && extent.y0 <= e.y1,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{IdentityProjection, LinearProjection};
    use kurbo::Affine;

    #[test]
    fn query_extent_grows_by_buffer_in_map_units() {
        let map = Map::new(100, 100, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let q = layer_query_extent(&map, &IdentityProjection, 10.0).unwrap();
        assert_eq!(q, Rect::new(-100.0, -100.0, 1100.0, 1100.0));
    }

    #[test]
    fn query_extent_is_back_projected() {
        let map = Map::new(10, 10, Rect::new(0.0, 0.0, 10.0, 10.0));
        let halve = LinearProjection::new(Affine::scale(2.0)).unwrap();
        let q = layer_query_extent(&map, &halve, 0.0).unwrap();
        assert_eq!(q, Rect::new(0.0, 0.0, 5.0, 5.0));
    }
}
