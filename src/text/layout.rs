use kurbo::Rect;

use crate::feature::Feature;
use crate::projection::{Projection, ViewTransform};
use crate::style::TextSymbolizer;
use crate::text::{CollisionDetector, Placement};

/// Everything a layout engine needs to place the labels of one feature.
pub struct LabelRequest<'a> {
    pub symbolizer: &'a TextSymbolizer,
    pub feature: &'a Feature,
    pub projection: &'a dyn Projection,
    pub view: &'a ViewTransform,
    /// Query extent of the current layer, in layer coordinates
    pub query_extent: Rect,
    pub scale_factor: f64,
}

impl LabelRequest<'_> {
    /// Label text taken from the feature attribute the symbolizer names.
    /// Empty when the attribute is missing.
    pub fn text(&self) -> String {
        self.feature
            .get(&self.symbolizer.name)
            .map(|value| value.to_text())
            .unwrap_or_default()
    }
}

/// Lazy, finite sequence of accepted placements for one feature.
///
/// Rejecting colliding candidates and registering accepted ones with the
/// collision detector is the finder's job. The renderer only draws what
/// [`placements`](Self::placements) returns after each successful
/// [`next`](Self::next).
pub trait PlacementFinder {
    /// Advances to the next label position. False when exhausted.
    fn next(&mut self) -> bool;

    /// Placements accepted at the current position.
    fn placements(&self) -> &[Placement];
}

/// Turns text and placement constraints into glyph placements.
pub trait LayoutEngine {
    fn placement_finder<'r>(
        &'r mut self,
        request: LabelRequest<'r>,
        detector: &'r mut dyn CollisionDetector,
    ) -> Box<dyn PlacementFinder + 'r>;
}
