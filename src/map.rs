//! Map, layer and style containers walked by [`render_map`](crate::render::render_map).

use kurbo::Rect;

use crate::errors::RenderError;
use crate::feature::Feature;
use crate::projection::{IdentityProjection, Projection};
use crate::style::{Color, Symbolizer};

/// Output raster description.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub width: u32,
    pub height: u32,
    /// Visible area in map coordinates
    pub extent: Rect,
    /// Filled at map start when set
    pub background: Option<Color>,
    /// Pixels of extra data fetched around the visible area
    pub buffer_size: f64,
}

impl Map {
    pub fn new(width: u32, height: u32, extent: Rect) -> Self {
        Self {
            width,
            height,
            extent,
            background: None,
            buffer_size: 0.0,
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: f64) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let e = self.extent;
        if !(e.x0.is_finite() && e.y0.is_finite() && e.x1.is_finite() && e.y1.is_finite())
            || e.width() == 0.0
            || e.height() == 0.0
        {
            return Err(RenderError::InvalidExtent);
        }
        Ok(())
    }
}

/// Named, ordered list of symbolizers applied to every feature of a layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub name: String,
    pub symbolizers: Vec<Symbolizer>,
}

impl Style {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbolizers: Vec::new(),
        }
    }

    pub fn with_symbolizer(mut self, sym: impl Into<Symbolizer>) -> Self {
        self.symbolizers.push(sym.into());
        self
    }
}

/// In-memory feature layer with its projection and styles.
pub struct Layer {
    pub name: String,
    pub projection: Box<dyn Projection>,
    pub features: Vec<Feature>,
    pub styles: Vec<Style>,
}

impl Layer {
    /// Layer in map coordinates (identity projection).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            projection: Box::new(IdentityProjection),
            features: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn with_projection(mut self, projection: impl Projection + 'static) -> Self {
        self.projection = Box::new(projection);
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.styles.push(style);
        self
    }
}
