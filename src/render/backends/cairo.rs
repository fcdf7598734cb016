use anyhow::Result;
use kurbo::{BezPath, PathEl, Point};

use crate::errors::RenderError;
use crate::paint::{BlendMode, Paint, PaintStyle, StrokeCap, StrokeJoin};
use crate::render::{Surface, SurfaceSize};
use crate::style::Color;

/// Raster surface backed by a cairo ARGB32 image.
pub struct CairoSurface {
    surface: cairo::ImageSurface,
    cr: cairo::Context,
    size: SurfaceSize,
    depth: usize,
}

impl CairoSurface {
    pub fn new(size: SurfaceSize) -> Result<Self> {
        let surface = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            size.width as i32,
            size.height as i32,
        )
        .map_err(|e| RenderError::SurfaceCreation(e.to_string()))?;

        let cr = cairo::Context::new(&surface)
            .map_err(|e| RenderError::SurfaceUnavailable(e.to_string()))?;

        Ok(Self {
            surface,
            cr,
            size,
            depth: 0,
        })
    }

    /// Copies the current pixels out as premultiplied ARGB32 rows.
    /// Returns the pixel buffer and its stride in bytes.
    pub fn snapshot(&self) -> Result<(Vec<u8>, u32)> {
        self.surface.flush();

        // The drawing context keeps a reference to our surface, so read
        // through a private copy.
        let mut copy = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            self.size.width as i32,
            self.size.height as i32,
        )?;
        {
            let cr = cairo::Context::new(&copy)?;
            cr.set_source_surface(&self.surface, 0.0, 0.0)?;
            cr.set_operator(cairo::Operator::Source);
            cr.paint()?;
        }
        copy.flush();

        let stride = copy.stride() as u32;
        let data = copy.data()?;
        Ok((data.to_vec(), stride))
    }

    fn set_path(&self, path: &BezPath) {
        self.cr.new_path();
        let mut last = Point::ZERO;
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    self.cr.move_to(p.x, p.y);
                    last = p;
                }
                PathEl::LineTo(p) => {
                    self.cr.line_to(p.x, p.y);
                    last = p;
                }
                PathEl::QuadTo(c, p) => {
                    // cairo has no quadratic segments; raise to cubic
                    let c1 = last + (c - last) * (2.0 / 3.0);
                    let c2 = p + (c - p) * (2.0 / 3.0);
                    self.cr.curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
                    last = p;
                }
                PathEl::CurveTo(c1, c2, p) => {
                    self.cr.curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
                    last = p;
                }
                PathEl::ClosePath => self.cr.close_path(),
            }
        }
    }

    fn set_paint(&self, paint: &Paint) {
        let [r, g, b, a] = paint.color.to_f64();
        self.cr.set_source_rgba(r, g, b, a);
        self.cr.set_operator(operator(paint.blend_mode));
        self.cr.set_antialias(if paint.anti_alias {
            cairo::Antialias::Default
        } else {
            cairo::Antialias::None
        });

        if paint.style == PaintStyle::Stroke {
            self.cr.set_line_width(paint.stroke_width);
            if let Some(join) = paint.join {
                self.cr.set_line_join(line_join(join));
            }
            if let Some(cap) = paint.cap {
                self.cr.set_line_cap(line_cap(cap));
            }
            match &paint.dash {
                Some(dash) => self.cr.set_dash(&dash.intervals, dash.offset),
                None => self.cr.set_dash(&[], 0.0),
            }
        }
    }
}

fn operator(mode: BlendMode) -> cairo::Operator {
    use cairo::Operator;
    match mode {
        BlendMode::Clear => Operator::Clear,
        BlendMode::Src => Operator::Source,
        BlendMode::Dst => Operator::Dest,
        BlendMode::SrcOver => Operator::Over,
        BlendMode::DstOver => Operator::DestOver,
        BlendMode::SrcIn => Operator::In,
        BlendMode::DstIn => Operator::DestIn,
        BlendMode::SrcOut => Operator::Out,
        BlendMode::DstOut => Operator::DestOut,
        BlendMode::SrcATop => Operator::Atop,
        BlendMode::DstATop => Operator::DestAtop,
        BlendMode::Xor => Operator::Xor,
        BlendMode::Plus => Operator::Add,
        BlendMode::Multiply => Operator::Multiply,
        BlendMode::Screen => Operator::Screen,
        BlendMode::Overlay => Operator::Overlay,
        BlendMode::Darken => Operator::Darken,
        BlendMode::Lighten => Operator::Lighten,
        BlendMode::ColorDodge => Operator::ColorDodge,
        BlendMode::ColorBurn => Operator::ColorBurn,
        BlendMode::HardLight => Operator::HardLight,
        BlendMode::SoftLight => Operator::SoftLight,
        BlendMode::Difference => Operator::Difference,
        BlendMode::Exclusion => Operator::Exclusion,
        BlendMode::Hue => Operator::HslHue,
        BlendMode::Saturation => Operator::HslSaturation,
        BlendMode::Color => Operator::HslColor,
    }
}

fn line_join(join: StrokeJoin) -> cairo::LineJoin {
    match join {
        StrokeJoin::Miter => cairo::LineJoin::Miter,
        StrokeJoin::Round => cairo::LineJoin::Round,
        StrokeJoin::Bevel => cairo::LineJoin::Bevel,
    }
}

fn line_cap(cap: StrokeCap) -> cairo::LineCap {
    match cap {
        StrokeCap::Butt => cairo::LineCap::Butt,
        StrokeCap::Square => cairo::LineCap::Square,
        StrokeCap::Round => cairo::LineCap::Round,
    }
}

impl Surface for CairoSurface {
    type Path = BezPath;
    type Face = cairo::FontFace;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        let [r, g, b, a] = color.to_f64();
        self.cr.save()?;
        self.cr.set_operator(cairo::Operator::Source);
        self.cr.set_source_rgba(r, g, b, a);
        self.cr.paint()?;
        self.cr.restore()?;
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint) -> Result<()> {
        self.cr.save()?;
        self.set_paint(paint);
        self.set_path(path);
        self.cr.fill()?;
        self.cr.restore()?;
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, paint: &Paint) -> Result<()> {
        self.cr.save()?;
        self.set_paint(paint);
        self.set_path(path);
        self.cr.stroke()?;
        self.cr.restore()?;
        Ok(())
    }

    fn draw_glyph(
        &mut self,
        glyph: char,
        face: Option<&cairo::FontFace>,
        paint: &Paint,
    ) -> Result<()> {
        let mut buf = [0u8; 4];
        let text = glyph.encode_utf8(&mut buf);

        self.cr.save()?;
        self.set_paint(paint);
        match face {
            Some(face) => self.cr.set_font_face(face),
            None => self
                .cr
                .select_font_face("", cairo::FontSlant::Normal, cairo::FontWeight::Normal),
        }
        self.cr.set_font_size(paint.text_size);
        self.cr.new_path();
        self.cr.move_to(0.0, 0.0);
        match paint.style {
            PaintStyle::Fill => self.cr.show_text(text)?,
            PaintStyle::Stroke => {
                self.cr.text_path(text);
                self.cr.stroke()?;
            }
        }
        self.cr.restore()?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.cr.save()?;
        self.depth += 1;
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(RenderError::UnbalancedRestore.into());
        }
        self.cr.restore()?;
        self.depth -= 1;
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.cr.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.cr.rotate(degrees.to_radians());
    }

    fn load_face(&mut self, name: &str) -> Option<cairo::FontFace> {
        cairo::FontFace::toy_create(name, cairo::FontSlant::Normal, cairo::FontWeight::Normal).ok()
    }
}
