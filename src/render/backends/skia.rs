use anyhow::Result;
use kurbo::Point;
use skia_safe::{paint, surfaces, Font, FontMgr, FontStyle, PathEffect, Typeface};

use crate::errors::RenderError;
use crate::paint::{BlendMode, Paint, PaintStyle, StrokeCap, StrokeJoin};
use crate::pipeline::PathSink;
use crate::render::{Surface, SurfaceSize};
use crate::style::Color;

impl PathSink for skia_safe::Path {
    fn move_to(&mut self, p: Point) {
        skia_safe::Path::move_to(self, (p.x as f32, p.y as f32));
    }

    fn line_to(&mut self, p: Point) {
        skia_safe::Path::line_to(self, (p.x as f32, p.y as f32));
    }

    fn quad_to(&mut self, ctrl: Point, p: Point) {
        skia_safe::Path::quad_to(self, (ctrl.x as f32, ctrl.y as f32), (p.x as f32, p.y as f32));
    }

    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point) {
        skia_safe::Path::cubic_to(
            self,
            (ctrl1.x as f32, ctrl1.y as f32),
            (ctrl2.x as f32, ctrl2.y as f32),
            (p.x as f32, p.y as f32),
        );
    }

    fn close(&mut self) {
        skia_safe::Path::close(self);
    }
}

/// Raster surface backed by a skia N32 premultiplied canvas.
pub struct SkiaSurface {
    surface: skia_safe::Surface,
    font_mgr: FontMgr,
    size: SurfaceSize,
    depth: usize,
}

impl SkiaSurface {
    pub fn new(size: SurfaceSize) -> Result<Self> {
        let dimensions = (size.width as i32, size.height as i32);
        let surface = surfaces::raster_n32_premul(dimensions).ok_or_else(|| {
            RenderError::SurfaceCreation(format!(
                "no raster surface of {}x{}",
                size.width, size.height
            ))
        })?;

        Ok(Self {
            surface,
            font_mgr: FontMgr::new(),
            size,
            depth: 0,
        })
    }

    /// Copies the current pixels out in the surface's native N32 layout.
    pub fn snapshot(&mut self) -> Result<Vec<u8>> {
        let info = self.surface.image_info();
        let row_bytes = info.min_row_bytes();
        let mut pixels = vec![0u8; row_bytes * self.size.height as usize];
        if !self.surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(RenderError::Backend("reading pixels failed".to_string()).into());
        }
        Ok(pixels)
    }
}

fn sk_color(color: Color) -> skia_safe::Color {
    skia_safe::Color::from_argb(color.a, color.r, color.g, color.b)
}

fn sk_blend_mode(mode: BlendMode) -> skia_safe::BlendMode {
    use skia_safe::BlendMode as Sk;
    match mode {
        BlendMode::Clear => Sk::Clear,
        BlendMode::Src => Sk::Src,
        BlendMode::Dst => Sk::Dst,
        BlendMode::SrcOver => Sk::SrcOver,
        BlendMode::DstOver => Sk::DstOver,
        BlendMode::SrcIn => Sk::SrcIn,
        BlendMode::DstIn => Sk::DstIn,
        BlendMode::SrcOut => Sk::SrcOut,
        BlendMode::DstOut => Sk::DstOut,
        BlendMode::SrcATop => Sk::SrcATop,
        BlendMode::DstATop => Sk::DstATop,
        BlendMode::Xor => Sk::Xor,
        BlendMode::Plus => Sk::Plus,
        BlendMode::Multiply => Sk::Multiply,
        BlendMode::Screen => Sk::Screen,
        BlendMode::Overlay => Sk::Overlay,
        BlendMode::Darken => Sk::Darken,
        BlendMode::Lighten => Sk::Lighten,
        BlendMode::ColorDodge => Sk::ColorDodge,
        BlendMode::ColorBurn => Sk::ColorBurn,
        BlendMode::HardLight => Sk::HardLight,
        BlendMode::SoftLight => Sk::SoftLight,
        BlendMode::Difference => Sk::Difference,
        BlendMode::Exclusion => Sk::Exclusion,
        BlendMode::Hue => Sk::Hue,
        BlendMode::Saturation => Sk::Saturation,
        BlendMode::Color => Sk::Color,
    }
}

fn sk_paint(p: &Paint) -> skia_safe::Paint {
    let mut out = skia_safe::Paint::default();
    out.set_color(sk_color(p.color));
    out.set_anti_alias(p.anti_alias);
    out.set_blend_mode(sk_blend_mode(p.blend_mode));

    match p.style {
        PaintStyle::Fill => {
            out.set_style(paint::Style::Fill);
        }
        PaintStyle::Stroke => {
            out.set_style(paint::Style::Stroke);
            out.set_stroke_width(p.stroke_width as f32);
            if let Some(join) = p.join {
                out.set_stroke_join(match join {
                    StrokeJoin::Miter => paint::Join::Miter,
                    StrokeJoin::Round => paint::Join::Round,
                    StrokeJoin::Bevel => paint::Join::Bevel,
                });
            }
            if let Some(cap) = p.cap {
                out.set_stroke_cap(match cap {
                    StrokeCap::Butt => paint::Cap::Butt,
                    StrokeCap::Square => paint::Cap::Square,
                    StrokeCap::Round => paint::Cap::Round,
                });
            }
            if let Some(dash) = &p.dash {
                let intervals: Vec<f32> = dash.intervals.iter().map(|v| *v as f32).collect();
                if let Some(effect) = PathEffect::dash(&intervals, dash.offset as f32) {
                    out.set_path_effect(effect);
                }
            }
        }
    }
    out
}

impl Surface for SkiaSurface {
    type Path = skia_safe::Path;
    type Face = Typeface;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.surface.canvas().clear(sk_color(color));
        Ok(())
    }

    fn fill_path(&mut self, path: &skia_safe::Path, paint: &Paint) -> Result<()> {
        self.surface.canvas().draw_path(path, &sk_paint(paint));
        Ok(())
    }

    fn stroke_path(&mut self, path: &skia_safe::Path, paint: &Paint) -> Result<()> {
        self.surface.canvas().draw_path(path, &sk_paint(paint));
        Ok(())
    }

    fn draw_glyph(&mut self, glyph: char, face: Option<&Typeface>, paint: &Paint) -> Result<()> {
        let mut buf = [0u8; 4];
        let text = glyph.encode_utf8(&mut buf);

        let size = paint.text_size as f32;
        let font = match face {
            Some(face) => Font::from_typeface(face.clone(), size),
            None => {
                let mut font = Font::default();
                font.set_size(size);
                font
            }
        };
        self.surface
            .canvas()
            .draw_str(text, (0.0, 0.0), &font, &sk_paint(paint));
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.surface.canvas().save();
        self.depth += 1;
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(RenderError::UnbalancedRestore.into());
        }
        self.surface.canvas().restore();
        self.depth -= 1;
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.surface.canvas().translate((dx as f32, dy as f32));
    }

    fn rotate(&mut self, degrees: f64) {
        self.surface.canvas().rotate(degrees as f32, None);
    }

    fn load_face(&mut self, name: &str) -> Option<Typeface> {
        self.font_mgr.match_family_style(name, FontStyle::normal())
    }
}
