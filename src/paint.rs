//! Translation of style attributes into backend paint state.
//!
//! Everything here is a pure function of its inputs. The resulting [`Paint`]
//! uses the 2D backends' common vocabulary ([`BlendMode`], [`StrokeJoin`],
//! [`StrokeCap`]); each surface maps that onto its native types.

use crate::style::{CharFormat, Color, CompositeMode, LineCap, LineJoin, Stroke};

/// Blend modes offered by 2D surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    Clear,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcATop,
    DstATop,
    Xor,
    Plus,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    Butt,
    Square,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

/// Flattened dash intervals: on, off, on, off, ...
#[derive(Debug, Clone, PartialEq)]
pub struct Dash {
    pub intervals: Vec<f64>,
    pub offset: f64,
}

/// Backend-neutral paint state for one draw call.
///
/// `join` and `cap` are optional: `None` keeps whatever the backend uses by
/// default.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub style: PaintStyle,
    pub color: Color,
    pub blend_mode: BlendMode,
    pub anti_alias: bool,
    pub stroke_width: f64,
    pub join: Option<StrokeJoin>,
    pub cap: Option<StrokeCap>,
    pub dash: Option<Dash>,
    pub text_size: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            style: PaintStyle::Fill,
            color: Color::BLACK,
            blend_mode: BlendMode::SrcOver,
            anti_alias: true,
            stroke_width: 0.0,
            join: None,
            cap: None,
            dash: None,
            text_size: 12.0,
        }
    }
}

impl Paint {
    pub fn new(style: PaintStyle, comp_op: CompositeMode, anti_alias: bool) -> Self {
        Self {
            style,
            blend_mode: blend_mode(comp_op),
            anti_alias,
            ..Default::default()
        }
    }
}

/// Maps a style compositing mode onto a backend blend mode. Modes without a
/// backend counterpart become `SrcOver`.
pub fn blend_mode(mode: CompositeMode) -> BlendMode {
    match mode {
        CompositeMode::Clear => BlendMode::Clear,
        CompositeMode::Src => BlendMode::Src,
        CompositeMode::Dst => BlendMode::Dst,
        CompositeMode::SrcOver => BlendMode::SrcOver,
        CompositeMode::DstOver => BlendMode::DstOver,
        CompositeMode::SrcIn => BlendMode::SrcIn,
        CompositeMode::DstIn => BlendMode::DstIn,
        CompositeMode::SrcOut => BlendMode::SrcOut,
        CompositeMode::DstOut => BlendMode::DstOut,
        CompositeMode::SrcAtop => BlendMode::SrcATop,
        CompositeMode::DstAtop => BlendMode::DstATop,
        CompositeMode::Xor => BlendMode::Xor,
        CompositeMode::Plus => BlendMode::Plus,
        CompositeMode::Multiply => BlendMode::Multiply,
        CompositeMode::Screen => BlendMode::Screen,
        CompositeMode::Overlay => BlendMode::Overlay,
        CompositeMode::Darken => BlendMode::Darken,
        CompositeMode::Lighten => BlendMode::Lighten,
        CompositeMode::ColorDodge => BlendMode::ColorDodge,
        CompositeMode::ColorBurn => BlendMode::ColorBurn,
        CompositeMode::HardLight => BlendMode::HardLight,
        CompositeMode::SoftLight => BlendMode::SoftLight,
        CompositeMode::Difference => BlendMode::Difference,
        CompositeMode::Exclusion => BlendMode::Exclusion,
        CompositeMode::Hue => BlendMode::Hue,
        CompositeMode::Saturation => BlendMode::Saturation,
        CompositeMode::Color => BlendMode::Color,
        _ => BlendMode::SrcOver,
    }
}

/// Base alpha scaled by opacity, rounded and clamped to `0..=255`.
pub fn effective_alpha(alpha: u8, opacity: f64) -> u8 {
    let a = (alpha as f64 * opacity).round();
    if a.is_nan() {
        return 0;
    }
    a.clamp(0.0, 255.0) as u8
}

pub fn with_opacity(color: Color, opacity: f64) -> Color {
    color.with_alpha(effective_alpha(color.a, opacity))
}

/// `MiterRevert` has no backend equivalent and maps to `None`.
pub fn stroke_join(join: LineJoin) -> Option<StrokeJoin> {
    match join {
        LineJoin::Miter => Some(StrokeJoin::Miter),
        LineJoin::MiterRevert => None,
        LineJoin::Round => Some(StrokeJoin::Round),
        LineJoin::Bevel => Some(StrokeJoin::Bevel),
    }
}

pub fn stroke_cap(cap: LineCap) -> StrokeCap {
    match cap {
        LineCap::Butt => StrokeCap::Butt,
        LineCap::Square => StrokeCap::Square,
        LineCap::Round => StrokeCap::Round,
    }
}

/// Scales each (on, off) pair and flattens it. The offset is passed through
/// unscaled.
///
/// `None` for a solid stroke: no pattern, a negative or non-finite interval,
/// or a pattern of zero total length.
pub fn dash(stroke: &Stroke, scale_factor: f64) -> Option<Dash> {
    if !stroke.has_dash() {
        return None;
    }
    let intervals: Vec<f64> = stroke
        .dash
        .iter()
        .flat_map(|&(on, off)| [on * scale_factor, off * scale_factor])
        .collect();

    let valid = intervals.iter().all(|v| v.is_finite() && *v >= 0.0);
    if !valid || intervals.iter().sum::<f64>() <= 0.0 {
        log::trace!("unusable dash pattern {:?}, stroking solid", stroke.dash);
        return None;
    }

    let offset = if stroke.dash_offset.is_finite() {
        stroke.dash_offset
    } else {
        0.0
    };
    Some(Dash { intervals, offset })
}

pub fn stroke_paint(
    stroke: &Stroke,
    comp_op: CompositeMode,
    scale_factor: f64,
    anti_alias: bool,
) -> Paint {
    Paint {
        color: with_opacity(stroke.color, stroke.opacity),
        stroke_width: stroke.width * scale_factor,
        join: stroke_join(stroke.line_join),
        cap: Some(stroke_cap(stroke.line_cap)),
        dash: dash(stroke, scale_factor),
        ..Paint::new(PaintStyle::Stroke, comp_op, anti_alias)
    }
}

pub fn fill_paint(fill: Color, opacity: f64, comp_op: CompositeMode, anti_alias: bool) -> Paint {
    Paint {
        color: with_opacity(fill, opacity),
        ..Paint::new(PaintStyle::Fill, comp_op, anti_alias)
    }
}

/// Outline paint for a glyph halo: a round-joined stroke twice the halo radius wide.
pub fn halo_paint(
    format: &CharFormat,
    comp_op: CompositeMode,
    scale_factor: f64,
    anti_alias: bool,
) -> Paint {
    Paint {
        color: with_opacity(format.halo_fill, format.text_opacity),
        stroke_width: 2.0 * format.halo_radius * scale_factor,
        join: Some(StrokeJoin::Round),
        text_size: format.text_size * scale_factor,
        ..Paint::new(PaintStyle::Stroke, comp_op, anti_alias)
    }
}

pub fn glyph_paint(
    format: &CharFormat,
    comp_op: CompositeMode,
    scale_factor: f64,
    anti_alias: bool,
) -> Paint {
    Paint {
        color: with_opacity(format.fill, format.text_opacity),
        text_size: format.text_size * scale_factor,
        ..Paint::new(PaintStyle::Fill, comp_op, anti_alias)
    }
}
