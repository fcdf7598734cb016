use serde::{Deserialize, Serialize};

use crate::errors::RenderError;

const DEFAULT_FACE: &str = "DejaVu Sans";

/// Renderer configuration. Everything here is fixed for the lifetime of a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Multiplier applied to stroke widths, dash lengths, halo radii and text sizes
    pub scale_factor: f64,
    /// Extra pixels around the map that labels may occupy
    pub buffer_size: f64,
    /// Face used when a glyph format does not name one
    pub default_face: String,
    /// Anti-alias paths and glyphs
    pub anti_alias: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            buffer_size: 0.0,
            default_face: DEFAULT_FACE.to_string(),
            anti_alias: true,
        }
    }
}

impl RendererConfig {
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Checks the values that would make every later computation meaningless.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(RenderError::InvalidScaleFactor(self.scale_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RendererConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scale_factor, 1.0);
        assert!(config.anti_alias);
    }

    #[test]
    fn rejects_bad_scale_factors() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = RendererConfig::default().with_scale_factor(bad);
            assert!(matches!(config.validate(), Err(RenderError::InvalidScaleFactor(_))));
        }
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: RendererConfig = serde_json::from_str(r#"{ "scale_factor": 2.0 }"#).unwrap();
        assert_eq!(config.scale_factor, 2.0);
        assert_eq!(config.default_face, DEFAULT_FACE);
        assert_eq!(config.buffer_size, 0.0);
    }
}
