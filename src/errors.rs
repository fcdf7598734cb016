/// Errors that abort a render pass.
///
/// Degenerate input (short paths, unknown path commands, unmapped modes,
/// missing faces) never ends up here; it is skipped where it is found.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid map dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid scale factor: {0}")]
    InvalidScaleFactor(f64),

    #[error("Invalid map extent")]
    InvalidExtent,

    #[error("Surface creation failed: {0}")]
    SurfaceCreation(String),

    #[error("Drawing context unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Unbalanced restore on surface")]
    UnbalancedRestore,
}
